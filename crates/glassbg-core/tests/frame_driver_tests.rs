// Host-side tests for the frame driver, run against a backend that records
// every call instead of touching a GPU.

use glassbg_core::*;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Prepare,
    Configure(TargetSizes),
    Begin,
    DrawBackground(Target),
    Blur {
        pass: BlurPass,
        source: Target,
        dest: Target,
        uniforms: BlurUniforms,
    },
    DrawGlass {
        source: Target,
        uniforms: GlassUniforms,
    },
    End,
    Dispose,
}

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<Call>,
    skip_frames: usize,
    fail_configures: usize,
    live_targets: usize,
    prepared: bool,
}

impl RecordingBackend {
    fn frames(&self) -> Vec<&[Call]> {
        let mut out = Vec::new();
        let mut start = None;
        for (i, c) in self.calls.iter().enumerate() {
            match c {
                Call::Begin => start = Some(i),
                Call::End => {
                    if let Some(s) = start.take() {
                        out.push(&self.calls[s..=i]);
                    }
                }
                _ => {}
            }
        }
        out
    }
}

impl RenderBackend for RecordingBackend {
    fn prepare(&mut self, _scene: &Scene) -> Result<(), PipelineError> {
        self.prepared = true;
        self.calls.push(Call::Prepare);
        Ok(())
    }

    fn configure(&mut self, sizes: &TargetSizes) -> Result<(), PipelineError> {
        if !self.prepared {
            return Err(PipelineError::NotPrepared);
        }
        if self.fail_configures > 0 {
            self.fail_configures -= 1;
            return Err(PipelineError::Surface("configure rejected".into()));
        }
        // old targets are dropped, three new ones allocated
        self.live_targets = 3;
        self.calls.push(Call::Configure(*sizes));
        Ok(())
    }

    fn begin_frame(&mut self) -> Result<FrameStatus, PipelineError> {
        if self.skip_frames > 0 {
            self.skip_frames -= 1;
            return Ok(FrameStatus::Skipped);
        }
        self.calls.push(Call::Begin);
        Ok(FrameStatus::Ready)
    }

    fn draw_background(&mut self, dest: Target, _scene: &BackgroundScene, _camera: &Camera) {
        self.calls.push(Call::DrawBackground(dest));
    }

    fn blur(&mut self, pass: BlurPass, source: Target, dest: Target, uniforms: &BlurUniforms) {
        self.calls.push(Call::Blur {
            pass,
            source,
            dest,
            uniforms: *uniforms,
        });
    }

    fn draw_glass(
        &mut self,
        source: Target,
        _scene: &MainScene,
        _camera: &Camera,
        uniforms: &GlassUniforms,
    ) {
        self.calls.push(Call::DrawGlass {
            source,
            uniforms: *uniforms,
        });
    }

    fn end_frame(&mut self) -> Result<(), PipelineError> {
        self.calls.push(Call::End);
        Ok(())
    }

    fn dispose(&mut self) {
        self.live_targets = 0;
        self.prepared = false;
        self.calls.push(Call::Dispose);
    }
}

fn small_config() -> BackdropConfig {
    BackdropConfig {
        glass_subdivisions: 2,
        orb_subdivisions: 1,
        ..BackdropConfig::default()
    }
}

fn make_context(w: u32, h: u32) -> RenderContext<RecordingBackend> {
    RenderContext::init(RecordingBackend::default(), &small_config(), Viewport::new(w, h))
        .expect("init")
}

#[test]
fn frame_issues_passes_in_dependency_order() {
    let mut ctx = make_context(800, 600);
    ctx.tick(0.5).expect("tick");
    let frames = ctx.backend().frames();
    assert_eq!(frames.len(), 1);
    let kinds: Vec<String> = frames[0]
        .iter()
        .map(|c| match c {
            Call::Begin => "begin".to_string(),
            Call::DrawBackground(t) => format!("bg->{t:?}"),
            Call::Blur { source, dest, .. } => format!("blur {source:?}->{dest:?}"),
            Call::DrawGlass { source, .. } => format!("glass<-{source:?}"),
            Call::End => "end".to_string(),
            other => format!("{other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "begin",
            "bg->Background",
            "blur Background->BlurA",
            "blur BlurA->BlurB",
            "bg->Screen",
            "glass<-BlurB",
            "end",
        ]
    );
}

#[test]
fn every_read_target_was_written_earlier_in_the_same_frame() {
    let mut ctx = make_context(640, 480);
    for i in 0..5 {
        ctx.tick(i as f32 * 0.016).expect("tick");
    }
    for frame in ctx.backend().frames() {
        let mut written: HashSet<Target> = HashSet::new();
        for call in frame {
            match call {
                Call::DrawBackground(t) => {
                    written.insert(*t);
                }
                Call::Blur { source, dest, .. } => {
                    assert!(written.contains(source), "{source:?} read before written");
                    written.insert(*dest);
                }
                Call::DrawGlass { source, .. } => {
                    assert!(written.contains(source), "{source:?} read before written");
                    assert!(written.contains(&Target::Screen), "glass drawn before screen background");
                }
                _ => {}
            }
        }
    }
}

#[test]
fn blur_passes_use_perpendicular_directions() {
    let mut ctx = make_context(1000, 500);
    ctx.tick(1.0).expect("tick");
    let blurs: Vec<_> = ctx
        .backend()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Blur { pass, uniforms, .. } => Some((*pass, *uniforms)),
            _ => None,
        })
        .collect();
    assert_eq!(blurs.len(), 2);
    assert_eq!(blurs[0].0, BlurPass::Horizontal);
    assert_eq!(blurs[0].1.direction, [2.5, 0.0]);
    assert_eq!(blurs[1].0, BlurPass::Vertical);
    assert_eq!(blurs[1].1.direction, [0.0, 2.5]);
    for (_, u) in blurs {
        assert_eq!(u.resolution, [500.0, 250.0]);
    }
}

#[test]
fn glass_receives_current_time_and_viewport() {
    let mut ctx = make_context(1280, 720);
    ctx.tick(3.25).expect("tick");
    let glass = ctx
        .backend()
        .calls
        .iter()
        .find_map(|c| match c {
            Call::DrawGlass { uniforms, .. } => Some(*uniforms),
            _ => None,
        })
        .expect("glass pass");
    assert_eq!(glass.time, 3.25);
    assert_eq!(glass.resolution, [1280.0, 720.0]);
    assert!((glass.refract_power - 0.18).abs() < 1e-6);
    assert!((glass.dispersion - 0.025).abs() < 1e-6);
    assert_eq!(ctx.glass_material().source, Some(Target::BlurB));
}

#[test]
fn resize_is_deferred_to_the_next_tick() {
    let mut ctx = make_context(800, 600);
    let configures_before = ctx
        .backend()
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Configure(_)))
        .count();

    ctx.resize(Viewport::new(1025, 767));
    // nothing applied until the frame boundary
    assert_eq!(ctx.sizes().background, Extent::new(800, 600));
    assert_eq!(
        ctx.backend()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Configure(_)))
            .count(),
        configures_before
    );

    ctx.tick(0.0).expect("tick");
    let calls = &ctx.backend().calls;
    let configure_at = calls
        .iter()
        .rposition(|c| matches!(c, Call::Configure(_)))
        .expect("configure");
    let begin_at = calls
        .iter()
        .rposition(|c| matches!(c, Call::Begin))
        .expect("begin");
    assert!(configure_at < begin_at, "resize must land before the frame starts");

    let sizes = ctx.sizes();
    assert_eq!(sizes.background, Extent::new(1025, 767));
    assert_eq!(sizes.blur, Extent::new(513, 384));
    assert_eq!(ctx.blur_material().uniforms(BlurPass::Vertical).resolution, [513.0, 384.0]);
    assert_eq!(ctx.glass_material().uniforms.resolution, [1025.0, 767.0]);
    assert!((ctx.camera().aspect - 1025.0 / 767.0).abs() < 1e-6);
}

#[test]
fn only_the_latest_queued_resize_applies() {
    let mut ctx = make_context(800, 600);
    ctx.resize(Viewport::new(100, 100));
    ctx.resize(Viewport::new(300, 200));
    ctx.tick(0.0).expect("tick");
    let configured: Vec<_> = ctx
        .backend()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Configure(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(configured.len(), 2);
    assert_eq!(configured[1].background, Extent::new(300, 200));
    assert_eq!(configured[1].blur, Extent::new(150, 100));
}

#[test]
fn failed_resize_stays_queued_for_the_next_tick() {
    let mut ctx = make_context(800, 600);
    ctx.backend_mut().fail_configures = 1;
    ctx.resize(Viewport::new(640, 480));

    let err = ctx.tick(0.0).err().expect("configure failure surfaces");
    assert!(matches!(err, PipelineError::Surface(_)));
    assert_eq!(ctx.sizes().background, Extent::new(800, 600));
    assert!(ctx.backend().frames().is_empty());

    assert_eq!(ctx.tick(0.1).expect("retry"), FrameStatus::Ready);
    assert_eq!(ctx.sizes().background, Extent::new(640, 480));
    assert_eq!(ctx.sizes().blur, Extent::new(320, 240));
    assert_eq!(ctx.glass_material().uniforms.resolution, [640.0, 480.0]);
}

#[test]
fn zero_area_resize_never_allocates_empty_targets() {
    let mut ctx = make_context(800, 600);
    ctx.resize(Viewport::new(0, 0));
    ctx.tick(0.0).expect("tick");
    for c in &ctx.backend().calls {
        if let Call::Configure(s) = c {
            assert!(s.background.width >= 1 && s.background.height >= 1);
            assert!(s.blur.width >= 1 && s.blur.height >= 1);
        }
    }
    assert_eq!(ctx.sizes().blur, Extent::new(1, 1));
}

#[test]
fn skipped_frame_issues_no_passes() {
    let mut ctx = make_context(320, 240);
    ctx.backend_mut().skip_frames = 1;
    assert_eq!(ctx.tick(0.1).expect("tick"), FrameStatus::Skipped);
    assert!(ctx.backend().frames().is_empty());
    assert_eq!(ctx.frame_count(), 0);
    assert_eq!(ctx.tick(0.2).expect("tick"), FrameStatus::Ready);
    assert_eq!(ctx.backend().frames().len(), 1);
}

#[test]
fn dispose_releases_and_allows_reinit() {
    let mut ctx = make_context(320, 240);
    ctx.tick(0.0).expect("tick");
    let backend = ctx.dispose();
    assert_eq!(backend.live_targets, 0);
    assert_eq!(backend.calls.last(), Some(&Call::Dispose));

    let mut ctx = RenderContext::init(backend, &small_config(), Viewport::new(320, 240))
        .expect("re-init");
    assert_eq!(ctx.backend().live_targets, 3);
    ctx.tick(0.0).expect("tick after re-init");
    assert_eq!(ctx.backend().frames().len(), 2);
}

#[test]
fn invalid_config_fails_init() {
    let config = BackdropConfig {
        orb_count: 0,
        ..small_config()
    };
    let err = RenderContext::init(RecordingBackend::default(), &config, Viewport::new(10, 10))
        .err()
        .expect("must fail");
    assert!(matches!(err, PipelineError::InvalidConfig(_)));
}
