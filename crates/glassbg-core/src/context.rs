//! Frame driver: owns the scene, camera, materials and backend, and runs the
//! fixed six-step frame. Hosts schedule `tick`; the context never
//! self-schedules.

use crate::backend::{FrameStatus, RenderBackend};
use crate::blur::{BlurPass, BlurUniforms};
use crate::camera::Camera;
use crate::config::BackdropConfig;
use crate::error::Result;
use crate::glass::GlassUniforms;
use crate::scene::Scene;
use crate::targets::{Target, TargetSizes, Viewport};

/// One uniform set per blur invocation so both passes can be recorded into
/// the same command stream.
#[derive(Clone, Debug)]
pub struct BlurMaterial {
    step: f32,
    uniforms: [BlurUniforms; 2],
}

impl BlurMaterial {
    fn new(step: f32, sizes: &TargetSizes) -> Self {
        let mut m = Self {
            step,
            uniforms: [BlurUniforms {
                resolution: [1.0, 1.0],
                direction: [0.0, 0.0],
            }; 2],
        };
        m.set_resolution(sizes);
        m
    }

    fn set_resolution(&mut self, sizes: &TargetSizes) {
        for pass in BlurPass::ALL {
            self.uniforms[pass.index()] = BlurUniforms {
                resolution: sizes.blur.as_vec(),
                direction: pass.direction(self.step),
            };
        }
    }

    pub fn uniforms(&self, pass: BlurPass) -> &BlurUniforms {
        &self.uniforms[pass.index()]
    }
}

#[derive(Clone, Debug)]
pub struct GlassMaterial {
    pub uniforms: GlassUniforms,
    /// Texture bound as the refraction source for the current frame.
    pub source: Option<Target>,
}

pub struct RenderContext<B: RenderBackend> {
    backend: B,
    scene: Scene,
    camera: Camera,
    sizes: TargetSizes,
    blur: BlurMaterial,
    glass: GlassMaterial,
    pending_resize: Option<Viewport>,
    frames: u64,
}

impl<B: RenderBackend> RenderContext<B> {
    /// Build the scene, allocate targets and hand static geometry to the backend.
    pub fn init(mut backend: B, config: &BackdropConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let scene = Scene::new(config);
        let sizes = TargetSizes::for_viewport(viewport);
        let mut camera = Camera::new(1.0);
        camera.set_aspect(sizes.background.width, sizes.background.height);

        backend.prepare(&scene)?;
        backend.configure(&sizes)?;

        log::info!(
            "[init] orbs={} glass_vertices={} background={}x{} blur={}x{}",
            scene.background.orbs.len(),
            scene.main.glass.vertex_count(),
            sizes.background.width,
            sizes.background.height,
            sizes.blur.width,
            sizes.blur.height
        );

        Ok(Self {
            backend,
            blur: BlurMaterial::new(config.blur_step, &sizes),
            glass: GlassMaterial {
                uniforms: GlassUniforms::new(&config.glass, sizes.background.as_vec()),
                source: None,
            },
            scene,
            camera,
            sizes,
            pending_resize: None,
            frames: 0,
        })
    }

    /// Queue a viewport change. Applied at the start of the next `tick`, so a
    /// frame never sees half-resized targets.
    pub fn resize(&mut self, viewport: Viewport) {
        self.pending_resize = Some(viewport);
    }

    /// Run one frame at elapsed time `t` (seconds).
    pub fn tick(&mut self, t: f32) -> Result<FrameStatus> {
        self.apply_pending_resize()?;

        self.scene.update(t);
        self.glass.uniforms.time = t;

        if self.backend.begin_frame()? == FrameStatus::Skipped {
            log::warn!("[frame] surface unavailable; skipping frame {}", self.frames);
            return Ok(FrameStatus::Skipped);
        }

        let b = &mut self.backend;
        b.draw_background(Target::Background, &self.scene.background, &self.camera);
        b.blur(
            BlurPass::Horizontal,
            Target::Background,
            Target::BlurA,
            self.blur.uniforms(BlurPass::Horizontal),
        );
        b.blur(
            BlurPass::Vertical,
            Target::BlurA,
            Target::BlurB,
            self.blur.uniforms(BlurPass::Vertical),
        );
        b.draw_background(Target::Screen, &self.scene.background, &self.camera);

        self.glass.source = Some(Target::BlurB);
        b.draw_glass(
            Target::BlurB,
            &self.scene.main,
            &self.camera,
            &self.glass.uniforms,
        );
        b.end_frame()?;

        self.frames += 1;
        Ok(FrameStatus::Ready)
    }

    /// Tear down every GPU resource and hand the backend back. Whether the
    /// backend can be passed to `init` again is up to the backend; the wgpu
    /// one refuses with [`PipelineError::Disposed`](crate::PipelineError::Disposed).
    pub fn dispose(mut self) -> B {
        self.backend.dispose();
        log::info!("[dispose] released after {} frames", self.frames);
        self.backend
    }

    fn apply_pending_resize(&mut self) -> Result<()> {
        let Some(viewport) = self.pending_resize else {
            return Ok(());
        };
        let sizes = TargetSizes::for_viewport(viewport);
        if sizes == self.sizes {
            self.pending_resize = None;
            return Ok(());
        }
        // Left queued on failure so the next tick retries it.
        self.backend.configure(&sizes)?;
        self.pending_resize = None;
        self.sizes = sizes;
        self.camera
            .set_aspect(sizes.background.width, sizes.background.height);
        self.blur.set_resolution(&sizes);
        self.glass.uniforms.resolution = sizes.background.as_vec();
        log::info!(
            "[resize] background={}x{} blur={}x{}",
            sizes.background.width,
            sizes.background.height,
            sizes.blur.width,
            sizes.blur.height
        );
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn sizes(&self) -> TargetSizes {
        self.sizes
    }

    pub fn blur_material(&self) -> &BlurMaterial {
        &self.blur
    }

    pub fn glass_material(&self) -> &GlassMaterial {
        &self.glass
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
