//! wgpu implementation of [`glassbg_core::RenderBackend`].
//!
//! Owns the device, surface, the three off-screen targets and the orb, blur
//! and glass programs. One command encoder is recorded per frame and
//! submitted in `end_frame`.

use glassbg_core::{
    BackgroundScene, BlurPass, BlurUniforms, Camera, FrameStatus, GlassTransform, GlassUniforms,
    MainScene, MeshVertex, OrbInstance, PipelineError, RenderBackend, Scene, Target, TargetSizes,
};
use wgpu::util::DeviceExt;

mod blur;
mod glass;
mod helpers;
mod orbs;
mod shaders;
mod targets;

use blur::{create_blur_resources, BlurResources};
use glass::{create_glass_resources, GlassResources};
use orbs::{create_orb_resources, OrbResources};
use targets::RenderTargets;

type Result<T> = std::result::Result<T, PipelineError>;

/// Static geometry uploaded once in `prepare`.
struct Geometry {
    orb_vertices: wgpu::Buffer,
    orb_indices: wgpu::Buffer,
    orb_index_count: u32,
    orb_instances: wgpu::Buffer,
    orb_capacity: usize,
    glass_vertices: wgpu::Buffer,
    glass_indices: wgpu::Buffer,
    glass_index_count: u32,
}

impl Geometry {
    fn destroy(&self) {
        self.orb_vertices.destroy();
        self.orb_indices.destroy();
        self.orb_instances.destroy();
        self.glass_vertices.destroy();
        self.glass_indices.destroy();
    }
}

struct FrameInFlight {
    surface_tex: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

pub struct GpuBackend<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    offscreen_format: wgpu::TextureFormat,
    clear_color: wgpu::Color,
    linear_sampler: wgpu::Sampler,
    source_layout: wgpu::BindGroupLayout,

    orbs: OrbResources,
    blur: BlurResources,
    glass: GlassResources,

    targets: Option<RenderTargets>,
    geometry: Option<Geometry>,
    frame: Option<FrameInFlight>,

    vertex_scratch: Vec<MeshVertex>,
    instance_scratch: Vec<OrbInstance>,
    disposed: bool,
}

impl<'w> GpuBackend<'w> {
    /// Request a device for `surface` and build every program.
    ///
    /// Program creation runs inside a validation error scope; anything it
    /// captures is returned as [`PipelineError::ShaderCompilation`].
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        clear_color: [f64; 4],
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(PipelineError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("glassbg_device"),
                },
                None,
            )
            .await
            .map_err(|e| PipelineError::DeviceRequest(format!("{e:?}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| PipelineError::Surface("surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Off-screen targets match the swapchain's encoding so the blurred
        // and sharp layers agree on brightness.
        let offscreen_format = if format.is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let source_layout = helpers::texture_sampler_layout(&device);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let orbs = create_orb_resources(&device, offscreen_format, format);
        let blur = create_blur_resources(&device, &source_layout, offscreen_format);
        let glass = create_glass_resources(&device, &source_layout, format);
        if let Some(err) = device.pop_error_scope().await {
            log::error!("[gpu] program build failed: {err}");
            return Err(PipelineError::ShaderCompilation(err.to_string()));
        }

        log::info!(
            "[gpu] adapter={:?} surface={:?} offscreen={:?}",
            adapter.get_info().name,
            format,
            offscreen_format
        );

        let [r, g, b, a] = clear_color;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            offscreen_format,
            clear_color: wgpu::Color { r, g, b, a },
            linear_sampler,
            source_layout,
            orbs,
            blur,
            glass,
            targets: None,
            geometry: None,
            frame: None,
            vertex_scratch: Vec::new(),
            instance_scratch: Vec::new(),
            disposed: false,
        })
    }

    fn check_live(&self) -> Result<()> {
        if self.disposed {
            Err(PipelineError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl<'w> RenderBackend for GpuBackend<'w> {
    fn prepare(&mut self, scene: &Scene) -> Result<()> {
        self.check_live()?;
        if let Some(old) = self.geometry.take() {
            old.destroy();
        }

        let mut orb_vertices = Vec::new();
        scene.background.orb_mesh.write_vertices(&mut orb_vertices);
        scene.main.glass.write_vertices(&mut self.vertex_scratch);
        let orb_capacity = scene.background.orbs.len();

        let device = &self.device;
        let geometry = Geometry {
            orb_vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("orb_vb"),
                contents: bytemuck::cast_slice(&orb_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            orb_indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("orb_ib"),
                contents: bytemuck::cast_slice(scene.background.orb_mesh.indices()),
                usage: wgpu::BufferUsages::INDEX,
            }),
            orb_index_count: scene.background.orb_mesh.indices().len() as u32,
            orb_instances: device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("orb_instances"),
                size: (std::mem::size_of::<OrbInstance>() * orb_capacity.max(1)) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            orb_capacity,
            glass_vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glass_vb"),
                contents: bytemuck::cast_slice(&self.vertex_scratch),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            }),
            glass_indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glass_ib"),
                contents: bytemuck::cast_slice(scene.main.glass.indices()),
                usage: wgpu::BufferUsages::INDEX,
            }),
            glass_index_count: scene.main.glass.indices().len() as u32,
        };
        log::info!(
            "[gpu] geometry: orb_indices={} glass_vertices={} glass_indices={}",
            geometry.orb_index_count,
            self.vertex_scratch.len(),
            geometry.glass_index_count
        );
        self.geometry = Some(geometry);
        Ok(())
    }

    fn configure(&mut self, sizes: &TargetSizes) -> Result<()> {
        self.check_live()?;
        // A half-recorded frame would reference the old views.
        self.frame = None;

        self.config.width = sizes.background.width;
        self.config.height = sizes.background.height;
        self.surface.configure(&self.device, &self.config);

        if let Some(old) = self.targets.take() {
            old.destroy();
        }
        let targets = RenderTargets::new(
            &self.device,
            sizes,
            self.offscreen_format,
            &self.source_layout,
            &self.linear_sampler,
        );
        log::info!(
            "[gpu] targets background={:?} blur={:?}",
            targets.sizes.background,
            targets.sizes.blur
        );
        self.targets = Some(targets);
        Ok(())
    }

    fn begin_frame(&mut self) -> Result<FrameStatus> {
        self.check_live()?;
        if self.targets.is_none() || self.geometry.is_none() {
            return Err(PipelineError::NotPrepared);
        }
        if self.frame.take().is_some() {
            log::warn!("[gpu] previous frame was never ended; dropping it");
        }

        let surface_tex = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(FrameStatus::Skipped),
            Err(e) => return Err(PipelineError::Surface(e.to_string())),
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        self.frame = Some(FrameInFlight {
            surface_tex,
            view,
            encoder,
        });
        Ok(FrameStatus::Ready)
    }

    fn draw_background(&mut self, dest: Target, scene: &BackgroundScene, camera: &Camera) {
        let (Some(frame), Some(targets), Some(geo)) = (
            self.frame.as_mut(),
            self.targets.as_ref(),
            self.geometry.as_ref(),
        ) else {
            return;
        };

        self.queue.write_buffer(
            &self.orbs.camera_buffer,
            0,
            bytemuck::bytes_of(&camera.uniforms()),
        );
        let decode = self.offscreen_format.is_srgb();
        self.instance_scratch.clear();
        self.instance_scratch
            .extend(scene.instances().take(geo.orb_capacity).map(|mut inst| {
                if decode {
                    for c in &mut inst.color[..3] {
                        *c = helpers::srgb_to_linear(*c);
                    }
                }
                inst
            }));
        self.queue.write_buffer(
            &geo.orb_instances,
            0,
            bytemuck::cast_slice(&self.instance_scratch),
        );

        let (label, view, pipeline) = match dest {
            Target::Screen => ("orbs_screen", &frame.view, &self.orbs.screen_pipeline),
            other => match targets.get(other) {
                Some(t) => ("orbs_offscreen", &t.view, &self.orbs.offscreen_pipeline),
                None => return,
            },
        };
        let mut pass = helpers::begin_pass(
            &mut frame.encoder,
            label,
            view,
            wgpu::LoadOp::Clear(self.clear_color),
            None,
        );
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.orbs.bind_group, &[]);
        pass.set_vertex_buffer(0, geo.orb_vertices.slice(..));
        pass.set_vertex_buffer(1, geo.orb_instances.slice(..));
        pass.set_index_buffer(geo.orb_indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(
            0..geo.orb_index_count,
            0,
            0..self.instance_scratch.len() as u32,
        );
    }

    fn blur(&mut self, pass: BlurPass, source: Target, dest: Target, uniforms: &BlurUniforms) {
        let (Some(frame), Some(targets)) = (self.frame.as_mut(), self.targets.as_ref()) else {
            return;
        };
        let (Some(src), Some(dst)) = (targets.get(source), targets.get(dest)) else {
            log::error!("[gpu] blur {source:?} -> {dest:?}: both ends must be off-screen");
            return;
        };
        self.queue
            .write_buffer(self.blur.buffer(pass), 0, bytemuck::bytes_of(uniforms));

        let label = match pass {
            BlurPass::Horizontal => "blur_h",
            BlurPass::Vertical => "blur_v",
        };
        let mut r = helpers::begin_pass(
            &mut frame.encoder,
            label,
            &dst.view,
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
            None,
        );
        r.set_pipeline(&self.blur.pipeline);
        r.set_bind_group(0, self.blur.group(pass), &[]);
        r.set_bind_group(1, &src.source_group, &[]);
        r.draw(0..3, 0..1);
    }

    fn draw_glass(
        &mut self,
        source: Target,
        scene: &MainScene,
        camera: &Camera,
        uniforms: &GlassUniforms,
    ) {
        let (Some(frame), Some(targets), Some(geo)) = (
            self.frame.as_mut(),
            self.targets.as_ref(),
            self.geometry.as_ref(),
        ) else {
            return;
        };
        let Some(src) = targets.get(source) else {
            log::error!("[gpu] glass cannot refract {source:?}");
            return;
        };

        self.queue
            .write_buffer(&self.glass.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        let transform = GlassTransform::new(camera, scene.model_matrix());
        self.queue.write_buffer(
            &self.glass.transform_buffer,
            0,
            bytemuck::bytes_of(&transform),
        );
        scene.glass.write_vertices(&mut self.vertex_scratch);
        self.queue.write_buffer(
            &geo.glass_vertices,
            0,
            bytemuck::cast_slice(&self.vertex_scratch),
        );

        // Load, not clear: the sharp orb layer is already on screen.
        let mut r = helpers::begin_pass(
            &mut frame.encoder,
            "glass",
            &frame.view,
            wgpu::LoadOp::Load,
            Some(&targets.depth_view),
        );
        r.set_pipeline(&self.glass.pipeline);
        r.set_bind_group(0, &self.glass.bind_group, &[]);
        r.set_bind_group(1, &src.source_group, &[]);
        r.set_vertex_buffer(0, geo.glass_vertices.slice(..));
        r.set_index_buffer(geo.glass_indices.slice(..), wgpu::IndexFormat::Uint32);
        r.draw_indexed(0..geo.glass_index_count, 0, 0..1);
    }

    fn end_frame(&mut self) -> Result<()> {
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };
        self.queue.submit(Some(frame.encoder.finish()));
        frame.surface_tex.present();
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.frame = None;
        if let Some(t) = self.targets.take() {
            t.destroy();
        }
        if let Some(g) = self.geometry.take() {
            g.destroy();
        }
        self.orbs.camera_buffer.destroy();
        for b in &self.blur.uniform_buffers {
            b.destroy();
        }
        self.glass.uniform_buffer.destroy();
        self.glass.transform_buffer.destroy();
        self.disposed = true;
        log::info!("[gpu] disposed");
    }
}
