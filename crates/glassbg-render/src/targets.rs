use super::helpers;
use glassbg_core::{Target, TargetSizes};

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// One off-screen color buffer plus the bind group used to sample it.
pub(crate) struct ColorTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) source_group: wgpu::BindGroup,
}

impl ColorTarget {
    fn new(
        device: &wgpu::Device,
        label: &str,
        size: glassbg_core::Extent,
        format: wgpu::TextureFormat,
        source_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let (tex, view) = helpers::create_texture(
            device,
            label,
            size,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let source_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: source_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            tex,
            view,
            source_group,
        }
    }
}

/// Offscreen targets for the pipeline.
///
/// - `background` is the full-resolution orb layer that feeds the blur.
/// - `blur_a`/`blur_b` are the half-resolution ping-pong pair.
/// - `depth` belongs to the screen pass and is only used by the glass mesh.
pub(crate) struct RenderTargets {
    pub(crate) background: ColorTarget,
    pub(crate) blur_a: ColorTarget,
    pub(crate) blur_b: ColorTarget,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) sizes: TargetSizes,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        sizes: &TargetSizes,
        format: wgpu::TextureFormat,
        source_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let (depth_tex, depth_view) = helpers::create_texture(
            device,
            "depth",
            sizes.background,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            background: ColorTarget::new(
                device,
                "rt_background",
                sizes.background,
                format,
                source_layout,
                sampler,
            ),
            blur_a: ColorTarget::new(device, "rt_blur_a", sizes.blur, format, source_layout, sampler),
            blur_b: ColorTarget::new(device, "rt_blur_b", sizes.blur, format, source_layout, sampler),
            depth_tex,
            depth_view,
            sizes: *sizes,
        }
    }

    /// `None` for the screen, which is never sampled.
    pub(crate) fn get(&self, target: Target) -> Option<&ColorTarget> {
        match target {
            Target::Background => Some(&self.background),
            Target::BlurA => Some(&self.blur_a),
            Target::BlurB => Some(&self.blur_b),
            Target::Screen => None,
        }
    }

    /// Free GPU memory now rather than whenever the handles drop.
    pub(crate) fn destroy(&self) {
        self.background.tex.destroy();
        self.blur_a.tex.destroy();
        self.blur_b.tex.destroy();
        self.depth_tex.destroy();
    }
}
