use super::helpers;
use glassbg_core::{BlurPass, BlurUniforms};

/// Blur program plus one uniform buffer/bind group per pass. Both passes are
/// recorded into one encoder, so they cannot share a buffer: the last
/// `write_buffer` before submit would win for both.
pub(crate) struct BlurResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffers: [wgpu::Buffer; 2],
    pub(crate) uniform_groups: [wgpu::BindGroup; 2],
}

impl BlurResources {
    pub(crate) fn buffer(&self, pass: BlurPass) -> &wgpu::Buffer {
        &self.uniform_buffers[pass.index()]
    }

    pub(crate) fn group(&self, pass: BlurPass) -> &wgpu::BindGroup {
        &self.uniform_groups[pass.index()]
    }
}

pub(crate) fn create_blur_resources(
    device: &wgpu::Device,
    source_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> BlurResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("blur_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::shaders::BLUR_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("blur_bgl0"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("blur_pl"),
        bind_group_layouts: &[&bgl0, source_layout],
        push_constant_ranges: &[],
    });
    let pipeline =
        helpers::make_fullscreen_pipeline(device, "blur_pipeline", &pl, &shader, "fs_blur", format);

    let uniform_buffers = [
        helpers::uniform_buffer::<BlurUniforms>(device, "blur_h_uniforms"),
        helpers::uniform_buffer::<BlurUniforms>(device, "blur_v_uniforms"),
    ];
    let group = |label: &str, buffer: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bgl0,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    };
    let uniform_groups = [
        group("blur_h_bg", &uniform_buffers[0]),
        group("blur_v_bg", &uniform_buffers[1]),
    ];

    BlurResources {
        pipeline,
        uniform_buffers,
        uniform_groups,
    }
}
