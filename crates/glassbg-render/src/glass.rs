use super::helpers;
use super::targets::DEPTH_FORMAT;
use glassbg_core::{GlassTransform, GlassUniforms, MeshVertex};

pub(crate) struct GlassResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) transform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_glass_resources(
    device: &wgpu::Device,
    source_layout: &wgpu::BindGroupLayout,
    screen_format: wgpu::TextureFormat,
) -> GlassResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("glass_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::shaders::GLASS_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glass_bgl0"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
            helpers::uniform_entry(1, wgpu::ShaderStages::VERTEX),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("glass_pl"),
        bind_group_layouts: &[&bgl0, source_layout],
        push_constant_ranges: &[],
    });
    let uniform_buffer = helpers::uniform_buffer::<GlassUniforms>(device, "glass_uniforms");
    let transform_buffer = helpers::uniform_buffer::<GlassTransform>(device, "glass_transform");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("glass_bg"),
        layout: &bgl0,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: transform_buffer.as_entire_binding(),
            },
        ],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glass_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_glass"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_glass"),
            targets: &[Some(wgpu::ColorTargetState {
                format: screen_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    GlassResources {
        pipeline,
        uniform_buffer,
        transform_buffer,
        bind_group,
    }
}
