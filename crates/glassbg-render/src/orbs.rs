use super::helpers;
use glassbg_core::{CameraUniforms, MeshVertex, OrbInstance};

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

pub(crate) struct OrbResources {
    /// Draws into the off-screen `background` target.
    pub(crate) offscreen_pipeline: wgpu::RenderPipeline,
    /// Same program, swapchain format.
    pub(crate) screen_pipeline: wgpu::RenderPipeline,
    pub(crate) camera_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_orb_resources(
    device: &wgpu::Device,
    offscreen_format: wgpu::TextureFormat,
    screen_format: wgpu::TextureFormat,
) -> OrbResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("orbs_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::shaders::ORBS_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("orbs_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("orbs_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let camera_buffer = helpers::uniform_buffer::<CameraUniforms>(device, "orbs_camera");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("orbs_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: camera_buffer.as_entire_binding(),
        }],
    });

    let vertex_buffers = [
        // slot 0: sphere vertices (normal unused)
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: per-orb instance data
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OrbInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 2,
                },
            ],
        },
    ];

    let make = |label: &str, format: wgpu::TextureFormat| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_orb"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_orb"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(ADDITIVE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    };

    OrbResources {
        offscreen_pipeline: make("orbs_offscreen_pipeline", offscreen_format),
        screen_pipeline: make("orbs_screen_pipeline", screen_format),
        camera_buffer,
        bind_group,
    }
}
