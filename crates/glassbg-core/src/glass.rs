//! Glass refraction material: uniform layouts plus a host-side reference of
//! the fragment program in `glass.wgsl`.

use crate::camera::Camera;
use crate::constants::{DITHER_AMPLITUDE, FRESNEL_POWER, FRESNEL_STRENGTH};
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassParams {
    pub refract_power: f32,
    pub dispersion: f32,
}

impl Default for GlassParams {
    fn default() -> Self {
        Self {
            refract_power: 0.18,
            dispersion: 0.025,
        }
    }
}

/// Fragment-stage uniforms. Padded to 32 bytes to match the WGSL struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlassUniforms {
    /// Viewport size in pixels.
    pub resolution: [f32; 2],
    pub time: f32,
    pub refract_power: f32,
    pub dispersion: f32,
    pub _pad: [f32; 3],
}

impl GlassUniforms {
    pub fn new(params: &GlassParams, resolution: [f32; 2]) -> Self {
        Self {
            resolution,
            time: 0.0,
            refract_power: params.refract_power,
            dispersion: params.dispersion,
            _pad: [0.0; 3],
        }
    }
}

/// Vertex-stage matrices for the glass mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlassTransform {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Inverse-transpose of `model_view`, stored as a mat4 for alignment.
    pub normal_matrix: [[f32; 4]; 4],
}

impl GlassTransform {
    pub fn new(camera: &Camera, model: Mat4) -> Self {
        let model_view = camera.view_matrix() * model;
        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            normal_matrix: model_view.inverse().transpose().to_cols_array_2d(),
        }
    }
}

/// Classic shader hash, `fract(sin(dot(co, (12.9898, 78.233))) * 43758.5453)`.
pub fn hash21(co: Vec2) -> f32 {
    let v = co.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453;
    v - v.floor()
}

pub fn fresnel(view_dir: Vec3, normal: Vec3) -> f32 {
    (1.0 - view_dir.dot(normal).abs()).powf(FRESNEL_POWER)
}

/// Shade one glass fragment.
///
/// `uv` is the screen-space coordinate (fragment position / resolution),
/// `normal` the view-space surface normal and `view_dir` the normalized
/// direction from the surface to the eye. Output alpha is always 1.
pub fn shade(
    sample: impl Fn(Vec2) -> Vec4,
    uv: Vec2,
    normal: Vec3,
    view_dir: Vec3,
    time: f32,
    uniforms: &GlassUniforms,
) -> Vec4 {
    let offset = Vec2::new(normal.x, normal.y) * uniforms.refract_power;
    let r = sample(uv + offset * (1.0 + uniforms.dispersion)).x;
    let g = sample(uv + offset).y;
    let b = sample(uv + offset * (1.0 - uniforms.dispersion)).z;
    let mut color = Vec3::new(r, g, b);

    color += Vec3::splat(fresnel(view_dir, normal) * FRESNEL_STRENGTH);
    color += Vec3::splat((hash21(uv * time) - 0.5) * DITHER_AMPLITUDE);
    color.extend(1.0)
}
