//! Separable 5-tap blur.
//!
//! Run once horizontally and once vertically over the half-resolution
//! targets. `filter` is the host-side twin of `fs_blur` in `blur.wgsl` and
//! must stay in step with it.

use crate::constants::{BLUR_TAP_OFFSETS, BLUR_WEIGHTS};
use glam::{Vec2, Vec4};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurPass {
    Horizontal,
    Vertical,
}

impl BlurPass {
    pub const ALL: [BlurPass; 2] = [BlurPass::Horizontal, BlurPass::Vertical];

    pub fn direction(self, step: f32) -> [f32; 2] {
        match self {
            BlurPass::Horizontal => [step, 0.0],
            BlurPass::Vertical => [0.0, step],
        }
    }

    pub fn index(self) -> usize {
        match self {
            BlurPass::Horizontal => 0,
            BlurPass::Vertical => 1,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlurUniforms {
    /// Destination size in pixels.
    pub resolution: [f32; 2],
    pub direction: [f32; 2],
}

/// The five (uv offset, weight) taps for one pass.
pub fn taps(direction: [f32; 2], resolution: [f32; 2]) -> [(Vec2, f32); 5] {
    let step = Vec2::from(direction) / Vec2::from(resolution).max(Vec2::ONE);
    let mut out = [(Vec2::ZERO, 0.0); 5];
    for (slot, (k, w)) in out.iter_mut().zip(BLUR_TAP_OFFSETS.iter().zip(BLUR_WEIGHTS)) {
        *slot = (step * *k, w);
    }
    out
}

/// Filter one destination pixel at `uv`, reading through `sample`.
pub fn filter(sample: impl Fn(Vec2) -> Vec4, uv: Vec2, uniforms: &BlurUniforms) -> Vec4 {
    taps(uniforms.direction, uniforms.resolution)
        .iter()
        .fold(Vec4::ZERO, |acc, (off, w)| acc + sample(uv + *off) * *w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum: f32 = BLUR_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "sum = {sum}");
    }

    #[test]
    fn taps_follow_pass_axis() {
        let res = [640.0, 360.0];
        let h = taps(BlurPass::Horizontal.direction(2.5), res);
        assert!(h.iter().all(|(o, _)| o.y == 0.0));
        assert!((h[1].0.x - 2.5 / 640.0).abs() < 1e-7);
        assert!((h[4].0.x + 5.0 / 640.0).abs() < 1e-7);

        let v = taps(BlurPass::Vertical.direction(2.5), res);
        assert!(v.iter().all(|(o, _)| o.x == 0.0));
        assert!((v[3].0.y - 5.0 / 360.0).abs() < 1e-7);
    }

    #[test]
    fn taps_are_symmetric() {
        let t = taps([2.5, 0.0], [100.0, 100.0]);
        assert_eq!(t[1].0, -t[2].0);
        assert_eq!(t[3].0, -t[4].0);
        assert_eq!(t[1].1, t[2].1);
        assert_eq!(t[3].1, t[4].1);
    }
}
