//! Glowing background orbs and their closed-form motion.
//!
//! An orb never stores velocity: its x/y at time `t` is computed from its
//! seed alone, so trajectories are reproducible and cannot drift.

use crate::constants::*;
use glam::{Vec2, Vec3};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbSeed {
    pub speed: f32,
    pub offset: f32,
    pub axis: Axis,
}

/// Position in the XY plane at time `t`.
///
/// `Axis::X` sweeps wide horizontally; `Axis::Y` sweeps tall vertically with
/// a slightly faster secondary frequency.
pub fn position_at(seed: &OrbSeed, t: f32) -> Vec2 {
    let phase = t * seed.speed + seed.offset;
    match seed.axis {
        Axis::X => Vec2::new(
            phase.sin() * ORB_X_AXIS_AMP_X,
            (t * seed.speed * ORB_X_AXIS_FREQ_MUL + seed.offset).cos() * ORB_X_AXIS_AMP_Y,
        ),
        Axis::Y => Vec2::new(
            (t * seed.speed * ORB_Y_AXIS_FREQ_MUL + seed.offset).cos() * ORB_Y_AXIS_AMP_X,
            phase.sin() * ORB_Y_AXIS_AMP_Y,
        ),
    }
}

#[derive(Clone, Debug)]
pub struct Orb {
    pub color: Vec3,
    pub opacity: f32,
    pub position: Vec3,
    pub scale: f32,
    pub seed: OrbSeed,
}

impl Orb {
    /// Move to the closed-form position for `t`; depth stays where it spawned.
    pub fn update(&mut self, t: f32) {
        let p = position_at(&self.seed, t);
        self.position.x = p.x;
        self.position.y = p.y;
    }

    pub fn instance(&self) -> OrbInstance {
        OrbInstance {
            position_scale: [self.position.x, self.position.y, self.position.z, self.scale],
            color: [self.color.x, self.color.y, self.color.z, self.opacity],
        }
    }
}

/// Per-instance vertex data for the orb pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OrbInstance {
    pub position_scale: [f32; 4],
    pub color: [f32; 4],
}

/// Spawn `count` orbs from a seeded RNG, cycling through the palette.
pub fn spawn_orbs(count: usize, seed: u64) -> Vec<Orb> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let centered = |rng: &mut StdRng, extent: f32| (rng.gen::<f32>() - 0.5) * extent;
            let position = Vec3::new(
                centered(&mut rng, ORB_SPAWN_EXTENT[0]),
                centered(&mut rng, ORB_SPAWN_EXTENT[1]),
                centered(&mut rng, ORB_SPAWN_EXTENT[2]) + ORB_SPAWN_Z_CENTER,
            );
            let scale = ORB_SCALE_MIN + rng.gen::<f32>() * ORB_SCALE_SPAN;
            let seed = OrbSeed {
                speed: ORB_SPEED_MIN + rng.gen::<f32>() * ORB_SPEED_SPAN,
                offset: rng.gen::<f32>() * ORB_OFFSET_SPAN,
                axis: if rng.gen_bool(0.5) { Axis::X } else { Axis::Y },
            };
            Orb {
                color: Vec3::from(ORB_PALETTE[i % ORB_PALETTE.len()]),
                opacity: ORB_OPACITY,
                position,
                scale,
                seed,
            }
        })
        .collect()
}
