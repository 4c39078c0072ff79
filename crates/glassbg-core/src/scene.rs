use crate::config::BackdropConfig;
use crate::constants::{GLASS_SPIN_Y_PER_SEC, GLASS_WOBBLE_X_AMP, GLASS_WOBBLE_X_FREQ};
use crate::mesh::{DeformableMesh, MeshAnimator};
use crate::orb::{spawn_orbs, Orb, OrbInstance};
use glam::{Mat4, Vec2};

/// The orb cluster: drawn once into the blur source and once to the screen.
pub struct BackgroundScene {
    pub orbs: Vec<Orb>,
    /// Geometry shared by every orb instance.
    pub orb_mesh: DeformableMesh,
}

impl BackgroundScene {
    pub fn instances(&self) -> impl Iterator<Item = OrbInstance> + '_ {
        self.orbs.iter().map(Orb::instance)
    }
}

/// The deforming glass object, composited over the sharp background.
pub struct MainScene {
    pub glass: DeformableMesh,
    /// Euler rotation (x, y) in radians.
    pub rotation: Vec2,
}

impl MainScene {
    /// X then Y Euler order: `Rx * Ry`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x) * Mat4::from_rotation_y(self.rotation.y)
    }
}

pub struct Scene {
    pub background: BackgroundScene,
    pub main: MainScene,
    pub animator: MeshAnimator,
}

impl Scene {
    pub fn new(config: &BackdropConfig) -> Self {
        Self {
            background: BackgroundScene {
                orbs: spawn_orbs(config.orb_count, config.seed),
                orb_mesh: DeformableMesh::icosphere(1.0, config.orb_subdivisions),
            },
            main: MainScene {
                glass: DeformableMesh::icosphere(config.glass_radius, config.glass_subdivisions),
                rotation: Vec2::ZERO,
            },
            animator: MeshAnimator::new(config.seed as u32),
        }
    }

    /// Advance everything to time `t`. Pure in `t`: no state carries over.
    pub fn update(&mut self, t: f32) {
        for orb in &mut self.background.orbs {
            orb.update(t);
        }
        self.animator.animate(&mut self.main.glass, t);
        self.main.rotation = Vec2::new(
            (t * GLASS_WOBBLE_X_FREQ).sin() * GLASS_WOBBLE_X_AMP,
            t * GLASS_SPIN_Y_PER_SEC,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BackdropConfig {
        BackdropConfig {
            glass_subdivisions: 2,
            orb_subdivisions: 1,
            ..BackdropConfig::default()
        }
    }

    #[test]
    fn update_moves_orbs_and_rotates_glass() {
        let mut scene = Scene::new(&small_config());
        scene.update(10.0);
        assert!((scene.main.rotation.y - 0.8).abs() < 1e-6);
        assert!((scene.main.rotation.x - (2.0f32).sin() * 0.1).abs() < 1e-6);
        let expected = crate::orb::position_at(&scene.background.orbs[0].seed, 10.0);
        assert_eq!(scene.background.orbs[0].position.truncate(), expected);
    }

    #[test]
    fn model_matrix_applies_yaw_before_pitch() {
        let main = MainScene {
            glass: DeformableMesh::icosphere(1.0, 0),
            rotation: Vec2::new(std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2),
        };
        // Ry turns +Z into +X, which Rx then leaves alone.
        let v = main.model_matrix().transform_vector3(glam::Vec3::Z);
        assert!(v.abs_diff_eq(glam::Vec3::X, 1e-6), "got {v}");
    }

    #[test]
    fn instances_match_orbs() {
        let scene = Scene::new(&small_config());
        let inst: Vec<_> = scene.background.instances().collect();
        assert_eq!(inst.len(), 6);
        assert_eq!(inst[2].color[3], scene.background.orbs[2].opacity);
        assert_eq!(inst[2].position_scale[3], scene.background.orbs[2].scale);
    }
}
