//! Deformable icosphere and the noise-driven animator that reshapes it.
//!
//! The mesh keeps an immutable snapshot of its starting positions. Every
//! frame the animator rebuilds `current` from that snapshot, so displacement
//! never accumulates and the surface stays within ±amplitude of the
//! original radius.

use crate::constants::{
    DISPLACEMENT_AMPLITUDE, NOISE_SAMPLE_GAIN, NOISE_SPACE_FREQUENCY, NOISE_TIME_FREQUENCY,
};
use glam::Vec3;
use noise::{NoiseFn, Simplex};
use std::collections::HashMap;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub struct DeformableMesh {
    original: Vec<Vec3>,
    pub current: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl DeformableMesh {
    /// Subdivided icosahedron of the given radius.
    ///
    /// Each subdivision splits every triangle into four at the edge midpoints
    /// (shared, so vertex count is `10 * 4^n + 2`).
    pub fn icosphere(radius: f32, subdivisions: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let mut positions: Vec<Vec3> = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ]
        .iter()
        .map(|p| Vec3::from(*p).normalize())
        .collect();

        let mut indices: Vec<u32> = vec![
            0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7,
            6, 7, 1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10,
            8, 6, 7, 9, 8, 1,
        ];

        for _ in 0..subdivisions {
            subdivide(&mut positions, &mut indices);
        }
        for p in &mut positions {
            *p *= radius;
        }

        let mut mesh = Self {
            current: positions.clone(),
            normals: vec![Vec3::ZERO; positions.len()],
            original: positions,
            indices,
        };
        mesh.recompute_normals();
        mesh
    }

    pub fn original(&self) -> &[Vec3] {
        &self.original
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.original.len()
    }

    /// Smooth, area-weighted vertex normals from `current`.
    pub fn recompute_normals(&mut self) {
        for n in &mut self.normals {
            *n = Vec3::ZERO;
        }
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.current[b] - self.current[a]).cross(self.current[c] - self.current[a]);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }
        for (n, p) in self.normals.iter_mut().zip(&self.current) {
            *n = n.try_normalize().unwrap_or_else(|| p.normalize_or_zero());
        }
    }

    /// Interleave positions and normals into `out`, reusing its allocation.
    pub fn write_vertices(&self, out: &mut Vec<MeshVertex>) {
        out.clear();
        out.extend(
            self.current
                .iter()
                .zip(&self.normals)
                .map(|(p, n)| MeshVertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                }),
        );
    }
}

fn subdivide(positions: &mut Vec<Vec3>, indices: &mut Vec<u32>) {
    let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();
    let mut new_indices = Vec::with_capacity(indices.len() * 4);

    let mut midpoint = |a: u32, b: u32, pos: &mut Vec<Vec3>| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        *midpoint_cache.entry(key).or_insert_with(|| {
            let mid = (pos[a as usize] + pos[b as usize]).normalize();
            pos.push(mid);
            (pos.len() - 1) as u32
        })
    };

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = midpoint(a, b, positions);
        let bc = midpoint(b, c, positions);
        let ca = midpoint(c, a, positions);

        new_indices.extend_from_slice(&[a, ab, ca]);
        new_indices.extend_from_slice(&[b, bc, ab]);
        new_indices.extend_from_slice(&[c, ca, bc]);
        new_indices.extend_from_slice(&[ab, bc, ca]);
    }

    *indices = new_indices;
}

/// Displaces a mesh radially by 4D simplex noise sampled at each original
/// vertex and the current time.
pub struct MeshAnimator {
    noise: Simplex,
    pub frequency: f32,
    pub time_scale: f32,
    pub amplitude: f32,
}

impl MeshAnimator {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
            frequency: NOISE_SPACE_FREQUENCY,
            time_scale: NOISE_TIME_FREQUENCY,
            amplitude: DISPLACEMENT_AMPLITUDE,
        }
    }

    /// Field value stretched by `NOISE_SAMPLE_GAIN` and clamped to [-1, 1].
    pub fn sample(&self, p: Vec3, t: f32) -> f32 {
        let f = self.frequency as f64;
        let n = self.noise.get([
            p.x as f64 * f,
            p.y as f64 * f,
            p.z as f64 * f,
            (t * self.time_scale) as f64,
        ]);
        // Clamp so the displacement bound holds whatever the library's range.
        (n as f32 * NOISE_SAMPLE_GAIN).clamp(-1.0, 1.0)
    }

    /// Rebuild `mesh.current` (and normals) for time `t`. Idempotent per `t`.
    pub fn animate(&self, mesh: &mut DeformableMesh, t: f32) {
        for (cur, orig) in mesh.current.iter_mut().zip(&mesh.original) {
            *cur = *orig * (1.0 + self.sample(*orig, t) * self.amplitude);
        }
        mesh.recompute_normals();
    }
}
