//! Platform-free core of the glass background: animation, scene model and
//! the frame driver. GPU work goes through [`RenderBackend`].

pub mod backend;
pub mod blur;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod glass;
pub mod mesh;
pub mod orb;
pub mod scene;
pub mod targets;

pub use backend::*;
pub use blur::{BlurPass, BlurUniforms};
pub use camera::{Camera, CameraUniforms};
pub use clock::Clock;
pub use config::BackdropConfig;
pub use constants::*;
pub use context::*;
pub use error::PipelineError;
pub use glass::{GlassParams, GlassTransform, GlassUniforms};
pub use mesh::{DeformableMesh, MeshAnimator, MeshVertex};
pub use orb::{position_at, Axis, Orb, OrbInstance, OrbSeed};
pub use scene::*;
pub use targets::*;
