use crate::blur::{BlurPass, BlurUniforms};
use crate::camera::Camera;
use crate::error::Result;
use crate::glass::GlassUniforms;
use crate::scene::{BackgroundScene, MainScene, Scene};
use crate::targets::{Target, TargetSizes};

/// Whether a frame can be drawn this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Ready,
    /// No surface image this tick (outdated, lost or timed out). Nothing is
    /// drawn until the next tick.
    Skipped,
}

/// The GPU side of the pipeline, as seen by [`crate::RenderContext`].
///
/// Calls arrive in a fixed order each frame:
/// `begin_frame`, `draw_background(Background)`, `blur(H)`, `blur(V)`,
/// `draw_background(Screen)`, `draw_glass`, `end_frame`. `configure` only
/// ever runs between frames.
pub trait RenderBackend {
    /// Allocate static geometry (index buffers, orb mesh) for `scene`.
    fn prepare(&mut self, scene: &Scene) -> Result<()>;

    /// (Re)create the off-screen targets and the surface at `sizes`.
    fn configure(&mut self, sizes: &TargetSizes) -> Result<()>;

    fn begin_frame(&mut self) -> Result<FrameStatus>;

    /// Draw the orb cluster into `dest`, clearing it first.
    fn draw_background(&mut self, dest: Target, scene: &BackgroundScene, camera: &Camera);

    fn blur(&mut self, pass: BlurPass, source: Target, dest: Target, uniforms: &BlurUniforms);

    /// Draw the glass mesh over the screen, sampling `source` for refraction.
    /// Must load, not clear, the existing screen contents.
    fn draw_glass(
        &mut self,
        source: Target,
        scene: &MainScene,
        camera: &Camera,
        uniforms: &GlassUniforms,
    );

    /// Submit and present.
    fn end_frame(&mut self) -> Result<()>;

    /// Release every GPU resource this backend created.
    fn dispose(&mut self);
}
