//! Viewport and off-screen target sizing.
//!
//! `background` is full resolution; `blurA`/`blurB` are the half-resolution
//! ping-pong pair. All three are derived from one viewport so they can never
//! disagree after a resize.

/// Named bind slots for render passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Background,
    BlurA,
    BlurB,
    /// The visible framebuffer.
    Screen,
}

/// Drawable size in physical pixels. May be zero (hidden tab, minimized window).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// CSS size times the device pixel ratio, with the ratio capped.
    pub fn from_css(css_width: f64, css_height: f64, device_pixel_ratio: f64, max_ratio: f64) -> Self {
        let dpr = device_pixel_ratio.min(max_ratio).max(0.0);
        Self {
            width: (css_width.max(0.0) * dpr) as u32,
            height: (css_height.max(0.0) * dpr) as u32,
        }
    }
}

/// Allocated size of a render target; both axes are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn as_vec(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSizes {
    pub background: Extent,
    /// Shared by `blurA` and `blurB`.
    pub blur: Extent,
}

impl TargetSizes {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            background: Extent::new(viewport.width, viewport.height),
            blur: Extent::new(half_rounded(viewport.width), half_rounded(viewport.height)),
        }
    }
}

// round(n / 2) with halves rounding up
#[inline]
fn half_rounded(n: u32) -> u32 {
    n / 2 + n % 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_per_axis() {
        let s = TargetSizes::for_viewport(Viewport::new(1921, 1080));
        assert_eq!(s.background, Extent::new(1921, 1080));
        assert_eq!(s.blur, Extent::new(961, 540));
    }

    #[test]
    fn zero_viewport_clamps_to_one_pixel() {
        let s = TargetSizes::for_viewport(Viewport::new(0, 0));
        assert_eq!(s.background, Extent::new(1, 1));
        assert_eq!(s.blur, Extent::new(1, 1));
        let s = TargetSizes::for_viewport(Viewport::new(1, 0));
        assert_eq!(s.blur.width, 1);
        assert_eq!(s.blur.height, 1);
    }

    #[test]
    fn css_size_caps_pixel_ratio() {
        let v = Viewport::from_css(800.0, 600.0, 3.0, 2.0);
        assert_eq!(v, Viewport::new(1600, 1200));
        let v = Viewport::from_css(800.0, 600.0, 1.5, 2.0);
        assert_eq!(v, Viewport::new(1200, 900));
    }
}
