use crate::constants::{BLUR_STEP, MAX_PIXEL_RATIO};
use crate::error::{PipelineError, Result};
use crate::glass::GlassParams;

/// Startup tunables for the background. Fixed design constants are in
/// `constants.rs`; only values a host might reasonably change live here.
#[derive(Clone, Debug)]
pub struct BackdropConfig {
    /// Seed for orb placement and motion. Same seed, same cluster.
    pub seed: u64,
    pub orb_count: usize,
    pub orb_subdivisions: u32,
    pub glass_radius: f32,
    pub glass_subdivisions: u32,
    pub glass: GlassParams,
    pub blur_step: f32,
    pub max_pixel_ratio: f64,
    /// Linear RGBA used when clearing the background target and the screen.
    pub clear_color: [f64; 4],
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            orb_count: 6,
            orb_subdivisions: 3,
            glass_radius: 2.0,
            glass_subdivisions: 6,
            glass: GlassParams::default(),
            blur_step: BLUR_STEP,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

// Subdivision 8 would be ~655k vertices, far past what a per-frame CPU
// deformation can sustain.
const MAX_SUBDIVISIONS: u32 = 7;

impl BackdropConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.orb_count == 0 {
            return Err(PipelineError::InvalidConfig("orb_count must be > 0".into()));
        }
        if !(self.glass_radius.is_finite() && self.glass_radius > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "glass_radius must be positive, got {}",
                self.glass_radius
            )));
        }
        if !(self.blur_step.is_finite() && self.blur_step > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "blur_step must be positive, got {}",
                self.blur_step
            )));
        }
        if self.glass_subdivisions > MAX_SUBDIVISIONS || self.orb_subdivisions > MAX_SUBDIVISIONS
        {
            return Err(PipelineError::InvalidConfig(format!(
                "subdivisions capped at {MAX_SUBDIVISIONS}"
            )));
        }
        if !(self.glass.refract_power.is_finite() && self.glass.dispersion.is_finite()) {
            return Err(PipelineError::InvalidConfig(
                "glass parameters must be finite".into(),
            ));
        }
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio > 0.0) {
            return Err(PipelineError::InvalidConfig(
                "max_pixel_ratio must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(BackdropConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut c = BackdropConfig::default();
        c.orb_count = 0;
        assert!(c.validate().is_err());

        let mut c = BackdropConfig::default();
        c.glass_radius = -1.0;
        assert!(c.validate().is_err());

        let mut c = BackdropConfig::default();
        c.blur_step = f32::NAN;
        assert!(c.validate().is_err());

        let mut c = BackdropConfig::default();
        c.glass_subdivisions = 9;
        assert!(c.validate().is_err());

        let mut c = BackdropConfig::default();
        c.glass.dispersion = f32::INFINITY;
        assert!(c.validate().is_err());
    }
}
