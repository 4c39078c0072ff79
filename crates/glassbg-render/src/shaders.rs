// Shaders bundled as string constants
pub static ORBS_WGSL: &str = include_str!("../shaders/orbs.wgsl");
pub static BLUR_WGSL: &str = include_str!("../shaders/blur.wgsl");
pub static GLASS_WGSL: &str = include_str!("../shaders/glass.wgsl");

#[cfg(test)]
mod tests {
    use super::*;
    use glassbg_core::{
        BLUR_TAP_OFFSETS, BLUR_WEIGHTS, DITHER_AMPLITUDE, FRESNEL_POWER, FRESNEL_STRENGTH,
    };

    fn validate(name: &str, src: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(src)
            .unwrap_or_else(|e| panic!("{name}: {}", e.emit_to_string(src)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{name}: {e:?}"));
        module
    }

    fn entry_points(module: &naga::Module) -> Vec<&str> {
        module.entry_points.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn all_programs_validate() {
        let orbs = validate("orbs", ORBS_WGSL);
        assert_eq!(entry_points(&orbs), ["vs_orb", "fs_orb"]);
        let blur = validate("blur", BLUR_WGSL);
        assert_eq!(entry_points(&blur), ["vs_fullscreen", "fs_blur"]);
        let glass = validate("glass", GLASS_WGSL);
        assert_eq!(entry_points(&glass), ["vs_glass", "fs_glass"]);
    }

    #[test]
    fn blur_program_uses_core_kernel() {
        for (offset, weight) in BLUR_TAP_OFFSETS.iter().zip(BLUR_WEIGHTS) {
            let coord = match *offset as i32 {
                0 => "in.uv".to_string(),
                1 => "in.uv + step".to_string(),
                -1 => "in.uv - step".to_string(),
                n if n > 0 => format!("in.uv + step * {:?}", n as f32),
                n => format!("in.uv - step * {:?}", -n as f32),
            };
            let tap = format!("{coord}) * {weight:?};");
            assert!(BLUR_WGSL.contains(&tap), "missing tap `{tap}`");
        }
    }

    #[test]
    fn glass_program_uses_core_constants() {
        for needle in [
            format!("n)), {FRESNEL_POWER:?})"),
            format!("fresnel * {FRESNEL_STRENGTH:?}"),
            format!("- 0.5) * {DITHER_AMPLITUDE:?}"),
        ] {
            assert!(GLASS_WGSL.contains(&needle), "missing `{needle}`");
        }
    }
}
