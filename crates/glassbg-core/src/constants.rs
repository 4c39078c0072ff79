// Fixed design constants shared by every frontend.
// Tunables a host may change at startup live in `config.rs` instead.

// Orb motion amplitudes (world units)
pub const ORB_X_AXIS_AMP_X: f32 = 7.0;
pub const ORB_X_AXIS_AMP_Y: f32 = 4.0;
pub const ORB_Y_AXIS_AMP_Y: f32 = 5.0;
pub const ORB_Y_AXIS_AMP_X: f32 = 6.0;

// Secondary-axis frequency multipliers
pub const ORB_X_AXIS_FREQ_MUL: f32 = 0.7;
pub const ORB_Y_AXIS_FREQ_MUL: f32 = 0.8;

// Orb spawn ranges
pub const ORB_SPAWN_EXTENT: [f32; 3] = [12.0, 8.0, 6.0]; // full width of the spawn box
pub const ORB_SPAWN_Z_CENTER: f32 = -5.0;
pub const ORB_SCALE_MIN: f32 = 1.0;
pub const ORB_SCALE_SPAN: f32 = 2.5;
pub const ORB_SPEED_MIN: f32 = 0.005;
pub const ORB_SPEED_SPAN: f32 = 0.015;
pub const ORB_OFFSET_SPAN: f32 = 100.0;
pub const ORB_OPACITY: f32 = 0.4;

// Orb palette (sRGB 0..1), cycled by orb index
pub const ORB_PALETTE: [[f32; 3]; 5] = [
    [0.161, 0.592, 1.0],   // #2997ff
    [0.545, 0.361, 0.965], // #8b5cf6
    [0.063, 0.725, 0.506], // #10b981
    [0.961, 0.620, 0.043], // #f59e0b
    [0.925, 0.282, 0.600], // #ec4899
];

// Glass deformation
pub const NOISE_SPACE_FREQUENCY: f32 = 0.5;
pub const NOISE_TIME_FREQUENCY: f32 = 0.3;
pub const DISPLACEMENT_AMPLITUDE: f32 = 0.25; // fraction of original radius
/// `noise::Simplex` 4D peaks near ±0.7; this stretches it to about ±1.
pub const NOISE_SAMPLE_GAIN: f32 = 1.5;

// Glass rotation
pub const GLASS_SPIN_Y_PER_SEC: f32 = 0.08;
pub const GLASS_WOBBLE_X_FREQ: f32 = 0.2;
pub const GLASS_WOBBLE_X_AMP: f32 = 0.1;

// Glass shading
pub const FRESNEL_POWER: f32 = 3.0;
pub const FRESNEL_STRENGTH: f32 = 0.35;
pub const DITHER_AMPLITUDE: f32 = 0.04;

// Blur
pub const BLUR_STEP: f32 = 2.5;
pub const BLUR_WEIGHTS: [f32; 5] = [0.2, 0.3, 0.3, 0.1, 0.1];
pub const BLUR_TAP_OFFSETS: [f32; 5] = [0.0, 1.0, -1.0, 2.0, -2.0];

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0;
