use std::time::Duration;

// Behavioral tuning shared by the session, calibration and heart lifecycle.

// Dwell detection
pub const GAZE_THRESHOLD_PX: f32 = 300.0; // distance from the focus point that still counts as looking

// Heart lifecycle (per-tick steps, not time normalized)
pub const HEART_SPAWN_INTERVAL: Duration = Duration::from_millis(300);
pub const HEART_INITIAL_SIZE: f32 = 10.0;
pub const HEART_GROWTH_PER_TICK: f32 = 10.0;
pub const HEART_FADE_PER_TICK: f32 = 10.0;
pub const HEART_MAX_OPACITY: f32 = 255.0;

// Heart outline
pub const HEART_ANGLE_STEP: f32 = 0.05; // radians between outline samples
pub const HEART_RADIUS_SCALE: f32 = 0.1; // size -> curve radius
pub const HEART_NOISE_AMPLITUDE: f32 = 5.0;
pub const HEART_NOISE_ANGLE_FREQ: f32 = 2.0;
pub const HEART_NOISE_FRAME_FREQ: f32 = 0.01;

// Noise field
pub const NOISE_SEED: u64 = 0x4845_4152_5453; // "HEARTS"
pub const NOISE_LATTICE_SIZE: usize = 4096; // must be a power of two
pub const NOISE_OCTAVES: u32 = 4;
pub const NOISE_FALLOFF: f32 = 0.5;

// Calibration
pub const CALIBRATION_POINT_COUNT: usize = 5;
pub const CALIBRATION_MARGIN_PX: f32 = 100.0; // corner inset from the viewport edges
pub const CALIBRATION_HIT_RADIUS_PX: f32 = 20.0;
