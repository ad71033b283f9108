use super::constants::*;
use super::noise::NoiseField;
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::TAU;
use std::time::Duration;

/// Enough inline capacity for one outline at the default angle step.
pub type Outline = SmallVec<[Vec2; 128]>;

#[derive(Clone, Debug)]
pub struct HeartParams {
    pub spawn_interval: Duration,
    pub initial_size: f32,
    pub growth_per_tick: f32,
    pub fade_per_tick: f32,
}

impl Default for HeartParams {
    fn default() -> Self {
        Self {
            spawn_interval: HEART_SPAWN_INTERVAL,
            initial_size: HEART_INITIAL_SIZE,
            growth_per_tick: HEART_GROWTH_PER_TICK,
            fade_per_tick: HEART_FADE_PER_TICK,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heart {
    pub position: Vec2,
    pub size: f32,
    /// 0..=255, matching canvas alpha bytes.
    pub opacity: f32,
}

impl Heart {
    fn advance(&mut self, params: &HeartParams) {
        self.size += params.growth_per_tick;
        self.opacity -= params.fade_per_tick;
    }
}

/// Owns the live hearts and spawns new ones while the viewer dwells.
#[derive(Clone, Debug)]
pub struct HeartEmitter {
    hearts: Vec<Heart>,
    origin: Vec2,
    last_spawn: Duration,
    params: HeartParams,
}

impl HeartEmitter {
    pub fn new(origin: Vec2, params: HeartParams) -> Self {
        Self {
            hearts: Vec::new(),
            origin,
            last_spawn: Duration::ZERO,
            params,
        }
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    /// Moves the spawn point; hearts already alive stay where they are.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn maybe_spawn(&mut self, dwelling: bool, now: Duration) -> bool {
        if !dwelling || now.saturating_sub(self.last_spawn) < self.params.spawn_interval {
            return false;
        }
        self.hearts.push(Heart {
            position: self.origin,
            size: self.params.initial_size,
            opacity: HEART_MAX_OPACITY,
        });
        self.last_spawn = now;
        true
    }

    /// Grows and fades every heart by one tick, dropping the fully faded.
    pub fn advance_all(&mut self) {
        let params = &self.params;
        self.hearts.retain_mut(|h| {
            h.advance(params);
            h.opacity > 0.0
        });
    }
}

/// Closed outline of a heart at `center`, wobbled by the noise field.
///
/// Samples the classic parametric heart over `[0, 2π)` every
/// [`HEART_ANGLE_STEP`] radians. The radius offset depends only on the
/// angle and `frame`, so a given frame always yields the same outline.
pub fn heart_outline(center: Vec2, size: f32, frame: u64, noise: &NoiseField) -> Outline {
    let r = size * HEART_RADIUS_SCALE;
    let t = frame as f32 * HEART_NOISE_FRAME_FREQ;
    let samples = (TAU / HEART_ANGLE_STEP).ceil() as usize;

    (0..samples)
        .map(|i| {
            let angle = i as f32 * HEART_ANGLE_STEP;
            let wobble = noise.sample(angle * HEART_NOISE_ANGLE_FREQ, t) * HEART_NOISE_AMPLITUDE;
            let k = r + wobble;
            let x = 16.0 * angle.sin().powi(3);
            let y = 13.0 * angle.cos()
                - 5.0 * (2.0 * angle).cos()
                - 2.0 * (3.0 * angle).cos()
                - (4.0 * angle).cos();
            Vec2::new(center.x + k * x, center.y - k * y)
        })
        .collect()
}
