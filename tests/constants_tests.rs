// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_constants_are_positive() {
    assert!(GAZE_THRESHOLD_PX > 0.0);
    assert!(!HEART_SPAWN_INTERVAL.is_zero());
    assert!(HEART_INITIAL_SIZE > 0.0);
    assert!(HEART_GROWTH_PER_TICK > 0.0);
    assert!(HEART_FADE_PER_TICK > 0.0);
    assert!(HEART_ANGLE_STEP > 0.0);
    assert!(CALIBRATION_HIT_RADIUS_PX > 0.0);
    assert!(NOISE_OCTAVES > 0);
}

#[test]
fn default_heart_lives_26_ticks() {
    let ticks = (HEART_MAX_OPACITY / HEART_FADE_PER_TICK).ceil() as u32;
    assert_eq!(ticks, 26);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn noise_lattice_is_a_power_of_two() {
    assert!(NOISE_LATTICE_SIZE.is_power_of_two());
    assert!(NOISE_FALLOFF > 0.0 && NOISE_FALLOFF < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn calibration_targets_match_their_hit_area() {
    // The drawn circle is exactly the clickable area.
    assert_eq!(CALIBRATION_POINT_DIAMETER / 2.0, CALIBRATION_HIT_RADIUS_PX as f64);
    // Corner targets stay fully on screen.
    assert!(CALIBRATION_MARGIN_PX > CALIBRATION_HIT_RADIUS_PX);
    assert!(CALIBRATION_POINT_COUNT == 5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn heart_outline_fits_inline_storage() {
    let samples = (std::f32::consts::TAU / HEART_ANGLE_STEP).ceil() as usize;
    assert_eq!(samples, 126);
    assert!(samples <= 128);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn blur_and_marker_sizes_are_sane() {
    assert!(BLUR_RADIUS_PX > 0);
    assert!(BLUR_PASSES >= 1);
    assert!(GAZE_MARKER_DIAMETER > 0.0);
    assert!(GUIDE_FOCUS_DIAMETER < 2.0 * GAZE_THRESHOLD_PX as f64);
}

#[test]
fn status_labels_differ() {
    assert_ne!(STATUS_DWELLING, STATUS_IDLE);
    assert_ne!(CALIBRATION_PROMPT, CALIBRATION_DONE);
}
