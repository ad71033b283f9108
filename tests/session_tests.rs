// Host-side tests for the session: startup fallback, calibration flow,
// gaze slot handling, dwelling and teardown.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod calibration {
        include!("../src/core/calibration.rs");
    }
    pub mod gaze {
        include!("../src/core/gaze.rs");
    }
    pub mod noise {
        include!("../src/core/noise.rs");
    }
    pub mod hearts {
        include!("../src/core/hearts.rs");
    }
    pub mod session {
        include!("../src/core/session.rs");
    }
}

use crate::core::constants::*;
use crate::core::gaze::{GazeSlot, GazeSource};
use crate::core::session::*;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const CENTER: Vec2 = Vec2::new(640.0, 360.0);

#[derive(Default)]
struct Calls {
    begun: usize,
    ended: usize,
    clicks: Vec<Vec2>,
    suppressed: usize,
    paused: usize,
    resumed: usize,
    slot: Option<GazeSlot>,
}

struct MockGaze {
    calls: Rc<RefCell<Calls>>,
    fail_begin: bool,
}

impl GazeSource for MockGaze {
    fn begin(&mut self, slot: GazeSlot) -> anyhow::Result<()> {
        if self.fail_begin {
            anyhow::bail!("camera permission denied");
        }
        let mut calls = self.calls.borrow_mut();
        calls.begun += 1;
        calls.slot = Some(slot);
        Ok(())
    }

    fn end(&mut self) {
        self.calls.borrow_mut().ended += 1;
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().paused += 1;
    }

    fn resume(&mut self) {
        self.calls.borrow_mut().resumed += 1;
    }

    fn record_click(&self, at: Vec2) {
        self.calls.borrow_mut().clicks.push(at);
    }

    fn suppress_ui(&self) {
        self.calls.borrow_mut().suppressed += 1;
    }
}

fn with_gaze(fail_begin: bool) -> (Session, Rc<RefCell<Calls>>) {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let gaze = MockGaze {
        calls: calls.clone(),
        fail_begin,
    };
    let session = Session::start(VIEWPORT, TrackingParams::default(), Some(Box::new(gaze)));
    (session, calls)
}

fn point_positions(session: &Session) -> Vec<Vec2> {
    session
        .calibration()
        .points()
        .iter()
        .map(|p| p.position)
        .collect()
}

fn calibrate(session: &mut Session) {
    for p in point_positions(session) {
        session.pointer_pressed(p);
    }
    session.apply(Command::Confirm);
}

fn publish(calls: &Rc<RefCell<Calls>>, at: Option<Vec2>) {
    let slot = calls.borrow().slot.clone().expect("gaze source was started");
    slot.publish(at);
}

fn tracking(frame: Frame<'_>) -> TrackingView {
    match frame {
        Frame::Tracking(view) => view,
        Frame::Calibrating(_) => panic!("expected a tracking frame"),
    }
}

#[test]
fn without_gaze_source_calibration_is_skipped() {
    let mut session = Session::start(VIEWPORT, TrackingParams::default(), None);
    let state = session.state();
    assert!(state.calibrated);
    assert!(state.calibration_complete);
    assert!(session.calibration().is_complete());
    assert!(!session.has_gaze_source());

    let view = tracking(session.tick(Duration::ZERO));
    assert!(view.marker.is_none());
}

#[test]
fn failed_gaze_start_falls_back_to_pointer() {
    let (session, calls) = with_gaze(true);
    assert!(!session.has_gaze_source());
    assert!(session.state().calibration_complete);
    assert_eq!(calls.borrow().begun, 0);
}

// Camera permission is refused after `begin` already returned Ok.
fn fail_after_start(calls: &Rc<RefCell<Calls>>) {
    let slot = calls.borrow().slot.clone().expect("gaze source was started");
    slot.fail();
}

#[test]
fn late_gaze_failure_during_calibration_falls_back_to_pointer() {
    let (mut session, calls) = with_gaze(false);
    assert!(matches!(session.tick(Duration::ZERO), Frame::Calibrating(_)));

    fail_after_start(&calls);
    session.pointer_moved(CENTER);
    let mut most_hearts = 0;
    let mut dwelled = false;
    for t in (16..=3000).step_by(16) {
        let view = tracking(session.tick(Duration::from_millis(t)));
        assert!(view.marker.is_none());
        dwelled |= view.dwelling;
        most_hearts = most_hearts.max(view.hearts.len());
    }

    assert!(!session.has_gaze_source());
    assert_eq!(calls.borrow().ended, 1);
    let state = session.state();
    assert!(state.calibrated && state.calibration_complete);
    assert!(session.calibration().is_complete());
    assert!(dwelled);
    assert!(most_hearts > 0);
}

#[test]
fn late_gaze_failure_after_calibration_falls_back_to_pointer() {
    let (mut session, calls) = with_gaze(false);
    calibrate(&mut session);
    assert!(tracking(session.tick(Duration::from_millis(16))).marker.is_some());

    fail_after_start(&calls);
    session.pointer_moved(CENTER + Vec2::new(0.0, 50.0));
    let view = tracking(session.tick(Duration::from_millis(32)));
    assert!(view.dwelling);
    assert!(view.marker.is_none());
    assert!(!session.has_gaze_source());

    // A second tick does not end the source again.
    session.tick(Duration::from_millis(48));
    assert_eq!(calls.borrow().ended, 1);
}

#[test]
fn cached_page_pauses_and_resumes_gaze_source() {
    let (mut session, calls) = with_gaze(false);
    calibrate(&mut session);
    session.suspend();
    session.resume();
    assert_eq!(calls.borrow().paused, 1);
    assert_eq!(calls.borrow().resumed, 1);
    assert_eq!(calls.borrow().ended, 0);
    assert!(session.has_gaze_source());
    assert!(tracking(session.tick(Duration::from_millis(16))).marker.is_some());
}

#[test]
fn suspend_without_gaze_source_is_noop() {
    let mut session = Session::start(VIEWPORT, TrackingParams::default(), None);
    session.suspend();
    session.resume();
    assert!(!session.has_gaze_source());
}

#[test]
fn slot_failure_is_sticky_and_ignores_open_state() {
    let slot = GazeSlot::new();
    assert!(!slot.has_failed());
    slot.fail();
    slot.open();
    assert!(slot.has_failed());
    assert!(slot.clone().has_failed());
}

#[test]
fn gaze_source_starts_in_calibration() {
    let (mut session, calls) = with_gaze(false);
    assert_eq!(calls.borrow().begun, 1);
    assert!(!session.state().calibration_complete);
    assert!(!session.state().calibrated);

    match session.tick(Duration::from_millis(16)) {
        Frame::Calibrating(view) => {
            assert_eq!(view.points.len(), CALIBRATION_POINT_COUNT);
            assert!(!view.ready);
            assert_eq!(view.next, Some(0));
        }
        Frame::Tracking(_) => panic!("tracking before calibration"),
    }
}

#[test]
fn clicks_forward_point_positions_to_gaze_source() {
    let (mut session, calls) = with_gaze(false);
    let targets = point_positions(&session);
    session.pointer_pressed(targets[1] + Vec2::new(5.0, -5.0));
    session.pointer_pressed(Vec2::new(500.0, 500.0));
    assert_eq!(calls.borrow().clicks, vec![targets[1]]);
    assert!(session.calibration().points()[1].acknowledged);
}

#[test]
fn early_confirm_is_ignored() {
    let (mut session, calls) = with_gaze(false);
    let targets = point_positions(&session);
    for p in &targets[..3] {
        session.pointer_pressed(*p);
    }
    session.apply(Command::Confirm);
    assert!(!session.state().calibration_complete);
    assert_eq!(calls.borrow().suppressed, 0);
    assert!(matches!(session.tick(Duration::ZERO), Frame::Calibrating(_)));
}

#[test]
fn full_calibration_then_resize_keeps_points() {
    let (mut session, calls) = with_gaze(false);
    let targets = point_positions(&session);
    for p in &targets {
        session.pointer_pressed(*p);
    }
    match session.tick(Duration::ZERO) {
        Frame::Calibrating(view) => {
            assert!(view.ready);
            assert_eq!(view.next, None);
        }
        Frame::Tracking(_) => panic!("tracking before confirmation"),
    }

    session.apply(Command::Confirm);
    let state = session.state();
    assert!(state.calibrated && state.calibration_complete);
    assert_eq!(calls.borrow().clicks, targets);
    assert_eq!(calls.borrow().suppressed, 1);

    session.resize(Vec2::new(800.0, 600.0));
    assert_eq!(point_positions(&session), targets);
    assert_eq!(session.focus(), Vec2::new(400.0, 300.0));
}

#[test]
fn resize_during_calibration_moves_points_and_focus() {
    let (mut session, _calls) = with_gaze(false);
    session.resize(Vec2::new(800.0, 600.0));
    assert_eq!(session.focus(), Vec2::new(400.0, 300.0));
    assert_eq!(point_positions(&session)[2], Vec2::new(700.0, 500.0));
}

#[test]
fn clicks_after_calibration_are_not_forwarded() {
    let (mut session, calls) = with_gaze(false);
    calibrate(&mut session);
    let forwarded = calls.borrow().clicks.len();
    session.pointer_pressed(CENTER);
    assert_eq!(calls.borrow().clicks.len(), forwarded);
}

#[test]
fn gaze_before_calibration_is_discarded() {
    let (mut session, calls) = with_gaze(false);
    publish(&calls, Some(CENTER));
    calibrate(&mut session);
    let view = tracking(session.tick(Duration::from_millis(16)));
    assert_eq!(view.marker, Some(Vec2::ZERO));
    assert!(!view.dwelling);
}

#[test]
fn latest_gaze_wins_and_null_keeps_last() {
    let (mut session, calls) = with_gaze(false);
    calibrate(&mut session);

    publish(&calls, Some(Vec2::new(10.0, 10.0)));
    publish(&calls, Some(CENTER + Vec2::new(20.0, 0.0)));
    let view = tracking(session.tick(Duration::from_millis(16)));
    assert_eq!(view.marker, Some(CENTER + Vec2::new(20.0, 0.0)));
    assert!(view.dwelling);

    publish(&calls, None);
    publish(&calls, Some(Vec2::new(f32::NAN, 3.0)));
    let view = tracking(session.tick(Duration::from_millis(32)));
    assert_eq!(view.marker, Some(CENTER + Vec2::new(20.0, 0.0)));
    assert_eq!(session.state().current_gaze, CENTER + Vec2::new(20.0, 0.0));
}

#[test]
fn gaze_drives_dwelling_not_pointer() {
    let (mut session, calls) = with_gaze(false);
    calibrate(&mut session);
    session.pointer_moved(CENTER);
    publish(&calls, Some(Vec2::new(0.0, 0.0)));
    assert!(!tracking(session.tick(Duration::from_millis(16))).dwelling);
}

#[test]
fn pointer_drives_dwelling_without_gaze() {
    let mut session = Session::start(VIEWPORT, TrackingParams::default(), None);
    session.pointer_moved(Vec2::ZERO);
    let view = tracking(session.tick(Duration::from_millis(16)));
    assert!(!view.dwelling);

    session.pointer_moved(CENTER + Vec2::new(0.0, 100.0));
    let view = tracking(session.tick(Duration::from_millis(32)));
    assert!(view.dwelling);
    assert!(view.marker.is_none());
}

#[test]
fn dwelling_threshold_is_strict() {
    let threshold = GAZE_THRESHOLD_PX;
    assert!(is_dwelling(CENTER, CENTER, threshold));
    assert!(is_dwelling(CENTER + Vec2::new(threshold - 0.5, 0.0), CENTER, threshold));
    assert!(!is_dwelling(CENTER + Vec2::new(threshold, 0.0), CENTER, threshold));
    assert!(!is_dwelling(CENTER + Vec2::new(0.0, threshold + 1.0), CENTER, threshold));
}

#[test]
fn custom_threshold_is_honored() {
    let params = TrackingParams {
        gaze_threshold: 50.0,
        ..TrackingParams::default()
    };
    let mut session = Session::start(VIEWPORT, params, None);
    session.pointer_moved(CENTER + Vec2::new(60.0, 0.0));
    assert!(!tracking(session.tick(Duration::from_millis(16))).dwelling);
}

#[test]
fn dwelling_blooms_hearts_at_focus() {
    let mut session = Session::start(VIEWPORT, TrackingParams::default(), None);
    session.pointer_moved(CENTER);
    let mut shapes = 0;
    for t in (16..=1000).step_by(16) {
        let view = tracking(session.tick(Duration::from_millis(t)));
        shapes = view.hearts.len();
        for heart in &view.hearts {
            assert_eq!(heart.outline.len(), 126);
            assert!(heart.opacity > 0.0 && heart.opacity <= HEART_MAX_OPACITY);
        }
    }
    assert!(shapes > 0);
    assert!(session
        .emitter()
        .hearts()
        .iter()
        .all(|h| h.position == CENTER));
}

#[test]
fn looking_away_lets_hearts_fade_out() {
    let mut session = Session::start(VIEWPORT, TrackingParams::default(), None);
    session.pointer_moved(CENTER);
    for t in (16..=400).step_by(16) {
        session.tick(Duration::from_millis(t));
    }
    assert!(!session.emitter().hearts().is_empty());

    session.pointer_moved(Vec2::ZERO);
    for t in (416..=1000).step_by(16) {
        session.tick(Duration::from_millis(t));
    }
    assert!(session.emitter().hearts().is_empty());
}

#[test]
fn guides_toggle_with_command() {
    let mut session = Session::start(VIEWPORT, TrackingParams::default(), None);
    assert!(tracking(session.tick(Duration::ZERO)).guides.is_none());
    session.apply(Command::ToggleGuides);
    let guides = tracking(session.tick(Duration::ZERO)).guides;
    assert_eq!(
        guides,
        Some(Guides {
            focus: CENTER,
            threshold: GAZE_THRESHOLD_PX
        })
    );
    session.apply(Command::ToggleGuides);
    assert!(tracking(session.tick(Duration::ZERO)).guides.is_none());
}

#[test]
fn keys_map_to_commands() {
    assert_eq!(Command::from_key("Enter"), Some(Command::Confirm));
    assert_eq!(Command::from_key("g"), Some(Command::ToggleGuides));
    assert_eq!(Command::from_key("G"), Some(Command::ToggleGuides));
    assert_eq!(Command::from_key("h"), None);
    assert_eq!(Command::from_key(" "), None);
}

#[test]
fn frame_counter_advances_every_tick() {
    let (mut session, _calls) = with_gaze(false);
    session.tick(Duration::ZERO);
    session.tick(Duration::ZERO);
    calibrate(&mut session);
    session.tick(Duration::ZERO);
    assert_eq!(session.frame_count(), 3);
}

#[test]
fn shutdown_ends_gaze_source_once() {
    let (mut session, calls) = with_gaze(false);
    session.shutdown();
    session.shutdown();
    assert_eq!(calls.borrow().ended, 1);
    assert!(!session.has_gaze_source());
}

#[test]
fn shutdown_without_gaze_source_is_noop() {
    let mut session = Session::start(VIEWPORT, TrackingParams::default(), None);
    session.shutdown();
    assert!(session.state().calibration_complete);
}
