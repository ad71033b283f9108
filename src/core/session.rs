use super::calibration::{point_label, Calibration, CalibrationPoint};
use super::constants::{CALIBRATION_HIT_RADIUS_PX, CALIBRATION_MARGIN_PX, GAZE_THRESHOLD_PX};
use super::gaze::{GazeSlot, GazeSource};
use super::hearts::{heart_outline, HeartEmitter, HeartParams, Outline};
use super::noise::NoiseField;
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct TrackingParams {
    pub gaze_threshold: f32,
    pub calibration_margin: f32,
    pub calibration_hit_radius: f32,
    pub hearts: HeartParams,
}

impl Default for TrackingParams {
    fn default() -> Self {
        Self {
            gaze_threshold: GAZE_THRESHOLD_PX,
            calibration_margin: CALIBRATION_MARGIN_PX,
            calibration_hit_radius: CALIBRATION_HIT_RADIUS_PX,
            hearts: HeartParams::default(),
        }
    }
}

/// Completion flags only ever flip from `false` to `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackingState {
    pub calibrated: bool,
    pub calibration_complete: bool,
    pub current_gaze: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Confirm,
    ToggleGuides,
}

impl Command {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Command::Confirm),
            "g" | "G" => Some(Command::ToggleGuides),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HeartShape {
    pub outline: Outline,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Guides {
    pub focus: Vec2,
    pub threshold: f32,
}

pub struct CalibrationView<'a> {
    pub points: &'a [CalibrationPoint],
    /// Every point acknowledged; waiting for the confirm key.
    pub ready: bool,
    pub next: Option<usize>,
}

pub struct TrackingView {
    pub focus: Vec2,
    pub dwelling: bool,
    pub hearts: Vec<HeartShape>,
    /// Raw gaze position, present only while a real gaze source drives tracking.
    pub marker: Option<Vec2>,
    pub guides: Option<Guides>,
}

/// Everything the renderer needs to draw one tick.
pub enum Frame<'a> {
    Calibrating(CalibrationView<'a>),
    Tracking(TrackingView),
}

#[inline]
pub fn is_dwelling(track: Vec2, focus: Vec2, threshold: f32) -> bool {
    track.distance(focus) < threshold
}

/// All per-page state: calibration, tracking flags, hearts and the gaze source.
pub struct Session {
    params: TrackingParams,
    focus: Vec2,
    calibration: Calibration,
    state: TrackingState,
    pointer: Vec2,
    gaze_slot: GazeSlot,
    gaze: Option<Box<dyn GazeSource>>,
    emitter: HeartEmitter,
    noise: NoiseField,
    frame_count: u64,
    show_guides: bool,
}

impl Session {
    /// Starts the gaze source if there is one; otherwise (or if it fails to
    /// start) tracking falls back to the pointer with calibration finished.
    pub fn start(
        viewport: Vec2,
        params: TrackingParams,
        gaze: Option<Box<dyn GazeSource>>,
    ) -> Self {
        let gaze_slot = GazeSlot::new();
        let gaze = gaze.and_then(|mut source| match source.begin(gaze_slot.clone()) {
            Ok(()) => {
                log::info!("[gaze] source started; awaiting calibration");
                Some(source)
            }
            Err(e) => {
                log::warn!("[gaze] source failed to start: {:?}", e);
                None
            }
        });

        let focus = viewport * 0.5;
        let mut calibration = Calibration::with_geometry(
            viewport,
            params.calibration_margin,
            params.calibration_hit_radius,
        );
        let mut state = TrackingState::default();
        if gaze.is_none() {
            log::info!("[gaze] no gaze source; falling back to pointer tracking");
            calibration = calibration.skipped();
            state.calibrated = true;
            state.calibration_complete = true;
        }

        let emitter = HeartEmitter::new(focus, params.hearts.clone());
        Self {
            params,
            focus,
            calibration,
            state,
            pointer: Vec2::ZERO,
            gaze_slot,
            gaze,
            emitter,
            noise: NoiseField::default(),
            frame_count: 0,
            show_guides: false,
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn emitter(&self) -> &HeartEmitter {
        &self.emitter
    }

    pub fn focus(&self) -> Vec2 {
        self.focus
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn has_gaze_source(&self) -> bool {
        self.gaze.is_some()
    }

    pub fn pointer_moved(&mut self, at: Vec2) {
        self.pointer = at;
    }

    pub fn pointer_pressed(&mut self, at: Vec2) {
        self.pointer = at;
        if self.calibration.is_complete() {
            return;
        }
        for i in self.calibration.acknowledge(at) {
            let target = self.calibration.points()[i].position;
            log::info!(
                "[calibration] acknowledged {} ({:.0},{:.0})",
                point_label(i),
                target.x,
                target.y
            );
            if let Some(g) = &self.gaze {
                g.record_click(target);
            }
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Confirm => {
                if self.calibration.confirm_if_ready() {
                    self.state.calibrated = true;
                    self.state.calibration_complete = true;
                    self.gaze_slot.open();
                    if let Some(g) = &self.gaze {
                        g.suppress_ui();
                    }
                    log::info!("[calibration] complete; tracking started");
                }
            }
            Command::ToggleGuides => {
                self.show_guides = !self.show_guides;
            }
        }
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.focus = viewport * 0.5;
        self.emitter.set_origin(self.focus);
        self.calibration.on_viewport_resize(viewport);
        log::debug!("[resize] viewport {}x{}", viewport.x, viewport.y);
    }

    /// Advances one frame. `now` is the time since the session started.
    pub fn tick(&mut self, now: Duration) -> Frame<'_> {
        self.frame_count += 1;

        if self.gaze.is_some() && self.gaze_slot.has_failed() {
            self.fall_back_to_pointer();
        }

        if !self.state.calibration_complete {
            return Frame::Calibrating(CalibrationView {
                points: self.calibration.points(),
                ready: self.calibration.all_acknowledged(),
                next: self.calibration.next_pending(),
            });
        }

        if let Some(p) = self.gaze_slot.latest() {
            self.state.current_gaze = p;
        }
        let gaze_tracking = self.gaze.is_some();
        let track = if gaze_tracking {
            self.state.current_gaze
        } else {
            self.pointer
        };

        let dwelling = is_dwelling(track, self.focus, self.params.gaze_threshold);
        self.emitter.maybe_spawn(dwelling, now);
        self.emitter.advance_all();

        let hearts = self
            .emitter
            .hearts()
            .iter()
            .map(|h| HeartShape {
                outline: heart_outline(h.position, h.size, self.frame_count, &self.noise),
                opacity: h.opacity,
            })
            .collect();

        Frame::Tracking(TrackingView {
            focus: self.focus,
            dwelling,
            hearts,
            marker: gaze_tracking.then_some(self.state.current_gaze),
            guides: self.show_guides.then_some(Guides {
                focus: self.focus,
                threshold: self.params.gaze_threshold,
            }),
        })
    }

    // The source died after starting; calibration against it can never finish.
    fn fall_back_to_pointer(&mut self) {
        if let Some(mut g) = self.gaze.take() {
            g.end();
        }
        self.calibration = self.calibration.clone().skipped();
        self.state.calibrated = true;
        self.state.calibration_complete = true;
        log::warn!("[gaze] source failed after start; falling back to pointer tracking");
    }

    /// Pauses the gaze source while the page sits in the back/forward cache.
    pub fn suspend(&mut self) {
        if let Some(g) = &mut self.gaze {
            g.pause();
            log::info!("[gaze] source paused");
        }
    }

    pub fn resume(&mut self) {
        if let Some(g) = &mut self.gaze {
            g.resume();
            log::info!("[gaze] source resumed");
        }
    }

    /// Releases the gaze source; safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(mut g) = self.gaze.take() {
            g.end();
            log::info!("[gaze] source stopped");
        }
    }
}
