use super::constants::{CALIBRATION_HIT_RADIUS_PX, CALIBRATION_MARGIN_PX, CALIBRATION_POINT_COUNT};
use glam::Vec2;
use smallvec::SmallVec;

/// Indices of the points touched by a single click.
pub type Hits = SmallVec<[usize; CALIBRATION_POINT_COUNT]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationPhase {
    AwaitingInput,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationPoint {
    pub position: Vec2,
    pub acknowledged: bool,
}

/// Five on-screen targets the viewer clicks before tracking starts.
///
/// Acknowledgement only ever goes from `false` to `true`, and once the phase
/// reaches [`CalibrationPhase::Complete`] neither the points nor the phase
/// change again.
#[derive(Clone, Debug)]
pub struct Calibration {
    points: [CalibrationPoint; CALIBRATION_POINT_COUNT],
    phase: CalibrationPhase,
    margin: f32,
    hit_radius: f32,
}

impl Calibration {
    pub fn new(viewport: Vec2) -> Self {
        Self::with_geometry(viewport, CALIBRATION_MARGIN_PX, CALIBRATION_HIT_RADIUS_PX)
    }

    pub fn with_geometry(viewport: Vec2, margin: f32, hit_radius: f32) -> Self {
        let points = layout(viewport, margin).map(|position| CalibrationPoint {
            position,
            acknowledged: false,
        });
        Self {
            points,
            phase: CalibrationPhase::AwaitingInput,
            margin,
            hit_radius,
        }
    }

    /// Finishes without input; used when there is no gaze source to calibrate.
    pub fn skipped(mut self) -> Self {
        self.phase = CalibrationPhase::Complete;
        self
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CalibrationPhase::Complete
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn all_acknowledged(&self) -> bool {
        self.points.iter().all(|p| p.acknowledged)
    }

    pub fn next_pending(&self) -> Option<usize> {
        self.points.iter().position(|p| !p.acknowledged)
    }

    /// Marks every point strictly within the hit radius of `at`.
    pub fn acknowledge(&mut self, at: Vec2) -> Hits {
        let mut hits = Hits::new();
        if self.is_complete() {
            return hits;
        }
        for (i, p) in self.points.iter_mut().enumerate() {
            if p.position.distance(at) < self.hit_radius {
                p.acknowledged = true;
                hits.push(i);
            }
        }
        hits
    }

    /// Finishes calibration if every point has been acknowledged.
    pub fn confirm_if_ready(&mut self) -> bool {
        if self.is_complete() || !self.all_acknowledged() {
            return false;
        }
        self.phase = CalibrationPhase::Complete;
        true
    }

    pub fn on_viewport_resize(&mut self, viewport: Vec2) {
        if self.is_complete() {
            return;
        }
        for (p, position) in self.points.iter_mut().zip(layout(viewport, self.margin)) {
            p.position = position;
        }
    }
}

/// Corner points inset by `margin`, clockwise from top-left, then the center.
fn layout(viewport: Vec2, margin: f32) -> [Vec2; CALIBRATION_POINT_COUNT] {
    let (w, h) = (viewport.x, viewport.y);
    [
        Vec2::new(margin, margin),
        Vec2::new(w - margin, margin),
        Vec2::new(w - margin, h - margin),
        Vec2::new(margin, h - margin),
        viewport * 0.5,
    ]
}

pub fn point_label(index: usize) -> &'static str {
    match index {
        0 => "top-left",
        1 => "top-right",
        2 => "bottom-right",
        3 => "bottom-left",
        4 => "center",
        _ => "",
    }
}
