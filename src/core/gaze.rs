use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// Eye tracker that reports where on screen the viewer is looking.
///
/// Implementations push predictions into the [`GazeSlot`] handed to
/// [`GazeSource::begin`] whenever they have one; the frame loop reads the
/// slot on its own schedule.
pub trait GazeSource {
    /// Registers the prediction callback and starts sensing.
    fn begin(&mut self, slot: GazeSlot) -> anyhow::Result<()>;
    /// Stops sensing and releases the camera.
    fn end(&mut self);
    /// Stops sensing while the page sits in the back/forward cache.
    fn pause(&mut self);
    /// Picks up again after [`GazeSource::pause`].
    fn resume(&mut self);
    /// Tells the tracker the viewer just clicked at `at`, for its own calibration.
    fn record_click(&self, at: Vec2);
    /// Hides any preview or overlay the tracker injected into the page.
    fn suppress_ui(&self);
}

#[derive(Default)]
struct SlotInner {
    latest: Cell<Option<Vec2>>,
    accepting: Cell<bool>,
    failed: Cell<bool>,
}

/// Single-slot, last-value-wins mailbox for gaze predictions.
///
/// Closed slots drop writes; the session opens it once calibration completes.
/// A source that dies after `begin` returned (camera denied, no camera)
/// reports it through [`GazeSlot::fail`].
#[derive(Clone, Default)]
pub struct GazeSlot {
    inner: Rc<SlotInner>,
}

impl GazeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        self.inner.accepting.set(true);
    }

    pub fn is_open(&self) -> bool {
        self.inner.accepting.get()
    }

    /// Overwrites the stored prediction. `None` (tracker lost the face) and
    /// non-finite coordinates are ignored.
    pub fn publish(&self, prediction: Option<Vec2>) {
        if !self.is_open() {
            return;
        }
        if let Some(p) = prediction.filter(|p| p.is_finite()) {
            self.inner.latest.set(Some(p));
        }
    }

    /// Marks the source as dead. Sticky.
    pub fn fail(&self) {
        self.inner.failed.set(true);
    }

    pub fn has_failed(&self) -> bool {
        self.inner.failed.get()
    }

    pub fn latest(&self) -> Option<Vec2> {
        self.inner.latest.get()
    }
}
