// Drawing constants for the canvas renderer.
//
// Behavioral tuning (thresholds, intervals, steps) lives in
// `core::constants`; this module only covers how things look.

// Page elements
pub const CANVAS_ID: &str = "app-canvas";

// Calibration screen
pub const CALIBRATION_BACKGROUND: &str = "white";
pub const CALIBRATION_TEXT_COLOR: &str = "black";
pub const CALIBRATION_FONT: &str = "24px Costura, sans-serif";
pub const CALIBRATION_TEXT_INSET_PX: f64 = 50.0; // distance of the prompts from top/bottom edges
pub const CALIBRATION_PROMPT: &str = "Click on each circle to calibrate eye tracking";
pub const CALIBRATION_DONE: &str = "Calibration complete.";
pub const CALIBRATION_CONFIRM_HINT: &str = "Press ENTER to start the heart visualization.";
pub const CALIBRATION_POINT_DIAMETER: f64 = 40.0;
pub const CALIBRATION_POINT_DONE_FILL: &str = "blue";
pub const CALIBRATION_POINT_PENDING_FILL: &str = "white";
pub const CALIBRATION_POINT_STROKE: &str = "black";
pub const CALIBRATION_NEXT_STROKE: &str = "rgb(255, 0, 100)";
pub const CALIBRATION_NEXT_STROKE_WIDTH: f64 = 3.0;

// Tracking screen
pub const TRACKING_BACKGROUND: &str = "black";
pub const HEART_RGB: (u8, u8, u8) = (255, 0, 0);
// Black on black: the label only shows through the hearts blooming behind it.
pub const STATUS_TEXT_COLOR: &str = "black";
pub const STATUS_FONT: &str = "16px Costura, sans-serif";
pub const STATUS_DWELLING: &str = "I see you";
pub const STATUS_IDLE: &str = "Look at me";
pub const GAZE_MARKER_DIAMETER: f64 = 10.0;
pub const GAZE_MARKER_STROKE: &str = "rgba(255, 255, 255, 0.35)";

// Focus guides (toggled with `g`)
pub const GUIDE_COLOR: &str = "rgb(255, 0, 100)";
pub const GUIDE_RING_COLOR: &str = "rgba(255, 0, 100, 0.31)";
pub const GUIDE_FOCUS_DIAMETER: f64 = 20.0;

// Heart blur
pub const BLUR_RADIUS_PX: usize = 10;
pub const BLUR_PASSES: usize = 2; // two box passes approximate a gaussian
