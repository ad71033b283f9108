pub mod calibration;
pub mod constants;
pub mod gaze;
pub mod hearts;
pub mod noise;
pub mod session;

pub use calibration::*;
pub use gaze::*;
pub use hearts::*;
pub use noise::*;
pub use session::*;
