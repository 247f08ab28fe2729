//! Hand landmark processing: steering angle, finger-count gestures, the
//! pause pose and an angle recorder for tuning the smoothing filter.

pub mod angle;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod gesture;
pub mod landmarks;
pub mod recorder;
pub mod source;

pub use angle::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use filter::*;
pub use gesture::*;
pub use landmarks::*;
pub use recorder::*;
pub use source::*;
