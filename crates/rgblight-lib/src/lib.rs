//! rgblight: priority arbitration and ramp encoding for a shared sysfs RGB LED.

pub mod attribute;
pub mod config;
pub mod controller;
pub mod error;
pub mod led;
pub mod service;
pub mod state;

pub use controller::LightController;
pub use error::LightError;
pub use state::{FlashMode, LightState, Role};
