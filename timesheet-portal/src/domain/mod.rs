pub mod duration;
mod error;
pub mod models;
pub mod ports;

pub use duration::{is_valid_duration, parse_duration_hours};
pub use error::*;
