mod engine;
pub mod progress;

pub use engine::{DriverHandle, Phase, TimerEngine};
pub use progress::{fraction, TimeBreakdown};
