pub mod config;
pub mod task;
pub mod theme;
pub mod timer;
