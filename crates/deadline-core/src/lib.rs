//! # Deadline Core Library
//!
//! Core logic for the Deadline countdown timer. It implements a
//! CLI-first philosophy: every operation is available via the
//! standalone CLI binary, which is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a caller-ticked state machine; whoever drives the
//!   countdown invokes `tick()` once per elapsed second using the driver
//!   handle issued at start
//! - **Render pipeline**: one progress projection fanned out to every
//!   visual sink so the readout, bar, ring and animation tier can never
//!   disagree
//! - **Completion**: injected chime/notification/acknowledgment
//!   collaborators, best-effort and insulated from the tick path
//! - **Storage**: SQLite task checklist and kv state, TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core countdown state machine
//! - [`CountdownSession`]: engine + render dispatcher + completion wiring
//! - [`Database`]: task and key-value persistence
//! - [`Config`]: application configuration

pub mod completion;
pub mod duration;
pub mod error;
pub mod events;
pub mod render;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;

pub use completion::{Acknowledger, Chime, CompletionHandler, Notifier};
pub use duration::DurationSpec;
pub use error::{ConfigError, CoreError, DatabaseError, DurationError, TimerError};
pub use events::Event;
pub use render::{RenderDispatcher, RenderFrame, RenderSink, SpeedTier};
pub use session::CountdownSession;
pub use storage::{Config, Database};
pub use task::Task;
pub use timer::{DriverHandle, Phase, TimerEngine};
