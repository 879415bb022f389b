//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (bin/):
//!     Load config → Init logging/metrics → Build client → Bind listener
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown.trigger()
//!
//! Shutdown (shutdown.rs):
//!     Broadcast → server drains, reload task and watch loop exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
