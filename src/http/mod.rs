//! Dashboard web surface.
//!
//! # Data Flow
//! ```text
//! Browser GET /
//!     → request_id.rs (x-request-id)
//!     → server.rs (load current Runtime, fetch health/tasks/posture concurrently)
//!     → render.rs (escaped HTML)
//!
//! GET /api/{health,tasks,security}
//!     → same fetches, returned as JSON
//! ```

pub mod render;
pub mod request_id;
pub mod server;

pub use request_id::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, DashboardServer, Runtime};
