//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! initialize():
//!     restore session (silent) → create modal → watch visibility
//!
//! toggle_connection():
//!     status connected?   → disconnect
//!     status disconnected → modal.open()
//!
//! visibility watcher:
//!     Open → Closed edge && connected → AccountProber::run
//! ```
//!
//! # Design Decisions
//! - Every decision re-queries the session provider
//! - At most one modal per controller
//! - Events are handled one at a time, in arrival order

pub mod controller;

pub use controller::{SessionController, ToggleAction};
