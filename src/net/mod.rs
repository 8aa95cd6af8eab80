//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, port, fallback_port)
//!     → listener.rs (bind primary, fall back once on PermissionDenied)
//!     → TcpListener handed to the HTTP server
//! ```

pub mod listener;

pub use listener::{bind_with_fallback, ListenerError};
