//! Mock backend for the Ben10 game.
//!
//! Answers every GET/POST/HEAD/OPTIONS request with a canned, always
//! successful response so the game client can run without its real
//! server.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::MockConfig;
pub use http::MockServer;
pub use lifecycle::Shutdown;
pub use routing::{Category, Classifier, Verb};
