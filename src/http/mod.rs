//! HTTP handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum/hyper)
//!     → server.rs (middleware, catch-all handler)
//!     → request.rs (request ID, log, bounded body read)
//!     → routing::Classifier (category)
//!     → auth.rs + multipart.rs (login form only)
//!     → response.rs (render template, add CORS origin)
//!     → Send to client
//! ```

pub mod auth;
pub mod multipart;
pub mod request;
pub mod response;
pub mod server;

pub use multipart::{extract_field, ExtractedField};
pub use request::{IncomingRequest, UuidRequestId, X_REQUEST_ID};
pub use response::{RenderedResponse, ResponseTemplate, TemplateTable};
pub use server::{AppState, MockServer};
