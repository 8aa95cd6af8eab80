//! Request classification subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (verb, raw target)
//!     → classifier.rs (strip query, pick the verb's rule list)
//!     → matcher.rs (evaluate path predicates top to bottom)
//!     → Return: Category (always one)
//! ```
//!
//! # Design Decisions
//! - Rules built at startup, immutable at runtime
//! - No regex (suffix/prefix/exact/substring only)
//! - Deterministic: same input always yields the same category
//! - First match wins; overlapping predicates are expected

pub mod category;
pub mod classifier;
pub mod matcher;

pub use category::{Category, Verb};
pub use classifier::{Classifier, Rule, AUTH_PATH};
