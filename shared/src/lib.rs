//! Shared types, models and the decision engine for the Mandi Advisor
//!
//! This crate contains the domain models exchanged between the backend
//! orchestrator and the WASM client, plus the pure scoring and decision
//! engine. Nothing in here performs I/O.

pub mod engine;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
