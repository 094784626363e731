//! Error types for the decision engine

use thiserror::Error;

/// Invalid input rejected by the engine before any computation starts.
///
/// The engine itself is total over well-formed input; everything that can go
/// wrong upstream is resolved to a fallback value by the orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("No candidate markets supplied")]
    NoCandidateMarkets,

    #[error("Negative price {price} for market {market}")]
    NegativePrice { market: String, price: f64 },

    #[error("Expected {expected} transit times, got {actual}")]
    TransitCountMismatch { expected: usize, actual: usize },

    #[error("Invalid crop: {0}")]
    InvalidCrop(&'static str),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
