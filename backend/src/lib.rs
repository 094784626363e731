//! Mandi Advisor backend
//!
//! Resolves weather, soil, market, transit and crowd-report inputs from
//! collaborators and runs the shared decision engine over them.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult, FetchError, FetchResult};
