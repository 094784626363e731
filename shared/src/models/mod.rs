//! Domain models for the Mandi Advisor

mod crop;
mod farmer;
mod market;
mod recommendation;
mod soil;
mod storage;
mod weather;

pub use crop::*;
pub use farmer::*;
pub use market::*;
pub use recommendation::*;
pub use soil::*;
pub use storage::*;
pub use weather::*;
