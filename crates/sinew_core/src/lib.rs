//! Foundational types for the Sinew skinning core.
//!
//! - [`errors`]: the shared [`SinewError`] taxonomy and [`Result`] alias
//! - [`math`]: node index type and transform composition helpers

pub mod errors;
pub mod math;

pub use errors::{Result, SinewError};
pub use math::{NodeIndex, compose_trs};
