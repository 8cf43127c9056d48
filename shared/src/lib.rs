//! Shared types and models for the IPMA proxy
//!
//! This crate holds the normalized records served by the backend together
//! with the fixed lookup tables (districts, warning levels, fire-risk and UV
//! bands) and input validation used by the request surface.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
