//! Domain models for the IPMA proxy

mod agriculture;
mod district;
mod forecast;
mod marine;
mod seismic;
mod station;
mod warning;

pub use agriculture::*;
pub use district::*;
pub use forecast::*;
pub use marine::*;
pub use seismic::*;
pub use station::*;
pub use warning::*;

use thiserror::Error;

/// Error returned when a textual filter value does not name a known variant
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized {kind} '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
