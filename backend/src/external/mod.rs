//! External API integrations

pub mod ipma;
pub mod payloads;

pub use ipma::{IpmaClient, Resource, UpstreamError};
