//! Upstream normalizers for the IPMA proxy
//!
//! Each service owns its caches and returns `Err(UpstreamError)` when the
//! upstream cannot be read; the request surface decides how to answer.

pub mod agriculture;
pub mod forecast;
pub mod marine;
pub mod reference;
pub mod seismic;
pub mod stations;
pub mod warnings;

pub use agriculture::AgricultureService;
pub use forecast::{ForecastLookup, ForecastService};
pub use marine::MarineService;
pub use reference::ReferenceService;
pub use seismic::SeismicService;
pub use stations::StationService;
pub use warnings::WarningService;
