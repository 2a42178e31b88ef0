//! Core library for the `citypage` weather CLI.
//!
//! This crate defines:
//! - Parsing of the city page site directory and per-site weather documents
//! - Site lookup by name and locator construction
//! - The fetch abstraction and its HTTP implementation
//! - Configuration handling
//!
//! It is used by `citypage-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod locator;
pub mod model;
pub mod resolver;
pub mod sites;
mod xml;

pub use config::Config;
pub use document::parse_weather_document;
pub use error::{LookupError, ParseError, TransportError};
pub use fetch::{Fetcher, HttpFetcher};
pub use locator::{DEFAULT_BASE_URL, Endpoints, build_locator};
pub use model::{ForecastPeriod, SiteRecord, WarningRecord, WeatherReport};
pub use resolver::{CityPageClient, matches_site};
pub use sites::parse_site_directory;
