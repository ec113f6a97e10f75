//! Client for a remote WMS endpoint (by default the BGS UKSO soil service).
//!
//! [`WmsClient`] builds GetMap/GetFeatureInfo URLs, fetches and caches the
//! capabilities document, and answers layer lookups from the cached catalog.

pub mod cache;
pub mod client;
pub mod config;
pub mod fetcher;
pub mod index;

pub use cache::CapabilitiesCache;
pub use client::WmsClient;
pub use config::ClientConfig;
pub use fetcher::{Fetcher, HttpFetcher};

pub use wms_common::{BoundingBox, Capabilities, Layer, WmsError, WmsResult};
pub use wms_protocol::{GetFeatureInfoRequest, GetMapRequest, LayerList};
