//! Structured form of a WMS GetCapabilities document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Layer;

/// Service title used when the document carries no `Service/Title`.
pub const DEFAULT_SERVICE_TITLE: &str = "BGS Soil Data WMS";

/// Service metadata, supported formats and the named layers of one
/// capabilities fetch. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub title: String,

    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Version that was requested, not the one the server reported
    pub version: String,

    /// Named layers in document order
    pub layers: Vec<Layer>,

    /// GetMap output formats
    pub formats: Vec<String>,

    /// GetFeatureInfo output formats
    pub info_formats: Vec<String>,

    /// Wall-clock time the document was parsed
    pub cached_at: DateTime<Utc>,
}
