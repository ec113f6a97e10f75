//! WMS GetMap request URLs.
//!
//! Nothing is validated here: sizes, layer names and bounds are serialized
//! exactly as given.

use serde::{Deserialize, Serialize};
use wms_common::BoundingBox;

use crate::kvp::{build_url, crs_param_key, LayerList, DEFAULT_VERSION};

pub const DEFAULT_WIDTH: i64 = 800;
pub const DEFAULT_HEIGHT: i64 = 600;
pub const DEFAULT_FORMAT: &str = "image/png";
pub const DEFAULT_BGCOLOR: &str = "0xFFFFFF";

/// GetMap request parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMapRequest {
    /// Layers to render, in drawing order
    pub layers: LayerList,
    /// Map extent
    pub bbox: BoundingBox,
    /// Map width in pixels
    pub width: i64,
    /// Map height in pixels
    pub height: i64,
    /// Image MIME type
    pub format: String,
    /// WMS version string
    pub version: String,
    /// CRS override; `None` means use `bbox.crs`
    pub crs: Option<String>,
    pub transparent: bool,
    pub bgcolor: String,
}

impl GetMapRequest {
    /// Request with the default 800x600 transparent PNG settings.
    pub fn new(layers: impl Into<LayerList>, bbox: BoundingBox) -> Self {
        Self {
            layers: layers.into(),
            bbox,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            format: DEFAULT_FORMAT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            crs: None,
            transparent: true,
            bgcolor: DEFAULT_BGCOLOR.to_string(),
        }
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_bgcolor(mut self, bgcolor: impl Into<String>) -> Self {
        self.bgcolor = bgcolor.into();
        self
    }

    /// CRS that will be sent: the explicit override, else the bbox's CRS.
    pub fn effective_crs(&self) -> &str {
        self.crs.as_deref().unwrap_or(&self.bbox.crs)
    }

    /// Ordered query parameters for this request.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("service", "WMS".to_string()),
            ("request", "GetMap".to_string()),
            ("version", self.version.clone()),
            ("layers", self.layers.to_param()),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("format", self.format.clone()),
            ("transparent", self.transparent.to_string()),
            ("bgcolor", self.bgcolor.clone()),
            (crs_param_key(&self.version), self.effective_crs().to_string()),
            ("bbox", self.bbox.to_wms_string()),
        ]
    }

    /// Full GetMap URL against `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        build_url(base_url, self.query_params())
    }
}
