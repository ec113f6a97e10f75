//! WMS GetFeatureInfo request URLs.
//!
//! Pixel coordinates go out as `x`/`y` for every version, including 1.3.0
//! (which formally names them `i`/`j`); the BGS service accepts both.

use serde::{Deserialize, Serialize};
use wms_common::BoundingBox;

use crate::getmap::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::kvp::{build_url, crs_param_key, LayerList, DEFAULT_VERSION};

pub const DEFAULT_INFO_FORMAT: &str = "text/plain";
pub const DEFAULT_FEATURE_COUNT: i64 = 10;

/// GetFeatureInfo request parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetFeatureInfoRequest {
    /// Layers to display and to query (sent as both `layers` and `query_layers`)
    pub layers: LayerList,
    /// Map extent the pixel position refers to
    pub bbox: BoundingBox,
    /// Pixel column, not checked against `width`
    pub x: i64,
    /// Pixel row, not checked against `height`
    pub y: i64,
    pub width: i64,
    pub height: i64,
    /// Response MIME type
    pub info_format: String,
    pub version: String,
    /// CRS override; `None` means use `bbox.crs`
    pub crs: Option<String>,
    /// Maximum number of features to return
    pub feature_count: i64,
}

impl GetFeatureInfoRequest {
    pub fn new(layers: impl Into<LayerList>, bbox: BoundingBox, x: i64, y: i64) -> Self {
        Self {
            layers: layers.into(),
            bbox,
            x,
            y,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            info_format: DEFAULT_INFO_FORMAT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            crs: None,
            feature_count: DEFAULT_FEATURE_COUNT,
        }
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_info_format(mut self, info_format: impl Into<String>) -> Self {
        self.info_format = info_format.into();
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

    pub fn with_feature_count(mut self, feature_count: i64) -> Self {
        self.feature_count = feature_count;
        self
    }

    pub fn effective_crs(&self) -> &str {
        self.crs.as_deref().unwrap_or(&self.bbox.crs)
    }

    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let layers = self.layers.to_param();
        vec![
            ("service", "WMS".to_string()),
            ("request", "GetFeatureInfo".to_string()),
            ("version", self.version.clone()),
            ("layers", layers.clone()),
            ("query_layers", layers),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("info_format", self.info_format.clone()),
            ("feature_count", self.feature_count.to_string()),
            ("x", self.x.to_string()),
            ("y", self.y.to_string()),
            (crs_param_key(&self.version), self.effective_crs().to_string()),
            ("bbox", self.bbox.to_wms_string()),
        ]
    }

    pub fn to_url(&self, base_url: &str) -> String {
        build_url(base_url, self.query_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{query_param, query_pairs, raw_query_segments};

    const BASE: &str = "https://example.com/WMSServer";

    fn london() -> BoundingBox {
        BoundingBox::new(-0.51, 51.28, 0.33, 51.69)
    }

    #[test]
    fn test_defaults() {
        let url = GetFeatureInfoRequest::new("soil_depth", london(), 400, 300).to_url(BASE);
        assert_eq!(query_param(&url, "request").as_deref(), Some("GetFeatureInfo"));
        assert_eq!(query_param(&url, "info_format").as_deref(), Some("text/plain"));
        assert_eq!(query_param(&url, "feature_count").as_deref(), Some("10"));
        assert_eq!(query_param(&url, "width").as_deref(), Some("800"));
        assert_eq!(query_param(&url, "height").as_deref(), Some("600"));
        assert_eq!(query_param(&url, "x").as_deref(), Some("400"));
        assert_eq!(query_param(&url, "y").as_deref(), Some("300"));
        assert_eq!(query_param(&url, "crs").as_deref(), Some("EPSG:4326"));
    }

    #[test]
    fn test_query_layers_mirror_layers() {
        let url = GetFeatureInfoRequest::new(vec!["topsoil", "geology"], london(), 1, 2)
            .to_url(BASE);
        let segments = raw_query_segments(&url);
        assert!(segments.contains(&"layers=topsoil%2Cgeology".to_string()));
        assert!(segments.contains(&"query_layers=topsoil%2Cgeology".to_string()));
    }

    #[test]
    fn test_version_branching() {
        let url = GetFeatureInfoRequest::new("a", london(), 0, 0)
            .with_version("1.1.1")
            .to_url(BASE);
        assert_eq!(query_param(&url, "srs").as_deref(), Some("EPSG:4326"));
        assert_eq!(query_param(&url, "crs"), None);
    }

    #[test]
    fn test_pixel_outside_map_passes_through() {
        let url = GetFeatureInfoRequest::new("a", london(), 5000, -3)
            .with_size(100, 100)
            .with_feature_count(0)
            .to_url(BASE);
        assert_eq!(query_param(&url, "x").as_deref(), Some("5000"));
        assert_eq!(query_param(&url, "y").as_deref(), Some("-3"));
        assert_eq!(query_param(&url, "feature_count").as_deref(), Some("0"));
    }

    #[test]
    fn test_every_parameter_appears_once() {
        let url = GetFeatureInfoRequest::new("a", london(), 1, 1)
            .with_info_format("text/html")
            .with_crs("EPSG:27700")
            .to_url(BASE);
        let pairs = query_pairs(&url);
        assert_eq!(pairs.len(), 13);
        assert_eq!(query_param(&url, "info_format").as_deref(), Some("text/html"));
        assert_eq!(query_param(&url, "crs").as_deref(), Some("EPSG:27700"));
    }
}
