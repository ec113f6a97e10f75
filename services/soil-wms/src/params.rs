//! Parameter contracts for each tool.
//!
//! Every struct deserializes from a flat JSON object; omitted fields take
//! the same defaults as the underlying WMS request builders.

use serde::{Deserialize, Serialize};

use wms_common::crs::EPSG_4326;
use wms_common::BoundingBox;
use wms_protocol::getfeatureinfo::{DEFAULT_FEATURE_COUNT, DEFAULT_INFO_FORMAT};
use wms_protocol::getmap::{DEFAULT_FORMAT, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wms_protocol::{GetFeatureInfoRequest, GetMapRequest, LayerList, DEFAULT_VERSION};

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_crs() -> String {
    EPSG_4326.to_string()
}

fn default_width() -> i64 {
    DEFAULT_WIDTH
}

fn default_height() -> i64 {
    DEFAULT_HEIGHT
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_info_format() -> String {
    DEFAULT_INFO_FORMAT.to_string()
}

fn default_feature_count() -> i64 {
    DEFAULT_FEATURE_COUNT
}

fn default_true() -> bool {
    true
}

/// `get_capabilities` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetCapabilitiesParams {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub force_refresh: bool,
}

impl Default for GetCapabilitiesParams {
    fn default() -> Self {
        Self {
            version: default_version(),
            force_refresh: false,
        }
    }
}

/// `get_map` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetMapParams {
    /// Layer name or list of names
    pub layers: LayerList,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    #[serde(default = "default_width")]
    pub width: i64,
    #[serde(default = "default_height")]
    pub height: i64,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_crs")]
    pub crs: String,
    #[serde(default = "default_true")]
    pub transparent: bool,
    #[serde(default = "default_version")]
    pub version: String,
}

impl GetMapParams {
    pub fn into_request(self) -> GetMapRequest {
        let bbox = BoundingBox::with_crs(self.min_x, self.min_y, self.max_x, self.max_y, &self.crs);
        GetMapRequest::new(self.layers, bbox)
            .with_size(self.width, self.height)
            .with_format(self.format)
            .with_version(self.version)
            .with_crs(self.crs)
            .with_transparent(self.transparent)
    }
}

/// `get_feature_info` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetFeatureInfoParams {
    /// Layer name or list of names
    pub layers: LayerList,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    /// Pixel column
    pub x: i64,
    /// Pixel row
    pub y: i64,
    #[serde(default = "default_width")]
    pub width: i64,
    #[serde(default = "default_height")]
    pub height: i64,
    #[serde(default = "default_info_format")]
    pub info_format: String,
    #[serde(default = "default_crs")]
    pub crs: String,
    #[serde(default = "default_feature_count")]
    pub feature_count: i64,
    #[serde(default = "default_version")]
    pub version: String,
}

impl GetFeatureInfoParams {
    pub fn into_request(self) -> GetFeatureInfoRequest {
        let bbox = BoundingBox::with_crs(self.min_x, self.min_y, self.max_x, self.max_y, &self.crs);
        GetFeatureInfoRequest::new(self.layers, bbox, self.x, self.y)
            .with_size(self.width, self.height)
            .with_info_format(self.info_format)
            .with_version(self.version)
            .with_crs(self.crs)
            .with_feature_count(self.feature_count)
    }
}

/// `list_layers` parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListLayersParams {
    #[serde(default)]
    pub search_query: Option<String>,
}

/// `describe_layer` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescribeLayerParams {
    pub layer_name: String,
}

/// `convert_coordinates` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertCoordinatesParams {
    pub x: f64,
    pub y: f64,
    pub source_crs: String,
    pub target_crs: String,
}

/// A point tagged with its CRS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsPoint {
    pub x: f64,
    pub y: f64,
    pub crs: String,
}

/// `convert_coordinates` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedCoordinates {
    pub source: CrsPoint,
    pub target: CrsPoint,
}
