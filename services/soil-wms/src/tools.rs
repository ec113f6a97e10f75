//! Named tools over a shared [`WmsClient`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, instrument};

use wms_client::WmsClient;
use wms_common::{Capabilities, Layer, WmsError};

use crate::params::{
    ConvertCoordinatesParams, ConvertedCoordinates, CrsPoint, DescribeLayerParams,
    GetCapabilitiesParams, GetFeatureInfoParams, GetMapParams, ListLayersParams,
};
use crate::summary::SoilDataSummary;

/// JSON-RPC "method not found".
pub const METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC "internal error".
pub const INTERNAL_ERROR: i32 = -32603;

/// Tool names in registration order.
pub const TOOL_NAMES: [&str; 7] = [
    "get_capabilities",
    "get_map",
    "get_feature_info",
    "list_layers",
    "describe_layer",
    "convert_coordinates",
    "get_soil_data_summary",
];

/// Structured failure reported to tool callers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct ToolError {
    pub code: i32,
    pub message: String,
}

impl ToolError {
    pub fn unknown_tool(name: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Unknown tool: {}", name),
        }
    }
}

impl From<WmsError> for ToolError {
    fn from(err: WmsError) -> Self {
        Self {
            code: err.tool_error_code(),
            message: err.to_string(),
        }
    }
}

/// The soil WMS tools.
#[derive(Clone)]
pub struct SoilTools {
    client: Arc<WmsClient>,
}

impl SoilTools {
    pub fn new(client: Arc<WmsClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &WmsClient {
        &self.client
    }

    pub fn tool_names() -> &'static [&'static str] {
        &TOOL_NAMES
    }

    /// Invoke a tool by name with JSON arguments. `null` arguments are
    /// treated as an empty object.
    #[instrument(skip(self, args))]
    pub async fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let result = self.dispatch(name, args).await;
        if let Err(ref e) = result {
            error!(tool = name, code = e.code, "Tool call failed: {}", e.message);
        }
        result
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        match name {
            "get_capabilities" => to_json(&*self.get_capabilities(parse_args(args)?).await?),
            "get_map" => to_json(&self.get_map(parse_args(args)?)),
            "get_feature_info" => to_json(&self.get_feature_info(parse_args(args)?).await?),
            "list_layers" => to_json(&self.list_layers(parse_args(args)?).await?),
            "describe_layer" => to_json(&self.describe_layer(parse_args(args)?).await?),
            "convert_coordinates" => to_json(&self.convert_coordinates(parse_args(args)?)),
            "get_soil_data_summary" => to_json(&self.get_soil_data_summary()),
            _ => Err(ToolError::unknown_tool(name)),
        }
    }

    /// Service capabilities and available layers.
    pub async fn get_capabilities(
        &self,
        params: GetCapabilitiesParams,
    ) -> Result<Arc<Capabilities>, ToolError> {
        Ok(self
            .client
            .get_capabilities(&params.version, params.force_refresh)
            .await?)
    }

    /// URL of a map image for the given layers and extent.
    pub fn get_map(&self, params: GetMapParams) -> String {
        self.client.get_map(&params.into_request())
    }

    /// Feature information at a pixel of a map.
    pub async fn get_feature_info(&self, params: GetFeatureInfoParams) -> Result<String, ToolError> {
        Ok(self
            .client
            .get_feature_info(&params.into_request())
            .await?)
    }

    /// All layers, or those matching `search_query` when it is non-empty.
    pub async fn list_layers(&self, params: ListLayersParams) -> Result<Vec<Layer>, ToolError> {
        let layers = match params.search_query.as_deref() {
            Some(query) if !query.is_empty() => self.client.search_layers(query).await?,
            _ => self.client.list_layers().await?,
        };
        Ok(layers)
    }

    /// A single layer, `None` when the name is unknown.
    pub async fn describe_layer(
        &self,
        params: DescribeLayerParams,
    ) -> Result<Option<Layer>, ToolError> {
        Ok(self.client.get_layer_by_name(&params.layer_name).await?)
    }

    pub fn convert_coordinates(&self, params: ConvertCoordinatesParams) -> ConvertedCoordinates {
        let (x, y) = self.client.convert_coordinates(
            params.x,
            params.y,
            &params.source_crs,
            &params.target_crs,
        );
        ConvertedCoordinates {
            source: CrsPoint {
                x: params.x,
                y: params.y,
                crs: params.source_crs,
            },
            target: CrsPoint {
                x,
                y,
                crs: params.target_crs,
            },
        }
    }

    pub fn get_soil_data_summary(&self) -> SoilDataSummary {
        SoilDataSummary::new(self.client.base_url())
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ToolError::from(WmsError::from(e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError {
        code: INTERNAL_ERROR,
        message: format!("Failed to serialize tool result: {}", e),
    })
}
