//! Tool dispatch against a scripted WMS transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use soil_wms::{SoilTools, ToolError};
use test_utils::{capabilities as xml, query_param};
use tokio_test::assert_err;
use wms_client::{ClientConfig, Fetcher, WmsClient, WmsError, WmsResult};

const BASE: &str = "https://example.com/WMSServer";

/// Answers capabilities requests with a fixture and feature-info requests
/// with plain text, or fails every call.
struct FakeWms {
    fail: bool,
    urls: Mutex<Vec<String>>,
}

#[async_trait]
impl Fetcher for FakeWms {
    async fn get(&self, url: &str) -> WmsResult<Bytes> {
        self.urls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(WmsError::Transport("connection refused".to_string()));
        }
        if url.contains("request=GetFeatureInfo") {
            Ok(Bytes::from_static(b"Layer 'soil_depth'\n  Depth = '0.8'\n"))
        } else {
            Ok(Bytes::from_static(xml::BGS_SOIL_1_3_0.as_bytes()))
        }
    }
}

fn tools(fail: bool) -> (SoilTools, Arc<FakeWms>) {
    let fake = Arc::new(FakeWms {
        fail,
        urls: Mutex::new(Vec::new()),
    });
    let client = WmsClient::with_fetcher(ClientConfig::default().with_base_url(BASE), fake.clone());
    (SoilTools::new(Arc::new(client)), fake)
}

#[test]
fn test_tool_names() {
    assert_eq!(SoilTools::tool_names().len(), 7);
    assert_eq!(SoilTools::tool_names()[0], "get_capabilities");
}

#[tokio::test]
async fn test_get_capabilities_tool() {
    let (tools, _) = tools(false);
    let result = tools.call("get_capabilities", json!({})).await.unwrap();

    assert_eq!(result["title"], "UKSO BGS Soil Data");
    assert_eq!(result["version"], "1.3.0");
    assert_eq!(result["layers"].as_array().unwrap().len(), 6);
    assert_eq!(result["layers"][0]["abstract"], "Depth to bedrock recorded in boreholes");
    assert!(result["cached_at"].is_string());
}

#[tokio::test]
async fn test_get_map_tool_returns_url() {
    let (tools, fake) = tools(false);
    let result = tools
        .call(
            "get_map",
            json!({
                "layers": ["soil_depth", "geology"],
                "min_x": -6.0, "min_y": 50.0, "max_x": 2.0, "max_y": 58.0,
                "width": 400, "height": 300,
                "version": "1.1.1"
            }),
        )
        .await
        .unwrap();

    let url = result.as_str().unwrap();
    assert!(url.starts_with(BASE));
    assert_eq!(query_param(url, "layers").as_deref(), Some("soil_depth,geology"));
    assert_eq!(query_param(url, "srs").as_deref(), Some("EPSG:4326"));
    assert_eq!(query_param(url, "width").as_deref(), Some("400"));
    assert!(fake.urls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_feature_info_tool() {
    let (tools, fake) = tools(false);
    let result = tools
        .call(
            "get_feature_info",
            json!({
                "layers": "soil_depth",
                "min_x": -1.2, "min_y": 52.8, "max_x": -1.0, "max_y": 53.0,
                "x": 10, "y": 20
            }),
        )
        .await
        .unwrap();

    assert_eq!(result, json!("Layer 'soil_depth'\n  Depth = '0.8'\n"));
    let url = fake.urls.lock().unwrap().last().cloned().unwrap();
    assert_eq!(query_param(&url, "info_format").as_deref(), Some("text/plain"));
    assert_eq!(query_param(&url, "feature_count").as_deref(), Some("10"));
}

#[tokio::test]
async fn test_list_layers_tool() {
    let (tools, _) = tools(false);

    let all = tools.call("list_layers", json!({})).await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 6);

    let empty_query = tools
        .call("list_layers", json!({"search_query": ""}))
        .await
        .unwrap();
    assert_eq!(empty_query, all);

    let depth = tools
        .call("list_layers", json!({"search_query": "depth"}))
        .await
        .unwrap();
    assert_eq!(depth.as_array().unwrap().len(), 1);
    assert_eq!(depth[0]["name"], "soil_depth");
}

#[tokio::test]
async fn test_describe_layer_tool() {
    let (tools, _) = tools(false);

    let layer = tools
        .call("describe_layer", json!({"layer_name": "geology"}))
        .await
        .unwrap();
    assert_eq!(layer["title"], "Bedrock Geology");
    assert_eq!(layer["queryable"], false);

    let missing = tools
        .call("describe_layer", json!({"layer_name": "does_not_exist"}))
        .await
        .unwrap();
    assert!(missing.is_null());
}

#[tokio::test]
async fn test_convert_coordinates_tool() {
    let (tools, _) = tools(false);
    let result = tools
        .call(
            "convert_coordinates",
            json!({"x": -0.1276, "y": 51.5074, "source_crs": "EPSG:4326", "target_crs": "EPSG:27700"}),
        )
        .await
        .unwrap();

    assert_eq!(result["source"]["x"], -0.1276);
    assert_eq!(result["source"]["crs"], "EPSG:4326");
    assert_eq!(result["target"]["x"].as_f64().unwrap(), -0.1276 * 111319.9);
    assert_eq!(result["target"]["y"].as_f64().unwrap(), 51.5074 * 111319.9);
    assert_eq!(result["target"]["crs"], "EPSG:27700");
}

#[tokio::test]
async fn test_summary_tool_uses_configured_url() {
    let (tools, _) = tools(false);
    let result = tools.call("get_soil_data_summary", json!(null)).await.unwrap();
    assert_eq!(result["service_url"], BASE);
    assert!(result["coordinate_systems"]["EPSG:4326"].is_string());

    let types: Vec<&str> = result["soil_data_types"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        types,
        ["topsoil", "profile_soil", "soil_texture", "soil_depth", "parent_material"]
    );
}

#[tokio::test]
async fn test_transport_failure_is_structured_error() {
    let (tools, _) = tools(true);
    let err = assert_err!(tools.call("list_layers", json!({})).await);
    assert_eq!(err.code, -32000);
    assert!(err.message.contains("connection refused"));
}

#[tokio::test]
async fn test_invalid_arguments() {
    let (tools, fake) = tools(false);
    let err = assert_err!(tools.call("get_map", json!({"layers": "a"})).await);
    assert_eq!(err.code, -32602);
    assert!(fake.urls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_tool() {
    let (tools, _) = tools(false);
    let err = assert_err!(tools.call("delete_everything", json!({})).await);
    assert_eq!(err, ToolError::unknown_tool("delete_everything"));
}
