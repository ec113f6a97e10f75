//! Key-value-pair encoding shared by all WMS request builders.

use serde::{Deserialize, Serialize};

/// WMS 1.3.0, the only version that names the CRS parameter `crs`.
pub const WMS_1_3_0: &str = "1.3.0";

pub const DEFAULT_VERSION: &str = WMS_1_3_0;

/// One layer name or an ordered list of them.
///
/// Deserializes from either a JSON string or a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerList {
    Single(String),
    Many(Vec<String>),
}

impl LayerList {
    /// Value of the `layers` parameter: lists are comma-joined in order,
    /// a single name passes through untouched.
    pub fn to_param(&self) -> String {
        match self {
            LayerList::Single(name) => name.clone(),
            LayerList::Many(names) => names.join(","),
        }
    }
}

impl From<&str> for LayerList {
    fn from(name: &str) -> Self {
        LayerList::Single(name.to_string())
    }
}

impl From<String> for LayerList {
    fn from(name: String) -> Self {
        LayerList::Single(name)
    }
}

impl From<Vec<String>> for LayerList {
    fn from(names: Vec<String>) -> Self {
        LayerList::Many(names)
    }
}

impl From<Vec<&str>> for LayerList {
    fn from(names: Vec<&str>) -> Self {
        LayerList::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for LayerList {
    fn from(names: &[&str]) -> Self {
        LayerList::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Name of the CRS parameter for a WMS version string.
///
/// Exactly `"1.3.0"` uses `crs`; every other string uses `srs`.
pub fn crs_param_key(version: &str) -> &'static str {
    if version == WMS_1_3_0 {
        "crs"
    } else {
        "srs"
    }
}

/// Append form-encoded parameters to a base service URL.
///
/// A base URL that already has a query keeps it and the new pairs follow.
pub fn build_url<'a, I>(base_url: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &value);
    }
    let query = serializer.finish();

    let separator = match base_url.find('?') {
        None => "?",
        Some(_) if base_url.ends_with('?') || base_url.ends_with('&') => "",
        Some(_) => "&",
    };

    format!("{}{}{}", base_url, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_list_param() {
        assert_eq!(LayerList::from("a").to_param(), "a");
        assert_eq!(LayerList::from(vec!["a", "b", "a"]).to_param(), "a,b,a");
        assert_eq!(LayerList::Many(vec![]).to_param(), "");
    }

    #[test]
    fn test_single_name_with_comma_passes_through() {
        assert_eq!(LayerList::from("a,b").to_param(), "a,b");
    }

    #[test]
    fn test_layer_list_deserializes_both_shapes() {
        let single: LayerList = serde_json::from_str("\"soil_depth\"").unwrap();
        assert_eq!(single, LayerList::Single("soil_depth".into()));

        let many: LayerList = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(many, LayerList::Many(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_crs_param_key() {
        assert_eq!(crs_param_key("1.3.0"), "crs");
        assert_eq!(crs_param_key("1.1.1"), "srs");
        assert_eq!(crs_param_key("1.1.0"), "srs");
        assert_eq!(crs_param_key("1.3"), "srs");
    }

    #[test]
    fn test_build_url_encodes() {
        let url = build_url(
            "https://example.com/wms",
            [("layers", "a,b".to_string()), ("crs", "EPSG:4326".to_string())],
        );
        assert_eq!(url, "https://example.com/wms?layers=a%2Cb&crs=EPSG%3A4326");
    }

    #[test]
    fn test_build_url_keeps_existing_query() {
        let url = build_url("https://example.com/wms?map=soil", [("x", "1".to_string())]);
        assert_eq!(url, "https://example.com/wms?map=soil&x=1");

        let url = build_url("https://example.com/wms?", [("x", "1".to_string())]);
        assert_eq!(url, "https://example.com/wms?x=1");
    }
}
