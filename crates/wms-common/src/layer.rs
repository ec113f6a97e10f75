//! Layer definitions parsed from a WMS capabilities document.

use serde::{Deserialize, Serialize};

/// A named layer advertised by the WMS service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name used in GetMap/GetFeatureInfo requests (unique per catalog)
    pub name: String,

    /// Human-readable title, falls back to `name`
    pub title: String,

    /// Optional description
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Supported CRS codes in document order (duplicates kept)
    pub crs_list: Vec<String>,

    /// Whether GetFeatureInfo is supported
    pub queryable: bool,
}

impl Layer {
    /// Case-insensitive substring match against name, title and abstract.
    ///
    /// `query_lower` must already be lowercased.
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self.title.to_lowercase().contains(query_lower)
            || self
                .abstract_text
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(query_lower)
    }

    /// Check if this layer advertises a given CRS.
    pub fn supports_crs(&self, crs: &str) -> bool {
        self.crs_list.iter().any(|c| c == crs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str, title: &str, abstract_text: Option<&str>) -> Layer {
        Layer {
            name: name.to_string(),
            title: title.to_string(),
            abstract_text: abstract_text.map(str::to_string),
            crs_list: vec!["EPSG:4326".to_string(), "EPSG:27700".to_string()],
            queryable: true,
        }
    }

    #[test]
    fn test_matches_any_field() {
        let l = layer("soil_depth", "Soil Depth Data", Some("Borehole measurements"));
        assert!(l.matches_query("depth"));
        assert!(l.matches_query("soil"));
        assert!(l.matches_query("borehole"));
        assert!(!l.matches_query("geology"));
        assert!(l.matches_query(""));
    }

    #[test]
    fn test_missing_abstract_matches_as_empty() {
        let l = layer("geology", "Bedrock Geology", None);
        assert!(!l.matches_query("soil"));
        assert!(l.matches_query("bedrock"));
    }

    #[test]
    fn test_abstract_serializes_under_reserved_name() {
        let json = serde_json::to_value(layer("a", "A", Some("x"))).unwrap();
        assert_eq!(json["abstract"], "x");
        assert!(json.get("abstract_text").is_none());
    }

    #[test]
    fn test_supports_crs() {
        let l = layer("a", "A", None);
        assert!(l.supports_crs("EPSG:27700"));
        assert!(!l.supports_crs("EPSG:3857"));
    }
}
