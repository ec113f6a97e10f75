//! Static overview of the soil data exposed by the BGS service.

use serde::{Serialize, Serializer};
use wms_common::crs::WELL_KNOWN_CRS;

/// Soil data themes published by the UKSO BGS service.
pub const SOIL_DATA_TYPES: [(&str, &str); 5] = [
    ("topsoil", "Top soil sample data and properties"),
    ("profile_soil", "Profile soil sample data from different depths"),
    ("soil_texture", "Soil texture classification and properties"),
    ("soil_depth", "Soil depth measurements from boreholes"),
    (
        "parent_material",
        "Soil parent material grain size and composition",
    ),
];

pub const COMMON_WORKFLOWS: [&str; 5] = [
    "1. Use list_layers() to discover available soil data layers",
    "2. Use describe_layer() to get details about specific layers",
    "3. Use get_map() to generate map images for visualization",
    "4. Use get_feature_info() to get detailed information at specific locations",
    "5. Use convert_coordinates() to work with different coordinate systems",
];

/// Result of the `get_soil_data_summary` tool.
///
/// The pair lists serialize as JSON objects in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct SoilDataSummary {
    #[serde(serialize_with = "ordered_map")]
    pub soil_data_types: &'static [(&'static str, &'static str)],
    #[serde(serialize_with = "ordered_map")]
    pub coordinate_systems: &'static [(&'static str, &'static str)],
    pub common_workflows: &'static [&'static str],
    pub service_url: String,
}

impl SoilDataSummary {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            soil_data_types: &SOIL_DATA_TYPES,
            coordinate_systems: &WELL_KNOWN_CRS,
            common_workflows: &COMMON_WORKFLOWS,
            service_url: service_url.into(),
        }
    }
}

fn ordered_map<S>(
    pairs: &&'static [(&'static str, &'static str)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(pairs.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_contents() {
        let summary = SoilDataSummary::new("https://example.com/wms");
        assert_eq!(summary.soil_data_types.len(), 5);
        assert_eq!(summary.coordinate_systems[1], ("EPSG:27700", "British National Grid (BNG)"));
        assert_eq!(summary.common_workflows.len(), 5);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["service_url"], "https://example.com/wms");
        assert_eq!(json["soil_data_types"]["soil_depth"], "Soil depth measurements from boreholes");
        assert_eq!(json["coordinate_systems"]["EPSG:3857"], "Web Mercator");
    }

    #[test]
    fn test_summary_keeps_declaration_order() {
        let text = serde_json::to_string(&SoilDataSummary::new("u")).unwrap();
        let position = |key: &str| text.find(&format!("\"{}\"", key)).unwrap();

        let types: Vec<usize> = SOIL_DATA_TYPES.iter().map(|(k, _)| position(k)).collect();
        assert!(types.windows(2).all(|w| w[0] < w[1]), "{}", text);
        assert!(position("EPSG:4326") < position("EPSG:27700"));
        assert!(position("EPSG:27700") < position("EPSG:3857"));
    }
}
