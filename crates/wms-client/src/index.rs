//! Layer lookup over a capabilities snapshot.

use wms_common::{Capabilities, Layer};

/// First layer whose name matches exactly (case-sensitive).
pub fn find_layer<'a>(capabilities: &'a Capabilities, name: &str) -> Option<&'a Layer> {
    capabilities.layers.iter().find(|layer| layer.name == name)
}

/// Layers whose name, title or abstract contains `query`, ignoring case,
/// in catalog order. An empty query matches every layer.
pub fn search_layers<'a>(capabilities: &'a Capabilities, query: &str) -> Vec<&'a Layer> {
    let query_lower = query.to_lowercase();
    capabilities
        .layers
        .iter()
        .filter(|layer| layer.matches_query(&query_lower))
        .collect()
}
