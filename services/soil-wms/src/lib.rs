//! Soil WMS tool layer.
//!
//! Exposes each [`wms_client::WmsClient`] operation as a named tool with a
//! typed parameter struct, a JSON result and a structured error, ready to be
//! wrapped by a tool-calling protocol adapter.

pub mod params;
pub mod summary;
pub mod tools;

pub use tools::{SoilTools, ToolError};
