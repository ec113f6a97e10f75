//! OGC WMS client-side protocol support.
//!
//! Supports:
//! - KVP request URLs for GetCapabilities, GetMap and GetFeatureInfo
//!   (WMS 1.1.1 `srs` and WMS 1.3.0 `crs` naming)
//! - Parsing WMS 1.3.0 capabilities documents into a layer catalog

pub mod capabilities;
pub mod getfeatureinfo;
pub mod getmap;
pub mod kvp;

pub use capabilities::{parse_capabilities, GetCapabilitiesRequest, WMS_NAMESPACE};
pub use getfeatureinfo::GetFeatureInfoRequest;
pub use getmap::GetMapRequest;
pub use kvp::{crs_param_key, LayerList, DEFAULT_VERSION, WMS_1_3_0};
