//! Common types shared by the soil-wms crates: the layer catalog model,
//! bounding boxes, CRS handling and the error taxonomy.

pub mod bbox;
pub mod capabilities;
pub mod crs;
pub mod error;
pub mod layer;

pub use bbox::BoundingBox;
pub use capabilities::Capabilities;
pub use crs::convert_coordinates;
pub use error::{WmsError, WmsResult};
pub use layer::Layer;
