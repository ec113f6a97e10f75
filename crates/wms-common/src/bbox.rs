//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::crs::EPSG_4326;

/// A geographic or projected bounding box tagged with its CRS.
///
/// Bound ordering is not checked: WMS 1.3.0 clients sometimes pass
/// lat/lon-first axes, so `min_x <= max_x` is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub crs: String,
}

impl BoundingBox {
    /// Create a new bounding box in EPSG:4326.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::with_crs(min_x, min_y, max_x, max_y, EPSG_4326)
    }

    /// Create a new bounding box in the given CRS.
    pub fn with_crs(
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        crs: impl Into<String>,
    ) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: crs.into(),
        }
    }

    /// Parse a WMS BBOX parameter string: "minx,miny,maxx,maxy"
    pub fn from_wms_string(s: &str, crs: impl Into<String>) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self::with_crs(
            parse(parts[0])?,
            parse(parts[1])?,
            parse(parts[2])?,
            parse(parts[3])?,
            crs,
        ))
    }

    /// Serialize as the WMS BBOX value, always in min_x,min_y,max_x,max_y order.
    ///
    /// Integral values keep a trailing `.0` (`-6.0`, not `-6`).
    pub fn to_wms_string(&self) -> String {
        format!(
            "{},{},{},{}",
            format_coord(self.min_x),
            format_coord(self.min_y),
            format_coord(self.max_x),
            format_coord(self.max_y)
        )
    }
}

fn format_coord(value: f64) -> String {
    let mut s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),
}
