//! Coordinate Reference System identifiers and the approximate
//! WGS84 / British National Grid converter.

use tracing::warn;

/// WGS84 geographic (lon/lat in degrees).
pub const EPSG_4326: &str = "EPSG:4326";

/// British National Grid (metres).
pub const EPSG_27700: &str = "EPSG:27700";

/// Web Mercator (metres).
pub const EPSG_3857: &str = "EPSG:3857";

/// Metres per degree used by the linear WGS84 <-> BNG approximation.
pub const METRES_PER_DEGREE: f64 = 111319.9;

/// Human-readable names for the CRS codes the BGS service is typically used with.
pub const WELL_KNOWN_CRS: [(&str, &str); 3] = [
    (EPSG_4326, "WGS84 Latitude/Longitude"),
    (EPSG_27700, "British National Grid (BNG)"),
    (EPSG_3857, "Web Mercator"),
];

/// Convert a point between two CRS codes.
///
/// Only EPSG:4326 <-> EPSG:27700 is supported, as a scalar scale by
/// [`METRES_PER_DEGREE`]. This is not a geodetic transform. Identical codes
/// are an identity; any other pair is passed through unchanged with a warning.
/// CRS codes are compared exactly (case-sensitive).
pub fn convert_coordinates(x: f64, y: f64, source_crs: &str, target_crs: &str) -> (f64, f64) {
    if source_crs == target_crs {
        return (x, y);
    }

    match (source_crs, target_crs) {
        (EPSG_4326, EPSG_27700) => (x * METRES_PER_DEGREE, y * METRES_PER_DEGREE),
        (EPSG_27700, EPSG_4326) => (x / METRES_PER_DEGREE, y / METRES_PER_DEGREE),
        _ => {
            warn!(
                source_crs = source_crs,
                target_crs = target_crs,
                "No conversion available from {} to {}",
                source_crs,
                target_crs
            );
            (x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_point_close;

    #[test]
    fn test_identity() {
        assert_eq!(
            convert_coordinates(3.5, -2.25, EPSG_3857, EPSG_3857),
            (3.5, -2.25)
        );
    }

    #[test]
    fn test_wgs84_to_bng() {
        let (x, y) = convert_coordinates(-0.1276, 51.5074, EPSG_4326, EPSG_27700);
        assert_eq!(x, -0.1276 * 111319.9);
        assert_eq!(y, 51.5074 * 111319.9);
        assert_point_close!((x, y), (-14204.41924, 5733798.61726), 1e-6);
    }

    #[test]
    fn test_bng_to_wgs84() {
        let (x, y) = convert_coordinates(111319.9, 222639.8, EPSG_27700, EPSG_4326);
        assert_eq!(x, 1.0);
        assert_eq!(y, 2.0);
    }

    #[test]
    fn test_unsupported_pair_passes_through() {
        assert_eq!(
            convert_coordinates(1.0, 2.0, EPSG_3857, EPSG_4326),
            (1.0, 2.0)
        );
    }

    #[test]
    fn test_crs_codes_are_case_sensitive() {
        assert_eq!(
            convert_coordinates(1.0, 2.0, "epsg:4326", EPSG_27700),
            (1.0, 2.0)
        );
    }
}
