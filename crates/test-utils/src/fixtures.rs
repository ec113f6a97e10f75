//! Common test fixtures for soil-wms tests.
//!
//! The capabilities documents are trimmed-down versions of what the BGS
//! UKSO ArcGIS WMS endpoint returns.

/// Common bounding box definitions for testing, as (min_x, min_y, max_x, max_y).
pub mod bbox {
    /// Great Britain in WGS84 degrees
    pub const GREAT_BRITAIN: (f64, f64, f64, f64) = (-6.0, 50.0, 2.0, 58.0);

    /// Greater London in WGS84 degrees
    pub const LONDON: (f64, f64, f64, f64) = (-0.51, 51.28, 0.33, 51.69);

    /// Full British National Grid extent in metres
    pub const BNG_EXTENT: (f64, f64, f64, f64) = (0.0, 0.0, 700000.0, 1300000.0);

    /// Invalid bbox (min > max)
    pub const INVERTED: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

/// Common CRS identifiers.
pub mod crs {
    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// British National Grid
    pub const EPSG_27700: &str = "EPSG:27700";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";
}

/// Reference points for coordinate conversion tests, as (lon, lat).
pub mod points {
    /// Charing Cross, London
    pub const LONDON: (f64, f64) = (-0.1276, 51.5074);

    /// Keyworth (BGS headquarters)
    pub const KEYWORTH: (f64, f64) = (-1.0893, 52.8736);
}

/// Layer names present in [`capabilities::BGS_SOIL_1_3_0`].
pub mod layers {
    pub const SOIL_DEPTH: &str = "soil_depth";
    pub const GEOLOGY: &str = "geology";
    pub const TOPSOIL: &str = "topsoil";
    pub const PARENT_MATERIAL: &str = "parent_material";
    pub const PARENT_MATERIAL_GRAIN_SIZE: &str = "parent_material_grain_size";
    pub const UNTITLED: &str = "untitled_layer";

    /// All named layers in document order.
    pub const ALL: [&str; 6] = [
        SOIL_DEPTH,
        GEOLOGY,
        TOPSOIL,
        PARENT_MATERIAL,
        PARENT_MATERIAL_GRAIN_SIZE,
        UNTITLED,
    ];
}

/// GetCapabilities response documents.
pub mod capabilities {
    /// A WMS 1.3.0 capabilities document.
    ///
    /// The root layer has a title but no name. `parent_material` nests
    /// `parent_material_grain_size`. `untitled_layer` has no `Title`.
    pub const BGS_SOIL_1_3_0: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Service>
    <Name>WMS</Name>
    <Title>UKSO BGS Soil Data</Title>
    <Abstract>Soil properties &amp; parent material for Great Britain</Abstract>
    <OnlineResource xlink:type="simple" xlink:href="https://map.bgs.ac.uk/arcgis/services/UKSO/UKSO_BGS/MapServer/WMSServer"/>
  </Service>
  <Capability>
    <Request>
      <GetCapabilities>
        <Format>application/vnd.ogc.wms_xml</Format>
        <Format>text/xml</Format>
      </GetCapabilities>
      <GetMap>
        <Format>image/png</Format>
        <Format>image/jpeg</Format>
        <Format>image/gif</Format>
      </GetMap>
      <GetFeatureInfo>
        <Format>text/plain</Format>
        <Format>text/html</Format>
        <Format>text/xml</Format>
      </GetFeatureInfo>
    </Request>
    <Layer>
      <Title>UKSO_BGS</Title>
      <CRS>EPSG:4326</CRS>
      <CRS>EPSG:27700</CRS>
      <Layer queryable="1">
        <Name>soil_depth</Name>
        <Title>Soil Depth Data</Title>
        <Abstract>Depth to bedrock recorded in boreholes</Abstract>
        <CRS>EPSG:4326</CRS>
        <CRS>EPSG:27700</CRS>
        <CRS>EPSG:3857</CRS>
      </Layer>
      <Layer queryable="0">
        <Name>geology</Name>
        <Title>Bedrock Geology</Title>
        <CRS>EPSG:27700</CRS>
      </Layer>
      <Layer queryable="1">
        <Name>topsoil</Name>
        <Title>Topsoil Samples</Title>
        <Abstract><![CDATA[Top soil sample data & properties]]></Abstract>
        <CRS>EPSG:27700</CRS>
        <CRS>EPSG:27700</CRS>
      </Layer>
      <Layer>
        <Name>parent_material</Name>
        <Title>Parent Material</Title>
        <Layer queryable="1">
          <Name>parent_material_grain_size</Name>
          <Title>Parent Material Grain Size</Title>
          <CRS>EPSG:4326</CRS>
        </Layer>
      </Layer>
      <Layer>
        <Title>Nameless Group</Title>
      </Layer>
      <Layer queryable="true">
        <Name>untitled_layer</Name>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>
"#;

    /// A capabilities document with no Service block and no formats.
    pub const MINIMAL_1_3_0: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms">
  <Capability>
    <Layer>
      <Name>only_layer</Name>
    </Layer>
  </Capability>
</WMS_Capabilities>
"#;

    /// A WMS 1.1.1 style document without the WMS namespace.
    pub const UNNAMESPACED_1_1_1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMT_MS_Capabilities version="1.1.1">
  <Service>
    <Title>Legacy Service</Title>
  </Service>
  <Capability>
    <Request>
      <GetMap><Format>image/png</Format></GetMap>
    </Request>
    <Layer>
      <Name>legacy</Name>
      <Title>Legacy Layer</Title>
    </Layer>
  </Capability>
</WMT_MS_Capabilities>
"#;

    /// A document using an explicit `wms:` prefix for the WMS namespace.
    pub const PREFIXED_1_3_0: &str = r#"<?xml version="1.0"?>
<wms:WMS_Capabilities xmlns:wms="http://www.opengis.net/wms" version="1.3.0">
  <wms:Service><wms:Title>Prefixed</wms:Title></wms:Service>
  <wms:Capability>
    <wms:Layer queryable="1">
      <wms:Name>prefixed_layer</wms:Name>
      <wms:CRS>EPSG:27700</wms:CRS>
    </wms:Layer>
  </wms:Capability>
</wms:WMS_Capabilities>
"#;

    /// Truncated mid-document.
    pub const TRUNCATED: &str = r#"<?xml version="1.0"?>
<WMS_Capabilities xmlns="http://www.opengis.net/wms"><Capability><Layer><Name>half"#;

    /// Mismatched closing tag.
    pub const MISMATCHED: &str = r#"<WMS_Capabilities xmlns="http://www.opengis.net/wms"><Service><Title>x</Service></WMS_Capabilities>"#;

    /// An ArcGIS error page returned instead of XML.
    pub const NOT_XML: &str = "Service Unavailable";
}
