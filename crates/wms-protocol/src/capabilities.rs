//! WMS GetCapabilities requests and response parsing.
//!
//! The parser is namespace-aware: only elements bound to [`WMS_NAMESPACE`]
//! are considered, so a document in another namespace (or none) parses to
//! an empty catalog rather than an error. Only malformed XML fails.

use chrono::Utc;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use tracing::debug;

use wms_common::capabilities::DEFAULT_SERVICE_TITLE;
use wms_common::{Capabilities, Layer, WmsError, WmsResult};

use crate::kvp::{build_url, DEFAULT_VERSION};

/// XML namespace of WMS 1.3.0 capabilities documents.
pub const WMS_NAMESPACE: &str = "http://www.opengis.net/wms";

/// GetCapabilities request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCapabilitiesRequest {
    pub version: String,
}

impl GetCapabilitiesRequest {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn to_url(&self, base_url: &str) -> String {
        build_url(
            base_url,
            [
                ("service", "WMS".to_string()),
                ("request", "GetCapabilities".to_string()),
                ("version", self.version.clone()),
            ],
        )
    }
}

impl Default for GetCapabilitiesRequest {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

/// Parse a capabilities document.
///
/// `version` is stamped onto the result as-is; it does not select a parse
/// path. `cached_at` is the time parsing finished.
pub fn parse_capabilities(xml: &[u8], version: &str) -> WmsResult<Capabilities> {
    let mut reader = NsReader::from_reader(xml);
    reader.trim_text(true);

    let mut parser = CapabilitiesParser::default();
    let mut saw_root = false;
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position();
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| parse_error(position, e))?;
        let in_wms = is_wms(&ns);

        match event {
            Event::Start(e) => {
                saw_root = true;
                parser.open(in_wms, &e).map_err(|e| parse_error(position, e))?;
            }
            Event::Empty(e) => {
                saw_root = true;
                parser.open(in_wms, &e).map_err(|e| parse_error(position, e))?;
                parser.close();
            }
            Event::End(_) => parser.close(),
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| parse_error(position, e))?;
                parser.text(&text);
            }
            Event::CData(t) => {
                let raw = t.into_inner();
                parser.text(&String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(WmsError::Parse("document has no root element".to_string()));
    }
    if !parser.stack.is_empty() {
        return Err(WmsError::Parse(format!(
            "unexpected end of document with {} unclosed element(s)",
            parser.stack.len()
        )));
    }

    let capabilities = parser.finish(version);
    debug!(
        layers = capabilities.layers.len(),
        formats = capabilities.formats.len(),
        "Parsed capabilities document"
    );
    Ok(capabilities)
}

fn is_wms(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WMS_NAMESPACE.as_bytes())
}

fn parse_error(position: usize, err: quick_xml::Error) -> WmsError {
    WmsError::Parse(format!("XML error near byte {}: {}", position, err))
}

/// Elements whose position in the tree matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Service,
    ServiceTitle,
    ServiceAbstract,
    GetMap,
    GetFeatureInfo,
    MapFormat,
    InfoFormat,
    Layer,
    LayerName,
    LayerTitle,
    LayerAbstract,
    LayerCrs,
    Other,
}

impl Node {
    fn captures_text(self) -> bool {
        matches!(
            self,
            Node::ServiceTitle
                | Node::ServiceAbstract
                | Node::MapFormat
                | Node::InfoFormat
                | Node::LayerName
                | Node::LayerTitle
                | Node::LayerAbstract
                | Node::LayerCrs
        )
    }
}

/// A layer whose end tag has not been seen yet.
#[derive(Debug, Default)]
struct OpenLayer {
    /// Index into `CapabilitiesParser::layer_slots`, fixed at the start tag
    /// so nested layers keep document (pre-)order.
    slot: usize,
    name: Option<String>,
    title: Option<String>,
    abstract_text: Option<String>,
    crs_list: Vec<String>,
    queryable: bool,
}

impl OpenLayer {
    fn into_layer(self) -> Option<Layer> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| name.clone());
        Some(Layer {
            name,
            title,
            abstract_text: self.abstract_text.filter(|a| !a.is_empty()),
            crs_list: self.crs_list,
            queryable: self.queryable,
        })
    }
}

#[derive(Debug, Default)]
struct CapabilitiesParser {
    stack: Vec<Node>,
    text: String,

    service_seen: bool,
    title: Option<String>,
    abstract_text: Option<String>,
    formats: Vec<String>,
    info_formats: Vec<String>,

    open_layers: Vec<OpenLayer>,
    layer_slots: Vec<Option<Layer>>,
}

impl CapabilitiesParser {
    fn open(&mut self, in_wms: bool, element: &BytesStart) -> Result<(), quick_xml::Error> {
        let parent = self.stack.last().copied();
        let node = if in_wms {
            self.classify(parent, element.local_name().as_ref())
        } else {
            Node::Other
        };

        match node {
            Node::Service => self.service_seen = true,
            Node::Layer => {
                let queryable = element
                    .try_get_attribute("queryable")?
                    .map(|attr| attr.value.as_ref() == b"1")
                    .unwrap_or(false);
                self.layer_slots.push(None);
                self.open_layers.push(OpenLayer {
                    slot: self.layer_slots.len() - 1,
                    queryable,
                    ..OpenLayer::default()
                });
            }
            _ => {}
        }

        if node.captures_text() {
            self.text.clear();
        }
        self.stack.push(node);
        Ok(())
    }

    fn classify(&self, parent: Option<Node>, local_name: &[u8]) -> Node {
        match (parent, local_name) {
            (_, b"Service") if !self.service_seen => Node::Service,
            (Some(Node::Service), b"Title") => Node::ServiceTitle,
            (Some(Node::Service), b"Abstract") => Node::ServiceAbstract,
            (_, b"GetMap") => Node::GetMap,
            (_, b"GetFeatureInfo") => Node::GetFeatureInfo,
            (Some(Node::GetMap), b"Format") => Node::MapFormat,
            (Some(Node::GetFeatureInfo), b"Format") => Node::InfoFormat,
            (_, b"Layer") => Node::Layer,
            (Some(Node::Layer), b"Name") => Node::LayerName,
            (Some(Node::Layer), b"Title") => Node::LayerTitle,
            (Some(Node::Layer), b"Abstract") => Node::LayerAbstract,
            (Some(Node::Layer), b"CRS") => Node::LayerCrs,
            _ => Node::Other,
        }
    }

    fn text(&mut self, text: &str) {
        if self.stack.last().is_some_and(|n| n.captures_text()) {
            self.text.push_str(text);
        }
    }

    fn close(&mut self) {
        let Some(node) = self.stack.pop() else {
            return;
        };
        let text = std::mem::take(&mut self.text).trim().to_string();

        match node {
            Node::ServiceTitle => {
                self.title.get_or_insert(text);
            }
            Node::ServiceAbstract => {
                self.abstract_text.get_or_insert(text);
            }
            Node::MapFormat if !text.is_empty() => self.formats.push(text),
            Node::InfoFormat if !text.is_empty() => self.info_formats.push(text),
            Node::Layer => {
                if let Some(open) = self.open_layers.pop() {
                    let slot = open.slot;
                    self.layer_slots[slot] = open.into_layer();
                }
            }
            Node::LayerName | Node::LayerTitle | Node::LayerAbstract | Node::LayerCrs => {
                if let Some(layer) = self.open_layers.last_mut() {
                    match node {
                        Node::LayerName => {
                            layer.name.get_or_insert(text);
                        }
                        Node::LayerTitle => {
                            layer.title.get_or_insert(text);
                        }
                        Node::LayerAbstract => {
                            layer.abstract_text.get_or_insert(text);
                        }
                        _ if !text.is_empty() => layer.crs_list.push(text),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn finish(self, version: &str) -> Capabilities {
        Capabilities {
            title: self
                .title
                .unwrap_or_else(|| DEFAULT_SERVICE_TITLE.to_string()),
            abstract_text: self.abstract_text.filter(|a| !a.is_empty()),
            version: version.to_string(),
            layers: self.layer_slots.into_iter().flatten().collect(),
            formats: self.formats,
            info_formats: self.info_formats,
            cached_at: Utc::now(),
        }
    }
}
