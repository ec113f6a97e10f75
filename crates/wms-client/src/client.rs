//! The WMS client façade.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use wms_common::{convert_coordinates, Capabilities, Layer, WmsError, WmsResult};
use wms_protocol::{
    parse_capabilities, GetCapabilitiesRequest, GetFeatureInfoRequest, GetMapRequest,
};

use crate::cache::CapabilitiesCache;
use crate::config::ClientConfig;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::index;

/// Client for one WMS endpoint.
///
/// Each instance owns its own capabilities cache and transport; share an
/// instance behind an `Arc` to share the cache.
pub struct WmsClient {
    config: ClientConfig,
    fetcher: Arc<dyn Fetcher>,
    cache: CapabilitiesCache,
}

impl WmsClient {
    /// Create a client that talks HTTP through reqwest.
    pub fn new(config: ClientConfig) -> WmsResult<Self> {
        let fetcher = HttpFetcher::new(config.request_timeout, config.connect_timeout)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_fetcher(config: ClientConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let cache = CapabilitiesCache::new(config.cache_ttl);
        Self {
            config,
            fetcher,
            cache,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Capabilities from cache, or fetched and parsed when the cache is
    /// empty, expired, or `force_refresh` is set.
    ///
    /// The cache ignores `version`: a warm entry fetched with another
    /// version is returned as-is. A failed fetch or parse leaves the cache
    /// unchanged.
    #[instrument(skip(self))]
    pub async fn get_capabilities(
        &self,
        version: &str,
        force_refresh: bool,
    ) -> WmsResult<Arc<Capabilities>> {
        if !force_refresh {
            if let Some(cached) = self.cache.get().await {
                return Ok(cached);
            }
        }

        let url = GetCapabilitiesRequest::new(version).to_url(&self.config.base_url);
        let body = self.fetcher.get(&url).await.map_err(|e| {
            error!(error = %e, "Error getting capabilities");
            e
        })?;

        let capabilities = parse_capabilities(&body, version).map_err(|e| {
            error!(error = %e, "Error parsing capabilities");
            e
        })?;
        let capabilities = Arc::new(capabilities);

        self.cache.set(capabilities.clone()).await;
        info!(
            version = version,
            layers = capabilities.layers.len(),
            "Fetched WMS capabilities"
        );
        Ok(capabilities)
    }

    /// Capabilities for the configured default version, cache permitting.
    pub async fn capabilities(&self) -> WmsResult<Arc<Capabilities>> {
        self.get_capabilities(&self.config.default_version, false)
            .await
    }

    /// GetMap URL for the request. No network access.
    pub fn get_map(&self, request: &GetMapRequest) -> String {
        request.to_url(&self.config.base_url)
    }

    /// Issue a GetFeatureInfo request and return the body uninterpreted.
    #[instrument(skip(self, request), fields(layers = %request.layers.to_param()))]
    pub async fn get_feature_info(&self, request: &GetFeatureInfoRequest) -> WmsResult<String> {
        let url = request.to_url(&self.config.base_url);
        let body = self.fetcher.get(&url).await.map_err(|e| {
            error!(error = %e, "Error getting feature info");
            e
        })?;

        String::from_utf8(body.to_vec()).map_err(|e| {
            error!(error = %e, "Feature info response is not UTF-8");
            WmsError::Parse(format!("feature info response is not valid UTF-8: {}", e))
        })
    }

    /// Every named layer in the cached catalog.
    pub async fn list_layers(&self) -> WmsResult<Vec<Layer>> {
        Ok(self.capabilities().await?.layers.clone())
    }

    /// Exact, case-sensitive lookup. `Ok(None)` when no layer has that name.
    pub async fn get_layer_by_name(&self, name: &str) -> WmsResult<Option<Layer>> {
        let capabilities = self.capabilities().await?;
        let layer = index::find_layer(&capabilities, name).cloned();
        if layer.is_none() {
            debug!(name = name, "Layer not found");
        }
        Ok(layer)
    }

    /// Case-insensitive substring search over name, title and abstract.
    pub async fn search_layers(&self, query: &str) -> WmsResult<Vec<Layer>> {
        let capabilities = self.capabilities().await?;
        Ok(index::search_layers(&capabilities, query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// See [`wms_common::convert_coordinates`].
    pub fn convert_coordinates(
        &self,
        x: f64,
        y: f64,
        source_crs: &str,
        target_crs: &str,
    ) -> (f64, f64) {
        convert_coordinates(x, y, source_crs, target_crs)
    }

    /// Drop the cached capabilities so the next lookup refetches.
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate().await;
    }

    /// Direct access to the cache, mainly for inspection.
    pub fn cache(&self) -> &CapabilitiesCache {
        &self.cache
    }
}
