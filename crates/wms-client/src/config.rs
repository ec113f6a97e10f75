//! Client configuration.

use std::time::Duration;

/// Default endpoint: the BGS UKSO soil data ArcGIS WMS service.
pub const DEFAULT_BASE_URL: &str =
    "https://map.bgs.ac.uk/arcgis/services/UKSO/UKSO_BGS/MapServer/WMSServer";

/// How long a fetched capabilities document is served from cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Configuration for a [`crate::WmsClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WMS endpoint without request parameters
    pub base_url: String,
    /// Upper bound on a whole HTTP request
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Capabilities cache lifetime
    pub cache_ttl: Duration,
    /// Version used when a caller does not name one (layer lookups)
    pub default_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            cache_ttl: DEFAULT_CACHE_TTL,
            default_version: wms_protocol::DEFAULT_VERSION.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with environment variables.
    ///
    /// Environment variables:
    /// - BGS_WMS_URL
    /// - WMS_REQUEST_TIMEOUT_SECS (default: 30)
    /// - WMS_CONNECT_TIMEOUT_SECS (default: 10)
    /// - CAPABILITIES_CACHE_TTL_SECS (default: 3600)
    /// - WMS_DEFAULT_VERSION (default: 1.3.0)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            base_url: lookup("BGS_WMS_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            request_timeout: secs("WMS_REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            connect_timeout: secs("WMS_CONNECT_TIMEOUT_SECS", defaults.connect_timeout),
            cache_ttl: secs("CAPABILITIES_CACHE_TTL_SECS", defaults.cache_ttl),
            default_version: lookup("WMS_DEFAULT_VERSION")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.default_version),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.default_version, "1.3.0");
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BGS_WMS_URL", "http://localhost:8080/wms"),
            ("WMS_REQUEST_TIMEOUT_SECS", "5"),
            ("CAPABILITIES_CACHE_TTL_SECS", "120"),
            ("WMS_DEFAULT_VERSION", "1.1.1"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://localhost:8080/wms");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.cache_ttl, Duration::from_secs(120));
        assert_eq!(config.default_version, "1.1.1");
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = ClientConfig::from_lookup(|k| match k {
            "WMS_REQUEST_TIMEOUT_SECS" => Some("soon".to_string()),
            "BGS_WMS_URL" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config, ClientConfig::default());
    }
}
