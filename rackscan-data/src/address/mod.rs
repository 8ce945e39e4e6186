//! HTTP [`AddressLookup`] backed by an address search endpoint.
//!
//! Queries are sent as
//! `GET {base_url}?searchVal={query}&returnGeom=Y&getAddrDetails=Y&pageNum=1`.

mod onemap;

use std::time::Duration;

use rackscan_core::{AddressInfo, AddressLookup, SourceError};
use url::Url;

use crate::client::{
    BlockingJsonClient, ClientBuildError, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, endpoint_url,
};
use onemap::SearchResponse;

/// Default address search endpoint.
pub const DEFAULT_ADDRESS_URL: &str = "https://www.onemap.gov.sg/api/common/elastic/search";

/// Configuration for [`HttpAddressLookup`].
#[derive(Debug, Clone)]
pub struct HttpAddressLookupConfig {
    /// Search endpoint.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpAddressLookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ADDRESS_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpAddressLookupConfig {
    /// Configuration targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Address lookup issuing one blocking HTTP request per query.
#[derive(Debug)]
pub struct HttpAddressLookup {
    client: BlockingJsonClient,
    config: HttpAddressLookupConfig,
}

impl HttpAddressLookup {
    /// Create a lookup for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ClientBuildError> {
        Self::with_config(HttpAddressLookupConfig::default())
    }

    /// Create a lookup with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpAddressLookupConfig) -> Result<Self, ClientBuildError> {
        let client = BlockingJsonClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpAddressLookupConfig {
        &self.config
    }

    fn request_url(&self, query: &str) -> Result<Url, SourceError> {
        endpoint_url(
            &self.config.base_url,
            &[
                ("searchVal", query.to_owned()),
                ("returnGeom", "Y".to_owned()),
                ("getAddrDetails", "Y".to_owned()),
                ("pageNum", "1".to_owned()),
            ],
        )
    }
}

impl AddressLookup for HttpAddressLookup {
    fn search(&self, query: &str) -> Result<Vec<AddressInfo>, SourceError> {
        let url = self.request_url(query)?;
        let response: SearchResponse = self.client.get_json(&url, &[])?;
        Ok(response.results.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests use expect for readable failures")]

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn request_url_carries_search_parameters() {
        let lookup = HttpAddressLookup::with_config(HttpAddressLookupConfig::new(
            "https://addresses.test/search",
        ))
        .expect("lookup should build");

        let url = lookup.request_url("000123").expect("valid url");

        assert_eq!(
            url.as_str(),
            "https://addresses.test/search?searchVal=000123&returnGeom=Y&getAddrDetails=Y&pageNum=1"
        );
    }

    #[rstest]
    fn default_config_targets_the_public_endpoint() {
        let config = HttpAddressLookupConfig::default();
        assert_eq!(config.base_url, DEFAULT_ADDRESS_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpAddressLookupConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");
        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
