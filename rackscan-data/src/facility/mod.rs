//! HTTP [`FacilitySource`] backed by the bicycle-parking endpoint.
//!
//! Each sample point becomes one `GET {base_url}?Lat={lat}&Long={lon}`
//! request authenticated with an `AccountKey` header.
//!
//! # Example
//!
//! ```no_run
//! use rackscan_core::{FacilitySource, SamplePoint};
//! use rackscan_data::facility::{HttpFacilitySource, HttpFacilitySourceConfig};
//!
//! let source = HttpFacilitySource::with_config(HttpFacilitySourceConfig::new("my-key"))?;
//! let batch = source.facilities_near(&SamplePoint::new(1.3521, 103.8198))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod datamall;

use std::time::Duration;

use rackscan_core::{FacilitySource, RawFacilityBatch, SamplePoint, SourceError};
use url::Url;

use crate::client::{
    BlockingJsonClient, ClientBuildError, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, endpoint_url,
};
use datamall::ParkingResponse;

/// Default bicycle-parking endpoint.
pub const DEFAULT_FACILITY_URL: &str =
    "http://datamall2.mytransport.sg/ltaodataservice/BicycleParkingv2";

/// Header carrying the account credential.
const ACCOUNT_KEY_HEADER: &str = "AccountKey";

/// Configuration for [`HttpFacilitySource`].
#[derive(Clone)]
pub struct HttpFacilitySourceConfig {
    /// Endpoint queried for every sample point.
    pub base_url: String,
    /// Credential sent in the `AccountKey` header.
    pub account_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpFacilitySourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFacilitySourceConfig")
            .field("base_url", &self.base_url)
            .field("account_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpFacilitySourceConfig {
    /// Configuration for the default endpoint using `account_key`.
    #[must_use]
    pub fn new(account_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_FACILITY_URL.to_owned(),
            account_key: account_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Query a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
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

/// Facility source issuing one blocking HTTP request per sample point.
#[derive(Debug)]
pub struct HttpFacilitySource {
    client: BlockingJsonClient,
    config: HttpFacilitySourceConfig,
}

impl HttpFacilitySource {
    /// Create a source for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(account_key: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpFacilitySourceConfig::new(account_key))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpFacilitySourceConfig) -> Result<Self, ClientBuildError> {
        let client = BlockingJsonClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpFacilitySourceConfig {
        &self.config
    }

    fn request_url(&self, point: &SamplePoint) -> Result<Url, SourceError> {
        endpoint_url(
            &self.config.base_url,
            &[
                ("Lat", point.latitude.to_string()),
                ("Long", point.longitude.to_string()),
            ],
        )
    }
}

impl FacilitySource for HttpFacilitySource {
    fn facilities_near(&self, point: &SamplePoint) -> Result<RawFacilityBatch, SourceError> {
        let url = self.request_url(point)?;
        let response: ParkingResponse = self
            .client
            .get_json(&url, &[(ACCOUNT_KEY_HEADER, self.config.account_key.as_str())])?;
        Ok(response.into_batch())
    }
}
