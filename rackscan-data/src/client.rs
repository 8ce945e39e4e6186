//! Blocking JSON client shared by the HTTP sources.
//!
//! The source traits are synchronous, so each source owns a
//! [`BlockingJsonClient`] that drives async `reqwest` calls on an internal
//! current-thread Tokio runtime. When invoked from inside a multi-threaded
//! runtime the caller's handle is reused via
//! [`tokio::task::block_in_place`] to avoid nested runtime panics.

use std::time::Duration;

use rackscan_core::SourceError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "rackscan/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failure to construct an HTTP source.
#[derive(Debug)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ClientBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ClientBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

pub(crate) struct BlockingJsonClient {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingJsonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingJsonClient")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BlockingJsonClient {
    pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// GET `url` with `headers` and decode the body as `T`.
    pub(crate) fn get_json<T>(&self, url: &Url, headers: &[(&str, &str)]) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        let future = self.get_json_async(url, headers);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    async fn get_json_async<T>(&self, url: &Url, headers: &[(&str, &str)]) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        let request = headers
            .iter()
            .fold(self.client.get(url.clone()), |request, (name, value)| {
                request.header(*name, *value)
            });
        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        serde_json::from_slice(&body).map_err(|err| SourceError::ParseError {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> SourceError {
        if error.is_timeout() {
            return SourceError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return SourceError::HttpError {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        SourceError::NetworkError {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Parse `base` and append `params` as query pairs.
pub(crate) fn endpoint_url(base: &str, params: &[(&str, String)]) -> Result<Url, SourceError> {
    Url::parse_with_params(base, params).map_err(|err| SourceError::InvalidUrl {
        url: base.to_owned(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests use expect for readable failures")]

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn endpoint_url_appends_query_pairs() {
        let url = endpoint_url(
            "http://example.com/search",
            &[("a", "1".to_owned()), ("b", "x y".to_owned())],
        )
        .expect("valid url");
        assert_eq!(url.as_str(), "http://example.com/search?a=1&b=x+y");
    }

    #[rstest]
    fn endpoint_url_keeps_existing_query() {
        let url = endpoint_url("http://example.com/search?fixed=1", &[("a", "2".to_owned())])
            .expect("valid url");
        assert_eq!(url.query(), Some("fixed=1&a=2"));
    }

    #[rstest]
    #[case("not a url")]
    #[case("")]
    #[case("/relative/path")]
    fn endpoint_url_rejects_invalid_bases(#[case] base: &str) {
        let err = endpoint_url(base, &[]).expect_err("invalid base");
        assert!(matches!(err, SourceError::InvalidUrl { url, .. } if url == base));
    }

    #[rstest]
    fn build_error_display_names_the_component() {
        let err = ClientBuildError::Runtime(std::io::Error::other("no threads"));
        assert_eq!(err.to_string(), "failed to build Tokio runtime: no threads");
        assert!(std::error::Error::source(&err).is_some());
    }
}
