//! Traced HTTP client for record store calls.
//!
//! Wraps `reqwest::Client`, opens an `outgoing_http` span per request and
//! stamps a W3C `traceparent` header so store-side logs can be correlated.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{Instrument, Level};

pub const TRACEPARENT: &str = "traceparent";

#[derive(Clone, Default)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Start a request; finish it with [`TracedClient::execute`].
    pub fn request(&self, method: reqwest::Method, url: url::Url) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = %req.method(),
            http.url = %req.url(),
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        );

        inject_traceparent(req.headers_mut());

        let response = self.inner.execute(req).instrument(span.clone()).await?;

        span.record("http.status_code", response.status().as_u16());
        Ok(response)
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

fn inject_traceparent(headers: &mut HeaderMap) {
    let trace_id = format!("{:032x}", rand::random::<u128>());
    let span_id = format!("{:016x}", rand::random::<u64>());
    let traceparent = format!("00-{trace_id}-{span_id}-01");

    if let Ok(value) = HeaderValue::from_str(&traceparent) {
        headers.insert(HeaderName::from_static(TRACEPARENT), value);
    }
}
