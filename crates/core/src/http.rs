//! Blocking HTTP transport backed by reqwest.

use crate::api::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Create a transport rooted at `base` (e.g. `http://127.0.0.1:8000`).
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let base = Url::parse(base).map_err(|e| TransportError::BaseUrl(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(TransportError::BaseUrl(base.to_string()));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a request, with every segment percent-encoded.
    pub fn url_for(&self, request: &ApiRequest) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in &request.segments {
                path.push(segment);
            }
        }
        url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request);
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match request.body {
            Some(body) => builder.header(CONTENT_TYPE, "application/json").body(body),
            None => builder,
        };

        let response = builder
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(ApiResponse::new(status, body))
    }
}
