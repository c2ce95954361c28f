//! REST client for the `/api/roms` and `/api/tags` collections.
//!
//! The client is a thin proxy: it builds requests, hands them to a
//! [`Transport`], and classifies the response. It keeps no state between
//! calls and never retries.

use crate::logging::{log, LogCategory, LogLevel};
use crate::records::Record;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A request relative to the API base URL.
///
/// `segments` are raw path segments (`["api", "roms", "sonic2"]`); the
/// transport is responsible for percent-encoding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    /// JSON body, if any
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, collection: &str, id: Option<&str>) -> Self {
        let mut segments = vec!["api".to_string(), collection.to_string()];
        if let Some(id) = id {
            segments.push(id.to_string());
        }
        Self {
            method,
            segments,
            body: None,
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Unencoded path, for diagnostics
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `detail` string of a JSON error body, if there is one.
    pub fn detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        value.get("detail")?.as_str().map(str::to_string)
    }
}

/// The request never produced an HTTP response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("invalid API base URL: {0}")]
    BaseUrl(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Anything that can carry an [`ApiRequest`] to the server.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{noun} \"{id}\" not found")]
    NotFound { noun: &'static str, id: String },
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        detail: Option<String>,
        /// Whether the error body parsed as JSON at all
        json_body: bool,
    },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Server-provided `detail` message, when the error carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Typed access to the site API.
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /api/{collection}`
    pub fn list<R: Record>(&self) -> Result<Vec<R>, ApiError> {
        let response = self.execute(ApiRequest::new(Method::Get, R::COLLECTION, None))?;
        let response = Self::require_success(response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// `GET /api/{collection}/{id}`; a 404 becomes [`ApiError::NotFound`].
    pub fn get<R: Record>(&self, id: &str) -> Result<R, ApiError> {
        let response = self.execute(ApiRequest::new(Method::Get, R::COLLECTION, Some(id)))?;
        if response.status == 404 {
            return Err(ApiError::NotFound {
                noun: R::NOUN,
                id: id.to_string(),
            });
        }
        let response = Self::require_success(response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Like [`get`](Self::get) but maps 404 to `None`.
    pub fn find<R: Record>(&self, id: &str) -> Result<Option<R>, ApiError> {
        match self.get(id) {
            Ok(record) => Ok(Some(record)),
            Err(ApiError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `POST /api/{collection}`.
    ///
    /// Any 2xx status is a success; the response body is not interpreted,
    /// so an empty `201` counts the same as one echoing the record.
    pub fn create<R: Record>(&self, body: &impl Serialize) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_string(body)?;
        let request = ApiRequest::new(Method::Post, R::COLLECTION, None).with_body(body);
        Self::require_success(self.execute(request)?)
    }

    /// `PUT /api/{collection}/{id}`. Success is judged like [`create`](Self::create).
    pub fn update<R: Record>(
        &self,
        id: &str,
        body: &impl Serialize,
    ) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_string(body)?;
        let request = ApiRequest::new(Method::Put, R::COLLECTION, Some(id)).with_body(body);
        Self::require_success(self.execute(request)?)
    }

    /// `DELETE /api/{collection}/{id}`. The response body is ignored.
    pub fn delete<R: Record>(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, R::COLLECTION, Some(id));
        Self::require_success(self.execute(request)?)?;
        Ok(())
    }

    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let label = request.to_string();
        log(LogCategory::Api, LogLevel::Debug, || label.clone());
        match self.transport.send(request) {
            Ok(response) => {
                log(LogCategory::Api, LogLevel::Trace, || {
                    format!("{} -> {}", label, response.status)
                });
                Ok(response)
            }
            Err(e) => {
                log(LogCategory::Api, LogLevel::Error, || {
                    format!("{} failed: {}", label, e)
                });
                Err(e.into())
            }
        }
    }

    fn require_success(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status,
                detail: response.detail(),
                json_body: serde_json::from_str::<serde_json::Value>(&response.body).is_ok(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryApi;
    use crate::records::{Rom, RomDraft, Tag};

    #[test]
    fn test_request_path() {
        let req = ApiRequest::new(Method::Delete, "roms", Some("sonic2"));
        assert_eq!(req.path(), "/api/roms/sonic2");
        assert_eq!(req.to_string(), "DELETE /api/roms/sonic2");
    }

    #[test]
    fn test_detail_extraction() {
        assert_eq!(
            ApiResponse::new(404, r#"{"detail":"ROM not found"}"#).detail(),
            Some("ROM not found".to_string())
        );
        assert_eq!(ApiResponse::new(500, "Internal Server Error").detail(), None);
        // Validation errors carry a list, not a string
        assert_eq!(
            ApiResponse::new(422, r#"{"detail":[{"msg":"field required"}]}"#).detail(),
            None
        );
    }

    #[test]
    fn test_create_then_get_roundtrip() {
        let client = ApiClient::new(MemoryApi::new());
        let response = client
            .create::<Rom>(&Rom::new("sonic2", "Sonic 2", "/roms/sonic2.bin"))
            .unwrap();
        assert!(response.is_success());

        let fetched: Rom = client.get("sonic2").unwrap();
        assert_eq!(fetched, Rom::new("sonic2", "Sonic 2", "/roms/sonic2.bin"));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let client = ApiClient::new(MemoryApi::new());
        let err = client.get::<Tag>("nope").unwrap_err();
        assert!(err.is_not_found());
        assert!(client.find::<Tag>("nope").unwrap().is_none());
    }

    #[test]
    fn test_update_and_delete() {
        let api = MemoryApi::new();
        api.insert_rom(Rom::new("sor", "Streets of Rage", "/roms/sor.md"));
        let client = ApiClient::new(&api);

        let draft = RomDraft {
            id: Some("sor".to_string()),
            name: "Streets of Rage 2".to_string(),
            file: "/roms/sor2.md".to_string(),
        };
        client.update::<Rom>("sor", &draft).unwrap();
        assert_eq!(api.roms()[0].name, "Streets of Rage 2");

        client.delete::<Rom>("sor").unwrap();
        let err = client.delete::<Rom>("sor").unwrap_err();
        match err {
            ApiError::Status {
                status,
                detail,
                json_body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(detail.as_deref(), Some("ROM not found"));
                assert!(json_body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Answers every request with a fixed response.
    struct Canned(u16, &'static str);

    impl Transport for Canned {
        fn send(&self, _request: ApiRequest) -> Result<ApiResponse, TransportError> {
            Ok(ApiResponse::new(self.0, self.1))
        }
    }

    #[test]
    fn test_empty_created_body_is_success() {
        let client = ApiClient::new(Canned(201, ""));
        let response = client.create::<Tag>(&Tag::new("promo", "/sonic2")).unwrap();
        assert_eq!(response.status, 201);
        assert!(client.update::<Tag>("promo", &Tag::new("promo", "/x")).is_ok());
    }

    #[test]
    fn test_plain_text_error_body() {
        let client = ApiClient::new(Canned(500, "Internal Server Error"));
        match client.create::<Rom>(&Rom::new("x", "X", "/x.bin")).unwrap_err() {
            ApiError::Status {
                status,
                detail,
                json_body,
            } => {
                assert_eq!(status, 500);
                assert_eq!(detail, None);
                assert!(!json_body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_propagates() {
        let api = MemoryApi::new();
        api.set_offline(true);
        let client = ApiClient::new(&api);
        assert!(matches!(
            client.list::<Rom>().unwrap_err(),
            ApiError::Transport(_)
        ));
    }
}
