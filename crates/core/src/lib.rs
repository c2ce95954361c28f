//! Shared plumbing for the ROM site frontends: record types, the REST
//! client and its transports, settings, and diagnostic logging.

pub mod api;
pub mod http;
pub mod logging;
pub mod memory;
pub mod records;
pub mod settings;

pub use api::{ApiClient, ApiError, ApiRequest, ApiResponse, Method, Transport, TransportError};
pub use http::HttpTransport;
pub use memory::MemoryApi;
pub use records::{Record, Rom, RomDraft, Tag};
pub use settings::{EmulatorSettings, IdentifierSource, LaunchSettings, LookupStrategy, Settings};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_over_borrowed_transport() {
        let api = MemoryApi::new();
        api.insert_tag(Tag::new("promo", "https://example.com/promo"));

        let client = ApiClient::new(&api);
        let tags: Vec<Tag> = client.list().unwrap();
        assert_eq!(tags, vec![Tag::new("promo", "https://example.com/promo")]);
        assert_eq!(api.last_request().unwrap().path(), "/api/tags");
    }
}
