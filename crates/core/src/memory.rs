//! In-memory stand-in for the site API.
//!
//! Answers the same routes with the same status codes and `detail` bodies as
//! the real server, and records every request it receives so callers can
//! assert on what went over the wire.

use crate::api::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::records::{Record, Rom, Tag};
use serde_json::{json, Map, Value};
use std::cell::{Cell, RefCell};

struct Collection {
    name: &'static str,
    noun: &'static str,
    /// Fields a create/update body must carry (besides `id`)
    fields: &'static [&'static str],
    /// Whether POST may omit `id` and let the server pick one
    server_assigns_id: bool,
    items: Vec<Map<String, Value>>,
}

impl Collection {
    fn position(&self, id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.get("id").and_then(Value::as_str) == Some(id))
    }

    fn not_found(&self) -> ApiResponse {
        detail(404, format!("{} not found", self.noun))
    }

    /// Lowercased name with non-alphanumerics collapsed to dashes
    fn assign_id(&self, item: &Map<String, Value>) -> String {
        let name = item.get("name").and_then(Value::as_str).unwrap_or("record");
        let mut slug = String::new();
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') && !slug.is_empty() {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-').to_string();
        let base = if slug.is_empty() { "record".to_string() } else { slug };

        let mut candidate = base.clone();
        let mut n = 2;
        while self.position(&candidate).is_some() {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        candidate
    }
}

fn detail(status: u16, message: impl Into<String>) -> ApiResponse {
    ApiResponse::new(status, json!({ "detail": message.into() }).to_string())
}

/// In-memory API. Single-threaded, like the pages it serves.
pub struct MemoryApi {
    collections: RefCell<Vec<Collection>>,
    requests: RefCell<Vec<ApiRequest>>,
    offline: Cell<bool>,
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryApi {
    pub fn new() -> Self {
        Self {
            collections: RefCell::new(vec![
                Collection {
                    name: Rom::COLLECTION,
                    noun: Rom::NOUN,
                    fields: &["name", "file"],
                    server_assigns_id: true,
                    items: Vec::new(),
                },
                Collection {
                    name: Tag::COLLECTION,
                    noun: "Tag",
                    fields: &["resource"],
                    server_assigns_id: false,
                    items: Vec::new(),
                },
            ]),
            requests: RefCell::new(Vec::new()),
            offline: Cell::new(false),
        }
    }

    /// Seed a ROM without going through the request log.
    pub fn insert_rom(&self, rom: Rom) {
        self.insert(Rom::COLLECTION, &rom);
    }

    pub fn insert_tag(&self, tag: Tag) {
        self.insert(Tag::COLLECTION, &tag);
    }

    pub fn roms(&self) -> Vec<Rom> {
        self.records(Rom::COLLECTION)
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.records(Tag::COLLECTION)
    }

    /// While offline every request fails at the transport level.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    fn insert<R: Record>(&self, collection: &str, record: &R) {
        let Ok(Value::Object(item)) = serde_json::to_value(record) else {
            return;
        };
        let mut collections = self.collections.borrow_mut();
        if let Some(c) = collections.iter_mut().find(|c| c.name == collection) {
            match c.position(record.id()) {
                Some(i) => c.items[i] = item,
                None => c.items.push(item),
            }
        }
    }

    fn records<R: Record>(&self, collection: &str) -> Vec<R> {
        let collections = self.collections.borrow();
        collections
            .iter()
            .find(|c| c.name == collection)
            .map(|c| {
                c.items
                    .iter()
                    .filter_map(|item| serde_json::from_value(Value::Object(item.clone())).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();
        let (collection, id) = match segments.as_slice() {
            ["api", collection] => (*collection, None),
            ["api", collection, id] => (*collection, Some(*id)),
            _ => return detail(404, "Not Found"),
        };

        let mut collections = self.collections.borrow_mut();
        let Some(c) = collections.iter_mut().find(|c| c.name == collection) else {
            return detail(404, "Not Found");
        };

        match (request.method, id) {
            (Method::Get, None) => {
                let items: Vec<Value> = c.items.iter().cloned().map(Value::Object).collect();
                ApiResponse::new(200, Value::Array(items).to_string())
            }
            (Method::Get, Some(id)) => match c.position(id) {
                Some(i) => ApiResponse::new(200, Value::Object(c.items[i].clone()).to_string()),
                None => c.not_found(),
            },
            (Method::Post, None) => {
                let mut item = match parse_body(request, c.fields) {
                    Ok(item) => item,
                    Err(response) => return response,
                };
                let id = match item.get("id").and_then(Value::as_str).filter(|id| !id.is_empty()) {
                    Some(id) => id.to_string(),
                    None if c.server_assigns_id => {
                        let id = c.assign_id(&item);
                        item.insert("id".to_string(), Value::String(id.clone()));
                        id
                    }
                    None => return detail(422, "field required: id"),
                };
                if c.position(&id).is_some() {
                    return detail(409, format!("{} already exists", c.noun));
                }
                c.items.push(item.clone());
                ApiResponse::new(200, Value::Object(item).to_string())
            }
            (Method::Put, Some(id)) => {
                let Some(i) = c.position(id) else {
                    return c.not_found();
                };
                let mut item = match parse_body(request, c.fields) {
                    Ok(item) => item,
                    Err(response) => return response,
                };
                item.insert("id".to_string(), Value::String(id.to_string()));
                c.items[i] = item.clone();
                ApiResponse::new(200, Value::Object(item).to_string())
            }
            (Method::Delete, Some(id)) => match c.position(id) {
                Some(i) => {
                    c.items.remove(i);
                    detail(200, format!("{} deleted", c.noun))
                }
                None => c.not_found(),
            },
            _ => detail(405, "Method Not Allowed"),
        }
    }
}

fn parse_body(
    request: &ApiRequest,
    fields: &[&str],
) -> Result<Map<String, Value>, ApiResponse> {
    let body = request.body.as_deref().unwrap_or("");
    let Ok(Value::Object(mut item)) = serde_json::from_str::<Value>(body) else {
        return Err(detail(422, "request body must be a JSON object"));
    };
    for field in fields {
        if !matches!(item.get(*field), Some(Value::String(_))) {
            return Err(detail(422, format!("field required: {}", field)));
        }
    }
    // Unknown fields are dropped, like a schema-validated server would.
    item.retain(|k, _| k == "id" || fields.contains(&k.as_str()));
    Ok(item)
}

impl Transport for MemoryApi {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.get() {
            return Err(TransportError::Request(format!(
                "{}: connection refused",
                request.path()
            )));
        }
        Ok(self.route(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(collection: &str, body: Value) -> ApiRequest {
        ApiRequest::new(Method::Post, collection, None).with_body(body.to_string())
    }

    #[test]
    fn test_post_assigns_rom_id_from_name() {
        let api = MemoryApi::new();
        let response = api
            .send(post("roms", json!({"name": "Sonic 2", "file": "/roms/sonic2.bin"})))
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(api.roms()[0].id, "sonic-2");

        api.send(post("roms", json!({"name": "Sonic 2", "file": "/roms/other.bin"})))
            .unwrap();
        assert_eq!(api.roms()[1].id, "sonic-2-2");
    }

    #[test]
    fn test_tag_post_requires_id() {
        let api = MemoryApi::new();
        let response = api.send(post("tags", json!({"resource": "/x"}))).unwrap();
        assert_eq!(response.status, 422);
        assert!(api.tags().is_empty());
    }

    #[test]
    fn test_duplicate_post_conflicts() {
        let api = MemoryApi::new();
        api.insert_tag(Tag::new("promo", "/sonic2"));
        let response = api
            .send(post("tags", json!({"id": "promo", "resource": "/x"})))
            .unwrap();
        assert_eq!(response.status, 409);
        assert_eq!(response.detail().as_deref(), Some("Tag already exists"));
    }

    #[test]
    fn test_unknown_route() {
        let api = MemoryApi::new();
        let response = api
            .send(ApiRequest::new(Method::Get, "saves", None))
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_requests_are_recorded_even_offline() {
        let api = MemoryApi::new();
        api.set_offline(true);
        assert!(api.send(ApiRequest::new(Method::Get, "roms", None)).is_err());
        assert_eq!(api.requests().len(), 1);
        api.clear_requests();
        assert!(api.last_request().is_none());
    }
}
