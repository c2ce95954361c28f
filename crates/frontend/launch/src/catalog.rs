//! Record lookups used by the resolver.

use romsite_core::{ApiClient, ApiError, Rom, Tag, Transport};
use std::collections::HashMap;

/// Something that can answer "is there a ROM / tag with this id".
pub trait Lookup {
    fn rom(&self, id: &str) -> Result<Option<Rom>, ApiError>;
    fn tag(&self, id: &str) -> Result<Option<Tag>, ApiError>;
}

/// Snapshot of both collections taken at page initialisation.
///
/// Never updated in place: a refresh builds a new catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    roms: HashMap<String, Rom>,
    tags: HashMap<String, Tag>,
}

impl Catalog {
    pub fn new(roms: Vec<Rom>, tags: Vec<Tag>) -> Self {
        Self {
            roms: roms.into_iter().map(|r| (r.id.clone(), r)).collect(),
            tags: tags.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    /// Fetch both collections. Either failing fails the whole snapshot.
    pub fn fetch<T: Transport>(client: &ApiClient<T>) -> Result<Self, ApiError> {
        let roms = client.list::<Rom>()?;
        let tags = client.list::<Tag>()?;
        Ok(Self::new(roms, tags))
    }

    pub fn rom_count(&self) -> usize {
        self.roms.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

impl Lookup for Catalog {
    fn rom(&self, id: &str) -> Result<Option<Rom>, ApiError> {
        Ok(self.roms.get(id).cloned())
    }

    fn tag(&self, id: &str) -> Result<Option<Tag>, ApiError> {
        Ok(self.tags.get(id).cloned())
    }
}

/// Per-identifier lookups straight against the API (`GET /api/{kind}/{id}`).
pub struct DirectLookup<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> DirectLookup<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> Lookup for DirectLookup<'_, T> {
    fn rom(&self, id: &str) -> Result<Option<Rom>, ApiError> {
        self.client.find(id)
    }

    fn tag(&self, id: &str) -> Result<Option<Tag>, ApiError> {
        self.client.find(id)
    }
}
