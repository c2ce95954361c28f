//! Record kinds served by the site API.
//!
//! ROMs and tags live in separate collections but share the same REST shape,
//! so everything that talks to the API is written once against [`Record`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record kind with its own `/api/{collection}` endpoint.
pub trait Record: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    /// Collection segment under `/api/` (e.g. "roms")
    const COLLECTION: &'static str;
    /// Singular noun used in user-facing messages
    const NOUN: &'static str;
    /// Plural noun used in user-facing messages
    const PLURAL: &'static str;

    fn id(&self) -> &str;
}

/// A playable game image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rom {
    pub id: String,
    pub name: String,
    /// URL or site path of the ROM binary
    pub file: String,
}

impl Rom {
    pub fn new(id: impl Into<String>, name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file: file.into(),
        }
    }
}

impl Record for Rom {
    const COLLECTION: &'static str = "roms";
    const NOUN: &'static str = "ROM";
    const PLURAL: &'static str = "ROMs";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A named redirect to an internal path or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub resource: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource: resource.into(),
        }
    }
}

impl Record for Tag {
    const COLLECTION: &'static str = "tags";
    const NOUN: &'static str = "tag";
    const PLURAL: &'static str = "tags";

    fn id(&self) -> &str {
        &self.id
    }
}

/// ROM form payload. The id is only sent when editing an existing ROM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub file: String,
}

impl From<Rom> for RomDraft {
    fn from(rom: Rom) -> Self {
        Self {
            id: Some(rom.id),
            name: rom.name,
            file: rom.file,
        }
    }
}
