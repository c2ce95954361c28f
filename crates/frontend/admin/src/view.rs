//! View-models for the admin screens.
//!
//! The controller only ever produces these values; turning them into pixels,
//! HTML or terminal text is the job of whatever UI layer consumes them.

use romsite_core::{Record, Rom, RomDraft, Tag};
use serde_json::Value;

/// Admin tab identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Roms,
    Tags,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Roms => "ROMs",
            Tab::Tags => "Tags",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Roms, Tab::Tags]
    }
}

/// One row of a record list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// Id passed back to the edit and delete actions
    pub id: String,
    pub title: String,
    pub subtitle: String,
}

/// Contents of a list panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Nothing fetched yet
    Pending,
    /// The collection is empty
    Empty(String),
    /// The collection could not be fetched
    Error(String),
    Items(Vec<ItemView>),
}

impl ListView {
    pub fn items(&self) -> &[ItemView] {
        match self {
            ListView::Items(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub disabled: bool,
    pub visible: bool,
}

impl FieldView {
    fn input(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            name,
            label,
            value: value.to_string(),
            disabled: false,
            visible: true,
        }
    }
}

/// Modal add/edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub id: FieldView,
    pub fields: Vec<FieldView>,
}

/// Values typed into the ROM form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomForm {
    /// Only honoured when creating; an empty id lets the server pick one
    pub id: String,
    pub name: String,
    pub file: String,
}

/// Values typed into the tag form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagForm {
    pub id: String,
    pub resource: String,
}

/// Per-kind presentation and form handling for the admin screens.
pub trait AdminRecord: Record {
    type Form;

    fn item_view(&self) -> ItemView;

    /// Form for editing `original`, or for adding a record when `None`.
    fn form_view(original: Option<&Self>) -> FormView;

    /// Request body for submitting `form`.
    fn payload(form: &Self::Form, original: Option<&Self>) -> Value;
}

fn id_field(original: Option<&str>, visible_when_adding: bool) -> FieldView {
    match original {
        Some(id) => FieldView {
            disabled: true,
            ..FieldView::input("id", "ID", id)
        },
        None => FieldView {
            visible: visible_when_adding,
            ..FieldView::input("id", "ID", "")
        },
    }
}

impl AdminRecord for Rom {
    type Form = RomForm;

    fn item_view(&self) -> ItemView {
        ItemView {
            id: self.id.clone(),
            title: self.name.clone(),
            subtitle: format!("ID: {} | File: {}", self.id, self.file),
        }
    }

    fn form_view(original: Option<&Self>) -> FormView {
        let title = if original.is_some() { "Edit ROM" } else { "Add ROM" };
        FormView {
            title: title.to_string(),
            id: id_field(original.map(|r| r.id.as_str()), false),
            fields: vec![
                FieldView::input("name", "Name", original.map_or("", |r| r.name.as_str())),
                FieldView::input("file", "File", original.map_or("", |r| r.file.as_str())),
            ],
        }
    }

    fn payload(form: &RomForm, original: Option<&Self>) -> Value {
        let id = match original {
            Some(rom) => Some(rom.id.clone()),
            None if form.id.is_empty() => None,
            None => Some(form.id.clone()),
        };
        let draft = RomDraft {
            id,
            name: form.name.clone(),
            file: form.file.clone(),
        };
        serde_json::to_value(draft).unwrap_or(Value::Null)
    }
}

impl AdminRecord for Tag {
    type Form = TagForm;

    fn item_view(&self) -> ItemView {
        ItemView {
            id: self.id.clone(),
            title: self.id.clone(),
            subtitle: format!("Resource: {}", self.resource),
        }
    }

    fn form_view(original: Option<&Self>) -> FormView {
        let title = if original.is_some() { "Edit tag" } else { "Add tag" };
        FormView {
            title: title.to_string(),
            id: id_field(original.map(|t| t.id.as_str()), true),
            fields: vec![FieldView::input(
                "resource",
                "Resource",
                original.map_or("", |t| t.resource.as_str()),
            )],
        }
    }

    fn payload(form: &TagForm, original: Option<&Self>) -> Value {
        let id = original.map_or(form.id.as_str(), |t| t.id.as_str());
        serde_json::to_value(Tag::new(id, form.resource.as_str())).unwrap_or(Value::Null)
    }
}

/// Build the list panel for `records`.
pub fn list_view<R: AdminRecord>(records: &[R]) -> ListView {
    if records.is_empty() {
        ListView::Empty(format!("No {} registered", R::PLURAL))
    } else {
        ListView::Items(records.iter().map(AdminRecord::item_view).collect())
    }
}
