//! Admin controller: list, add, edit and delete ROMs and tags.
//!
//! Every operation is a direct proxy to the API. Successful mutations
//! re-fetch the affected list; failures are logged and shown to the user
//! through [`Prompt::alert`], never returned.

use crate::prompt::Prompt;
use crate::view::{list_view, AdminRecord, FormView, ListView, RomForm, Tab, TagForm};
use romsite_core::logging::{log, LogCategory, LogLevel};
use romsite_core::{ApiClient, ApiError, Rom, Tag, Transport};

/// Result of a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The user declined a confirmation
    Cancelled,
    /// An alert was shown
    Failed,
}

/// The open add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor<R> {
    /// Record being edited; `None` while adding
    pub original: Option<R>,
}

/// List panel and form state for one record kind.
#[derive(Debug)]
pub struct Section<R> {
    pub list: ListView,
    pub editor: Option<Editor<R>>,
}

impl<R> Default for Section<R> {
    fn default() -> Self {
        Self {
            list: ListView::Pending,
            editor: None,
        }
    }
}

impl<R: AdminRecord> Section<R> {
    pub fn form(&self) -> Option<FormView> {
        self.editor
            .as_ref()
            .map(|editor| R::form_view(editor.original.as_ref()))
    }

    fn load<T: Transport>(&mut self, client: &ApiClient<T>) {
        self.list = match client.list::<R>() {
            Ok(records) => list_view(&records),
            Err(e) => {
                log(LogCategory::Admin, LogLevel::Error, || {
                    format!("Failed to load {}: {}", R::PLURAL, e)
                });
                ListView::Error(format!("Failed to load {}", R::PLURAL))
            }
        };
    }

    fn edit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        id: &str,
        prompt: &mut dyn Prompt,
    ) -> Outcome {
        match client.get::<R>(id) {
            Ok(record) => {
                self.editor = Some(Editor {
                    original: Some(record),
                });
                Outcome::Done
            }
            Err(e) => {
                log(LogCategory::Admin, LogLevel::Error, || {
                    format!("Failed to load {} {:?}: {}", R::NOUN, id, e)
                });
                prompt.alert(&format!("Failed to load {} for editing", R::NOUN));
                Outcome::Failed
            }
        }
    }

    fn submit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        form: &R::Form,
        prompt: &mut dyn Prompt,
    ) -> Outcome {
        let original = self.editor.as_ref().and_then(|e| e.original.as_ref());
        let body = R::payload(form, original);
        let result = match original {
            Some(record) => client.update::<R>(record.id(), &body),
            None => client.create::<R>(&body),
        };

        match result {
            Ok(_) => {
                self.editor = None;
                self.load(client);
                Outcome::Done
            }
            Err(e) => {
                log(LogCategory::Admin, LogLevel::Error, || {
                    format!("Failed to save {}: {}", R::NOUN, e)
                });
                let fallback = format!("Failed to save {}", R::NOUN);
                // A body that is not JSON gets the bare fallback
                let message = match &e {
                    ApiError::Status {
                        detail,
                        json_body: true,
                        ..
                    } => format!("Error: {}", detail.as_deref().unwrap_or(&fallback)),
                    _ => fallback,
                };
                prompt.alert(&message);
                Outcome::Failed
            }
        }
    }

    fn delete<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        id: &str,
        prompt: &mut dyn Prompt,
    ) -> Outcome {
        if !prompt.confirm(&format!("Are you sure you want to delete this {}?", R::NOUN)) {
            return Outcome::Cancelled;
        }

        match client.delete::<R>(id) {
            Ok(()) => {
                self.load(client);
                Outcome::Done
            }
            Err(e) => {
                log(LogCategory::Admin, LogLevel::Error, || {
                    format!("Failed to delete {} {:?}: {}", R::NOUN, id, e)
                });
                prompt.alert(&format!("Failed to delete {}", R::NOUN));
                Outcome::Failed
            }
        }
    }
}

/// Controller behind the admin page.
pub struct AdminController<T: Transport> {
    client: ApiClient<T>,
    active_tab: Tab,
    pub roms: Section<Rom>,
    pub tags: Section<Tag>,
}

impl<T: Transport> AdminController<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            client,
            active_tab: Tab::Roms,
            roms: Section::default(),
            tags: Section::default(),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Page load: fill both lists.
    pub fn init(&mut self) {
        self.load_roms();
        self.load_tags();
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn load_roms(&mut self) {
        self.roms.load(&self.client);
    }

    pub fn load_tags(&mut self) {
        self.tags.load(&self.client);
    }

    pub fn open_new_rom(&mut self) {
        self.roms.editor = Some(Editor { original: None });
    }

    pub fn open_new_tag(&mut self) {
        self.tags.editor = Some(Editor { original: None });
    }

    /// Fetch a ROM and open it in the edit form.
    pub fn edit_rom(&mut self, id: &str, prompt: &mut dyn Prompt) -> Outcome {
        self.roms.edit(&self.client, id, prompt)
    }

    pub fn edit_tag(&mut self, id: &str, prompt: &mut dyn Prompt) -> Outcome {
        self.tags.edit(&self.client, id, prompt)
    }

    pub fn close_rom_form(&mut self) {
        self.roms.editor = None;
    }

    pub fn close_tag_form(&mut self) {
        self.tags.editor = None;
    }

    pub fn rom_form(&self) -> Option<FormView> {
        self.roms.form()
    }

    pub fn tag_form(&self) -> Option<FormView> {
        self.tags.form()
    }

    /// PUT when a ROM is being edited, POST otherwise.
    pub fn submit_rom(&mut self, form: &RomForm, prompt: &mut dyn Prompt) -> Outcome {
        self.roms.submit(&self.client, form, prompt)
    }

    pub fn submit_tag(&mut self, form: &TagForm, prompt: &mut dyn Prompt) -> Outcome {
        self.tags.submit(&self.client, form, prompt)
    }

    pub fn delete_rom(&mut self, id: &str, prompt: &mut dyn Prompt) -> Outcome {
        self.roms.delete(&self.client, id, prompt)
    }

    pub fn delete_tag(&mut self, id: &str, prompt: &mut dyn Prompt) -> Outcome {
        self.tags.delete(&self.client, id, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::RecordingPrompt;
    use romsite_core::MemoryApi;

    #[test]
    fn test_new_controller_is_pending() {
        let controller = AdminController::new(ApiClient::new(MemoryApi::new()));
        assert_eq!(controller.roms.list, ListView::Pending);
        assert_eq!(controller.active_tab(), Tab::Roms);
        assert!(controller.rom_form().is_none());
    }

    #[test]
    fn test_tab_switching() {
        let mut controller = AdminController::new(ApiClient::new(MemoryApi::new()));
        controller.select_tab(Tab::Tags);
        assert_eq!(controller.active_tab(), Tab::Tags);
    }

    #[test]
    fn test_close_form_clears_editor() {
        let api = MemoryApi::new();
        api.insert_rom(Rom::new("sonic2", "Sonic 2", "/roms/sonic2.bin"));
        let mut controller = AdminController::new(ApiClient::new(&api));
        let mut prompt = RecordingPrompt::default();

        assert_eq!(controller.edit_rom("sonic2", &mut prompt), Outcome::Done);
        assert!(controller.rom_form().is_some());
        controller.close_rom_form();
        assert!(controller.rom_form().is_none());
    }

    #[test]
    fn test_server_detail_shown_in_alert() {
        let api = MemoryApi::new();
        let mut controller = AdminController::new(ApiClient::new(&api));
        let mut prompt = RecordingPrompt::default();

        controller.open_new_tag();
        let form = TagForm {
            id: String::new(),
            resource: "/sonic2".to_string(),
        };
        // The in-memory API reports a missing tag id as a string detail.
        assert_eq!(controller.submit_tag(&form, &mut prompt), Outcome::Failed);
        assert_eq!(prompt.alerts, vec!["Error: field required: id"]);
        assert!(controller.tag_form().is_some());
    }
}
