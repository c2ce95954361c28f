//! End-to-end admin flows against the in-memory API.

use romsite_admin::{AdminController, ListView, Outcome, RecordingPrompt, RomForm, TagForm};
use romsite_core::{
    ApiClient, ApiRequest, ApiResponse, MemoryApi, Method, Rom, Tag, Transport, TransportError,
};

fn controller(api: &MemoryApi) -> AdminController<&MemoryApi> {
    AdminController::new(ApiClient::new(api))
}

#[test]
fn test_empty_lists_show_placeholder() {
    let api = MemoryApi::new();
    let mut admin = controller(&api);
    admin.init();

    assert_eq!(
        admin.roms.list,
        ListView::Empty("No ROMs registered".to_string())
    );
    assert_eq!(
        admin.tags.list,
        ListView::Empty("No tags registered".to_string())
    );
}

#[test]
fn test_list_failure_shows_error_placeholder() {
    let api = MemoryApi::new();
    api.set_offline(true);
    let mut admin = controller(&api);
    admin.init();

    assert_eq!(
        admin.roms.list,
        ListView::Error("Failed to load ROMs".to_string())
    );
    assert_eq!(
        admin.tags.list,
        ListView::Error("Failed to load tags".to_string())
    );
    // One attempt each, no retry
    assert_eq!(api.requests().len(), 2);
}

#[test]
fn test_create_rom_then_fetch() {
    let api = MemoryApi::new();
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::default();

    admin.open_new_rom();
    let form = RomForm {
        id: "sonic2".to_string(),
        name: "Sonic 2".to_string(),
        file: "/roms/sonic2.bin".to_string(),
    };
    assert_eq!(admin.submit_rom(&form, &mut prompt), Outcome::Done);
    assert!(prompt.alerts.is_empty());
    assert!(admin.rom_form().is_none());

    let fetched: Rom = admin.client().get("sonic2").unwrap();
    assert_eq!(fetched, Rom::new("sonic2", "Sonic 2", "/roms/sonic2.bin"));

    // The list was re-fetched after the POST
    let methods: Vec<Method> = api.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![Method::Post, Method::Get, Method::Get]);
    assert_eq!(admin.roms.list.items().len(), 1);
    assert_eq!(admin.roms.list.items()[0].title, "Sonic 2");
}

#[test]
fn test_create_rom_from_form_omits_id() {
    let api = MemoryApi::new();
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::default();

    admin.open_new_rom();
    let form = RomForm {
        id: String::new(),
        name: "Golden Axe".to_string(),
        file: "/roms/goldenaxe.md".to_string(),
    };
    assert_eq!(admin.submit_rom(&form, &mut prompt), Outcome::Done);

    let post = &api.requests()[0];
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.path(), "/api/roms");
    let body: serde_json::Value = serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
    assert!(body.get("id").is_none());
}

#[test]
fn test_submit_while_editing_sends_put_to_original_id() {
    let api = MemoryApi::new();
    api.insert_rom(Rom::new("sonic2", "Sonic 2", "/roms/sonic2.bin"));
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::default();

    assert_eq!(admin.edit_rom("sonic2", &mut prompt), Outcome::Done);
    let form = admin.rom_form().unwrap();
    assert!(form.id.disabled);
    assert_eq!(form.id.value, "sonic2");

    api.clear_requests();
    let edited = RomForm {
        id: "sonic2".to_string(),
        name: "Sonic the Hedgehog 2".to_string(),
        file: "/roms/sonic2.bin".to_string(),
    };
    assert_eq!(admin.submit_rom(&edited, &mut prompt), Outcome::Done);

    let put = &api.requests()[0];
    assert_eq!(put.method, Method::Put);
    assert_eq!(put.path(), "/api/roms/sonic2");
    assert_eq!(api.roms()[0].name, "Sonic the Hedgehog 2");
    assert!(admin.rom_form().is_none());
}

#[test]
fn test_edit_missing_record_alerts_and_keeps_form_closed() {
    let api = MemoryApi::new();
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::default();

    assert_eq!(admin.edit_rom("ghost", &mut prompt), Outcome::Failed);
    assert_eq!(prompt.alerts, vec!["Failed to load ROM for editing"]);
    assert!(admin.rom_form().is_none());

    assert_eq!(admin.edit_tag("ghost", &mut prompt), Outcome::Failed);
    assert_eq!(prompt.alerts[1], "Failed to load tag for editing");
}

#[test]
fn test_save_error_reads_detail() {
    let api = MemoryApi::new();
    api.insert_tag(Tag::new("promo", "/sonic2"));
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::default();

    admin.open_new_tag();
    let form = TagForm {
        id: "promo".to_string(),
        resource: "/other".to_string(),
    };
    assert_eq!(admin.submit_tag(&form, &mut prompt), Outcome::Failed);
    assert_eq!(prompt.alerts, vec!["Error: Tag already exists"]);
    // The form stays open for another attempt
    assert!(admin.tag_form().is_some());
}

#[test]
fn test_save_transport_failure_uses_generic_message() {
    let api = MemoryApi::new();
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::default();

    api.set_offline(true);
    admin.open_new_rom();
    assert_eq!(
        admin.submit_rom(&RomForm::default(), &mut prompt),
        Outcome::Failed
    );
    assert_eq!(prompt.alerts, vec!["Failed to save ROM"]);
}

#[test]
fn test_delete_requires_confirmation() {
    let api = MemoryApi::new();
    api.insert_tag(Tag::new("promo", "/sonic2"));
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::answering([false]);

    assert_eq!(admin.delete_tag("promo", &mut prompt), Outcome::Cancelled);
    assert_eq!(
        prompt.confirmations,
        vec!["Are you sure you want to delete this tag?"]
    );
    assert!(api.requests().is_empty());
    assert_eq!(api.tags().len(), 1);
}

#[test]
fn test_delete_twice_alerts_without_panicking() {
    let api = MemoryApi::new();
    api.insert_rom(Rom::new("sonic2", "Sonic 2", "/roms/sonic2.bin"));
    let mut admin = controller(&api);
    let mut prompt = RecordingPrompt::answering([true, true]);

    assert_eq!(admin.delete_rom("sonic2", &mut prompt), Outcome::Done);
    assert_eq!(
        admin.roms.list,
        ListView::Empty("No ROMs registered".to_string())
    );

    assert_eq!(admin.delete_rom("sonic2", &mut prompt), Outcome::Failed);
    assert_eq!(prompt.alerts, vec!["Failed to delete ROM"]);
}

/// Forwards to the in-memory API, then swaps the answer to `method` requests
/// for a fixed status and body.
struct Reply<'a> {
    api: &'a MemoryApi,
    method: Method,
    status: u16,
    body: &'static str,
}

impl Transport for Reply<'_> {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = request.method;
        let response = self.api.send(request)?;
        if method == self.method {
            Ok(ApiResponse::new(self.status, self.body))
        } else {
            Ok(response)
        }
    }
}

#[test]
fn test_empty_created_body_counts_as_saved() {
    let api = MemoryApi::new();
    let transport = Reply {
        api: &api,
        method: Method::Post,
        status: 201,
        body: "",
    };
    let mut admin = AdminController::new(ApiClient::new(transport));
    let mut prompt = RecordingPrompt::default();

    admin.open_new_tag();
    let form = TagForm {
        id: "promo".to_string(),
        resource: "/sonic2".to_string(),
    };
    assert_eq!(admin.submit_tag(&form, &mut prompt), Outcome::Done);
    assert!(prompt.alerts.is_empty());
    assert!(admin.tag_form().is_none());
    assert_eq!(admin.tags.list.items().len(), 1);
    assert_eq!(admin.tags.list.items()[0].id, "promo");
}

#[test]
fn test_plain_text_error_uses_bare_fallback() {
    let api = MemoryApi::new();
    let transport = Reply {
        api: &api,
        method: Method::Put,
        status: 500,
        body: "Internal Server Error",
    };
    api.insert_rom(Rom::new("sonic2", "Sonic 2", "/roms/sonic2.bin"));
    let mut admin = AdminController::new(ApiClient::new(transport));
    let mut prompt = RecordingPrompt::default();

    assert_eq!(admin.edit_rom("sonic2", &mut prompt), Outcome::Done);
    let form = RomForm {
        id: "sonic2".to_string(),
        name: "Sonic 2".to_string(),
        file: "/roms/sonic2.bin".to_string(),
    };
    assert_eq!(admin.submit_rom(&form, &mut prompt), Outcome::Failed);
    assert_eq!(prompt.alerts, vec!["Failed to save ROM"]);
    assert!(admin.rom_form().is_some());
}
