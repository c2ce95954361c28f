//! ROM site admin frontend
//!
//! CRUD screens for ROM and tag records. The controller talks to the site
//! API and produces view-models; the `render` module turns those into text
//! for the command-line frontend.

pub mod controller;
pub mod prompt;
pub mod render;
pub mod view;

pub use controller::{AdminController, Editor, Outcome, Section};
pub use prompt::{Prompt, RecordingPrompt, TerminalPrompt};
pub use view::{AdminRecord, FieldView, FormView, ItemView, ListView, RomForm, Tab, TagForm};
