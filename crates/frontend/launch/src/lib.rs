//! Launch page logic for the ROM site.
//!
//! Works out which record a page address refers to, then either shows the
//! start screen for a ROM, follows a tag to its resource, or reports that
//! nothing matched. Booting a ROM hands a [`LoaderPlan`] to the page so the
//! EmulatorJS loader can be configured and inserted.

pub mod catalog;
pub mod emulator;
pub mod html;
pub mod identifier;
pub mod launcher;
pub mod resolver;
pub mod screen;

pub use catalog::{Catalog, DirectLookup, Lookup};
pub use emulator::{EmulatorConfig, LoaderPlan};
pub use html::render_page;
pub use launcher::{Effect, Launcher, PageContext};
pub use resolver::{resolve, Resolution};
pub use screen::Screen;
