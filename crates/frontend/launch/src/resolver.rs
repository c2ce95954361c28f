//! Identifier resolution.
//!
//! ROMs are checked before tags. When both kinds share an id the ROM wins
//! and the tag is never looked at.

use crate::catalog::Lookup;
use romsite_core::logging::{log, LogCategory, LogLevel};
use romsite_core::{ApiError, Rom};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Show the start screen for this ROM
    Game(Rom),
    /// Send the browser to this resource, unmodified
    Redirect(String),
    /// Neither a ROM nor a tag; carries the identifier
    NotFound(String),
}

pub fn resolve(identifier: &str, lookup: &impl Lookup) -> Result<Resolution, ApiError> {
    if let Some(rom) = lookup.rom(identifier)? {
        log(LogCategory::Launch, LogLevel::Debug, || {
            format!("{:?} is ROM {:?}", identifier, rom.name)
        });
        return Ok(Resolution::Game(rom));
    }

    if let Some(tag) = lookup.tag(identifier)? {
        log(LogCategory::Launch, LogLevel::Debug, || {
            format!("{:?} redirects to {}", identifier, tag.resource)
        });
        return Ok(Resolution::Redirect(tag.resource));
    }

    log(LogCategory::Launch, LogLevel::Warn, || {
        format!("no ROM or tag for {:?}", identifier)
    });
    Ok(Resolution::NotFound(identifier.to_string()))
}
