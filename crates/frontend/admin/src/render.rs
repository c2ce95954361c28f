//! Plain-text rendering of the admin view-models.

use crate::view::{FormView, ListView};
use std::fmt::Write;

pub fn render_list(heading: &str, list: &ListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", heading);
    match list {
        ListView::Pending => {
            let _ = writeln!(out, "  Loading...");
        }
        ListView::Empty(message) | ListView::Error(message) => {
            let _ = writeln!(out, "  {}", message);
        }
        ListView::Items(items) => {
            for item in items {
                let _ = writeln!(out, "  {}", item.title);
                let _ = writeln!(out, "    {}", item.subtitle);
            }
        }
    }
    out
}

pub fn render_form(form: &FormView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- {} --", form.title);
    for field in std::iter::once(&form.id).chain(form.fields.iter()) {
        if !field.visible {
            continue;
        }
        let lock = if field.disabled { " (locked)" } else { "" };
        let _ = writeln!(out, "  {}{}: {}", field.label, lock, field.value);
    }
    out
}
