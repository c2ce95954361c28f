//! Standalone HTML rendering of the launch page.
//!
//! A rendered start page embeds its ROM as `window.ROM_DATA`, so the page
//! can be served as a static file and still boot without any API call.

use crate::emulator::{js_literal, LoaderPlan, CONTAINER_ID};
use crate::screen::{Screen, HELP_SECTIONS, HELP_TITLE};
use std::fmt::Write;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn start_panel(hidden: bool) -> String {
    let hidden = if hidden { " hidden" } else { "" };
    format!(
        "<div id=\"start-panel\" class=\"game-start\"{}>\n\
         <button id=\"start-game-btn\" class=\"start-button\">Play</button>\n\
         <button id=\"help-btn\" class=\"help-button\">Help</button>\n\
         </div>\n",
        hidden
    )
}

fn help_panel(hidden: bool) -> String {
    let mut out = String::new();
    let hidden = if hidden { " hidden" } else { "" };
    let _ = writeln!(out, "<div id=\"help-panel\" class=\"help-modal\"{}>", hidden);
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(HELP_TITLE));
    for section in HELP_SECTIONS {
        let _ = writeln!(
            out,
            "<p><strong>{}:</strong><br>{}</p>",
            escape_html(section.heading),
            escape_html(section.body)
        );
    }
    out.push_str("<button id=\"back-btn\" class=\"back-button\">Back</button>\n</div>\n");
    out
}

fn message_panel(heading: &str, message: &str) -> String {
    format!(
        "<div class=\"error-message\">\n<h2>{}</h2>\n<p>{}</p>\n</div>\n",
        escape_html(heading),
        escape_html(message)
    )
}

const LOADING_PANEL: &str =
    "<div class=\"loading\">\n<div class=\"loading-spinner\"></div>\n<p>Loading...</p>\n</div>\n";

/// Render `screen` as a complete HTML document.
///
/// `plan` is the loader configuration for the screen's ROM; on a start
/// screen it is wired to the Play button, on the loading screen it runs
/// straight away.
pub fn render_page(title: &str, screen: &Screen, plan: Option<&LoaderPlan>) -> String {
    let mut head = String::new();
    let mut body = String::new();
    let mut script = String::new();

    match screen {
        Screen::Idle => {}
        Screen::Loading => {
            body.push_str(LOADING_PANEL);
            if let Some(plan) = plan {
                script.push_str(&plan.to_script());
            }
        }
        Screen::GameStart { rom } | Screen::Help { rom } => {
            let on_help = matches!(screen, Screen::Help { .. });
            body.push_str(&start_panel(on_help));
            body.push_str(&help_panel(!on_help));

            let rom_json = serde_json::to_string(rom).unwrap_or_else(|_| "null".to_string());
            let _ = writeln!(script, "window.ROM_DATA = {};", rom_json.replace("</", "<\\/"));
            if let Some(plan) = plan {
                let _ = write!(
                    script,
                    "function romsiteBoot() {{\n\
                     document.getElementById({container}).innerHTML = {loading};\n\
                     {boot}}}\n",
                    container = js_literal(&CONTAINER_ID.into()),
                    loading = js_literal(&LOADING_PANEL.into()),
                    boot = plan.to_script(),
                );
                script.push_str(
                    "document.getElementById(\"start-game-btn\").addEventListener(\"click\", romsiteBoot);\n",
                );
            }
            script.push_str(
                "function romsiteShow(help) {\n\
                 document.getElementById(\"start-panel\").hidden = help;\n\
                 document.getElementById(\"help-panel\").hidden = !help;\n\
                 }\n\
                 document.getElementById(\"help-btn\").addEventListener(\"click\", function () { romsiteShow(true); });\n\
                 document.getElementById(\"back-btn\").addEventListener(\"click\", function () { romsiteShow(false); });\n",
            );
        }
        Screen::Redirecting { target } => {
            let _ = writeln!(
                head,
                "<meta http-equiv=\"refresh\" content=\"0; url={}\">",
                escape_html(target)
            );
            let _ = writeln!(
                script,
                "window.location.replace({});",
                js_literal(&target.as_str().into())
            );
        }
        Screen::NotFound { message } | Screen::Error { message } => {
            body.push_str(&message_panel("Error", message));
        }
        Screen::Player { mount_id } => {
            let _ = writeln!(body, "<div id=\"{}\"></div>", escape_html(mount_id));
        }
    }

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{}</title>", escape_html(title));
    page.push_str(&head);
    page.push_str("</head>\n<body>\n");
    let _ = writeln!(page, "<div id=\"{}\">", CONTAINER_ID);
    page.push_str(&body);
    page.push_str("</div>\n");
    if !script.is_empty() {
        let _ = write!(page, "<script>\n{}</script>\n", script);
    }
    page.push_str("</body>\n</html>\n");
    page
}
