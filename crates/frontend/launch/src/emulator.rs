//! Configuration handed to the external EmulatorJS loader.
//!
//! The loader reads a fixed set of `window.EJS_*` globals when its script
//! runs, so they must all be set before the script tag is inserted.

use romsite_core::{EmulatorSettings, Rom};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

/// Loader script name inside the data directory
pub const LOADER_SCRIPT: &str = "loader.js";

/// Id of the element that holds the start screen and later the player
pub const CONTAINER_ID: &str = "game-container";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    pub player: String,
    pub core: String,
    pub game_url: String,
    pub game_name: String,
    pub data_path: String,
    pub language: String,
    pub color: String,
    pub start_on_loaded: bool,
    pub fullscreen_on_loaded: bool,
    pub buttons: Option<BTreeMap<String, bool>>,
}

impl EmulatorConfig {
    pub fn new(settings: &EmulatorSettings, rom: &Rom) -> Self {
        Self {
            player: settings.player.clone(),
            core: settings.core.clone(),
            game_url: rom.file.clone(),
            game_name: rom.name.clone(),
            data_path: settings.data_path.clone(),
            language: settings.language.clone(),
            color: settings.color.clone(),
            start_on_loaded: settings.start_on_loaded,
            fullscreen_on_loaded: settings.fullscreen_on_loaded,
            buttons: settings.buttons.clone(),
        }
    }

    /// Global name/value pairs, in the order they are assigned.
    pub fn globals(&self) -> Vec<(&'static str, Value)> {
        let mut globals = vec![
            ("EJS_player", Value::from(self.player.as_str())),
            ("EJS_core", Value::from(self.core.as_str())),
            ("EJS_gameUrl", Value::from(self.game_url.as_str())),
            ("EJS_gameName", Value::from(self.game_name.as_str())),
            ("EJS_pathtodata", Value::from(self.data_path.as_str())),
            ("EJS_startOnLoaded", Value::from(self.start_on_loaded)),
            ("EJS_fullscreenOnLoaded", Value::from(self.fullscreen_on_loaded)),
            ("EJS_language", Value::from(self.language.as_str())),
            ("EJS_color", Value::from(self.color.as_str())),
        ];
        if let Some(buttons) = &self.buttons {
            let map = buttons
                .iter()
                .map(|(name, shown)| (name.clone(), Value::from(*shown)))
                .collect();
            globals.push(("EJS_Buttons", Value::Object(map)));
        }
        globals
    }

    pub fn loader_url(&self) -> String {
        if self.data_path.is_empty() || self.data_path.ends_with('/') {
            format!("{}{}", self.data_path, LOADER_SCRIPT)
        } else {
            format!("{}/{}", self.data_path, LOADER_SCRIPT)
        }
    }

    /// Element id for the player selector (`#game` -> `game`)
    pub fn mount_id(&self) -> &str {
        self.player.strip_prefix('#').unwrap_or(&self.player)
    }
}

/// Everything needed to boot the emulator once "Play" is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderPlan {
    pub config: EmulatorConfig,
    /// Wait before inserting the loader script
    pub delay: Duration,
    pub script_src: String,
}

impl LoaderPlan {
    pub fn new(settings: &EmulatorSettings, rom: &Rom) -> Self {
        let config = EmulatorConfig::new(settings, rom);
        let script_src = config.loader_url();
        Self {
            config,
            delay: settings.injection_delay(),
            script_src,
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }

    /// JavaScript that sets the globals, then mounts the player and inserts
    /// the loader script (after `delay`, if any).
    pub fn to_script(&self) -> String {
        let mut js = String::new();
        for (name, value) in self.config.globals() {
            let _ = writeln!(js, "window.{} = {};", name, js_literal(&value));
        }

        let mount = format!("<div id=\"{}\"></div>", self.config.mount_id());
        let inject = format!(
            "var container = document.getElementById({container});\n\
             container.innerHTML = {mount};\n\
             var script = document.createElement(\"script\");\n\
             script.src = {src};\n\
             document.body.appendChild(script);\n",
            container = js_literal(&Value::from(CONTAINER_ID)),
            mount = js_literal(&Value::from(mount)),
            src = js_literal(&Value::from(self.script_src.as_str())),
        );

        if self.is_immediate() {
            js.push_str(&inject);
        } else {
            let _ = write!(
                js,
                "setTimeout(function () {{\n{}}}, {});\n",
                inject,
                self.delay.as_millis()
            );
        }
        js
    }
}

/// JSON is valid JavaScript; `</` is escaped so the literal can sit inside
/// a `<script>` element.
pub fn js_literal(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
