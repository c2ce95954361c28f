//! Launch page controller.
//!
//! `init` runs once per page load and settles on one screen. The remaining
//! actions move between the start, help and player screens for the ROM that
//! was resolved. Side effects the controller cannot perform itself
//! (navigation, inserting the loader) are queued as [`Effect`]s for the UI
//! layer.

use crate::catalog::{Catalog, DirectLookup};
use crate::emulator::LoaderPlan;
use crate::identifier;
use crate::resolver::{resolve, Resolution};
use crate::screen::{not_found_message, Screen, LOAD_FAILED_MESSAGE};
use romsite_core::logging::{log, LogCategory, LogLevel};
use romsite_core::{
    ApiClient, ApiError, EmulatorSettings, LaunchSettings, LookupStrategy, Rom, Settings,
    Transport,
};
use url::Url;

/// What the page was loaded with
#[derive(Debug, Clone)]
pub struct PageContext {
    pub location: Url,
    /// Record rendered into the page ahead of time; skips the API entirely
    pub embedded: Option<Rom>,
}

impl PageContext {
    pub fn new(location: Url) -> Self {
        Self {
            location,
            embedded: None,
        }
    }

    pub fn with_embedded(mut self, rom: Rom) -> Self {
        self.embedded = Some(rom);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the page location with this resource, verbatim
    Navigate(String),
    /// Set the loader globals, wait, then insert the loader script
    BootEmulator(LoaderPlan),
}

pub struct Launcher {
    launch: LaunchSettings,
    emulator: EmulatorSettings,
    screen: Screen,
    effects: Vec<Effect>,
}

impl Launcher {
    pub fn new(settings: &Settings) -> Self {
        Self {
            launch: settings.launch.clone(),
            emulator: settings.emulator.clone(),
            screen: Screen::Loading,
            effects: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Drain the effects queued so far.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Resolve the page and show the resulting screen.
    pub fn init<T: Transport>(&mut self, page: &PageContext, client: &ApiClient<T>) -> &Screen {
        if let Some(rom) = &page.embedded {
            log(LogCategory::Launch, LogLevel::Debug, || {
                format!("using embedded ROM {:?}", rom.id)
            });
            self.screen = Screen::GameStart { rom: rom.clone() };
            return &self.screen;
        }

        let Some(id) = identifier::from_location(&page.location, &self.launch) else {
            self.screen = Screen::Idle;
            return &self.screen;
        };

        self.screen = Screen::Loading;
        self.screen = match self.lookup(&id, client) {
            Ok(Resolution::Game(rom)) => Screen::GameStart { rom },
            Ok(Resolution::Redirect(target)) => {
                self.effects.push(Effect::Navigate(target.clone()));
                Screen::Redirecting { target }
            }
            Ok(Resolution::NotFound(id)) => Screen::NotFound {
                message: not_found_message(&id),
            },
            Err(e) => {
                log(LogCategory::Launch, LogLevel::Error, || {
                    format!("failed to resolve {:?}: {}", id, e)
                });
                Screen::Error {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                }
            }
        };
        &self.screen
    }

    fn lookup<T: Transport>(&self, id: &str, client: &ApiClient<T>) -> Result<Resolution, ApiError> {
        match self.launch.strategy {
            LookupStrategy::Catalog => {
                let catalog = Catalog::fetch(client)?;
                resolve(id, &catalog)
            }
            LookupStrategy::Direct => resolve(id, &DirectLookup::new(client)),
        }
    }

    /// "Play" on the start screen. Returns false on any other screen.
    pub fn play(&mut self) -> bool {
        let Screen::GameStart { rom } = &self.screen else {
            return false;
        };
        let plan = LoaderPlan::new(&self.emulator, rom);
        log(LogCategory::Emulator, LogLevel::Info, || {
            format!(
                "booting {:?} ({}) on core {} after {} ms",
                rom.name,
                rom.file,
                plan.config.core,
                plan.delay.as_millis()
            )
        });
        self.effects.push(Effect::BootEmulator(plan));
        self.screen = Screen::Loading;
        true
    }

    /// The UI inserted the loader script after the plan's delay.
    pub fn player_mounted(&mut self, plan: &LoaderPlan) {
        self.screen = Screen::Player {
            mount_id: plan.config.mount_id().to_string(),
        };
    }

    pub fn help(&mut self) -> bool {
        let Screen::GameStart { rom } = &self.screen else {
            return false;
        };
        self.screen = Screen::Help { rom: rom.clone() };
        true
    }

    /// Leave the help screen for the start screen of the same ROM.
    pub fn back(&mut self) -> bool {
        let Screen::Help { rom } = &self.screen else {
            return false;
        };
        self.screen = Screen::GameStart { rom: rom.clone() };
        true
    }
}
