use anyhow::Result;
use clap::{Parser, Subcommand};
use romsite_admin::render::{render_form, render_list};
use romsite_admin::{AdminController, Outcome, Prompt, RomForm, Tab, TagForm, TerminalPrompt};
use romsite_core::logging::{LogConfig, LogLevel};
use romsite_core::{ApiClient, HttpTransport, Settings, Transport};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "romsite-admin", about = "Manage the ROMs and tags of a ROM site")]
struct Args {
    /// Settings file (defaults to config.json next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL, overriding the settings file
    #[arg(long)]
    api: Option<String>,

    /// Do not ask before deleting
    #[arg(long, short = 'y', default_value_t = false)]
    yes: bool,

    /// Diagnostic log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "error")]
    log_level: String,

    /// Write diagnostics to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// ROM records
    Roms {
        #[command(subcommand)]
        action: RomAction,
    },
    /// Tag records
    Tags {
        #[command(subcommand)]
        action: TagAction,
    },
}

#[derive(Subcommand)]
enum RomAction {
    List,
    Show {
        id: String,
    },
    Add {
        /// Let the server pick an id when omitted
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        file: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        file: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum TagAction {
    List,
    Show { id: String },
    Add { id: String, resource: String },
    Edit { id: String, resource: String },
    Delete { id: String },
}

fn run_roms<T: Transport>(
    controller: &mut AdminController<T>,
    action: RomAction,
    prompt: &mut dyn Prompt,
) -> Outcome {
    controller.select_tab(Tab::Roms);
    let outcome = match action {
        RomAction::List => {
            controller.load_roms();
            Outcome::Done
        }
        RomAction::Show { id } => {
            let outcome = controller.edit_rom(&id, prompt);
            if let Some(form) = controller.rom_form() {
                print!("{}", render_form(&form));
            }
            controller.close_rom_form();
            return outcome;
        }
        RomAction::Add { id, name, file } => {
            controller.open_new_rom();
            let form = RomForm {
                id: id.unwrap_or_default(),
                name,
                file,
            };
            controller.submit_rom(&form, prompt)
        }
        RomAction::Edit { id, name, file } => match controller.edit_rom(&id, prompt) {
            Outcome::Done => {
                let current = controller
                    .roms
                    .editor
                    .as_ref()
                    .and_then(|e| e.original.clone());
                let Some(current) = current else {
                    return Outcome::Failed;
                };
                let form = RomForm {
                    id: current.id,
                    name: name.unwrap_or(current.name),
                    file: file.unwrap_or(current.file),
                };
                controller.submit_rom(&form, prompt)
            }
            other => other,
        },
        RomAction::Delete { id } => controller.delete_rom(&id, prompt),
    };
    print!("{}", render_list(Tab::Roms.label(), &controller.roms.list));
    outcome
}

fn run_tags<T: Transport>(
    controller: &mut AdminController<T>,
    action: TagAction,
    prompt: &mut dyn Prompt,
) -> Outcome {
    controller.select_tab(Tab::Tags);
    let outcome = match action {
        TagAction::List => {
            controller.load_tags();
            Outcome::Done
        }
        TagAction::Show { id } => {
            let outcome = controller.edit_tag(&id, prompt);
            if let Some(form) = controller.tag_form() {
                print!("{}", render_form(&form));
            }
            controller.close_tag_form();
            return outcome;
        }
        TagAction::Add { id, resource } => {
            controller.open_new_tag();
            controller.submit_tag(&TagForm { id, resource }, prompt)
        }
        TagAction::Edit { id, resource } => match controller.edit_tag(&id, prompt) {
            Outcome::Done => controller.submit_tag(&TagForm { id, resource }, prompt),
            other => other,
        },
        TagAction::Delete { id } => controller.delete_tag(&id, prompt),
    };
    print!("{}", render_list(Tab::Tags.label(), &controller.tags.list));
    outcome
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let Some(level) = LogLevel::from_str(&args.log_level) else {
        anyhow::bail!("Unknown log level: {}", args.log_level);
    };
    let log_config = LogConfig::global();
    log_config.set_global_level(level);
    if let Some(path) = args.log_file.clone() {
        log_config.set_log_file(path)?;
    }

    let mut settings = Settings::load(args.config.as_deref());
    if let Some(api) = args.api {
        settings.api_base = api;
    }
    log::info!("Using API at {}", settings.api_base);

    let transport = HttpTransport::new(&settings.api_base, settings.timeout())?;
    let mut controller = AdminController::new(ApiClient::new(transport));

    let stdin = io::stdin();
    let mut prompt = TerminalPrompt::new(stdin.lock(), io::stderr(), args.yes);

    let outcome = match args.command {
        Command::Roms { action } => run_roms(&mut controller, action, &mut prompt),
        Command::Tags { action } => run_tags(&mut controller, action, &mut prompt),
    };

    match outcome {
        Outcome::Done => Ok(()),
        Outcome::Cancelled => {
            log::info!("Cancelled");
            Ok(())
        }
        Outcome::Failed => anyhow::bail!("Operation failed"),
    }
}
