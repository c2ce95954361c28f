use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use romsite_core::logging::{LogConfig, LogLevel};
use romsite_core::{ApiClient, HttpTransport, Rom, Settings};
use romsite_launch::{render_page, Effect, Launcher, LoaderPlan, PageContext, Screen};
use std::fs;
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(name = "romsite-launch", about = "Resolve ROM site pages and render launch pages")]
struct Args {
    /// Settings file (defaults to config.json next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL, overriding the settings file
    #[arg(long)]
    api: Option<String>,

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
    /// Print what a page address resolves to
    Resolve {
        url: String,
        /// ROM record (JSON) rendered into the page ahead of time
        #[arg(long)]
        embedded: Option<PathBuf>,
    },
    /// Render the launch page for an address as HTML
    Page {
        url: String,
        #[arg(long)]
        embedded: Option<PathBuf>,
        /// Write the page here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Render the page as it looks right after "Play"
        #[arg(long, default_value_t = false)]
        play: bool,
    },
}

fn page_context(url: &str, embedded: Option<PathBuf>) -> Result<PageContext> {
    let location = Url::parse(url).with_context(|| format!("Invalid page URL: {}", url))?;
    let mut page = PageContext::new(location);
    if let Some(path) = embedded {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let rom: Rom = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a ROM record", path.display()))?;
        page = page.with_embedded(rom);
    }
    Ok(page)
}

fn describe(screen: &Screen) -> String {
    match screen {
        Screen::Idle => "idle: no identifier on this page".to_string(),
        Screen::Loading => "loading".to_string(),
        Screen::GameStart { rom } | Screen::Help { rom } => {
            format!("game: {} ({}) file {}", rom.name, rom.id, rom.file)
        }
        Screen::Redirecting { target } => format!("redirect: {}", target),
        Screen::NotFound { message } => format!("not found: {}", message),
        Screen::Error { message } => format!("error: {}", message),
        Screen::Player { mount_id } => format!("player: #{}", mount_id),
    }
}

fn page_title(screen: &Screen) -> String {
    match screen.rom() {
        Some(rom) => rom.name.clone(),
        None => "ROMs".to_string(),
    }
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

    let client = ApiClient::new(HttpTransport::new(&settings.api_base, settings.timeout())?);
    let mut launcher = Launcher::new(&settings);

    match args.command {
        Command::Resolve { url, embedded } => {
            let page = page_context(&url, embedded)?;
            println!("{}", describe(launcher.init(&page, &client)));
            for effect in launcher.take_effects() {
                match effect {
                    Effect::Navigate(target) => println!("navigate: {}", target),
                    Effect::BootEmulator(plan) => println!("boot: {}", plan.script_src),
                }
            }
        }
        Command::Page {
            url,
            embedded,
            out,
            play,
        } => {
            let page = page_context(&url, embedded)?;
            launcher.init(&page, &client);
            let title = page_title(launcher.screen());

            let mut plan = launcher
                .screen()
                .rom()
                .map(|rom| LoaderPlan::new(&settings.emulator, rom));
            if play && launcher.play() {
                plan = launcher.take_effects().into_iter().find_map(|e| match e {
                    Effect::BootEmulator(plan) => Some(plan),
                    Effect::Navigate(_) => None,
                });
            }

            let html = render_page(&title, launcher.screen(), plan.as_ref());
            match out {
                Some(path) => {
                    fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
        }
    }

    Ok(())
}
