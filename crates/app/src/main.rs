mod args;
mod terminal;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use args::{ArgsError, Command};
use checklist_core::model::ChecklistDraft;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, ChecklistService};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::i18n::{TextKey, text};
use ui::vm::map_checklist;
use ui::{App, Locale, UiApp, build_app_context};

const DEFAULT_CHECKLIST: &str = include_str!("../assets/default_checklist.json");

struct DesktopApp {
    title: String,
    locale: Locale,
    checklist: Arc<ChecklistService>,
}

impl UiApp for DesktopApp {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    fn checklist(&self) -> Arc<ChecklistService> {
        Arc::clone(&self.checklist)
    }
}

fn init_tracing() {
    // Logs go to stderr so `status` output stays clean on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn parse_checklist(json: &str) -> Result<ChecklistDraft, serde_json::Error> {
    serde_json::from_str(json)
}

fn load_checklist(path: Option<&Path>) -> Result<ChecklistDraft, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(parse_checklist(DEFAULT_CHECKLIST)?);
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read checklist {}: {e}", path.display()))?;
    let draft = parse_checklist(&raw)
        .map_err(|e| format!("invalid checklist {}: {e}", path.display()))?;
    Ok(draft)
}

/// Ask a yes/no question. Only `y` or `yes` (any case) confirm; an empty
/// answer or end of input declines.
fn confirm(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Reset progress once the user agreed. Returns whether the reset ran.
async fn reset_checklist(
    checklist: &ChecklistService,
    locale: Locale,
    yes: bool,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !yes && !confirm(text(locale, TextKey::ResetConfirm), input, &mut output)? {
        return Ok(false);
    }
    checklist.reset().await?;
    writeln!(output, "{}", text(locale, TextKey::ResetDone))?;
    Ok(true)
}

async fn print_status(checklist: &ChecklistService, locale: Locale) {
    let vm = map_checklist(&checklist.snapshot().await, locale);
    print!("{}", terminal::render_status(&vm));
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (cmd, parsed) = args::parse(std::env::args().skip(1), |name| std::env::var(name).ok())
        .map_err(|e| {
            eprintln!("{e}");
            args::print_usage();
            e
        })?;

    if cmd == Command::Help {
        args::print_usage();
        return Ok(());
    }

    init_tracing();

    // Parse the definition before creating the database file.
    let draft = load_checklist(parsed.checklist_path.as_deref())?;
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, draft, parsed.key.clone()).await?;
    let checklist = services.checklist();
    tracing::info!(db = %parsed.db_url, key = %parsed.key, "checklist opened");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                title: services.title().to_owned(),
                locale: parsed.locale,
                checklist,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(services.title())
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => {
            print_status(&checklist, parsed.locale).await;
            Ok(())
        }
        Command::Check(id) => {
            checklist.set_item_done(&id, true).await?;
            print_status(&checklist, parsed.locale).await;
            Ok(())
        }
        Command::Uncheck(id) => {
            checklist.set_item_done(&id, false).await?;
            print_status(&checklist, parsed.locale).await;
            Ok(())
        }
        Command::Master(id, value) => {
            checklist.set_master_done(&id, value).await?;
            print_status(&checklist, parsed.locale).await;
            Ok(())
        }
        Command::Reset { yes } => {
            let stdin = io::stdin();
            reset_checklist(&checklist, parsed.locale, yes, stdin.lock(), io::stdout()).await?;
            Ok(())
        }
        Command::Help => Ok(()),
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
