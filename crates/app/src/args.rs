use std::fmt;
use std::path::PathBuf;

use checklist_core::model::{ItemId, MasterItemId};
use storage::repository::StorageKey;
use ui::Locale;

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingId { command: &'static str },
    UnknownArg(String),
    UnknownSubcommand(String),
    InvalidId { raw: String },
    InvalidSwitch { raw: String },
    InvalidDbUrl { raw: String },
    InvalidLocale { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingId { command } => write!(f, "{command} requires an id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownSubcommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidId { raw } => write!(f, "invalid id: {raw:?}"),
            ArgsError::InvalidSwitch { raw } => write!(f, "expected on or off, got {raw:?}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLocale { raw } => write!(f, "invalid --lang value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ui,
    Status,
    Check(ItemId),
    Uncheck(ItemId),
    Master(MasterItemId, bool),
    Reset { yes: bool },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub db_url: String,
    pub checklist_path: Option<PathBuf>,
    pub locale: Locale,
    pub key: StorageKey,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [ui]                        open the checklist window");
    eprintln!("  app status                      print progress");
    eprintln!("  app check <item-id>             mark an item done");
    eprintln!("  app uncheck <item-id>           mark an item not done");
    eprintln!("  app master <master-id> on|off   set every item of a section");
    eprintln!("  app reset [--yes]               clear all progress");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>      default sqlite://checklist.sqlite3");
    eprintln!("  --checklist <path>     checklist definition (JSON); built-in sample if omitted");
    eprintln!("  --lang <en|ko>         default en");
    eprintln!("  --key <storage-key>    default {}", StorageKey::DEFAULT);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CHECKLIST_DB_URL, CHECKLIST_FILE, CHECKLIST_LANG, CHECKLIST_STORAGE_KEY");
    eprintln!("  RUST_LOG (default warn)");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_switch(raw: String) -> Result<bool, ArgsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(ArgsError::InvalidSwitch { raw }),
    }
}

impl Args {
    /// Defaults overridden by environment values. Unparsable environment
    /// values are ignored.
    fn from_env(env: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_url: env("CHECKLIST_DB_URL")
                .map_or_else(|| "sqlite://checklist.sqlite3".into(), normalize_sqlite_url),
            checklist_path: env("CHECKLIST_FILE")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            locale: env("CHECKLIST_LANG")
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            key: env("CHECKLIST_STORAGE_KEY")
                .map(StorageKey::new)
                .unwrap_or_default(),
        }
    }
}

/// Parse the subcommand and options. `env` looks up environment fallbacks.
pub fn parse(
    argv: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(Command, Args), ArgsError> {
    let mut iter = argv.into_iter().peekable();
    let mut args = Args::from_env(&env);

    // Launching the UI is the default when no subcommand is provided.
    let mut command = match iter.peek().map(String::as_str) {
        None => Command::Ui,
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(_) => {
            let name = iter.next().unwrap_or_default();
            match name.as_str() {
                "ui" => Command::Ui,
                "status" => Command::Status,
                "check" => Command::Check(parse_item(&mut iter, "check")?),
                "uncheck" => Command::Uncheck(parse_item(&mut iter, "uncheck")?),
                "master" => {
                    let raw = iter.next().ok_or(ArgsError::MissingId { command: "master" })?;
                    let id = MasterItemId::new(&raw).map_err(|_| ArgsError::InvalidId { raw })?;
                    let value = parse_switch(require_value(&mut iter, "master")?)?;
                    Command::Master(id, value)
                }
                "reset" => Command::Reset { yes: false },
                "help" => Command::Help,
                _ => return Err(ArgsError::UnknownSubcommand(name)),
            }
        }
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(&mut iter, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                args.db_url = normalize_sqlite_url(value);
            }
            "--checklist" => {
                args.checklist_path = Some(PathBuf::from(require_value(&mut iter, "--checklist")?));
            }
            "--lang" => {
                let value = require_value(&mut iter, "--lang")?;
                args.locale = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidLocale { raw: value.clone() })?;
            }
            "--key" => {
                args.key = StorageKey::new(require_value(&mut iter, "--key")?);
            }
            "--yes" | "-y" if matches!(command, Command::Reset { .. }) => {
                command = Command::Reset { yes: true };
            }
            "--help" | "-h" => command = Command::Help,
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok((command, args))
}

fn parse_item(
    iter: &mut impl Iterator<Item = String>,
    command: &'static str,
) -> Result<ItemId, ArgsError> {
    let raw = iter.next().ok_or(ArgsError::MissingId { command })?;
    ItemId::new(&raw).map_err(|_| ArgsError::InvalidId { raw })
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_to_ui_with_defaults() {
        let (command, args) = parse(argv(&[]), no_env).unwrap();
        assert_eq!(command, Command::Ui);
        assert_eq!(args.db_url, "sqlite://checklist.sqlite3");
        assert_eq!(args.locale, Locale::En);
        assert_eq!(args.key, StorageKey::default());
        assert_eq!(args.checklist_path, None);
    }

    #[test]
    fn flags_without_subcommand_launch_ui() {
        let (command, args) = parse(argv(&["--lang", "ko", "--key", "run-2"]), no_env).unwrap();
        assert_eq!(command, Command::Ui);
        assert_eq!(args.locale, Locale::Ko);
        assert_eq!(args.key.as_str(), "run-2");
    }

    #[test]
    fn parses_item_and_master_commands() {
        let (command, _) = parse(argv(&["check", "act1-warden"]), no_env).unwrap();
        assert_eq!(command, Command::Check(ItemId::new("act1-warden").unwrap()));

        let (command, _) = parse(argv(&["uncheck", "act1-warden"]), no_env).unwrap();
        assert_eq!(command, Command::Uncheck(ItemId::new("act1-warden").unwrap()));

        let (command, _) = parse(argv(&["master", "master-act1", "off"]), no_env).unwrap();
        assert_eq!(
            command,
            Command::Master(MasterItemId::new("master-act1").unwrap(), false)
        );
    }

    #[test]
    fn reset_accepts_yes_flag_only_for_reset() {
        let (command, _) = parse(argv(&["reset", "--yes"]), no_env).unwrap();
        assert_eq!(command, Command::Reset { yes: true });

        let err = parse(argv(&["status", "--yes"]), no_env).unwrap_err();
        assert!(matches!(err, ArgsError::UnknownArg(arg) if arg == "--yes"));
    }

    #[test]
    fn environment_fills_in_defaults_and_flags_win() {
        let env = |name: &str| match name {
            "CHECKLIST_DB_URL" => Some("sqlite://from-env.sqlite3".to_string()),
            "CHECKLIST_LANG" => Some("ko".to_string()),
            "CHECKLIST_FILE" => Some("game.json".to_string()),
            _ => None,
        };
        let (_, args) = parse(argv(&["status", "--lang", "en"]), env).unwrap();
        assert_eq!(args.db_url, "sqlite://from-env.sqlite3");
        assert_eq!(args.locale, Locale::En);
        assert_eq!(args.checklist_path, Some(PathBuf::from("game.json")));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse(argv(&["check"]), no_env),
            Err(ArgsError::MissingId { command: "check" })
        ));
        assert!(matches!(
            parse(argv(&["master", "m", "maybe"]), no_env),
            Err(ArgsError::InvalidSwitch { .. })
        ));
        assert!(matches!(
            parse(argv(&["--lang", "fr"]), no_env),
            Err(ArgsError::InvalidLocale { .. })
        ));
        assert!(matches!(
            parse(argv(&["dance"]), no_env),
            Err(ArgsError::UnknownSubcommand(_))
        ));
        assert!(matches!(
            parse(argv(&["--db"]), no_env),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
    }
}
