use std::fmt;

use services::{AppServices, Clock};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};

mod pages;
mod routes;

use routes::Route;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingCommand,
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingCommand => write!(f, "missing page or command"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [--db <sqlite_url>] <page> [action] [args...]");
    eprintln!("  app [--db <sqlite_url>] logout");
    eprintln!("  app [--db <sqlite_url>] seed");
    eprintln!();
    eprintln!("Pages:");
    eprintln!("  /            dashboard");
    eprintln!("  login        <email> <password> | register <email> <password> <name...>");
    eprintln!("  mcq          [topics | topic <name...>]");
    eprintln!("  subjective   [list [short|long] | show | add | edit | delete | prompts]");
    eprintln!("  syllabus     [show | toggle <unit-id> | docs]");
    eprintln!("  typing       [leaderboard | --language | --difficulty | --timed]");
    eprintln!("  routine      [show | add | edit | delete]");
    eprintln!("  resources    [list [category] | categories | add | delete]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://study.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_DB_URL, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Page(Route),
    Logout,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Self {
        match arg {
            "logout" => Self::Logout,
            "seed" => Self::Seed,
            other => Self::Page(Route::parse(other)),
        }
    }
}

struct Args {
    db_url: String,
    command: Command,
    rest: Vec<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut db_url = std::env::var("STUDY_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://study.sqlite3".into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(None),
                _ => {
                    return Ok(Some(Self {
                        db_url,
                        command: Command::from_arg(&arg),
                        rest: args.collect(),
                    }));
                }
            }
        }

        Err(ArgsError::MissingCommand)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.starts_with("sqlite:file:")
    {
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

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
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

    let path = std::path::Path::new(path);
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    log_fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };

    // Open + migrate SQLite at startup; the services restore the session.
    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;
    debug!(db_url = %parsed.db_url, command = ?parsed.command, "dispatching");

    match parsed.command {
        Command::Page(route) => pages::render(&app, route, &parsed.rest).await,
        Command::Logout => Ok(pages::logout(&app).await?),
        Command::Seed => Ok(pages::seed_demo_account(&app).await?),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(words: &[&str]) -> Result<Option<Args>, ArgsError> {
        let mut iter = words.iter().map(|w| (*w).to_owned());
        Args::parse(&mut iter)
    }

    #[test]
    fn db_flag_precedes_page() {
        let args = parse(&["--db", "sqlite::memory:", "/mcq", "topics"])
            .unwrap()
            .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.command, Command::Page(Route::Mcq));
        assert_eq!(args.rest, vec!["topics".to_owned()]);
    }

    #[test]
    fn unknown_word_is_not_found_page() {
        let args = parse(&["--db", "sqlite::memory:", "flashcards"]).unwrap().unwrap();
        assert_eq!(args.command, Command::Page(Route::NotFound));
    }

    #[test]
    fn missing_command_and_value_are_errors() {
        assert!(matches!(
            parse(&["--db", "sqlite::memory:"]),
            Err(ArgsError::MissingCommand)
        ));
        assert!(matches!(
            parse(&["--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("data/study.sqlite3".to_owned());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/study.sqlite3"));
        assert_eq!(
            normalize_sqlite_url("sqlite://already.db".to_owned()),
            "sqlite://already.db"
        );
    }
}
