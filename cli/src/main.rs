//! faultline CLI — inspect and validate exception template catalogs.
//!
//! # Commands
//! ```text
//! faultline list     --catalog <path.json> [--json]
//! faultline show     --catalog <path.json> --code <CODE> [--display <MSG>] [--status <N>] [--json]
//! faultline validate --catalog <path.json> [--catalog <more.json> ...]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use faultline_core::{Exception, StrManager};

mod logging;

use logging::{init_tracing, LogConfig};

#[derive(Parser)]
#[command(
    name = "faultline",
    about = "Inspect and validate exception template catalogs",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every template in a catalog, sorted by code
    List {
        /// Path to a JSON catalog
        #[arg(short, long)]
        catalog: PathBuf,
        /// Output one JSON view per line
        #[arg(long)]
        json: bool,
    },

    /// Show one template, optionally overriding fields on the fetched copy
    Show {
        /// Path to a JSON catalog
        #[arg(short, long)]
        catalog: PathBuf,
        /// Error code to look up
        #[arg(long)]
        code: String,
        /// Display message to set on the fetched copy
        #[arg(long)]
        display: Option<String>,
        /// Status code to set on the fetched copy
        #[arg(long)]
        status: Option<i64>,
        /// Output the JSON view
        #[arg(long)]
        json: bool,
    },

    /// Load catalogs into one registry, failing on duplicate codes
    Validate {
        /// Paths to JSON catalogs (repeatable)
        #[arg(short, long, required = true)]
        catalog: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&LogConfig {
        level: cli.log_level.clone(),
        json: cli.log_json,
    });

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::List { catalog, json } => cmd_list(&catalog, json),
        Commands::Show {
            catalog,
            code,
            display,
            status,
            json,
        } => cmd_show(&catalog, &code, display, status, json),
        Commands::Validate { catalog } => cmd_validate(&catalog),
    }
}

fn load(catalog: &Path) -> Result<StrManager> {
    let manager = StrManager::new();
    register(&manager, catalog)?;
    Ok(manager)
}

/// Load a catalog into `manager`. I/O and parse errors already name the
/// file; duplicate-code errors get the path attached here.
fn register(manager: &StrManager, catalog: &Path) -> Result<usize> {
    manager.load_file(catalog).map_err(|e| {
        if e.is_conflict() {
            anyhow::Error::new(e).context(format!("registering {}", catalog.display()))
        } else {
            e.into()
        }
    })
}

fn cmd_list(catalog: &Path, as_json: bool) -> Result<()> {
    let manager = load(catalog)?;
    let mut all = manager.get_all();
    all.sort_by(|a, b| a.err_code().cmp(b.err_code()));

    for exc in &all {
        if as_json {
            println!("{}", serde_json::to_string(&exc.view())?);
        } else {
            println!("{}", summary(exc));
        }
    }
    Ok(())
}

fn cmd_show(
    catalog: &Path,
    code: &str,
    display: Option<String>,
    status: Option<i64>,
    as_json: bool,
) -> Result<()> {
    let manager = load(catalog)?;
    let mut exc = manager
        .get(&code.to_string())
        .ok_or_else(|| anyhow!("code '{code}' not found in {}", catalog.display()))?;

    if let Some(display) = display {
        exc.set_display_message(display);
    }
    if let Some(status) = status {
        exc.set_status_code(status);
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&exc.view())?);
    } else {
        println!("{exc}");
        if !exc.display_message().is_empty() {
            println!("  display: {}", exc.display_message());
        }
        if !exc.err_type().is_empty() {
            println!("  type:    {}", exc.err_type());
        }
        if exc.status_code() != 0 {
            println!("  status:  {}", exc.status_code());
        }
        if !exc.metadata().is_empty() {
            println!("  meta:    {}", serde_json::to_string(exc.metadata())?);
        }
        if let Some(reason) = exc.reason() {
            println!("  reason:  {reason}");
        }
    }
    Ok(())
}

fn cmd_validate(catalogs: &[PathBuf]) -> Result<()> {
    tracing::debug!(catalogs = catalogs.len(), "validating catalogs");
    let manager = StrManager::new();
    for catalog in catalogs {
        let count = register(&manager, catalog)?;
        println!("✓ {} ({count} templates)", catalog.display());
    }
    println!("{} templates, no duplicate codes", manager.size());
    Ok(())
}

fn summary(exc: &Exception<String>) -> String {
    match exc.status_code() {
        0 => exc.to_string(),
        status => format!("[{status}] {exc}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summary_prefixes_status() {
        let exc = Exception::new_for_api("SERVER_ERROR".to_string(), "internal server error", 500);
        assert_eq!(summary(&exc), "[500] SERVER_ERROR: internal server error");
        let bare = Exception::new("E1".to_string(), "m1");
        assert_eq!(summary(&bare), "E1: m1");
    }

    #[test]
    fn read_failure_names_the_path_once() {
        let missing = Path::new("/no/such/catalog.json");
        let message = format!("{:#}", load(missing).unwrap_err());
        assert_eq!(message.matches("/no/such/catalog.json").count(), 1, "{message}");
    }

    #[test]
    fn conflict_names_the_catalog() {
        let path = std::env::temp_dir().join(format!("faultline-cli-dup-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"errorCode": "E1", "message": "m"}]"#).unwrap();

        let manager = StrManager::new();
        register(&manager, &path).unwrap();
        let message = format!("{:#}", register(&manager, &path).unwrap_err());
        std::fs::remove_file(&path).ok();

        assert_eq!(message.matches(&path.display().to_string()).count(), 1, "{message}");
        assert!(message.contains("exception (E1) already exists"));
    }

    #[test]
    fn validate_accepts_repeated_catalog_flag() {
        let cli = Cli::try_parse_from([
            "faultline", "validate", "--catalog", "a.json", "--catalog", "b.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate { catalog } => assert_eq!(catalog.len(), 2),
            _ => panic!("expected validate"),
        }
    }
}
