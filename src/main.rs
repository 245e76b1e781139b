//! Entry point: workspace checks, dictionary export and the language server.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use nav_dictionary::Backend;
use nav_dictionary::checker::{
    CanonicalSource,
    CheckReport,
    FileOutcome,
    WorkspaceChecker,
};
use nav_dictionary::config::ConfigManager;
use nav_dictionary::nav::registry;
use tower_lsp::{
    LspService,
    Server,
};
use tracing_subscriber::EnvFilter;

/// Validated navigation dictionaries for localized documentation sidebars.
#[derive(Debug, Parser)]
#[command(name = "nav-dictionary", version, about)]
struct Cli {
    /// Defaults to `lsp`
    #[command(subcommand)]
    command: Option<Command>,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Check every locale navigation file of a workspace
    Check {
        /// Workspace root (defaults to the current directory)
        root: Option<PathBuf>,
    },
    /// Print a built-in dictionary as JSON, in menu order
    Export {
        /// Language code, e.g. `pt-br`
        language: String,
    },
    /// Serve the Language Server Protocol over stdio
    Lsp,
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout は LSP と export の出力専用
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Lsp) {
        Command::Check { root } => check(root).await,
        Command::Export { language } => export(&language),
        Command::Lsp => {
            serve().await;
            ExitCode::SUCCESS
        }
    }
}

/// `check` サブコマンド
async fn check(root: Option<PathBuf>) -> ExitCode {
    let root = match root.map_or_else(std::env::current_dir, Ok) {
        Ok(root) => root,
        Err(error) => {
            tracing::error!(%error, "Failed to resolve the workspace root");
            return ExitCode::FAILURE;
        }
    };

    let mut config_manager = ConfigManager::new();
    if let Err(error) = config_manager.load_settings(Some(root.clone())) {
        tracing::error!("{error}");
        return ExitCode::FAILURE;
    }

    let checker = match WorkspaceChecker::new(root.clone(), config_manager.get_settings().clone())
    {
        Ok(checker) => checker,
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    match checker.check().await {
        Ok(report) => {
            print_report(&root, &report);
            if report.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Prints one line per file, followed by the issues of failed files.
#[allow(clippy::print_stdout)]
fn print_report(root: &Path, report: &CheckReport) {
    let relative = |path: &Path| path.strip_prefix(root).unwrap_or(path).display().to_string();

    match &report.canonical {
        CanonicalSource::Workspace(path) => println!("canonical: {}", relative(path)),
        CanonicalSource::Builtin => println!("canonical: built-in table"),
    }

    for file in &report.files {
        let path = relative(&file.path);
        let language = file.language.as_deref().unwrap_or("?");
        match &file.outcome {
            FileOutcome::Valid { entries, missing } if missing.is_empty() => {
                println!("ok    {path} ({language}, {entries} entries)");
            }
            FileOutcome::Valid { entries, missing } => {
                println!(
                    "warn  {path} ({language}, {entries} entries, untranslated: {})",
                    missing.join(", ")
                );
            }
            FileOutcome::Invalid(error) => {
                println!("FAIL  {path} ({language})");
                for line in error.to_string().lines() {
                    println!("      {line}");
                }
            }
            FileOutcome::Unreadable(error) => {
                println!("FAIL  {path} ({language})");
                println!("      {error}");
            }
            FileOutcome::UnknownLanguage => {
                println!("FAIL  {path}");
                println!("      could not determine the language from the path");
            }
        }
    }

    let failures = report.failures().count();
    println!("{} file(s) checked, {failures} failed", report.files.len());
}

/// `export` サブコマンド
#[allow(clippy::print_stdout)]
fn export(language: &str) -> ExitCode {
    let json = registry::dictionary(language)
        .map_err(|error| error.to_string())
        .and_then(|dictionary| dictionary.to_json().map_err(|error| error.to_string()));

    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// `lsp` サブコマンド
async fn serve() {
    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());
    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
