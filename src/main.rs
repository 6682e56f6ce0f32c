#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use overlay_theme::constants::scale::SESSION_KEY;
use overlay_theme::theme::{list_available, serialize};
use overlay_theme::{DocumentShape, HostPaths, Platform, ThemeManager};

/// Inspect and switch overlay themes
#[derive(Debug, Parser)]
#[command(name = "overlay-theme", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List discovered theme packages
    List,
    /// Print the active theme as JSON
    Show {
        /// Single-level map instead of the grouped file layout
        #[arg(long)]
        flat: bool,
    },
    /// List fonts available to the renderer
    Fonts,
    /// Print the effective UI scale
    Scale {
        /// Session scale override
        #[arg(long)]
        session: Option<f32>,
    },
    /// Load a theme file and make it the saved theme
    Use { path: PathBuf },
    /// Write the active theme to PATH (default: the saved theme location)
    Save { path: Option<PathBuf> },
}

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    // stdout carries command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let paths = HostPaths::detect();
    let platform = Platform::detect();
    info!(?paths, ?platform, "Resolved host environment");

    let mut manager = ThemeManager::new(paths, platform);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::List => {
            for meta in list_available(manager.paths()) {
                writeln!(stdout, "{}\t{}", meta.name, meta.path.display())?;
            }
        }
        Command::Show { flat } => {
            let shape = if flat { DocumentShape::Flat } else { DocumentShape::Nested };
            serde_json::to_writer_pretty(&mut stdout, &serialize(manager.get(), shape))
                .context("Failed to serialize theme")?;
            writeln!(stdout)?;
        }
        Command::Fonts => {
            for name in manager.font_names() {
                writeln!(stdout, "{name}")?;
            }
        }
        Command::Scale { session } => {
            if let Some(scale) = session {
                manager.session_mut().set(SESSION_KEY, scale);
            }
            writeln!(stdout, "{}", manager.effective_scale())?;
        }
        Command::Use { path } => {
            let report = manager
                .load(&path)
                .with_context(|| format!("Failed to load theme {}", path.display()))?;
            for warning in report.warnings() {
                writeln!(stdout, "warning: {warning}")?;
            }
            manager.save_default();
            writeln!(stdout, "Using theme '{}'", manager.get().name)?;
        }
        Command::Save { path } => {
            let path = match path {
                Some(path) => {
                    manager.save(&path);
                    path
                }
                None => {
                    manager.save_default();
                    manager.paths().saved_theme()
                }
            };
            writeln!(stdout, "Wrote theme to {}", path.display())?;
        }
    }

    Ok(())
}
