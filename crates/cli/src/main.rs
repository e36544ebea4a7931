mod commands;
mod menu;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use yatra_agents::TourismCompanion;
use yatra_core::{DEFAULT_BUDGET, DEFAULT_DAYS};
use yatra_ml::MlStack;
use yatra_observability::{init_tracing, AppMetrics};
use yatra_storage::Store;

#[derive(Debug, Parser)]
#[command(name = "yatra")]
#[command(about = "Smart tourism companion for Rajasthan")]
struct Cli {
    /// Where itineraries, translations and audio files are written.
    #[arg(long, env = "YATRA_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Dashboard folders are created under this directory, relative to the output dir.
    #[arg(long, env = "YATRA_DASHBOARD_ROOT", default_value = "dashboards")]
    dashboard_root: PathBuf,

    /// Print subcommand results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive menu (default).
    Menu,
    Plan {
        #[arg(long, default_value_t = DEFAULT_BUDGET)]
        budget: u32,
        /// Clamped to 1..=30.
        #[arg(long, default_value_t = i64::from(DEFAULT_DAYS), allow_negative_numbers = true)]
        days: i64,
        #[arg(long)]
        interests: Option<String>,
    },
    Translate {
        #[arg(long, default_value = "hi")]
        lang: String,
        #[arg(long)]
        save: bool,
        #[arg(long)]
        audio: bool,
        text: String,
    },
    Speak {
        #[arg(long, default_value = "en")]
        lang: String,
        file: PathBuf,
    },
    Dashboard {
        #[arg(default_value = "heritage")]
        theme: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("yatra");
    let cli = Cli::parse();

    let companion = build_companion(&cli)?;

    let mut out = io::stdout();
    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            menu::run_menu(&companion, &mut input, &mut out).await?;
        }
        Command::Plan {
            budget,
            days,
            interests,
        } => {
            commands::plan(
                &companion,
                budget,
                days,
                interests.as_deref(),
                cli.json,
                &mut out,
            )
            .await?
        }
        Command::Translate {
            lang,
            save,
            audio,
            text,
        } => {
            commands::translate(&companion, &text, &lang, save, audio, cli.json, &mut out).await?
        }
        Command::Speak { lang, file } => {
            commands::speak(&companion, &file, &lang, cli.json, &mut out).await?
        }
        Command::Dashboard { theme } => {
            commands::dashboard(&companion, &theme, cli.json, &mut out).await?
        }
    }

    let snapshot = companion.metrics().snapshot();
    info!(
        metrics = %serde_json::to_string(&snapshot).unwrap_or_default(),
        "session finished"
    );
    Ok(())
}

fn build_companion(cli: &Cli) -> Result<TourismCompanion<Store>> {
    let metrics = AppMetrics::shared();
    let ml_stack = MlStack::load_default().context("failed configuring model backends")?;
    let store = Store::fs(&cli.output_dir);

    Ok(TourismCompanion::new(
        ml_stack,
        Arc::new(store),
        metrics,
        &cli.dashboard_root,
    ))
}
