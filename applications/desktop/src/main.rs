//! MyMP3 - line-driven desktop shell host

use anyhow::Context;
use clap::Parser;
use mymp3_shell::{ShellConfig, ShellCoordinator};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod runner;
mod sink;

use sink::{HostSink, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "mymp3")]
#[command(
    about = "MyMP3 shell host: drawers, queue and transport driven by line commands",
    long_about = None
)]
struct Cli {
    /// Configuration file path (default: ./mymp3.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Frame period in milliseconds
    #[arg(long, env = "MYMP3_TICK_MS", default_value_t = 16)]
    tick_ms: u64,

    /// Override the initial window width
    #[arg(long)]
    width: Option<u32>,

    /// Override the initial window height
    #[arg(long)]
    height: Option<u32>,

    /// Write render effects to stdout as JSON lines
    #[arg(long)]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr keeps stdout free for --json)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mymp3=info,mymp3_shell=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", ShellConfig::default().to_toml()?);
        return Ok(());
    }

    // Load configuration
    let mut config = ShellConfig::load_from(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }
    config.validate()?;

    // All coordinator mutation happens on this one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build runtime")?;
    let result = runtime.block_on(host(cli, config));

    // A stdin read may still be parked on a blocking thread after `quit`
    runtime.shutdown_background();
    result
}

async fn host(cli: Cli, config: ShellConfig) -> anyhow::Result<()> {
    tracing::info!("Starting MyMP3 shell host");
    tracing::info!("Window: {}x{}", config.window.width, config.window.height);

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Log
    };
    let mut shell = ShellCoordinator::new(&config, HostSink::new(mode));
    shell.sync();

    // Input
    let (tx, rx) = mpsc::channel(runner::COMMAND_BUFFER);
    let reader = match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            tracing::info!("Reading commands from {}", path.display());
            tokio::spawn(runner::read_commands(BufReader::new(file), tx))
        }
        None => tokio::spawn(runner::read_commands(
            BufReader::new(tokio::io::stdin()),
            tx,
        )),
    };

    let tick_period = Duration::from_millis(cli.tick_ms.max(1));
    runner::run(&mut shell, rx, tick_period).await;
    reader.abort();

    Ok(())
}
