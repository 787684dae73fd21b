use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use speakup::{config::Config, App, Options};

#[derive(Parser, Debug)]
#[command(name = "speakup")]
#[command(about = "Type a line, hear it spoken")]
#[command(version)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/speakup.yml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log lines instead of speaking them
    #[arg(long)]
    silent: bool,

    /// Disable colored history
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout belongs to the console front-end
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    info!("Starting speakup");

    let mut app = App::new(
        &config,
        Options {
            silent: cli.silent,
            color: !cli.no_color,
        },
    );

    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    let (result, interrupted) = tokio::select! {
        result = app.run() => {
            (result, false)
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            (Ok(()), true)
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
            (Ok(()), true)
        }
    };

    // Let a session that ended normally finish its last lines
    if interrupted {
        app.shutdown().await;
    } else {
        app.finish().await;
    }
    result
}
