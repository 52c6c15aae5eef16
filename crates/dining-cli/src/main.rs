mod browser;
mod terminal;
mod view;
mod watch;


use std::io::Write;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dining_client::{StatusClient, StatusFetcher};
use tracing_subscriber::EnvFilter;

use crate::view::ListView;

#[derive(Debug, Parser)]
#[command(name = "dining")]
#[command(about = "Live open/closed status of campus dining locations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Live list that refreshes on a fixed interval (default)
    Watch {
        /// Poll interval in milliseconds (overrides `DINING_POLL_INTERVAL_MS`)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch once, print the grouped list, and exit
    List {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Open the operational hours page in the default browser
    Hours,
}

#[derive(Debug, Args, Clone, Copy, PartialEq, Eq)]
struct OutputArgs {
    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = dining_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Watch {
            interval_ms,
            output,
        }) => {
            let interval =
                interval_ms.map_or_else(|| config.poll_interval(), Duration::from_millis);
            watch::run_watch(&config, interval, !output.no_color).await?;
        }
        None => {
            watch::run_watch(&config, config.poll_interval(), true).await?;
        }
        Some(Commands::List { output }) => {
            let fetcher = StatusFetcher::new(StatusClient::new(&config)?);
            fetcher.refresh().await;
            let view = ListView::build(&fetcher.snapshot(), &config.hours_page_url());
            let mut stdout = std::io::stdout().lock();
            terminal::write_lines(&mut stdout, &view.lines(), !output.no_color, "\n")?;
            stdout.flush()?;
        }
        Some(Commands::Hours) => {
            browser::open_in_browser(&config.hours_page_url()).await?;
        }
    }

    Ok(())
}
