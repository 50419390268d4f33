use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use release_stats::config::{RefreshConfig, StatsConfig, load_config, log_path};
use release_stats::logging::{self, LogOptions};
use release_stats::refresh::{
    DataSource, FileDataSource, HttpDataSource, RefreshCoordinator, RefreshState,
};
use release_stats::stats::aggregate;
use release_stats::version::compare;

#[derive(Parser)]
#[command(name = "release-stats")]
#[command(version, about = "Release analytics: version ordering and download metrics")]
struct Cli {
    /// Write logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate a JSON records file and print the metrics snapshot
    Aggregate {
        /// File containing `{ "releases": [...], "downloads": [...] }`
        file: PathBuf,
    },
    /// Compare two version identifiers
    Compare { a: String, b: String },
    /// Poll a data source and print every refreshed snapshot
    Watch(WatchArgs),
}

#[derive(Args)]
struct WatchArgs {
    /// HTTP endpoint serving snapshot records
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Local JSON file with snapshot records
    #[arg(long)]
    file: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(&LogOptions {
        file: cli.log_file.then(log_path),
        json: cli.json_logs,
    })?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Aggregate { file } => {
            let records = FileDataSource::new(&file)
                .fetch_snapshot_records()
                .await
                .with_context(|| format!("Failed to read records from {}", file.display()))?;
            let snapshot = aggregate(&records.releases, &records.downloads);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Compare { a, b } => {
            let result = match compare(&a, &b) {
                std::cmp::Ordering::Less => "less",
                std::cmp::Ordering::Equal => "equal",
                std::cmp::Ordering::Greater => "greater",
            };
            println!("{}", result);
        }
        Command::Watch(args) => watch(args).await?,
    }
    Ok(())
}

async fn watch(args: WatchArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => StatsConfig::default(),
    };

    let interval_ms = args.interval_ms.unwrap_or(config.refresh.interval_ms);
    if interval_ms == 0 {
        bail!("Refresh interval must be greater than zero");
    }

    let source: Arc<dyn DataSource> = match (
        args.url.or(config.source.url),
        args.file.or(config.source.file),
    ) {
        (Some(url), _) => Arc::new(HttpDataSource::new(&url)?),
        (None, Some(file)) => Arc::new(FileDataSource::new(file)),
        (None, None) => bail!("No data source: pass --url or --file, or set one in the config"),
    };

    let mut coordinator = RefreshCoordinator::from_config(source, &RefreshConfig { interval_ms });
    let mut rx = coordinator.subscribe();
    coordinator.start();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted, stopping");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = rx.borrow_and_update().clone();
                match &status.state {
                    RefreshState::Ready => {
                        if let Some(snapshot) = &status.snapshot {
                            println!("{}", serde_json::to_string(snapshot.as_ref())?);
                        }
                    }
                    RefreshState::Failed { error } => {
                        error!("Error loading statistics: {}", error);
                    }
                    RefreshState::Loading => info!("Loading statistics"),
                    RefreshState::Idle => {}
                }
            }
        }
    }

    coordinator.shutdown().await;
    Ok(())
}
