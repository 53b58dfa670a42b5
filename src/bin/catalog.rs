use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use albums_store::catalog::{CatalogServer, CatalogServiceConfig};
use albums_store::config::LogFormat;
use albums_store::lifecycle::{signals, Shutdown};
use albums_store::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Mock album catalog for the albums service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "0.0.0.0:9000")]
    bind: String,

    /// Append logs to this file instead of stdout.
    #[arg(long)]
    logfile: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    log_format: Format,

    #[arg(long, default_value_t = 2_000)]
    latency_min_ms: u64,

    #[arg(long, default_value_t = 6_000)]
    latency_max_ms: u64,

    /// Serve Prometheus metrics here.
    #[arg(long)]
    metrics: Option<String>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let format = match cli.log_format {
        Format::Pretty => LogFormat::Pretty,
        Format::Json => LogFormat::Json,
    };
    logging::init_with("info", format, cli.logfile.as_deref())?;

    if let Some(addr) = &cli.metrics {
        metrics::init_metrics(addr.parse()?)?;
    }

    let server = CatalogServer::new(CatalogServiceConfig {
        latency_min_ms: cli.latency_min_ms,
        latency_max_ms: cli.latency_max_ms,
    });
    let listener = TcpListener::bind(&cli.bind).await?;

    let shutdown = Shutdown::new();
    let run = server.run(listener, shutdown.subscribe());
    tokio::pin!(run);

    tokio::select! {
        result = &mut run => result?,
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            run.await?;
        }
    }
    Ok(())
}
