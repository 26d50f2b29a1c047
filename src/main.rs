use anyhow::Context;
use clap::Parser;
use configuration::{load_settings, CliOverrides};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// REST API for Star Wars planets backed by MongoDB.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: CliOverrides,

    /// Also write logs to this file (without ANSI colors).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The main entry point for the planets API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(cli.log_file.as_deref())?;

    let settings = load_settings(&cli.overrides).context("Failed to load configuration")?;
    let planets = database::open_planets(&settings.database)
        .await
        .context("Failed to open the planets store")?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", settings.server.host, settings.server.port))?;

    web_server::run_server(addr, planets).await
}

/// Initializes tracing on stdout, plus a non-blocking file writer when
/// `log_file` is given. `RUST_LOG` overrides the default filter.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "starwars=info,web_server=info,database=info,tower_http=info".into());

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
        return Ok(None);
    };

    let directory = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file {} has no file name", path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Ok(Some(guard))
}
