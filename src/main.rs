use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::net::TcpListener;

use urlshort::config::validation::validate_config;
use urlshort::config::{
    load_config, load_redirects, load_redirects_file, ConfigError, ObservabilityConfig,
};
use urlshort::http::HttpServer;
use urlshort::lifecycle::shutdown_signal;
use urlshort::observability::{logging, metrics};
use urlshort::{LookupTable, ServerConfig};

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect request paths to URLs from a static table", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML or JSON redirect document (overrides [redirects].file)
    #[arg(short, long)]
    redirects: Option<PathBuf>,

    /// Listen address (overrides listener.bind_address)
    #[arg(short, long)]
    bind: Option<String>,

    /// Print the resolved redirect tables and exit
    #[arg(long)]
    check: bool,
}

/// Resolve config and the document table from the command line.
fn load(cli: &Cli) -> Result<(ServerConfig, LookupTable), ConfigError> {
    let (mut config, base_dir) = match &cli.config {
        Some(path) => {
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (load_config(path)?, base_dir)
        }
        None => (ServerConfig::default(), PathBuf::new()),
    };

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    let document = match &cli.redirects {
        Some(file) => load_redirects_file(file)?,
        None => load_redirects(&config.redirects, &base_dir)?,
    };

    Ok((config, document))
}

fn warn_unreachable(source: &str, table: &LookupTable) {
    for (path, _) in table.iter().filter(|(path, _)| !path.starts_with('/')) {
        tracing::warn!(source, path, "Redirect path does not start with '/' and can never match");
    }
}

fn print_table(source: &str, table: &LookupTable) {
    println!("# {source} ({} entries)", table.len());
    for (path, target) in table.sorted() {
        println!("{path}\t{target}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, document) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));

    let inline = LookupTable::from_map(config.paths.clone());
    tracing::info!(
        bind_address = %config.listener.bind_address,
        document_entries = document.len(),
        inline_entries = inline.len(),
        "Configuration loaded"
    );
    warn_unreachable("document", &document);
    warn_unreachable("inline", &inline);

    if cli.check {
        print_table("document", &document);
        print_table("inline", &inline);
        return Ok(());
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, document);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
