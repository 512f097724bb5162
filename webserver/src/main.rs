//! WebServer entry point
//!
//! Loads provider configuration from the environment, opens the store and
//! serves the blog generation API.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use generator::{GenerationOrchestrator, GeneratorConfig, InMemoryStore, RealContentGenerator, RealImageSource, SqliteStore};
use shared::logging::{self, ServiceId};

use webserver::{WebServer, WebServerError, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Token-metered blog generation API")]
struct Args {
    /// Port for HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// SQLite database file
    #[arg(long, default_value = "blogsmith.db")]
    database: PathBuf,

    /// Keep accounts and articles in memory only
    #[arg(long, conflicts_with = "database")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    logging::init_tracing(ServiceId::WebServer, Some(&args.log_level));
    logging::log_startup(ServiceId::current(), &format!("blog API on port {}", args.port));

    let bind_address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address: {e}")))?;

    let config = GeneratorConfig::from_env()?;
    let deadline = config.request_deadline;
    let content_generator = RealContentGenerator::new(config.clone())?;
    let image_source = RealImageSource::new(config)?;

    let result = if args.in_memory {
        let store = InMemoryStore::new();
        let orchestrator = GenerationOrchestrator::new(content_generator, image_source, store.clone(), store)
            .with_request_deadline(deadline);
        WebServer::new(bind_address, orchestrator).run().await
    } else {
        let store = SqliteStore::open(&args.database).map_err(generator::GeneratorError::from)?;
        tracing::info!(database = %args.database.display(), "Opened article store");
        let orchestrator = GenerationOrchestrator::new(content_generator, image_source, store.clone(), store)
            .with_request_deadline(deadline);
        WebServer::new(bind_address, orchestrator).run().await
    };

    if let Err(error) = &result {
        logging::log_error(ServiceId::current(), "WebServer", error);
    }
    result
}
