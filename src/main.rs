use std::error::Error;

use axum::http::{HeaderValue, Method, header};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use increment_engine::api::{AppState, create_router};
use increment_engine::config::ConfigLoader;
use increment_engine::store::Store;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding server.yaml and policies.yaml
    #[arg(short, long, env = "INCREMENT_CONFIG_DIR", default_value = "./config")]
    config: String,

    /// Port to listen on, overriding server.yaml
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// SQLite database file, overriding server.yaml
    #[arg(long, env = "DATABASE_PATH")]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut loader = ConfigLoader::load(&args.config)?;
    let server = loader.config_mut().server_mut();
    if let Some(port) = args.port {
        server.port = port;
    }
    if let Some(database) = args.database {
        server.database_path = database;
    }
    let server = loader.server().clone();

    let store = Store::open(&server.database_path)?;
    let seeded = store.seed_policies(loader.default_policies())?;
    if seeded > 0 {
        info!(seeded, "Store was empty; default policies installed");
    }

    let cors = CorsLayer::new()
        .allow_origin(server.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(AppState::new(store))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let address = format!("{}:{}", server.bind_address, server.port);
    let listener = TcpListener::bind(&address).await?;
    info!(
        address = %address,
        config = %args.config,
        "Increment engine listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
