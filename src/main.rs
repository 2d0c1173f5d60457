use std::net::SocketAddr;
use std::sync::Arc;
use umbandario::{api, config::Config, db::init_db, AudioStore, Repository};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // The schema must be complete before anything else runs
    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let store = match AudioStore::open(&config.audio_dir).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "Failed to open audio directory {}: {}",
                config.audio_dir.display(),
                e
            );
            std::process::exit(1);
        }
    };

    let repo = Arc::new(Repository::new(pool));
    let addr = SocketAddr::new(config.host, config.port);
    let app = api::create_router(api::AppState::new(repo, store, config));

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
