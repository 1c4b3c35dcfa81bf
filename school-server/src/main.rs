use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use school_server::cache::TtlCache;
use school_server::config::{AppConfig, LogFormat};
use school_server::directory::SchoolDirectory;
use school_server::neis::NeisClient;
use school_server::school_data::SchoolData;
use school_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => {
            init_tracing(&config.log_level, config.log_format);
            config
        }
        Err(e) => {
            init_tracing("info", LogFormat::Text);
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match NeisClient::new(config.neis()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "failed to create NEIS client");
            return ExitCode::FAILURE;
        }
    };

    // One cache backs searches, meals and timetables
    let cache = TtlCache::new(&config.cache());
    cache.spawn_sweeper();

    // Loads immediately, then on every refresh interval
    let directory = SchoolDirectory::new(client.clone(), cache.clone(), config.directory());
    directory.spawn_refresh_loop();

    let school_data = SchoolData::new(client, cache);
    let app = create_router(AppState::new(directory, school_data));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "server starting");
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
