use lp_config::{Config, PortFileInfo};
use lp_core::Supervisor;
use lp_server::{AppState, build_router, error::ServerError, logger};

use std::error::Error;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path();
    if let Some(dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting lp-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let supervisor = Supervisor::new(config.apps_file_path(), config.app_logs_dir());

    // Apps that died while we were down still carry their old PIDs
    let records = supervisor.list_records().map_err(ServerError::from)?;
    let running = records.iter().filter(|r| r.pid != 0).count();
    info!(
        "App store {}: {} apps, {} running",
        supervisor.store_path().display(),
        records.len(),
        running
    );

    let app = build_router(AppState::new(supervisor));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: bind_addr.clone(),
            source: e,
        })?;

    // Actual address matters when port is 0
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Port discovery file for the CLI; a second live server is fatal
    let port_file = PortFileInfo::write_in(&config.dir, actual_addr.port(), &config.server.host)?;
    info!("Port file written: {}", port_file.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete; managed apps keep running");

    if let Err(e) = PortFileInfo::remove_in(&config.dir) {
        warn!("Failed to remove port file: {}", e);
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
