mod cli;

use crate::cli::{Cli, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tinylink_core::{Repository, Shortener};
use tinylink_gateway::telemetry::{self, TelemetrySettings};
use tinylink_gateway::{App, AppState};
use tinylink_generator::RandomGenerator;
use tinylink_shortener::{ShortenerService, ShortenerSettings};
use tinylink_storage::{InMemoryRepository, MySqlRepository};
use tokio::net::TcpListener;
use tracing::info;

const SERVICE_NAME: &str = "tinylink-gateway";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();

    let telemetry = {
        let settings = TelemetrySettings::builder()
            .format(config.log_format)
            .service_name(SERVICE_NAME);
        match config.otlp_endpoint.clone() {
            Some(endpoint) => telemetry::init(settings.otlp_endpoint(endpoint).build()),
            None => telemetry::init(settings.build()),
        }
    }
    .context("failed to initialise telemetry")?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length = config.code_length,
        max_attempts = config.max_attempts.get(),
        log_format = %config.log_format,
        "starting tinylink gateway"
    );

    let shortener = match config.storage {
        StorageBackendArg::InMemory => build_shortener(InMemoryRepository::new(), &config)?,
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(mysql_dsn)
                .await
                .context("failed to connect to mysql")?;
            build_shortener(repository, &config)?
        }
    };

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(AppState::new(shortener)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    telemetry.shutdown();
    Ok(())
}

fn build_shortener<R: Repository>(repository: R, config: &Cli) -> anyhow::Result<Arc<dyn Shortener>> {
    let generator = RandomGenerator::new(usize::from(config.code_length))?;
    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .build();
    Ok(Arc::new(ShortenerService::with_settings(
        repository, generator, settings,
    )))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
