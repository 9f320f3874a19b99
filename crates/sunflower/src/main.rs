mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use sunflower_config::Config;
use sunflower_engine::{MirroringEngine, TaskManager};
use sunflower_repo::{HttpRemoteIndexRepository, InMemoryDocumentRepository, InMemoryRelationalRepository};
use tracing_subscriber::EnvFilter;

use crate::shutdown::{wait_for_shutdown_signal, ShutdownController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let remote = HttpRemoteIndexRepository::new(
        reqwest::Client::new(),
        Url::parse(&config.remote_base_url)?,
        config.index_files.clone(),
    );

    let engine = Arc::new(
        MirroringEngine::new(
            Arc::new(remote),
            Arc::new(InMemoryRelationalRepository::new()),
            Arc::new(InMemoryDocumentRepository::new()),
            config.run_as_once,
        )
        .with_concurrency(
            config.mirroring_remote_concurrent_size,
            config.mirroring_local_concurrent_size,
            config.integrity_partial_check_range_size,
        ),
    );

    let mut tasks = TaskManager::new();

    if !config.disable_mirroring {
        let engine = engine.clone();
        let delay = Duration::from_secs(config.mirroring_delay_secs);
        tasks.register("mirroring", async move { engine.start_mirroring(delay).await });
    }

    if !config.disable_integrity_check {
        if !config.disable_integrity_partial_check {
            let engine = engine.clone();
            let delay = Duration::from_secs(config.integrity_partial_check_delay_secs);
            tasks.register("integrity-partial", async move {
                engine.start_partial_integrity_check(delay).await
            });
        }
        if !config.disable_integrity_full_check {
            let engine = engine.clone();
            let delay = Duration::from_secs(config.integrity_full_check_delay_secs);
            tasks.register("integrity-full", async move {
                engine.start_full_integrity_check(delay).await
            });
        }
    }

    let listener = tokio::net::TcpListener::bind((config.http_host, config.http_port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "sunflower listening");
    let app = sunflower_http::router(engine.clone());

    let controller = ShutdownController::new();
    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = wait_for_shutdown_signal(&controller) => {
            tracing::info!("shutdown requested, stopping background tasks");
        }
    }

    drop(tasks);
    Ok(())
}
