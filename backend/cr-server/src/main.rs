use cr_server::{ServerErrorResult, build_router, logger};

use cr_config::Config;
use cr_queue::{InMemoryJobQueue, JobQueue};
use cr_worker::{HttpInferenceClient, InferenceClient, RetryPolicy, Worker, WorkerPool};
use cr_ws::{AppState, ConnectionConfig};

use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    // .env is optional (development)
    let _ = dotenvy::dotenv();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(ref path) = log_file_path
        && let Some(log_dir) = path.parent()
    {
        std::fs::create_dir_all(log_dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting cr-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Broker
    let queue = Arc::new(InMemoryJobQueue::from_config(&config.queue));
    info!(
        "Job queue ready (capacity {}, visibility timeout {}s)",
        queue.capacity(),
        config.queue.visibility_timeout_secs
    );

    // Subscriber side: registry, publisher, shutdown coordinator
    let connection_config = ConnectionConfig::from_config(&config.websocket)?;
    let app_state = AppState::new(queue.clone(), connection_config);
    let shutdown = app_state.shutdown.clone();

    // Worker side
    let client: Arc<dyn InferenceClient> = Arc::new(HttpInferenceClient::new(&config.inference)?);
    let worker = Arc::new(Worker::new(
        client,
        app_state.publisher.clone(),
        app_state.config.topic.clone(),
        Duration::from_secs(config.inference.timeout_secs),
        RetryPolicy::from_config(&config.retry),
    ));
    let pool = WorkerPool::new(worker, config.worker.concurrency);
    let workers = tokio::spawn(pool.run(queue.clone(), shutdown.clone()));

    // Build router
    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    let queue_for_signal = queue.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
                queue_for_signal.close().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
            info!("HTTP server stopped accepting connections");
        })
        .await?;

    // Workers finish the job they hold before exiting
    if let Err(e) = workers.await {
        error!("Worker pool task failed: {}", e);
    }

    info!("Graceful shutdown complete");
    Ok(())
}
