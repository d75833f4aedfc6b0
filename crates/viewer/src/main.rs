use std::sync::Arc;
use tokio::sync::mpsc;

use contracts::shared::target::SyncTarget;
use viewer::shared::config;
use viewer::system::{commands, console::ConsoleRenderer, worker::SyncWorker};
use viewer::usecases::u601_log_sync::{HttpLogSource, RemoteLogSource, SyncScheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = viewer::system::tracing::initialize()?;
    println!("Logging to {}", log_file.display());

    let config = config::load_config()?;

    let target = SyncTarget::parse(&config.viewer.target)
        .map_err(|e| anyhow::anyhow!("invalid [viewer].target: {}", e))?;
    let filter = config.filter_spec()?;

    let source: Arc<dyn RemoteLogSource> =
        Arc::new(HttpLogSource::new(config.http_timeouts(), config.retry_policy())?);
    let scheduler = SyncScheduler::new(target, filter, config.scheduler_settings());

    let (tx, rx) = mpsc::channel(32);
    commands::spawn_stdin_reader(tx);

    let worker = SyncWorker::new(
        scheduler,
        source,
        Box::new(ConsoleRenderer::stdout()),
        config.refresh_interval(),
    );
    tracing::info!("Session {} configured", worker.session_id());
    worker.run_loop(rx).await;

    Ok(())
}
