use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use node_storage::FieldSelector;
use node_storage_kubeapi::ClusterSource;
use node_storage_kubeapi::KubeApi;
use node_storage_reconciler::Reconciler;
use node_storage_reconciler::Scheduler;
use node_storage_reconciler::SchedulerConfig;
use tokio_util::sync::CancellationToken;

use config::Config;

mod config;
mod signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::parse();
    tracing::info!(?config, "Starting node-storage-controller");

    let api = KubeApi::new(&config.cluster_source())
        .await
        .inspect_err(|err| tracing::error!(error = %err, "Failed to create Kubernetes client"))?
        .with_timeout(config.request_timeout);

    let reconciler = Reconciler::new(Arc::new(api), config.field_selector.clone())
        .with_annotation(&config.annotation_key, &config.annotation_value);
    let token = CancellationToken::new();
    Scheduler::new(reconciler, config.scheduler(), token)
        .run_supervised(signal::shutdown())
        .await
        .inspect_err(|err| tracing::error!(error = %err, "Node poll loop is gone, exiting"))?;

    tracing::info!("Stopped node-storage-controller");
    Ok(())
}
