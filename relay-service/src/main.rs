use relay_service::config::RelayConfig;
use relay_service::services::init_metrics;
use relay_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing is not up yet, so configuration errors go to stderr
    let config = RelayConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing(
        "relay-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;

    // Must run before any metrics are recorded
    init_metrics()?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    tracing::info!("relay-service stopped");
    Ok(())
}
