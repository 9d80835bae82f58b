//! metacat server - catalog validation and audit service.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metacat_server::{Args, Runtime};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metacat_server=info,metacat_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting metacat server");

    let args = Args::parse();
    let config = args.into_config();

    tracing::info!(
        audit_endpoint = %config.audit_endpoint,
        audit_topic = %config.audit_topic,
        max_entities = config.max_entities,
        "configuration loaded"
    );

    let runtime = match Runtime::start(config) {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "server failed to start");
            return Err(e.into());
        }
    };

    runtime.run_until_shutdown().await?;
    tracing::info!("server shutdown complete");

    Ok(())
}
