use anyhow::Result;
use std::sync::Arc;

use tvu_mcp::{api, config, mcp, tools};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (for log level)
    let config = config::Config::load()?;
    config.validate()?;

    // Initialize logging with a configured level. Logs go to stderr:
    // stdout belongs to the MCP transport and must stay protocol-only.
    let log_level = config.log_level.to_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("🚀 TVU-MCP Server v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!("Portal: {}", config.base_url);

    if config.has_credentials() {
        tracing::info!("✅ Credentials configured for {}", config.student_id);
    } else {
        tracing::warn!(
            "⚠️ MSSV/PASSWORD not configured; data tools will answer with a warning"
        );
    }

    // Build the portal client; authentication is lazy, the first data tool
    // call performs the login
    let client = api::TvuClient::new(&config)?;
    let ctx = Arc::new(tools::ToolContext {
        config: config.clone(),
        client,
    });

    let mut registry = mcp::ToolRegistry::new();
    tools::register_all(&mut registry, ctx);
    tracing::info!("✅ Registered {} tools", registry.len());

    let server = mcp::McpServer::new(registry);

    tracing::info!("🚀 Serving MCP on stdio");
    tracing::info!("Hỗ trợ tra cứu lịch học TVU và xem điểm!");

    tokio::select! {
        result = server.run() => {
            result?;
            tracing::info!("stdin closed, shutting down");
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("👋 Server shutdown complete");

    Ok(())
}

/// Handle graceful shutdown signal
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
