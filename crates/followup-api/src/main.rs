//! Followup CLI and REST API entry point.
//!
//! Binary name: `followup`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! model endpoint, then serves the API or runs the requested command.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands, LogFormatArg};
use followup_infra::config::{load_app_config, resolve_data_dir};
use followup_observe::tracing_setup::{LogFormat, TracingOptions, init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = TracingOptions {
        default_filter: cli.log_filter().to_string(),
        format: match cli.log_format {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        },
        enable_otel: cli.otel,
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    let mut config = load_app_config(&data_dir).await;

    let result = match cli.command {
        Commands::Config => cli::config::show_config(&config, &data_dir, cli.json),

        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            serve(&data_dir, &config, cli.quiet).await
        }
    };

    shutdown_tracing();
    result
}

async fn serve(
    data_dir: &std::path::Path,
    config: &followup_types::config::AppConfig,
    quiet: bool,
) -> anyhow::Result<()> {
    let state = AppState::init(data_dir, config).await?;
    let db_pool = state.db_pool.clone();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    if !quiet {
        println!(
            "  {} Followup API listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }
    tracing::info!(%addr, model = %config.model.model, "Server started");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
