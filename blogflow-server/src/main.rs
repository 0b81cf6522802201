use anyhow::{Context, Result};
use blogflow::llm::ModelHandle;
use blogflow::observability::init_tracing;
use blogflow_server::{router, AppState, ServerArgs};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    let args = ServerArgs::parse();
    init_tracing(args.log_format);
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to load .env file");
        }
    }

    let model = ModelHandle::from_env();
    info!(
        model = ?model,
        ready = model.is_ready(),
        failure_mode = ?args.failure_mode,
        "Model handle initialized"
    );

    let app = router(AppState::new(model, args.failure_mode));
    let target = args.bind_target();
    let listener = TcpListener::bind(&target)
        .await
        .with_context(|| format!("failed to bind {target}"))?;
    info!("Listening on {}", target);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Ok(()) = tokio::signal::ctrl_c().await {
        info!("Received Ctrl+C, initiating shutdown...");
    }
}
