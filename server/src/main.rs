//! Gym membership API server.
//!
//! Configure through the environment or a `.env` file (`DATABASE_URL` is required),
//! then run from the repo root: `cargo run -p gym-server`

use gym_api::{
    app, apply_migrations, ensure_database_exists, init_tracing, telemetry::DEFAULT_FILTER, AppState, Config,
    Database,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(DEFAULT_FILTER);

    let config = Config::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let db = Database::connect(&config).await?;
    if config.run_migrations {
        apply_migrations(&db).await?;
    }

    let router = app(AppState::new(db.clone()), config.max_body_bytes);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
    tracing::info!("shutdown signal received");
}
