use dotenvy::dotenv;
use schoolhub::router::init_router;
use schoolhub::state::AppState;
use schoolhub_config::ServerConfig;
use schoolhub_observability::{init_metrics, init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();
    let metrics_handle = init_metrics();

    let server_config = ServerConfig::from_env();
    let Some(database_url) = server_config.database_url.clone() else {
        error!("DATABASE_URL must be set");
        std::process::exit(1);
    };

    let db = match schoolhub_db::connect(&database_url, server_config.database_max_connections)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = schoolhub_db::run_migrations(&db).await {
        error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let state = AppState::from_env(db.clone()).with_metrics(metrics_handle);
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, address = %address, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }

    schoolhub_db::close(&db).await;
    info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
