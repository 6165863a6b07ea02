use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    controllers::{health, speech::SpeechController},
    infrastructure::{
        config::Config, middleware::request_id_middleware, repositories::ArtifactRepository,
    },
};

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    artifact_repo: Arc<dyn ArtifactRepository>,
    speech_controller: Arc<SpeechController>,
) -> Router {
    // Speech routes (public)
    let speech_routes = Router::new()
        .route("/api/text-to-speech", post(SpeechController::create_speech))
        .route("/download/:filename", get(SpeechController::download))
        .route("/api/languages", get(SpeechController::list_languages))
        .with_state(speech_controller);

    let mut app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(artifact_repo)
        .merge(speech_routes)
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        );

    if config.is_development() {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Serve `app` until `shutdown` is cancelled
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("Graceful shutdown initiated");
        })
        .await?;

    Ok(())
}
