use std::sync::Arc;
use text_to_speech_api::controllers::speech::SpeechController;
use text_to_speech_api::domain::{expiry::ExpiryService, speech::SpeechService};
use text_to_speech_api::infrastructure::config::{Config, LogFormat};
use text_to_speech_api::infrastructure::http::{build_router, start_http_server};
use text_to_speech_api::infrastructure::repositories::{
    ArtifactRepository, FsArtifactRepository, GoogleTtsRepository, TtsRepository,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Text-to-Speech API on {}:{}",
        config.host,
        config.port
    );

    // Create storage directory if missing
    let artifact_repo: Arc<dyn ArtifactRepository> =
        Arc::new(FsArtifactRepository::init(&config.storage_dir).await?);

    tracing::info!(tts_base_url = %config.tts_base_url, "Initializing synthesis provider");
    let tts_repo: Arc<dyn TtsRepository> =
        Arc::new(GoogleTtsRepository::new(config.tts_base_url.clone()));

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    tracing::info!("Instantiating services...");
    let speech_service = Arc::new(SpeechService::new(
        tts_repo,
        artifact_repo.clone(),
        config.synthesis_timeout(),
    ));
    let expiry_service = Arc::new(ExpiryService::new(
        artifact_repo.clone(),
        config.retention(),
    ));

    tracing::info!("Instantiating controllers...");
    let speech_controller = Arc::new(SpeechController::new(speech_service));

    let shutdown = CancellationToken::new();

    // Background sweep of expired artifacts
    let sweeper = tokio::spawn(
        expiry_service.run(config.sweep_interval(), shutdown.clone()),
    );

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    // Start HTTP server with all routes
    let app = build_router(&config, artifact_repo, speech_controller);
    let served = start_http_server(config, app, shutdown.clone()).await;

    shutdown.cancel();
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "Artifact sweeper task ended abnormally");
    }

    served?;
    tracing::info!("Text-to-Speech API stopped");
    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "text_to_speech_api=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
