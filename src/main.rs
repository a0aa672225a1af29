use std::sync::Arc;

use fraudwatch::api::router::create_router;
use fraudwatch::classifier::{ClassifierGateway, HuggingFaceLoader};
use fraudwatch::config::{AppConfig, LogFormat};
use fraudwatch::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let metrics_handle = fraudwatch::metrics::init_metrics()?;
    let addr = format!("{}:{}", config.host, config.port);

    // --- Classifier gateway ---
    let gateway = if config.classifier_enabled {
        let loader = HuggingFaceLoader::new(
            config.hf_api_url.clone(),
            config.hf_model_name.clone(),
            config.hf_api_token.clone(),
            config.classifier_timeout,
        );
        tracing::info!(
            model = %config.hf_model_name,
            authenticated = config.hf_api_token.is_some(),
            "Classifier backend configured"
        );
        Arc::new(ClassifierGateway::new(Arc::new(loader), config.gateway_config()))
    } else {
        tracing::warn!("Classifier disabled (CLASSIFIER_ENABLED=false), using fallback heuristic");
        Arc::new(ClassifierGateway::fallback_only(config.gateway_config()))
    };

    // Start loading the model now; requests arriving meanwhile wait on the same load.
    let warm = gateway.clone();
    tokio::spawn(async move {
        let phase = warm.warm_up().await;
        tracing::info!(phase = %phase, "Classifier initialization settled");
    });

    let state = AppState {
        config,
        gateway,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}
