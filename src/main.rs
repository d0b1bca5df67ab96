use ai_translator::{
    config::Config,
    languages::LanguageTable,
    openai::OpenAiClient,
    server::{self, AppState},
    translator::Translator,
};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ai_translator=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // Refuse to start without an API key
    let config = Config::from_env()?;

    let client = OpenAiClient::from_config(reqwest::Client::new(), &config);
    let translator = Translator::new(LanguageTable::default(), client, &config.openai_model);
    info!(
        "Loaded {} supported languages, default model {}",
        translator.languages().len(),
        translator.default_model()
    );
    let app = server::router(AppState::new(translator));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("AI Translator API listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
