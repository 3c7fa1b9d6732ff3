use advisor::AdvisorClient;
use server::{FeatureRelay, ServerState};
use store::{JsonFileStore, STORE_KEY};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budgeteer={level},server={level},engine={level},advisor={level},store={level}",
            level = settings.app.level
        ))
        .init();

    let store_path = settings
        .server
        .store
        .clone()
        .unwrap_or_else(|| format!("{STORE_KEY}.json"));
    let store = JsonFileStore::new(store_path);
    tracing::info!("Storing expenses in {}", store.path().display());

    let advisor = settings.advisor.as_ref().map(|advisor| {
        tracing::info!("Found advisor settings...");
        AdvisorClient::new(reqwest::Client::new(), advisor.api_key.clone())
    });

    let relay = settings.feature_request.as_ref().map(|feature| {
        tracing::info!("Found feature request settings...");
        FeatureRelay::new(
            reqwest::Client::new(),
            feature.forward_url.clone(),
            feature.reply_to.clone(),
        )
    });

    let state = ServerState::new(Box::new(store), advisor, relay);

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(state, listener).await?;

    Ok(())
}
