use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatline::config::{AppConfig, StoreBackend};
use chatline::conversation::ConversationManager;
use chatline::llm::ProviderAdapter;
use chatline::message_store::{MemoryMessageStore, MessageStore, PostgresMessageStore};
use chatline::routes::configure_routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn MessageStore> = match &config.store {
        StoreBackend::Memory => {
            info!("using in-memory message store");
            Arc::new(MemoryMessageStore::new())
        }
        StoreBackend::Postgres(store_config) => {
            Arc::new(PostgresMessageStore::connect(store_config.clone()).await?)
        }
    };

    for model in config.registry.iter() {
        info!(
            key = %model.key,
            provider = model.provider.as_str(),
            endpoint = %model.endpoint,
            credential = model.has_required_credential(),
            "registered model"
        );
    }

    let adapter = ProviderAdapter::new(config.request_timeout)?;
    let manager = Arc::new(ConversationManager::new(
        store.clone(),
        Arc::new(config.registry),
        adapter,
    ));

    if config.auth.is_some() {
        info!("basic auth enabled");
    }
    let routes = configure_routes(manager, config.auth);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Starting server on http://{}", config.bind_addr);
    warp::serve(routes)
        .incoming(listener)
        .graceful(shutdown_signal())
        .run()
        .await;

    info!("server stopped");
    store.close();

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
