use std::time::Duration;

use ecommerce_api::{
    build_app,
    infrastructure::{database::DatabaseManager, logger::Logger},
    AppConfig, AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    Logger::init(&config.logging);

    info!("Starting e-commerce API server...");
    info!("Database: {}", config.database.url);

    let database = DatabaseManager::new(&config.database).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        e
    })?;

    let state = AppState::new(database);
    let app = build_app(state, Duration::from_secs(config.server.timeout_seconds));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 E-commerce API running on http://{}", addr);
    info!("📊 Available endpoints:");
    info!("   GET    /health");
    info!("   GET    /customers | POST /customers");
    info!("   GET    /customers/:id | PUT | DELETE");
    info!("   GET    /customers/:id/orders");
    info!("   GET    /products | POST /products");
    info!("   GET    /products/:id | PUT | DELETE");
    info!("   GET    /orders | POST /orders");
    info!("   GET    /orders/:id | PUT | DELETE");
    info!("   POST   /orders/:id/add_product/:product_id");
    info!("   DELETE /orders/:id/remove_product/:product_id");
    info!("   GET    /orders/:id/products");

    axum::serve(listener, app).await?;

    Ok(())
}
