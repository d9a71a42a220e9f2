use std::sync::Arc;

use order_function::{
    build_router, cors_layer, AppState, OrderFunctionConfig, OrderMetrics, OrderRequestHandler,
    RazorpayClient,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = dotenv::dotenv() {
        warn!(error = %err, "No .env file loaded; using process environment");
    }

    // Credentials are read here once; the handler never touches the environment.
    let config = OrderFunctionConfig::from_env()?;
    info!(gateway = %config.gateway_base_url, "Gateway client configured");

    let gateway = Arc::new(RazorpayClient::from_config(&config)?);
    let metrics = Arc::new(OrderMetrics::new()?);
    let handler = Arc::new(OrderRequestHandler::new(gateway, metrics.clone()));
    let state = AppState { handler, metrics };

    let app = build_router(state).layer(cors_layer(&config.allowed_origins));

    let addr = config.bind_addr()?;
    info!(%addr, "starting order-function");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
