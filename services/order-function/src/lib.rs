use std::sync::Arc;

use axum::http::{header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod config;
pub mod gateway;
pub mod metrics;
pub mod order;
pub mod order_handlers;

pub use crate::config::{GatewayCredentials, OrderFunctionConfig};
pub use crate::gateway::{GatewayError, OrderGateway, RazorpayClient};
pub use crate::metrics::OrderMetrics;
pub use crate::order::{Clock, OrderOptions, OrderRequest, SystemClock};
pub use crate::order_handlers::{CallContext, OrderRequestHandler, CREATE_ORDER_FAILED};

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<OrderRequestHandler>,
    pub metrics: Arc<OrderMetrics>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/metrics", get(order_handlers::metrics))
        .route("/createOrder", post(order_handlers::create_order))
        .with_state(state)
}

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE, AUTHORIZATION])
}
