use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, State};
use axum::http::{header::AUTHORIZATION, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common_http_errors::{CallableError, CallableResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::gateway::OrderGateway;
use crate::metrics::OrderMetrics;
use crate::order::{Clock, OrderOptions, OrderRequest, SystemClock};
use crate::AppState;

/// Message returned to callers whenever order creation fails, whatever the cause.
pub const CREATE_ORDER_FAILED: &str = "Unable to create order";

/// Caller context of one invocation. The ID token is carried along but not
/// verified; order creation does not depend on who is calling.
#[derive(Clone)]
pub struct CallContext {
    pub invocation_id: Uuid,
    pub id_token: Option<String>,
}

impl CallContext {
    pub fn anonymous() -> Self {
        Self { invocation_id: Uuid::new_v4(), id_token: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.id_token.is_some()
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("invocation_id", &self.invocation_id)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CallContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id_token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| raw.trim().strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        Ok(Self { invocation_id: Uuid::new_v4(), id_token })
    }
}

/// Forwards order requests to the gateway. Built once at startup and shared
/// by every invocation.
pub struct OrderRequestHandler {
    gateway: Arc<dyn OrderGateway>,
    clock: Arc<dyn Clock>,
    metrics: Arc<OrderMetrics>,
}

impl OrderRequestHandler {
    pub fn new(gateway: Arc<dyn OrderGateway>, metrics: Arc<OrderMetrics>) -> Self {
        Self { gateway, clock: Arc::new(SystemClock), metrics }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Single attempt, no retry. Any gateway failure collapses into the
    /// generic internal error; the detail only goes to the log.
    pub async fn create_order(&self, request: OrderRequest, ctx: &CallContext) -> CallableResult<Value> {
        let options = OrderOptions::new(request, self.clock.as_ref());

        let started = Instant::now();
        let outcome = self.gateway.create_order(&options).await;
        self.metrics.observe_gateway(started.elapsed());

        match outcome {
            Ok(order) => {
                self.metrics.record_outcome(true);
                info!(
                    invocation_id = %ctx.invocation_id,
                    receipt = %options.receipt,
                    order_id = ?order.get("id"),
                    "Order created"
                );
                Ok(order)
            }
            Err(err) => {
                self.metrics.record_outcome(false);
                error!(
                    invocation_id = %ctx.invocation_id,
                    amount = ?options.amount,
                    receipt = %options.receipt,
                    error = %err,
                    "Gateway order creation failed"
                );
                Err(CallableError::internal(CREATE_ORDER_FAILED))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallableRequest {
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct CallableResponse {
    pub result: Value,
}

/// `POST /createOrder`
pub async fn create_order(
    State(state): State<AppState>,
    ctx: CallContext,
    payload: Result<Json<CallableRequest>, JsonRejection>,
) -> CallableResult<Json<CallableResponse>> {
    let Json(call) = payload.map_err(|rejection| {
        warn!(invocation_id = %ctx.invocation_id, error = %rejection, "Rejected malformed callable request");
        CallableError::invalid_argument("Bad Request")
    })?;
    let request = OrderRequest::from_data(&call.data);
    let order = state.handler.create_order(request, &ctx).await?;
    Ok(Json(CallableResponse { result: order }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(resp) => resp,
        Err(err) => {
            warn!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
