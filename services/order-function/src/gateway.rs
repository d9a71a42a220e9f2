use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::{GatewayCredentials, OrderFunctionConfig};
use crate::order::OrderOptions;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway rejected order with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("gateway returned an unreadable order: {0}")]
    Decode(String),
}

/// Creates orders on the payment gateway. The returned JSON is the gateway's
/// own order object and is passed back to callers untouched.
#[async_trait::async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, options: &OrderOptions) -> Result<Value, GatewayError>;
}

pub struct RazorpayClient {
    base_url: String,
    credentials: GatewayCredentials,
    client: Client,
}

impl RazorpayClient {
    pub fn new(base_url: impl Into<String>, credentials: GatewayCredentials, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build gateway HTTP client")?;
        Ok(Self { base_url: base_url.into(), credentials, client })
    }

    pub fn from_config(config: &OrderFunctionConfig) -> anyhow::Result<Self> {
        Self::new(
            config.gateway_base_url.clone(),
            config.credentials.clone(),
            Duration::from_millis(config.gateway_timeout_ms),
        )
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.base_url)
    }
}

#[async_trait::async_trait]
impl OrderGateway for RazorpayClient {
    async fn create_order(&self, options: &OrderOptions) -> Result<Value, GatewayError> {
        let resp = self
            .client
            .post(self.orders_url())
            .basic_auth(self.credentials.key_id(), Some(self.credentials.key_secret()))
            .json(options)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected { status: status.as_u16(), body });
        }
        let order: Value = resp.json().await.map_err(|e| GatewayError::Decode(e.to_string()))?;
        debug!(receipt = %options.receipt, order_id = ?order.get("id"), "Gateway accepted order");
        Ok(order)
    }
}
