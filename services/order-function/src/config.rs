use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::fmt;

const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.razorpay.com";
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5000",
    "http://localhost:5173",
];

/// Gateway key pair. Never logged: `Debug` redacts both halves.
#[derive(Clone)]
pub struct GatewayCredentials {
    key_id: String,
    key_secret: String,
}

impl GatewayCredentials {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    pub(crate) fn key_id(&self) -> &str {
        &self.key_id
    }

    pub(crate) fn key_secret(&self) -> &str {
        &self.key_secret
    }
}

impl fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("key_id", &"<redacted>")
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OrderFunctionConfig {
    pub credentials: GatewayCredentials,
    pub gateway_base_url: String,
    pub gateway_timeout_ms: u64,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl OrderFunctionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Each key is read once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_id = lookup("RAZORPAY_KEY_ID").context("RAZORPAY_KEY_ID must be set")?;
        let key_secret = lookup("RAZORPAY_SECRET").context("RAZORPAY_SECRET must be set")?;
        let gateway_base_url = lookup("RAZORPAY_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GATEWAY_BASE_URL.to_string());
        let gateway_timeout_ms = lookup("RAZORPAY_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(10_000);
        // Must be an IP literal; hostnames are not resolved.
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port, got '{value}'"))?,
            None => 8080,
        };
        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|origin| origin.to_string())
                    .collect()
            });

        Ok(Self {
            credentials: GatewayCredentials::new(key_id, key_secret),
            gateway_base_url,
            gateway_timeout_ms: gateway_timeout_ms.max(1_000),
            host,
            port,
            allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let host: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("HOST must be an IP address, got '{}'", self.host))?;
        Ok(SocketAddr::new(host, self.port))
    }
}
