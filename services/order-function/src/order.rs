use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Every order is created in rupees; callers cannot pick a currency.
pub const ORDER_CURRENCY: &str = "INR";
pub const RECEIPT_PREFIX: &str = "receipt_";

/// Payload of a `createOrder` call. `amount` is kept as raw JSON and is not
/// validated here; the gateway decides what it accepts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderRequest {
    /// Smallest currency unit (paise). `None` when the caller omitted it.
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Value>,
}

// Distinguishes an explicit `null` from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl OrderRequest {
    pub fn new(amount: impl Into<Value>) -> Self {
        Self {
            amount: Some(amount.into()),
        }
    }

    /// Reads the request out of the callable `data` field. Anything that is
    /// not an object carries no amount.
    pub fn from_data(data: &Value) -> Self {
        Self {
            amount: data.get("amount").cloned(),
        }
    }
}

/// Body sent to the gateway's order endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    pub currency: &'static str,
    pub receipt: String,
}

impl OrderOptions {
    pub fn new(request: OrderRequest, clock: &dyn Clock) -> Self {
        Self {
            amount: request.amount,
            currency: ORDER_CURRENCY,
            receipt: receipt_for(clock.now_millis()),
        }
    }
}

/// Millisecond timestamps only; two orders in the same millisecond share a receipt.
pub fn receipt_for(epoch_millis: i64) -> String {
    format!("{RECEIPT_PREFIX}{epoch_millis}")
}

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
