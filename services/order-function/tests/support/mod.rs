#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use order_function::{
    Clock, GatewayError, OrderGateway, OrderMetrics, OrderOptions, OrderRequestHandler,
};
use serde_json::{json, Value};

/// What the fake gateway does with each call.
pub enum Reply {
    Echo,
    Fixed(Value),
    Reject(u16, &'static str),
    /// Fails before any gateway verdict, like a dropped connection.
    Fault(&'static str),
}

pub struct FakeGateway {
    reply: Reply,
    seen: Mutex<Vec<OrderOptions>>,
}

impl FakeGateway {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self { reply, seen: Mutex::new(Vec::new()) })
    }

    pub fn seen(&self) -> Vec<OrderOptions> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl OrderGateway for FakeGateway {
    async fn create_order(&self, options: &OrderOptions) -> Result<Value, GatewayError> {
        self.seen.lock().unwrap().push(options.clone());
        match &self.reply {
            Reply::Echo => Ok(serde_json::to_value(options).unwrap()),
            Reply::Fixed(value) => Ok(value.clone()),
            Reply::Reject(status, body) => Err(GatewayError::Rejected {
                status: *status,
                body: body.to_string(),
            }),
            Reply::Fault(detail) => Err(GatewayError::Decode(detail.to_string())),
        }
    }
}

pub struct FrozenClock(pub i64);

impl Clock for FrozenClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub fn handler_with(gateway: Arc<FakeGateway>) -> (OrderRequestHandler, Arc<OrderMetrics>) {
    let metrics = Arc::new(OrderMetrics::new().unwrap());
    (OrderRequestHandler::new(gateway, metrics.clone()), metrics)
}

pub fn gateway_order() -> Value {
    json!({"id": "order_123"})
}
