use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct OrderMetrics {
    registry: Registry,
    requests: IntCounterVec,
    gateway_seconds: Histogram,
}

impl OrderMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new(
                "create_order_requests_total",
                "createOrder invocations grouped by outcome",
            ),
            &["outcome"],
        )?;
        let gateway_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "create_order_gateway_seconds",
                "Time spent waiting on the payment gateway",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(gateway_seconds.clone()))?;
        Ok(Self {
            registry,
            requests,
            gateway_seconds,
        })
    }

    pub fn record_outcome(&self, succeeded: bool) {
        let outcome = if succeeded { "succeeded" } else { "failed" };
        self.requests.with_label_values(&[outcome]).inc();
    }

    pub fn observe_gateway(&self, elapsed: Duration) {
        self.gateway_seconds.observe(elapsed.as_secs_f64());
    }

    pub fn outcome_count(&self, outcome: &str) -> u64 {
        self.requests.with_label_values(&[outcome]).get()
    }

    pub fn render(&self) -> Result<Response> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; version=0.0.4"),
            )
            .body(Body::from(buffer))?;
        Ok(response)
    }
}
