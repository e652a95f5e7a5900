//! # Prometheus Metrics
//!
//! Operational metrics for the ledger node, scraped at `/metrics` on the
//! metrics port. Every metric lives in a dedicated [`prometheus::Registry`]
//! prefixed with `bookchain`.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
#[derive(Clone)]
pub struct NodeMetrics {
    registry: Registry,
    /// Books accepted into the catalog.
    pub books_registered_total: IntCounter,
    /// Blocks appended after genesis.
    pub blocks_appended_total: IntCounter,
    /// Transactions turned away: malformed, unknown book, or failed integrity check.
    pub transactions_rejected_total: IntCounter,
    /// Current number of blocks, genesis included.
    pub chain_height: IntGauge,
    /// Time spent inside a single append, including hashing and the lock.
    pub append_latency_seconds: Histogram,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("bookchain".into()), None)?;

        let books_registered_total = IntCounter::new(
            "books_registered_total",
            "Total number of books registered in the catalog",
        )?;
        registry.register(Box::new(books_registered_total.clone()))?;

        let blocks_appended_total = IntCounter::new(
            "blocks_appended_total",
            "Total number of blocks appended to the chain",
        )?;
        registry.register(Box::new(blocks_appended_total.clone()))?;

        let transactions_rejected_total = IntCounter::new(
            "transactions_rejected_total",
            "Total number of purchase transactions rejected",
        )?;
        registry.register(Box::new(transactions_rejected_total.clone()))?;

        let chain_height = IntGauge::new("chain_height", "Number of blocks in the chain")?;
        registry.register(Box::new(chain_height.clone()))?;

        let append_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "append_latency_seconds",
                "Latency of a single block append in seconds",
            )
            .buckets(vec![
                0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1,
            ]),
        )?;
        registry.register(Box::new(append_latency_seconds.clone()))?;

        Ok(Self {
            registry,
            books_registered_total,
            blocks_appended_total,
            transactions_rejected_total,
            chain_height,
            append_latency_seconds,
        })
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
