//! # REST + WebSocket API
//!
//! Builds the axum router that exposes the ledger over HTTP. All endpoints
//! share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path               | Description                          |
//! |--------|--------------------|--------------------------------------|
//! | GET    | `/block`           | Every block, genesis first           |
//! | POST   | `/block`           | Append a purchase transaction        |
//! | GET    | `/books`           | Every registered book                |
//! | POST   | `/book`            | Register a book                      |
//! | GET    | `/block/:position` | Block at a position                  |
//! | GET    | `/validate`        | Full-chain verification              |
//! | GET    | `/health`          | Liveness probe                       |
//! | GET    | `/status`          | Node status summary                  |
//! | GET    | `/ws`              | WebSocket for live ledger updates    |
//!
//! The two POST routes answer in plain text. Bodies are read as raw bytes
//! and decoded by the ledger, so a body that does not decode gets the same
//! `500 unable to parse json` as any other rejected submission.

use axum::{
    body::Bytes,
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use bookchain_ledger::{Block, Book, Ledger, LedgerError};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone, everything sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// Catalog and chain.
    pub ledger: Arc<Ledger>,
    /// Broadcast channel for live event notifications.
    pub event_tx: broadcast::Sender<NodeEvent>,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

/// Events pushed to WebSocket subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeEvent {
    /// A purchase was committed to the chain.
    #[serde(rename = "block_appended")]
    BlockAppended {
        position: u64,
        hash: String,
        book_id: String,
        buyer: String,
        timestamp: String,
    },
    /// A book entered the catalog.
    #[serde(rename = "book_registered")]
    BookRegistered { id: String, name: String, isbn: String },
}

impl From<&Block> for NodeEvent {
    fn from(block: &Block) -> Self {
        NodeEvent::BlockAppended {
            position: block.position,
            hash: block.hash.clone(),
            book_id: block.data.book_id.clone(),
            buyer: block.data.buyer.clone(),
            timestamp: block.timestamp.clone(),
        }
    }
}

impl From<&Book> for NodeEvent {
    fn from(book: &Book) -> Self {
        NodeEvent::BookRegistered {
            id: book.id.clone(),
            name: book.name.clone(),
            isbn: book.isbn.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/block", get(blocks_handler).post(append_block_handler))
        .route("/block/:position", get(block_by_position_handler))
        .route("/books", get(books_handler))
        .route("/book", post(register_book_handler))
        .route("/validate", get(validate_handler))
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Body text for a committed book.
pub const BOOK_ADDED: &str = "book added successfully";
/// Body text for a committed block.
pub const BLOCK_CREATED: &str = "block created";
/// Body text for an undecodable body or an unknown book.
pub const UNABLE_TO_PARSE: &str = "unable to parse json";
/// Body text for a candidate that failed the integrity check.
pub const UNABLE_TO_CREATE: &str = "unable to create block";

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Node software version.
    pub version: String,
    /// Number of blocks, genesis included.
    pub chain_height: u64,
    /// Number of registered books.
    pub book_count: usize,
    /// Hash of the current tip.
    pub last_block_hash: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
}

/// Response payload for `GET /validate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub ok: bool,
    pub errors: Vec<String>,
}

/// Generic error body returned by JSON endpoints on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Ledger rejection rendered as a plain-text HTTP response.
///
/// An unknown book answers the same as an undecodable body; the variant
/// still shows up in logs and metrics.
#[derive(Debug)]
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.0 {
            LedgerError::MalformedInput(_) | LedgerError::InvalidReference(_) => UNABLE_TO_PARSE,
            LedgerError::ChainIntegrity { .. } => UNABLE_TO_CREATE,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Ledger Handlers
// ---------------------------------------------------------------------------

/// `GET /block`: the whole chain.
async fn blocks_handler(State(state): State<AppState>) -> Json<Vec<Block>> {
    Json(state.ledger.blocks())
}

/// `GET /books`: the whole catalog.
async fn books_handler(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.ledger.books())
}

/// `POST /book`: register a book.
async fn register_book_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let book = state.ledger.register_book_json(&body)?;
    state.metrics.books_registered_total.inc();
    let _ = state.event_tx.send(NodeEvent::from(&book));
    Ok(BOOK_ADDED)
}

/// `POST /block`: append a purchase.
///
/// Records append latency and the resulting chain height. Rejections of
/// every kind count toward `transactions_rejected_total`.
async fn append_block_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let timer = state.metrics.append_latency_seconds.start_timer();
    let outcome = state.ledger.submit_transaction_json(&body);
    timer.observe_duration();

    match outcome {
        Ok(block) => {
            state.metrics.blocks_appended_total.inc();
            state.metrics.chain_height.set((block.position + 1) as i64);
            let _ = state.event_tx.send(NodeEvent::from(&block));
            Ok(BLOCK_CREATED)
        }
        Err(e) => {
            state.metrics.transactions_rejected_total.inc();
            Err(e.into())
        }
    }
}

/// `GET /block/:position`: one block, or 404.
async fn block_by_position_handler(
    Path(position): Path<u64>,
    State(state): State<AppState>,
) -> Response {
    match state.ledger.block(position) {
        Some(block) => (StatusCode::OK, Json(block)).into_response(),
        None => {
            let err = ErrorResponse {
                error: format!("block not found at position {}", position),
            };
            (StatusCode::NOT_FOUND, Json(err)).into_response()
        }
    }
}

/// `GET /validate`: walk the chain and report every broken link.
async fn validate_handler(State(state): State<AppState>) -> Json<ValidateResponse> {
    let resp = match state.ledger.verify() {
        Ok(()) => ValidateResponse {
            ok: true,
            errors: Vec::new(),
        },
        Err(errors) => {
            tracing::error!(count = errors.len(), "chain verification failed");
            ValidateResponse { ok: false, errors }
        }
    };
    Json(resp)
}

// ---------------------------------------------------------------------------
// Operational Handlers
// ---------------------------------------------------------------------------

/// `GET /health`: returns 200 if the node is alive.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /status`: node status summary.
async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: state.version.clone(),
        chain_height: state.ledger.height(),
        book_count: state.ledger.book_count(),
        last_block_hash: state.ledger.last_block().hash,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /ws`: WebSocket upgrade for live event streaming.
///
/// Clients receive JSON-encoded [`NodeEvent`] messages. Client messages
/// are ignored.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Forwards broadcast events until the client disconnects or the channel
/// closes.
async fn handle_ws_connection(mut socket: WebSocket, state: AppState) {
    let mut rx = state.event_tx.subscribe();

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(ev) => {
                        let payload = match serde_json::to_string(&ev) {
                            Ok(s) => s,
                            Err(e) => {
                                tracing::warn!("failed to serialize ws event: {}", e);
                                continue;
                            }
                        };
                        if socket.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("ws subscriber lagged by {} events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(_)) => {}
                    _ => break,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
