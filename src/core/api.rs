//! HTTP + WebSocket API for Idlewatch
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /tick - Feed one tick of signals
//! - GET /state/{activity} - Latest state copy (salvaging | thieving)
//! - WS /ws - Live notifications and alerts

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::core::engine::TickOutcome;
use crate::core::monitor::SessionMonitor;
use crate::types::{
    ActivityKind, AlertEvent, EnginePhase, SessionState, StateNotification, TickRecord,
};

/// Live event pushed to WebSocket subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorEvent {
    StateChanged(StateNotification),
    Alert(AlertEvent),
}

impl MonitorEvent {
    /// Events for one pass: the notification first, then its alerts
    pub fn from_outcome(outcome: &TickOutcome) -> Vec<MonitorEvent> {
        let mut events = Vec::with_capacity(outcome.alerts.len() + 1);
        if let Some(notification) = &outcome.notification {
            events.push(MonitorEvent::StateChanged(notification.clone()));
        }
        events.extend(outcome.alerts.iter().cloned().map(MonitorEvent::Alert));
        events
    }
}

/// App state
pub struct AppState {
    pub monitor: RwLock<SessionMonitor>,
    pub events: broadcast::Sender<MonitorEvent>,
}

impl AppState {
    pub fn new(monitor: SessionMonitor) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            monitor: RwLock::new(monitor),
            events,
        }
    }
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub activities: Vec<ActivityKind>,
}

/// Per-activity result of a POST /tick
#[derive(Debug, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub activity: ActivityKind,
    pub phase: EnginePhase,
    pub transition: Option<EnginePhase>,
    pub changed: bool,
    pub changed_fields: Vec<String>,
    pub alerts: Vec<AlertEvent>,
}

impl From<&TickOutcome> for OutcomeSummary {
    fn from(outcome: &TickOutcome) -> Self {
        Self {
            activity: outcome.activity,
            phase: outcome.phase,
            transition: outcome.transition,
            changed: outcome.changed(),
            changed_fields: outcome
                .notification
                .as_ref()
                .map(|n| n.changed.clone())
                .unwrap_or_default(),
            alerts: outcome.alerts.clone(),
        }
    }
}

/// POST /tick response
#[derive(Debug, Serialize, Deserialize)]
pub struct TickResponse {
    pub outcomes: Vec<OutcomeSummary>,
}

/// Create the API router around a monitor
pub fn create_router(monitor: SessionMonitor) -> Router {
    router(Arc::new(AppState::new(monitor)))
}

/// Create the API router for existing shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tick", post(post_tick))
        .route("/state/:activity", get(get_state))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let monitor = state.monitor.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        activities: monitor.activities(),
    })
}

/// Run one pass and fan out its events
async fn post_tick(
    State(state): State<Arc<AppState>>,
    Json(record): Json<TickRecord>,
) -> Json<TickResponse> {
    let outcomes = {
        let mut monitor = state.monitor.write().await;
        monitor.tick_record(&record, Utc::now())
    };

    for event in outcomes.iter().flat_map(MonitorEvent::from_outcome) {
        // No subscribers is not an error
        let _ = state.events.send(event);
    }

    Json(TickResponse {
        outcomes: outcomes.iter().map(OutcomeSummary::from).collect(),
    })
}

/// Latest state for one activity
async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(activity): Path<String>,
) -> Result<Json<SessionState>, StatusCode> {
    let kind = ActivityKind::from_slug(&activity).ok_or(StatusCode::NOT_FOUND)?;
    let monitor = state.monitor.read().await;
    Ok(Json(monitor.state(kind)))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.events.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward events until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<MonitorEvent>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "websocket subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    monitor: SessionMonitor,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(monitor);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "idlewatch API listening");
    axum::serve(listener, router).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
