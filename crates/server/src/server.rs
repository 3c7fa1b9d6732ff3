use std::sync::Arc;

use advisor::AdvisorClient;
use axum::{
    Router,
    routing::{get, post},
};
use store::ExpenseStore;
use tokio::sync::RwLock;

use crate::{FeatureRelay, chat, expenses, feature, report};

/// Shared server state.
///
/// The store lock is what serializes writers: every mutation holds the write
/// half across its load-modify-save cycle, so the wholesale document is never
/// replaced concurrently from inside one process. Readers only need the read
/// half. Optional collaborators are absent when their settings are missing;
/// the matching endpoints then answer 503.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<RwLock<Box<dyn ExpenseStore>>>,
    pub advisor: Option<AdvisorClient>,
    pub relay: Option<FeatureRelay>,
}

impl ServerState {
    pub fn new(
        store: Box<dyn ExpenseStore>,
        advisor: Option<AdvisorClient>,
        relay: Option<FeatureRelay>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            advisor,
            relay,
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/filters", get(expenses::filters))
        .route("/expenses/day/{date}", get(expenses::by_day))
        .route("/expenses/month/{month}", get(expenses::by_month))
        .route("/expenses/year/{year}", get(expenses::by_year))
        .route("/expenses/{id}", axum::routing::delete(expenses::remove))
        .route("/report", get(report::get_report))
        .route("/chat", post(chat::ask))
        .route("/feature-request", post(feature::request))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
