//! Inbound HTTP surface: `GET /flights/search/`.
//!
//! The handler is a thin shell around [`FlightSearch`]. Provider timeouts
//! become `504 Gateway Timeout`, unusable provider responses become
//! `502 Bad Gateway`. Error bodies only carry a short client-safe message.

use crate::core::search::FlightSearch;
use crate::core::{ScraperClient, SearchResponse};
use crate::utils::error::{Result, SearchError};
use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const SEARCH_ROUTE: &str = "/flights/search/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.user_friendly_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub fn build_router<C: ScraperClient>(search: Arc<FlightSearch<C>>) -> Router {
    Router::new()
        .route(SEARCH_ROUTE, get(handle_search::<C>))
        .with_state(search)
}

/// `GET /flights/search/` — every provider's flights, merged by agony.
async fn handle_search<C: ScraperClient>(
    State(search): State<Arc<FlightSearch<C>>>,
) -> std::result::Result<Json<SearchResponse>, SearchError> {
    match search.search().await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            tracing::error!(
                status = err.status_code().as_u16(),
                "❌ flight search failed: {}",
                err
            );
            Err(err)
        }
    }
}

/// Background HTTP server for the search endpoint.
pub struct FlightServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl FlightServer {
    /// Bind `host:port` (port `0` picks a free one) and serve `router`
    /// on a background task.
    pub async fn start(router: Router, host: &str, port: u16) -> Result<Self> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| SearchError::ServerError {
                message: format!("failed to bind {}: {}", bind_addr, e),
            })?;

        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("HTTP server error: {}", e);
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn search_url(&self) -> String {
        format!("http://{}{}", self.addr, SEARCH_ROUTE)
    }

    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for FlightServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
