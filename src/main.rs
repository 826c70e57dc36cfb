//! Riddlecraft · Riddle Catalogue Backend
//!
//! - Axum HTTP + WebSocket API over a static riddle corpus
//! - Derived category statistics, filtering/sorting, random selection
//! - Per-user engagement state (likes/bookmarks/solved) behind a storage port
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   RIDDLE_CONFIG_PATH : path to TOML content bank (extra riddles + page copy)
//!   RIDDLE_STATE_PATH  : path to the JSON engagement store (default: in-memory)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod aggregate;
mod config;
mod corpus;
mod domain;
mod engagement;
mod filter;
mod logic;
mod normalize;
mod protocol;
mod routes;
mod select;
mod state;
mod storage;
mod telemetry;

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (content pools, engagement store).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "riddlecraft_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
