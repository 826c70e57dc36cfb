//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{
  feature_to_out, riddle_to_out, CategoryOut, ClientWsMessage, ServerWsMessage,
};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "riddlecraft_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "riddlecraft_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "riddlecraft_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          error!(target: "riddlecraft_backend", error = %e, "Failed to serialize WS reply");
          "{\"type\":\"error\",\"message\":\"internal serialization error\"}".to_string()
        });
        if socket.send(Message::Text(out)).await.is_err() {
          break;
        }
      }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "riddlecraft_backend", "WebSocket disconnected");
}

async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Categories { view, filter } => {
      let view = match view.as_deref() {
        Some("top") => ListingView::Top,
        _ => ListingView::All,
      };
      let config = filter.into_config();
      let (categories, stats) = category_listing(state, view, &config);
      ServerWsMessage::Categories {
        categories: categories
          .iter()
          .map(|cat| CategoryOut::new(cat, stats[cat]))
          .collect(),
      }
    }

    ClientWsMessage::Riddle { category, another } => {
      match serve_riddle(state, category.as_deref(), another).await {
        Ok(riddle) => ServerWsMessage::Riddle { riddle: riddle_to_out(&riddle) },
        Err(_) => ServerWsMessage::Empty { message: "No riddles in this category".into() },
      }
    }

    ClientWsMessage::Generate => match generate_riddle(state).await {
      Ok(riddle) => {
        let engagement = state.engagement.read().await;
        ServerWsMessage::Feature { riddle: feature_to_out(&riddle, &engagement) }
      }
      Err(_) => ServerWsMessage::Empty { message: "The generator pool is empty".into() },
    },

    ClientWsMessage::StartChallenge => match start_challenge(state).await {
      Ok((riddle, seconds)) => {
        let engagement = state.engagement.read().await;
        ServerWsMessage::Challenge { riddle: feature_to_out(&riddle, &engagement), seconds }
      }
      Err(_) => ServerWsMessage::Empty { message: "The challenge pool is empty".into() },
    },

    ClientWsMessage::Like { id } => {
      let likes = like_riddle(state, &id).await;
      ServerWsMessage::LikeResult { id, likes }
    }

    ClientWsMessage::Heart { id } => {
      let (likes, liked) = heart_riddle(state, &id).await;
      ServerWsMessage::HeartResult { id, likes, liked }
    }

    ClientWsMessage::Bookmark { id } => {
      let bookmarked = toggle_bookmark(state, &id).await;
      ServerWsMessage::BookmarkResult { id, bookmarked }
    }

    ClientWsMessage::Solve { id, answer } => {
      let (correct, newly_solved) = solve_riddle(state, &id, &answer).await;
      ServerWsMessage::SolveResult { id, correct, newly_solved }
    }
  }
}
