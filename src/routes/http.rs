//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; empty pools and unknown slugs map to 404,
//! never to a server error.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::logic::*;
use crate::normalize::to_title_case;
use crate::protocol::*;
use crate::select::riddles_in_category;
use crate::state::AppState;

fn not_found(message: &str) -> (StatusCode, Json<ErrorOut>) {
  (StatusCode::NOT_FOUND, Json(ErrorOut { message: message.to_string() }))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, q), fields(view = %q.view.clone().unwrap_or_else(|| "all".into())))]
pub async fn http_get_categories(
  State(state): State<Arc<AppState>>,
  Query(q): Query<CategoriesQuery>,
) -> impl IntoResponse {
  let view = match q.view.as_deref() {
    Some("top") => ListingView::Top,
    _ => ListingView::All,
  };
  let config = q.filter_config();
  let (categories, stats) = category_listing(&state, view, &config);
  info!(target: "riddle", count = categories.len(), "HTTP categories served");
  Json(CategoriesOut {
    categories: categories
      .iter()
      .map(|cat| CategoryOut::new(cat, stats[cat]))
      .collect(),
  })
}

#[instrument(level = "info", skip(state), fields(%slug))]
pub async fn http_get_category_page(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<Json<CategoryPageOut>, (StatusCode, Json<ErrorOut>)> {
  let Some(category) = resolve_slug(&state, &slug) else {
    return Err(not_found("No such category"));
  };
  let riddles: Vec<RiddleOut> = riddles_in_category(&state.corpus, &category)
    .into_iter()
    .map(riddle_to_out)
    .collect();
  let page = state.pages.get(&slug);
  let title = page
    .map(|p| p.title.clone())
    .unwrap_or_else(|| format!("{} Riddles That Get Everyone", to_title_case(&category)));
  let hero_text = page
    .map(|p| p.hero_text.clone())
    .unwrap_or_else(|| "Challenge your mind with these brain-teasing riddles".into());
  let meta_description = page
    .map(|p| p.meta_description.clone())
    .unwrap_or_else(|| "Challenge your mind with these brain-teasing riddles".into());
  info!(target: "riddle", %category, count = riddles.len(), "HTTP category page served");
  Ok(Json(CategoryPageOut {
    count: riddles.len(),
    category,
    slug,
    title,
    hero_text,
    meta_description,
    riddles,
  }))
}

#[instrument(level = "info", skip(state, q))]
pub async fn http_get_riddle(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RiddleQuery>,
) -> Result<Json<RiddleOut>, (StatusCode, Json<ErrorOut>)> {
  let riddle = serve_riddle(&state, q.category.as_deref(), q.another.unwrap_or(false))
    .await
    .map_err(|_| not_found("No riddles in this category"))?;
  Ok(Json(riddle_to_out(&riddle)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_trending(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let engagement = state.engagement.read().await;
  Json(FeatureListOut {
    riddles: state.trending.iter().map(|r| feature_to_out(r, &engagement)).collect(),
  })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_impossible(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let engagement = state.engagement.read().await;
  Json(FeatureListOut {
    riddles: state.impossible.iter().map(|r| feature_to_out(r, &engagement)).collect(),
  })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_generate(
  State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureOut>, (StatusCode, Json<ErrorOut>)> {
  let riddle = generate_riddle(&state)
    .await
    .map_err(|_| not_found("The generator pool is empty"))?;
  let engagement = state.engagement.read().await;
  Ok(Json(feature_to_out(&riddle, &engagement)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_challenge(
  State(state): State<Arc<AppState>>,
) -> Result<Json<ChallengeOut>, (StatusCode, Json<ErrorOut>)> {
  let (riddle, seconds) = start_challenge(&state)
    .await
    .map_err(|_| not_found("The challenge pool is empty"))?;
  let engagement = state.engagement.read().await;
  Ok(Json(ChallengeOut { riddle: feature_to_out(&riddle, &engagement), seconds }))
}

#[instrument(level = "info", skip(state, body), fields(%body.id))]
pub async fn http_post_like(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LikeIn>,
) -> impl IntoResponse {
  let likes = like_riddle(&state, &body.id).await;
  info!(target: "riddle", id = %body.id, likes, "HTTP like toggled");
  Json(LikeOut { id: body.id, likes })
}

#[instrument(level = "info", skip(state, body), fields(%body.id))]
pub async fn http_post_heart(
  State(state): State<Arc<AppState>>,
  Json(body): Json<HeartIn>,
) -> impl IntoResponse {
  let (likes, liked) = heart_riddle(&state, &body.id).await;
  info!(target: "riddle", id = %body.id, likes, liked, "HTTP heart toggled");
  Json(HeartOut { id: body.id, likes, liked })
}

#[instrument(level = "info", skip(state, body), fields(%body.id))]
pub async fn http_post_bookmark(
  State(state): State<Arc<AppState>>,
  Json(body): Json<BookmarkIn>,
) -> impl IntoResponse {
  let bookmarked = toggle_bookmark(&state, &body.id).await;
  info!(target: "riddle", id = %body.id, bookmarked, "HTTP bookmark toggled");
  Json(BookmarkOut { id: body.id, bookmarked })
}

#[instrument(level = "info", skip(state, body), fields(%body.id, answer_len = body.answer.len()))]
pub async fn http_post_solve(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SolveIn>,
) -> impl IntoResponse {
  let (correct, newly_solved) = solve_riddle(&state, &body.id, &body.answer).await;
  info!(target: "riddle", id = %body.id, correct, newly_solved, "HTTP solve evaluated");
  Json(SolveOut { id: body.id, correct, newly_solved })
}
