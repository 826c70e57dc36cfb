//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Category listings (top / all views) with filtering and sorting
//!   - Random riddle serving with "another, not the last one" semantics
//!   - The generator and challenge-mode picks over the curated pool
//!   - Engagement mutations (like / bookmark / solve) with write-through
//!   - Slug resolution for the routing boundary and the share payload

use std::collections::HashMap;

use tracing::{info, instrument};

use crate::aggregate::{derive_categories, top_categories, RandomRecency, ALL_VIEW_MAX_WORDS};
use crate::domain::{CategoryStats, FeatureRiddle, RiddleRecord};
use crate::engagement;
use crate::filter::FilterConfig;
use crate::normalize::{normalize_keyword, slugify};
use crate::select::{pick_another, pick_random, riddles_in_category, SelectError};
use crate::state::{AppState, CurrentChallenge};

/// Fixed challenge-mode countdown. The timer runs client-side.
pub const CHALLENGE_SECONDS: u32 = 60;

/// How many categories the compact home listing shows.
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Synthetic "category" key tracking the last generator pick.
const GENERATOR_SLOT: &str = "__generator";

/// Which category listing a client asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingView {
  /// Top 5 by member count, 2-word keyword limit.
  Top,
  /// Everything up to the 3-word keyword limit.
  All,
}

/// Derive the category list for a view and run the filter/sort config over it.
#[instrument(level = "debug", skip(state, config))]
pub fn category_listing(
  state: &AppState,
  view: ListingView,
  config: &FilterConfig,
) -> (Vec<String>, HashMap<String, CategoryStats>) {
  let mut recency = RandomRecency;
  let (categories, stats) = match view {
    ListingView::Top => top_categories(&state.corpus, TOP_CATEGORY_LIMIT, &mut recency),
    ListingView::All => derive_categories(&state.corpus, ALL_VIEW_MAX_WORDS, &mut recency),
  };
  let filtered = crate::filter::apply(&categories, &stats, config);
  (filtered, stats)
}

/// Resolve a URL slug back to its category, or None (the route layer turns
/// that into a 404). Every distinct corpus keyword resolves here; the
/// word-count limits only prune the listings, so long-tail categories keep
/// their detail pages.
pub fn resolve_slug(state: &AppState, slug: &str) -> Option<String> {
  state
    .corpus
    .iter()
    .map(|r| normalize_keyword(&r.keyword))
    .find(|cat| slugify(cat) == slug)
}

/// Serve a random corpus riddle, optionally confined to one category, and
/// optionally excluding the last riddle served for that category.
#[instrument(level = "info", skip(state), fields(category = category.unwrap_or("all")))]
pub async fn serve_riddle(
  state: &AppState,
  category: Option<&str>,
  another: bool,
) -> Result<RiddleRecord, SelectError> {
  let slot = category.unwrap_or("all");
  let pool: Vec<&RiddleRecord> = match category {
    Some(cat) => riddles_in_category(&state.corpus, cat),
    None => state.corpus.iter().collect(),
  };
  let last = if another { state.last_served(slot).await } else { None };
  let chosen = match last {
    Some(last_id) => pick_another(&pool, &last_id, |r| r.id.as_str())?,
    None => pick_random(&pool)?,
  };
  let picked = (*chosen).clone();
  state.remember_served(slot, &picked.id).await;
  info!(target: "riddle", category = slot, id = %picked.id, another, "Riddle served");
  Ok(picked)
}

/// The generator: a random curated riddle from the combined pool, avoiding an
/// immediate repeat of the previous pick.
#[instrument(level = "info", skip(state))]
pub async fn generate_riddle(state: &AppState) -> Result<FeatureRiddle, SelectError> {
  let picked = match state.last_served(GENERATOR_SLOT).await {
    Some(last_id) => pick_another(&state.best, &last_id, |r| r.id.as_str())?.clone(),
    None => pick_random(&state.best)?.clone(),
  };
  state.remember_served(GENERATOR_SLOT, &picked.id).await;
  Ok(picked)
}

/// Start (or restart) challenge mode: one random riddle from the combined
/// pool against a fixed countdown. A new challenge replaces any previous one,
/// so stale completions cannot touch current state.
#[instrument(level = "info", skip(state))]
pub async fn start_challenge(state: &AppState) -> Result<(FeatureRiddle, u32), SelectError> {
  let picked = pick_random(&state.best)?.clone();
  let run = CurrentChallenge { riddle_id: picked.id.clone(), seconds: CHALLENGE_SECONDS };
  let seconds = run.seconds;
  *state.challenge.write().await = Some(run);
  info!(target: "riddle", id = %picked.id, seconds, "Challenge started");
  Ok((picked, seconds))
}

/// Trimmed, case-insensitive answer equality.
pub fn check_answer(expected: &str, submission: &str) -> bool {
  expected.trim().to_lowercase() == submission.trim().to_lowercase()
}

/// The plain string handed to the external clipboard/share collaborator.
pub fn share_payload(question: &str, answer: &str) -> String {
  format!("{} (Answer: {})", question.trim(), answer.trim())
}

/// Toggle a bookmark and persist. Returns whether the id is now bookmarked.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn toggle_bookmark(state: &AppState, id: &str) -> bool {
  let mut eng = state.engagement.write().await;
  engagement::toggle_bookmark(&mut eng, id, state.store.as_ref())
}

/// Like/unlike a curated riddle and persist. Returns the new displayed count.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn like_riddle(state: &AppState, id: &str) -> u32 {
  let default_count = state.default_likes(id);
  let mut eng = state.engagement.write().await;
  engagement::like(&mut eng, id, default_count, state.store.as_ref())
}

/// Toggle the per-riddle heart on a corpus riddle's detail page.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn heart_riddle(state: &AppState, id: &str) -> (u32, bool) {
  engagement::toggle_heart(state.store.as_ref(), id)
}

/// Check a submission against a curated riddle; a correct answer marks it
/// solved (idempotently). Returns `(correct, newly_solved)`; an unknown id is
/// simply incorrect.
#[instrument(level = "info", skip(state, submission), fields(%id))]
pub async fn solve_riddle(state: &AppState, id: &str, submission: &str) -> (bool, bool) {
  let Some(riddle) = state.feature_by_id(id) else {
    return (false, false);
  };
  if !check_answer(&riddle.answer, submission) {
    return (false, false);
  }
  let newly = {
    let mut eng = state.engagement.write().await;
    engagement::mark_solved(&mut eng, id, state.store.as_ref())
  };
  // Solving the current challenge riddle finishes that run.
  let mut challenge = state.challenge.write().await;
  if challenge.as_ref().is_some_and(|run| run.riddle_id == id) {
    *challenge = None;
  }
  (true, newly)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStore;
  use std::sync::Arc;

  fn test_state() -> AppState {
    AppState::with_content(
      crate::corpus::seed_corpus(),
      crate::corpus::trending_riddles(),
      crate::corpus::impossible_riddles(),
      Arc::new(MemoryStore::new()),
    )
  }

  #[tokio::test]
  async fn another_riddle_never_repeats_the_previous_one() {
    let state = test_state();
    let mut prev = serve_riddle(&state, Some("animal riddles"), false)
      .await
      .expect("non-empty category")
      .id;
    // The category holds four riddles, so "another" must always move on.
    for _ in 0..50 {
      let next = serve_riddle(&state, Some("animal riddles"), true)
        .await
        .expect("non-empty category");
      assert_ne!(next.id, prev);
      prev = next.id;
    }
  }

  #[tokio::test]
  async fn unknown_category_yields_empty_pool() {
    let state = test_state();
    let err = serve_riddle(&state, Some("no such category"), false)
      .await
      .unwrap_err();
    assert_eq!(err, SelectError::EmptyPool);
  }

  #[tokio::test]
  async fn challenge_supersedes_previous_challenge() {
    let state = test_state();
    let (first, seconds) = start_challenge(&state).await.expect("pool");
    assert_eq!(seconds, CHALLENGE_SECONDS);
    let (second, _) = start_challenge(&state).await.expect("pool");
    let current = state.challenge.read().await.clone().expect("running");
    assert_eq!(current.riddle_id, second.id);
    // Only records the latest; the first challenge can no longer be current.
    if first.id != second.id {
      assert_ne!(current.riddle_id, first.id);
    }
  }

  #[tokio::test]
  async fn solving_the_challenge_riddle_finishes_the_run() {
    let state = test_state();
    let (riddle, _) = start_challenge(&state).await.expect("pool");
    let (correct, _) = solve_riddle(&state, &riddle.id, &riddle.answer).await;
    assert!(correct);
    assert!(state.challenge.read().await.is_none());
  }

  #[tokio::test]
  async fn solve_marks_once_and_requires_the_right_answer() {
    let state = test_state();
    assert_eq!(solve_riddle(&state, "ir1", "a hat").await, (false, false));
    assert_eq!(solve_riddle(&state, "ir1", "  A SECRET ").await, (true, true));
    assert_eq!(solve_riddle(&state, "ir1", "a secret").await, (true, false));
    assert_eq!(solve_riddle(&state, "missing", "x").await, (false, false));
  }

  #[tokio::test]
  async fn like_uses_the_curated_default() {
    let state = test_state();
    // ir1 defaults to 1245 likes.
    assert_eq!(like_riddle(&state, "ir1").await, 1246);
    assert_eq!(like_riddle(&state, "ir1").await, 1245);
    assert_eq!(like_riddle(&state, "ir1").await, 1246);
  }

  #[test]
  fn slug_resolution_round_trips_categories() {
    let state = test_state();
    let category = resolve_slug(&state, "animal-riddles").expect("known slug");
    assert_eq!(category, "animal riddles");
    assert!(resolve_slug(&state, "not-a-category").is_none());
  }

  #[test]
  fn long_tail_keyword_slugs_resolve_past_the_listing_limits() {
    let state = test_state();
    // 4- and 5-word keywords never appear in the listings but still have pages.
    assert_eq!(
      resolve_slug(&state, "hard-riddles-for-adults").as_deref(),
      Some("hard riddles for adults")
    );
    assert_eq!(
      resolve_slug(&state, "funny-riddles-for-kids-party").as_deref(),
      Some("funny riddles for kids party")
    );
  }

  #[test]
  fn share_payload_is_question_and_answer() {
    assert_eq!(
      share_payload(" What goes up? ", "Your age "),
      "What goes up? (Answer: Your age)"
    );
  }

  #[test]
  fn top_listing_respects_the_limit() {
    let state = test_state();
    let (categories, _) = category_listing(&state, ListingView::Top, &FilterConfig::default());
    assert!(categories.len() <= TOP_CATEGORY_LIMIT);
  }
}
