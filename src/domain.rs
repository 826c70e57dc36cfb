//! Domain models used by the backend: corpus records, curated feature riddles,
//! derived category statistics, and the per-user engagement state.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// A single corpus entry. The `keyword` is the raw category tag; multi-word
/// tags are hyphen-joined (e.g. "animal-riddles").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiddleRecord {
  pub id: String,
  pub keyword: String,
  pub riddle: String,
  pub answer: String,
}

/// Difficulty tier on curated feature riddles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
  Extreme,
}

/// A curated (non-corpus) riddle with explicit metadata, backing the
/// trending/impossible/challenge views.
///
/// `likes` is only the *default* count; live counts live in
/// [`EngagementState::like_overrides`] and this record is never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureRiddle {
  pub id: String,
  pub question: String,
  pub answer: String,
  pub difficulty: Difficulty,
  pub category: String,
  pub likes: u32,
  pub views: u32,
  #[serde(default)]
  pub is_new: bool,
}

/// Per-category aggregate stats, recomputed on demand from the corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
  pub count: usize,
  /// Always in 1..=5 (clamped length proxy, not a true difficulty score).
  pub avg_difficulty: u8,
  pub trending: bool,
  pub recently_added: bool,
  pub featured: bool,
}

/// The user's local likes/bookmarks/solved data. Loaded from and written back
/// to the external key-value store; authoritative only for one browser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementState {
  pub bookmarked_ids: BTreeSet<String>,
  pub like_overrides: HashMap<String, u32>,
  pub solved_ids: BTreeSet<String>,
}
