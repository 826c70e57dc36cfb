//! Category derivation and per-category statistics.
//!
//! Categories are not stored anywhere: they are derived on demand from the
//! corpus by normalizing each record's keyword and grouping. Stats are a mix
//! of real aggregates (count, length-based difficulty proxy) and deterministic
//! stand-ins (trending/featured come from a character-code hash of the
//! category string, recency from a simulated days-since-touched draw). The
//! stand-ins are a deliberate placeholder for real analytics; the hash must
//! stay a pure function of the category string so views and tests agree.

use std::collections::HashMap;

use rand::Rng;

use crate::domain::{CategoryStats, RiddleRecord};
use crate::normalize::{normalize_keyword, word_count};

/// Word-count limit for the compact "top categories" home view.
pub const TOP_VIEW_MAX_WORDS: usize = 2;
/// Word-count limit for the full "all categories" view.
pub const ALL_VIEW_MAX_WORDS: usize = 3;

/// Categories touched within this many simulated days count as recent.
const RECENT_WINDOW_DAYS: u16 = 14;
/// Upper bound (exclusive) of the simulated days-since-touched draw.
pub const MAX_SIMULATED_DAYS: u16 = 60;

/// Source of the simulated "days since this category was last touched".
///
/// The corpus carries no timestamps, so recency is drawn once per category
/// per derivation and held stable for that call. Re-deriving may produce a
/// different draw; that is accepted. Tests inject a fixed source.
pub trait RecencySource {
  fn days_since_touched(&mut self, category: &str) -> u16;
}

/// Production source: uniform draw from `0..MAX_SIMULATED_DAYS`.
#[derive(Default)]
pub struct RandomRecency;

impl RecencySource for RandomRecency {
  fn days_since_touched(&mut self, _category: &str) -> u16 {
    rand::thread_rng().gen_range(0..MAX_SIMULATED_DAYS)
  }
}

/// Fixed source for deterministic tests.
#[allow(dead_code)]
pub struct FixedRecency(pub u16);

impl RecencySource for FixedRecency {
  fn days_since_touched(&mut self, _category: &str) -> u16 {
    self.0
  }
}

/// Stable pseudo-hash deciding the trending flag (~10% of categories).
pub fn is_trending(category: &str) -> bool {
  let mut chars = category.chars();
  let first = chars.next().map(|c| c as u32).unwrap_or(0);
  let second = chars.next().map(|c| c as u32).unwrap_or(0);
  (first + second) % 10 == 0
}

/// Stable pseudo-hash deciding the featured flag (~7% of categories).
pub fn is_featured(category: &str) -> bool {
  let first = category.chars().next().map(|c| c as u32).unwrap_or(0);
  let last = category.chars().last().map(|c| c as u32).unwrap_or(0);
  (first + last) % 15 == 0
}

/// Derive the distinct categories and their stats from the corpus.
///
/// Keywords normalize hyphens to spaces; anything longer than `max_words`
/// words is dropped wholesale (it never forms a category, and its records are
/// excluded from every count). The category list keeps first-seen corpus
/// order, which downstream sorts rely on as their stable tie-break.
pub fn derive_categories(
  corpus: &[RiddleRecord],
  max_words: usize,
  recency: &mut impl RecencySource,
) -> (Vec<String>, HashMap<String, CategoryStats>) {
  let mut order: Vec<String> = Vec::new();
  let mut lengths: HashMap<String, Vec<usize>> = HashMap::new();

  for record in corpus {
    let category = normalize_keyword(&record.keyword);
    if word_count(&category) > max_words {
      continue;
    }
    lengths
      .entry(category.clone())
      .or_insert_with(|| {
        order.push(category.clone());
        Vec::new()
      })
      .push(record.riddle.chars().count());
  }

  let mut stats = HashMap::with_capacity(order.len());
  for category in &order {
    let member_lengths = &lengths[category];
    let mean = member_lengths.iter().sum::<usize>() as f64 / member_lengths.len() as f64;
    let avg_difficulty = ((1.0 + mean / 50.0).floor() as i64).clamp(1, 5) as u8;
    let days = recency.days_since_touched(category);

    stats.insert(
      category.clone(),
      CategoryStats {
        count: member_lengths.len(),
        avg_difficulty,
        trending: is_trending(category),
        recently_added: days < RECENT_WINDOW_DAYS,
        featured: is_featured(category),
      },
    );
  }

  (order, stats)
}

/// The compact home view: derive with the 2-word limit and keep the `limit`
/// biggest categories (stable on first-seen order among equal counts).
pub fn top_categories(
  corpus: &[RiddleRecord],
  limit: usize,
  recency: &mut impl RecencySource,
) -> (Vec<String>, HashMap<String, CategoryStats>) {
  let (mut categories, stats) = derive_categories(corpus, TOP_VIEW_MAX_WORDS, recency);
  categories.sort_by(|a, b| stats[b].count.cmp(&stats[a].count));
  categories.truncate(limit);
  (categories, stats)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::RiddleRecord;

  fn rec(id: &str, keyword: &str, text: &str) -> RiddleRecord {
    RiddleRecord {
      id: id.into(),
      keyword: keyword.into(),
      riddle: text.into(),
      answer: "x".into(),
    }
  }

  #[test]
  fn derives_counts_and_drops_long_keywords() {
    let corpus = vec![
      rec("1", "animal riddles", "aaa"),
      rec("2", "animal riddles", "bbb"),
      rec("3", "animal riddles", "ccc"),
      rec("4", "food", "ddd"),
      rec("5", "food", "eee"),
      rec("6", "animal riddles food fun", "fff"),
    ];
    let (categories, stats) = derive_categories(&corpus, 2, &mut FixedRecency(30));
    assert_eq!(categories, vec!["animal riddles", "food"]);
    assert_eq!(stats["animal riddles"].count, 3);
    assert_eq!(stats["food"].count, 2);
  }

  #[test]
  fn every_category_respects_the_word_limit() {
    let corpus = crate::corpus::seed_corpus();
    for max_words in 1..=4 {
      let (categories, stats) = derive_categories(&corpus, max_words, &mut FixedRecency(0));
      for cat in &categories {
        assert!(word_count(cat) <= max_words, "{cat:?} over limit {max_words}");
        let expected = corpus
          .iter()
          .filter(|r| normalize_keyword(&r.keyword) == *cat)
          .count();
        assert_eq!(stats[cat].count, expected);
      }
    }
  }

  #[test]
  fn difficulty_stays_clamped() {
    let corpus = vec![
      rec("1", "short", "ab"),
      rec("2", "long", &"x".repeat(1000)),
    ];
    let (_, stats) = derive_categories(&corpus, 3, &mut FixedRecency(0));
    assert_eq!(stats["short"].avg_difficulty, 1);
    assert_eq!(stats["long"].avg_difficulty, 5);
  }

  #[test]
  fn difficulty_follows_mean_length() {
    // mean length 75 -> floor(1 + 75/50) = 2
    let corpus = vec![
      rec("1", "mixed", &"x".repeat(50)),
      rec("2", "mixed", &"x".repeat(100)),
    ];
    let (_, stats) = derive_categories(&corpus, 3, &mut FixedRecency(0));
    assert_eq!(stats["mixed"].avg_difficulty, 2);
  }

  #[test]
  fn flag_hashes_are_deterministic() {
    for cat in ["animal riddles", "food", "logic", "what am i"] {
      let t = is_trending(cat);
      let f = is_featured(cat);
      for _ in 0..10 {
        assert_eq!(is_trending(cat), t);
        assert_eq!(is_featured(cat), f);
      }
    }
  }

  #[test]
  fn recency_window_is_fourteen_days() {
    let corpus = vec![rec("1", "food", "abc")];
    let (_, fresh) = derive_categories(&corpus, 2, &mut FixedRecency(13));
    let (_, stale) = derive_categories(&corpus, 2, &mut FixedRecency(14));
    assert!(fresh["food"].recently_added);
    assert!(!stale["food"].recently_added);
  }

  #[test]
  fn top_categories_orders_by_count() {
    let corpus = crate::corpus::seed_corpus();
    let (top, stats) = top_categories(&corpus, 5, &mut FixedRecency(0));
    assert!(top.len() <= 5);
    for pair in top.windows(2) {
      assert!(stats[&pair[0]].count >= stats[&pair[1]].count);
    }
  }
}
