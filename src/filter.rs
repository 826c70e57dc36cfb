//! Multi-criteria filtering and sorting over the derived category list.
//!
//! Pure: same categories + stats + config always yield the same output.
//! Filters apply in a fixed order (search, difficulty, featured, trending,
//! recent) and are conjunctive; the sort runs last. An empty result is valid.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::CategoryStats;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
  #[default]
  Popular,
  Alphabetical,
  Difficulty,
  Trending,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
  pub search_text: String,
  pub difficulty_level: Option<u8>,
  pub featured_only: bool,
  pub trending_only: bool,
  pub recent_only: bool,
  pub sort_by: SortBy,
}

/// Apply the filter configuration to the category list.
///
/// All sorts are stable, so ties keep the incoming (first-seen) relative
/// order. A category missing from the stats map is dropped rather than
/// defaulted; it cannot be ranked.
pub fn apply(
  categories: &[String],
  stats: &HashMap<String, CategoryStats>,
  config: &FilterConfig,
) -> Vec<String> {
  let search = config.search_text.to_lowercase();

  let mut selected: Vec<String> = categories
    .iter()
    .filter(|cat| stats.contains_key(*cat))
    .filter(|cat| search.is_empty() || cat.to_lowercase().contains(&search))
    .filter(|cat| {
      config
        .difficulty_level
        .map_or(true, |level| stats[*cat].avg_difficulty == level)
    })
    .filter(|cat| !config.featured_only || stats[*cat].featured)
    .filter(|cat| !config.trending_only || stats[*cat].trending)
    .filter(|cat| !config.recent_only || stats[*cat].recently_added)
    .cloned()
    .collect();

  match config.sort_by {
    SortBy::Popular => {
      selected.sort_by(|a, b| stats[b].count.cmp(&stats[a].count));
    }
    SortBy::Alphabetical => {
      selected.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    }
    SortBy::Difficulty => {
      selected.sort_by(|a, b| stats[b].avg_difficulty.cmp(&stats[a].avg_difficulty));
    }
    SortBy::Trending => {
      // Trending group first, then bigger categories within each group.
      selected.sort_by(|a, b| {
        stats[b]
          .trending
          .cmp(&stats[a].trending)
          .then(stats[b].count.cmp(&stats[a].count))
      });
    }
  }

  selected
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stat(count: usize, avg: u8, trending: bool, recent: bool, featured: bool) -> CategoryStats {
    CategoryStats {
      count,
      avg_difficulty: avg,
      trending,
      recently_added: recent,
      featured,
    }
  }

  fn fixture() -> (Vec<String>, HashMap<String, CategoryStats>) {
    let categories: Vec<String> = ["animal riddles", "food", "logic", "what am i", "science"]
      .into_iter()
      .map(String::from)
      .collect();
    let stats = HashMap::from([
      ("animal riddles".to_string(), stat(12, 3, true, true, false)),
      ("food".to_string(), stat(7, 2, false, false, true)),
      ("logic".to_string(), stat(7, 5, false, true, false)),
      ("what am i".to_string(), stat(20, 3, true, false, true)),
      ("science".to_string(), stat(3, 1, false, false, false)),
    ]);
    (categories, stats)
  }

  #[test]
  fn popular_sort_is_non_increasing_and_stable() {
    let (categories, stats) = fixture();
    let out = apply(&categories, &stats, &FilterConfig::default());
    for pair in out.windows(2) {
      assert!(stats[&pair[0]].count >= stats[&pair[1]].count);
    }
    // "food" and "logic" tie on count; first-seen order breaks the tie.
    let food = out.iter().position(|c| c == "food").unwrap();
    let logic = out.iter().position(|c| c == "logic").unwrap();
    assert!(food < logic);
  }

  #[test]
  fn alphabetical_sort_is_non_decreasing() {
    let (categories, stats) = fixture();
    let config = FilterConfig { sort_by: SortBy::Alphabetical, ..Default::default() };
    let out = apply(&categories, &stats, &config);
    for pair in out.windows(2) {
      assert!(pair[0].to_lowercase() <= pair[1].to_lowercase());
    }
  }

  #[test]
  fn difficulty_sort_descends() {
    let (categories, stats) = fixture();
    let config = FilterConfig { sort_by: SortBy::Difficulty, ..Default::default() };
    let out = apply(&categories, &stats, &config);
    for pair in out.windows(2) {
      assert!(stats[&pair[0]].avg_difficulty >= stats[&pair[1]].avg_difficulty);
    }
  }

  #[test]
  fn trending_sort_groups_then_ranks_by_count() {
    let (categories, stats) = fixture();
    let config = FilterConfig { sort_by: SortBy::Trending, ..Default::default() };
    let out = apply(&categories, &stats, &config);
    assert_eq!(out[0], "what am i"); // trending, count 20
    assert_eq!(out[1], "animal riddles"); // trending, count 12
    assert!(!stats[&out[2]].trending);
    for pair in out[2..].windows(2) {
      assert!(stats[&pair[0]].count >= stats[&pair[1]].count);
    }
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let (categories, stats) = fixture();
    let config = FilterConfig { search_text: "RIDDLE".into(), ..Default::default() };
    assert_eq!(apply(&categories, &stats, &config), vec!["animal riddles"]);
  }

  #[test]
  fn filters_are_conjunctive() {
    let (categories, stats) = fixture();
    let config = FilterConfig {
      featured_only: true,
      trending_only: true,
      ..Default::default()
    };
    // Only "what am i" is both featured and trending.
    assert_eq!(apply(&categories, &stats, &config), vec!["what am i"]);
  }

  #[test]
  fn featured_filter_holds_under_any_sort() {
    let (categories, stats) = fixture();
    for sort_by in [SortBy::Popular, SortBy::Alphabetical, SortBy::Difficulty, SortBy::Trending] {
      let config = FilterConfig { featured_only: true, sort_by, ..Default::default() };
      for cat in apply(&categories, &stats, &config) {
        assert!(stats[&cat].featured);
      }
    }
  }

  #[test]
  fn empty_result_is_not_an_error() {
    let (categories, stats) = fixture();
    let config = FilterConfig { search_text: "zzz".into(), ..Default::default() };
    assert!(apply(&categories, &stats, &config).is_empty());
  }

  #[test]
  fn difficulty_filter_matches_exactly() {
    let (categories, stats) = fixture();
    let config = FilterConfig { difficulty_level: Some(3), ..Default::default() };
    let out = apply(&categories, &stats, &config);
    assert_eq!(out.len(), 2);
    for cat in out {
      assert_eq!(stats[&cat].avg_difficulty, 3);
    }
  }
}
