//! Random riddle selection: uniform picks, "give me another" semantics, and
//! exact category membership lookup.

use rand::Rng;
use thiserror::Error;

use crate::domain::RiddleRecord;
use crate::normalize::normalize_keyword;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
  /// Selection was attempted over zero candidates. Callers treat this as
  /// "nothing to show", never as a fatal failure.
  #[error("no riddles to pick from")]
  EmptyPool,
}

/// Uniform-random pick over the pool.
pub fn pick_random<T>(pool: &[T]) -> Result<&T, SelectError> {
  if pool.is_empty() {
    return Err(SelectError::EmptyPool);
  }
  let idx = rand::thread_rng().gen_range(0..pool.len());
  Ok(&pool[idx])
}

/// Uniform pick excluding the element with id `exclude_id`.
///
/// With a single-element pool the repeat is served (there is no other
/// option); an unknown `exclude_id` degrades to a plain uniform pick.
pub fn pick_another<'a, T, F>(
  pool: &'a [T],
  exclude_id: &str,
  id_of: F,
) -> Result<&'a T, SelectError>
where
  F: Fn(&T) -> &str,
{
  if pool.is_empty() {
    return Err(SelectError::EmptyPool);
  }
  if pool.len() == 1 {
    return Ok(&pool[0]);
  }
  let others: Vec<&T> = pool.iter().filter(|item| id_of(item) != exclude_id).collect();
  if others.is_empty() {
    // Every element carries the excluded id; fall back to uniform.
    return pick_random(pool);
  }
  let idx = rand::thread_rng().gen_range(0..others.len());
  Ok(others[idx])
}

/// All corpus records whose normalized keyword equals `category` exactly.
/// Exact string equality after normalization, never prefix or substring.
pub fn riddles_in_category<'a>(
  corpus: &'a [RiddleRecord],
  category: &str,
) -> Vec<&'a RiddleRecord> {
  corpus
    .iter()
    .filter(|r| normalize_keyword(&r.keyword) == category)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rec(id: &str, keyword: &str) -> RiddleRecord {
    RiddleRecord {
      id: id.into(),
      keyword: keyword.into(),
      riddle: "q".into(),
      answer: "a".into(),
    }
  }

  #[test]
  fn empty_pool_is_an_error() {
    let pool: Vec<RiddleRecord> = vec![];
    assert_eq!(pick_random(&pool).unwrap_err(), SelectError::EmptyPool);
    assert_eq!(
      pick_another(&pool, "x", |r: &RiddleRecord| &r.id).unwrap_err(),
      SelectError::EmptyPool
    );
  }

  #[test]
  fn pick_random_stays_inside_the_pool() {
    let pool = vec![rec("a", "k"), rec("b", "k"), rec("c", "k")];
    for _ in 0..50 {
      let picked = pick_random(&pool).expect("non-empty");
      assert!(pool.iter().any(|r| r.id == picked.id));
    }
  }

  #[test]
  fn pick_another_never_repeats_with_two_or_more() {
    let pool = vec![rec("a", "k"), rec("b", "k"), rec("c", "k")];
    for _ in 0..100 {
      let picked = pick_another(&pool, "b", |r| &r.id).expect("non-empty");
      assert_ne!(picked.id, "b");
    }
  }

  #[test]
  fn sole_element_repeats() {
    let pool = vec![rec("only", "k")];
    let picked = pick_another(&pool, "only", |r| &r.id).expect("non-empty");
    assert_eq!(picked.id, "only");
  }

  #[test]
  fn category_membership_is_exact() {
    let corpus = vec![
      rec("1", "animal-riddles"),
      rec("2", "animal-riddles"),
      rec("3", "animal"),
      rec("4", "food"),
    ];
    let hits = riddles_in_category(&corpus, "animal riddles");
    assert_eq!(hits.len(), 2);
    // "animal" is not a prefix match for "animal riddles".
    assert_eq!(riddles_in_category(&corpus, "animal").len(), 1);
    assert!(riddles_in_category(&corpus, "nothing").is_empty());
  }
}
