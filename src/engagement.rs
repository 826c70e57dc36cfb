//! Per-user engagement state: bookmarks, like overrides, solved ids.
//!
//! The state lives in memory and is written through to the storage port after
//! every mutation. Persistence is optimistic: a failed write is logged and
//! swallowed, the in-memory value stands. Loads are partial-failure tolerant;
//! one corrupt key never blocks the other two.

use std::collections::{BTreeSet, HashMap};

use rand::Rng;
use tracing::warn;

use crate::domain::EngagementState;
use crate::storage::StoragePort;

const BOOKMARKS_KEY: &str = "bookmarked_riddles";
const LIKES_KEY: &str = "liked_riddles";
const SOLVED_KEY: &str = "solved_riddles";

fn read_or_default<T: Default + serde::de::DeserializeOwned>(
  store: &dyn StoragePort,
  key: &str,
) -> T {
  match store.get(key) {
    Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
      warn!(target: "engagement", key, error = %e, "Malformed stored value; using default");
      T::default()
    }),
    None => T::default(),
  }
}

fn write_through<T: serde::Serialize>(store: &dyn StoragePort, key: &str, value: &T) {
  let raw = match serde_json::to_string(value) {
    Ok(raw) => raw,
    Err(e) => {
      warn!(target: "engagement", key, error = %e, "Failed to serialize engagement value");
      return;
    }
  };
  if let Err(e) = store.set(key, &raw) {
    warn!(target: "engagement", key, error = %e, "Persist failed; keeping in-memory state");
  }
}

/// Load the three engagement values, substituting empty defaults per key.
pub fn load(store: &dyn StoragePort) -> EngagementState {
  EngagementState {
    bookmarked_ids: read_or_default::<BTreeSet<String>>(store, BOOKMARKS_KEY),
    like_overrides: read_or_default::<HashMap<String, u32>>(store, LIKES_KEY),
    solved_ids: read_or_default::<BTreeSet<String>>(store, SOLVED_KEY),
  }
}

/// Add the id if absent, remove it if present. Returns true when the id is
/// bookmarked after the call. Persists the full set immediately.
pub fn toggle_bookmark(state: &mut EngagementState, id: &str, store: &dyn StoragePort) -> bool {
  let now_bookmarked = if state.bookmarked_ids.contains(id) {
    state.bookmarked_ids.remove(id);
    false
  } else {
    state.bookmarked_ids.insert(id.to_string());
    true
  };
  write_through(store, BOOKMARKS_KEY, &state.bookmarked_ids);
  now_bookmarked
}

/// The like count shown to the user: override if present, else the default.
pub fn like_count(state: &EngagementState, id: &str, default_count: u32) -> u32 {
  state.like_overrides.get(id).copied().unwrap_or(default_count)
}

/// Toggle-via-comparison like. If the displayed count already sits above the
/// default the user is "currently liked", so reset to the default; otherwise
/// increment by one. The count can only ever be at default or one above it.
pub fn like(
  state: &mut EngagementState,
  id: &str,
  default_count: u32,
  store: &dyn StoragePort,
) -> u32 {
  let current = like_count(state, id, default_count);
  let new_count = if current > default_count { default_count } else { current + 1 };
  state.like_overrides.insert(id.to_string(), new_count);
  write_through(store, LIKES_KEY, &state.like_overrides);
  new_count
}

/// Idempotent insert into the solved set. Returns true when the id was newly
/// added (first solve).
pub fn mark_solved(state: &mut EngagementState, id: &str, store: &dyn StoragePort) -> bool {
  let newly = state.solved_ids.insert(id.to_string());
  write_through(store, SOLVED_KEY, &state.solved_ids);
  newly
}

fn heart_keys(id: &str) -> (String, String) {
  (format!("likes-{id}"), format!("has_liked-{id}"))
}

/// Current heart count for a corpus riddle. Counts have no curated default;
/// the first read seeds a small random snapshot and persists it so the number
/// stays stable for this user.
pub fn heart_count(store: &dyn StoragePort, id: &str) -> u32 {
  let (count_key, _) = heart_keys(id);
  if let Some(n) = store.get(&count_key).and_then(|raw| raw.parse().ok()) {
    return n;
  }
  let seeded = rand::thread_rng().gen_range(1..=200);
  if let Err(e) = store.set(&count_key, &seeded.to_string()) {
    warn!(target: "engagement", key = %count_key, error = %e, "Persist failed; keeping in-memory state");
  }
  seeded
}

/// Toggle the per-riddle heart on the detail pages. Stores the count and a
/// has-liked flag under their own keys; unliking removes the flag outright.
/// Returns `(new_count, now_liked)`.
pub fn toggle_heart(store: &dyn StoragePort, id: &str) -> (u32, bool) {
  let (count_key, flag_key) = heart_keys(id);
  let count = heart_count(store, id);
  let (new_count, now_liked) = if store.get(&flag_key).is_some() {
    (count.saturating_sub(1), false)
  } else {
    (count + 1, true)
  };
  if let Err(e) = store.set(&count_key, &new_count.to_string()) {
    warn!(target: "engagement", key = %count_key, error = %e, "Persist failed; keeping in-memory state");
  }
  let flag_result = if now_liked { store.set(&flag_key, "true") } else { store.delete(&flag_key) };
  if let Err(e) = flag_result {
    warn!(target: "engagement", key = %flag_key, error = %e, "Persist failed; keeping in-memory state");
  }
  (new_count, now_liked)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStore;

  #[test]
  fn like_cycles_between_default_and_default_plus_one() {
    let store = MemoryStore::new();
    let mut state = EngagementState::default();
    assert_eq!(like(&mut state, "r1", 5, &store), 6);
    assert_eq!(like(&mut state, "r1", 5, &store), 5);
    assert_eq!(like(&mut state, "r1", 5, &store), 6);
    // Never accumulates past default + 1.
    assert_eq!(like_count(&state, "r1", 5), 6);
  }

  #[test]
  fn like_count_falls_back_to_default() {
    let state = EngagementState::default();
    assert_eq!(like_count(&state, "unknown", 42), 42);
  }

  #[test]
  fn bookmark_toggles_symmetrically() {
    let store = MemoryStore::new();
    let mut state = EngagementState::default();
    assert!(toggle_bookmark(&mut state, "r1", &store));
    assert!(state.bookmarked_ids.contains("r1"));
    assert!(!toggle_bookmark(&mut state, "r1", &store));
    assert!(!state.bookmarked_ids.contains("r1"));
  }

  #[test]
  fn solved_insert_is_idempotent() {
    let store = MemoryStore::new();
    let mut state = EngagementState::default();
    assert!(mark_solved(&mut state, "ir1", &store));
    assert!(!mark_solved(&mut state, "ir1", &store));
    assert_eq!(state.solved_ids.len(), 1);
  }

  #[test]
  fn state_survives_a_reload_through_the_store() {
    let store = MemoryStore::new();
    let mut state = EngagementState::default();
    toggle_bookmark(&mut state, "r1", &store);
    like(&mut state, "r2", 10, &store);
    mark_solved(&mut state, "ir1", &store);

    let reloaded = load(&store);
    assert_eq!(reloaded, state);
    assert_eq!(like_count(&reloaded, "r2", 10), 11);
  }

  #[test]
  fn corrupt_key_does_not_block_the_others() {
    let store = MemoryStore::new();
    store.set("bookmarked_riddles", "not json at all").expect("set");
    store.set("liked_riddles", r#"{"r1": 7}"#).expect("set");
    store.set("solved_riddles", r#"["ir1"]"#).expect("set");

    let state = load(&store);
    assert!(state.bookmarked_ids.is_empty());
    assert_eq!(state.like_overrides.get("r1"), Some(&7));
    assert!(state.solved_ids.contains("ir1"));
  }

  #[test]
  fn heart_count_is_seeded_once_and_stays_stable() {
    let store = MemoryStore::new();
    let first = heart_count(&store, "q1");
    assert!((1..=200).contains(&first));
    for _ in 0..10 {
      assert_eq!(heart_count(&store, "q1"), first);
    }
  }

  #[test]
  fn heart_toggles_up_then_back_down() {
    let store = MemoryStore::new();
    let base = heart_count(&store, "q2");
    assert_eq!(toggle_heart(&store, "q2"), (base + 1, true));
    assert_eq!(toggle_heart(&store, "q2"), (base, false));
    assert_eq!(toggle_heart(&store, "q2"), (base + 1, true));
    // Unliking dropped the flag key entirely.
    toggle_heart(&store, "q2");
    assert_eq!(store.get("has_liked-q2"), None);
  }

  #[test]
  fn missing_store_loads_empty() {
    let store = MemoryStore::new();
    assert_eq!(load(&store), EngagementState::default());
  }
}
