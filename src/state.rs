//! Application state: the immutable content pools, per-user engagement state,
//! and per-category last-served tracking.
//!
//! This module owns:
//!   - the riddle corpus (built-in seeds + optional TOML bank)
//!   - the curated trending/impossible pools and page copy
//!   - the engagement state behind the storage port
//!   - the last-served riddle per category ("another" requests exclude it)
//!   - the current challenge slot (a new challenge supersedes the old one)

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::load_content_config_from_env;
use crate::corpus::{
    best_riddles, impossible_riddles, seed_corpus, seed_page_content, trending_riddles,
    PageContent,
};
use crate::domain::{EngagementState, FeatureRiddle, RiddleRecord};
use crate::engagement;
use crate::storage::{FileStore, MemoryStore, StoragePort};

/// A running challenge: one riddle against the clock. The countdown itself
/// runs client-side; the server only remembers which riddle is in play.
#[derive(Clone, Debug)]
pub struct CurrentChallenge {
    pub riddle_id: String,
    pub seconds: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Vec<RiddleRecord>>,
    pub trending: Arc<Vec<FeatureRiddle>>,
    pub impossible: Arc<Vec<FeatureRiddle>>,
    /// Impossible ++ trending, the generator/challenge pool.
    pub best: Arc<Vec<FeatureRiddle>>,
    pub pages: Arc<HashMap<String, PageContent>>,
    pub engagement: Arc<RwLock<EngagementState>>,
    pub store: Arc<dyn StoragePort>,
    pub last_by_category: Arc<RwLock<HashMap<String, String>>>,
    pub challenge: Arc<RwLock<Option<CurrentChallenge>>>,
}

impl AppState {
    /// Build state from env: load the optional TOML bank, assemble the pools,
    /// open the storage port, and restore engagement state from it.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_content_config_from_env();

        let mut corpus = seed_corpus();
        let mut trending = trending_riddles();
        let mut best = best_riddles();
        let mut pages = seed_page_content();
        if let Some(cfg) = cfg {
            corpus.extend(cfg.riddles.into_iter().map(|r| r.into_record()));
            let extra: Vec<_> = cfg.featured.into_iter().map(|f| f.into_riddle()).collect();
            trending.extend(extra.clone());
            best.extend(extra);
            pages.extend(cfg.pages.into_iter().map(|p| p.into_content()));
        }

        let impossible = impossible_riddles();

        // RIDDLE_STATE_PATH switches on file persistence; default is a plain
        // in-memory store (state lives as long as the process).
        let store: Arc<dyn StoragePort> = match std::env::var("RIDDLE_STATE_PATH") {
            Ok(path) => {
                info!(target: "riddlecraft_backend", %path, "Using file-backed engagement store");
                Arc::new(FileStore::open(path))
            }
            Err(_) => Arc::new(MemoryStore::new()),
        };
        let engagement_state = engagement::load(store.as_ref());

        info!(
            target: "riddlecraft_backend",
            corpus = corpus.len(),
            trending = trending.len(),
            impossible = impossible.len(),
            bookmarks = engagement_state.bookmarked_ids.len(),
            solved = engagement_state.solved_ids.len(),
            "Startup content inventory"
        );

        Self {
            corpus: Arc::new(corpus),
            trending: Arc::new(trending),
            impossible: Arc::new(impossible),
            best: Arc::new(best),
            pages: Arc::new(pages),
            engagement: Arc::new(RwLock::new(engagement_state)),
            store,
            last_by_category: Arc::new(RwLock::new(HashMap::new())),
            challenge: Arc::new(RwLock::new(None)),
        }
    }

    /// Test/embedding constructor with explicit content and storage.
    #[allow(dead_code)]
    pub fn with_content(
        corpus: Vec<RiddleRecord>,
        trending: Vec<FeatureRiddle>,
        impossible: Vec<FeatureRiddle>,
        store: Arc<dyn StoragePort>,
    ) -> Self {
        let mut best = impossible.clone();
        best.extend(trending.clone());
        let engagement_state = engagement::load(store.as_ref());
        Self {
            corpus: Arc::new(corpus),
            trending: Arc::new(trending),
            impossible: Arc::new(impossible),
            best: Arc::new(best),
            pages: Arc::new(seed_page_content()),
            engagement: Arc::new(RwLock::new(engagement_state)),
            store,
            last_by_category: Arc::new(RwLock::new(HashMap::new())),
            challenge: Arc::new(RwLock::new(None)),
        }
    }

    /// Curated riddle lookup across both feature pools.
    pub fn feature_by_id(&self, id: &str) -> Option<&FeatureRiddle> {
        self.best.iter().find(|r| r.id == id)
    }

    /// Default like count for a curated riddle; unknown ids default to zero,
    /// matching "record not found" on the original views.
    pub fn default_likes(&self, id: &str) -> u32 {
        self.feature_by_id(id).map(|r| r.likes).unwrap_or(0)
    }

    /// Remember the last riddle served for a category.
    pub async fn remember_served(&self, category: &str, riddle_id: &str) {
        self.last_by_category
            .write()
            .await
            .insert(category.to_string(), riddle_id.to_string());
    }

    pub async fn last_served(&self, category: &str) -> Option<String> {
        self.last_by_category.read().await.get(category).cloned()
    }
}
