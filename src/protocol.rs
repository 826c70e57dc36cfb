//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryStats, Difficulty, EngagementState, FeatureRiddle, RiddleRecord};
use crate::engagement::like_count;
use crate::filter::{FilterConfig, SortBy};
use crate::normalize::{slugify, to_title_case};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Categories {
        #[serde(default)]
        view: Option<String>,
        #[serde(flatten)]
        filter: WsFilter,
    },
    Riddle {
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        another: bool,
    },
    Generate,
    StartChallenge,
    Like {
        id: String,
    },
    Heart {
        id: String,
    },
    Bookmark {
        id: String,
    },
    Solve {
        id: String,
        answer: String,
    },
}

/// Filter options accepted inline on a WS `categories` request.
#[derive(Debug, Default, Deserialize)]
pub struct WsFilter {
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<u8>,
    #[serde(default)]
    pub featured_only: Option<bool>,
    #[serde(default)]
    pub trending_only: Option<bool>,
    #[serde(default)]
    pub recent_only: Option<bool>,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
}

impl WsFilter {
    pub fn into_config(self) -> FilterConfig {
        FilterConfig {
            search_text: self.search_text.unwrap_or_default(),
            difficulty_level: self.difficulty_level,
            featured_only: self.featured_only.unwrap_or(false),
            trending_only: self.trending_only.unwrap_or(false),
            recent_only: self.recent_only.unwrap_or(false),
            sort_by: self.sort_by.unwrap_or_default(),
        }
    }
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Categories {
        categories: Vec<CategoryOut>,
    },
    Riddle {
        riddle: RiddleOut,
    },
    Feature {
        riddle: FeatureOut,
    },
    Challenge {
        riddle: FeatureOut,
        seconds: u32,
    },
    LikeResult {
        id: String,
        likes: u32,
    },
    HeartResult {
        id: String,
        likes: u32,
        liked: bool,
    },
    BookmarkResult {
        id: String,
        bookmarked: bool,
    },
    SolveResult {
        id: String,
        correct: bool,
        newly_solved: bool,
    },
    Empty {
        message: String,
    },
    Error {
        message: String,
    },
}

/// One category row: normalized key, display label, URL slug, and stats.
#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub category: String,
    pub label: String,
    pub slug: String,
    pub stats: CategoryStats,
}

impl CategoryOut {
    pub fn new(category: &str, stats: CategoryStats) -> Self {
        Self {
            category: category.to_string(),
            label: to_title_case(category),
            slug: slugify(category),
            stats,
        }
    }
}

/// Corpus riddle DTO.
#[derive(Debug, Serialize)]
pub struct RiddleOut {
    pub id: String,
    pub category: String,
    pub slug: String,
    pub riddle: String,
    pub answer: String,
    pub share_text: String,
}

pub fn riddle_to_out(r: &RiddleRecord) -> RiddleOut {
    let category = crate::normalize::normalize_keyword(&r.keyword);
    RiddleOut {
        id: r.id.clone(),
        slug: slugify(&category),
        category,
        riddle: r.riddle.clone(),
        answer: r.answer.clone(),
        share_text: crate::logic::share_payload(&r.riddle, &r.answer),
    }
}

/// Curated riddle DTO with the caller's live engagement view folded in.
#[derive(Debug, Serialize)]
pub struct FeatureOut {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub likes: u32,
    pub views: u32,
    pub is_new: bool,
    pub bookmarked: bool,
    pub solved: bool,
    pub share_text: String,
}

pub fn feature_to_out(r: &FeatureRiddle, engagement: &EngagementState) -> FeatureOut {
    FeatureOut {
        id: r.id.clone(),
        question: r.question.clone(),
        answer: r.answer.clone(),
        difficulty: r.difficulty,
        category: r.category.clone(),
        likes: like_count(engagement, &r.id, r.likes),
        views: r.views,
        is_new: r.is_new,
        bookmarked: engagement.bookmarked_ids.contains(&r.id),
        solved: engagement.solved_ids.contains(&r.id),
        share_text: crate::logic::share_payload(&r.question, &r.answer),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<u8>,
    #[serde(default)]
    pub featured_only: Option<bool>,
    #[serde(default)]
    pub trending_only: Option<bool>,
    #[serde(default)]
    pub recent_only: Option<bool>,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
}

impl CategoriesQuery {
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            search_text: self.search_text.clone().unwrap_or_default(),
            difficulty_level: self.difficulty_level,
            featured_only: self.featured_only.unwrap_or(false),
            trending_only: self.trending_only.unwrap_or(false),
            recent_only: self.recent_only.unwrap_or(false),
            sort_by: self.sort_by.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesOut {
    pub categories: Vec<CategoryOut>,
}

#[derive(Debug, Deserialize)]
pub struct RiddleQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub another: Option<bool>,
}

/// Category detail page: resolved copy plus every member riddle.
#[derive(Debug, Serialize)]
pub struct CategoryPageOut {
    pub category: String,
    pub slug: String,
    pub title: String,
    pub hero_text: String,
    pub meta_description: String,
    pub count: usize,
    pub riddles: Vec<RiddleOut>,
}

#[derive(Debug, Serialize)]
pub struct FeatureListOut {
    pub riddles: Vec<FeatureOut>,
}

#[derive(Debug, Serialize)]
pub struct ChallengeOut {
    pub riddle: FeatureOut,
    pub seconds: u32,
}

#[derive(Deserialize)]
pub struct LikeIn {
    pub id: String,
}
#[derive(Serialize)]
pub struct LikeOut {
    pub id: String,
    pub likes: u32,
}

#[derive(Deserialize)]
pub struct HeartIn {
    pub id: String,
}
#[derive(Serialize)]
pub struct HeartOut {
    pub id: String,
    pub likes: u32,
    pub liked: bool,
}

#[derive(Deserialize)]
pub struct BookmarkIn {
    pub id: String,
}
#[derive(Serialize)]
pub struct BookmarkOut {
    pub id: String,
    pub bookmarked: bool,
}

#[derive(Deserialize)]
pub struct SolveIn {
    pub id: String,
    pub answer: String,
}
#[derive(Serialize)]
pub struct SolveOut {
    pub id: String,
    pub correct: bool,
    pub newly_solved: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
