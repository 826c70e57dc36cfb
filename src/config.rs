//! Loading the optional content config (extra riddles + page copy) from TOML.
//!
//! See `ContentConfig` for the expected schema. The config path comes from
//! RIDDLE_CONFIG_PATH; any IO or parse error logs and falls back to the
//! built-in content only.

use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::corpus::PageContent;
use crate::domain::{Difficulty, FeatureRiddle, RiddleRecord};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ContentConfig {
  #[serde(default)]
  pub riddles: Vec<RiddleCfg>,
  #[serde(default)]
  pub featured: Vec<FeatureCfg>,
  #[serde(default)]
  pub pages: Vec<PageCfg>,
}

/// Corpus entry accepted in TOML. Missing ids are generated.
#[derive(Clone, Debug, Deserialize)]
pub struct RiddleCfg {
  #[serde(default)]
  pub id: Option<String>,
  pub keyword: String,
  pub riddle: String,
  pub answer: String,
}

/// Curated feature entry accepted in TOML.
#[derive(Clone, Debug, Deserialize)]
pub struct FeatureCfg {
  #[serde(default)]
  pub id: Option<String>,
  pub question: String,
  pub answer: String,
  pub difficulty: Difficulty,
  pub category: String,
  #[serde(default)]
  pub likes: u32,
  #[serde(default)]
  pub views: u32,
  #[serde(default)]
  pub is_new: bool,
}

/// Per-slug page copy override.
#[derive(Clone, Debug, Deserialize)]
pub struct PageCfg {
  pub slug: String,
  pub title: String,
  pub hero_text: String,
  #[serde(default)]
  pub meta_description: String,
}

impl RiddleCfg {
  pub fn into_record(self) -> RiddleRecord {
    RiddleRecord {
      id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
      keyword: self.keyword,
      riddle: self.riddle,
      answer: self.answer,
    }
  }
}

impl FeatureCfg {
  pub fn into_riddle(self) -> FeatureRiddle {
    FeatureRiddle {
      id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
      question: self.question,
      answer: self.answer,
      difficulty: self.difficulty,
      category: self.category,
      likes: self.likes,
      views: self.views,
      is_new: self.is_new,
    }
  }
}

impl PageCfg {
  pub fn into_content(self) -> (String, PageContent) {
    (
      self.slug,
      PageContent {
        title: self.title,
        hero_text: self.hero_text,
        meta_description: self.meta_description,
      },
    )
  }
}

/// Attempt to load `ContentConfig` from RIDDLE_CONFIG_PATH. On any parsing
/// or IO error, returns None.
pub fn load_content_config_from_env() -> Option<ContentConfig> {
  let path = std::env::var("RIDDLE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<ContentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "riddlecraft_backend", %path, "Loaded content config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "riddlecraft_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "riddlecraft_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_a_minimal_bank() {
    let cfg: ContentConfig = toml::from_str(
      r#"
      [[riddles]]
      keyword = "space-riddles"
      riddle = "I am a star that never shines. What am I?"
      answer = "A starfish"

      [[featured]]
      id = "f1"
      question = "What can travel around the world while staying in a corner?"
      answer = "A stamp"
      difficulty = "medium"
      category = "object"
      likes = 10

      [[pages]]
      slug = "space-riddles"
      title = "Space Riddles"
      hero_text = "Out of this world."
      "#,
    )
    .expect("parse");

    let record = cfg.riddles[0].clone().into_record();
    assert_eq!(record.keyword, "space-riddles");
    assert!(!record.id.is_empty()); // generated

    let feature = cfg.featured[0].clone().into_riddle();
    assert_eq!(feature.id, "f1");
    assert_eq!(feature.difficulty, Difficulty::Medium);
    assert_eq!(feature.views, 0);

    let (slug, page) = cfg.pages[0].clone().into_content();
    assert_eq!(slug, "space-riddles");
    assert_eq!(page.meta_description, "");
    assert_eq!(page.title, "Space Riddles");
  }
}
