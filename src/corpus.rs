//! Built-in content: the riddle corpus, the curated trending/impossible
//! pools, and default per-category page copy.
//!
//! These guarantee the app is useful even without an external config file.
//! Everything here is immutable after load; engagement counters never touch
//! these records.

use std::collections::HashMap;

use crate::domain::{Difficulty, FeatureRiddle, RiddleRecord};

/// Per-slug page copy consumed by the routing boundary. Falls back to values
/// derived from the category title when a slug has no entry.
#[derive(Clone, Debug)]
pub struct PageContent {
  pub title: String,
  pub hero_text: String,
  pub meta_description: String,
}

macro_rules! rec {
  ($id:expr, $kw:expr, $riddle:expr, $answer:expr) => {
    RiddleRecord {
      id: $id.into(),
      keyword: $kw.into(),
      riddle: $riddle.into(),
      answer: $answer.into(),
    }
  };
}

macro_rules! feat {
  ($id:expr, $q:expr, $a:expr, $diff:expr, $cat:expr, $likes:expr, $views:expr, $new:expr) => {
    FeatureRiddle {
      id: $id.into(),
      question: $q.into(),
      answer: $a.into(),
      difficulty: $diff,
      category: $cat.into(),
      likes: $likes,
      views: $views,
      is_new: $new,
    }
  };
}

/// The default corpus. Keywords are hyphen-joined tags; a handful of
/// deliberately specific multi-word tags exist and are excluded from the
/// category listings by the word-count limit.
pub fn seed_corpus() -> Vec<RiddleRecord> {
  vec![
    rec!("q1", "animal-riddles", "I have a trunk but never pack for trips. I never forget a face. What am I?", "An elephant"),
    rec!("q2", "animal-riddles", "I wear a tuxedo to every occasion but I cannot fly. What am I?", "A penguin"),
    rec!("q3", "animal-riddles", "I carry my house wherever I go and I am never in a hurry. What am I?", "A snail"),
    rec!("q4", "animal-riddles", "I have eight arms but cannot hug you, and three hearts but love no one. What am I?", "An octopus"),
    rec!("q5", "food", "I have eyes but cannot see, and I am better mashed than whole. What am I?", "A potato"),
    rec!("q6", "food", "You throw away my outside, cook my inside, eat my outside, and throw away my inside. What am I?", "Corn on the cob"),
    rec!("q7", "food", "I am a ring that cannot be worn, sweetest when I am fried. What am I?", "A doughnut"),
    rec!("q8", "logic", "Two fathers and two sons go fishing. They catch three fish and each gets one. How?", "They are grandfather, father, and son"),
    rec!("q9", "logic", "A man pushes his car to a hotel and tells the owner he is bankrupt. Why?", "He is playing Monopoly"),
    rec!("q10", "logic", "The more of me there is, the less you see. What am I?", "Darkness"),
    rec!("q11", "what-am-i", "I speak without a mouth and hear without ears. What am I?", "An echo"),
    rec!("q12", "what-am-i", "I get wetter the more I dry. What am I?", "A towel"),
    rec!("q13", "what-am-i", "I have keys but open no locks, space but no room. What am I?", "A keyboard"),
    rec!("q14", "what-am-i", "I go up but never come down. What am I?", "Your age"),
    rec!("q15", "math-riddles", "I am an odd number. Take away a letter and I become even. What number am I?", "Seven"),
    rec!("q16", "math-riddles", "If two is company and three is a crowd, what are four and five?", "Nine"),
    rec!("q17", "science", "I am lighter than air but a hundred people cannot lift me. What am I?", "A bubble"),
    rec!("q18", "science", "I am always in front of you but can never be seen. What am I?", "The future"),
    rec!("q19", "hard-riddles-for-adults", "A woman shoots her husband, holds him under water, then hangs him. Minutes later they enjoy dinner together. How?", "She developed a photograph of him"),
    rec!("q20", "funny-riddles-for-kids-party", "Why did the scarecrow win an award?", "He was outstanding in his field"),
  ]
}

/// Curated trending riddles, richer metadata than corpus entries.
pub fn trending_riddles() -> Vec<FeatureRiddle> {
  vec![
    feat!("r1", "I speak without a mouth and hear without ears. I have no body, but I come alive with wind. What am I?", "An echo", Difficulty::Medium, "nature", 845, 2300, true),
    feat!("r2", "I have cities, but no houses. I have mountains, but no trees. I have water, but no fish. What am I?", "A map", Difficulty::Medium, "object", 762, 1980, false),
    feat!("r3", "What has a head, a tail, is brown, and has no legs?", "A penny", Difficulty::Easy, "object", 541, 1500, false),
    feat!("r4", "The person who makes it, sells it. The person who buys it, never uses it. The person who uses it, never sees it. What is it?", "A coffin", Difficulty::Hard, "object", 923, 2700, false),
    feat!("r6", "I'm always running but never get tired. I have a bed but never sleep in it. What am I?", "A river", Difficulty::Easy, "nature", 687, 1890, true),
    feat!("r7", "I can be cracked, made, told, and played. What am I?", "A joke", Difficulty::Easy, "concept", 712, 1950, true),
    feat!("r8", "I follow you all day long, but when the stars come out, I am gone. What am I?", "Your shadow", Difficulty::Easy, "nature", 623, 1730, false),
    feat!("r9", "I'm the thing that keeps scrolling when you should be sleeping. What am I?", "Social media", Difficulty::Easy, "technology", 895, 2450, true),
    feat!("r10", "People think I'm a lifesaver until they need to reach me at 1%. What am I?", "Phone battery", Difficulty::Easy, "technology", 963, 2640, true),
  ]
}

/// The hardest curated pool, surfaced on the "impossible" view and in
/// challenge mode.
pub fn impossible_riddles() -> Vec<FeatureRiddle> {
  vec![
    feat!("ir1", "If you have me, you want to share me. If you share me, you haven't got me. What am I?", "A secret", Difficulty::Extreme, "logic", 1245, 3800, false),
    feat!("ir5", "I'm light as a feather, yet the strongest person can't hold me for more than a minute. What am I?", "Breath", Difficulty::Medium, "logic", 1189, 3420, false),
    feat!("ir6", "I'm full of holes but still hold water. What am I?", "A sponge", Difficulty::Easy, "logic", 867, 2780, false),
    feat!("ir7", "The more you take, the more you leave behind. What am I?", "Footsteps", Difficulty::Medium, "logic", 1312, 3560, false),
    feat!("ir9", "What has a head, a tail, is brown, and has no legs?", "A penny", Difficulty::Medium, "wordplay", 945, 2890, false),
    feat!("ir10", "What goes up but never comes down?", "Your age", Difficulty::Easy, "logic", 986, 3120, false),
  ]
}

/// Combined pool for the generator and challenge mode: impossible first, then
/// trending (the order the views present them in).
pub fn best_riddles() -> Vec<FeatureRiddle> {
  let mut all = impossible_riddles();
  all.extend(trending_riddles());
  all
}

/// Hand-written page copy for the most popular category slugs.
pub fn seed_page_content() -> HashMap<String, PageContent> {
  HashMap::from([
    (
      "animal-riddles".to_string(),
      PageContent {
        title: "Animal Riddles That Stump Everyone".into(),
        hero_text: "From elephants to octopuses, guess the creature behind each clue.".into(),
        meta_description: "Brain-teasing animal riddles with answers, from easy to expert.".into(),
      },
    ),
    (
      "what-am-i".to_string(),
      PageContent {
        title: "What Am I Riddles".into(),
        hero_text: "Classic identity riddles. One object, a few clues, endless second-guessing.".into(),
        meta_description: "A collection of classic what-am-i riddles with answers.".into(),
      },
    ),
  ])
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn corpus_ids_are_unique() {
    let corpus = seed_corpus();
    let ids: HashSet<_> = corpus.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), corpus.len());
  }

  #[test]
  fn feature_ids_are_unique_across_pools() {
    let all = best_riddles();
    let ids: HashSet<_> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), all.len());
  }
}
