//! Pure string normalization: URL-safe slugs, display titles, and the
//! normalized-keyword form used as the category key.
//!
//! All functions here are total over arbitrary strings; the empty string maps
//! to the empty string.

/// Lowercase, trim whitespace, collapse internal whitespace to single
/// hyphens, strip everything outside `[A-Za-z0-9_-]`, then collapse repeated
/// hyphens. Hyphens already at the edges of the tag are kept as-is.
/// Idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for part in text.to_lowercase().trim().split_whitespace() {
    if !out.is_empty() {
      out.push('-');
    }
    out.extend(part.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-'));
  }

  // Collapse runs of hyphens (either from the tag itself or from stripped
  // punctuation between spaces).
  let mut collapsed = String::with_capacity(out.len());
  let mut prev_hyphen = false;
  for c in out.chars() {
    if c == '-' {
      if !prev_hyphen {
        collapsed.push('-');
      }
      prev_hyphen = true;
    } else {
      collapsed.push(c);
      prev_hyphen = false;
    }
  }
  collapsed
}

/// Lowercase the input, replace hyphens with spaces, and capitalize the first
/// letter of every whitespace-delimited word.
pub fn to_title_case(token: &str) -> String {
  let spaced = token.to_lowercase().replace('-', " ");
  let mut out = String::with_capacity(spaced.len());
  let mut at_word_start = true;
  for c in spaced.chars() {
    if c.is_whitespace() {
      at_word_start = true;
      out.push(c);
    } else if at_word_start {
      out.extend(c.to_uppercase());
      at_word_start = false;
    } else {
      out.push(c);
    }
  }
  out
}

/// The CategoryKey form of a corpus keyword: hyphens become spaces.
pub fn normalize_keyword(keyword: &str) -> String {
  keyword.replace('-', " ")
}

/// Number of whitespace-delimited words in a normalized keyword.
pub fn word_count(normalized: &str) -> usize {
  normalized.split_whitespace().count()
}
