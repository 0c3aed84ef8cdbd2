//! Configuration loading from tropematch.toml.
//!
//! Scoring tunables live in [`ScoringConfig`]; this module adds the file
//! layer. Search order is the conventional one: `tropematch.toml` in the
//! given directory, then walking up the tree, then built-in defaults.
//!
//! ## Example
//!
//! ```toml
//! max-trope-intersections = 20
//! extend-excluded-genres = ["Dime Novel Revival"]
//!
//! [merged-genres]
//! "Mystery Lit" = "Mystery Fiction"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::ScoringConfig;

/// Raw config as deserialized from TOML. Every field optional; omitted
/// fields keep their defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    /// Cap on counted trope intersections; 0 disables the cap.
    max_trope_intersections: Option<usize>,

    /// Replaces the default genre exclusion list if set.
    excluded_genres: Option<Vec<String>>,

    /// Extends the default genre exclusion list.
    extend_excluded_genres: Option<Vec<String>>,

    /// Replaces the default alias map if set.
    merged_genres: Option<HashMap<String, String>>,
}

impl ScoringConfig {
    /// Load configuration starting from the given directory.
    ///
    /// Search order:
    /// 1. tropematch.toml in `directory`
    /// 2. tropematch.toml walking up from `directory`
    /// 3. Built-in defaults
    pub fn load(directory: &Path) -> Self {
        let mut current = Some(directory);
        while let Some(dir) = current {
            let candidate = dir.join("tropematch.toml");
            if candidate.exists() {
                if let Some(config) = Self::load_file(&candidate) {
                    debug!(path = %candidate.display(), "loaded scoring config");
                    return config;
                }
                warn!(path = %candidate.display(), "ignoring unparseable config");
            }
            current = dir.parent();
        }
        Self::default()
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::from_toml_str(&content)
    }

    fn from_toml_str(content: &str) -> Option<Self> {
        let raw: RawConfig = toml::from_str(content).ok()?;
        Some(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();

        if let Some(cap) = raw.max_trope_intersections {
            config.max_trope_intersections = if cap == 0 { None } else { Some(cap) };
        }
        if let Some(excluded) = raw.excluded_genres {
            // Custom exclusions replace the defaults.
            config.excluded_genres = excluded.into_iter().collect();
        }
        if let Some(extra) = raw.extend_excluded_genres {
            config.excluded_genres.extend(extra);
        }
        if let Some(merged) = raw.merged_genres {
            config.merged_genres = merged;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = ScoringConfig::from_toml_str("").unwrap();
        assert_eq!(config.max_trope_intersections, Some(20));
        assert!(config.excluded_genres.contains("Picaresque"));
    }

    #[test]
    fn test_cap_override_and_disable() {
        let config = ScoringConfig::from_toml_str("max-trope-intersections = 5").unwrap();
        assert_eq!(config.max_trope_intersections, Some(5));

        let config = ScoringConfig::from_toml_str("max-trope-intersections = 0").unwrap();
        assert_eq!(config.max_trope_intersections, None);
    }

    #[test]
    fn test_excluded_genres_replace() {
        let config =
            ScoringConfig::from_toml_str(r#"excluded-genres = ["Penny Dreadful"]"#).unwrap();
        assert!(config.excluded_genres.contains("Penny Dreadful"));
        assert!(!config.excluded_genres.contains("Picaresque"));
    }

    #[test]
    fn test_extend_excluded_genres() {
        let config =
            ScoringConfig::from_toml_str(r#"extend-excluded-genres = ["Penny Dreadful"]"#)
                .unwrap();
        // Defaults survive, plus the extension.
        assert!(config.excluded_genres.contains("Picaresque"));
        assert!(config.excluded_genres.contains("Penny Dreadful"));
    }

    #[test]
    fn test_merged_genres_table() {
        let config = ScoringConfig::from_toml_str(
            "[merged-genres]\n\"Space Opera\" = \"Science Fiction\"\n",
        )
        .unwrap();
        assert_eq!(
            config.merged_genres.get("Space Opera").map(String::as_str),
            Some("Science Fiction")
        );
        assert!(config.merged_genres.get("Mystery Lit").is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(ScoringConfig::from_toml_str("not toml [").is_none());
    }
}
