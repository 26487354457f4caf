use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, time::Duration};

use crate::error::LessonError;

pub const DEFAULT_WORD_DELAY_MS: u64 = 180; // roughly 330 words per minute
/// Longest delay a browser timer accepts.
pub const MAX_WORD_DELAY_MS: u64 = i32::MAX as u64;
pub const DEFAULT_SCROLL_MARGIN_PX: f64 = 80.0;
pub const DEFAULT_MAX_QUESTIONS: usize = 15;

pub const WORD_DELAY_ENV: &str = "READALONG_WORD_DELAY_MS";
pub const MAX_QUESTIONS_ENV: &str = "READALONG_MAX_QUESTIONS";

pub const DEFAULT_VOCABULARY: [&str; 20] = [
    "abandoned",
    "legend",
    "roamed",
    "curiosity",
    "investigate",
    "skeptical",
    "howled",
    "groaned",
    "glinting",
    "tarnished",
    "purpose",
    "pounding",
    "elegant",
    "treasure",
    "ruse",
    "solved",
    "valuable",
    "thrilling",
    "discovery",
    "rest",
];

/// Lesson settings, loaded from defaults, then an optional YAML file, then the
/// environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    pub title: String,
    pub word_delay_ms: u64,
    pub scroll_margin_px: f64,
    pub max_questions: usize,
    pub vocabulary: Vec<String>,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            title: String::from("Read Along"),
            word_delay_ms: DEFAULT_WORD_DELAY_MS,
            scroll_margin_px: DEFAULT_SCROLL_MARGIN_PX,
            max_questions: DEFAULT_MAX_QUESTIONS,
            vocabulary: DEFAULT_VOCABULARY.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl LessonConfig {
    pub fn from_yaml(source: &str) -> Result<Self, LessonError> {
        let config: LessonConfig = serde_yaml_ng::from_str(source)?;
        config.validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LessonError> {
        let source = fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    /// Loads `.env` if present and applies `READALONG_*` overrides.
    pub fn with_env_overrides(self) -> Result<Self, LessonError> {
        dotenv::dotenv().ok();
        self.apply_overrides(|name| env::var(name).ok())
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, LessonError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = lookup(WORD_DELAY_ENV) {
            self.word_delay_ms = parse_env(WORD_DELAY_ENV, value)?;
        }
        if let Some(value) = lookup(MAX_QUESTIONS_ENV) {
            self.max_questions = parse_env(MAX_QUESTIONS_ENV, value)?;
        }

        self.validate()
    }

    fn validate(self) -> Result<Self, LessonError> {
        if self.word_delay_ms == 0 || self.word_delay_ms > MAX_WORD_DELAY_MS {
            return Err(LessonError::InvalidPacing(self.word_delay_ms));
        }
        Ok(self)
    }

    pub fn word_delay(&self) -> Duration {
        Duration::from_millis(self.word_delay_ms)
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, LessonError> {
    value
        .trim()
        .parse()
        .map_err(|_| LessonError::InvalidEnv { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_lesson() {
        let config = LessonConfig::default();
        assert_eq!(config.word_delay(), Duration::from_millis(180));
        assert_eq!(config.max_questions, 15);
        assert_eq!(config.vocabulary.len(), 20);
        assert!(config.vocabulary.contains(&"howled".to_string()));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = LessonConfig::from_yaml("title: The Old House\nword_delay_ms: 250\n").unwrap();
        assert_eq!(config.title, "The Old House");
        assert_eq!(config.word_delay_ms, 250);
        assert_eq!(config.scroll_margin_px, DEFAULT_SCROLL_MARGIN_PX);
        assert_eq!(config.vocabulary.len(), 20);
    }

    #[test]
    fn zero_delay_is_rejected() {
        assert!(matches!(
            LessonConfig::from_yaml("word_delay_ms: 0"),
            Err(LessonError::InvalidPacing(0))
        ));
    }

    #[test]
    fn delay_past_timer_range_is_rejected() {
        let too_long = MAX_WORD_DELAY_MS + 1;
        assert!(matches!(
            LessonConfig::from_yaml(&format!("word_delay_ms: {too_long}")),
            Err(LessonError::InvalidPacing(ms)) if ms == too_long
        ));

        let config = LessonConfig::from_yaml(&format!("word_delay_ms: {MAX_WORD_DELAY_MS}")).unwrap();
        assert_eq!(config.word_delay_ms, MAX_WORD_DELAY_MS);

        let err = LessonConfig::default()
            .apply_overrides(|name| (name == WORD_DELAY_ENV).then(|| "99999999999".to_string()))
            .unwrap_err();
        assert!(matches!(err, LessonError::InvalidPacing(99_999_999_999)));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_questions: 3\nvocabulary: [cat, dog]").unwrap();

        let config = LessonConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_questions, 3);
        assert_eq!(config.vocabulary, vec!["cat", "dog"]);
    }

    #[test]
    fn env_overrides_apply() {
        let config = LessonConfig::default()
            .apply_overrides(|name| match name {
                WORD_DELAY_ENV => Some(" 90 ".to_string()),
                MAX_QUESTIONS_ENV => Some("4".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.word_delay_ms, 90);
        assert_eq!(config.max_questions, 4);
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = LessonConfig::default()
            .apply_overrides(|name| (name == WORD_DELAY_ENV).then(|| "fast".to_string()))
            .unwrap_err();

        assert!(matches!(
            err,
            LessonError::InvalidEnv { name: WORD_DELAY_ENV, .. }
        ));
    }
}
