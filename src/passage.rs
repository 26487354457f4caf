use regex::Regex;
use std::sync::LazyLock;

use crate::error::LessonError;

// a sentence is a run of non-terminal characters closed by one or more of `.!?`
static SENTENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

/// The source text of a lesson, read once when the lesson is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    text: String,
}

/// One whitespace-delimited word of the passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    pub index: usize,
    pub text: String,
}

impl Passage {
    pub fn new(text: impl Into<String>) -> Result<Self, LessonError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(LessonError::EmptyPassage);
        }

        Ok(Self { text })
    }

    /// The passage with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn words(&self) -> Vec<WordToken> {
        self.text
            .split_whitespace()
            .enumerate()
            .map(|(index, text)| WordToken {
                index,
                text: text.to_string(),
            })
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Sentences closed by terminal punctuation, with line breaks and runs of
    /// whitespace collapsed to single spaces. Trailing text with no terminal
    /// punctuation is not a sentence.
    pub fn sentences(&self) -> Vec<String> {
        SENTENCE_REGEX
            .find_iter(self.text())
            .map(|m| m.as_str().split_whitespace().collect::<Vec<&str>>().join(" "))
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Joins tokens back with single spaces.
pub fn join_words(words: &[WordToken]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<&str>>()
        .join(" ")
}
