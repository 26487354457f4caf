use serde::{Deserialize, Serialize};

/// Placeholder standing in for the removed word inside a question.
pub const BLANK_MARKER: &str = "____BLANK____";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// source sentence with the answer replaced by [`BLANK_MARKER`]
    pub question: String,

    /// the vocabulary word as listed, case preserved
    pub answer: String,

    /// sentence the question was cut from
    pub sentence: String,
}

impl QuizItem {
    /// Question text before and after the blank.
    pub fn segments(&self) -> (&str, &str) {
        self.question
            .split_once(BLANK_MARKER)
            .unwrap_or((self.question.as_str(), ""))
    }

    /// Question text with the blank drawn as underscores, for plain-text output.
    pub fn display_question(&self) -> String {
        let (before, after) = self.segments();
        format!("{before}_____{after}")
    }
}

/// Generated quiz: questions in presentation order plus the shuffled answer bank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub items: Vec<QuizItem>,
    pub word_bank: Vec<String>,
}

impl Quiz {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
