use serde::Serialize;
use std::fmt;

use super::board::{BlankId, QuizBoard, TokenId};

pub const CORRECT_COLOR: &str = "var(--correct-color)";
pub const INCORRECT_COLOR: &str = "var(--incorrect-color)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Correct,
    Incorrect,
    Empty,
}

impl Mark {
    /// Border color for the blank and background for its occupant.
    pub fn color(&self) -> &'static str {
        match self {
            Mark::Correct => CORRECT_COLOR,
            Mark::Incorrect | Mark::Empty => INCORRECT_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlankMark {
    pub blank: BlankId,
    pub occupant: Option<TokenId>,
    pub mark: Mark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    pub correct: usize,
    pub total: usize,
    pub marks: Vec<BlankMark>,
}

impl GradeReport {
    /// True only when there is at least one blank and every blank is right.
    pub fn all_correct(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }

    pub fn feedback(&self) -> Feedback {
        if self.total == 0 {
            Feedback::NoQuestions
        } else if self.all_correct() {
            Feedback::Success {
                correct: self.correct,
                total: self.total,
            }
        } else {
            Feedback::Retry {
                correct: self.correct,
                total: self.total,
            }
        }
    }
}

/// Message shown under the quiz after checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    Success { correct: usize, total: usize },
    Retry { correct: usize, total: usize },
    NoQuestions,
}

impl Feedback {
    /// Css class for the feedback region, if any.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Feedback::Success { .. } => Some("correct"),
            Feedback::Retry { .. } => Some("incorrect"),
            Feedback::NoQuestions => None,
        }
    }

    pub fn opens_modal(&self) -> bool {
        matches!(self, Feedback::Retry { .. })
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Success { correct, total } => write!(
                f,
                "Congratulations! You got {} out of {} correct!",
                correct, total
            ),
            Feedback::Retry { correct, total } => {
                write!(f, "Keep trying! You got {} out of {} correct.", correct, total)
            }
            Feedback::NoQuestions => write!(f, "There are no questions to check."),
        }
    }
}

/// Compares each blank's occupant with its answer, ignoring case.
pub fn grade(board: &QuizBoard) -> GradeReport {
    let marks: Vec<BlankMark> = board
        .blanks()
        .iter()
        .map(|blank| {
            let occupant = blank.occupant();
            let mark = match occupant.and_then(|id| board.token(id)) {
                Some(token) if token.text.to_lowercase() == blank.answer.to_lowercase() => {
                    Mark::Correct
                }
                Some(_) => Mark::Incorrect,
                None => Mark::Empty,
            };
            BlankMark {
                blank: blank.id,
                occupant,
                mark,
            }
        })
        .collect();

    GradeReport {
        correct: marks.iter().filter(|m| m.mark == Mark::Correct).count(),
        total: marks.len(),
        marks,
    }
}
