mod board;
mod generator;
mod grader;
mod item;

pub use board::{AnswerToken, Blank, BlankId, DropOutcome, QuizBoard, TokenId, TokenLocation};
pub use generator::generate_quiz;
pub use grader::{grade, BlankMark, Feedback, GradeReport, Mark, CORRECT_COLOR, INCORRECT_COLOR};
pub use item::{Quiz, QuizItem, BLANK_MARKER};
