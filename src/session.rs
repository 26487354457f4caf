use log::debug;
use rand::Rng;
use std::time::Duration;

use crate::config::LessonConfig;
use crate::lesson::Lesson;
use crate::passage::{Passage, WordToken};
use crate::quiz::{grade, BlankId, DropOutcome, Feedback, GradeReport, QuizBoard, TokenId};
use crate::reader::{Reader, ReaderSurface, Step};

/// Everything one page load owns: the lesson, the reader cursor, blank
/// occupancy, the last grade and whether the retry dialog is open.
#[derive(Debug, Clone)]
pub struct Session {
    lesson: Lesson,
    words: Vec<WordToken>,
    reader: Reader,
    board: QuizBoard,
    report: Option<GradeReport>,
    modal_open: bool,
}

impl Session {
    pub fn new(lesson: Lesson, config: &LessonConfig) -> Self {
        let words = lesson.passage.words();
        let reader = Reader::new(
            words.len(),
            Duration::from_millis(lesson.word_delay_ms),
            config.scroll_margin_px,
        );
        let board = lesson.board();

        Self {
            lesson,
            words,
            reader,
            board,
            report: None,
            modal_open: false,
        }
    }

    pub fn build<R>(rng: &mut R, passage: Passage, config: &LessonConfig) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(Lesson::build(rng, passage, config), config)
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn words(&self) -> &[WordToken] {
        &self.words
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn board(&self) -> &QuizBoard {
        &self.board
    }

    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.report.as_ref().map(GradeReport::feedback)
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn play<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.reader.start(surface)
    }

    pub fn pause<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.reader.pause(surface)
    }

    pub fn stop<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) {
        self.reader.stop(surface)
    }

    /// Timer callback for the reader.
    pub fn tick<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) -> Step {
        self.reader.advance(surface)
    }

    pub fn drag_start(&mut self, token: TokenId) -> bool {
        self.board.drag_start(token)
    }

    pub fn drag_end(&mut self) -> Option<TokenId> {
        self.board.drag_end()
    }

    pub fn drop_on_blank(&mut self, blank: BlankId) -> Option<DropOutcome> {
        self.board.drop_on_blank(blank)
    }

    pub fn drop_on_bank(&mut self) -> Option<DropOutcome> {
        self.board.drop_on_bank()
    }

    /// Grades the current placement. A retry result opens the dialog.
    pub fn check(&mut self) -> &GradeReport {
        let report = grade(&self.board);
        let feedback = report.feedback();
        debug!("quiz checked: {}", feedback);

        if feedback.opens_modal() {
            self.modal_open = true;
        }
        self.report.insert(report)
    }

    pub fn dismiss_modal(&mut self) {
        self.modal_open = false;
    }

    /// Puts every answer back in the bank and forgets the last grade.
    pub fn reset_quiz(&mut self) {
        self.board.reset();
        self.report = None;
        self.modal_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Mark;
    use rand::{rngs::StdRng, SeedableRng};

    fn session(text: &str, vocabulary: &[&str]) -> Session {
        let config = LessonConfig {
            vocabulary: vocabulary.iter().map(|w| w.to_string()).collect(),
            ..LessonConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        Session::build(&mut rng, Passage::new(text).unwrap(), &config)
    }

    #[test]
    fn correct_answer_closes_no_dialog() {
        let mut session = session("The cat ran. The dog howled loudly.", &["howled"]);

        assert!(session.drag_start(TokenId(0)));
        assert!(session.drop_on_blank(BlankId(0)).is_some());
        session.drag_end();

        let report = session.check();
        assert_eq!(report.correct, 1);
        assert!(report.all_correct());
        assert!(!session.modal_open());
        assert_eq!(
            session.feedback(),
            Some(Feedback::Success { correct: 1, total: 1 })
        );
    }

    #[test]
    fn empty_blank_opens_dialog_until_dismissed() {
        let mut session = session("The cat ran. The dog howled loudly.", &["howled"]);

        let report = session.check();
        assert_eq!(report.correct, 0);
        assert!(!report.all_correct());
        assert_eq!(report.marks[0].mark, Mark::Empty);
        assert!(session.modal_open());

        session.dismiss_modal();
        assert!(!session.modal_open());
    }

    #[test]
    fn regrading_replaces_previous_marks() {
        let mut session = session("The cat ran. The dog howled loudly.", &["howled"]);
        session.check();
        session.dismiss_modal();

        session.drag_start(TokenId(0));
        session.drop_on_blank(BlankId(0));
        assert_eq!(session.check().marks[0].mark, Mark::Correct);
        assert!(!session.modal_open());
    }

    #[test]
    fn reset_quiz_clears_placement_and_feedback() {
        let mut session = session("The cat ran. The dog howled loudly.", &["howled"]);
        session.drag_start(TokenId(0));
        session.drop_on_blank(BlankId(0));
        session.check();

        session.reset_quiz();
        assert_eq!(session.board().bank(), &[TokenId(0)]);
        assert_eq!(session.feedback(), None);
        assert!(!session.modal_open());
    }

    #[test]
    fn empty_quiz_does_not_open_dialog() {
        let mut session = session("The cat ran.", &["howled"]);
        let report = session.check();
        assert_eq!(report.total, 0);
        assert!(!session.modal_open());
        assert_eq!(session.feedback(), Some(Feedback::NoQuestions));
    }

    #[test]
    fn reader_covers_every_word() {
        let session = session("The cat ran. The dog howled loudly.", &["howled"]);
        assert_eq!(session.words().len(), 7);
        assert_eq!(session.reader().word_count(), 7);
        assert_eq!(session.reader().word_delay(), Duration::from_millis(180));
    }
}
