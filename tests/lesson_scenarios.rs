use std::collections::HashSet;
use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use readalong::passage::join_words;
use readalong::quiz::{BlankId, Feedback, Mark, TokenId, TokenLocation, BLANK_MARKER};
use readalong::reader::{ReaderSurface, Step, Viewport};
use readalong::{serialize_lesson, LessonConfig, Passage, Session};

const OLD_MILL: &str = include_str!("../demos/old_mill.txt");
const LESSON_YAML: &str = include_str!("../demos/lesson.yaml");

/// Surface with no layout: every word sits at the top of the view.
#[derive(Default)]
struct NullSurface {
    highlighted: HashSet<usize>,
    pending: bool,
}

impl ReaderSurface for NullSurface {
    fn set_highlight(&mut self, index: usize, on: bool) {
        if on {
            self.highlighted.insert(index);
        } else {
            self.highlighted.remove(&index);
        }
    }

    fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }

    fn word_offset_top(&self, _index: usize) -> f64 {
        0.0
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: 0.0,
            height: 400.0,
        }
    }

    fn set_scroll_top(&mut self, _scroll_top: f64) {}

    fn play_audio(&mut self) {}

    fn pause_audio(&mut self) {}

    fn schedule_advance(&mut self, _delay: Duration) {
        self.pending = true;
    }

    fn cancel_advance(&mut self) {
        self.pending = false;
    }

    fn show_playing(&mut self, _playing: bool) {}
}

fn config(vocabulary: &[&str]) -> LessonConfig {
    LessonConfig {
        vocabulary: vocabulary.iter().map(|w| w.to_string()).collect(),
        ..LessonConfig::default()
    }
}

fn howled_session() -> Session {
    let mut rng = StdRng::seed_from_u64(1);
    Session::build(
        &mut rng,
        Passage::new("The cat ran. The dog howled loudly.").unwrap(),
        &config(&["howled"]),
    )
}

#[test]
fn single_candidate_yields_one_question() {
    let session = howled_session();
    let quiz = &session.lesson().quiz;

    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz.items[0].answer, "howled");
    assert_eq!(quiz.items[0].question, format!("The dog {BLANK_MARKER} loudly."));
}

#[test]
fn filling_the_blank_passes_without_dialog() {
    let mut session = howled_session();

    session.drag_start(TokenId(0));
    session.drop_on_blank(BlankId(0));
    session.drag_end();

    let report = session.check();
    assert_eq!(report.correct, 1);
    assert!(report.all_correct());
    assert!(!session.modal_open());
}

#[test]
fn checking_an_empty_blank_opens_dialog() {
    let mut session = howled_session();

    let report = session.check();
    assert_eq!(report.correct, 0);
    assert!(!report.all_correct());
    assert!(session.modal_open());
}

#[test]
fn demo_lesson_uses_fifteen_unique_words() {
    let config = LessonConfig::from_yaml(LESSON_YAML).unwrap();

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let session = Session::build(&mut rng, Passage::new(OLD_MILL).unwrap(), &config);
        let quiz = &session.lesson().quiz;

        assert_eq!(quiz.len(), 15);
        let answers: HashSet<&str> = quiz.items.iter().map(|i| i.answer.as_str()).collect();
        assert_eq!(answers.len(), 15);
        for item in &quiz.items {
            assert!(item.sentence.contains(&item.answer));
            assert!(OLD_MILL.contains(&item.sentence));
        }
    }
}

#[test]
fn solving_the_demo_quiz() {
    let config = LessonConfig::from_yaml(LESSON_YAML).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let mut session = Session::build(&mut rng, Passage::new(OLD_MILL).unwrap(), &config);

    // first attempt: everything one blank off
    let total = session.board().blanks().len();
    for blank in 0..total {
        let answer = session.board().blanks()[(blank + 1) % total].answer.clone();
        let token = session
            .board()
            .tokens()
            .iter()
            .find(|t| t.text == answer)
            .map(|t| t.id)
            .unwrap();
        session.drag_start(token);
        session.drop_on_blank(BlankId(blank));
        session.drag_end();
    }
    let report = session.check().clone();
    assert_eq!(report.correct, 0);
    assert!(report.marks.iter().all(|m| m.mark == Mark::Incorrect));
    assert_eq!(
        session.feedback().unwrap().to_string(),
        format!("Keep trying! You got 0 out of {total} correct.")
    );
    assert!(session.modal_open());
    session.dismiss_modal();

    // second attempt: every word dragged straight onto its own blank
    for blank in 0..total {
        let answer = session.board().blanks()[blank].answer.clone();
        let token = session
            .board()
            .tokens()
            .iter()
            .find(|t| t.text == answer)
            .map(|t| t.id)
            .unwrap();
        session.drag_start(token);
        session.drop_on_blank(BlankId(blank));
        session.drag_end();
    }

    for token in session.board().tokens() {
        assert!(matches!(token.location(), TokenLocation::Blank(_)));
    }
    assert!(session.board().bank().is_empty());

    let report = session.check();
    assert!(report.all_correct());
    assert_eq!(
        session.feedback(),
        Some(Feedback::Success {
            correct: total,
            total
        })
    );
    assert!(!session.modal_open());
}

#[test]
fn reading_the_demo_passage_to_the_end() {
    let passage = Passage::new(OLD_MILL).unwrap();
    assert_eq!(
        join_words(&passage.words()),
        OLD_MILL.split_whitespace().collect::<Vec<_>>().join(" ")
    );

    let mut rng = StdRng::seed_from_u64(3);
    let mut session = Session::build(&mut rng, passage, &LessonConfig::default());
    let mut surface = NullSurface::default();

    session.play(&mut surface);
    let mut steps = 1;
    while surface.pending {
        surface.pending = false;
        match session.tick(&mut surface) {
            Step::Highlighted(index) => {
                assert_eq!(index, steps);
                assert_eq!(surface.highlighted.len(), 1);
                steps += 1;
            }
            Step::Finished => break,
            Step::Ignored => panic!("reader went idle mid-passage"),
        }
    }

    assert_eq!(steps, session.words().len());
    assert_eq!(session.reader().cursor(), 0);
    assert!(surface.highlighted.is_empty());
}

#[test]
fn demo_lesson_exports_markdown() {
    let config = LessonConfig::from_yaml(LESSON_YAML).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let session = Session::build(&mut rng, Passage::new(OLD_MILL).unwrap(), &config);

    let page = serialize_lesson(session.lesson()).unwrap();
    assert!(page.contains("slug: the-old-mill"));
    assert_eq!(page.matches("class=\"quiz-blank\"").count(), 15);
    assert_eq!(page.matches("class=\"draggable-word\"").count(), 15);
}
