use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

use super::dom::{create, set_display};
use crate::quiz::{DropOutcome, Feedback, GradeReport, Quiz, QuizBoard, TokenLocation};

const HAS_WORD_CLASS: &str = "has-word";

/// Rendered quiz: question list, blanks, the word bank, feedback region and
/// the retry dialog. Element vectors are indexed by blank and token id.
pub struct QuizView {
    pub blanks: Vec<HtmlElement>,
    pub tokens: Vec<HtmlElement>,
    pub bank: HtmlElement,
    feedback: HtmlElement,
    modal: HtmlElement,
}

impl QuizView {
    pub fn render(
        document: &Document,
        quiz: &Quiz,
        board: &QuizBoard,
        questions: &HtmlElement,
        bank: HtmlElement,
        feedback: HtmlElement,
        modal: HtmlElement,
    ) -> Result<Self, JsValue> {
        bank.set_inner_html("");
        questions.set_inner_html("");
        feedback.set_inner_html("");
        feedback.class_list().remove_2("correct", "incorrect")?;

        let mut tokens = Vec::with_capacity(board.tokens().len());
        for token in board.tokens() {
            let span: HtmlElement = create(document, "span")?;
            span.set_class_name("draggable-word");
            span.set_draggable(true);
            span.set_text_content(Some(&token.text));
            span.set_attribute("data-token-id", &token.id.0.to_string())?;
            bank.append_child(&span)?;
            tokens.push(span);
        }

        let mut blanks = Vec::with_capacity(board.blanks().len());
        for ((index, item), blank) in quiz.items.iter().enumerate().zip(board.blanks()) {
            let (before, after) = item.segments();

            let question: HtmlElement = create(document, "div")?;
            question.set_class_name("quiz-question");

            let number: HtmlElement = create(document, "span")?;
            number.set_text_content(Some(&format!("{}. ", index + 1)));
            question.append_child(&number)?;
            question.append_child(&document.create_text_node(before))?;

            let slot: HtmlElement = create(document, "span")?;
            slot.set_class_name("quiz-blank");
            slot.set_id(&blank.slug);
            slot.set_attribute("data-correct-answer", &blank.answer)?;
            slot.set_attribute("data-blank-id", &blank.id.0.to_string())?;
            question.append_child(&slot)?;

            question.append_child(&document.create_text_node(after))?;
            questions.append_child(&question)?;
            blanks.push(slot);
        }

        Ok(Self {
            blanks,
            tokens,
            bank,
            feedback,
            modal,
        })
    }

    /// Moves token elements to match a drop on the board.
    pub fn apply_drop(&self, outcome: &DropOutcome) -> Result<(), JsValue> {
        if let Some(blank) = outcome.vacated.and_then(|id| self.blanks.get(id.0)) {
            blank.class_list().remove_1(HAS_WORD_CLASS)?;
        }
        if let Some(token) = outcome.displaced.and_then(|id| self.tokens.get(id.0)) {
            self.bank.append_child(token)?;
        }

        let Some(token) = self.tokens.get(outcome.token.0) else {
            return Ok(());
        };
        match outcome.to {
            TokenLocation::Bank => {
                self.bank.append_child(token)?;
            }
            TokenLocation::Blank(id) => {
                if let Some(blank) = self.blanks.get(id.0) {
                    blank.append_child(token)?;
                    blank.class_list().add_1(HAS_WORD_CLASS)?;
                }
            }
        }
        Ok(())
    }

    /// Recolors blanks and their occupants, clearing colors from earlier checks.
    pub fn show_report(&self, report: &GradeReport) -> Result<(), JsValue> {
        for token in &self.tokens {
            token.style().remove_property("background-color")?;
        }

        for mark in &report.marks {
            let color = mark.mark.color();
            if let Some(blank) = self.blanks.get(mark.blank.0) {
                blank.style().set_property("border-color", color)?;
            }
            if let Some(token) = mark.occupant.and_then(|id| self.tokens.get(id.0)) {
                token.style().set_property("background-color", color)?;
            }
        }

        self.show_feedback(&report.feedback())
    }

    /// Puts every token back in the bank in board order and clears marks,
    /// feedback and the dialog.
    pub fn reset(&self, board: &QuizBoard) -> Result<(), JsValue> {
        for blank in &self.blanks {
            blank.class_list().remove_1(HAS_WORD_CLASS)?;
            blank.style().remove_property("border-color")?;
        }
        for token in &self.tokens {
            token.style().remove_property("background-color")?;
        }
        for id in board.bank() {
            if let Some(token) = self.tokens.get(id.0) {
                self.bank.append_child(token)?;
            }
        }

        self.feedback.set_text_content(None);
        self.feedback.class_list().remove_2("correct", "incorrect")?;
        self.set_modal_visible(false);
        Ok(())
    }

    fn show_feedback(&self, feedback: &Feedback) -> Result<(), JsValue> {
        self.feedback.set_text_content(Some(&feedback.to_string()));
        let classes = self.feedback.class_list();
        classes.remove_2("correct", "incorrect")?;
        if let Some(class) = feedback.class() {
            classes.add_1(class)?;
        }
        Ok(())
    }

    pub fn set_modal_visible(&self, visible: bool) {
        set_display(&self.modal, if visible { "flex" } else { "none" });
    }

    pub fn is_modal(&self, element: &HtmlElement) -> bool {
        *element == self.modal
    }
}
