//! Browser bindings: mounts a [`Session`] onto the lesson page and wires the
//! reader controls, drag-and-drop and the quiz check to it.

mod dom;
mod quiz_view;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Event, EventTarget, HtmlAudioElement, HtmlElement};

use crate::config::LessonConfig;
use crate::error::LessonError;
use crate::passage::Passage;
use crate::quiz::{BlankId, TokenId};
use crate::session::Session;
use dom::{element_by_id, query, DomReader, ReaderElements};
use quiz_view::QuizView;

const TRANSCRIPT_ID: &str = "transcript-text";
const CONTAINER_ID: &str = "text-container";
const PLAY_ID: &str = "play-btn";
const PAUSE_ID: &str = "pause-btn";
const STOP_ID: &str = "stop-btn";
const AUDIO_ID: &str = "background-audio";
const WORD_BANK_ID: &str = "word-bank";
const QUESTIONS_ID: &str = "quiz-questions";
const CHECK_ID: &str = "check-quiz-btn";
const RESET_ID: &str = "reset-quiz-btn";
const FEEDBACK_ID: &str = "quiz-feedback";
const MODAL_ID: &str = "retry-popup";
const MODAL_CLOSE_SELECTOR: &str = "#retry-popup .close-btn";

// initializing the logger twice panics, so it lives behind a LazyLock
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

impl From<LessonError> for JsValue {
    fn from(e: LessonError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

struct Page {
    session: Session,
    reader: DomReader,
    quiz: QuizView,
}

type SharedPage = Rc<RefCell<Page>>;

/// Builds the lesson from the transcript on the page and wires every control.
/// `config_yaml` overrides the default lesson settings.
#[wasm_bindgen]
pub fn start_lesson(config_yaml: Option<String>) -> Result<(), JsValue> {
    LazyLock::force(&LOGGER);

    let config = match config_yaml {
        Some(yaml) => LessonConfig::from_yaml(&yaml)?,
        None => LessonConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let transcript: HtmlElement = element_by_id(&document, TRANSCRIPT_ID)?;
    let passage = Passage::new(transcript.inner_text())?;
    let session = Session::build(&mut rand::thread_rng(), passage, &config);

    let words: Vec<String> = session.words().iter().map(|w| w.text.clone()).collect();
    let reader = DomReader::mount(
        window.clone(),
        &document,
        ReaderElements {
            transcript,
            container: element_by_id(&document, CONTAINER_ID)?,
            audio: element_by_id::<HtmlAudioElement>(&document, AUDIO_ID)?,
            play_button: element_by_id(&document, PLAY_ID)?,
            pause_button: element_by_id(&document, PAUSE_ID)?,
        },
        &words,
    )?;

    let quiz = QuizView::render(
        &document,
        &session.lesson().quiz,
        session.board(),
        &element_by_id(&document, QUESTIONS_ID)?,
        element_by_id(&document, WORD_BANK_ID)?,
        element_by_id(&document, FEEDBACK_ID)?,
        element_by_id(&document, MODAL_ID)?,
    )?;

    let page: SharedPage = Rc::new(RefCell::new(Page {
        session,
        reader,
        quiz,
    }));

    bind_reader(&page, &document)?;
    bind_drag_and_drop(&page)?;
    bind_check(&page, &document)?;
    bind_reset(&page, &document)?;
    bind_modal(&page, &window, &document)?;

    log::info!(
        "lesson mounted with {} words and {} questions",
        words.len(),
        page.borrow().session.lesson().quiz.len()
    );
    Ok(())
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_reader(page: &SharedPage, document: &web_sys::Document) -> Result<(), JsValue> {
    // the timer callback holds a weak handle so a torn-down page is not kept alive
    let weak = Rc::downgrade(page);
    let tick = Closure::wrap(Box::new(move || {
        if let Some(page) = weak.upgrade() {
            let mut page = page.borrow_mut();
            let Page {
                session, reader, ..
            } = &mut *page;
            session.tick(reader);
        }
    }) as Box<dyn FnMut()>);
    page.borrow_mut()
        .reader
        .set_on_tick(tick.as_ref().unchecked_ref::<Function>().clone());
    tick.forget();

    let play: HtmlElement = element_by_id(document, PLAY_ID)?;
    let play_page = Rc::clone(page);
    listen(&play, "click", move |_| {
        let mut page = play_page.borrow_mut();
        let Page {
            session, reader, ..
        } = &mut *page;
        session.play(reader);
    })?;

    let pause: HtmlElement = element_by_id(document, PAUSE_ID)?;
    let pause_page = Rc::clone(page);
    listen(&pause, "click", move |_| {
        let mut page = pause_page.borrow_mut();
        let Page {
            session, reader, ..
        } = &mut *page;
        session.pause(reader);
    })?;

    let stop: HtmlElement = element_by_id(document, STOP_ID)?;
    let stop_page = Rc::clone(page);
    listen(&stop, "click", move |_| {
        let mut page = stop_page.borrow_mut();
        let Page {
            session, reader, ..
        } = &mut *page;
        session.stop(reader);
    })?;

    Ok(())
}

fn bind_drag_and_drop(page: &SharedPage) -> Result<(), JsValue> {
    let (tokens, blanks, bank) = {
        let page = page.borrow();
        (
            page.quiz.tokens.clone(),
            page.quiz.blanks.clone(),
            page.quiz.bank.clone(),
        )
    };

    for (index, element) in tokens.into_iter().enumerate() {
        let token = TokenId(index);

        let start_page = Rc::clone(page);
        let dragged = element.clone();
        listen(&element, "dragstart", move |event| {
            if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(|e| e.data_transfer()) {
                // firefox refuses to start a drag without data
                let _ = transfer.set_data("text/plain", &token.0.to_string());
            }
            if start_page.borrow_mut().session.drag_start(token) {
                let _ = dragged.class_list().add_1("dragging");
            }
        })?;

        let end_page = Rc::clone(page);
        let dragged = element.clone();
        listen(&element, "dragend", move |_| {
            let _ = dragged.class_list().remove_1("dragging");
            end_page.borrow_mut().session.drag_end();
        })?;
    }

    for (index, element) in blanks.into_iter().enumerate() {
        let blank = BlankId(index);

        let over = element.clone();
        listen(&element, "dragover", move |event| {
            event.prevent_default();
            let _ = over.class_list().add_1("drag-over");
        })?;

        let left = element.clone();
        listen(&element, "dragleave", move |_| {
            let _ = left.class_list().remove_1("drag-over");
        })?;

        let drop_page = Rc::clone(page);
        let target = element.clone();
        listen(&element, "drop", move |event| {
            event.prevent_default();
            let _ = target.class_list().remove_1("drag-over");

            let mut page = drop_page.borrow_mut();
            if let Some(outcome) = page.session.drop_on_blank(blank) {
                if let Err(e) = page.quiz.apply_drop(&outcome) {
                    log::error!("failed to move word into blank: {e:?}");
                }
            }
        })?;
    }

    let over = bank.clone();
    listen(&bank, "dragover", move |event| {
        event.prevent_default();
        let _ = over.class_list().add_1("drag-over-bank");
    })?;

    let left = bank.clone();
    listen(&bank, "dragleave", move |_| {
        let _ = left.class_list().remove_1("drag-over-bank");
    })?;

    let drop_page = Rc::clone(page);
    let target = bank.clone();
    listen(&bank, "drop", move |event| {
        event.prevent_default();
        let _ = target.class_list().remove_1("drag-over-bank");

        let mut page = drop_page.borrow_mut();
        if let Some(outcome) = page.session.drop_on_bank() {
            if let Err(e) = page.quiz.apply_drop(&outcome) {
                log::error!("failed to move word back to the bank: {e:?}");
            }
        }
    })?;

    Ok(())
}

fn bind_check(page: &SharedPage, document: &web_sys::Document) -> Result<(), JsValue> {
    let check: HtmlElement = element_by_id(document, CHECK_ID)?;
    let check_page = Rc::clone(page);
    listen(&check, "click", move |_| {
        let mut page = check_page.borrow_mut();
        let report = page.session.check().clone();
        if let Err(e) = page.quiz.show_report(&report) {
            log::error!("failed to show quiz results: {e:?}");
        }
        if page.session.modal_open() {
            page.quiz.set_modal_visible(true);
        }
    })
}

fn bind_reset(page: &SharedPage, document: &web_sys::Document) -> Result<(), JsValue> {
    let reset: HtmlElement = element_by_id(document, RESET_ID)?;
    let reset_page = Rc::clone(page);
    listen(&reset, "click", move |_| {
        let mut page = reset_page.borrow_mut();
        page.session.reset_quiz();
        let Page { session, quiz, .. } = &*page;
        if let Err(e) = quiz.reset(session.board()) {
            log::error!("failed to reset the quiz: {e:?}");
        }
    })
}

fn close_modal(page: &mut Page) {
    page.session.dismiss_modal();
    page.quiz.set_modal_visible(false);
}

fn bind_modal(
    page: &SharedPage,
    window: &web_sys::Window,
    document: &web_sys::Document,
) -> Result<(), JsValue> {
    let close: HtmlElement = query(document, MODAL_CLOSE_SELECTOR)?;
    let close_page = Rc::clone(page);
    listen(&close, "click", move |_| {
        close_modal(&mut close_page.borrow_mut());
    })?;

    // a click on the dialog's backdrop, not its content, closes it too
    let outside_page = Rc::clone(page);
    listen(window, "click", move |event| {
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let mut page = outside_page.borrow_mut();
        if page.quiz.is_modal(&target) {
            close_modal(&mut page);
        }
    })
}
