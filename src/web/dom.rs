use js_sys::Function;
use std::time::Duration;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlAudioElement, HtmlElement, Window};

use crate::error::LessonError;
use crate::reader::{ReaderSurface, Viewport};

pub const HIGHLIGHT_CLASS: &str = "highlight";

pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, LessonError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| LessonError::MissingElement(id.to_string()))
}

pub fn query<T: JsCast>(document: &Document, selector: &str) -> Result<T, LessonError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| LessonError::MissingElement(selector.to_string()))
}

pub fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> is not the expected element type")))
}

pub fn set_display(element: &HtmlElement, display: &str) {
    let _ = element.style().set_property("display", display);
}

/// Page elements the reader drives.
pub struct ReaderElements {
    pub transcript: HtmlElement,
    pub container: HtmlElement,
    pub audio: HtmlAudioElement,
    pub play_button: HtmlElement,
    pub pause_button: HtmlElement,
}

/// The transcript: one `<span class="word">` per word inside a scrolling
/// container, the background audio and the play/pause buttons.
pub struct DomReader {
    window: Window,
    words: Vec<HtmlElement>,
    container: HtmlElement,
    audio: HtmlAudioElement,
    play_button: HtmlElement,
    pause_button: HtmlElement,
    on_tick: Option<Function>,
    timer: Option<i32>,
    audio_refused: Closure<dyn FnMut(JsValue)>,
}

impl DomReader {
    /// Replaces the transcript's text with word spans separated by spaces.
    pub fn mount(
        window: Window,
        document: &Document,
        elements: ReaderElements,
        words: &[String],
    ) -> Result<Self, JsValue> {
        let ReaderElements {
            transcript,
            container,
            audio,
            play_button,
            pause_button,
        } = elements;
        transcript.set_text_content(None);

        let mut spans = Vec::with_capacity(words.len());
        for (index, word) in words.iter().enumerate() {
            if index > 0 {
                transcript.append_child(&document.create_text_node(" "))?;
            }
            let span: HtmlElement = create(document, "span")?;
            span.set_class_name("word");
            span.set_text_content(Some(word));
            transcript.append_child(&span)?;
            spans.push(span);
        }

        Ok(Self {
            window,
            words: spans,
            container,
            audio,
            play_button,
            pause_button,
            on_tick: None,
            timer: None,
            // autoplay refusal rejects the play() promise; the words keep going without sound
            audio_refused: Closure::wrap(Box::new(|reason: JsValue| {
                log::warn!("background audio was refused: {reason:?}");
            }) as Box<dyn FnMut(JsValue)>),
        })
    }

    /// Callback fired by the advance timer.
    pub fn set_on_tick(&mut self, callback: Function) {
        self.on_tick = Some(callback);
    }
}

impl ReaderSurface for DomReader {
    fn set_highlight(&mut self, index: usize, on: bool) {
        if let Some(word) = self.words.get(index) {
            let classes = word.class_list();
            let _ = if on {
                classes.add_1(HIGHLIGHT_CLASS)
            } else {
                classes.remove_1(HIGHLIGHT_CLASS)
            };
        }
    }

    fn clear_highlights(&mut self) {
        for word in &self.words {
            let _ = word.class_list().remove_1(HIGHLIGHT_CLASS);
        }
    }

    fn word_offset_top(&self, index: usize) -> f64 {
        self.words
            .get(index)
            .map(|word| word.offset_top() as f64)
            .unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.container.scroll_top() as f64,
            height: self.container.client_height() as f64,
        }
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        self.container.set_scroll_top(scroll_top.round() as i32);
    }

    fn play_audio(&mut self) {
        match self.audio.play() {
            Ok(started) => {
                let _ = started.catch(&self.audio_refused);
            }
            Err(e) => log::warn!("background audio did not start: {e:?}"),
        }
    }

    fn pause_audio(&mut self) {
        let _ = self.audio.pause();
    }

    fn schedule_advance(&mut self, delay: Duration) {
        let Some(callback) = self.on_tick.as_ref() else {
            log::error!("no tick callback set, reader cannot advance");
            return;
        };
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback, millis)
        {
            Ok(handle) => self.timer = Some(handle),
            Err(e) => log::error!("failed to schedule reader tick: {e:?}"),
        }
    }

    fn cancel_advance(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn show_playing(&mut self, playing: bool) {
        set_display(&self.play_button, if playing { "none" } else { "block" });
        set_display(&self.pause_button, if playing { "block" } else { "none" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_words(words: &[&str]) -> (HtmlElement, DomReader) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let transcript: HtmlElement = create(&document, "p").unwrap();
        transcript.set_text_content(Some("The  cat\nran."));

        let elements = ReaderElements {
            transcript: transcript.clone(),
            container: create(&document, "div").unwrap(),
            audio: create(&document, "audio").unwrap(),
            play_button: create(&document, "button").unwrap(),
            pause_button: create(&document, "button").unwrap(),
        };
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let reader = DomReader::mount(window, &document, elements, &words).unwrap();
        (transcript, reader)
    }

    #[wasm_bindgen_test]
    fn mount_wraps_each_word_in_a_span() {
        let (transcript, reader) = mount_words(&["The", "cat", "ran."]);

        assert_eq!(transcript.child_element_count(), 3);
        assert_eq!(transcript.text_content().unwrap(), "The cat ran.");
        assert_eq!(reader.words.len(), 3);
        for span in &reader.words {
            assert_eq!(span.class_name(), "word");
        }
        assert_eq!(reader.words[1].text_content().unwrap(), "cat");
    }

    #[wasm_bindgen_test]
    fn highlight_moves_between_spans() {
        let (transcript, mut reader) = mount_words(&["The", "cat", "ran."]);

        reader.set_highlight(0, true);
        reader.set_highlight(0, false);
        reader.set_highlight(2, true);

        let lit = transcript.query_selector(".highlight").unwrap().unwrap();
        assert_eq!(lit.text_content().unwrap(), "ran.");

        reader.clear_highlights();
        assert!(transcript.query_selector(".highlight").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn playing_toggles_the_buttons() {
        let (_, mut reader) = mount_words(&["The"]);

        reader.show_playing(true);
        assert_eq!(reader.play_button.style().get_property_value("display").unwrap(), "none");
        assert_eq!(reader.pause_button.style().get_property_value("display").unwrap(), "block");

        reader.show_playing(false);
        assert_eq!(reader.play_button.style().get_property_value("display").unwrap(), "block");
        assert_eq!(reader.pause_button.style().get_property_value("display").unwrap(), "none");
    }

    #[wasm_bindgen_test]
    fn oversized_delay_still_schedules() {
        let (_, mut reader) = mount_words(&["The"]);
        reader.set_on_tick(Function::new_no_args(""));

        reader.schedule_advance(Duration::from_millis(u64::MAX));
        assert!(reader.timer.is_some());
        reader.cancel_advance();
        assert!(reader.timer.is_none());
    }
}
