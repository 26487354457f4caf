//! Timer-driven word highlighting.
//!
//! [`Reader`] holds the cursor and the idle/playing state. Everything it
//! touches outside itself (highlight markers, scrolling, audio and the pending
//! timer) goes through a [`ReaderSurface`], so the same state machine drives
//! the browser page, the terminal player and the tests.

mod highlighter;
mod scroll;

pub use highlighter::{Reader, ReaderState, Step};
pub use scroll::{follow, Viewport};

use std::time::Duration;

pub trait ReaderSurface {
    fn set_highlight(&mut self, index: usize, on: bool);

    fn clear_highlights(&mut self);

    /// Offset of the word's element from the top of the scrolling container.
    fn word_offset_top(&self, index: usize) -> f64;

    fn viewport(&self) -> Viewport;

    fn set_scroll_top(&mut self, scroll_top: f64);

    fn play_audio(&mut self);

    fn pause_audio(&mut self);

    /// Arrange for [`Reader::advance`] to be called once after `delay`.
    fn schedule_advance(&mut self, delay: Duration);

    fn cancel_advance(&mut self);

    /// Swap the play/pause controls.
    fn show_playing(&mut self, playing: bool);
}
