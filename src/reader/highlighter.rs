use log::debug;
use std::time::Duration;

use super::{scroll, ReaderSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Idle,
    Playing,
}

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The word at this index is now highlighted and another tick is pending.
    Highlighted(usize),
    /// The passage ran out; the reader stopped and rewound.
    Finished,
    /// The reader was idle, so the tick was stale.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Reader {
    word_count: usize,
    cursor: usize,
    state: ReaderState,
    word_delay: Duration,
    scroll_margin: f64,
}

impl Reader {
    pub fn new(word_count: usize, word_delay: Duration, scroll_margin: f64) -> Self {
        Self {
            word_count,
            cursor: 0,
            state: ReaderState::Idle,
            word_delay,
            scroll_margin,
        }
    }

    /// Index of the next word to highlight.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ReaderState::Playing
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn word_delay(&self) -> Duration {
        self.word_delay
    }

    /// Starts reading from the cursor. Returns `false` if already playing.
    pub fn start<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.is_playing() {
            return false;
        }

        debug!("reader started at word {}", self.cursor);
        self.state = ReaderState::Playing;
        surface.show_playing(true);
        surface.play_audio();
        self.advance(surface);
        true
    }

    /// Pauses reading, keeping the cursor. Returns `false` if already idle.
    pub fn pause<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.is_playing() {
            return false;
        }

        debug!("reader paused at word {}", self.cursor);
        self.state = ReaderState::Idle;
        surface.show_playing(false);
        surface.cancel_advance();
        surface.pause_audio();
        true
    }

    /// Pauses, clears every highlight and rewinds to the top.
    pub fn stop<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) {
        self.pause(surface);
        surface.clear_highlights();
        self.cursor = 0;
        surface.set_scroll_top(0.0);
    }

    /// Highlights the word under the cursor and schedules the next tick, or
    /// stops once every word has been read.
    pub fn advance<S: ReaderSurface + ?Sized>(&mut self, surface: &mut S) -> Step {
        if !self.is_playing() {
            return Step::Ignored;
        }

        if self.cursor >= self.word_count {
            debug!("reader finished {} words", self.word_count);
            self.stop(surface);
            return Step::Finished;
        }

        let index = self.cursor;
        if index > 0 {
            surface.set_highlight(index - 1, false);
        }
        surface.set_highlight(index, true);

        let offset_top = surface.word_offset_top(index);
        if let Some(top) = scroll::follow(surface.viewport(), offset_top, self.scroll_margin) {
            surface.set_scroll_top(top);
        }

        self.cursor += 1;
        surface.schedule_advance(self.word_delay);
        Step::Highlighted(index)
    }
}
