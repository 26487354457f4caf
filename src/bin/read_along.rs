use std::io::Write;
use std::time::Duration;
use std::{env, fs, io, thread};

use anyhow::Context;
use log::info;
use readalong::reader::{Reader, ReaderSurface, Step, Viewport};
use readalong::{Lesson, LessonConfig, Passage};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const CLEAR: &str = "\x1b[2J\x1b[H";

const LINE_WIDTH: usize = 72;
const VISIBLE_LINES: usize = 6;
// keep one line of text below the active word
const MARGIN_LINES: f64 = 1.0;

/// Shows a window of wrapped lines and bolds the active word. Offsets are in
/// lines rather than pixels.
struct TerminalSurface {
    words: Vec<String>,
    line_of: Vec<usize>,
    lines: Vec<Vec<usize>>,
    active: Option<usize>,
    scroll_top: usize,
    pending: Option<Duration>,
}

impl TerminalSurface {
    fn new(words: Vec<String>) -> Self {
        let mut lines: Vec<Vec<usize>> = vec![Vec::new()];
        let mut line_of = Vec::with_capacity(words.len());
        let mut width = 0;

        for (index, word) in words.iter().enumerate() {
            let len = word.chars().count();
            if width > 0 && width + 1 + len > LINE_WIDTH {
                lines.push(Vec::new());
                width = 0;
            }
            width += if width == 0 { len } else { len + 1 };
            if let Some(line) = lines.last_mut() {
                line.push(index);
            }
            line_of.push(lines.len() - 1);
        }

        Self {
            words,
            line_of,
            lines,
            active: None,
            scroll_top: 0,
            pending: None,
        }
    }

    fn render(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{CLEAR}")?;
        for line in self.lines.iter().skip(self.scroll_top).take(VISIBLE_LINES) {
            let rendered: Vec<String> = line
                .iter()
                .map(|&index| {
                    if Some(index) == self.active {
                        format!("{BOLD}{}{RESET}", self.words[index])
                    } else {
                        self.words[index].clone()
                    }
                })
                .collect();
            writeln!(out, "{}", rendered.join(" "))?;
        }
        out.flush()
    }
}

impl ReaderSurface for TerminalSurface {
    fn set_highlight(&mut self, index: usize, on: bool) {
        if on {
            self.active = Some(index);
        } else if self.active == Some(index) {
            self.active = None;
        }
    }

    fn clear_highlights(&mut self) {
        self.active = None;
    }

    fn word_offset_top(&self, index: usize) -> f64 {
        self.line_of.get(index).copied().unwrap_or_default() as f64
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.scroll_top as f64,
            height: VISIBLE_LINES as f64,
        }
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.max(0.0) as usize;
    }

    // no audio track in the terminal
    fn play_audio(&mut self) {}

    fn pause_audio(&mut self) {}

    fn schedule_advance(&mut self, delay: Duration) {
        self.pending = Some(delay);
    }

    fn cancel_advance(&mut self) {
        self.pending = None;
    }

    fn show_playing(&mut self, playing: bool) {
        info!("reader {}", if playing { "playing" } else { "paused" });
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: read_along <passage.txt> [lesson.yaml]");
            anyhow::bail!("a passage text file is required");
        }
    };

    let config = match args.next() {
        Some(config_path) => LessonConfig::from_file(&config_path)
            .context(format!("failed to load lesson config {}", config_path))?,
        None => LessonConfig::default(),
    }
    .with_env_overrides()
    .context("invalid environment override")?;

    let text = fs::read_to_string(&path).context(format!("failed to read passage {}", path))?;
    let passage = Passage::new(text).context("passage is empty")?;
    let words: Vec<String> = passage.words().into_iter().map(|w| w.text).collect();

    let mut surface = TerminalSurface::new(words);
    let mut reader = Reader::new(surface.words.len(), config.word_delay(), MARGIN_LINES);

    reader.start(&mut surface);
    surface.render().context("failed to draw passage")?;
    while let Some(delay) = surface.pending.take() {
        thread::sleep(delay);
        if let Step::Finished = reader.advance(&mut surface) {
            break;
        }
        surface.render().context("failed to draw passage")?;
    }

    let lesson = Lesson::build(&mut rand::thread_rng(), passage, &config);
    println!("{CLEAR}{BOLD}{}{RESET}\n", lesson.title);
    for (index, item) in lesson.quiz.items.iter().enumerate() {
        println!("{}. {}", index + 1, item.display_question());
    }
    println!("\nword bank: {}", lesson.quiz.word_bank.join(", "));

    Ok(())
}
