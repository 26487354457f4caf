use anyhow::Context;
use std::io::Write;
use std::{
    env,
    fs::{self, OpenOptions},
};

use readalong::{quiz_json, serialize_lesson, Lesson, LessonConfig, Passage};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DEFAULT_OUTPUT_DIR: &str = "output/lesson";

pub struct Config {
    pub passage_path: String,
    pub output_dir: String,
    pub lesson_config: Option<String>,
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let passage_path = args.next().context("a passage text file is required")?;
    let output_dir = args.next().unwrap_or(DEFAULT_OUTPUT_DIR.to_string());
    let lesson_config = args.next();

    Ok(Config {
        passage_path,
        output_dir,
        lesson_config,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match parse_config(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: readalong <passage.txt> [output_dir] [lesson.yaml]");
            return Err(e);
        }
    };

    let lesson_config = match &config.lesson_config {
        Some(path) => LessonConfig::from_file(path)
            .context(format!("failed to load lesson config {}", path))?,
        None => LessonConfig::default(),
    }
    .with_env_overrides()
    .context("invalid environment override")?;

    let text = fs::read_to_string(&config.passage_path)
        .context(format!("failed to read passage {}", config.passage_path))?;
    let passage = Passage::new(text).context("passage is empty")?;

    let lesson = Lesson::build(&mut rand::thread_rng(), passage, &lesson_config);

    create_output_dir(&config.output_dir).context("failed to create output directory")?;
    write_file(
        &config.output_dir,
        &format!("{}.md", lesson.slug),
        &serialize_lesson(&lesson)?,
    )?;
    write_file(&config.output_dir, "quiz.json", &quiz_json(&lesson)?)?;

    for (index, item) in lesson.quiz.items.iter().enumerate() {
        println!("{}. {}", index + 1, item.display_question());
    }
    println!("\nword bank: {}\n", lesson.quiz.word_bank.join(", "));

    println!(
        "created {BOLD}{}{RESET} questions from {BOLD}{}{RESET} words in {BOLD}{}{RESET}",
        lesson.quiz.len(),
        lesson.passage.word_count(),
        &config.output_dir
    );

    Ok(())
}

fn write_file(output_dir: &str, name: &str, content: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/{}", output_dir, name))
        .context(format!("failed to open file for {}", name))?;

    write!(file, "{}", content).context(format!("failed to write {}", name))?;
    Ok(())
}

// existing files are left alone; `write_file` refuses to overwrite them
fn create_output_dir(output_dir: &str) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)?;
    Ok(())
}
