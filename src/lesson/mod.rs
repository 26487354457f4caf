mod frontmatter;

use anyhow::Context;
use github_slugger::Slugger;
use log::info;
use rand::Rng;
use std::collections::BTreeMap;

use crate::config::LessonConfig;
use crate::passage::Passage;
use crate::quiz::{generate_quiz, Quiz, QuizBoard};
use frontmatter::{Frontmatter, QuestionMeta};

/// A passage together with the quiz generated from it.
#[derive(Debug, Clone)]
pub struct Lesson {
    pub title: String,
    pub slug: String,
    pub word_delay_ms: u64,
    pub passage: Passage,
    pub quiz: Quiz,
}

impl Lesson {
    pub fn build<R>(rng: &mut R, passage: Passage, config: &LessonConfig) -> Self
    where
        R: Rng + ?Sized,
    {
        let quiz = generate_quiz(rng, &passage, &config.vocabulary, config.max_questions);
        let slug = Slugger::default().slug(&config.title);

        info!(
            "built lesson '{}' with {} words and {} questions",
            slug,
            passage.word_count(),
            quiz.len()
        );

        Self {
            title: config.title.clone(),
            slug,
            word_delay_ms: config.word_delay_ms,
            passage,
            quiz,
        }
    }

    pub fn board(&self) -> QuizBoard {
        QuizBoard::new(&self.quiz)
    }
}

/// Markdown page with YAML frontmatter: passage, numbered questions with
/// html blanks, and the draggable word bank.
pub fn serialize_lesson(lesson: &Lesson) -> anyhow::Result<String> {
    let board = lesson.board();

    let questions: Vec<QuestionMeta> = lesson
        .quiz
        .items
        .iter()
        .zip(board.blanks())
        .map(|(item, blank)| {
            QuestionMeta::new(item.question.as_str(), item.answer.as_str(), blank.slug.as_str())
        })
        .collect();

    let mut fm: BTreeMap<&str, Frontmatter> = BTreeMap::new();
    fm.insert("title", Frontmatter::Title(lesson.title.as_str()));
    fm.insert("slug", Frontmatter::Slug(lesson.slug.as_str()));
    fm.insert("word_count", Frontmatter::WordCount(lesson.passage.word_count()));
    fm.insert("word_delay_ms", Frontmatter::WordDelayMs(lesson.word_delay_ms));
    fm.insert("quiz", Frontmatter::Quiz(questions));
    fm.insert("word_bank", Frontmatter::WordBank(&lesson.quiz.word_bank));

    let mut body = String::with_capacity(lesson.passage.text().len() * 2);
    body.push_str(&format!("# {} {{#{}}}\n\n", lesson.title, lesson.slug));
    body.push_str(lesson.passage.text());
    body.push_str("\n\n## Quiz {#quiz}\n\n");

    for (index, (item, blank)) in lesson.quiz.items.iter().zip(board.blanks()).enumerate() {
        let (before, after) = item.segments();
        body.push_str(&format!(
            "{}. {}<span class=\"quiz-blank\" id=\"{}\" data-correct-answer=\"{}\"></span>{}\n",
            index + 1,
            html_escape::encode_text(before),
            blank.slug,
            html_escape::encode_double_quoted_attribute(&blank.answer),
            html_escape::encode_text(after),
        ));
    }

    body.push_str("\n<div id=\"word-bank\">\n");
    for word in &lesson.quiz.word_bank {
        body.push_str(&format!(
            "<span class=\"draggable-word\" draggable=\"true\">{}</span>\n",
            html_escape::encode_text(word)
        ));
    }
    body.push_str("</div>\n");

    Ok(format!(
        r#"---
{}---

{}"#,
        serde_yaml_ng::to_string(&fm).context("failed to serialize lesson frontmatter")?,
        body
    ))
}

pub fn quiz_json(lesson: &Lesson) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&lesson.quiz).context("failed to serialize quiz")
}
