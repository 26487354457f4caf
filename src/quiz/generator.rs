use log::{debug, info, warn};
use rand::{seq::SliceRandom, Rng};
use regex::Regex;
use std::collections::HashSet;

use super::item::{Quiz, QuizItem, BLANK_MARKER};
use crate::passage::Passage;

/// Builds up to `max_items` fill-in-the-blank questions from `vocabulary`.
///
/// Candidates are tried once each in random order. A candidate is used when it
/// appears verbatim in the passage and the first sentence containing it also
/// holds it as a whole word (case-insensitive); that first whole-word match
/// becomes the blank. Anything else is skipped, so the quiz may come out
/// shorter than `max_items`, or empty.
pub fn generate_quiz<R>(
    rng: &mut R,
    passage: &Passage,
    vocabulary: &[String],
    max_items: usize,
) -> Quiz
where
    R: Rng + ?Sized,
{
    let text = passage.text();
    let sentences = passage.sentences();

    let mut seen = HashSet::new();
    let mut candidates: Vec<&str> = vocabulary
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty() && seen.insert(*w))
        .collect();
    candidates.shuffle(rng);

    let mut items = Vec::with_capacity(max_items.min(candidates.len()));
    for word in candidates {
        if items.len() >= max_items {
            break;
        }

        if !text.contains(word) {
            debug!("'{}' does not occur in the passage", word);
            continue;
        }

        let Some(sentence) = sentences.iter().find(|s| s.contains(word)) else {
            debug!("'{}' is not inside any complete sentence", word);
            continue;
        };

        let Some(question) = blank_out(sentence, word) else {
            debug!("'{}' is not a whole word in '{}'", word, sentence);
            continue;
        };

        items.push(QuizItem {
            question,
            answer: word.to_string(),
            sentence: sentence.to_string(),
        });
    }

    items.shuffle(rng);

    let mut word_bank: Vec<String> = items.iter().map(|item| item.answer.clone()).collect();
    word_bank.shuffle(rng);

    info!(
        "generated {} quiz questions from {} vocabulary words",
        items.len(),
        vocabulary.len()
    );

    Quiz { items, word_bank }
}

/// Replaces the first case-insensitive whole-word occurrence of `word`.
fn blank_out(sentence: &str, word: &str) -> Option<String> {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            warn!("could not build pattern for '{}': {}", word, e);
            return None;
        }
    };

    let found = regex.find(sentence)?;
    let mut question = String::with_capacity(sentence.len() + BLANK_MARKER.len());
    question.push_str(&sentence[..found.start()]);
    question.push_str(BLANK_MARKER);
    question.push_str(&sentence[found.end()..]);
    Some(question)
}
