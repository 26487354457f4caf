use serde::Serialize;

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Frontmatter<'a> {
    Title(&'a str),
    Slug(&'a str),
    WordCount(usize),
    WordDelayMs(u64),
    Quiz(Vec<QuestionMeta<'a>>),
    WordBank(&'a [String]),
}

#[derive(Serialize, Debug)]
pub struct QuestionMeta<'a> {
    question: &'a str,
    answer: &'a str,
    blank: &'a str,
}

impl<'a> QuestionMeta<'a> {
    pub fn new(question: &'a str, answer: &'a str, blank: &'a str) -> Self {
        Self {
            question,
            answer,
            blank,
        }
    }
}
