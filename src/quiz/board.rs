use github_slugger::Slugger;
use log::debug;
use serde::Serialize;

use super::item::Quiz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlankId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TokenId(pub usize);

/// Where an answer token currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenLocation {
    Bank,
    Blank(BlankId),
}

#[derive(Debug, Clone, Serialize)]
pub struct Blank {
    pub id: BlankId,
    pub answer: String,
    /// unique html id for the blank, derived from the answer
    pub slug: String,
    occupant: Option<TokenId>,
}

impl Blank {
    pub fn occupant(&self) -> Option<TokenId> {
        self.occupant
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerToken {
    pub id: TokenId,
    pub text: String,
    location: TokenLocation,
}

impl AnswerToken {
    pub fn location(&self) -> TokenLocation {
        self.location
    }
}

/// What a successful drop moved, so a view can mirror it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub token: TokenId,
    pub to: TokenLocation,
    /// blank the dragged token left behind
    pub vacated: Option<BlankId>,
    /// previous occupant sent back to the bank
    pub displaced: Option<TokenId>,
}

/// Drag-and-drop state of a quiz: which token sits where, and which token is
/// being dragged.
#[derive(Debug, Clone, Default)]
pub struct QuizBoard {
    blanks: Vec<Blank>,
    tokens: Vec<AnswerToken>,
    // tokens in the bank, in display order
    bank: Vec<TokenId>,
    dragging: Option<TokenId>,
}

impl QuizBoard {
    /// One blank per question, in question order, and one bank token per entry
    /// of the word bank, in bank order.
    pub fn new(quiz: &Quiz) -> Self {
        let mut slugger = Slugger::default();
        let blanks = quiz
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| Blank {
                id: BlankId(index),
                answer: item.answer.clone(),
                slug: slugger.slug(&format!("blank {}", item.answer)),
                occupant: None,
            })
            .collect();

        let tokens: Vec<AnswerToken> = quiz
            .word_bank
            .iter()
            .enumerate()
            .map(|(index, text)| AnswerToken {
                id: TokenId(index),
                text: text.clone(),
                location: TokenLocation::Bank,
            })
            .collect();
        let bank = tokens.iter().map(|t| t.id).collect();

        Self {
            blanks,
            tokens,
            bank,
            dragging: None,
        }
    }

    pub fn blanks(&self) -> &[Blank] {
        &self.blanks
    }

    pub fn tokens(&self) -> &[AnswerToken] {
        &self.tokens
    }

    pub fn bank(&self) -> &[TokenId] {
        &self.bank
    }

    pub fn blank(&self, id: BlankId) -> Option<&Blank> {
        self.blanks.get(id.0)
    }

    pub fn token(&self, id: TokenId) -> Option<&AnswerToken> {
        self.tokens.get(id.0)
    }

    pub fn dragging(&self) -> Option<TokenId> {
        self.dragging
    }

    /// Picks up a token from the bank or from a blank.
    pub fn drag_start(&mut self, token: TokenId) -> bool {
        if self.token(token).is_none() {
            return false;
        }
        self.dragging = Some(token);
        true
    }

    /// Ends a drag. The token stays wherever it was last dropped.
    pub fn drag_end(&mut self) -> Option<TokenId> {
        self.dragging.take()
    }

    /// Drops the dragged token into `blank`, sending any occupant back to the bank.
    pub fn drop_on_blank(&mut self, blank: BlankId) -> Option<DropOutcome> {
        self.blank(blank)?;
        let token = self.dragging.take()?;

        let vacated = match self.tokens[token.0].location {
            TokenLocation::Blank(from) if from == blank => {
                return Some(DropOutcome {
                    token,
                    to: TokenLocation::Blank(blank),
                    vacated: None,
                    displaced: None,
                });
            }
            TokenLocation::Blank(from) => {
                self.blanks[from.0].occupant = None;
                Some(from)
            }
            TokenLocation::Bank => {
                self.bank.retain(|id| *id != token);
                None
            }
        };

        let displaced = self.blanks[blank.0].occupant.replace(token);
        if let Some(previous) = displaced {
            self.tokens[previous.0].location = TokenLocation::Bank;
            self.bank.push(previous);
        }
        self.tokens[token.0].location = TokenLocation::Blank(blank);

        debug!("token {:?} dropped on blank {:?}", token, blank);
        Some(DropOutcome {
            token,
            to: TokenLocation::Blank(blank),
            vacated,
            displaced,
        })
    }

    /// Drops the dragged token back into the bank. Does nothing when it is
    /// already there.
    pub fn drop_on_bank(&mut self) -> Option<DropOutcome> {
        let token = self.dragging.take()?;

        let TokenLocation::Blank(from) = self.tokens[token.0].location else {
            return None;
        };

        self.blanks[from.0].occupant = None;
        self.tokens[token.0].location = TokenLocation::Bank;
        self.bank.push(token);

        debug!("token {:?} returned to the bank", token);
        Some(DropOutcome {
            token,
            to: TokenLocation::Bank,
            vacated: Some(from),
            displaced: None,
        })
    }

    /// Returns every token to the bank in its original order.
    pub fn reset(&mut self) {
        for blank in &mut self.blanks {
            blank.occupant = None;
        }
        for token in &mut self.tokens {
            token.location = TokenLocation::Bank;
        }
        self.bank = self.tokens.iter().map(|t| t.id).collect();
        self.dragging = None;
    }
}
