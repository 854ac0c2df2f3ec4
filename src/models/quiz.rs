//! Weekly multiple-choice quiz

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{display_u32, lenient_u32};

/// Options past this index have no letter and cannot be answered
pub const MAX_OPTIONS: usize = 26;

/// Letter shown next to the option at `index` (A, B, C, ...)
pub fn option_letter(index: usize) -> Option<char> {
    (index < MAX_OPTIONS).then(|| (b'A' + index as u8) as char)
}

/// Inverse of [`option_letter`]
pub fn option_index(letter: &str) -> Option<usize> {
    let mut chars = letter.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    Some((c as u8 - b'A') as usize)
}

/// A week's quiz
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
    /// 0 when the service leaves it out
    #[serde(default, deserialize_with = "display_u32")]
    pub week: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Answers recorded by the service once the quiz was submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<BTreeMap<usize, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default)]
    pub submitted: bool,
}

/// A single multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Correct answer, either an option letter or the option text.
    /// Only shown after submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Question {
    /// Letter of the correct option, if the answer key is known
    pub fn correct_letter(&self) -> Option<char> {
        let answer = self.answer.as_deref()?.trim();
        if let Some(idx) = option_index(answer) {
            if idx < self.options.len() {
                return option_letter(idx);
            }
        }
        self.options
            .iter()
            .position(|opt| opt.trim().eq_ignore_ascii_case(answer))
            .and_then(option_letter)
    }

    /// Option text for a letter
    pub fn option(&self, letter: &str) -> Option<&str> {
        option_index(letter)
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }
}

impl Quiz {
    /// Create an unsubmitted quiz
    pub fn new(week: u32, questions: Vec<Question>) -> Self {
        Self {
            week,
            questions,
            answers: None,
            score: None,
            submitted: false,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Submitted quizzes are terminal
    pub fn is_submitted(&self) -> bool {
        self.submitted || self.score.is_some()
    }

    /// Record a scored submission: the answers sent, the score and the
    /// answer key revealed by the service.
    pub fn apply_result(&mut self, answers: BTreeMap<usize, String>, result: &QuizResult) {
        for (idx, key) in &result.correct_answers {
            if let Some(question) = self.questions.get_mut(*idx) {
                question.answer = Some(key.clone());
            }
        }
        self.answers = Some(answers);
        self.score = Some(result.score);
        self.submitted = true;
    }
}

/// Response of `/quiz/submit`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuizResult {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    /// Answer key by question index
    #[serde(default, alias = "answer_key")]
    pub correct_answers: BTreeMap<usize, String>,
}
