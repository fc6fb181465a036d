// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Option letters a question can be answered with, in display order.
pub const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text content of the question.
    pub question_text: String,

    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,

    /// Letter of the correct option ("A" to "D").
    pub correct_option: String,
}

/// DTO for sending a question to the client before grading (no `correct_option`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
}

impl PublicQuestion {
    /// Text of the option labelled `letter`, if the letter is one of A-D.
    pub fn option(&self, letter: &str) -> Option<&str> {
        match letter {
            "A" => Some(&self.option_a),
            "B" => Some(&self.option_b),
            "C" => Some(&self.option_c),
            "D" => Some(&self.option_d),
            _ => None,
        }
    }
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
        }
    }
}

/// A question that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
}

/// DTO for creating a new question through the admin API.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 500))]
    pub option_a: String,
    #[validate(length(min = 1, max = 500))]
    pub option_b: String,
    #[validate(length(min = 1, max = 500))]
    pub option_c: String,
    #[validate(length(min = 1, max = 500))]
    pub option_d: String,
    #[validate(custom(function = validate_correct_option))]
    pub correct_option: String,
}

fn validate_correct_option(letter: &str) -> Result<(), validator::ValidationError> {
    if OPTION_LETTERS.contains(&letter) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("correct_option_must_be_a_to_d"))
    }
}
