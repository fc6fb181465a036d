// src/models/submission.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Submitted answers: question ID (as sent by the client) to chosen option.
///
/// Entries keep the order in which they appeared in the submitted document.
/// Values are kept as raw JSON: only string values can ever be graded correct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerMap {
    entries: IndexMap<String, Value>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chosen letter for `question_id`, replacing an earlier one in place.
    pub fn insert(&mut self, question_id: impl Into<String>, letter: impl Into<String>) {
        self.insert_value(question_id, Value::String(letter.into()));
    }

    pub fn insert_value(&mut self, question_id: impl Into<String>, answer: Value) {
        self.entries.insert(question_id.into(), answer);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(id, answer)| (id.as_str(), answer))
    }

    /// The submitted letter for `question_id`, if one was sent as a string.
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries.get(question_id).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text of a submitted answer: strings as sent, anything else in its JSON form.
pub fn answer_text(answer: &Value) -> String {
    match answer {
        Value::String(letter) => letter.clone(),
        other => other.to_string(),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AnswerMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Accepts any JSON object; values of any type are kept for grading.
impl TryFrom<Value> for AnswerMap {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(object) = value else {
            return Err(AppError::invalid_answers());
        };

        let mut map = AnswerMap::new();
        for (question_id, answer) in object {
            map.insert_value(question_id, answer);
        }
        Ok(map)
    }
}

/// Pulls the answer map out of a submission body, `{ "answers": { ... } }`.
///
/// Anything but a JSON object with an object-valued `answers` field is rejected.
pub fn answers_from_body(body: Value) -> Result<AnswerMap, AppError> {
    let Value::Object(mut body) = body else {
        return Err(AppError::invalid_answers());
    };
    let answers = body.remove("answers").ok_or_else(AppError::invalid_answers)?;
    AnswerMap::try_from(answers)
}

/// Grading outcome for a single answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub question_id: i64,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Response body of a graded submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Percentage of graded questions answered correctly, 0-100.
    pub score: u32,
    pub correct_count: usize,
    /// Answers that matched a stored question, not the size of the question bank.
    pub total_questions: usize,
    pub results: Vec<GradeResult>,
}
