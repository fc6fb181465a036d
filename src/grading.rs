// src/grading.rs

use crate::{
    error::AppError,
    models::submission::{self, AnswerMap, GradeResult, ScoreReport},
    store::QuestionStore,
};

/// Grades a submission against the stored answer key.
///
/// * Entries are visited in submission order and results keep that order.
/// * Keys are read with [`parse_question_id`]. Keys without a leading integer,
///   or whose integer matches no stored question, are skipped: they produce no
///   result and count neither as correct nor as graded.
/// * Answers are compared with strict, case-sensitive string equality. Answers
///   that are not JSON strings are graded but never correct.
pub async fn grade(store: &dyn QuestionStore, answers: &AnswerMap) -> Result<ScoreReport, AppError> {
    let mut results = Vec::with_capacity(answers.len());

    for (raw_id, user_answer) in answers.iter() {
        let Some(question_id) = parse_question_id(raw_id) else {
            tracing::debug!("Skipping non-numeric question id {:?}", raw_id);
            continue;
        };

        let Some(question) = store.get_by_id(question_id).await? else {
            tracing::debug!("Skipping unknown question id {}", question_id);
            continue;
        };

        results.push(GradeResult {
            question_id,
            user_answer: submission::answer_text(user_answer),
            is_correct: user_answer.as_str() == Some(question.correct_option.as_str()),
            correct_answer: question.correct_option,
        });
    }

    let total_questions = results.len();
    let correct_count = results.iter().filter(|r| r.is_correct).count();
    let score = percentage(correct_count, total_questions);

    tracing::debug!(
        "Graded submission: {}/{} correct ({}%)",
        correct_count,
        total_questions,
        score
    );

    Ok(ScoreReport {
        score,
        correct_count,
        total_questions,
        results,
    })
}

/// Reads the integer at the start of a question key.
///
/// Leading whitespace and a sign are allowed and anything after the digits is
/// ignored, so `"1"`, `" 1"`, `"1.0"` and `"1abc"` all name question 1.
/// Returns `None` when no digits lead the key or the value overflows `i64`.
pub fn parse_question_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// `correct / total * 100`, rounded half up. Zero when nothing was graded.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u64;
    let total = total as u64;
    ((correct * 200 + total) / (total * 2)) as u32
}
