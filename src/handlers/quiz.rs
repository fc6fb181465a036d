// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    grading,
    models::submission,
    state::DynQuestionStore,
};

/// Returns the whole question bank, ordered by id, with correct answers stripped.
pub async fn get_questions(
    State(store): State<DynQuestionStore>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.get_all().await?;

    Ok(Json(json!({ "questions": questions })))
}

/// Grades a submitted answer map.
///
/// * The body must be a JSON object whose `answers` field is an object;
///   anything else is rejected with 400.
/// * Answers for unknown questions are ignored (see [`grading::grade`]).
/// * Nothing is persisted; the report is returned as is.
pub async fn submit_quiz(
    State(store): State<DynQuestionStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let answers = submission::answers_from_body(body)?;

    let report = grading::grade(&*store, &answers).await?;

    tracing::info!(
        "Quiz submitted: score {}% ({}/{})",
        report.score,
        report.correct_count,
        report.total_questions
    );

    Ok(Json(report))
}
