// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, NewQuestion},
    state::DynQuestionStore,
    utils::html::clean_html,
};

/// Adds a question to the bank.
/// Admin only.
pub async fn create_question(
    State(store): State<DynQuestionStore>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let question = NewQuestion {
        question_text: clean_html(&payload.question_text),
        option_a: clean_html(&payload.option_a),
        option_b: clean_html(&payload.option_b),
        option_c: clean_html(&payload.option_c),
        option_d: clean_html(&payload.option_d),
        correct_option: payload.correct_option,
    };

    let texts = [
        &question.question_text,
        &question.option_a,
        &question.option_b,
        &question.option_c,
        &question.option_d,
    ];
    if texts.iter().any(|t| t.trim().is_empty()) {
        return Err(AppError::Validation(
            "Question text and options must not be empty after sanitization".to_string(),
        ));
    }

    let id = store.insert(&question).await?;
    tracing::info!("Created question {}", id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// Retrieves a single question including its correct option.
/// Admin only.
pub async fn get_question(
    State(store): State<DynQuestionStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = store
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Removes every question from the bank.
/// Admin only.
pub async fn clear_questions(
    State(store): State<DynQuestionStore>,
) -> Result<impl IntoResponse, AppError> {
    store.clear().await?;
    tracing::info!("Question bank cleared");

    Ok(StatusCode::NO_CONTENT)
}
