// src/client/api.rs

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::ClientError;
use crate::models::{
    question::PublicQuestion,
    submission::{AnswerMap, ScoreReport},
};

/// API root used when no other base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// The two calls a quiz session makes against the server.
#[async_trait]
pub trait QuizApi: Send + Sync + 'static {
    async fn fetch_questions(&self) -> Result<Vec<PublicQuestion>, ClientError>;

    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreReport, ClientError>;
}

#[derive(Deserialize)]
struct QuestionsResponse {
    questions: Vec<PublicQuestion>,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    answers: &'a AnswerMap,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`QuizApi`] over HTTP, talking to `/quiz/questions` and `/quiz/submit` below `base_url`.
#[derive(Debug, Clone)]
pub struct HttpQuizApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQuizApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or(fallback);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

impl Default for HttpQuizApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn fetch_questions(&self) -> Result<Vec<PublicQuestion>, ClientError> {
        let response = self.client.get(self.url("quiz/questions")).send().await?;
        let body: QuestionsResponse = Self::read_json(response).await?;
        Ok(body.questions)
    }

    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreReport, ClientError> {
        let response = self
            .client
            .post(self.url("quiz/submit"))
            .json(&SubmitBody { answers })
            .send()
            .await?;
        Self::read_json(response).await
    }
}
