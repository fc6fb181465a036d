// src/client/mod.rs

//! Client side of the quiz: the HTTP API wrapper and the screen flow that
//! drives a single quiz session from start to results.

use std::fmt;

pub mod api;
pub mod flow;

pub use api::{HttpQuizApi, QuizApi};
pub use flow::{QuizFlow, Screen, SubmitTrigger};

#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response (connection refused, bad body, ...).
    Http(reqwest::Error),

    /// The server answered with a non-success status.
    Status { status: u16, message: String },

    /// The action is not allowed on the current screen.
    InvalidTransition { from: Screen, action: &'static str },

    /// A submission for this session is already in flight or done.
    AlreadySubmitted,

    UnknownQuestion(i64),

    InvalidOption(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request failed: {}", e),
            ClientError::Status { status, message } => {
                write!(f, "server returned {}: {}", status, message)
            }
            ClientError::InvalidTransition { from, action } => {
                write!(f, "cannot {} from the {:?} screen", action, from)
            }
            ClientError::AlreadySubmitted => write!(f, "quiz already submitted"),
            ClientError::UnknownQuestion(id) => write!(f, "question {} is not part of this quiz", id),
            ClientError::InvalidOption(letter) => write!(f, "invalid option {:?}", letter),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}
