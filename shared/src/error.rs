use thiserror::Error;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SurveyError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Survey service responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Malformed survey payload: {0}")]
    Parse(String),
    #[error("Invalid survey payload: {0}")]
    Invalid(#[from] ValidationError),
    #[error("No active survey")]
    NoActiveSurvey,
    #[error("Unknown question {0}")]
    UnknownQuestion(i64),
    #[error("Unknown answer {answer_id} for question {question_id}")]
    UnknownAnswer { question_id: i64, answer_id: i64 },
}

impl SurveyError {
    pub fn transport(err: impl ToString) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
