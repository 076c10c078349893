use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::validation::validate_survey;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Survey {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<String>,
    pub questions_and_answers: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    pub question_id: i64,
    #[serde(rename = "Question", default)]
    pub question_text: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Answer {
    pub answer_id: i64,
    #[serde(rename = "Answer", default)]
    pub label: String,
    #[serde(rename = "Vote")]
    pub vote_count: i64,
}

impl Survey {
    /// Parses and validates a survey payload as returned by the survey service.
    pub fn from_json(body: &str) -> Result<Self> {
        let survey: Survey = serde_json::from_str(body)?;
        validate_survey(&survey)?;
        Ok(survey)
    }
}

impl Answer {
    /// Chart label shown for this answer, one-based.
    pub fn display_label(&self) -> i64 {
        self.answer_id.saturating_add(1)
    }
}
