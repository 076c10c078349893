use std::fmt;
use url::form_urlencoded;
use crate::error::{Result, SurveyError};
use crate::models::Survey;

pub const SURVEY_ID_PARAM: &str = "surveyId";
pub const QUESTION_ID_PARAM: &str = "questionId";
pub const ANSWER_ID_PARAM: &str = "answerId";
pub const RECREATE_PARAM: &str = "recreate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One call against the survey endpoint. All four operations share a single
/// URL and differ only in method and query string; none sends a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRequest {
    pub method: Method,
    pub query: Vec<(&'static str, String)>,
}

impl SurveyRequest {
    pub fn fetch(survey_id: &str) -> Self {
        Self {
            method: Method::Get,
            query: vec![(SURVEY_ID_PARAM, survey_id.to_string())],
        }
    }

    pub fn vote(survey_id: &str, question_id: i64, answer_id: i64) -> Self {
        Self {
            method: Method::Put,
            query: vec![
                (SURVEY_ID_PARAM, survey_id.to_string()),
                (QUESTION_ID_PARAM, question_id.to_string()),
                (ANSWER_ID_PARAM, answer_id.to_string()),
            ],
        }
    }

    // The service keeps a single current survey, so delete carries no id.
    pub fn delete() -> Self {
        Self { method: Method::Delete, query: Vec::new() }
    }

    pub fn recreate() -> Self {
        Self {
            method: Method::Put,
            query: vec![(RECREATE_PARAM, "true".to_string())],
        }
    }

    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn url(&self, base_url: &str) -> String {
        let query = self.query_string();
        if query.is_empty() {
            base_url.to_string()
        } else if base_url.contains('?') {
            format!("{}&{}", base_url, query)
        } else {
            format!("{}?{}", base_url, query)
        }
    }
}

/// Maps a non-2xx response onto [`SurveyError::Status`].
pub fn check_status(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        let message = match body.trim() {
            "" => "no response body".to_string(),
            text => text.to_string(),
        };
        Err(SurveyError::status(status, message))
    }
}

/// The recreate call answers with the new survey id as plain text.
pub fn parse_survey_id(body: &str) -> Result<String> {
    let id = body.trim().trim_matches('"').trim();
    if id.is_empty() {
        Err(SurveyError::Parse("empty survey id".into()))
    } else {
        Ok(id.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait SurveyApi {
    async fn fetch_survey(&self, survey_id: &str) -> Result<Survey>;

    async fn cast_vote(&self, survey_id: &str, question_id: i64, answer_id: i64) -> Result<()>;

    async fn delete_survey(&self) -> Result<()>;

    async fn recreate_survey(&self) -> Result<String>;
}

/// Drops the current survey and asks the service for a fresh one.
pub async fn replace_survey<A: SurveyApi>(api: &A) -> Result<String> {
    api.delete_survey().await?;
    api.recreate_survey().await
}
