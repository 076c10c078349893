use reqwest::Client;
use shared::api::{check_status, parse_survey_id, Method, SurveyApi, SurveyRequest};
use shared::{Result, Survey, SurveyError};
use tracing::instrument;

/// Native implementation of [`SurveyApi`] on top of a shared `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestSurveyClient {
    http: Client,
    base_url: String,
}

impl ReqwestSurveyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: Client::new(), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(level = "debug", skip(self))]
    async fn send(&self, request: SurveyRequest) -> Result<String> {
        let url = request.url(&self.base_url);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Put => self.http.put(&url).body(""),
            Method::Delete => self.http.delete(&url),
        };

        let response = builder.send().await.map_err(SurveyError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(SurveyError::transport)?;
        check_status(status, &body)?;
        Ok(body)
    }
}

impl SurveyApi for ReqwestSurveyClient {
    async fn fetch_survey(&self, survey_id: &str) -> Result<Survey> {
        let body = self.send(SurveyRequest::fetch(survey_id)).await?;
        Survey::from_json(&body)
    }

    async fn cast_vote(&self, survey_id: &str, question_id: i64, answer_id: i64) -> Result<()> {
        self.send(SurveyRequest::vote(survey_id, question_id, answer_id)).await.map(|_| ())
    }

    async fn delete_survey(&self) -> Result<()> {
        self.send(SurveyRequest::delete()).await.map(|_| ())
    }

    async fn recreate_survey(&self) -> Result<String> {
        let body = self.send(SurveyRequest::recreate()).await?;
        parse_survey_id(&body)
    }
}
