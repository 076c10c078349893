use gloo_net::http::Request;
use shared::api::{check_status, parse_survey_id, Method, SurveyApi, SurveyRequest};
use shared::{Result, Survey, SurveyError};

/// Browser implementation of [`SurveyApi`] backed by `fetch`.
#[derive(Clone, PartialEq)]
pub struct GlooSurveyClient {
    base_url: String,
}

impl GlooSurveyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    async fn send(&self, request: SurveyRequest) -> Result<String> {
        let url = request.url(&self.base_url);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };

        let response = builder.send().await.map_err(SurveyError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(SurveyError::transport)?;
        check_status(status, &body)?;
        Ok(body)
    }
}

impl SurveyApi for GlooSurveyClient {
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
