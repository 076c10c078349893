pub mod api;
pub mod error;
pub mod models;
pub mod presenter;
pub mod sampler;
pub mod validation;

pub use api::{SurveyApi, SurveyRequest, Method, replace_survey};
pub use error::{SurveyError, Result};
pub use models::*;
pub use presenter::{SurveyPresenter, QuestionView, Notice, NoticeLevel, FetchTicket, VoteTicket, RefreshOutcome, VoteOutcome, RecreateOutcome, REFRESH_INTERVAL_MS};
pub use sampler::{pick, pick_ids, pick_json, SamplingError, VoteTarget};
pub use validation::*;

#[cfg(test)]
mod tests;
