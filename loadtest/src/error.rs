use shared::{SamplingError, SurveyError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadTestError {
    #[error(transparent)]
    Survey(#[from] SurveyError),
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    #[error("Failed to read survey payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("All {0} iterations failed")]
    AllFailed(usize),
}
