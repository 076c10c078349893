pub mod cli;
pub mod client;
pub mod error;
pub mod report;
pub mod runner;

pub use client::ReqwestSurveyClient;
pub use error::LoadTestError;
pub use report::Summary;
pub use runner::{run, vote_once, Scenario};
