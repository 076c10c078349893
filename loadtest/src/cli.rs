use std::path::PathBuf;
use std::time::Duration;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "loadtest", about = "Synthetic voting load for the survey service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample a random question/answer pair from a survey payload
    Pick(PickArgs),
    /// Fetch, sample and vote repeatedly from concurrent virtual users
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct PickArgs {
    /// Survey JSON file; stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Survey endpoint, e.g. https://example.com/prod/survey
    #[arg(long, env = "SURVEY_API_URL")]
    pub base_url: String,
    /// Survey to vote on; a fresh one is created when omitted
    #[arg(long)]
    pub survey_id: Option<String>,
    #[arg(long, default_value_t = 10)]
    pub users: usize,
    #[arg(long, default_value_t = 20)]
    pub iterations: usize,
    #[arg(long, default_value_t = 1000)]
    pub think_time_ms: u64,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RunArgs {
    pub fn think_time(&self) -> Duration {
        Duration::from_millis(self.think_time_ms)
    }
}
