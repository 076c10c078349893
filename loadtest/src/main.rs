use std::io::Read;
use clap::Parser;
use loadtest::{
    cli::{Cli, Command, PickArgs, RunArgs},
    LoadTestError, ReqwestSurveyClient, Scenario,
};
use rand::{rngs::StdRng, SeedableRng};
use shared::{pick_json, replace_survey};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn read_payload(args: &PickArgs) -> Result<String, LoadTestError> {
    match &args.file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn pick_command(args: PickArgs) -> Result<(), LoadTestError> {
    let body = read_payload(&args)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (_, target) = pick_json(&body, &mut rng)?;
    println!("{}", serde_json::json!(target));
    Ok(())
}

async fn run_command(args: RunArgs) -> Result<(), LoadTestError> {
    let client = ReqwestSurveyClient::new(args.base_url.clone());

    let survey_id = match &args.survey_id {
        Some(id) => id.clone(),
        None => {
            let id = replace_survey(&client).await?;
            info!("🆕 Recreated survey {}", id);
            id
        }
    };

    let scenario = Scenario {
        survey_id,
        users: args.users,
        iterations: args.iterations,
        think_time: args.think_time(),
        seed: args.seed,
    };

    info!(
        "🚀 Voting on survey {} at {} with {} users x {} iterations",
        scenario.survey_id,
        client.base_url(),
        scenario.users,
        scenario.iterations
    );

    let summary = loadtest::run(&client, &scenario).await;
    summary.log();

    if summary.attempts() > 0 && summary.successes == 0 {
        return Err(LoadTestError::AllFailed(summary.attempts()));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Pick(args) => pick_command(args)?,
        Command::Run(args) => run_command(args).await?,
    }
    Ok(())
}
