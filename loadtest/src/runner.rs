use std::time::Duration;
use futures::future::join_all;
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{pick_ids, SurveyApi};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};
use crate::error::LoadTestError;
use crate::report::Summary;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub survey_id: String,
    pub users: usize,
    pub iterations: usize,
    pub think_time: Duration,
    pub seed: Option<u64>,
}

/// Runs every virtual user concurrently and folds their results.
pub async fn run<A: SurveyApi>(api: &A, scenario: &Scenario) -> Summary {
    let users = (0..scenario.users).map(|user| virtual_user(api, scenario, user));
    join_all(users)
        .await
        .into_iter()
        .fold(Summary::default(), Summary::merge)
}

async fn virtual_user<A: SurveyApi>(api: &A, scenario: &Scenario, user: usize) -> Summary {
    let mut rng = match scenario.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(user as u64)),
        None => StdRng::from_entropy(),
    };
    let mut summary = Summary::default();

    for iteration in 0..scenario.iterations {
        let started = Instant::now();
        let result = vote_once(api, &scenario.survey_id, &mut rng).await;
        summary.record(started.elapsed(), result.is_ok());

        match result {
            Ok((question_id, answer_id)) => debug!(user, iteration, question_id, answer_id, "Vote cast"),
            Err(err) => warn!(user, iteration, "Iteration failed: {}", err),
        }

        if !scenario.think_time.is_zero() {
            sleep(scenario.think_time).await;
        }
    }

    summary
}

/// One scenario step: fetch the survey, sample a pair, vote for it.
pub async fn vote_once<A: SurveyApi, R: Rng>(
    api: &A,
    survey_id: &str,
    rng: &mut R,
) -> Result<(i64, i64), LoadTestError> {
    let survey = api.fetch_survey(survey_id).await?;
    let (question_id, answer_id) = pick_ids(&survey, rng)?;
    api.cast_vote(survey_id, question_id, answer_id).await?;
    Ok((question_id, answer_id))
}
