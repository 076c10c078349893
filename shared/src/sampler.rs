//! Random question/answer selection used to generate synthetic votes.

use rand::Rng;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::models::Survey;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SamplingError {
    #[error("Survey has no questions")]
    NoQuestions,
    #[error("Question at index {question_index} has no answers")]
    NoAnswers { question_index: usize },
    #[error("Unreadable survey payload: {0}")]
    Parse(String),
}

/// Positions of the sampled pair inside `QuestionsAndAnswers` and `Answers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteTarget {
    #[serde(rename = "questionId")]
    pub question_index: usize,
    #[serde(rename = "answerId")]
    pub answer_index: usize,
}

impl VoteTarget {
    /// Looks up the `(QuestionId, AnswerId)` stored at the sampled positions.
    pub fn resolve(&self, survey: &Survey) -> Option<(i64, i64)> {
        let question = survey.questions_and_answers.get(self.question_index)?;
        let answer = question.answers.get(self.answer_index)?;
        Some((question.question_id, answer.answer_id))
    }
}

pub fn pick<R: Rng + ?Sized>(survey: &Survey, rng: &mut R) -> Result<VoteTarget, SamplingError> {
    if survey.questions_and_answers.is_empty() {
        return Err(SamplingError::NoQuestions);
    }
    let question_index = rng.gen_range(0..survey.questions_and_answers.len());

    let answers = &survey.questions_and_answers[question_index].answers;
    if answers.is_empty() {
        return Err(SamplingError::NoAnswers { question_index });
    }
    let answer_index = rng.gen_range(0..answers.len());

    Ok(VoteTarget { question_index, answer_index })
}

/// Samples a pair and returns the ids stored at the sampled positions.
pub fn pick_ids<R: Rng + ?Sized>(survey: &Survey, rng: &mut R) -> Result<(i64, i64), SamplingError> {
    let target = pick(survey, rng)?;
    target
        .resolve(survey)
        .ok_or(SamplingError::NoAnswers { question_index: target.question_index })
}

pub fn pick_json<R: Rng + ?Sized>(body: &str, rng: &mut R) -> Result<(Survey, VoteTarget), SamplingError> {
    let survey = Survey::from_json(body).map_err(|e| SamplingError::Parse(e.to_string()))?;
    let target = pick(&survey, rng)?;
    Ok((survey, target))
}
