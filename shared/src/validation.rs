use std::collections::HashSet;
use crate::models::Survey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Duplicate question id {0}")]
    DuplicateQuestion(i64),
    #[error("Duplicate answer id {answer_id} in question {question_id}")]
    DuplicateAnswer { question_id: i64, answer_id: i64 },
    #[error("Negative vote count for answer {answer_id} in question {question_id}")]
    NegativeVote { question_id: i64, answer_id: i64 },
}

/// Checks the invariants the presenter relies on when merging by id.
pub fn validate_survey(survey: &Survey) -> Result<(), ValidationError> {
    let mut seen_questions = HashSet::new();

    for question in &survey.questions_and_answers {
        if !seen_questions.insert(question.question_id) {
            return Err(ValidationError::DuplicateQuestion(question.question_id));
        }

        let mut seen_answers = HashSet::new();
        for answer in &question.answers {
            if !seen_answers.insert(answer.answer_id) {
                return Err(ValidationError::DuplicateAnswer {
                    question_id: question.question_id,
                    answer_id: answer.answer_id,
                });
            }
            if answer.vote_count < 0 {
                return Err(ValidationError::NegativeVote {
                    question_id: question.question_id,
                    answer_id: answer.answer_id,
                });
            }
        }
    }

    Ok(())
}
