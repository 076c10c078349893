//! Client-side view of one survey, kept fresh by periodic fetches.
//!
//! [`SurveyPresenter`] does no I/O. The owner asks it for a ticket, performs
//! the request through a [`SurveyApi`](crate::api::SurveyApi) implementation
//! and hands the result back. Keeping the presenter behind a single owner
//! means every mutation is applied in arrival order without locking.

use std::collections::HashMap;
use crate::error::{Result, SurveyError};
use crate::models::{Answer, Question, Survey};

/// Fixed delay between two refresh ticks.
pub const REFRESH_INTERVAL_MS: u32 = 3_000;

pub const VOTE_THANKS: &str = "Thanks for your vote";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question_id: i64,
    pub question_text: String,
    pub answers: Vec<Answer>,
    pub votes: Vec<i64>,
    pub vote_labels: Vec<i64>,
    pub voted: bool,
}

impl QuestionView {
    fn new(question: Question) -> Self {
        let mut view = Self {
            question_id: question.question_id,
            question_text: String::new(),
            answers: Vec::new(),
            votes: Vec::new(),
            vote_labels: Vec::new(),
            voted: false,
        };
        view.update(question);
        view
    }

    // `voted` is client state and is left alone.
    fn update(&mut self, question: Question) {
        self.vote_labels = question.answers.iter().map(Answer::display_label).collect();
        self.votes = question.answers.iter().map(|a| a.vote_count).collect();
        self.question_text = question.question_text;
        self.answers = question.answers;
    }

    pub fn total_votes(&self) -> i64 {
        self.votes.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    survey_id: String,
}

impl FetchTicket {
    pub fn survey_id(&self) -> &str {
        &self.survey_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTicket {
    survey_id: String,
    question_id: i64,
    answer_id: i64,
}

impl VoteTicket {
    pub fn survey_id(&self) -> &str {
        &self.survey_id
    }

    pub fn question_id(&self) -> i64 {
        self.question_id
    }

    pub fn answer_id(&self) -> i64 {
        self.answer_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Merged; `added` counts questions seen for the first time.
    Applied { added: usize },
    /// Issued for another survey or overtaken by a newer response.
    Stale,
    /// The fetch failed and the presenter went back to idle.
    Reset(SurveyError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded(Notice),
    Failed(Notice),
}

impl VoteOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            VoteOutcome::Recorded(notice) | VoteOutcome::Failed(notice) => notice,
        }
    }

    pub fn should_refresh(&self) -> bool {
        matches!(self, VoteOutcome::Recorded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecreateOutcome {
    Activated(String),
    Failed(Notice),
}

#[derive(Debug, Clone, Default)]
pub struct SurveyPresenter {
    survey_id: Option<String>,
    name: Option<String>,
    questions: Vec<QuestionView>,
    index: HashMap<i64, usize>,
    next_seq: u64,
    last_applied: u64,
}

impl SurveyPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts idle unless a non-empty survey id is known up front.
    pub fn initialize(initial_survey_id: Option<String>) -> Self {
        let mut presenter = Self::new();
        if let Some(id) = initial_survey_id {
            presenter.activate(id);
        }
        presenter
    }

    pub fn survey_id(&self) -> Option<&str> {
        self.survey_id.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.survey_id.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn questions(&self) -> &[QuestionView] {
        &self.questions
    }

    pub fn question(&self, question_id: i64) -> Option<&QuestionView> {
        self.index.get(&question_id).map(|&pos| &self.questions[pos])
    }

    /// Switches to `survey_id`. Local state is dropped when the id changes.
    pub fn activate(&mut self, survey_id: String) {
        let survey_id = survey_id.trim().to_string();
        if survey_id.is_empty() || self.survey_id.as_deref() == Some(survey_id.as_str()) {
            return;
        }
        self.clear();
        self.survey_id = Some(survey_id);
    }

    /// Back to idle: no id, no name, no questions.
    pub fn reset(&mut self) {
        self.clear();
        self.survey_id = None;
    }

    fn clear(&mut self) {
        self.name = None;
        self.questions.clear();
        self.index.clear();
    }

    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        let survey_id = self.survey_id.clone()?;
        self.next_seq += 1;
        Some(FetchTicket { seq: self.next_seq, survey_id })
    }

    pub fn complete_refresh(&mut self, ticket: FetchTicket, result: Result<Survey>) -> RefreshOutcome {
        if self.survey_id.as_deref() != Some(ticket.survey_id.as_str()) || ticket.seq <= self.last_applied {
            return RefreshOutcome::Stale;
        }
        self.last_applied = ticket.seq;

        match result {
            Ok(survey) => RefreshOutcome::Applied { added: self.merge(survey) },
            Err(err) => {
                self.reset();
                RefreshOutcome::Reset(err)
            }
        }
    }

    fn merge(&mut self, survey: Survey) -> usize {
        if self.name.is_none() && !survey.name.is_empty() {
            self.name = Some(survey.name);
        }

        let mut added = 0;
        for question in survey.questions_and_answers {
            match self.index.get(&question.question_id) {
                Some(&pos) => self.questions[pos].update(question),
                None => {
                    self.index.insert(question.question_id, self.questions.len());
                    self.questions.push(QuestionView::new(question));
                    added += 1;
                }
            }
        }
        added
    }

    pub fn begin_vote(&self, question_id: i64, answer_id: i64) -> Result<VoteTicket> {
        let survey_id = self.survey_id.clone().ok_or(SurveyError::NoActiveSurvey)?;
        let question = self.question(question_id).ok_or(SurveyError::UnknownQuestion(question_id))?;
        if !question.answers.iter().any(|a| a.answer_id == answer_id) {
            return Err(SurveyError::UnknownAnswer { question_id, answer_id });
        }
        Ok(VoteTicket { survey_id, question_id, answer_id })
    }

    pub fn complete_vote(&mut self, ticket: VoteTicket, result: Result<()>) -> VoteOutcome {
        match result {
            Ok(()) => {
                if self.survey_id.as_deref() == Some(ticket.survey_id.as_str()) {
                    if let Some(&pos) = self.index.get(&ticket.question_id) {
                        self.questions[pos].voted = true;
                    }
                }
                VoteOutcome::Recorded(Notice::success(VOTE_THANKS))
            }
            Err(err) => VoteOutcome::Failed(Notice::error(format!("Vote was not recorded: {}", err))),
        }
    }

    pub fn complete_recreate(&mut self, result: Result<String>) -> RecreateOutcome {
        match result {
            Ok(survey_id) => {
                let survey_id = survey_id.trim().to_string();
                if survey_id.is_empty() {
                    return RecreateOutcome::Failed(Notice::error("Survey service returned an empty survey id"));
                }
                self.activate(survey_id.clone());
                RecreateOutcome::Activated(survey_id)
            }
            Err(err) => RecreateOutcome::Failed(Notice::error(format!("Could not recreate survey: {}", err))),
        }
    }
}
