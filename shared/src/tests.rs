#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use futures::executor::block_on;
    use rand::{rngs::StdRng, SeedableRng};
    use crate::api::{check_status, parse_survey_id, replace_survey, Method, SurveyApi, SurveyRequest};
    use crate::error::{Result, SurveyError};
    use crate::models::{Answer, Question, Survey};
    use crate::presenter::{NoticeLevel, RecreateOutcome, RefreshOutcome, SurveyPresenter, VoteOutcome, VOTE_THANKS};
    use crate::sampler::{pick, pick_ids, pick_json, SamplingError, VoteTarget};
    use crate::validation::ValidationError;

    fn survey(name: &str, questions: &[(i64, &[(i64, i64)])]) -> Survey {
        Survey {
            name: name.to_string(),
            survey_id: None,
            questions_and_answers: questions.iter().map(|(question_id, answers)| Question {
                question_id: *question_id,
                question_text: format!("Question {}", question_id),
                answers: answers.iter().map(|&(answer_id, vote_count)| Answer {
                    answer_id,
                    label: format!("Answer {}", answer_id),
                    vote_count,
                }).collect(),
            }).collect(),
        }
    }

    fn active(id: &str) -> SurveyPresenter {
        SurveyPresenter::initialize(Some(id.to_string()))
    }

    fn refresh(presenter: &mut SurveyPresenter, result: Result<Survey>) -> RefreshOutcome {
        let ticket = presenter.begin_refresh().expect("presenter should be active");
        presenter.complete_refresh(ticket, result)
    }

    #[derive(Default)]
    struct FakeApi {
        surveys: RefCell<HashMap<String, Survey>>,
        calls: RefCell<Vec<String>>,
        next_id: String,
        fail_delete: bool,
    }

    impl SurveyApi for FakeApi {
        async fn fetch_survey(&self, survey_id: &str) -> Result<Survey> {
            self.calls.borrow_mut().push(format!("fetch {}", survey_id));
            self.surveys.borrow().get(survey_id).cloned()
                .ok_or_else(|| SurveyError::status(500, "unknown survey"))
        }

        async fn cast_vote(&self, survey_id: &str, question_id: i64, answer_id: i64) -> Result<()> {
            self.calls.borrow_mut().push(format!("vote {} {} {}", survey_id, question_id, answer_id));
            Ok(())
        }

        async fn delete_survey(&self) -> Result<()> {
            self.calls.borrow_mut().push("delete".into());
            if self.fail_delete {
                return Err(SurveyError::transport("connection refused"));
            }
            self.surveys.borrow_mut().clear();
            Ok(())
        }

        async fn recreate_survey(&self) -> Result<String> {
            self.calls.borrow_mut().push("recreate".into());
            self.surveys.borrow_mut().insert(
                self.next_id.clone(),
                survey("Fresh", &[(0, &[(0, 0), (1, 0)]), (1, &[(0, 0), (1, 0), (2, 0)])]),
            );
            Ok(self.next_id.clone())
        }
    }

    #[test]
    fn test_parse_wire_shape() {
        let body = r#"{
            "Name": "Team lunch",
            "SurveyId": "abc",
            "QuestionsAndAnswers": [
                { "QuestionId": 0, "Question": "Where?", "Answers": [
                    { "AnswerId": 0, "Answer": "Pizza", "Vote": 3 },
                    { "AnswerId": 1, "Vote": 5 }
                ]}
            ]
        }"#;

        let survey = Survey::from_json(body).unwrap();
        assert_eq!(survey.name, "Team lunch");
        assert_eq!(survey.survey_id.as_deref(), Some("abc"));
        let question = &survey.questions_and_answers[0];
        assert_eq!(question.question_text, "Where?");
        assert_eq!(question.answers[1].label, "");
        assert_eq!(question.answers[1].vote_count, 5);
    }

    #[test]
    fn test_parse_rejects_bad_payloads() {
        assert!(matches!(Survey::from_json(r#"{"Name": "x"}"#), Err(SurveyError::Parse(_))));
        assert!(matches!(Survey::from_json("not json"), Err(SurveyError::Parse(_))));

        let duplicated = r#"{
            "Name": "x",
            "QuestionsAndAnswers": [
                { "QuestionId": 1, "Answers": [] },
                { "QuestionId": 1, "Answers": [] }
            ]
        }"#;
        assert_eq!(
            Survey::from_json(duplicated),
            Err(SurveyError::Invalid(ValidationError::DuplicateQuestion(1)))
        );

        let negative = r#"{
            "Name": "x",
            "QuestionsAndAnswers": [
                { "QuestionId": 2, "Answers": [{ "AnswerId": 0, "Vote": -1 }] }
            ]
        }"#;
        assert_eq!(
            Survey::from_json(negative),
            Err(SurveyError::Invalid(ValidationError::NegativeVote { question_id: 2, answer_id: 0 }))
        );
    }

    #[test]
    fn test_idle_presenter_issues_no_fetch() {
        let mut presenter = SurveyPresenter::initialize(None);
        assert!(!presenter.is_active());
        assert!(presenter.begin_refresh().is_none());

        let mut presenter = SurveyPresenter::initialize(Some("  ".into()));
        assert!(presenter.begin_refresh().is_none());
    }

    #[test]
    fn test_refresh_derives_chart_data() {
        let mut presenter = active("s1");
        let outcome = refresh(&mut presenter, Ok(survey("Lunch", &[
            (0, &[(0, 4), (1, 2)]),
            (1, &[(0, 1), (1, 0), (2, 7)]),
            (2, &[]),
        ])));

        assert_eq!(outcome, RefreshOutcome::Applied { added: 3 });
        assert_eq!(presenter.name(), Some("Lunch"));
        assert_eq!(presenter.questions().len(), 3);
        for view in presenter.questions() {
            assert_eq!(view.votes.len(), view.answers.len());
            assert_eq!(view.vote_labels.len(), view.answers.len());
        }
        let second = presenter.question(1).unwrap();
        assert_eq!(second.votes, vec![1, 0, 7]);
        assert_eq!(second.vote_labels, vec![1, 2, 3]);
        assert_eq!(second.total_votes(), 8);
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let mut presenter = active("s1");
        refresh(&mut presenter, Ok(survey("Lunch", &[(5, &[(0, 1)]), (2, &[(0, 1)])])));
        let outcome = refresh(&mut presenter, Ok(survey("Lunch", &[(2, &[(0, 9)]), (7, &[(0, 0)]), (5, &[(0, 3)])])));

        assert_eq!(outcome, RefreshOutcome::Applied { added: 1 });
        let ids: Vec<_> = presenter.questions().iter().map(|q| q.question_id).collect();
        assert_eq!(ids, vec![5, 2, 7]);
        assert_eq!(presenter.question(2).unwrap().votes, vec![9]);
        assert_eq!(presenter.question(5).unwrap().votes, vec![3]);
    }

    #[test]
    fn test_name_is_set_once() {
        let mut presenter = active("s1");
        refresh(&mut presenter, Ok(survey("First", &[(0, &[(0, 0)])])));
        refresh(&mut presenter, Ok(survey("Renamed", &[(0, &[(0, 1)])])));
        assert_eq!(presenter.name(), Some("First"));
    }

    #[test]
    fn test_blank_name_does_not_lock_in() {
        let mut presenter = active("s1");
        refresh(&mut presenter, Ok(survey("", &[])));
        assert_eq!(presenter.name(), None);

        refresh(&mut presenter, Ok(survey("Lunch", &[(0, &[(0, 0)])])));
        assert_eq!(presenter.name(), Some("Lunch"));
    }

    #[test]
    fn test_largest_answer_id_is_labelled() {
        let body = format!(
            r#"{{"Name":"Edge","QuestionsAndAnswers":[{{"QuestionId":0,"Answers":[{{"AnswerId":{},"Vote":2}}]}}]}}"#,
            i64::MAX
        );
        let payload = Survey::from_json(&body).unwrap();

        let mut presenter = active("s1");
        let outcome = refresh(&mut presenter, Ok(payload));
        assert_eq!(outcome, RefreshOutcome::Applied { added: 1 });
        let view = presenter.question(0).unwrap();
        assert_eq!(view.vote_labels, vec![i64::MAX]);
        assert_eq!(view.votes, vec![2]);
    }

    #[test]
    fn test_voted_flag_survives_refresh() {
        let mut presenter = active("s1");
        refresh(&mut presenter, Ok(survey("Lunch", &[(0, &[(0, 0), (1, 0)]), (1, &[(0, 0)])])));

        let ticket = presenter.begin_vote(0, 1).unwrap();
        let outcome = presenter.complete_vote(ticket, Ok(()));
        assert!(outcome.should_refresh());
        assert_eq!(outcome.notice().level, NoticeLevel::Success);
        assert_eq!(outcome.notice().message, VOTE_THANKS);

        refresh(&mut presenter, Ok(survey("Lunch", &[(0, &[(0, 0), (1, 1)]), (1, &[(0, 0)])])));
        assert!(presenter.question(0).unwrap().voted);
        assert!(!presenter.question(1).unwrap().voted);
        assert_eq!(presenter.question(0).unwrap().votes, vec![0, 1]);
    }

    #[test]
    fn test_fetch_failure_resets_to_idle() {
        let mut presenter = active("s1");
        refresh(&mut presenter, Ok(survey("Lunch", &[(0, &[(0, 0)])])));
        let ticket = presenter.begin_vote(0, 0).unwrap();
        presenter.complete_vote(ticket, Ok(()));

        let outcome = refresh(&mut presenter, Err(SurveyError::status(500, "boom")));
        assert_eq!(outcome, RefreshOutcome::Reset(SurveyError::status(500, "boom")));
        assert_eq!(presenter.survey_id(), None);
        assert_eq!(presenter.name(), None);
        assert!(presenter.questions().is_empty());
        assert!(presenter.begin_refresh().is_none());

        let mut fresh = active("s2");
        refresh(&mut fresh, Err(SurveyError::transport("offline")));
        assert!(!fresh.is_active());
    }

    #[test]
    fn test_out_of_order_responses_are_dropped() {
        let mut presenter = active("s1");
        let older = presenter.begin_refresh().unwrap();
        let newer = presenter.begin_refresh().unwrap();
        assert_ne!(older, newer);

        presenter.complete_refresh(newer, Ok(survey("Lunch", &[(0, &[(0, 5)])])));
        let outcome = presenter.complete_refresh(older, Ok(survey("Lunch", &[(0, &[(0, 2)]), (1, &[])])));

        assert_eq!(outcome, RefreshOutcome::Stale);
        assert_eq!(presenter.questions().len(), 1);
        assert_eq!(presenter.question(0).unwrap().votes, vec![5]);

        let late_failure = presenter.begin_refresh().unwrap();
        let latest = presenter.begin_refresh().unwrap();
        presenter.complete_refresh(latest, Ok(survey("Lunch", &[(0, &[(0, 6)])])));
        assert_eq!(presenter.complete_refresh(late_failure, Err(SurveyError::transport("timeout"))), RefreshOutcome::Stale);
        assert!(presenter.is_active());
    }

    #[test]
    fn test_response_for_replaced_survey_is_ignored() {
        let mut presenter = active("old");
        let ticket = presenter.begin_refresh().unwrap();
        assert_eq!(presenter.complete_recreate(Ok("new".into())), RecreateOutcome::Activated("new".into()));

        let outcome = presenter.complete_refresh(ticket, Err(SurveyError::status(404, "gone")));
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert_eq!(presenter.survey_id(), Some("new"));
    }

    #[test]
    fn test_vote_preconditions() {
        let presenter = SurveyPresenter::new();
        assert_eq!(presenter.begin_vote(0, 0), Err(SurveyError::NoActiveSurvey));

        let mut presenter = active("s1");
        refresh(&mut presenter, Ok(survey("Lunch", &[(0, &[(0, 0)])])));
        assert_eq!(presenter.begin_vote(3, 0), Err(SurveyError::UnknownQuestion(3)));
        assert_eq!(
            presenter.begin_vote(0, 4),
            Err(SurveyError::UnknownAnswer { question_id: 0, answer_id: 4 })
        );
    }

    #[test]
    fn test_vote_failure_leaves_state_intact() {
        let mut presenter = active("s1");
        refresh(&mut presenter, Ok(survey("Lunch", &[(0, &[(0, 0)])])));

        let ticket = presenter.begin_vote(0, 0).unwrap();
        let outcome = presenter.complete_vote(ticket, Err(SurveyError::status(500, "db down")));

        assert!(matches!(outcome, VoteOutcome::Failed(_)));
        assert!(!outcome.should_refresh());
        assert_eq!(outcome.notice().level, NoticeLevel::Error);
        assert_eq!(presenter.survey_id(), Some("s1"));
        assert!(!presenter.question(0).unwrap().voted);
    }

    #[test]
    fn test_recreate_flow_populates_new_survey() {
        let api = FakeApi { next_id: "fresh-id".into(), ..Default::default() };
        let mut presenter = active("old-id");
        refresh(&mut presenter, Ok(survey("Old", &[(0, &[(0, 3)])])));
        let ticket = presenter.begin_vote(0, 0).unwrap();
        presenter.complete_vote(ticket, Ok(()));

        let result = block_on(replace_survey(&api));
        assert_eq!(presenter.complete_recreate(result), RecreateOutcome::Activated("fresh-id".into()));
        assert_eq!(presenter.survey_id(), Some("fresh-id"));
        assert!(presenter.questions().is_empty());

        let ticket = presenter.begin_refresh().unwrap();
        let fetched = block_on(api.fetch_survey(ticket.survey_id()));
        assert_eq!(presenter.complete_refresh(ticket, fetched), RefreshOutcome::Applied { added: 2 });
        assert_eq!(presenter.name(), Some("Fresh"));
        assert!(presenter.questions().iter().all(|q| !q.voted));
        assert_eq!(
            *api.calls.borrow(),
            vec!["delete".to_string(), "recreate".to_string(), "fetch fresh-id".to_string()]
        );
    }

    #[test]
    fn test_recreate_failure_keeps_current_survey() {
        let api = FakeApi { next_id: "unused".into(), fail_delete: true, ..Default::default() };
        let mut presenter = active("s1");

        let result = block_on(replace_survey(&api));
        assert_eq!(result, Err(SurveyError::transport("connection refused")));
        assert_eq!(*api.calls.borrow(), vec!["delete".to_string()]);

        match presenter.complete_recreate(result) {
            RecreateOutcome::Failed(notice) => assert_eq!(notice.level, NoticeLevel::Error),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(presenter.survey_id(), Some("s1"));
        assert!(matches!(presenter.complete_recreate(Ok("  ".into())), RecreateOutcome::Failed(_)));
    }

    #[test]
    fn test_request_wire_format() {
        let fetch = SurveyRequest::fetch("a b&c");
        assert_eq!(fetch.method, Method::Get);
        assert_eq!(fetch.url("https://host/survey"), "https://host/survey?surveyId=a+b%26c");

        let vote = SurveyRequest::vote("s1", 2, 0);
        assert_eq!(vote.method, Method::Put);
        assert_eq!(vote.url("/api"), "/api?surveyId=s1&questionId=2&answerId=0");

        let delete = SurveyRequest::delete();
        assert_eq!(delete.method, Method::Delete);
        assert_eq!(delete.url("/api"), "/api");

        let recreate = SurveyRequest::recreate();
        assert_eq!(recreate.method.to_string(), "PUT");
        assert_eq!(recreate.url("/api?stage=prod"), "/api?stage=prod&recreate=true");
    }

    #[test]
    fn test_response_checks() {
        assert!(check_status(200, "").is_ok());
        assert!(check_status(204, "").is_ok());
        assert_eq!(check_status(500, " oops \n"), Err(SurveyError::status(500, "oops")));
        assert_eq!(check_status(404, ""), Err(SurveyError::status(404, "no response body")));

        assert_eq!(parse_survey_id("d2f1-77\n").unwrap(), "d2f1-77");
        assert_eq!(parse_survey_id("\"quoted\"").unwrap(), "quoted");
        assert!(matches!(parse_survey_id("   "), Err(SurveyError::Parse(_))));
    }

    #[test]
    fn test_sampler_single_choice() {
        let single = survey("One", &[(0, &[(0, 0)])]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(pick(&single, &mut rng).unwrap(), VoteTarget { question_index: 0, answer_index: 0 });
        }
    }

    #[test]
    fn test_sampler_covers_every_pair() {
        let payload = survey("Many", &[
            (10, &[(0, 0)]),
            (11, &[(0, 0), (1, 0)]),
            (12, &[(0, 0), (1, 0), (2, 0), (3, 0)]),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        for _ in 0..2_000 {
            let target = pick(&payload, &mut rng).unwrap();
            let question = &payload.questions_and_answers[target.question_index];
            assert!(target.answer_index < question.answers.len());
            seen.insert(target);
        }
        assert_eq!(seen.len(), 1 + 2 + 4);

        for _ in 0..100 {
            let (question_id, answer_id) = pick_ids(&payload, &mut rng).unwrap();
            let question = payload.questions_and_answers.iter().find(|q| q.question_id == question_id).unwrap();
            assert!(question.answers.iter().any(|a| a.answer_id == answer_id));
        }

        let target = VoteTarget { question_index: 2, answer_index: 3 };
        assert_eq!(target.resolve(&payload), Some((12, 3)));
        assert_eq!(VoteTarget { question_index: 0, answer_index: 1 }.resolve(&payload), None);
    }

    #[test]
    fn test_sampler_rejects_empty_payloads() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&survey("Empty", &[]), &mut rng), Err(SamplingError::NoQuestions));
        assert_eq!(
            pick(&survey("Hollow", &[(0, &[])]), &mut rng),
            Err(SamplingError::NoAnswers { question_index: 0 })
        );
        assert!(matches!(pick_json("{}", &mut rng), Err(SamplingError::Parse(_))));

        let (survey, target) = pick_json(
            r#"{"Name":"x","QuestionsAndAnswers":[{"QuestionId":0,"Answers":[{"AnswerId":0,"Vote":0}]}]}"#,
            &mut rng,
        ).unwrap();
        assert_eq!(target.resolve(&survey), Some((0, 0)));
        assert_eq!(serde_json::to_string(&target).unwrap(), r#"{"questionId":0,"answerId":0}"#);
    }
}
