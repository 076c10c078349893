use yew::prelude::*;
use yew_router::prelude::*;
use gloo_timers::callback::{Interval, Timeout};
use serde::Deserialize;
use time::{format_description, OffsetDateTime};
use wasm_bindgen::JsValue;
use shared::{
    replace_survey, FetchTicket, Notice, QuestionView, RecreateOutcome, RefreshOutcome, Result,
    Survey, SurveyApi, SurveyPresenter, VoteTicket, REFRESH_INTERVAL_MS,
};
use crate::config::CONFIG;
use crate::styles::*;
use crate::survey_chart::VoteChart;
use crate::survey_client::GlooSurveyClient;
use crate::toast::{Toast, ToastList};

const TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Default, Deserialize)]
struct SurveyQuery {
    #[serde(rename = "surveyId")]
    survey_id: Option<String>,
}

pub enum Msg {
    Tick,
    Fetched(FetchTicket, Result<Survey>),
    Vote { question_id: i64, answer_id: i64 },
    Voted(VoteTicket, Result<()>),
    Recreate,
    Recreated(Result<String>),
    Dismiss(u64),
}

pub struct SurveyList {
    presenter: SurveyPresenter,
    client: GlooSurveyClient,
    refresh_timer: Option<Interval>,
    toasts: Vec<Toast>,
    next_toast: u64,
    recreating: bool,
    last_refresh: Option<OffsetDateTime>,
}

impl Component for SurveyList {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let initial_survey_id = ctx.link().location()
            .and_then(|location| location.query::<SurveyQuery>().ok())
            .and_then(|query| query.survey_id);

        // Ticks while idle are no-ops, so the timer runs for the whole lifetime.
        let link = ctx.link().clone();
        let refresh_timer = Interval::new(REFRESH_INTERVAL_MS, move || link.send_message(Msg::Tick));
        ctx.link().send_message(Msg::Tick);

        Self {
            presenter: SurveyPresenter::initialize(initial_survey_id),
            client: GlooSurveyClient::new(CONFIG.api_base_url),
            refresh_timer: Some(refresh_timer),
            toasts: Vec::new(),
            next_toast: 0,
            recreating: false,
            last_refresh: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Tick => {
                self.refresh(ctx);
                false
            }
            Msg::Fetched(ticket, result) => match self.presenter.complete_refresh(ticket, result) {
                RefreshOutcome::Applied { .. } => {
                    self.last_refresh = Some(OffsetDateTime::now_utc());
                    true
                }
                RefreshOutcome::Stale => false,
                RefreshOutcome::Reset(err) => {
                    log_error(&format!("Error while loading survey: {}", err));
                    self.last_refresh = None;
                    true
                }
            },
            Msg::Vote { question_id, answer_id } => match self.presenter.begin_vote(question_id, answer_id) {
                Ok(ticket) => {
                    let client = self.client.clone();
                    ctx.link().send_future(async move {
                        let result = client
                            .cast_vote(ticket.survey_id(), ticket.question_id(), ticket.answer_id())
                            .await;
                        Msg::Voted(ticket, result)
                    });
                    false
                }
                Err(err) => {
                    self.push_notice(ctx, Notice::error(err.to_string()));
                    true
                }
            },
            Msg::Voted(ticket, result) => {
                let outcome = self.presenter.complete_vote(ticket, result);
                if outcome.should_refresh() {
                    self.refresh(ctx);
                }
                self.push_notice(ctx, outcome.notice().clone());
                true
            }
            Msg::Recreate => {
                if self.recreating {
                    return false;
                }
                self.recreating = true;
                let client = self.client.clone();
                ctx.link().send_future(async move { Msg::Recreated(replace_survey(&client).await) });
                true
            }
            Msg::Recreated(result) => {
                self.recreating = false;
                match self.presenter.complete_recreate(result) {
                    RecreateOutcome::Activated(_) => {
                        self.last_refresh = None;
                        self.refresh(ctx);
                    }
                    RecreateOutcome::Failed(notice) => {
                        log_error(&notice.message);
                        self.push_notice(ctx, notice);
                    }
                }
                true
            }
            Msg::Dismiss(id) => {
                let before = self.toasts.len();
                self.toasts.retain(|toast| toast.id != id);
                self.toasts.len() != before
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class={CONTAINER}>
                <h1 class={combine_classes(HEADING_LG, "text-white")}>
                    {self.presenter.name().filter(|name| !name.is_empty()).unwrap_or("Survey")}
                </h1>
                {self.render_status()}
                <div class={SPACE_Y_LG}>
                    {for self.presenter.questions().iter().map(|question| render_question(ctx, question))}
                </div>
                {self.render_controls(ctx)}
                <ToastList toasts={self.toasts.clone()} on_dismiss={ctx.link().callback(Msg::Dismiss)} />
            </div>
        }
    }

    fn destroy(&mut self, _: &Context<Self>) {
        // Dropping the handle clears the interval.
        self.refresh_timer = None;
    }
}

impl SurveyList {
    fn refresh(&mut self, ctx: &Context<Self>) {
        let Some(ticket) = self.presenter.begin_refresh() else {
            return;
        };
        let client = self.client.clone();
        ctx.link().send_future(async move {
            let result = client.fetch_survey(ticket.survey_id()).await;
            Msg::Fetched(ticket, result)
        });
    }

    fn push_notice(&mut self, ctx: &Context<Self>, notice: Notice) {
        let id = self.next_toast;
        self.next_toast += 1;
        self.toasts.push(Toast { id, notice });

        let link = ctx.link().clone();
        Timeout::new(TOAST_TIMEOUT_MS, move || link.send_message(Msg::Dismiss(id))).forget();
    }

    fn render_status(&self) -> Html {
        match (self.presenter.survey_id(), self.last_refresh) {
            (None, _) => html! {
                <div class={alert_style("warning")}>
                    {"No active survey. Start a new one to begin voting."}
                </div>
            },
            (Some(_), None) => html! {
                <div class="flex justify-center p-8">
                    <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading survey..."}</div>
                </div>
            },
            (Some(id), Some(at)) => html! {
                <div class={combine_classes(FLEX_BETWEEN, "mb-6")}>
                    <span class={TEXT_MUTED}>{format!("Survey {}", id)}</span>
                    <span class={TEXT_MUTED}>{format!("Updated {}", format_clock(at))}</span>
                </div>
            },
        }
    }

    fn render_controls(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="mt-8 flex justify-center">
                <button
                    type="button"
                    disabled={self.recreating}
                    onclick={ctx.link().callback(|_| Msg::Recreate)}
                    class={combine_classes(BUTTON_BASE, BUTTON_DANGER)}
                >
                    {if self.recreating { "Recreating..." } else { "Recreate survey" }}
                </button>
            </div>
        }
    }
}

fn render_question(ctx: &Context<SurveyList>, question: &QuestionView) -> Html {
    let question_id = question.question_id;

    html! {
        <div class={CARD_SECTION}>
            <h2 class={combine_classes(HEADING_SM, "break-words")}>{&question.question_text}</h2>
            <div class="flex flex-wrap gap-2 mb-4">
                {for question.answers.iter().map(|answer| {
                    let answer_id = answer.answer_id;
                    let onclick = ctx.link().callback(move |_| Msg::Vote { question_id, answer_id });
                    let caption = if answer.label.is_empty() {
                        format!("Option {}", answer.display_label())
                    } else {
                        answer.label.clone()
                    };
                    html! {
                        <button
                            type="button"
                            disabled={question.voted}
                            {onclick}
                            class={button_primary()}
                        >
                            {caption}
                        </button>
                    }
                })}
            </div>
            {if question.voted {
                html! { <p class={combine_classes(TEXT_MUTED, "mb-2")}>{"You voted on this question."}</p> }
            } else {
                html! {}
            }}
            <VoteChart
                labels={question.vote_labels.clone()}
                votes={question.votes.clone()}
                total={question.total_votes()}
            />
        </div>
    }
}

fn format_clock(at: OffsetDateTime) -> String {
    format_description::parse("[hour]:[minute]:[second]")
        .ok()
        .and_then(|format| at.format(&format).ok())
        .unwrap_or_default()
}

fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}
