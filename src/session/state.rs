//! The canonical view-orchestrator state machine.
//!
//! One machine serves both historical app variants; the drifted bits (risk
//! column, CSV export, email assistant, landing screen) are switched by
//! [`Capabilities`] and [`Landing`] instead of duplicated code.

use serde_json::json;

use crate::config::{Capabilities, Landing};
use crate::models::{AdminSnapshot, EmailCopy, Question, QuestionKind, Recommendation};

use super::{AdminState, AnswerLedger, AnswerValue, Navigator};

pub const CATALOG_ERROR: &str = "Failed to load quiz. Please check backend.";
pub const SUBMIT_ERROR: &str = "Could not generate recommendation. Please try again.";
pub const ADMIN_ERROR: &str = "Failed to load admin analytics.";
pub const EMAIL_ERROR: &str = "Could not generate email copy.";

/// Dominant mode switch: when `Admin`, the admin screen renders regardless
/// of the customer `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Customer,
    Admin,
}

/// Customer-mode screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Quiz,
    Result,
}

/// Status of the one-shot question catalog fetch.
#[derive(Debug)]
pub enum CatalogStatus {
    Loading,
    Ready(Vec<Question>),
    Failed,
}

/// Everything that can happen to a session: user input and network
/// completions alike re-enter the machine through here.
#[derive(Debug)]
pub enum Event {
    SessionStarted,
    CatalogLoaded(Vec<Question>),
    CatalogFailed,

    StartQuiz,
    Next,
    Back,
    SelectionUp,
    SelectionDown,
    ChooseSelected,
    InputChar(char),
    InputBackspace,
    SubmitRequested,
    SubmitSucceeded(Recommendation),
    SubmitFailed,

    Restart,
    GoHome,
    ResultScrollUp,
    ResultScrollDown,
    EmailRequested,
    EmailReady(EmailCopy),
    EmailFailed,

    EnterAdmin,
    LeaveAdmin,
    AdminRefresh,
    AdminLoaded { seq: u64, snapshot: AdminSnapshot },
    AdminFailed { seq: u64 },
    CycleFilter,
    ExportRequested,
    ExportSaved { path: String },
    ExportFailed,

    Quit,
}

/// IO the async shell must perform on the machine's behalf. The machine
/// itself never touches the network.
#[derive(Debug, PartialEq)]
pub enum Effect {
    FetchCatalog,
    Submit(serde_json::Value),
    FetchAdmin { seq: u64 },
    GenerateEmail(serde_json::Value),
    ExportCsv,
}

/// Full session state. All fields are ephemeral; nothing survives process
/// exit.
pub struct SessionState {
    pub capabilities: Capabilities,
    pub mode: Mode,
    pub view: View,
    prev_view: View,
    pub catalog: CatalogStatus,
    pub ledger: AnswerLedger,
    pub nav: Navigator,
    /// Highlight position within the current question's options.
    /// Presentation state only; reset on navigation.
    pub option_cursor: usize,
    pub submitting: bool,
    pub quiz_error: Option<&'static str>,
    pub recommendation: Option<Recommendation>,
    pub result_scroll: usize,
    pub email: Option<EmailCopy>,
    pub email_pending: bool,
    pub email_error: Option<&'static str>,
    pub admin: AdminState,
    pub should_quit: bool,
}

impl SessionState {
    pub fn new(landing: Landing, capabilities: Capabilities) -> Self {
        let view = match landing {
            Landing::Home => View::Home,
            Landing::Quiz => View::Quiz,
        };

        Self {
            capabilities,
            mode: Mode::Customer,
            view,
            prev_view: View::Home,
            catalog: CatalogStatus::Loading,
            ledger: AnswerLedger::new(),
            nav: Navigator::default(),
            option_cursor: 0,
            submitting: false,
            quiz_error: None,
            recommendation: None,
            result_scroll: 0,
            email: None,
            email_pending: false,
            email_error: None,
            admin: AdminState::default(),
            should_quit: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        match &self.catalog {
            CatalogStatus::Ready(questions) => questions,
            _ => &[],
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions().get(self.nav.cursor())
    }

    /// Apply one event, returning the effects to execute.
    ///
    /// Events that do not fit the current mode/view (or a disabled
    /// capability) are silently dropped; the machine never panics on
    /// unexpected input.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SessionStarted => vec![Effect::FetchCatalog],
            Event::CatalogLoaded(questions) => {
                self.nav = Navigator::new(questions.len());
                self.catalog = CatalogStatus::Ready(questions);
                vec![]
            }
            Event::CatalogFailed => {
                self.catalog = CatalogStatus::Failed;
                vec![]
            }

            Event::StartQuiz => {
                if self.mode == Mode::Customer && self.view == View::Home {
                    self.view = View::Quiz;
                }
                vec![]
            }
            Event::Next => {
                if self.in_quiz() && !self.submitting {
                    self.nav.next();
                    self.option_cursor = 0;
                }
                vec![]
            }
            Event::Back => {
                if self.in_quiz() && !self.submitting {
                    self.nav.back();
                    self.option_cursor = 0;
                }
                vec![]
            }
            Event::SelectionUp => {
                self.move_selection(-1);
                vec![]
            }
            Event::SelectionDown => {
                self.move_selection(1);
                vec![]
            }
            Event::ChooseSelected => {
                self.choose_selected();
                vec![]
            }
            Event::InputChar(c) => {
                self.input_char(c);
                vec![]
            }
            Event::InputBackspace => {
                self.input_backspace();
                vec![]
            }
            Event::SubmitRequested => {
                if self.in_quiz() && self.nav.is_last() && !self.submitting {
                    self.submitting = true;
                    self.quiz_error = None;
                    vec![Effect::Submit(self.ledger.to_json())]
                } else {
                    vec![]
                }
            }
            Event::SubmitSucceeded(recommendation) => {
                self.submitting = false;
                self.quiz_error = None;
                self.recommendation = Some(recommendation);
                self.result_scroll = 0;
                self.view = View::Result;
                vec![]
            }
            Event::SubmitFailed => {
                // Quiz state and ledger stay intact so the user can retry.
                self.submitting = false;
                self.quiz_error = Some(SUBMIT_ERROR);
                vec![]
            }

            Event::Restart => {
                if self.mode == Mode::Customer && self.view == View::Result {
                    self.ledger.clear();
                    self.nav.reset();
                    self.option_cursor = 0;
                    self.recommendation = None;
                    self.result_scroll = 0;
                    self.email = None;
                    self.email_pending = false;
                    self.email_error = None;
                    self.quiz_error = None;
                    self.view = View::Quiz;
                }
                vec![]
            }
            Event::GoHome => {
                if self.mode == Mode::Customer && self.view == View::Result {
                    self.view = View::Home;
                }
                vec![]
            }
            Event::ResultScrollUp => {
                self.result_scroll = self.result_scroll.saturating_sub(1);
                vec![]
            }
            Event::ResultScrollDown => {
                if self.mode == Mode::Customer && self.view == View::Result {
                    self.result_scroll += 1;
                }
                vec![]
            }
            Event::EmailRequested => {
                if !self.capabilities.email_assistant
                    || self.view != View::Result
                    || self.email_pending
                {
                    return vec![];
                }
                let Some(recommendation) = &self.recommendation else {
                    return vec![];
                };
                let body = json!({
                    "quiz": self.ledger,
                    "recommendation": recommendation,
                });
                self.email_pending = true;
                self.email_error = None;
                vec![Effect::GenerateEmail(body)]
            }
            Event::EmailReady(email) => {
                self.email_pending = false;
                self.email_error = None;
                self.email = Some(email);
                vec![]
            }
            Event::EmailFailed => {
                self.email_pending = false;
                self.email_error = Some(EMAIL_ERROR);
                vec![]
            }

            Event::EnterAdmin => {
                if self.mode == Mode::Customer {
                    self.prev_view = self.view;
                    self.mode = Mode::Admin;
                }
                let seq = self.admin.begin_fetch();
                vec![Effect::FetchAdmin { seq }]
            }
            Event::LeaveAdmin => {
                if self.mode == Mode::Admin {
                    self.mode = Mode::Customer;
                    self.view = self.prev_view;
                }
                vec![]
            }
            Event::AdminRefresh => {
                if self.mode != Mode::Admin {
                    return vec![];
                }
                let seq = self.admin.begin_fetch();
                vec![Effect::FetchAdmin { seq }]
            }
            Event::AdminLoaded { seq, snapshot } => {
                if self.admin.is_current(seq) {
                    self.admin.finish_fetch(snapshot);
                } else {
                    tracing::debug!(seq, "discarding stale admin snapshot");
                }
                vec![]
            }
            Event::AdminFailed { seq } => {
                if self.admin.is_current(seq) {
                    self.admin.fail_fetch(ADMIN_ERROR);
                }
                vec![]
            }
            Event::CycleFilter => {
                if self.mode == Mode::Admin {
                    self.admin.cycle_filter();
                }
                vec![]
            }
            Event::ExportRequested => {
                if self.capabilities.export && self.mode == Mode::Admin && !self.admin.exporting {
                    self.admin.exporting = true;
                    self.admin.status = None;
                    vec![Effect::ExportCsv]
                } else {
                    vec![]
                }
            }
            Event::ExportSaved { path } => {
                self.admin.exporting = false;
                self.admin.status = Some(format!("Saved export to {path}"));
                vec![]
            }
            Event::ExportFailed => {
                self.admin.exporting = false;
                self.admin.status = Some("Export failed.".to_string());
                vec![]
            }

            Event::Quit => {
                self.should_quit = true;
                vec![]
            }
        }
    }

    fn in_quiz(&self) -> bool {
        self.mode == Mode::Customer
            && self.view == View::Quiz
            && matches!(self.catalog, CatalogStatus::Ready(_))
    }

    fn move_selection(&mut self, delta: isize) {
        if !self.in_quiz() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        let count = question.options.len();
        if count == 0 {
            return;
        }
        self.option_cursor = (self.option_cursor as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn choose_selected(&mut self) {
        if !self.in_quiz() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        let Some(option) = question.options.get(self.option_cursor) else {
            return;
        };
        let question_id = question.id.clone();
        let option_id = option.id.clone();

        match question.kind {
            QuestionKind::SingleChoice => {
                self.ledger.set(&question_id, AnswerValue::Single(option_id));
            }
            QuestionKind::MultiChoice => {
                self.ledger.toggle_option(&question_id, &option_id);
            }
            QuestionKind::Number | QuestionKind::Text => {}
        }
    }

    fn input_char(&mut self, c: char) {
        if !self.in_quiz() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        let question_id = question.id.clone();

        match question.kind {
            QuestionKind::Number => {
                // The widget only emits numeric-shaped text; the value itself
                // stays a raw string and is never range-checked client-side.
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    let mut value = self.current_input(&question_id);
                    value.push(c);
                    self.ledger.set(&question_id, AnswerValue::Number(value));
                }
            }
            QuestionKind::Text => {
                if !c.is_control() {
                    let mut value = self.current_input(&question_id);
                    value.push(c);
                    self.ledger.set(&question_id, AnswerValue::Text(value));
                }
            }
            QuestionKind::SingleChoice | QuestionKind::MultiChoice => {}
        }
    }

    fn input_backspace(&mut self) {
        if !self.in_quiz() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        let question_id = question.id.clone();
        let kind = question.kind;

        let mut value = self.current_input(&question_id);
        if value.pop().is_some() {
            let answer = match kind {
                QuestionKind::Number => AnswerValue::Number(value),
                _ => AnswerValue::Text(value),
            };
            self.ledger.set(&question_id, answer);
        }
    }

    fn current_input(&self, question_id: &str) -> String {
        match self.ledger.get(question_id) {
            Some(AnswerValue::Number(s)) | Some(AnswerValue::Text(s)) => s.clone(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::models::SegmentsSummary;

    fn catalog() -> Vec<Question> {
        serde_json::from_value(json!([
            {
                "id": "profile_type",
                "text": "Who are you shopping for today?",
                "type": "single_choice",
                "options": [
                    {"id": "child", "label": "Child"},
                    {"id": "adult_woman", "label": "Adult woman"}
                ]
            },
            {
                "id": "goals",
                "text": "What are your top health goals?",
                "type": "multi_choice",
                "options": [
                    {"id": "immunity", "label": "Stronger immunity"},
                    {"id": "sleep", "label": "Better sleep"}
                ]
            },
            {
                "id": "budget",
                "text": "Monthly budget (USD)?",
                "type": "number"
            }
        ]))
        .unwrap()
    }

    fn recommendation() -> Recommendation {
        serde_json::from_value(json!({
            "products": ["Kids Daily"],
            "upsell": [],
            "explanation": ["Kids Daily: Designed for this age group."]
        }))
        .unwrap()
    }

    fn snapshot() -> AdminSnapshot {
        let segments: SegmentsSummary = serde_json::from_value(json!({
            "total_recommendations": 1,
            "by_profile_type": {"child": 1}
        }))
        .unwrap();
        AdminSnapshot {
            recent: vec![],
            segments,
        }
    }

    fn ready_state() -> SessionState {
        let mut state = SessionState::new(Landing::Quiz, Capabilities::default());
        let effects = state.apply(Event::SessionStarted);
        assert_eq!(effects, vec![Effect::FetchCatalog]);
        state.apply(Event::CatalogLoaded(catalog()));
        state
    }

    #[test]
    fn session_start_requests_catalog_once() {
        let mut state = SessionState::new(Landing::Home, Capabilities::default());
        assert_eq!(state.apply(Event::SessionStarted), vec![Effect::FetchCatalog]);
        assert!(matches!(state.catalog, CatalogStatus::Loading));
    }

    #[test]
    fn landing_home_requires_start_quiz() {
        let mut state = SessionState::new(Landing::Home, Capabilities::default());
        state.apply(Event::CatalogLoaded(catalog()));
        assert_eq!(state.view, View::Home);
        state.apply(Event::StartQuiz);
        assert_eq!(state.view, View::Quiz);
    }

    #[test]
    fn navigation_preserves_ledger_values() {
        let mut state = ready_state();
        state.apply(Event::ChooseSelected); // profile_type = child
        state.apply(Event::Next);
        state.apply(Event::ChooseSelected); // goals += immunity
        state.apply(Event::Back);
        state.apply(Event::Next);

        assert_eq!(
            state.ledger.get("profile_type"),
            Some(&AnswerValue::Single("child".into()))
        );
        assert_eq!(
            state.ledger.get("goals"),
            Some(&AnswerValue::Multi(vec!["immunity".into()]))
        );
    }

    #[test]
    fn single_choice_overwrites_on_reselect() {
        let mut state = ready_state();
        state.apply(Event::ChooseSelected);
        state.apply(Event::SelectionDown);
        state.apply(Event::ChooseSelected);

        assert_eq!(
            state.ledger.get("profile_type"),
            Some(&AnswerValue::Single("adult_woman".into()))
        );
    }

    #[test]
    fn number_widget_accepts_only_numeric_shapes() {
        let mut state = ready_state();
        state.apply(Event::Next);
        state.apply(Event::Next);
        assert!(state.nav.is_last());

        for c in "4x5.b0".chars() {
            state.apply(Event::InputChar(c));
        }
        assert_eq!(
            state.ledger.get("budget"),
            Some(&AnswerValue::Number("45.0".into()))
        );

        state.apply(Event::InputBackspace);
        assert_eq!(
            state.ledger.get("budget"),
            Some(&AnswerValue::Number("45.".into()))
        );
    }

    #[test]
    fn submit_only_fires_on_last_question() {
        let mut state = ready_state();
        assert_eq!(state.apply(Event::SubmitRequested), vec![]);

        state.apply(Event::Next);
        state.apply(Event::Next);
        let effects = state.apply(Event::SubmitRequested);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Submit(_)));
        assert!(state.submitting);

        // Repeat triggers are suppressed while in flight.
        assert_eq!(state.apply(Event::SubmitRequested), vec![]);
    }

    #[test]
    fn submit_success_moves_to_result_with_recommendation_stored() {
        let mut state = ready_state();
        state.apply(Event::Next);
        state.apply(Event::Next);
        state.apply(Event::SubmitRequested);
        state.apply(Event::SubmitSucceeded(recommendation()));

        assert_eq!(state.view, View::Result);
        assert!(!state.submitting);
        assert!(state.quiz_error.is_none());
        assert_eq!(
            state.recommendation.as_ref().unwrap().products,
            vec!["Kids Daily"]
        );
    }

    #[test]
    fn submit_failure_stays_on_quiz_and_keeps_ledger() {
        let mut state = ready_state();
        state.apply(Event::ChooseSelected);
        state.apply(Event::Next);
        state.apply(Event::Next);
        state.apply(Event::SubmitRequested);
        state.apply(Event::SubmitFailed);

        assert_eq!(state.view, View::Quiz);
        assert!(!state.submitting);
        assert_eq!(state.quiz_error, Some(SUBMIT_ERROR));
        assert_eq!(
            state.ledger.get("profile_type"),
            Some(&AnswerValue::Single("child".into()))
        );
    }

    #[test]
    fn restart_clears_session_and_lands_on_quiz() {
        let mut state = ready_state();
        state.apply(Event::ChooseSelected);
        state.apply(Event::Next);
        state.apply(Event::Next);
        state.apply(Event::SubmitRequested);
        state.apply(Event::SubmitSucceeded(recommendation()));
        state.email = Some(EmailCopy {
            subject: "s".into(),
            preview_line: "p".into(),
            body_text: "b".into(),
        });

        state.apply(Event::Restart);

        assert_eq!(state.view, View::Quiz);
        assert!(state.ledger.is_empty());
        assert_eq!(state.nav.cursor(), 0);
        assert!(state.recommendation.is_none());
        assert!(state.email.is_none());
        assert!(state.quiz_error.is_none());
    }

    #[test]
    fn admin_mode_dominates_and_restores_previous_view() {
        let mut state = ready_state();
        let effects = state.apply(Event::EnterAdmin);
        assert_eq!(state.mode, Mode::Admin);
        assert!(matches!(effects[0], Effect::FetchAdmin { seq: 1 }));
        assert!(state.admin.loading);

        state.apply(Event::LeaveAdmin);
        assert_eq!(state.mode, Mode::Customer);
        assert_eq!(state.view, View::Quiz);
    }

    #[test]
    fn stale_admin_response_is_discarded() {
        let mut state = ready_state();
        state.apply(Event::EnterAdmin); // seq 1
        state.apply(Event::AdminRefresh); // seq 2

        state.apply(Event::AdminLoaded {
            seq: 1,
            snapshot: snapshot(),
        });
        assert!(state.admin.snapshot.is_none());
        assert!(state.admin.loading);

        state.apply(Event::AdminLoaded {
            seq: 2,
            snapshot: snapshot(),
        });
        assert!(state.admin.snapshot.is_some());
        assert!(!state.admin.loading);
    }

    #[test]
    fn admin_failure_surfaces_error_without_partial_snapshot() {
        let mut state = ready_state();
        state.apply(Event::EnterAdmin);
        state.apply(Event::AdminFailed { seq: 1 });

        assert_eq!(state.admin.error, Some(ADMIN_ERROR));
        assert!(state.admin.snapshot.is_none());
        assert!(!state.admin.loading);
    }

    #[test]
    fn email_assistant_is_capability_gated() {
        let mut state = ready_state();
        state.apply(Event::Next);
        state.apply(Event::Next);
        state.apply(Event::SubmitRequested);
        state.apply(Event::SubmitSucceeded(recommendation()));

        assert_eq!(state.apply(Event::EmailRequested), vec![]);

        let mut state = SessionState::new(
            Landing::Quiz,
            Capabilities {
                email_assistant: true,
                ..Capabilities::default()
            },
        );
        state.apply(Event::CatalogLoaded(catalog()));
        state.apply(Event::Next);
        state.apply(Event::Next);
        state.apply(Event::SubmitRequested);
        state.apply(Event::SubmitSucceeded(recommendation()));

        let effects = state.apply(Event::EmailRequested);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::GenerateEmail(_)));
        assert!(state.email_pending);

        // One in flight at a time.
        assert_eq!(state.apply(Event::EmailRequested), vec![]);
    }

    #[test]
    fn export_is_capability_gated_and_single_flight() {
        let mut state = SessionState::new(
            Landing::Quiz,
            Capabilities {
                export: true,
                ..Capabilities::default()
            },
        );
        state.apply(Event::CatalogLoaded(catalog()));

        assert_eq!(state.apply(Event::ExportRequested), vec![]); // not in admin

        state.apply(Event::EnterAdmin);
        assert_eq!(state.apply(Event::ExportRequested), vec![Effect::ExportCsv]);
        assert_eq!(state.apply(Event::ExportRequested), vec![]);

        state.apply(Event::ExportSaved {
            path: "export.csv".into(),
        });
        assert_eq!(
            state.admin.status.as_deref(),
            Some("Saved export to export.csv")
        );
    }

    #[test]
    fn catalog_failure_is_terminal_for_the_quiz_screen() {
        let mut state = SessionState::new(Landing::Quiz, Capabilities::default());
        state.apply(Event::SessionStarted);
        state.apply(Event::CatalogFailed);

        assert!(matches!(state.catalog, CatalogStatus::Failed));
        // Quiz interaction is inert without a catalog.
        assert_eq!(state.apply(Event::SubmitRequested), vec![]);
        state.apply(Event::Next);
        assert_eq!(state.nav.cursor(), 0);
    }
}
