//! Async shell around the session state machine.
//!
//! The render/input loop is single-threaded and never blocks on the
//! network: every [`Effect`] the machine emits is executed in a spawned
//! task whose completion re-enters the machine as an [`Event`] over an
//! unbounded channel.

use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session::{Effect, Event, Mode, SessionState, View};
use crate::ui;
use crate::AppError;

/// File the admin CSV export is written to, in the working directory.
const EXPORT_PATH: &str = "nutriguide-export.csv";

/// Run the full TUI session until the user quits.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let api = ApiClient::new(config.api_base.clone());
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut state = SessionState::new(config.landing, config.capabilities);

    // The catalog fetch fires exactly once per session, before the first
    // frame; the quiz screen gates on its loading sub-state until it lands.
    let effects = state.apply(Event::SessionStarted);
    execute_effects(effects, &api, &tx);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut state, &api, &tx, &mut rx).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut SessionState,
    api: &ApiClient,
    tx: &mpsc::UnboundedSender<Event>,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<(), AppError> {
    loop {
        // Drain completed network work before drawing.
        while let Ok(completion) = rx.try_recv() {
            let effects = state.apply(completion);
            execute_effects(effects, api, tx);
        }

        terminal.draw(|frame| ui::render(frame, state))?;

        if state.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(input) = translate_key(state, key.code) {
                    let effects = state.apply(input);
                    execute_effects(effects, api, tx);
                }
            }
        }
    }
}

/// Map a key press to a machine event, depending on the visible screen.
fn translate_key(state: &SessionState, key: KeyCode) -> Option<Event> {
    if state.mode == Mode::Admin {
        return match key {
            KeyCode::Tab | KeyCode::Esc => Some(Event::LeaveAdmin),
            KeyCode::Char('r') => Some(Event::AdminRefresh),
            KeyCode::Char('f') => Some(Event::CycleFilter),
            KeyCode::Char('x') => Some(Event::ExportRequested),
            KeyCode::Char('q') => Some(Event::Quit),
            _ => None,
        };
    }

    match state.view {
        View::Home => match key {
            KeyCode::Enter => Some(Event::StartQuiz),
            KeyCode::Tab => Some(Event::EnterAdmin),
            KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
            _ => None,
        },
        View::Quiz => translate_quiz_key(state, key),
        View::Result => match key {
            KeyCode::Char('r') => Some(Event::Restart),
            KeyCode::Char('h') => Some(Event::GoHome),
            KeyCode::Char('e') => Some(Event::EmailRequested),
            KeyCode::Up | KeyCode::Char('k') => Some(Event::ResultScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Event::ResultScrollDown),
            KeyCode::Tab => Some(Event::EnterAdmin),
            KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
            _ => None,
        },
    }
}

fn translate_quiz_key(state: &SessionState, key: KeyCode) -> Option<Event> {
    let Some(question) = state.current_question() else {
        // Loading / error / empty-catalog sub-states keep minimal controls.
        return match key {
            KeyCode::Tab => Some(Event::EnterAdmin),
            KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
            _ => None,
        };
    };

    let editing = question.kind.is_free_input();

    match key {
        KeyCode::Left => Some(Event::Back),
        KeyCode::Right => Some(Event::Next),
        KeyCode::Enter => {
            if state.nav.is_last() {
                Some(Event::SubmitRequested)
            } else {
                Some(Event::Next)
            }
        }
        KeyCode::Tab => Some(Event::EnterAdmin),
        KeyCode::Esc => Some(Event::Quit),
        KeyCode::Backspace if editing => Some(Event::InputBackspace),
        KeyCode::Char(c) if editing => Some(Event::InputChar(c)),
        KeyCode::Up | KeyCode::Char('k') => Some(Event::SelectionUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Event::SelectionDown),
        KeyCode::Char(' ') => Some(Event::ChooseSelected),
        KeyCode::Char('q') => Some(Event::Quit),
        _ => None,
    }
}

/// Spawn one task per effect; each sends its completion event back through
/// the channel. Failures collapse to their component's failure event here,
/// with the cause kept in the log only.
fn execute_effects(effects: Vec<Effect>, api: &ApiClient, tx: &mpsc::UnboundedSender<Event>) {
    for effect in effects {
        let api = api.clone();
        let tx = tx.clone();

        match effect {
            Effect::FetchCatalog => {
                tokio::spawn(async move {
                    let completion = match api.fetch_questions().await {
                        Ok(questions) => Event::CatalogLoaded(questions),
                        Err(err) => {
                            tracing::error!(%err, "catalog fetch failed");
                            Event::CatalogFailed
                        }
                    };
                    let _ = tx.send(completion);
                });
            }
            Effect::Submit(answers) => {
                tokio::spawn(async move {
                    let completion = match api.submit_answers(&answers).await {
                        Ok(recommendation) => Event::SubmitSucceeded(recommendation),
                        Err(err) => {
                            tracing::error!(%err, "recommendation submit failed");
                            Event::SubmitFailed
                        }
                    };
                    let _ = tx.send(completion);
                });
            }
            Effect::FetchAdmin { seq } => {
                tokio::spawn(async move {
                    let completion = match api.fetch_admin_snapshot().await {
                        Ok(snapshot) => Event::AdminLoaded { seq, snapshot },
                        Err(err) => {
                            tracing::error!(%err, seq, "admin fetch failed");
                            Event::AdminFailed { seq }
                        }
                    };
                    let _ = tx.send(completion);
                });
            }
            Effect::GenerateEmail(body) => {
                tokio::spawn(async move {
                    let completion = match api.welcome_email(&body).await {
                        Ok(email) => Event::EmailReady(email),
                        Err(err) => {
                            tracing::error!(%err, "email generation failed");
                            Event::EmailFailed
                        }
                    };
                    let _ = tx.send(completion);
                });
            }
            Effect::ExportCsv => {
                tokio::spawn(async move {
                    let completion = match export_to_file(&api).await {
                        Ok(path) => Event::ExportSaved { path },
                        Err(err) => {
                            tracing::error!(%err, "csv export failed");
                            Event::ExportFailed
                        }
                    };
                    let _ = tx.send(completion);
                });
            }
        }
    }
}

async fn export_to_file(api: &ApiClient) -> Result<String, AppError> {
    let csv = api.export_recent().await?;
    tokio::fs::write(EXPORT_PATH, csv).await?;
    Ok(EXPORT_PATH.to_string())
}
