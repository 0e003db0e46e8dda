//! Quiz screen: one question per page, widget depends on the question kind.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::models::{Question, QuestionKind};
use crate::session::{AnswerValue, CatalogStatus, SessionState, CATALOG_ERROR};

pub fn render(frame: &mut Frame, area: Rect, state: &SessionState) {
    match &state.catalog {
        CatalogStatus::Loading => {
            render_notice(frame, area, "Loading quiz…", Color::Yellow);
            return;
        }
        CatalogStatus::Failed => {
            render_notice(frame, area, CATALOG_ERROR, Color::Red);
            return;
        }
        CatalogStatus::Ready(questions) if questions.is_empty() => {
            render_notice(frame, area, "No questions available.", Color::DarkGray);
            return;
        }
        CatalogStatus::Ready(_) => {}
    }

    let Some(question) = state.current_question() else {
        return;
    };

    let help_height = if question.help_text.is_some() { 2 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(3),           // progress
        Constraint::Length(4),           // question text
        Constraint::Length(help_height), // help text
        Constraint::Min(6),              // answer widget
        Constraint::Length(1),           // error line
        Constraint::Length(2),           // controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], state.nav.cursor(), state.nav.len());
    render_question_text(frame, chunks[1], &question.text);
    if let Some(help) = &question.help_text {
        render_help(frame, chunks[2], help);
    }
    render_answer_widget(frame, chunks[3], state, question);
    render_error(frame, chunks[4], state);
    render_controls(frame, chunks[5], state, question);
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled(message, Style::default().fg(color))),
        Line::from(""),
        Line::from("Tab admin  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, current: usize, total: usize) {
    let widget = Paragraph::new(format!("Question {} of {}", current + 1, total))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());

    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_help(frame: &mut Frame, area: Rect, help: &str) {
    let widget = Paragraph::new(help)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray).italic());

    frame.render_widget(widget, area);
}

fn render_answer_widget(frame: &mut Frame, area: Rect, state: &SessionState, question: &Question) {
    match question.kind {
        QuestionKind::SingleChoice | QuestionKind::MultiChoice => {
            render_options(frame, area, state, question)
        }
        QuestionKind::Number | QuestionKind::Text => render_input(frame, area, state, question),
    }
}

fn render_options(frame: &mut Frame, area: Rect, state: &SessionState, question: &Question) {
    let answer = state.ledger.get(&question.id);

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let highlighted = index == state.option_cursor;
            let chosen = match answer {
                Some(AnswerValue::Single(id)) => id == &option.id,
                Some(AnswerValue::Multi(ids)) => ids.contains(&option.id),
                _ => false,
            };

            let prefix = if highlighted { "> " } else { "  " };
            let marker = match question.kind {
                QuestionKind::MultiChoice if chosen => "[x] ",
                QuestionKind::MultiChoice => "[ ] ",
                _ if chosen => "(•) ",
                _ => "( ) ",
            };

            let style = if highlighted {
                Style::default().fg(Color::Yellow).bold()
            } else if chosen {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(marker, style),
                Span::styled(option.label.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(answer_block(question.kind));
    frame.render_widget(widget, area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &SessionState, question: &Question) {
    let value = match state.ledger.get(&question.id) {
        Some(AnswerValue::Number(s)) | Some(AnswerValue::Text(s)) => s.as_str(),
        _ => "",
    };

    let line = Line::from(vec![
        Span::styled(value, Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Yellow).bold()),
    ]);

    let widget = Paragraph::new(vec![Line::from(""), line])
        .wrap(Wrap { trim: false })
        .block(answer_block(question.kind));

    frame.render_widget(widget, area);
}

fn answer_block(kind: QuestionKind) -> Block<'static> {
    let title = match kind {
        QuestionKind::SingleChoice => " Pick one ",
        QuestionKind::MultiChoice => " Pick any ",
        QuestionKind::Number => " Amount ",
        QuestionKind::Text => " Your answer ",
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

fn render_error(frame: &mut Frame, area: Rect, state: &SessionState) {
    if let Some(message) = state.quiz_error {
        let widget = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red));
        frame.render_widget(widget, area);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, state: &SessionState, question: &Question) {
    let submit = if state.submitting {
        "Generating…"
    } else if state.nav.is_last() {
        "Enter submit"
    } else {
        "Enter next"
    };

    let select = if question.kind.is_free_input() {
        "type to answer"
    } else {
        "j/k select  ·  Space choose"
    };

    let widget = Paragraph::new(format!(
        "{}  ·  ←/→ back/next  ·  {}  ·  Tab admin  ·  Esc quit",
        select, submit
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
