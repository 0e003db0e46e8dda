//! Result screen: renders the recommendation bundle verbatim.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::models::Recommendation;
use crate::session::SessionState;

use super::money;

pub fn render(frame: &mut Frame, area: Rect, state: &SessionState) {
    let Some(recommendation) = &state.recommendation else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // title
        Constraint::Min(8),    // bundle
        Constraint::Length(2), // controls
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    render_bundle(frame, chunks[1], state, recommendation);
    render_controls(frame, chunks[2], state);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("Your personalized bundle")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());

    frame.render_widget(widget, area);
}

fn render_bundle(frame: &mut Frame, area: Rect, state: &SessionState, rec: &Recommendation) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(summary) = &rec.bundle_summary {
        lines.push(Line::from(summary.clone().fg(Color::Gray)));
        lines.push(Line::from(""));
    }

    if let Some(pricing) = &rec.pricing {
        let mut spans = vec![
            Span::styled("Total: ", Style::default().fg(Color::White)),
            Span::styled(
                money(pricing.bundle_price),
                Style::default().fg(Color::Green).bold(),
            ),
        ];
        if let Some(sub) = pricing.bundle_price_subscription {
            spans.push(Span::styled(
                format!("  ·  Subscribe & save: ${:.2}", sub),
                Style::default().fg(Color::Gray),
            ));
            if let Some(pct) = pricing.subscription_savings_pct
                && pct > 0
            {
                spans.push(Span::styled(
                    format!(" ({pct}% off)"),
                    Style::default().fg(Color::Green),
                ));
            }
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if let Some(explanation) = &rec.llm_explanation {
        lines.push(Line::from(explanation.clone().fg(Color::Cyan)));
        lines.push(Line::from(""));
    }

    if !rec.safety_notes.is_empty() {
        lines.push(Line::from(Span::styled(
            "Safety notes",
            Style::default().fg(Color::Red).bold(),
        )));
        for note in &rec.safety_notes {
            lines.push(Line::from(format!("  ! {}", note).fg(Color::Red)));
        }
        lines.push(Line::from(
            "  Informational only; review with your doctor.".fg(Color::DarkGray),
        ));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Core products",
        Style::default().fg(Color::White).bold(),
    )));
    if rec.product_details.is_empty() {
        for name in &rec.products {
            lines.push(Line::from(format!("  - {}", name).fg(Color::White)));
        }
    } else {
        for detail in &rec.product_details {
            let mut spans = vec![
                Span::styled(format!("  {} ", detail.name), Style::default().fg(Color::White).bold()),
                Span::styled(
                    format!("[fit {}/100]", detail.score),
                    Style::default().fg(Color::Yellow),
                ),
            ];
            if let Some(price) = detail.price_usd {
                let per_day = detail
                    .price_per_day
                    .map(|p| format!(" · ~${:.2}/day", p))
                    .unwrap_or_default();
                spans.push(Span::styled(
                    format!("  ${:.2}/month{}", price, per_day),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
            for reason in detail.reasons.iter().take(2) {
                lines.push(Line::from(format!("    · {}", reason).fg(Color::Gray)));
            }
        }
    }

    if !rec.upsell.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Optional add-ons",
            Style::default().fg(Color::White).bold(),
        )));
        for name in &rec.upsell {
            lines.push(Line::from(format!("  + {}", name).fg(Color::Gray)));
        }
    }

    if !rec.explanation.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Why we chose these",
            Style::default().fg(Color::White).bold(),
        )));
        for bullet in &rec.explanation {
            lines.push(Line::from(format!("  - {}", bullet).fg(Color::Gray)));
        }
    }

    append_email_section(&mut lines, state);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn append_email_section(lines: &mut Vec<Line>, state: &SessionState) {
    if !state.capabilities.email_assistant {
        return;
    }

    lines.push(Line::from(""));
    if state.email_pending {
        lines.push(Line::from("Generating welcome email…".fg(Color::Yellow)));
        return;
    }
    if let Some(message) = state.email_error {
        lines.push(Line::from(message.fg(Color::Red)));
        return;
    }
    let Some(email) = &state.email else {
        return;
    };

    lines.push(Line::from(Span::styled(
        "Welcome email",
        Style::default().fg(Color::White).bold(),
    )));
    lines.push(Line::from(vec![
        Span::styled("  Subject: ", Style::default().fg(Color::DarkGray)),
        Span::styled(email.subject.clone(), Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Preview: ", Style::default().fg(Color::DarkGray)),
        Span::styled(email.preview_line.clone(), Style::default().fg(Color::Gray)),
    ]));
    for body_line in email.body_text.lines() {
        lines.push(Line::from(format!("  {}", body_line).fg(Color::Gray)));
    }
}

fn render_controls(frame: &mut Frame, area: Rect, state: &SessionState) {
    let email = if state.capabilities.email_assistant {
        "e email  ·  "
    } else {
        ""
    };

    let widget = Paragraph::new(format!(
        "r adjust answers  ·  h home  ·  {}j/k scroll  ·  Tab admin  ·  q quit",
        email
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
