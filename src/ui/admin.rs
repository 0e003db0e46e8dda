//! Operator analytics dashboard.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::models::{LogEntry, SegmentsSummary};
use crate::session::SessionState;

use super::{money, truncate};

pub fn render(frame: &mut Frame, area: Rect, state: &SessionState) {
    let chunks = Layout::vertical([
        Constraint::Length(3),  // header line
        Constraint::Length(10), // overview cards
        Constraint::Min(6),     // recent table
        Constraint::Length(2),  // controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], state);
    render_overview(frame, chunks[1], state);
    render_recent(frame, chunks[2], state);
    render_controls(frame, chunks[3], state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &SessionState) {
    let admin = &state.admin;

    let status = if admin.loading {
        Span::styled("Loading analytics…", Style::default().fg(Color::Yellow))
    } else if let Some(message) = admin.error {
        Span::styled(message, Style::default().fg(Color::Red))
    } else if let Some(message) = &admin.status {
        Span::styled(message.clone(), Style::default().fg(Color::Green))
    } else {
        Span::styled("", Style::default())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("ADMIN DASHBOARD", Style::default().fg(Color::Cyan).bold()),
            Span::styled(
                format!("   Profile filter: {}", admin.filter.label()),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(status),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_overview(frame: &mut Frame, area: Rect, state: &SessionState) {
    let Some(snapshot) = &state.admin.snapshot else {
        let widget = Paragraph::new("No analytics loaded yet.")
            .style(Style::default().fg(Color::DarkGray).italic())
            .block(card(" Overview "));
        frame.render_widget(widget, area);
        return;
    };
    let segments = &snapshot.segments;

    let mut constraints = vec![
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ];
    if state.capabilities.risk_label {
        constraints = vec![Constraint::Ratio(1, 4); 4];
    }
    let columns = Layout::horizontal(constraints).split(area);

    render_totals_card(frame, columns[0], segments);
    render_profiles_card(frame, columns[1], segments);
    render_products_card(frame, columns[2], segments);
    if state.capabilities.risk_label {
        render_risk_card(frame, columns[3], segments);
    }
}

fn render_totals_card(frame: &mut Frame, area: Rect, segments: &SegmentsSummary) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Recommendations: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                segments.total_recommendations.to_string(),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Avg bundle: ", Style::default().fg(Color::DarkGray)),
            Span::styled(money(segments.avg_bundle_price), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Avg subscription: ", Style::default().fg(Color::DarkGray)),
            Span::styled(money(segments.avg_sub_price), Style::default().fg(Color::Green)),
        ]),
    ];
    if let Some(pct) = segments.avg_discount_pct {
        lines.push(Line::from(
            format!("Avg discount: {pct}% off").fg(Color::DarkGray),
        ));
    }
    if let Some(avg) = segments.avg_products_per_bundle {
        lines.push(Line::from(
            format!("Avg products/bundle: {avg:.1}").fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).block(card(" Totals ")), area);
}

fn render_profiles_card(frame: &mut Frame, area: Rect, segments: &SegmentsSummary) {
    let lines: Vec<Line> = if segments.by_profile_type.is_empty() {
        vec![Line::from("No data".fg(Color::DarkGray))]
    } else {
        segments
            .by_profile_type
            .iter()
            .map(|(profile, count)| {
                Line::from(vec![
                    Span::styled(format!("{:<14}", profile), Style::default().fg(Color::White)),
                    Span::styled(count.to_string(), Style::default().fg(Color::Cyan)),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(card(" Profile types ")), area);
}

fn render_products_card(frame: &mut Frame, area: Rect, segments: &SegmentsSummary) {
    let lines: Vec<Line> = segments
        .top_products(5)
        .into_iter()
        .map(|(name, count)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<20}", truncate(name, 20)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(count.to_string(), Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();
    let lines = if lines.is_empty() {
        vec![Line::from("No data".fg(Color::DarkGray))]
    } else {
        lines
    };

    frame.render_widget(Paragraph::new(lines).block(card(" Top products ")), area);
}

fn render_risk_card(frame: &mut Frame, area: Rect, segments: &SegmentsSummary) {
    let mut lines: Vec<Line> = segments
        .by_risk_label
        .iter()
        .map(|(label, count)| {
            let color = match label.as_str() {
                "high" => Color::Red,
                "medium" => Color::Yellow,
                _ => Color::Green,
            };
            Line::from(vec![
                Span::styled(format!("{:<8}", label), Style::default().fg(color)),
                Span::styled(count.to_string(), Style::default().fg(Color::White)),
            ])
        })
        .collect();
    if let Some(share) = segments.high_risk_share {
        lines.push(Line::from(
            format!("high-risk share: {share:.1}%").fg(Color::DarkGray),
        ));
    }
    if lines.is_empty() {
        lines.push(Line::from("No data".fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(lines).block(card(" Churn risk ")), area);
}

fn render_recent(frame: &mut Frame, area: Rect, state: &SessionState) {
    let rows = state.admin.filtered_recent();

    let mut lines: Vec<Line> = vec![header_row(state.capabilities.risk_label)];
    let visible = (area.height as usize).saturating_sub(3);
    for entry in rows.iter().take(visible) {
        lines.push(entry_row(entry, state.capabilities.risk_label));
    }

    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No recommendations logged yet for this filter.",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).block(card(" Recent recommendations "));
    frame.render_widget(widget, area);
}

fn header_row(with_risk: bool) -> Line<'static> {
    let mut text = format!(
        "{:<20}{:<13}{:<9}{:<22}{:<28}{:>9}{:>9}",
        "Time (UTC)", "Profile", "Age", "Goals", "Products", "Bundle", "Sub"
    );
    if with_risk {
        text.push_str("  Risk");
    }
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
}

fn entry_row(entry: &LogEntry, with_risk: bool) -> Line<'static> {
    let mut text = format!(
        "{:<20}{:<13}{:<9}{:<22}{:<28}{:>9}{:>9}",
        truncate(&entry.timestamp, 19),
        truncate(entry.profile_type.as_deref().unwrap_or("—"), 12),
        truncate(entry.age_group.as_deref().unwrap_or("—"), 8),
        truncate(&entry.goals.join(", "), 21),
        truncate(&entry.products.join(", "), 27),
        money(entry.bundle_price),
        money(entry.bundle_price_subscription),
    );

    let mut color = Color::White;
    if with_risk {
        let label = entry.risk_label.as_deref().unwrap_or("—");
        text.push_str(&format!("  {}", label));
        color = match label {
            "high" => Color::Red,
            "medium" => Color::Yellow,
            _ => Color::White,
        };
    }

    Line::from(Span::styled(text, Style::default().fg(color)))
}

fn card(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

fn render_controls(frame: &mut Frame, area: Rect, state: &SessionState) {
    let export = if state.capabilities.export {
        "x export CSV  ·  "
    } else {
        ""
    };

    let widget = Paragraph::new(format!(
        "r refresh  ·  f filter  ·  {}Tab back to site  ·  q quit",
        export
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
