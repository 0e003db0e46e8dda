//! Landing screen for customer mode.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "NUTRIGUIDE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Daily nutrition, simplified".fg(Color::DarkGray)),
        Line::from(""),
        Line::from("A 2-minute quiz builds a supplement bundle".fg(Color::Gray)),
        Line::from("matched to your profile, goals, and lifestyle.".fg(Color::Gray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("ENTER", Style::default().fg(Color::Green).bold()),
            Span::styled(" start the quiz", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from("Tab admin  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
