//! Screen rendering. `mode` is checked first: admin dominates whatever
//! customer view is active underneath.

mod admin;
mod home;
mod quiz;
mod result;

use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::session::{Mode, SessionState, View};

pub fn render(frame: &mut Frame, state: &SessionState) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    if state.mode == Mode::Admin {
        admin::render(frame, area, state);
        return;
    }

    match state.view {
        View::Home => home::render(frame, area),
        View::Quiz => quiz::render(frame, area, state),
        View::Result => result::render(frame, area, state),
    }
}

/// Shorten a cell to `max` characters with an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Render an optional dollar amount, `—` when absent.
pub(crate) fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "—".to_string(),
    }
}
