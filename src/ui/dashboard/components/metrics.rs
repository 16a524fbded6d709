//! Dashboard summary tiles
//!
//! Renders the portfolio totals above the customer table

use super::super::state::DashboardState;
use crate::view::format::format_whole;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn render_tile(f: &mut Frame, area: ratatui::layout::Rect, title: &str, value: String, color: Color) {
    let tile = Paragraph::new(vec![Line::from(value)])
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(tile, area);
}

/// Render the four summary tiles in a row.
pub fn render_metrics_section(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let stats = &state.stats;
    render_tile(
        f,
        tiles[0],
        "Total Debt",
        format!("${}", format_whole(stats.total_debt)),
        Color::LightRed,
    );
    render_tile(
        f,
        tiles[1],
        "Recovered",
        format!("${}", format_whole(stats.recovered)),
        Color::LightGreen,
    );
    render_tile(
        f,
        tiles[2],
        "Customers",
        stats.customer_count.to_string(),
        Color::Cyan,
    );
    let calls_color = if state.calls_in_flight > 0 {
        Color::LightYellow
    } else {
        Color::Gray
    };
    render_tile(
        f,
        tiles[3],
        "Active Calls",
        state.calls_in_flight.to_string(),
        calls_color,
    );
}
