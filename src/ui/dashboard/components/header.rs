//! Dashboard header component
//!
//! Renders the title and the poll countdown gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("COLLECTIONS DASHBOARD v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let period = state.poll_interval.as_secs().max(1);
    let remaining = state.seconds_until_poll();
    let (progress_text, gauge_color, progress_percent) = match state.last_refresh {
        None if state.last_refresh_failed => (
            "OFFLINE - Backend not reachable, retrying".to_string(),
            Color::LightRed,
            100,
        ),
        None => {
            // Animated while the first load is in flight
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            ("LOADING - Fetching customers".to_string(), Color::LightBlue, progress)
        }
        Some(_) => {
            let elapsed = period.saturating_sub(remaining);
            let progress = ((elapsed as f64 / period as f64) * 100.0) as u16;
            if state.last_refresh_failed {
                (
                    format!("STALE - Last refresh failed, retry in {}s", remaining),
                    Color::LightYellow,
                    progress.min(100),
                )
            } else {
                (
                    format!("LIVE - Next refresh in {}s", remaining),
                    Color::LightGreen,
                    progress.min(100),
                )
            }
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
