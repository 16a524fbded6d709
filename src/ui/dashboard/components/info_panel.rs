//! Dashboard info panel component
//!
//! Renders backend and session information

use crate::environment::Environment;

use super::super::state::DashboardState;
use super::super::utils::sanitize_terminal;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn format_uptime(secs: u64) -> String {
    if secs >= 86400 {
        format!("{}d {}h {}m", secs / 86400, (secs % 86400) / 3600, (secs % 3600) / 60)
    } else if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Render info panel.
pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    let env_color = match state.environment {
        Environment::Local => Color::Green,
        Environment::Custom { .. } => Color::Yellow,
    };
    info_lines.push(Line::from(vec![Span::styled(
        format!("Backend: {}", state.environment.api_url()),
        Style::default().fg(env_color),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Version: {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::Cyan),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Uptime: {}", format_uptime(state.start_time.elapsed().as_secs())),
        Style::default().fg(Color::LightGreen),
    )]));

    let agents_text = if state.agents.is_empty() {
        "Agents: none loaded".to_string()
    } else {
        format!("Agents: {}", state.agents.agents().len())
    };
    info_lines.push(Line::from(vec![Span::styled(
        agents_text,
        Style::default().fg(Color::LightYellow),
    )]));

    if let Some(row) = state.selected_row() {
        info_lines.push(Line::from(""));
        info_lines.push(Line::from(vec![Span::styled(
            sanitize_terminal(&row.name),
            Style::default().fg(Color::White),
        )]));
        info_lines.push(Line::from(vec![
            Span::styled("Risk: ", Style::default().fg(Color::Gray)),
            Span::raw(sanitize_terminal(&row.risk_label)),
        ]));
        let due = row
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        info_lines.push(Line::from(vec![
            Span::styled("Due: ", Style::default().fg(Color::Gray)),
            Span::raw(due),
        ]));
        info_lines.push(Line::from(vec![
            Span::styled("Agent: ", Style::default().fg(Color::Gray)),
            Span::raw(
                row.agent_name
                    .as_deref()
                    .map(sanitize_terminal)
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]));
    }

    let info_block = Block::default()
        .title("SESSION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(75), "1m 15s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }
}
