//! Dashboard footer component
//!
//! Renders key hints, or the latest notice when there is one

use super::super::state::{DashboardState, Overlay};
use super::super::utils::sanitize_terminal;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn key_hints(overlay: &Overlay) -> &'static str {
    match overlay {
        Overlay::None => {
            "[↑↓] Select | [←→] Agent | [C] Call | [N] New | [E] Edit | [D] Delete | [R] Refresh | [Q] Quit"
        }
        Overlay::Form(_) => "[Tab] Next field | [←→] Change choice | [Enter] Save | [Esc] Cancel",
        Overlay::ConfirmDelete(_) => "[Y] Delete | [N] Keep",
        Overlay::Call(_) => "[Enter] Close",
    }
}

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let (footer_text, footer_color) = match &state.notice {
        Some(notice) if matches!(state.overlay, Overlay::None) => {
            (sanitize_terminal(notice), Color::LightYellow)
        }
        _ => (key_hints(&state.overlay).to_string(), Color::Cyan),
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
