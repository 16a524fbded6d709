//! Modal overlays: customer form, delete confirmation and call panel

use super::super::state::{CallPanel, CallStatus, DashboardState, Overlay};
use super::super::utils::sanitize_terminal;
use crate::forms::{CustomerForm, FormField, PendingDelete};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

/// A `width` x `height` rectangle centered in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

fn modal_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .padding(Padding::uniform(1))
}

pub fn render_overlay(f: &mut Frame, state: &DashboardState) {
    match &state.overlay {
        Overlay::None => {}
        Overlay::Form(form) => render_form(f, form),
        Overlay::ConfirmDelete(pending) => render_confirm_delete(f, pending),
        Overlay::Call(panel) => render_call_panel(f, panel),
    }
}

fn render_form(f: &mut Frame, form: &CustomerForm) {
    let area = centered(f.area(), 60, 14);
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let focused = field == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value = sanitize_terminal(form.value(field));
        let value = if field.is_choice() {
            format!("‹ {} ›", value)
        } else if focused {
            format!("{}▏", value)
        } else {
            value
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            sanitize_terminal(error),
            Style::default().fg(Color::LightRed),
        )));
    } else if form.is_submitting() {
        lines.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(Color::LightYellow),
        )));
    }

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(modal_block(form.title(), Color::Cyan)),
        area,
    );
}

fn render_confirm_delete(f: &mut Frame, pending: &PendingDelete) {
    let area = centered(f.area(), 50, 7);
    let prompt = if pending.submission.is_some() {
        Span::styled("Deleting...", Style::default().fg(Color::LightYellow))
    } else {
        Span::styled(
            "This cannot be undone. [Y] Delete  [N] Keep",
            Style::default().fg(Color::Gray),
        )
    };
    let text = vec![
        Line::from(format!(
            "Delete {}?",
            sanitize_terminal(&pending.customer_name)
        )),
        Line::from(prompt),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(modal_block("Confirm Delete", Color::LightRed)),
        area,
    );
}

fn render_call_panel(f: &mut Frame, panel: &CallPanel) {
    let area = centered(f.area(), 56, 9);
    let agent = panel
        .agent_name
        .as_deref()
        .map(sanitize_terminal)
        .unwrap_or_else(|| "default agent".to_string());
    let mut lines = vec![Line::from(format!(
        "{} via {}",
        sanitize_terminal(&panel.customer_name),
        agent
    ))];

    let color = match &panel.status {
        CallStatus::InProgress => {
            lines.push(Line::from(Span::styled(
                "Initiating call...",
                Style::default().fg(Color::LightYellow),
            )));
            Color::LightYellow
        }
        CallStatus::Connected {
            message,
            conversation_id,
        } => {
            lines.push(Line::from(Span::styled(
                sanitize_terminal(message),
                Style::default().fg(Color::LightGreen),
            )));
            if let Some(id) = conversation_id {
                lines.push(Line::from(Span::styled(
                    format!("Conversation: {}", sanitize_terminal(id)),
                    Style::default().fg(Color::Gray),
                )));
            }
            Color::LightGreen
        }
        CallStatus::Failed { message } => {
            lines.push(Line::from(Span::styled(
                sanitize_terminal(message),
                Style::default().fg(Color::LightRed),
            )));
            Color::LightRed
        }
    };

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(modal_block("Call", color)),
        area,
    );
}
