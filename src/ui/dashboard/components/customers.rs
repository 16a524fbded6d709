//! Customer table component

use super::super::state::DashboardState;
use super::super::utils::{overdue_color, sanitize_terminal};
use crate::models::CustomerStatus;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

fn status_color(status: &CustomerStatus) -> Color {
    match status {
        CustomerStatus::PromisedToPay => Color::Green,
        CustomerStatus::Refused | CustomerStatus::WrongNumber => Color::Red,
        CustomerStatus::CallbackRequested => Color::Yellow,
        CustomerStatus::Voicemail => Color::LightBlue,
        CustomerStatus::Active => Color::White,
        CustomerStatus::Other(_) => Color::Gray,
    }
}

/// Render the customer table with the selected row highlighted.
pub fn render_customers_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!("CUSTOMERS ({})", state.rows.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if state.rows.is_empty() {
        let text = if state.last_refresh.is_some() {
            "No customers"
        } else {
            "Loading customers..."
        };
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        "Name", "Phone", "Debt", "Overdue", "Status", "Last Activity", "Agent",
    ])
    .style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.rows.iter().map(|row| {
        let agent = row
            .agent_name
            .as_deref()
            .map(|name| format!("‹ {} ›", sanitize_terminal(name)))
            .unwrap_or_else(|| "No agents".to_string());
        Row::new(vec![
            Cell::from(sanitize_terminal(&row.name)),
            Cell::from(sanitize_terminal(&row.phone_display)),
            Cell::from(row.debt_display.clone()),
            Cell::from(Span::styled(
                format!("{}d", row.days_overdue),
                Style::default().fg(overdue_color(row.overdue)),
            )),
            Cell::from(Span::styled(
                sanitize_terminal(&row.status_label),
                Style::default().fg(status_color(&row.status)),
            )),
            Cell::from(row.last_activity.clone()),
            Cell::from(agent),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Fill(2),
            Constraint::Length(15),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(state.selected_index());
    f.render_stateful_widget(table, area, &mut table_state);
}
