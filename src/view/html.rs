//! Static HTML rendering of the dashboard for `snapshot`.

use crate::view::format::{escape_html, format_whole};
use crate::view::rows::{AgentDirectory, CustomerRow, PortfolioStats};

fn render_agent_select(row: &CustomerRow, agents: &AgentDirectory) -> String {
    if agents.is_empty() {
        return r#"<span class="muted">No agents</span>"#.to_string();
    }
    let options: String = agents
        .agents()
        .iter()
        .map(|agent| {
            let selected = if row.agent_id.as_deref() == Some(agent.agent_id.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&agent.agent_id),
                selected,
                escape_html(agent.display_name())
            )
        })
        .collect();
    format!(
        r#"<select class="agent-select" data-customer-id="{}">{}</select>"#,
        escape_html(&row.id),
        options
    )
}

fn render_row(row: &CustomerRow, agents: &AgentDirectory) -> String {
    let due = row
        .due_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!(
        r#"      <tr data-customer-id="{id}">
        <td>{name}</td>
        <td>{phone}</td>
        <td class="amount">{debt}</td>
        <td>{due}</td>
        <td class="{overdue_class}">{days}</td>
        <td><span class="badge status-{status_class}">{status}</span></td>
        <td>{risk}</td>
        <td>{activity}</td>
        <td>{agent}</td>
      </tr>
"#,
        id = escape_html(&row.id),
        name = escape_html(&row.name),
        phone = escape_html(&row.phone_display),
        debt = escape_html(&row.debt_display),
        due = escape_html(&due),
        overdue_class = row.overdue.css_class(),
        days = row.days_overdue,
        status_class = escape_html(row.status.as_str()),
        status = escape_html(&row.status_label),
        risk = escape_html(&row.risk_label),
        activity = escape_html(&row.last_activity),
        agent = render_agent_select(row, agents),
    )
}

/// Render a self-contained HTML page with the summary tiles and customer table.
///
/// Every backend-supplied string is escaped before interpolation.
pub fn render_snapshot(
    rows: &[CustomerRow],
    stats: &PortfolioStats,
    agents: &AgentDirectory,
    generated_at: &str,
) -> String {
    let body: String = if rows.is_empty() {
        "      <tr><td colspan=\"9\" class=\"muted\">No customers</td></tr>\n".to_string()
    } else {
        rows.iter().map(|row| render_row(row, agents)).collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>Collections Dashboard</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; color: #1e293b; }}
    .tiles {{ display: flex; gap: 1rem; margin-bottom: 1.5rem; }}
    .tile {{ border: 1px solid #cbd5e1; border-radius: 0.5rem; padding: 1rem 1.5rem; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border-bottom: 1px solid #e2e8f0; padding: 0.5rem; text-align: left; }}
    .amount {{ text-align: right; }}
    .overdue-low {{ color: #15803d; }}
    .overdue-med {{ color: #b45309; }}
    .overdue-high {{ color: #b91c1c; font-weight: bold; }}
    .badge {{ border-radius: 9999px; padding: 0.1rem 0.6rem; background: #e2e8f0; }}
    .status-promised_to_pay {{ background: #dcfce7; }}
    .status-refused, .status-wrong_number {{ background: #fee2e2; }}
    .muted {{ color: #64748b; }}
  </style>
</head>
<body>
  <h1>Collections Dashboard</h1>
  <p class="muted">Generated {generated}</p>
  <div class="tiles">
    <div class="tile"><div class="muted">Total Debt</div><strong>${total}</strong></div>
    <div class="tile"><div class="muted">Recovered</div><strong>${recovered}</strong></div>
    <div class="tile"><div class="muted">Customers</div><strong>{count}</strong></div>
  </div>
  <table>
    <thead>
      <tr><th>Name</th><th>Phone</th><th>Debt</th><th>Due</th><th>Days Overdue</th><th>Status</th><th>Risk</th><th>Last Activity</th><th>Agent</th></tr>
    </thead>
    <tbody>
{body}    </tbody>
  </table>
</body>
</html>
"#,
        generated = escape_html(generated_at),
        total = format_whole(stats.total_debt),
        recovered = format_whole(stats.recovered),
        count = stats.customer_count,
        body = body,
    )
}
