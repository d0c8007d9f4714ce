//! Server-side HTML for the browser routes.
//!
//! Pages are built with `format!`; every piece of user text goes through
//! [`escape_html`] first.

use chrono::DateTime;
use tasklist_core::{Task, TaskOutcome, TaskStats, MAX_TASK_CHARS};

const PRIORITY_CHOICES: &[&str] = &["low", "medium", "high"];

const STYLE: &str = "body{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem}\
.notice{padding:.5rem 1rem;border-radius:4px}\
.notice.success{background:#e6f4ea}.notice.error{background:#fce8e6}\
li.done .text{text-decoration:line-through;color:#777}\
.priority{font-size:.8rem;padding:0 .4rem;border:1px solid #ccc;border-radius:3px}";

/// Escapes text for element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Formats epoch milliseconds as `YYYY-MM-DD HH:MM` (UTC).
pub fn format_created_at(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

pub fn index_page(tasks: &[Task], notice: Option<&TaskOutcome>) -> String {
    let mut items = String::new();
    for task in tasks {
        items.push_str(&format!(
            "<li class=\"{class}\">\
<span class=\"text\">{text}</span> \
<span class=\"priority\">{priority}</span> \
<small>{created}</small> \
<a href=\"/toggle/{id}\">{toggle_label}</a> \
<a href=\"/edit/{id}\">Edit</a> \
<a href=\"/delete/{id}\">Delete</a></li>",
            class = if task.completed { "done" } else { "open" },
            text = escape_html(&task.task),
            priority = escape_html(&task.priority),
            created = format_created_at(task.created_at),
            id = task.id,
            toggle_label = if task.completed { "Reopen" } else { "Complete" },
        ));
    }
    if items.is_empty() {
        items.push_str("<li class=\"empty\">No tasks yet.</li>");
    }

    let body = format!(
        "<h1>Tasks</h1>{notice}\
<form method=\"post\" action=\"/add\">\
<input type=\"text\" name=\"task\" maxlength=\"{max}\" placeholder=\"What needs doing?\" required> \
{select} <button type=\"submit\">Add</button></form>\
<ul class=\"tasks\">{items}</ul>\
<p><a href=\"/stats\">Stats</a></p>",
        notice = notice_html(notice),
        max = MAX_TASK_CHARS,
        select = priority_select(None),
    );
    layout("Tasks", &body)
}

/// Edit form for `task`, prefilled with `entered` values when given.
pub fn edit_page(
    task: &Task,
    entered: Option<(&str, Option<&str>)>,
    notice: Option<&TaskOutcome>,
) -> String {
    let (text, priority) = match entered {
        Some((text, priority)) => (text, priority.unwrap_or(task.priority.as_str())),
        None => (task.task.as_str(), task.priority.as_str()),
    };

    let body = format!(
        "<h1>Edit task #{id}</h1>{notice}\
<p>Current: <span class=\"text\">{current}</span></p>\
<form method=\"post\" action=\"/edit/{id}\">\
<input type=\"text\" name=\"task\" maxlength=\"{max}\" value=\"{text}\"> \
{select} <button type=\"submit\">Save</button></form>\
<p><a href=\"/\">Back</a></p>",
        id = task.id,
        notice = notice_html(notice),
        current = escape_html(&task.task),
        max = MAX_TASK_CHARS,
        text = escape_html(text),
        select = priority_select(Some(priority)),
    );
    layout("Edit task", &body)
}

pub fn stats_page(stats: &TaskStats) -> String {
    let mut rows = String::new();
    for (priority, count) in &stats.priority_breakdown {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{count}</td></tr>",
            escape_html(priority)
        ));
    }

    let body = format!(
        "<h1>Stats</h1>\
<ul><li>Total: {total}</li><li>Completed: {completed}</li><li>Pending: {pending}</li></ul>\
<h2>By priority</h2>\
<table><thead><tr><th>Priority</th><th>Count</th></tr></thead><tbody>{rows}</tbody></table>\
<p><a href=\"/\">Back</a></p>",
        total = stats.total,
        completed = stats.completed,
        pending = stats.pending,
    );
    layout("Stats", &body)
}

fn notice_html(notice: Option<&TaskOutcome>) -> String {
    notice
        .map(|outcome| {
            format!(
                "<p class=\"notice {}\">{}</p>",
                outcome.kind.as_str(),
                escape_html(&outcome.message)
            )
        })
        .unwrap_or_default()
}

/// Priority dropdown; a stored value outside the usual choices stays selectable.
fn priority_select(selected: Option<&str>) -> String {
    let selected = selected.unwrap_or("medium");
    let mut options = String::new();
    if !PRIORITY_CHOICES.contains(&selected) {
        options.push_str(&format!(
            "<option value=\"{value}\" selected>{value}</option>",
            value = escape_html(selected)
        ));
    }
    for choice in PRIORITY_CHOICES {
        let marker = if *choice == selected { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{choice}\"{marker}>{choice}</option>"
        ));
    }
    format!("<select name=\"priority\">{options}</select>")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
<title>{title}</title><style>{STYLE}</style></head><body>{body}</body></html>"
    )
}
