use crate::models::{BehaviorRecord, BehaviorStats};
use std::collections::BTreeMap;

pub fn render_dashboard(stats: &BehaviorStats, recent: &[BehaviorRecord]) -> String {
    let top_actions: Vec<(&str, u64)> = stats
        .top_actions
        .iter()
        .map(|entry| (entry.action.as_str(), entry.count))
        .collect();
    let top_pages: Vec<(&str, u64)> = stats
        .top_pages
        .iter()
        .map(|entry| (entry.page.as_str(), entry.count))
        .collect();

    let body = DASHBOARD_HTML
        .replace("{{TOTAL}}", &stats.total_actions.to_string())
        .replace("{{USERS}}", &stats.unique_users.to_string())
        .replace("{{TOP_ACTIONS}}", &render_bars(&top_actions))
        .replace("{{TOP_PAGES}}", &render_bars(&top_pages))
        .replace("{{RECENT}}", &render_rows(recent));
    render_page("Dashboard", "dashboard", &body)
}

pub fn render_tracker(behaviors: &[BehaviorRecord]) -> String {
    let body = TRACKER_HTML
        .replace("{{COUNT}}", &behaviors.len().to_string())
        .replace("{{ROWS}}", &render_rows(behaviors));
    render_page("Event Tracker", "tracker", &body)
}

pub fn render_analytics(stats: &BehaviorStats) -> String {
    let days: Vec<(&str, u64)> = stats
        .actions_over_time
        .iter()
        .map(|point| (point.date.as_str(), point.count))
        .collect();

    let body = ANALYTICS_HTML
        .replace("{{DEVICES}}", &render_bars(&breakdown_entries(&stats.device_breakdown)))
        .replace("{{BROWSERS}}", &render_bars(&breakdown_entries(&stats.browser_breakdown)))
        .replace("{{DAYS}}", &render_bars(&days));
    render_page("Analytics", "analytics", &body)
}

fn render_page(title: &str, active: &str, body: &str) -> String {
    let nav = [("dashboard", "Dashboard"), ("tracker", "Tracker"), ("analytics", "Analytics")]
        .iter()
        .map(|(slug, label)| {
            let class = if *slug == active { "tab active" } else { "tab" };
            format!(r#"<a class="{class}" href="/{slug}">{label}</a>"#)
        })
        .collect::<Vec<_>>()
        .join("");

    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{NAV}}", &nav)
        .replace("{{BODY}}", body)
}

fn breakdown_entries(counts: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
    counts.iter().map(|(key, count)| (key.as_str(), *count)).collect()
}

fn render_bars(entries: &[(&str, u64)]) -> String {
    if entries.is_empty() {
        return r#"<p class="hint">No data yet.</p>"#.to_string();
    }
    let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);
    entries
        .iter()
        .map(|(label, count)| {
            let width = count * 100 / max;
            format!(
                r#"<div class="bar"><span class="bar-label">{}</span><span class="bar-track"><span class="bar-fill" style="width: {width}%"></span></span><span class="bar-value">{count}</span></div>"#,
                escape_html(label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_rows(behaviors: &[BehaviorRecord]) -> String {
    behaviors
        .iter()
        .map(|b| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}s</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                b.id,
                escape_html(&b.user_id),
                escape_html(&b.action),
                escape_html(&b.page),
                b.duration,
                escape_html(&b.device),
                escape_html(&b.browser),
                b.timestamp.format("%Y-%m-%d %H:%M"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · Behavior Analytics</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f8;
      --bg-2: #c9dcf0;
      --ink: #23272e;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4edf6 60%, #f4f7fa 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b645d;
      text-decoration: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .bar {
      display: grid;
      grid-template-columns: 110px 1fr 48px;
      align-items: center;
      gap: 10px;
      margin: 6px 0;
    }

    .bar-track {
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      height: 10px;
      overflow: hidden;
    }

    .bar-fill {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .bar-value {
      text-align: right;
      font-weight: 600;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    th, td {
      text-align: left;
      padding: 8px 6px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    form.add {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 10px;
    }

    input, button {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button {
      border: none;
      font-weight: 600;
      color: white;
      background: var(--accent);
      cursor: pointer;
    }

    button.secondary {
      background: var(--accent-2);
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>{{TITLE}}</h1>
      <nav class="tabs">{{NAV}}</nav>
    </header>
{{BODY}}
  </main>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r#"    <section class="panel">
      <div class="card stat">
        <span class="label">Total actions</span>
        <span id="total" class="value">{{TOTAL}}</span>
      </div>
      <div class="card stat">
        <span class="label">Unique users</span>
        <span id="users" class="value">{{USERS}}</span>
      </div>
    </section>

    <section class="panel">
      <div class="card">
        <h2>Top actions</h2>
        {{TOP_ACTIONS}}
      </div>
      <div class="card">
        <h2>Top pages</h2>
        {{TOP_PAGES}}
      </div>
    </section>

    <section class="card">
      <h2>Recent activity</h2>
      <table>
        <thead><tr><th>#</th><th>User</th><th>Action</th><th>Page</th><th>Duration</th><th>Device</th><th>Browser</th><th>Time (UTC)</th></tr></thead>
        <tbody>
{{RECENT}}
        </tbody>
      </table>
    </section>
"#;

const TRACKER_HTML: &str = r#"    <section class="card">
      <h2>Record an event</h2>
      <form class="add" method="post" action="/tracker/add">
        <input name="userId" placeholder="user_1" required />
        <input name="action" placeholder="click" required />
        <input name="page" placeholder="Home" required />
        <input name="duration" type="number" min="0" value="30" required />
        <input name="device" placeholder="desktop" />
        <input name="browser" placeholder="Chrome" />
        <button type="submit">Add event</button>
      </form>
    </section>

    <section class="card">
      <h2>All events ({{COUNT}})</h2>
      <form method="post" action="/tracker/reset">
        <button class="secondary" type="submit">Reset to sample data</button>
      </form>
      <table>
        <thead><tr><th>#</th><th>User</th><th>Action</th><th>Page</th><th>Duration</th><th>Device</th><th>Browser</th><th>Time (UTC)</th></tr></thead>
        <tbody>
{{ROWS}}
        </tbody>
      </table>
    </section>
"#;

const ANALYTICS_HTML: &str = r#"    <section class="panel">
      <div class="card">
        <h2>Devices</h2>
        {{DEVICES}}
      </div>
      <div class="card">
        <h2>Browsers</h2>
        {{BROWSERS}}
      </div>
    </section>

    <section class="card">
      <h2>Actions over the last 7 days</h2>
      {{DAYS}}
    </section>
"#;
