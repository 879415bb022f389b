//! HTML rendering for the dashboard page.
//!
//! Three panes, mirroring what the page shows after a load: the health
//! envelope, the task list, and the security checks with their raw inputs.

use std::fmt::Write;

use serde::Serialize;

use crate::api::Envelope;
use crate::posture::{PostureReport, SecurityInfo};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;max-width:60rem}\
nav a{margin-right:1rem}\
section{margin-top:2rem}\
pre{background:#f4f4f4;padding:1rem;overflow:auto}\
li{padding:.25rem .5rem;margin:.25rem 0;list-style:none}\
li.ok{background:#e3f7e3}\
li.bad{background:#fbe3e3}\
li span{float:right;font-weight:bold}";

/// Escape text for safe inclusion in HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Pretty JSON, escaped for a `<pre>` block.
pub fn pretty_json<T: Serialize>(value: &T) -> String {
    escape_html(&serde_json::to_string_pretty(value).unwrap_or_default())
}

/// The `<ul>` of check results.
pub fn checks_list(report: &PostureReport) -> String {
    let mut html = String::from("<ul id=\"checks\">\n");
    for check in &report.checks {
        let _ = writeln!(
            html,
            "<li id=\"{id}\" class=\"{class}\">{label} <span>{badge}</span></li>",
            id = check.id.as_str(),
            class = check.css_class(),
            label = escape_html(check.id.label()),
            badge = escape_html(&check.badge()),
        );
    }
    html.push_str("</ul>\n");
    html
}

/// Render the full dashboard page.
pub fn dashboard_page(
    api_base: &str,
    health: &Envelope,
    tasks: &Envelope,
    report: &PostureReport,
) -> String {
    let info = SecurityInfo::from_payload(&report.raw.info.data);
    let mut facts = String::new();
    if let Some(hostname) = &info.hostname {
        let _ = writeln!(facts, "<p>Host: <code>{}</code></p>", escape_html(hostname));
    }
    if let Some(cap_eff) = info.effective_caps() {
        let _ = writeln!(facts, "<p>CapEff: <code>{}</code></p>", escape_html(cap_eff));
    }

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>Posture Dashboard</title><style>{STYLE}</style></head>\n\
         <body>\n\
         <h1>Posture Dashboard</h1>\n\
         <p>API: <code>{api}</code></p>\n\
         <nav><a href=\"#health\">Health</a><a href=\"#tasks\">Tasks</a><a href=\"#security\">Security</a></nav>\n\
         <section id=\"health\"><h2>Health</h2><pre id=\"healthOut\">{health}</pre></section>\n\
         <section id=\"tasks\"><h2>Tasks</h2><pre id=\"tasksOut\">{tasks}</pre></section>\n\
         <section id=\"security\"><h2>Security</h2>\n{checks}{facts}<pre id=\"secRaw\">{raw}</pre></section>\n\
         </body>\n\
         </html>\n",
        api = escape_html(api_base),
        health = pretty_json(health),
        tasks = pretty_json(&tasks.data),
        checks = checks_list(report),
        raw = pretty_json(&report.raw),
    );
    html
}
