//! Loading & Error Notices

use leptos::prelude::*;

/// Log lines shown under "Details" in error notices
const DIAGNOSTIC_LINES: usize = 20;

#[component]
pub fn LoadingIndicator(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="loading" role="status">
            <span class="spinner"></span>
            <span>{label}</span>
        </div>
    }
}

/// Inline error with the most recent log lines for support requests
#[component]
pub fn ErrorNotice(#[prop(into)] message: String) -> impl IntoView {
    let lines = console_logger::recent_lines();
    let skip = lines.len().saturating_sub(DIAGNOSTIC_LINES);
    let diagnostics = lines.into_iter().skip(skip).collect::<Vec<_>>().join("\n");

    view! {
        <div class="error-notice" role="alert">
            <p>{message}</p>
            <details>
                <summary>"Details"</summary>
                <pre class="diagnostics">{diagnostics}</pre>
            </details>
        </div>
    }
}
