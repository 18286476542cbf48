//! Stats Panel Component

use leptos::prelude::*;

use crate::models::ListingStats;

/// Item counts for the current listing
#[component]
pub fn StatsPanel(#[prop(into)] stats: Signal<ListingStats>) -> impl IntoView {
    view! {
        <div class="stats-panel">
            <div class="stat">
                <span class="stat-value">{move || stats.get().total}</span>
                <span class="stat-label">"Total reports"</span>
            </div>
            <div class="stat lost">
                <span class="stat-value">{move || stats.get().lost}</span>
                <span class="stat-label">"Lost"</span>
            </div>
            <div class="stat found">
                <span class="stat-value">{move || stats.get().found}</span>
                <span class="stat-label">"Found"</span>
            </div>
        </div>
    }
}
