//! Activity Page
//!
//! Recent activity feed next to the most recent reports. The two requests
//! load and fail independently.

use leptos::prelude::*;

use crate::components::{ActivityFeed, ErrorNotice, ItemDetail, ItemGrid, LoadingIndicator};
use crate::context::AppContext;
use crate::fetch::{load_activity, load_recent_items, LoadState};
use crate::models::Item;

#[component]
pub fn ActivityPage(ctx: AppContext) -> impl IntoView {
    let activity = RwSignal::new(LoadState::Loading);
    let recent = RwSignal::new(LoadState::<Vec<Item>>::Loading);
    let selected = RwSignal::new(None::<Item>);

    load_activity(ctx, activity);
    load_recent_items(ctx, recent);

    let recent_items = Signal::derive(move || match recent.get() {
        LoadState::Ready(items) => items,
        _ => Vec::new(),
    });

    view! {
        <section class="activity-page">
            <h1>"Recent Activity"</h1>
            <ActivityFeed state=activity />

            <h2>"Recently Reported"</h2>
            {move || match recent.get() {
                LoadState::Loading => view! { <LoadingIndicator label="Loading recent items..." /> }.into_any(),
                LoadState::Failed(message) => view! { <ErrorNotice message=message /> }.into_any(),
                LoadState::Ready(_) => view! {
                    <ItemGrid ctx=ctx items=recent_items on_select=move |item: Item| selected.set(Some(item)) />
                }.into_any(),
            }}

            <ItemDetail ctx=ctx selected=selected />
        </section>
    }
}
