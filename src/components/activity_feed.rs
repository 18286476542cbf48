//! Activity Feed Component
//!
//! Recent activity list with its own loading and error state.

use chrono::Utc;
use leptos::prelude::*;

use crate::components::{ErrorNotice, LoadingIndicator};
use crate::fetch::LoadState;
use crate::models::Activity;
use crate::render::activity_time_label;

#[component]
pub fn ActivityFeed(state: RwSignal<LoadState<Vec<Activity>>>) -> impl IntoView {
    view! {
        <section class="activity-list" id="activityList">
            {move || match state.get() {
                LoadState::Loading => view! { <LoadingIndicator label="Loading activity..." /> }.into_any(),
                LoadState::Failed(message) => view! { <ErrorNotice message=message /> }.into_any(),
                LoadState::Ready(entries) if entries.is_empty() => {
                    view! { <p class="empty-state">"No recent activity."</p> }.into_any()
                }
                LoadState::Ready(entries) => {
                    let now = Utc::now();
                    entries.into_iter().map(|entry| {
                        let meta = [activity_time_label(entry.time.as_deref(), now), entry.location]
                            .into_iter()
                            .flatten()
                            .collect::<Vec<_>>()
                            .join(" · ");
                        view! {
                            <div class="activity-card">
                                <div class="activity-info">
                                    <h4>{entry.message}</h4>
                                    <p>{meta}</p>
                                </div>
                            </div>
                        }
                    }).collect_view().into_any()
                }
            }}
        </section>
    }
}
