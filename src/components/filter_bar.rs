//! Filter Bar Component
//!
//! Search box plus category, location and sort selects.

use leptos::prelude::*;

use crate::filter::{SortKey, SORT_OPTIONS};
use crate::models::ItemType;

const CATEGORY_OPTIONS: &[(&str, &str)] = &[("", "All items"), ("lost", "Lost"), ("found", "Found")];

#[component]
pub fn FilterBar(
    query: ReadSignal<String>,
    category: RwSignal<Option<ItemType>>,
    location: RwSignal<String>,
    sort: RwSignal<SortKey>,
    #[prop(into)] locations: Signal<Vec<String>>,
    /// Called with the raw search box text on every edit
    #[prop(into)] on_query: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="filter-bar">
            <input
                type="search"
                class="search-box"
                placeholder="Search lost or found items..."
                autocomplete="off"
                prop:value=move || query.get()
                on:input=move |ev| on_query.run(event_target_value(&ev))
            />

            <select
                class="filter-select"
                on:change=move |ev| category.set(ItemType::parse(&event_target_value(&ev)))
            >
                {CATEGORY_OPTIONS.iter().map(|(value, label)| {
                    let value = *value;
                    view! {
                        <option
                            value=value
                            selected=move || category.get().map_or("", |c| c.as_str()) == value
                        >
                            {*label}
                        </option>
                    }
                }).collect_view()}
            </select>

            <select
                class="location-select"
                on:change=move |ev| location.set(event_target_value(&ev))
            >
                <option value="">"All locations"</option>
                <For
                    each=move || locations.get()
                    key=|loc| loc.clone()
                    children=move |loc| {
                        let selected_loc = loc.clone();
                        let label = loc.clone();
                        view! {
                            <option
                                value=loc
                                selected=move || location.get() == selected_loc
                            >
                                {label}
                            </option>
                        }
                    }
                />
            </select>

            <select
                class="sort-select"
                on:change=move |ev| sort.set(SortKey::from_str(&event_target_value(&ev)))
            >
                {SORT_OPTIONS.iter().map(|(value, label)| {
                    let value = *value;
                    view! {
                        <option value=value selected=move || sort.get().as_str() == value>
                            {*label}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
