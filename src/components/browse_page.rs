//! Browse Page
//!
//! Listing, filters, server search and the detail dialog.
//!
//! The grid shows either the filtered store listing or, after a successful
//! server search, the search results (which never enter the store).

use chrono::Utc;
use futures::future::{Abortable, Aborted};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ErrorNotice, FilterBar, ItemDetail, ItemGrid, LoadingIndicator, StatsPanel};
use crate::context::AppContext;
use crate::error::AppError;
use crate::fetch::{load_listing, LoadState};
use crate::filter::{self, FilterCriteria, SortKey};
use crate::models::{Item, ItemType, ListingStats};
use crate::search::{SearchController, SearchOutcome, SearchStart};
use crate::store::{new_item_store, store_current, store_source, ListingSource};

#[component]
pub fn BrowsePage(ctx: AppContext) -> impl IntoView {
    let store = new_item_store();
    let listing_state = RwSignal::new(LoadState::<()>::Loading);

    let (query, set_query) = signal(String::new());
    let category = RwSignal::new(None::<ItemType>);
    let location = RwSignal::new(String::new());
    let sort = RwSignal::new(SortKey::default());

    // Server search results; None = show the store listing
    let search_results = RwSignal::new(None::<Vec<Item>>);
    let search_error = RwSignal::new(None::<String>);
    let searching = RwSignal::new(false);
    let selected = RwSignal::new(None::<Item>);

    let controller = StoredValue::new(SearchController::new(
        ctx.listing_config().search_fallback_to_local,
    ));

    load_listing(ctx, store, listing_state);

    let visible = Memo::new(move |_| {
        let criteria = FilterCriteria {
            query: query.get(),
            category: category.get(),
            location: location.get(),
        };
        match search_results.get() {
            Some(results) => filter::apply(&results, &criteria.without_query(), sort.get()),
            None => filter::apply(&store_current(&store), &criteria, sort.get()),
        }
    });
    let stats = Memo::new(move |_| ListingStats::from_items(&store_current(&store)));
    let locations = Memo::new(move |_| filter::location_options(&store_current(&store)));

    let run_search = move |text: String| {
        set_query.set(text.clone());
        search_error.set(None);

        let Some(start) = controller.try_update_value(|c| c.begin(&text)) else {
            return;
        };
        match start {
            SearchStart::Restore => {
                search_results.set(None);
                searching.set(false);
            }
            SearchStart::Dispatch { ticket, query, registration } => {
                // Local filtering covers the gap until the server answers
                search_results.set(None);
                searching.set(true);
                let api = ctx.api();
                spawn_local(async move {
                    log::debug!("[SEARCH] sending {:?}", query);
                    let request = async { api.search(&query).await };
                    let result = match Abortable::new(request, registration).await {
                        Ok(result) => result,
                        Err(Aborted) => Err(AppError::Cancelled),
                    };
                    let expired = matches!(result, Err(AppError::MissingCredential));
                    let outcome = controller.try_update_value(|c| c.finish(ticket, result, Utc::now()));
                    if expired {
                        if matches!(outcome, Some(SearchOutcome::Failed { .. })) {
                            searching.set(false);
                            ctx.redirect_to_login();
                        }
                        return;
                    }

                    match outcome {
                        Some(SearchOutcome::Results(items)) => {
                            log::info!("[SEARCH] {:?}: {} results", query, items.len());
                            search_results.set(Some(items));
                            searching.set(false);
                        }
                        Some(SearchOutcome::Failed { message, fallback }) => {
                            log::error!("[SEARCH] {:?} failed: {}", query, message);
                            search_error.set(Some(message));
                            if !fallback {
                                search_results.set(Some(Vec::new()));
                            }
                            searching.set(false);
                        }
                        Some(SearchOutcome::Stale) | Some(SearchOutcome::Cancelled) | None => {
                            log::debug!("[SEARCH] dropped response for {:?}", query);
                        }
                    }
                });
            }
        }
    };

    view! {
        <section class="browse-page">
            <h1>"Browse Items"</h1>
            <StatsPanel stats=stats />
            <FilterBar
                query=query
                category=category
                location=location
                sort=sort
                locations=locations
                on_query=run_search
            />

            {move || searching.get().then(|| view! { <LoadingIndicator label="Searching..." /> })}
            {move || search_error.get().map(|message| view! { <ErrorNotice message=message /> })}

            {move || match listing_state.get() {
                LoadState::Loading => Some(view! { <LoadingIndicator label="Loading items..." /> }.into_any()),
                LoadState::Failed(message) => Some(view! { <ErrorNotice message=message /> }.into_any()),
                LoadState::Ready(()) => None,
            }}
            {move || (store_source(&store) == ListingSource::LocalCache).then(|| view! {
                <p class="cache-notice">"Showing items saved on this device."</p>
            })}

            <Show when=move || {
                listing_state.with(|state| matches!(state, LoadState::Ready(_)))
                    || store_source(&store) == ListingSource::LocalCache
                    || search_results.with(Option::is_some)
            }>
                <ItemGrid ctx=ctx items=visible on_select=move |item: Item| selected.set(Some(item)) />
            </Show>

            <ItemDetail ctx=ctx selected=selected />
        </section>
    }
}
