//! Fetch Coordinator
//!
//! Page-load requests. Each one owns its own `LoadState` signal so a
//! failure in one region never blanks another.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{AppError, Result};
use crate::models::{Activity, Item};
use crate::normalize::parse_listing;
use crate::session::{BrowserStorage, KeyValueStore};
use crate::store::{store_replace, ItemStore, ListingSource};

/// localStorage keys older report pages saved submissions under
pub const LOST_CACHE_KEY: &str = "lostItems";
pub const FOUND_CACHE_KEY: &str = "foundItems";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(err) => LoadState::Failed(err.user_message()),
        }
    }
}

/// Items saved locally by earlier submissions; unreadable entries are
/// skipped
pub fn read_cached_items(store: &dyn KeyValueStore, now: DateTime<Utc>) -> Vec<Item> {
    let read = |key: &str| -> Value {
        store
            .get(key)
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or(Value::Null)
    };
    let bucket = json!({
        "lost": read(LOST_CACHE_KEY),
        "found": read(FOUND_CACHE_KEY),
    });
    parse_listing(&bucket, now)
}

#[derive(Debug)]
pub enum ListingResolution {
    Remote(Vec<Item>),
    /// Server failed; showing cached submissions instead
    Cached { items: Vec<Item>, error: AppError },
    Failed(AppError),
}

/// Decide what the listing shows after the server call settles
pub fn resolve_listing(
    result: Result<Vec<Item>>,
    cache_fallback: bool,
    cached: impl FnOnce() -> Vec<Item>,
) -> ListingResolution {
    match result {
        Ok(items) => ListingResolution::Remote(items),
        Err(err @ AppError::MissingCredential) => ListingResolution::Failed(err),
        Err(err) if cache_fallback => {
            let items = cached();
            if items.is_empty() {
                ListingResolution::Failed(err)
            } else {
                ListingResolution::Cached { items, error: err }
            }
        }
        Err(err) => ListingResolution::Failed(err),
    }
}

fn report_failure(ctx: AppContext, area: &str, err: &AppError) {
    if matches!(err, AppError::MissingCredential) {
        log::warn!("[FETCH] {}: session expired, redirecting", area);
        ctx.redirect_to_login();
    } else {
        log::error!("[FETCH] {} failed: {}", area, err);
    }
}

/// Load the full listing into `store`
pub fn load_listing(ctx: AppContext, store: ItemStore, state: RwSignal<LoadState<()>>) {
    state.set(LoadState::Loading);
    let api = ctx.api();
    let cache_fallback = ctx.listing_config().legacy_local_cache_fallback;

    spawn_local(async move {
        let result = api.list_all_items().await;
        let cached = || {
            BrowserStorage::local()
                .map(|storage| read_cached_items(&storage, Utc::now()))
                .unwrap_or_default()
        };

        match resolve_listing(result, cache_fallback, cached) {
            ListingResolution::Remote(items) => {
                log::info!("[FETCH] loaded {} items", items.len());
                store_replace(&store, items, ListingSource::Remote);
                state.set(LoadState::Ready(()));
            }
            ListingResolution::Cached { items, error } => {
                report_failure(ctx, "listing", &error);
                log::warn!("[FETCH] showing {} cached items", items.len());
                store_replace(&store, items, ListingSource::LocalCache);
                state.set(LoadState::Failed(error.user_message()));
            }
            ListingResolution::Failed(error) => {
                report_failure(ctx, "listing", &error);
                state.set(LoadState::Failed(error.user_message()));
            }
        }
    });
}

pub fn load_activity(ctx: AppContext, state: RwSignal<LoadState<Vec<Activity>>>) {
    state.set(LoadState::Loading);
    let api = ctx.api();
    spawn_local(async move {
        let result = api.recent_activity().await;
        if let Err(err) = &result {
            report_failure(ctx, "activity", err);
        }
        state.set(LoadState::from_result(result));
    });
}

pub fn load_recent_items(ctx: AppContext, state: RwSignal<LoadState<Vec<Item>>>) {
    state.set(LoadState::Loading);
    let api = ctx.api();
    spawn_local(async move {
        let result = api.recent_items().await;
        if let Err(err) = &result {
            report_failure(ctx, "recent items", err);
        }
        state.set(LoadState::from_result(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use crate::session::MemoryStorage;

    fn cached_store() -> MemoryStorage {
        let store = MemoryStorage::default();
        store
            .set(LOST_CACHE_KEY, r#"[{"itemName":"Laptop","location":"Library","date":"2024-05-01"}]"#)
            .unwrap();
        store.set(FOUND_CACHE_KEY, "not json").unwrap();
        store
    }

    #[test]
    fn test_read_cached_items() {
        let items = read_cached_items(&cached_store(), Utc::now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_type, ItemType::Lost);
        assert_eq!(items[0].item_name.as_deref(), Some("Laptop"));
    }

    #[test]
    fn test_read_cached_items_empty_storage() {
        assert!(read_cached_items(&MemoryStorage::default(), Utc::now()).is_empty());
    }

    #[test]
    fn test_failure_falls_back_to_cache_when_enabled() {
        let cached = read_cached_items(&cached_store(), Utc::now());
        let resolution = resolve_listing(Err(AppError::Status { status: 500 }), true, || cached);
        assert!(matches!(
            resolution,
            ListingResolution::Cached { ref items, error: AppError::Status { status: 500 } } if items.len() == 1
        ));
    }

    #[test]
    fn test_failure_without_fallback_or_cache() {
        let resolution = resolve_listing(Err(AppError::Status { status: 500 }), false, || {
            panic!("cache must not be read when fallback is off")
        });
        assert!(matches!(resolution, ListingResolution::Failed(_)));

        let resolution = resolve_listing(Err(AppError::Status { status: 500 }), true, Vec::new);
        assert!(matches!(resolution, ListingResolution::Failed(_)));
    }

    #[test]
    fn test_missing_credential_never_uses_cache() {
        let resolution = resolve_listing(Err(AppError::MissingCredential), true, || {
            panic!("cache must not be read without a session")
        });
        assert!(matches!(resolution, ListingResolution::Failed(AppError::MissingCredential)));
    }

    #[test]
    fn test_empty_remote_listing_is_ready() {
        assert!(matches!(
            resolve_listing(Ok(Vec::new()), true, Vec::new),
            ListingResolution::Remote(ref items) if items.is_empty()
        ));
    }

    #[test]
    fn test_load_state_from_result() {
        let state: LoadState<u8> = LoadState::from_result(Err(AppError::Status { status: 404 }));
        assert_eq!(state, LoadState::Failed("The server returned an error (404).".to_string()));
    }
}
