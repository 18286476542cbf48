//! Item Store
//!
//! The listing currently on screen, held in a Leptos `reactive_stores`
//! store. Only ever replaced as a whole.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Item;

/// Where the current listing came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListingSource {
    #[default]
    Remote,
    /// Previously submitted items read back from localStorage
    LocalCache,
}

#[derive(Clone, Debug, Default, Store)]
pub struct ListingState {
    pub items: Vec<Item>,
    pub source: ListingSource,
}

pub type ItemStore = Store<ListingState>;

pub fn new_item_store() -> ItemStore {
    Store::new(ListingState::default())
}

/// Swap in a new listing. Both writes land in the same tick, before any
/// effect re-runs.
pub fn store_replace(store: &ItemStore, items: Vec<Item>, source: ListingSource) {
    *store.items().write() = items;
    *store.source().write() = source;
}

/// Current listing, tracked
pub fn store_current(store: &ItemStore) -> Vec<Item> {
    store.items().get()
}

pub fn store_source(store: &ItemStore) -> ListingSource {
    store.source().get()
}
