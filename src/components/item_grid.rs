//! Item Grid Component
//!
//! Renders an ordered item sequence as cards, or the empty state.

use leptos::prelude::*;

use crate::components::ItemCard;
use crate::context::AppContext;
use crate::models::Item;

#[component]
pub fn ItemGrid(
    ctx: AppContext,
    #[prop(into)] items: Signal<Vec<Item>>,
    #[prop(into)] on_select: Callback<Item>,
) -> impl IntoView {
    view! {
        <div class="item-grid" id="itemGrid">
            <Show
                when=move || items.with(|items| !items.is_empty())
                fallback=|| view! { <p class="empty-state">"No items found."</p> }
            >
                <For
                    each=move || items.get()
                    key=Item::card_key
                    children=move |item| view! { <ItemCard ctx=ctx item=item on_select=on_select /> }
                />
            </Show>
        </div>
    }
}
