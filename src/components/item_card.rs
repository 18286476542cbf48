//! Item Card Component

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::Item;
use crate::render::CardView;

/// One listing card; "View details" hands the record to `on_select`
#[component]
pub fn ItemCard(ctx: AppContext, item: Item, #[prop(into)] on_select: Callback<Item>) -> impl IntoView {
    let card = CardView::from_item(&item, &ctx.placeholder_image());
    let badge_class = format!("badge {}", card.type_class);

    view! {
        <div class="item-card" data-category=card.type_class data-location=card.location_key>
            <img src=card.image_src alt=card.title.clone() loading="lazy" />
            <div class="item-info">
                <h3>{card.title}</h3>
                <p class="item-description">{card.description}</p>
                <span class=badge_class>{card.badge}</span>
                <p><small>{card.location} " · " {card.date_label}</small></p>
                <button
                    type="button"
                    class="details-btn"
                    on:click=move |_| on_select.run(item.clone())
                >
                    "View details"
                </button>
            </div>
        </div>
    }
}
