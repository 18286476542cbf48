//! Item Detail Component
//!
//! Modal showing the full record of the selected card. Uses the record
//! already in memory, no extra request.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::Item;
use crate::render::{description_html, CardView};

#[component]
pub fn ItemDetail(ctx: AppContext, selected: RwSignal<Option<Item>>) -> impl IntoView {
    let close = move |_: web_sys::MouseEvent| selected.set(None);

    move || {
        selected.get().map(|item| {
            let card = CardView::from_item(&item, &ctx.placeholder_image());
            let badge_class = format!("badge {}", card.type_class);
            let description = description_html(item.description.as_deref());

            view! {
                <div class="modal-backdrop" on:click=close>
                    <div class="modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                        <button type="button" class="modal-close" aria-label="Close" on:click=close>
                            "×"
                        </button>
                        <img class="detail-image" src=card.image_src alt=card.title.clone() />
                        <h2>{card.title}</h2>
                        <span class=badge_class>{card.badge}</span>
                        <div class="detail-description" inner_html=description></div>
                        <p><strong>"Location: "</strong>{card.location}</p>
                        <p><strong>"Contact: "</strong>{card.contact}</p>
                        <p><strong>"Reported: "</strong>{card.date_label}</p>
                    </div>
                </div>
            }
        })
    }
}
