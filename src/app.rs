//! Lost & Found Frontend App
//!
//! Root component: builds the app context, enforces sign-in and picks the
//! page for the current URL.

use leptos::prelude::*;

use crate::components::{ActivityPage, BrowsePage, Page, PageShell};
use crate::config::AppConfig;
use crate::context::AppContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);

    // No token: leave before any page logic or request runs
    if !ctx.is_signed_in() {
        log::warn!("[SESSION] no access token, redirecting to login");
        ctx.redirect_to_login();
        return view! { <p class="redirecting">"Redirecting to login..."</p> }.into_any();
    }

    let page = Page::current();
    log::info!("[APP] rendering {:?}", page);

    view! {
        <PageShell ctx=ctx current=page>
            {match page {
                Page::Browse => view! { <BrowsePage ctx=ctx /> }.into_any(),
                Page::Activity => view! { <ActivityPage ctx=ctx /> }.into_any(),
            }}
        </PageShell>
    }
    .into_any()
}
