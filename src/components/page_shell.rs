//! Page Shell Component
//!
//! Header, navigation, menu toggle and logout shared by every page.

use leptos::prelude::*;

use crate::context::AppContext;

/// Pages rendered by this app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Browse,
    Activity,
}

impl Page {
    /// Pick the page from the URL path; anything unrecognised browses
    pub fn from_path(path: &str) -> Self {
        let file = path.rsplit('/').next().unwrap_or("").to_ascii_lowercase();
        if file.starts_with("activity") {
            Page::Activity
        } else {
            Page::Browse
        }
    }

    /// Page for the current browser location
    pub fn current() -> Self {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .map(|path| Page::from_path(&path))
            .unwrap_or_default()
    }
}

/// (href, label, page rendered here if any)
const NAV_LINKS: &[(&str, &str, Option<Page>)] = &[
    ("Browse.html", "Browse", Some(Page::Browse)),
    ("activity.html", "Activity", Some(Page::Activity)),
    ("report-lost.html", "Report Lost", None),
    ("report-found.html", "Report Found", None),
];

#[component]
pub fn PageShell(ctx: AppContext, current: Page, children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);

    view! {
        <header class="navbar">
            <a class="logo" href="index.html">"Lost & Found"</a>
            <button
                class="menu-toggle"
                aria-label="Toggle menu"
                on:click=move |_| set_menu_open.update(|open| *open = !*open)
            >
                "☰"
            </button>
            <nav class=move || if menu_open.get() { "nav-links open" } else { "nav-links" }>
                {NAV_LINKS.iter().map(|(href, label, page)| {
                    let class = if *page == Some(current) { "nav-link active" } else { "nav-link" };
                    view! { <a class=class href=*href>{*label}</a> }
                }).collect_view()}
                <button id="logout" class="logout-btn" on:click=move |_| ctx.sign_out()>
                    "Logout"
                </button>
            </nav>
        </header>
        <main class="page-content">{children()}</main>
    }
}
