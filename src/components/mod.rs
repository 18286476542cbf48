//! UI Components
//!
//! Leptos components for the browse and activity pages.

mod page_shell;
mod filter_bar;
mod item_card;
mod item_grid;
mod item_detail;
mod stats_panel;
mod activity_feed;
mod status;
mod browse_page;
mod activity_page;

pub use page_shell::{Page, PageShell};
pub use filter_bar::FilterBar;
pub use item_card::ItemCard;
pub use item_grid::ItemGrid;
pub use item_detail::ItemDetail;
pub use stats_panel::StatsPanel;
pub use activity_feed::ActivityFeed;
pub use status::{ErrorNotice, LoadingIndicator};
pub use browse_page::BrowsePage;
pub use activity_page::ActivityPage;
