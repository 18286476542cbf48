//! Lost & Found Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod fetch;
mod filter;
mod models;
mod normalize;
mod render;
mod search;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if console_logger::init(config.logging.level_filter()).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
    if let Some(e) = config_error {
        log::error!("[APP] bad embedded config, using defaults: {}", e);
    }
    log::info!("[APP] starting, api at {}", config.api.base_url);

    mount_to_body(move || view! { <App config=config /> });
}
