//! Application Context
//!
//! Configuration, session and API client, built once by `App` and handed
//! to each page component as a prop.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::{AppConfig, ListingConfig};
use crate::session::{redirect, Session};

/// Browser-bound services; kept in local storage because the session
/// holds browser handles
struct Services {
    session: Session,
    api: ApiClient,
}

#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    services: StoredValue<Services, LocalStorage>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let session = Session::browser(&config.session);
        let api = ApiClient::new(&config.api, session.clone());
        Self {
            config: StoredValue::new(config),
            services: StoredValue::new_local(Services { session, api }),
        }
    }

    pub fn listing_config(&self) -> ListingConfig {
        self.config.with_value(|config| config.listing.clone())
    }

    pub fn placeholder_image(&self) -> String {
        self.config
            .with_value(|config| config.listing.placeholder_image.clone())
    }

    pub fn api(&self) -> ApiClient {
        self.services.with_value(|services| services.api.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.services
            .with_value(|services| services.session.token().is_some())
    }

    pub fn redirect_to_login(&self) {
        let login = self
            .services
            .with_value(|services| services.session.login_page().to_string());
        redirect(&login);
    }

    /// Drop the token and go back to the login page
    pub fn sign_out(&self) {
        let result = self.services.with_value(|services| services.session.sign_out());
        if let Err(e) = result {
            log::error!("[SESSION] sign out failed: {}", e);
        }
        log::info!("[SESSION] signed out");
        self.redirect_to_login();
    }
}
