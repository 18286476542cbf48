//! Item Endpoints
//!
//! Typed wrappers for the item listing, activity and search endpoints.

use chrono::Utc;
use serde_json::Value;

use super::{ApiClient, Endpoint};
use crate::error::Result;
use crate::models::{Activity, Item};
use crate::normalize::{parse_activity, parse_listing};

impl ApiClient {
    /// Every lost and found item, normalized with provenance
    pub async fn list_all_items(&self) -> Result<Vec<Item>> {
        let body = self.get_json(Endpoint::AllItems, &[]).await?;
        Ok(parse_listing(&body, Utc::now()))
    }

    /// The most recent reports from both collections
    pub async fn recent_items(&self) -> Result<Vec<Item>> {
        let body = self.get_json(Endpoint::RecentItems, &[]).await?;
        Ok(parse_listing(&body, Utc::now()))
    }

    pub async fn recent_activity(&self) -> Result<Vec<Activity>> {
        let body = self.get_json(Endpoint::RecentActivity, &[]).await?;
        Ok(parse_activity(&body))
    }

    /// Raw search body; normalization happens once the search controller
    /// has confirmed the response is still wanted
    pub async fn search(&self, query: &str) -> Result<Value> {
        self.get_json(Endpoint::Search, &[("query", query)]).await
    }
}
