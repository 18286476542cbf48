//! Frontend Models
//!
//! View records for items and activity, plus the loosely-typed raw
//! records the server sends before normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which collection an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }

    /// Badge text shown on cards
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Lost => "LOST",
            ItemType::Found => "FOUND",
        }
    }

    /// Parse a `type` value; anything else is treated as absent
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lost" => Some(ItemType::Lost),
            "found" => Some(ItemType::Found),
            _ => None,
        }
    }
}

/// Item record as received, every field optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawItem {
    pub id: Option<String>,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
    pub date: Option<String>,
    pub kind: Option<String>,
}

/// Normalized item shown in listings
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub item_type: ItemType,
}

/// Every displayed field of an [`Item`]; list keys built from it change
/// whenever anything on the card would
pub type CardKey = (
    String,
    ItemType,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    DateTime<Utc>,
);

impl Item {
    pub fn card_key(&self) -> CardKey {
        (
            self.id.clone(),
            self.item_type,
            self.item_name.clone(),
            self.description.clone(),
            self.location.clone(),
            self.contact.clone(),
            self.image_url.clone(),
            self.created_at,
        )
    }
}

/// Recent activity feed entry
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub message: String,
    pub time: Option<String>,
    pub location: Option<String>,
}

/// Counts derived from the current listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingStats {
    pub total: usize,
    pub lost: usize,
    pub found: usize,
}

impl ListingStats {
    pub fn from_items(items: &[Item]) -> Self {
        let lost = items.iter().filter(|item| item.item_type == ItemType::Lost).count();
        Self {
            total: items.len(),
            lost,
            found: items.len() - lost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_parse() {
        assert_eq!(ItemType::parse("lost"), Some(ItemType::Lost));
        assert_eq!(ItemType::parse(" Found "), Some(ItemType::Found));
        assert_eq!(ItemType::parse("stolen"), None);
        assert_eq!(ItemType::parse(""), None);
    }

    #[test]
    fn test_card_key_tracks_every_displayed_field() {
        let listed = Item {
            id: "x".to_string(),
            item_name: Some("Bag".to_string()),
            description: None,
            location: Some("Gym".to_string()),
            contact: None,
            image_url: None,
            created_at: Utc::now(),
            item_type: ItemType::Found,
        };
        assert_eq!(listed.card_key(), listed.clone().card_key());

        // Same id re-typed by a search response
        let searched = Item {
            item_type: ItemType::Lost,
            ..listed.clone()
        };
        assert_ne!(listed.card_key(), searched.card_key());

        // Synthesized ids from different lists can collide
        let other = Item {
            item_name: Some("Umbrella".to_string()),
            ..listed.clone()
        };
        assert_ne!(listed.card_key(), other.card_key());
    }
}
