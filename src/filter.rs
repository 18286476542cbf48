//! Filter & Sort
//!
//! Pure functions computing the displayed sequence from a listing.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::models::{Item, ItemType};

/// Sort options offered by the sort select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Az,
    Za,
}

/// (value, label) pairs for the sort select
pub const SORT_OPTIONS: &[(&str, &str)] = &[
    ("newest", "Newest first"),
    ("oldest", "Oldest first"),
    ("az", "Name A–Z"),
    ("za", "Name Z–A"),
];

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Az => "az",
            SortKey::Za => "za",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "oldest" => SortKey::Oldest,
            "az" => SortKey::Az,
            "za" => SortKey::Za,
            _ => SortKey::Newest,
        }
    }
}

/// User-selected filters. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub query: String,
    pub category: Option<ItemType>,
    pub location: String,
}

impl FilterCriteria {
    /// Same criteria without the free-text query
    pub fn without_query(&self) -> Self {
        Self {
            query: String::new(),
            ..self.clone()
        }
    }
}

fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.unwrap_or("").to_lowercase().contains(needle)
}

pub fn matches(item: &Item, criteria: &FilterCriteria) -> bool {
    let query = criteria.query.trim().to_lowercase();
    let matches_query = query.is_empty()
        || contains_folded(item.item_name.as_deref(), &query)
        || contains_folded(item.description.as_deref(), &query);

    let matches_category = criteria
        .category
        .map_or(true, |category| item.item_type == category);

    let location = criteria.location.trim().to_lowercase();
    let matches_location = location.is_empty() || contains_folded(item.location.as_deref(), &location);

    matches_query && matches_category && matches_location
}

thread_local! {
    // Root locale, tertiary strength: the browser's default `localeCompare`
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Locale-aware text order, raw text as tie-break so distinct strings
/// never compare equal
fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}

fn compare_names(a: &Item, b: &Item) -> Ordering {
    collate(
        a.item_name.as_deref().unwrap_or(""),
        b.item_name.as_deref().unwrap_or(""),
    )
}

/// Sort in place; stable, so equal keys keep their listing order
pub fn sort_items(items: &mut [Item], sort: SortKey) {
    match sort {
        SortKey::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Az => items.sort_by(compare_names),
        SortKey::Za => items.sort_by(|a, b| compare_names(b, a)),
    }
}

/// Filter then sort into a new sequence; `items` is left untouched
pub fn apply(items: &[Item], criteria: &FilterCriteria, sort: SortKey) -> Vec<Item> {
    let mut visible: Vec<Item> = items
        .iter()
        .filter(|item| matches(item, criteria))
        .cloned()
        .collect();
    sort_items(&mut visible, sort);
    visible
}

/// Distinct locations for the location select, sorted, first spelling wins
pub fn location_options(items: &[Item]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for location in items.iter().filter_map(|item| item.location.as_deref()) {
        let location = location.trim();
        if location.is_empty() {
            continue;
        }
        let folded = location.to_lowercase();
        if !options.iter().any(|known| known.to_lowercase() == folded) {
            options.push(location.to_string());
        }
    }
    options.sort_by(|a, b| collate(a, b));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::parse_timestamp;

    fn make_item(id: &str, name: &str, created_at: &str, item_type: ItemType) -> Item {
        Item {
            id: id.to_string(),
            item_name: Some(name.to_string()),
            description: None,
            location: None,
            contact: None,
            image_url: None,
            created_at: parse_timestamp(created_at).unwrap(),
            item_type,
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.item_name.as_deref().unwrap_or("")).collect()
    }

    fn wallet_and_keys() -> Vec<Item> {
        vec![
            make_item("1", "Wallet", "2024-01-01", ItemType::Lost),
            make_item("2", "Keys", "2024-02-01", ItemType::Found),
        ]
    }

    #[test]
    fn test_wallet_and_keys_orders() {
        let items = wallet_and_keys();
        let all = FilterCriteria::default();
        assert_eq!(names(&apply(&items, &all, SortKey::Newest)), vec!["Keys", "Wallet"]);
        assert_eq!(names(&apply(&items, &all, SortKey::Oldest)), vec!["Wallet", "Keys"]);
        assert_eq!(names(&apply(&items, &all, SortKey::Az)), vec!["Keys", "Wallet"]);
        assert_eq!(names(&apply(&items, &all, SortKey::Za)), vec!["Wallet", "Keys"]);
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let items = vec![
            make_item("1", "b", "2024-01-01", ItemType::Lost),
            make_item("2", "a", "2024-01-01", ItemType::Found),
            make_item("3", "c", "2024-01-01", ItemType::Lost),
        ];
        // equal timestamps: stable sort keeps listing order
        let visible = apply(&items, &FilterCriteria::default(), SortKey::Newest);
        assert_eq!(visible, items);
    }

    #[test]
    fn test_newest_is_reverse_of_oldest() {
        let items = vec![
            make_item("1", "Laptop", "2024-03-05T10:00:00Z", ItemType::Lost),
            make_item("2", "Dog", "2023-12-24", ItemType::Lost),
            make_item("3", "Scarf", "2024-05-01", ItemType::Found),
            make_item("4", "ID card", "2024-03-05T09:59:59Z", ItemType::Found),
        ];
        let all = FilterCriteria::default();
        let mut oldest = apply(&items, &all, SortKey::Oldest);
        oldest.reverse();
        assert_eq!(apply(&items, &all, SortKey::Newest), oldest);
    }

    #[test]
    fn test_az_is_reverse_of_za() {
        let items = vec![
            make_item("1", "apple", "2024-01-01", ItemType::Lost),
            make_item("2", "Apple", "2024-01-01", ItemType::Lost),
            make_item("3", "banana", "2024-01-01", ItemType::Found),
            make_item("4", "Zebra mug", "2024-01-01", ItemType::Found),
        ];
        let all = FilterCriteria::default();
        let mut za = apply(&items, &all, SortKey::Za);
        za.reverse();
        assert_eq!(apply(&items, &all, SortKey::Az), za);
    }

    #[test]
    fn test_query_matches_name_or_description() {
        let mut items = wallet_and_keys();
        items[1].description = Some("Silver WALLET chain attached".to_string());
        let criteria = FilterCriteria {
            query: "wallet".to_string(),
            ..Default::default()
        };
        assert_eq!(apply(&items, &criteria, SortKey::Az).len(), 2);

        let criteria = FilterCriteria {
            query: "chain".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&items, &criteria, SortKey::Az)), vec!["Keys"]);
    }

    #[test]
    fn test_category_and_location_filters() {
        let mut items = wallet_and_keys();
        items[0].location = Some("Main Library".to_string());
        items[1].location = Some("Cafeteria".to_string());

        let criteria = FilterCriteria {
            category: Some(ItemType::Found),
            ..Default::default()
        };
        assert_eq!(names(&apply(&items, &criteria, SortKey::Az)), vec!["Keys"]);

        let criteria = FilterCriteria {
            location: "library".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&items, &criteria, SortKey::Az)), vec!["Wallet"]);

        let criteria = FilterCriteria {
            location: "library".to_string(),
            category: Some(ItemType::Found),
            ..Default::default()
        };
        assert!(apply(&items, &criteria, SortKey::Az).is_empty());
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let items = wallet_and_keys();
        let before = items.clone();
        let _ = apply(&items, &FilterCriteria::default(), SortKey::Za);
        assert_eq!(items, before);
    }

    #[test]
    fn test_location_options() {
        let mut items = wallet_and_keys();
        items[0].location = Some("library".to_string());
        items[1].location = Some("Library".to_string());
        items.push(make_item("3", "Mug", "2024-01-01", ItemType::Found));
        items[2].location = Some("Cafeteria".to_string());
        assert_eq!(location_options(&items), vec!["Cafeteria", "library"]);
    }

    #[test]
    fn test_location_options_fold_non_ascii() {
        let mut items = wallet_and_keys();
        items[0].location = Some("ÉCOLE".to_string());
        items[1].location = Some("école".to_string());
        assert_eq!(location_options(&items), vec!["ÉCOLE"]);
    }

    #[test]
    fn test_name_sort_is_locale_aware() {
        let items = vec![
            make_item("1", "Zebra mug", "2024-01-01", ItemType::Lost),
            make_item("2", "Éclair box", "2024-01-01", ItemType::Found),
            make_item("3", "apple", "2024-01-01", ItemType::Lost),
            make_item("4", "Apple", "2024-01-01", ItemType::Found),
        ];
        let all = FilterCriteria::default();
        assert_eq!(
            names(&apply(&items, &all, SortKey::Az)),
            vec!["apple", "Apple", "Éclair box", "Zebra mug"]
        );
        assert_eq!(
            names(&apply(&items, &all, SortKey::Za)),
            vec!["Zebra mug", "Éclair box", "Apple", "apple"]
        );
    }

    #[test]
    fn test_sort_key_round_trip_through_select_values() {
        for (value, _) in SORT_OPTIONS {
            assert_eq!(SortKey::from_str(value).as_str(), *value);
        }
        assert_eq!(SortKey::from_str("bogus"), SortKey::Newest);
    }
}
