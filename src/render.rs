//! Display Helpers
//!
//! Pure mapping from `Item`/`Activity` records to the strings a card shows.
//! Text reaches the DOM as text nodes; the only markup built by hand is the
//! detail description, which is escaped first.

use chrono::{DateTime, Utc};

use crate::models::Item;
use crate::normalize::parse_timestamp;

pub const NO_TITLE: &str = "(no title)";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const NO_CONTACT: &str = "Not provided";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped description with line breaks kept, for `inner_html`
pub fn description_html(description: Option<&str>) -> String {
    escape_html(description.unwrap_or(NO_DESCRIPTION))
        .lines()
        .collect::<Vec<_>>()
        .join("<br>")
}

/// e.g. "Jan 1, 2024"
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// "just now", "5 mins ago", "3 hours ago", "2 days ago", then a date
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };
    match elapsed.num_minutes() {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => plural(m, "min"),
        m if m < 60 * 24 => plural(m / 60, "hour"),
        m if m < 60 * 24 * 7 => plural(m / (60 * 24), "day"),
        _ => format_date(then),
    }
}

/// Relative phrase when the feed sends a timestamp, the raw text otherwise
pub fn activity_time_label(time: Option<&str>, now: DateTime<Utc>) -> Option<String> {
    let time = time?;
    Some(match parse_timestamp(time) {
        Some(at) => relative_time(at, now),
        None => time.to_string(),
    })
}

/// Everything an item card displays
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub image_src: String,
    pub title: String,
    pub description: String,
    pub badge: &'static str,
    pub type_class: &'static str,
    pub location: String,
    /// Lowercased location, mirrored into a data attribute
    pub location_key: String,
    pub contact: String,
    pub date_label: String,
}

impl CardView {
    pub fn from_item(item: &Item, placeholder_image: &str) -> Self {
        let location = item.location.as_deref().unwrap_or(UNKNOWN_LOCATION);
        Self {
            image_src: item
                .image_url
                .clone()
                .unwrap_or_else(|| placeholder_image.to_string()),
            title: item.item_name.as_deref().unwrap_or(NO_TITLE).to_string(),
            description: item.description.as_deref().unwrap_or(NO_DESCRIPTION).to_string(),
            badge: item.item_type.label(),
            type_class: item.item_type.as_str(),
            location: location.to_string(),
            location_key: location.to_lowercase(),
            contact: item.contact.as_deref().unwrap_or(NO_CONTACT).to_string(),
            date_label: format_date(item.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;

    fn bare_item() -> Item {
        Item {
            id: "1".to_string(),
            item_name: None,
            description: None,
            location: None,
            contact: None,
            image_url: None,
            created_at: parse_timestamp("2024-01-01").unwrap(),
            item_type: ItemType::Found,
        }
    }

    #[test]
    fn test_card_placeholders() {
        let card = CardView::from_item(&bare_item(), "assets/default.png");
        assert_eq!(card.image_src, "assets/default.png");
        assert_eq!(card.title, NO_TITLE);
        assert_eq!(card.location, "Unknown");
        assert_eq!(card.badge, "FOUND");
        assert_eq!(card.date_label, "Jan 1, 2024");
    }

    #[test]
    fn test_script_description_is_escaped() {
        let html = description_html(Some("<script>alert('x')</script>\nsecond line"));
        assert!(!html.contains("<script>"));
        assert_eq!(
            html,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;<br>second line"
        );
    }

    #[test]
    fn test_relative_time() {
        let now = parse_timestamp("2024-06-01T12:00:00Z").unwrap();
        let ago = |s: &str| relative_time(parse_timestamp(s).unwrap(), now);
        assert_eq!(ago("2024-06-01T11:59:40Z"), "just now");
        assert_eq!(ago("2024-06-01T11:50:00Z"), "10 mins ago");
        assert_eq!(ago("2024-06-01T11:00:00Z"), "1 hour ago");
        assert_eq!(ago("2024-05-30T12:00:00Z"), "2 days ago");
        assert_eq!(ago("2024-04-01T12:00:00Z"), "Apr 1, 2024");
    }

    #[test]
    fn test_activity_time_label_keeps_free_text() {
        let now = Utc::now();
        assert_eq!(
            activity_time_label(Some("30 mins ago · Cafeteria"), now).as_deref(),
            Some("30 mins ago · Cafeteria")
        );
        assert_eq!(activity_time_label(None, now), None);
    }
}
