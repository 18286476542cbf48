//! Item Normalization
//!
//! Turns loosely-shaped server and localStorage records into `Item`s with a
//! guaranteed type. Unexpected field types are treated as absent rather than
//! failing the whole response.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::models::{Activity, Item, ItemType, RawItem};

/// Read the first present key as text. Numbers are stringified, blank
/// strings count as absent.
fn text_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Extract a raw item from a JSON value; non-objects yield `None`.
pub fn raw_item_from_value(value: &Value) -> Option<RawItem> {
    let map = value.as_object()?;
    Some(RawItem {
        id: text_field(map, &["id", "_id"]),
        item_name: text_field(map, &["itemName", "name"]),
        description: text_field(map, &["description"]),
        location: text_field(map, &["location"]),
        contact: text_field(map, &["contact"]),
        image_url: text_field(map, &["imageUrl", "image"]),
        created_at: text_field(map, &["createdAt"]),
        date: text_field(map, &["date"]),
        kind: text_field(map, &["type"]),
    })
}

/// Parse the timestamp formats seen in records: RFC 3339, naive
/// date-time (read as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Name-and-timestamp policy for records of unknown provenance.
///
/// A record with both a name and a `createdAt` is classified as lost,
/// anything else as found. Found reports that also carry both fields are
/// misclassified; only use this when neither provenance nor an explicit
/// `type` is available.
pub fn infer_item_type(raw: &RawItem) -> ItemType {
    if raw.item_name.is_some() && raw.created_at.is_some() {
        ItemType::Lost
    } else {
        ItemType::Found
    }
}

/// Normalize one record. Provenance wins over an explicit `type`, which
/// wins over inference.
pub fn normalize_item(
    raw: RawItem,
    provenance: Option<ItemType>,
    index: usize,
    now: DateTime<Utc>,
) -> Item {
    let item_type = provenance
        .or_else(|| raw.kind.as_deref().and_then(ItemType::parse))
        .unwrap_or_else(|| infer_item_type(&raw));

    let created_at = raw
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| raw.date.as_deref().and_then(parse_timestamp))
        .unwrap_or(now);

    let id = raw
        .id
        .unwrap_or_else(|| format!("{}-{}", item_type.as_str(), index));

    Item {
        id,
        item_name: raw.item_name,
        description: raw.description,
        location: raw.location,
        contact: raw.contact,
        image_url: raw.image_url,
        created_at,
        item_type,
    }
}

fn push_bucket(bucket: &Map<String, Value>, out: &mut Vec<(ItemType, RawItem)>) {
    for (key, item_type) in [("lost", ItemType::Lost), ("found", ItemType::Found)] {
        if let Some(Value::Array(records)) = bucket.get(key) {
            out.extend(
                records
                    .iter()
                    .filter_map(raw_item_from_value)
                    .map(|raw| (item_type, raw)),
            );
        }
    }
}

/// Parse a listing response.
///
/// Accepts either an array of buckets (`[{lost: [..]}, {found: [..]}]`) or
/// one bucket object (`{lost: [..], found: [..]}`). Lost items come first.
pub fn parse_listing(value: &Value, now: DateTime<Utc>) -> Vec<Item> {
    let mut tagged = Vec::new();
    match value {
        Value::Array(buckets) => {
            for bucket in buckets.iter().filter_map(Value::as_object) {
                push_bucket(bucket, &mut tagged);
            }
        }
        Value::Object(bucket) => push_bucket(bucket, &mut tagged),
        _ => {}
    }
    tagged.sort_by_key(|(item_type, _)| *item_type == ItemType::Found);

    tagged
        .into_iter()
        .enumerate()
        .map(|(index, (item_type, raw))| normalize_item(raw, Some(item_type), index, now))
        .collect()
}

/// Parse records without provenance (search results, cached submissions).
pub fn parse_untyped_items(value: &Value, now: DateTime<Utc>) -> Vec<Item> {
    let Some(records) = value.as_array() else {
        return Vec::new();
    };
    records
        .iter()
        .filter_map(raw_item_from_value)
        .enumerate()
        .map(|(index, raw)| normalize_item(raw, None, index, now))
        .collect()
}

/// Parse the recent-activity feed; entries without a message are dropped.
pub fn parse_activity(value: &Value) -> Vec<Activity> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|map| {
            Some(Activity {
                message: text_field(map, &["message"])?,
                time: text_field(map, &["time"]),
                location: text_field(map, &["location"]),
            })
        })
        .collect()
}
