use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value as JsonValue;

use prothunter_catalog::{Catalog, RawProduct, RejectedProduct};
use prothunter_core::ProductId;

use crate::error::FeedError;

/// Outcome of decoding a feed: the usable records plus the ones that were
/// not product-shaped.
#[derive(Debug, Clone, Default)]
pub struct FeedLoad {
    pub records: Vec<RawProduct>,
    pub rejected: Vec<RejectedProduct>,
}

impl FeedLoad {
    /// Enrich the decoded records, carrying decode rejections along.
    pub fn into_catalog(self) -> Catalog {
        Catalog::from_raw(self.records).with_rejections(self.rejected)
    }
}

pub fn load_feed_str(feed: &str) -> Result<FeedLoad, FeedError> {
    let value: JsonValue = serde_json::from_str(feed)?;
    load_feed_value(value)
}

pub fn load_feed_reader<R: Read>(reader: R) -> Result<FeedLoad, FeedError> {
    let value: JsonValue = serde_json::from_reader(reader)?;
    load_feed_value(value)
}

pub fn load_feed_path(path: &Path) -> Result<FeedLoad, FeedError> {
    tracing::debug!(path = %path.display(), "reading feed");
    let file = File::open(path)?;
    load_feed_reader(BufReader::new(file))
}

/// Decode each array element on its own so one malformed record does not
/// take the rest of the feed down with it.
pub fn load_feed_value(value: JsonValue) -> Result<FeedLoad, FeedError> {
    let items = match value {
        JsonValue::Array(items) => items,
        other => {
            return Err(FeedError::NotAnArray {
                found: json_kind(&other),
            });
        }
    };

    let mut load = FeedLoad::default();
    for (index, item) in items.into_iter().enumerate() {
        let id = record_id(&item);
        match serde_json::from_value::<RawProduct>(item) {
            Ok(raw) => load.records.push(raw),
            Err(e) => {
                tracing::warn!(record = index, error = %e, "feed record skipped");
                load.rejected.push(RejectedProduct {
                    id,
                    reason: format!("record {index}: {e}"),
                });
            }
        }
    }

    tracing::info!(
        decoded = load.records.len(),
        skipped = load.rejected.len(),
        "feed decoded"
    );
    Ok(load)
}

fn record_id(item: &JsonValue) -> Option<ProductId> {
    match item.get("id")? {
        JsonValue::Number(n) => n.as_u64().map(ProductId::from),
        JsonValue::String(s) => ProductId::new(s.as_str()).ok(),
        _ => None,
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prothunter_catalog::{FilterState, SortKey};

    const SCRAPER_FEED: &str = r#"[
        {
            "id": "myprotein",
            "brand": "MyProtein",
            "name": "Impact Whey Protein",
            "price": 24.99,
            "image": "https://static.thcdn.com/productimg/impact.jpg",
            "weight_kg": 1.0,
            "protein_percent": 72,
            "link": "https://www.myprotein.es/",
            "last_update": "18/10/2026 08:00"
        },
        {
            "id": "hsn",
            "brand": "HSN",
            "name": "Evowhey Protein 2.0",
            "price": 39.9,
            "image": "img/whey-protein.jpg",
            "weight_kg": 2.0,
            "protein_percent": 78,
            "link": "https://www.hsnstore.com/",
            "last_update": "18/10/2026 08:01"
        }
    ]"#;

    #[test]
    fn decodes_scraper_output() {
        let load = load_feed_str(SCRAPER_FEED).unwrap();
        assert_eq!(load.records.len(), 2);
        assert!(load.rejected.is_empty());
        assert_eq!(load.records[1].id.as_str(), "hsn");
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        let feed = r#"[
            {"id": 1, "name": "ok", "brand": "b", "price": 10},
            {"id": 2, "name": "no price", "brand": "b"},
            {"name": "no id", "brand": "b", "price": 5},
            {"id": 4, "name": "object price", "brand": "b", "price": {"amount": 3}}
        ]"#;

        let load = load_feed_str(feed).unwrap();
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.rejected.len(), 3);
        assert_eq!(load.rejected[0].id, Some(ProductId::from(2)));
        assert!(load.rejected[0].reason.starts_with("record 1:"));
        assert_eq!(load.rejected[1].id, None);
        assert_eq!(load.rejected[2].id, Some(ProductId::from(4)));
    }

    #[test]
    fn top_level_object_is_rejected() {
        let err = load_feed_str(r#"{"products": []}"#).unwrap_err();
        assert!(matches!(err, FeedError::NotAnArray { found: "object" }));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(load_feed_str("[{"), Err(FeedError::Json(_))));
    }

    #[test]
    fn reader_and_str_agree() {
        let from_str = load_feed_str(SCRAPER_FEED).unwrap();
        let from_reader = load_feed_reader(SCRAPER_FEED.as_bytes()).unwrap();
        assert_eq!(from_str.records, from_reader.records);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_feed_path(Path::new("/nonexistent/prothunter/data.json")).unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }

    #[test]
    fn into_catalog_merges_decode_and_data_rejections() {
        let feed = r#"[
            {"id": 1, "name": "Whey", "brand": "b", "price": 30, "protein_percent": 80},
            {"id": 2, "name": "Broken", "brand": "b"},
            {"id": 3, "name": "Negative", "brand": "b", "price": -1},
            {"id": 4, "name": "Cheap", "brand": "b", "price": "19,99 €", "protein_percent": 70}
        ]"#;

        let catalog = load_feed_str(feed).unwrap().into_catalog();
        assert_eq!(catalog.len(), 2);

        let rejected: Vec<Option<&str>> = catalog
            .rejected()
            .iter()
            .map(|r| r.id.as_ref().map(ProductId::as_str))
            .collect();
        assert_eq!(rejected, vec![Some("2"), Some("3")]);

        let view = catalog.view(&FilterState::default().with_sort(SortKey::RealValue));
        assert_eq!(view[0].id.as_str(), "4");
    }
}
