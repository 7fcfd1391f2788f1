use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::field::date;
use crate::item::{BibRecord, DEFAULT_KEY, ItemType, NO_DATE, UNKNOWN_AUTHOR, creators_of, text_of};

/// Citation key to record, in the order items appear in the source.
pub type Bibliography = IndexMap<String, BibRecord>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("bibliography source is empty")]
    Empty,
    #[error("bibliography is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bibliography JSON has no `items` array")]
    MissingItems,
}

/// Parse an exported items blob.
///
/// Items without a `citationKey` are stored under `"unknown"`; when keys repeat, the later item
/// replaces the earlier one but keeps its position.
pub fn try_load(blob: impl AsRef<[u8]>) -> Result<Bibliography, LoadError> {
    let bytes = blob.as_ref();
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty);
    }

    let doc: Value = serde_json::from_slice(bytes)?;
    let items = doc
        .get("items")
        .and_then(Value::as_array)
        .ok_or(LoadError::MissingItems)?;

    let mut bib = Bibliography::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let Some(record) = record_from_item(item) else {
            debug!(index = idx, "skipping bibliography item that is not an object");
            continue;
        };
        if bib.contains_key(&record.key) {
            debug!(key = %record.key, "duplicate citation key, later item wins");
        }
        bib.insert(record.key.clone(), record);
    }
    Ok(bib)
}

/// Like [`try_load`], but an unusable source yields an empty bibliography.
pub fn load(blob: impl AsRef<[u8]>) -> Bibliography {
    match try_load(blob) {
        Ok(bib) => bib,
        Err(LoadError::Empty) => Bibliography::new(),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable bibliography");
            Bibliography::new()
        }
    }
}

pub fn record_from_item(item: &Value) -> Option<BibRecord> {
    let fields = item.as_object()?;
    let key = fields
        .get("citationKey")
        .and_then(text_of)
        .unwrap_or_else(|| DEFAULT_KEY.to_string());
    let item_type = fields
        .get("itemType")
        .and_then(Value::as_str)
        .map(ItemType::from)
        .unwrap_or_else(|| ItemType::Other("misc".to_string()));

    let creators = creators_of(fields);
    let display_author = creators
        .first()
        .and_then(|c| c.sort_name())
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string();
    let mut all_author_names: Vec<String> = creators
        .iter()
        .filter_map(|c| c.sort_name().map(str::to_string))
        .collect();
    if all_author_names.is_empty() {
        all_author_names.push(UNKNOWN_AUTHOR.to_string());
    }
    all_author_names.sort();

    let display_year = fields
        .get("date")
        .and_then(text_of)
        .map(|d| date::display_year(&d))
        .unwrap_or_else(|| NO_DATE.to_string());

    Some(BibRecord {
        key,
        item_type,
        display_author,
        all_author_names,
        display_year,
        fields: fields.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_items_in_source_order() {
        let blob = r#"{"items": [
            {"citationKey": "b", "itemType": "book", "date": "2001",
             "creators": [{"lastName": "Walker", "firstName": "J."}]},
            {"citationKey": "a", "itemType": "journalArticle", "date": "2020-03-15",
             "creators": [{"name": "ACME"}, {"lastName": "Baker"}]}
        ]}"#;
        let bib = try_load(blob).unwrap();
        assert_eq!(bib.keys().collect::<Vec<_>>(), ["b", "a"]);

        let a = &bib["a"];
        assert_eq!(a.item_type, ItemType::JournalArticle);
        assert_eq!(a.display_author, "ACME");
        assert_eq!(a.all_author_names, ["ACME", "Baker"]);
        assert_eq!(a.display_year, "2020, March 15");
        assert_eq!(bib["b"].display_year, "2001");
    }

    #[test]
    fn missing_fields_fall_back() {
        let bib = try_load(r#"{"items": [{"title": "Anonymous"}]}"#).unwrap();
        let r = &bib[DEFAULT_KEY];
        assert_eq!(r.item_type.as_str(), "misc");
        assert_eq!(r.display_author, UNKNOWN_AUTHOR);
        assert_eq!(r.all_author_names, [UNKNOWN_AUTHOR]);
        assert_eq!(r.display_year, NO_DATE);
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let blob = r#"{"items": [
            {"title": "first"}, {"citationKey": "x"}, {"title": "second"}
        ]}"#;
        let bib = try_load(blob).unwrap();
        assert_eq!(bib.keys().collect::<Vec<_>>(), [DEFAULT_KEY, "x"]);
        assert_eq!(bib[DEFAULT_KEY].field("title").as_deref(), Some("second"));
    }

    #[test]
    fn unusable_sources_degrade_to_empty() {
        assert!(matches!(try_load(""), Err(LoadError::Empty)));
        assert!(matches!(try_load("  \n"), Err(LoadError::Empty)));
        assert!(matches!(try_load("{not json"), Err(LoadError::Json(_))));
        assert!(matches!(try_load(r#"{"entries": []}"#), Err(LoadError::MissingItems)));
        assert!(matches!(try_load(r#"{"items": {}}"#), Err(LoadError::MissingItems)));
        assert!(load("@book{x, title={BibTeX}}").is_empty());
    }

    #[test]
    fn accepts_bytes_with_byte_order_mark() {
        let mut blob = b"\xEF\xBB\xBF".to_vec();
        blob.extend_from_slice(br#"{"items": [{"citationKey": "k"}]}"#);
        assert_eq!(load(&blob).len(), 1);
    }

    #[test]
    fn one_record_per_distinct_key() {
        proptest::proptest!(|(keys in proptest::collection::vec("[A-Za-z0-9_-]{1,8}", 0..16))| {
            let items: Vec<Value> = keys
                .iter()
                .map(|k| serde_json::json!({ "citationKey": k }))
                .collect();
            let blob = serde_json::json!({ "items": items }).to_string();
            let bib = load(&blob);
            let mut distinct = keys.clone();
            distinct.sort();
            distinct.dedup();
            proptest::prop_assert_eq!(bib.len(), distinct.len());
        })
    }
}
