use serde_json::{Map, Value};

/// Author label used when an item has no usable creator.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
/// Year label used when an item has no usable date.
pub const NO_DATE: &str = "n.d.";
/// Key assigned to items that carry no `citationKey`.
pub const DEFAULT_KEY: &str = "unknown";

/// One bibliography item, normalised for citation and list rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BibRecord {
    pub key: String,
    pub item_type: ItemType,
    /// First creator's surname, or literal name, or [`UNKNOWN_AUTHOR`].
    pub display_author: String,
    /// Sorted surnames (or literal names) of every creator. Only used to group records for
    /// disambiguation.
    pub all_author_names: Vec<String>,
    /// Derived from the `date` field, possibly carrying a disambiguation letter.
    pub display_year: String,
    /// The item exactly as exported.
    pub fields: Map<String, Value>,
}

impl BibRecord {
    /// Stand-in for a key that is cited but missing from the bibliography.
    pub fn placeholder(key: &str) -> Self {
        BibRecord {
            key: key.to_string(),
            item_type: ItemType::Other("misc".to_string()),
            display_author: key.to_string(),
            all_author_names: vec![key.to_string()],
            display_year: NO_DATE.to_string(),
            fields: Map::new(),
        }
    }

    /// Non-blank textual value of `name`. Numbers are rendered as text.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(text_of)
    }

    pub fn creators(&self) -> Vec<Creator> {
        creators_of(&self.fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemType {
    Book,
    JournalArticle,
    Webpage,
    Presentation,
    Interview,
    BlogPost,
    Podcast,
    Film,
    NewspaperArticle,
    /// Anything else, including `misc`. Formatted with the generic template.
    Other(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Book => "book",
            ItemType::JournalArticle => "journalArticle",
            ItemType::Webpage => "webpage",
            ItemType::Presentation => "presentation",
            ItemType::Interview => "interview",
            ItemType::BlogPost => "blogPost",
            ItemType::Podcast => "podcast",
            ItemType::Film => "film",
            ItemType::NewspaperArticle => "newspaperArticle",
            ItemType::Other(tag) => tag,
        }
    }
}

impl From<&str> for ItemType {
    fn from(tag: &str) -> Self {
        match tag {
            "book" => ItemType::Book,
            "journalArticle" => ItemType::JournalArticle,
            "webpage" => ItemType::Webpage,
            "presentation" => ItemType::Presentation,
            "interview" => ItemType::Interview,
            "blogPost" => ItemType::BlogPost,
            "podcast" => ItemType::Podcast,
            "film" => ItemType::Film,
            "newspaperArticle" => ItemType::NewspaperArticle,
            other => ItemType::Other(other.to_string()),
        }
    }
}

/// A person or organisation credited on an item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Creator {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    /// Single-field name, used for organisations and mononyms.
    pub name: Option<String>,
}

impl Creator {
    pub fn from_value(value: &Value) -> Option<Creator> {
        let obj = value.as_object()?;
        let get = |k: &str| obj.get(k).and_then(text_of);
        Some(Creator {
            last_name: get("lastName"),
            first_name: get("firstName"),
            name: get("name"),
        })
    }

    /// Surname when present, otherwise the literal name.
    pub fn sort_name(&self) -> Option<&str> {
        self.last_name.as_deref().or(self.name.as_deref())
    }
}

pub(crate) fn creators_of(fields: &Map<String, Value>) -> Vec<Creator> {
    fields
        .get("creators")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Creator::from_value).collect())
        .unwrap_or_default()
}

pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_type_round_trips_known_tags_and_keeps_unknown_ones() {
        for tag in ["book", "journalArticle", "webpage", "podcast", "newspaperArticle"] {
            assert_eq!(ItemType::from(tag).as_str(), tag);
        }
        assert_eq!(ItemType::from("thesis"), ItemType::Other("thesis".to_string()));
        assert_eq!(ItemType::from("misc").as_str(), "misc");
    }

    #[test]
    fn field_treats_blank_strings_as_absent_and_numbers_as_text() {
        let fields = json!({ "title": "  ", "volume": 12, "pages": "3-4" });
        let record = BibRecord {
            fields: fields.as_object().unwrap().clone(),
            ..BibRecord::placeholder("k")
        };
        assert_eq!(record.field("title"), None);
        assert_eq!(record.field("volume").as_deref(), Some("12"));
        assert_eq!(record.field("pages").as_deref(), Some("3-4"));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn creator_prefers_surname_over_literal_name() {
        let c = Creator::from_value(&json!({ "lastName": "Smith", "name": "ACME" })).unwrap();
        assert_eq!(c.sort_name(), Some("Smith"));
        let c = Creator::from_value(&json!({ "name": "ACME", "lastName": "" })).unwrap();
        assert_eq!(c.sort_name(), Some("ACME"));
        assert!(Creator::from_value(&json!("Smith")).is_none());
    }

    #[test]
    fn placeholder_uses_key_as_author() {
        let p = BibRecord::placeholder("Missing-1");
        assert_eq!(p.display_author, "Missing-1");
        assert_eq!(p.display_year, NO_DATE);
    }
}
