use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Optional per-resource metadata as written by the index generators.
/// Older index files carry a scalar `style`, newer ones the plural lists;
/// both appear in the wild so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMetadata {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub style: Option<String>,
    pub level: Option<String>,
    pub difficulty: Option<String>,
    pub book: Option<String>,
    pub category: Option<String>,
    pub key: Option<String>,
    #[serde(default)]
    pub has_mp3: bool,
}

/// One entry of the lesson resource index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
    /// Pre-lowered haystack built by the index generator. Legacy files
    /// use the camelCase key.
    #[serde(default, alias = "searchText")]
    pub search_text: Option<String>,
    #[serde(default)]
    pub metadata: ResourceMetadata,
}

impl Resource {
    /// styles + techniques + tags, lowercased. The matching vocabulary
    /// for style filters, suggestions and similarity.
    pub fn tag_pool(&self) -> Vec<String> {
        self.metadata
            .styles
            .iter()
            .chain(self.metadata.techniques.iter())
            .chain(self.metadata.tags.iter())
            .map(|t| t.to_lowercase())
            .collect()
    }

    /// styles + techniques + tags in their original casing, for display.
    pub fn tag_labels(&self) -> impl Iterator<Item = &String> {
        self.metadata
            .styles
            .iter()
            .chain(self.metadata.techniques.iter())
            .chain(self.metadata.tags.iter())
    }

    /// styles + techniques in original casing. This narrower set feeds
    /// the filter lists and the per-style statistics.
    pub fn style_labels(&self) -> impl Iterator<Item = &String> {
        self.metadata.styles.iter().chain(self.metadata.techniques.iter())
    }

    pub fn haystack(&self) -> &str {
        self.search_text.as_deref().unwrap_or("")
    }
}

/// Header block of the index document. Generators stamp it with a plain
/// ISO timestamp (no offset); unknown keys are kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexMetadata {
    #[serde(default)]
    pub generated: Option<NaiveDateTime>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub total_resources: Option<usize>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The whole index file. A missing `resources` key means an empty index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(default)]
    pub metadata: IndexMetadata,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A search result: the matched resource plus its relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(rename = "_score")]
    pub score: u32,
}

/// Sorted, deduplicated values usable as filter inputs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AvailableFilters {
    pub kinds: Vec<String>,
    pub styles: Vec<String>,
    pub levels: Vec<String>,
}

/// Aggregate counts over the loaded index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub with_mp3: usize,
    pub by_kind: HashMap<String, usize>,
    pub by_style: HashMap<String, usize>,
    pub by_level: HashMap<String, usize>,
    pub by_book: HashMap<String, usize>,
    pub by_difficulty: HashMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_accepts_legacy_search_text_key() {
        let json = r#"{"id":"r1","type":"song","title":"Money","searchText":"money pink floyd"}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.search_text.as_deref(), Some("money pink floyd"));
        assert_eq!(resource.kind, "song");
    }

    #[test]
    fn test_tag_pool_lowercases_all_lists() {
        let resource: Resource = serde_json::from_str(
            r#"{"id":"r1","title":"Groove","metadata":{"styles":["Funk"],"techniques":["Slap"],"tags":["Iconic"]}}"#,
        )
        .unwrap();
        assert_eq!(resource.tag_pool(), vec!["funk", "slap", "iconic"]);
    }

    #[test]
    fn test_document_tolerates_missing_resources() {
        let doc: IndexDocument = serde_json::from_str(r#"{"metadata":{}}"#).unwrap();
        assert!(doc.resources.is_empty());
    }
}
