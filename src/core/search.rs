use crate::core::catalog::Catalog;
use crate::domain::model::{Resource, SearchHit};
use crate::utils::error::{CatalogError, Result};
use crate::utils::text;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Filter set accepted by [`SearchEngine::search`]. Every field is
/// optional; an all-default value constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchFilters {
    /// Resource kind ("exercise", "song", "concept", ...). The values
    /// "all" and "" are accepted and mean no constraint.
    pub kind: Option<String>,
    /// Case-insensitive match against the resource tag pool or the
    /// scalar `metadata.style`.
    pub style: Option<String>,
    /// Case-insensitive equality on `metadata.level`.
    pub level: Option<String>,
    pub book: Option<String>,
    pub difficulty: Option<String>,
    /// Musical key, exact match ("C", "Dm", "Eb7", ...).
    pub key: Option<String>,
    pub only_mp3: bool,
    pub limit: Option<usize>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.kind_constraint().is_none()
            && self.style.is_none()
            && self.level.is_none()
            && self.book.is_none()
            && self.difficulty.is_none()
            && self.key.is_none()
            && !self.only_mp3
            && self.limit.is_none()
    }

    fn kind_constraint(&self) -> Option<&str> {
        match self.kind.as_deref() {
            None | Some("") | Some("all") => None,
            Some(kind) => Some(kind),
        }
    }

    fn matches(&self, resource: &Resource) -> bool {
        if let Some(kind) = self.kind_constraint() {
            if resource.kind != kind {
                return false;
            }
        }

        if let Some(style) = &self.style {
            let want = style.to_lowercase();
            let in_pool = resource.tag_pool().contains(&want);
            let scalar = resource
                .metadata
                .style
                .as_deref()
                .is_some_and(|s| s.to_lowercase() == want);
            if !in_pool && !scalar {
                return false;
            }
        }

        if let Some(level) = &self.level {
            let matched = resource
                .metadata
                .level
                .as_deref()
                .is_some_and(|l| l.to_lowercase() == level.to_lowercase());
            if !matched {
                return false;
            }
        }

        if let Some(book) = &self.book {
            if resource.metadata.book.as_deref() != Some(book.as_str()) {
                return false;
            }
        }

        if let Some(difficulty) = &self.difficulty {
            if resource.metadata.difficulty.as_deref() != Some(difficulty.as_str()) {
                return false;
            }
        }

        if let Some(key) = &self.key {
            if resource.metadata.key.as_deref() != Some(key.as_str()) {
                return false;
            }
        }

        if self.only_mp3 && !resource.metadata.has_mp3 {
            return false;
        }

        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    query: String,
    filters: SearchFilters,
}

/// In-memory query engine over a loaded [`Catalog`].
///
/// Full-text matching is plain substring search over the pre-lowered
/// `search_text` haystack and the lowercased title. Relevance is additive:
/// +10 per term in the title, +5 per term in the haystack, +100 for an
/// exact title match, +50 for a title prefix match. Results for a given
/// (query, filters) pair are memoized without bound; the index is small.
pub struct SearchEngine {
    catalog: Catalog,
    cache: HashMap<CacheKey, Vec<(usize, u32)>>,
    cache_enabled: bool,
}

impl SearchEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cache: HashMap::new(),
            cache_enabled: true,
        }
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.catalog.get(id)
    }

    /// Main entry point: keyword search plus filters.
    ///
    /// An empty query with no filters returns the whole catalog in load
    /// order. A query containing a double quote is an exact-phrase search.
    /// Otherwise every whitespace-separated term must appear in the title
    /// or the haystack. Ties keep load order (the sort is stable).
    pub fn search(&mut self, query: &str, filters: &SearchFilters) -> Vec<SearchHit> {
        let normalized = text::normalize(query);

        if normalized.is_empty() && filters.is_empty() {
            return self
                .catalog
                .resources()
                .iter()
                .map(|r| SearchHit {
                    resource: r.clone(),
                    score: 0,
                })
                .collect();
        }

        let key = CacheKey {
            query: normalized.clone(),
            filters: filters.clone(),
        };
        if self.cache_enabled {
            if let Some(cached) = self.cache.get(&key) {
                tracing::debug!("Cache hit for \"{}\"", normalized);
                return self.rehydrate(cached);
            }
        }

        let start = Instant::now();
        let resources = self.catalog.resources();

        let mut matched: Vec<usize> = resources
            .iter()
            .enumerate()
            .filter(|(_, r)| filters.matches(r))
            .map(|(i, _)| i)
            .collect();

        let mut scored: Vec<(usize, u32)> = if normalized.is_empty() {
            matched.into_iter().map(|i| (i, 0)).collect()
        } else {
            if text::is_phrase_query(&normalized) {
                let phrase = text::strip_quotes(&normalized);
                matched.retain(|&i| {
                    let r = &resources[i];
                    r.haystack().contains(&phrase) || r.title.to_lowercase().contains(&phrase)
                });
                Self::score(resources, &matched, &phrase)
            } else {
                let terms = text::tokenize(&normalized);
                matched.retain(|&i| {
                    let r = &resources[i];
                    let title = r.title.to_lowercase();
                    terms
                        .iter()
                        .all(|t| r.haystack().contains(t.as_str()) || title.contains(t.as_str()))
                });
                Self::score(resources, &matched, &normalized)
            }
        };

        if !normalized.is_empty() {
            scored.sort_by(|a, b| b.1.cmp(&a.1));
        }
        if let Some(limit) = filters.limit {
            scored.truncate(limit);
        }

        tracing::debug!(
            "⚡ Search \"{}\": {} results in {:.2?}",
            normalized,
            scored.len(),
            start.elapsed()
        );

        if self.cache_enabled {
            self.cache.insert(key, scored.clone());
        }
        self.rehydrate(&scored)
    }

    /// Exact-phrase search: the whole phrase must appear as a substring.
    pub fn search_exact(&mut self, phrase: &str) -> Vec<SearchHit> {
        self.search(&format!("\"{}\"", phrase), &SearchFilters::default())
    }

    /// Auto-complete candidates: titles and tag labels containing the
    /// partial input, first-seen order, deduplicated. Inputs shorter than
    /// two characters yield nothing.
    pub fn suggestions(&self, partial: &str, limit: usize) -> Vec<String> {
        if partial.chars().count() < 2 {
            return Vec::new();
        }

        let lower = partial.to_lowercase();
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for resource in self.catalog.resources() {
            if resource.title.to_lowercase().contains(&lower) && seen.insert(resource.title.clone())
            {
                suggestions.push(resource.title.clone());
            }

            for tag in resource.tag_labels() {
                if tag.to_lowercase().contains(&lower) && seen.insert(tag.clone()) {
                    suggestions.push(tag.clone());
                }
            }
        }

        suggestions.truncate(limit);
        suggestions
    }

    /// Rank other resources by how many tag-pool entries they share with
    /// the given one. Zero overlap is dropped. A tagless reference yields
    /// an empty list.
    pub fn find_similar(&self, id: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let reference = self.catalog.get(id).ok_or_else(|| CatalogError::UnknownResource {
            id: id.to_string(),
        })?;

        let reference_tags = reference.tag_pool();
        if reference_tags.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(usize, u32)> = self
            .catalog
            .resources()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.id != reference.id)
            .filter_map(|(i, r)| {
                let overlap = r
                    .tag_pool()
                    .iter()
                    .filter(|t| reference_tags.contains(t))
                    .count() as u32;
                (overlap > 0).then_some((i, overlap))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        Ok(self.rehydrate(&ranked))
    }

    fn score(resources: &[Resource], matched: &[usize], query: &str) -> Vec<(usize, u32)> {
        let terms = text::tokenize(query);
        matched
            .iter()
            .map(|&i| {
                let resource = &resources[i];
                let title = resource.title.to_lowercase();
                let haystack = resource.haystack();

                let mut score = 0u32;
                for term in &terms {
                    if title.contains(term.as_str()) {
                        score += 10;
                    }
                    if haystack.contains(term.as_str()) {
                        score += 5;
                    }
                }
                if title == query {
                    score += 100;
                }
                if title.starts_with(query) {
                    score += 50;
                }

                (i, score)
            })
            .collect()
    }

    fn rehydrate(&self, scored: &[(usize, u32)]) -> Vec<SearchHit> {
        let resources = self.catalog.resources();
        scored
            .iter()
            .map(|&(i, score)| SearchHit {
                resource: resources[i].clone(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SearchEngine {
        let json = serde_json::json!({
            "resources": [
                {
                    "id": "ex-001", "type": "exercise", "title": "Funk groove",
                    "search_text": "funk groove slap ghost notes",
                    "metadata": {"styles": ["Funk"], "techniques": ["Slap"],
                                 "level": "débutant", "has_mp3": true}
                },
                {
                    "id": "ex-002", "type": "exercise", "title": "Walking line in C",
                    "search_text": "walking line jazz quarter notes",
                    "metadata": {"styles": ["Jazz"], "level": "intermédiaire",
                                 "key": "C", "book": "Jazz Bass Method"}
                },
                {
                    "id": "song-001", "type": "song", "title": "Funky Town",
                    "search_text": "funky town disco funk",
                    "metadata": {"styles": ["Funk", "Disco"], "level": "débutant",
                                 "difficulty": "débutant", "has_mp3": true}
                },
                {
                    "id": "concept-001", "type": "concept", "title": "Ghost notes",
                    "search_text": "ghost notes muting funk technique",
                    "metadata": {"tags": ["Funk", "Technique"]}
                }
            ]
        });
        let catalog = Catalog::from_json(serde_json::to_vec(&json).unwrap().as_slice()).unwrap();
        SearchEngine::new(catalog)
    }

    #[test]
    fn test_empty_query_no_filters_returns_everything() {
        let mut engine = engine();
        let hits = engine.search("", &SearchFilters::default());
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|h| h.score == 0));
        assert_eq!(hits[0].resource.id, "ex-001");
    }

    #[test]
    fn test_all_terms_must_match() {
        let mut engine = engine();
        let hits = engine.search("funk groove", &SearchFilters::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].resource.id, "ex-001");
    }

    #[test]
    fn test_title_matches_outrank_haystack_matches() {
        let mut engine = engine();
        let hits = engine.search("funk", &SearchFilters::default());
        // "Funk groove" gets the +50 prefix bonus on top of title+text hits.
        assert_eq!(hits[0].resource.id, "ex-001");
        assert!(hits[0].score > hits[1].score);
        // concept-001 matches via search_text only.
        assert!(hits.iter().any(|h| h.resource.id == "concept-001" && h.score == 5));
    }

    #[test]
    fn test_exact_title_gets_both_bonuses() {
        let mut engine = engine();
        let hits = engine.search("ghost notes", &SearchFilters::default());
        assert_eq!(hits[0].resource.id, "concept-001");
        // 2 terms in title (+20), 2 in text (+10), exact (+100), prefix (+50).
        assert_eq!(hits[0].score, 180);
    }

    #[test]
    fn test_phrase_search() {
        let mut engine = engine();
        let hits = engine.search("\"quarter notes\"", &SearchFilters::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].resource.id, "ex-002");

        // Terms present separately but not adjacent do not match a phrase.
        let hits = engine.search_exact("groove slap ghost");
        assert_eq!(hits.len(), 1);
        let hits = engine.search_exact("slap quarter");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_kind_filter_all_is_noop() {
        let mut engine = engine();
        let all = SearchFilters {
            kind: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(engine.search("", &all).len(), 4);

        let songs = SearchFilters {
            kind: Some("song".to_string()),
            ..Default::default()
        };
        let hits = engine.search("", &songs);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].resource.id, "song-001");
    }

    #[test]
    fn test_style_filter_covers_tags_and_scalar() {
        let mut engine = engine();
        let filters = SearchFilters {
            style: Some("FUNK".to_string()),
            ..Default::default()
        };
        let ids: Vec<_> = engine
            .search("", &filters)
            .into_iter()
            .map(|h| h.resource.id)
            .collect();
        // tags list counts too: concept-001 carries "Funk" as a plain tag.
        assert_eq!(ids, vec!["ex-001", "song-001", "concept-001"]);
    }

    #[test]
    fn test_level_filter_case_insensitive() {
        let mut engine = engine();
        let filters = SearchFilters {
            level: Some("DÉBUTANT".to_string()),
            ..Default::default()
        };
        assert_eq!(engine.search("", &filters).len(), 2);
    }

    #[test]
    fn test_mp3_key_and_limit_filters() {
        let mut engine = engine();
        let filters = SearchFilters {
            only_mp3: true,
            ..Default::default()
        };
        assert_eq!(engine.search("", &filters).len(), 2);

        let filters = SearchFilters {
            key: Some("C".to_string()),
            ..Default::default()
        };
        assert_eq!(engine.search("", &filters).len(), 1);

        let filters = SearchFilters {
            only_mp3: true,
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(engine.search("", &filters).len(), 1);
    }

    #[test]
    fn test_cache_returns_identical_results() {
        let mut engine = engine();
        let filters = SearchFilters {
            style: Some("funk".to_string()),
            ..Default::default()
        };
        let first: Vec<_> = engine
            .search("groove", &filters)
            .into_iter()
            .map(|h| (h.resource.id, h.score))
            .collect();
        let second: Vec<_> = engine
            .search("groove", &filters)
            .into_iter()
            .map(|h| (h.resource.id, h.score))
            .collect();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_suggestions() {
        let engine = engine();
        assert!(engine.suggestions("f", 10).is_empty());

        let suggestions = engine.suggestions("fun", 10);
        assert!(suggestions.contains(&"Funk groove".to_string()));
        assert!(suggestions.contains(&"Funky Town".to_string()));
        assert!(suggestions.contains(&"Funk".to_string()));
        // Deduplicated even though "Funk" appears on three resources.
        assert_eq!(
            suggestions.iter().filter(|s| s.as_str() == "Funk").count(),
            1
        );

        assert_eq!(engine.suggestions("fun", 2).len(), 2);
    }

    #[test]
    fn test_find_similar_ranks_by_shared_tags() {
        let engine = engine();
        let similar = engine.find_similar("ex-001", 5).unwrap();
        // song-001 and concept-001 share "funk"; ex-002 shares nothing.
        assert_eq!(similar.len(), 2);
        assert!(similar.iter().all(|h| h.score == 1));
        assert!(engine.find_similar("nope", 5).is_err());
    }
}
