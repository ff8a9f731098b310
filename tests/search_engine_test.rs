use basse_catalog::{Catalog, SearchEngine, SearchFilters};

fn engine() -> SearchEngine {
    let json = serde_json::json!({
        "resources": [
            {
                "id": "ex-010", "type": "exercise", "title": "Funk vamp in E",
                "search_text": "funk vamp in e backing track groove",
                "metadata": {"styles": ["Funk"], "level": "débutant",
                             "difficulty": "débutant", "key": "E", "has_mp3": true,
                             "book": "Funk Bass"}
            },
            {
                "id": "ex-011", "type": "exercise", "title": "Walking bass line",
                "search_text": "walking bass line jazz swing",
                "metadata": {"styles": ["Jazz"], "level": "intermédiaire",
                             "book": "Jazz Bass Method"}
            },
            {
                "id": "song-020", "type": "song", "title": "Funky Kingston",
                "search_text": "funky kingston reggae funk",
                "metadata": {"styles": ["Funk", "Reggae"], "level": "débutant",
                             "difficulty": "débutant", "has_mp3": true}
            },
            {
                "id": "concept-030", "type": "concept", "title": "Funk",
                "search_text": "funk style overview sixteenth notes",
                "metadata": {"tags": ["Funk", "Theory"]}
            }
        ]
    });
    let catalog = Catalog::from_json(serde_json::to_vec(&json).unwrap().as_slice()).unwrap();
    SearchEngine::new(catalog)
}

#[test]
fn test_exact_title_ranks_first() {
    let mut engine = engine();
    let hits = engine.search("funk", &SearchFilters::default());

    // "Funk" is an exact title match: +10 title, +5 text, +100 exact, +50 prefix.
    assert_eq!(hits[0].resource.id, "concept-030");
    assert_eq!(hits[0].score, 165);
    // "Funk vamp in E" only gets the prefix bonus on top.
    assert_eq!(hits[1].resource.id, "ex-010");
    assert_eq!(hits[1].score, 65);
}

#[test]
fn test_tie_scores_keep_load_order() {
    let mut engine = engine();
    let filters = SearchFilters {
        style: Some("funk".to_string()),
        ..Default::default()
    };
    let ids: Vec<_> = engine
        .search("", &filters)
        .into_iter()
        .map(|h| h.resource.id)
        .collect();
    assert_eq!(ids, vec!["ex-010", "song-020", "concept-030"]);
}

#[test]
fn test_phrase_and_term_search_differ() {
    let mut engine = engine();

    // Both terms appear in ex-011, in order, adjacent.
    assert_eq!(engine.search_exact("walking bass").len(), 1);
    // "bass line" appears; "line bass" does not.
    assert!(engine.search_exact("line bass").is_empty());
    // As separate terms the order does not matter.
    assert_eq!(engine.search("line bass", &SearchFilters::default()).len(), 1);
}

#[test]
fn test_combined_filters_narrow_results() {
    let mut engine = engine();
    let filters = SearchFilters {
        kind: Some("exercise".to_string()),
        style: Some("funk".to_string()),
        only_mp3: true,
        ..Default::default()
    };
    let hits = engine.search("vamp", &filters);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].resource.id, "ex-010");

    let filters = SearchFilters {
        book: Some("Jazz Bass Method".to_string()),
        ..Default::default()
    };
    assert_eq!(engine.search("", &filters).len(), 1);
}

#[test]
fn test_repeated_query_served_from_cache() {
    let mut engine = engine();
    let filters = SearchFilters {
        kind: Some("song".to_string()),
        ..Default::default()
    };
    let first: Vec<_> = engine
        .search("funky", &filters)
        .into_iter()
        .map(|h| (h.resource.id, h.score))
        .collect();
    let second: Vec<_> = engine
        .search("funky", &filters)
        .into_iter()
        .map(|h| (h.resource.id, h.score))
        .collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
fn test_cache_can_be_disabled() {
    let mut engine = engine().with_cache(false);
    let hits = engine.search("funk", &SearchFilters::default());
    let again = engine.search("funk", &SearchFilters::default());
    assert_eq!(hits.len(), again.len());
}

#[test]
fn test_suggestions_mix_titles_and_tags() {
    let engine = engine();
    let suggestions = engine.suggestions("walk", 10);
    assert_eq!(suggestions, vec!["Walking bass line"]);

    let suggestions = engine.suggestions("reg", 10);
    assert_eq!(suggestions, vec!["Reggae"]);
}

#[test]
fn test_similar_resources_share_tags() {
    let engine = engine();
    let similar = engine.find_similar("song-020", 5).unwrap();
    // ex-010 and concept-030 share "funk"; ex-011 shares nothing.
    let ids: Vec<_> = similar.iter().map(|h| h.resource.id.as_str()).collect();
    assert_eq!(ids, vec!["ex-010", "concept-030"]);
}

#[test]
fn test_similar_for_tagless_resource_is_empty() {
    let json = serde_json::json!({
        "resources": [
            {
                "id": "misc-001", "title": "Untitled scan",
                "metadata": {}
            },
            {
                "id": "ex-010", "type": "exercise", "title": "Funk vamp in E",
                "metadata": {"styles": ["Funk"]}
            }
        ]
    });
    let catalog = Catalog::from_json(serde_json::to_vec(&json).unwrap().as_slice()).unwrap();
    let engine = SearchEngine::new(catalog);

    // No tags on the reference means nothing can overlap.
    assert!(engine.find_similar("misc-001", 5).unwrap().is_empty());
}

#[test]
fn test_stats_and_filters_views() {
    let engine = engine();
    let stats = engine.catalog().stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.with_mp3, 2);
    assert_eq!(stats.by_kind.get("exercise"), Some(&2));
    assert_eq!(stats.by_style.get("Funk"), Some(&2));

    let filters = engine.catalog().available_filters();
    assert_eq!(filters.kinds, vec!["concept", "exercise", "song"]);
    assert_eq!(
        engine.catalog().available_books(),
        vec!["Funk Bass", "Jazz Bass Method"]
    );
}
