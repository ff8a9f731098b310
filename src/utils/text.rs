//! String helpers shared by the search engine: query normalization,
//! whitespace tokenization and quoted-phrase handling.

/// Lowercase and trim a raw query string.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A query containing a double quote anywhere is treated as a phrase query.
pub fn is_phrase_query(query: &str) -> bool {
    query.contains('"')
}

/// Strip every double quote. Unbalanced quotes are tolerated.
pub fn strip_quotes(query: &str) -> String {
    query.replace('"', "")
}

/// Split a normalized query into non-empty terms.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Walking Bass  "), "walking bass");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_phrase_detection() {
        assert!(is_phrase_query("\"slap funk\""));
        assert!(is_phrase_query("slap\" funk"));
        assert!(!is_phrase_query("slap funk"));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"slap funk\""), "slap funk");
        assert_eq!(strip_quotes("slap\"funk"), "slapfunk");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("walking  bass line"), vec!["walking", "bass", "line"]);
        assert!(tokenize("   ").is_empty());
    }
}
