//! Filter-expression term parser.
//!
//! Filter expressions encode ad-hoc criteria as a flat string: pairs are
//! separated by `#`, key and value by the first `=` within a pair, e.g.
//! `title=rust#status=OPEN`. Values may contain `=` but there is no escaping
//! mechanism, so a value cannot contain a literal `#`.

use std::collections::BTreeMap;

/// Parse a raw filter expression into a term map.
///
/// Splits on `#`, drops empty or whitespace-only segments, then splits each
/// segment on its first `=` and trims both sides. Segments without `=`, or
/// with an empty key or value after trimming, are silently dropped: malformed
/// fragments are tolerated, not errors. On duplicate keys the last occurrence
/// wins.
///
/// An empty expression yields an empty map.
pub fn parse_terms(expression: &str) -> BTreeMap<String, String> {
    let mut terms = BTreeMap::new();
    for segment in expression.split('#') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        terms.insert(key.to_string(), value.to_string());
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_expression_yields_empty_map() {
        assert!(parse_terms("").is_empty());
        assert!(parse_terms("   ").is_empty());
        assert!(parse_terms("###").is_empty());
    }

    #[test]
    fn splits_pairs_on_hash_and_first_equals() {
        assert_eq!(parse_terms("a=1#b=2"), map(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn value_may_contain_equals() {
        assert_eq!(parse_terms("a=1=x"), map(&[("a", "1=x")]));
    }

    #[test]
    fn malformed_segments_are_dropped_silently() {
        // segment without '=', whitespace-only segment, empty value
        assert_eq!(parse_terms("a=1=x#bad#  #c="), map(&[("a", "1=x")]));
        assert_eq!(parse_terms("=v#k="), BTreeMap::new());
    }

    #[test]
    fn keys_and_values_are_trimmed() {
        assert_eq!(
            parse_terms("  title =  rust async  # status = OPEN "),
            map(&[("title", "rust async"), ("status", "OPEN")])
        );
    }

    #[test]
    fn duplicate_keys_last_occurrence_wins() {
        assert_eq!(parse_terms("a=1#a=2"), map(&[("a", "2")]));
    }

    #[test]
    fn never_produces_empty_keys_or_values() {
        for expr in ["=", " = ", "#=#", "a=#=b", "  #  =  #  "] {
            for (k, v) in parse_terms(expr) {
                assert!(!k.trim().is_empty());
                assert!(!v.trim().is_empty());
            }
        }
    }
}
