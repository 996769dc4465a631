//! Type-preserving parameter patcher
//!
//! Walks a [`Document`] depth-first in document order. Every mapping key
//! that names a pending parameter has its value overwritten and the
//! parameter is removed from the pending set; every other value is
//! descended into. Sequences are descended element by element, tagged nodes
//! are transparent, scalars are leaves.
//!
//! A parameter is consumed by its first match. If the same name occurs again
//! later in traversal order, that occurrence is treated like any other key.
//!
//! # Coercion
//!
//! | original | replacement stored as |
//! |----------|-----------------------|
//! | integer  | integer (signed, or unsigned above `i64::MAX`) if it parses, else string |
//! | float    | float if it parses, else string |
//! | anything else | string |

use crate::document::{Document, Scalar};
use crate::params::PendingUpdates;

/// Apply pending parameters to `document` in place
///
/// Returns the number of parameters applied. Whatever is left in `pending`
/// afterwards was not found in the document.
pub fn patch(document: &mut Document, pending: &mut PendingUpdates) -> usize {
    let before = pending.len();
    walk(document, pending);
    before - pending.len()
}

fn walk(node: &mut Document, pending: &mut PendingUpdates) {
    if pending.is_empty() {
        return;
    }
    match node {
        Document::Mapping(map) => {
            for (key, value) in map.iter_mut() {
                match key.as_str().and_then(|name| pending.take(name)) {
                    Some(replacement) => {
                        tracing::debug!(key = %key, value = %replacement, "applying parameter");
                        *value = coerce(value, replacement);
                    }
                    None => walk(value, pending),
                }
            }
        }
        Document::Sequence(items) => {
            for item in items {
                walk(item, pending);
            }
        }
        Document::Tagged(tagged) => walk(&mut tagged.value, pending),
        Document::Scalar(_) => {}
    }
}

/// Convert a replacement string to the type of the value it replaces
///
/// Numeric replacements that fail to parse degrade to strings.
#[must_use]
pub fn coerce(original: &Document, replacement: String) -> Document {
    let scalar = match original.as_scalar() {
        Some(s) if s.is_integer() => {
            if let Ok(i) = replacement.parse::<i64>() {
                Scalar::Integer(i)
            } else if let Ok(u) = replacement.parse::<u64>() {
                Scalar::Unsigned(u)
            } else {
                Scalar::String(replacement)
            }
        }
        Some(Scalar::Float(_)) => match replacement.parse::<f64>() {
            Ok(f) => Scalar::Float(f),
            Err(_) => Scalar::String(replacement),
        },
        _ => Scalar::String(replacement),
    };
    Document::Scalar(scalar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CommentPolicy;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Document {
        Document::from_yaml_str(text).unwrap()
    }

    fn pending(text: &str) -> PendingUpdates {
        PendingUpdates::parse(text, CommentPolicy::Literal)
    }

    #[test]
    fn nested_key_in_sequence() {
        let mut d = doc("retries: 3\ntimeout: 2.5\nnodes:\n  - name: a\n    limit: 10\n");
        let mut u = pending("limit 99\nmissing 1\n");

        let applied = patch(&mut d, &mut u);

        assert_eq!(applied, 1);
        assert_eq!(
            d,
            doc("retries: 3\ntimeout: 2.5\nnodes:\n  - name: a\n    limit: 99\n")
        );
        assert_eq!(u.iter().collect::<Vec<_>>(), [("missing", "1")]);
    }

    #[test]
    fn integer_with_non_numeric_replacement_becomes_string() {
        let mut d = doc("workers: 5\n");
        let applied = patch(&mut d, &mut pending("workers fast\n"));

        assert_eq!(applied, 1);
        assert_eq!(d.get("workers"), Some(&Document::string("fast")));
    }

    #[test]
    fn wide_integer_keeps_integer_kind() {
        let mut d = doc("MaxBytes: 18446744073709551615\nLimit: 1\n");
        patch(&mut d, &mut pending("MaxBytes 10\nLimit 18446744073709551614\n"));

        assert_eq!(d.get("MaxBytes"), Some(&Document::integer(10)));
        assert_eq!(
            d.get("Limit"),
            Some(&Document::Scalar(Scalar::Unsigned(18_446_744_073_709_551_614)))
        );
    }

    #[test]
    fn float_coercion() {
        let mut d = doc("ratio: 0.5\nscale: 1.0\n");
        patch(&mut d, &mut pending("ratio 3\nscale big\n"));

        assert_eq!(d.get("ratio"), Some(&Document::float(3.0)));
        assert_eq!(d.get("scale"), Some(&Document::string("big")));
    }

    #[test]
    fn non_numeric_originals_take_strings() {
        let mut d = doc("enabled: true\nname: peer0\nempty: ~\n");
        patch(&mut d, &mut pending("enabled false\nname 42\nempty 7\n"));

        assert_eq!(d.get("enabled"), Some(&Document::string("false")));
        assert_eq!(d.get("name"), Some(&Document::string("42")));
        assert_eq!(d.get("empty"), Some(&Document::string("7")));
    }

    #[test]
    fn matched_subtree_is_replaced_wholesale() {
        let mut d = doc("Orderer:\n  BatchSize:\n    MaxMessageCount: 10\n");
        patch(&mut d, &mut pending("BatchSize 4\n"));

        let orderer = d.get("Orderer").unwrap();
        assert_eq!(orderer.get("BatchSize"), Some(&Document::string("4")));
    }

    #[test]
    fn first_match_wins() {
        let mut d = doc("a:\n  port: 1\nb:\n  port: 2\n");
        let applied = patch(&mut d, &mut pending("port 9\n"));

        assert_eq!(applied, 1);
        assert_eq!(d.get("a").unwrap().get("port"), Some(&Document::integer(9)));
        assert_eq!(d.get("b").unwrap().get("port"), Some(&Document::integer(2)));
    }

    #[test]
    fn outer_match_shadows_inner_occurrence() {
        let mut d = doc("limit:\n  limit: 1\n");
        patch(&mut d, &mut pending("limit 5\n"));

        assert_eq!(d.get("limit"), Some(&Document::string("5")));
    }

    #[test]
    fn tagged_content_is_searched() {
        let mut d = doc("policy: !Custom\n  rule: ANY\n");
        patch(&mut d, &mut pending("rule MAJORITY\n"));

        let Some(Document::Tagged(tagged)) = d.get("policy") else {
            panic!("expected tagged node");
        };
        assert_eq!(tagged.value.get("rule"), Some(&Document::string("MAJORITY")));
    }

    #[test]
    fn sequence_root() {
        let mut d = doc("- id: 1\n- id: 2\n");
        let applied = patch(&mut d, &mut pending("id 7\n"));

        assert_eq!(applied, 1);
        assert_eq!(d, doc("- id: 7\n- id: 2\n"));
    }

    #[test]
    fn integer_keys_never_match() {
        let mut d = doc("7051: gossip\n");
        let mut u = pending("7051 x\n");

        assert_eq!(patch(&mut d, &mut u), 0);
        assert!(u.contains("7051"));
    }

    #[test]
    fn empty_pending_is_a_no_op() {
        let mut d = doc("a: 1\n");
        let before = d.clone();
        assert_eq!(patch(&mut d, &mut PendingUpdates::new()), 0);
        assert_eq!(d, before);
    }
}
