//! Typed configuration tree
//!
//! A [`Document`] is an ordered tree of mappings, sequences and tagged
//! scalars. Scalars keep the type they were loaded with so that patching can
//! coerce replacement strings back to it.

use crate::error::DocumentError;
use indexmap::IndexMap;
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Number, Value};
use std::fmt;

/// Ordered mapping node
pub type Mapping = IndexMap<Key, Document>;

/// Mapping key
///
/// Only [`Key::String`] keys can be addressed by a parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// `~` or empty key
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer key
    Integer(i64),
    /// Plain or quoted string key
    String(String),
}

impl Key {
    /// String view of the key, if it is a string key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    fn from_yaml(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::String(s) => Ok(Self::String(s)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .ok_or_else(|| DocumentError::UnsupportedKey(n.to_string())),
            other => Err(DocumentError::UnsupportedKey(format!("{other:?}"))),
        }
    }

    fn to_yaml(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::Number(Number::from(*i)),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("~"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Leaf value with its original type
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `~`, `null` or an empty value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed 64-bit integer
    Integer(i64),
    /// Integer above `i64::MAX`
    Unsigned(u64),
    /// Floating-point number
    Float(f64),
    /// String
    String(String),
}

impl Scalar {
    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Integer(i)
        } else if let Some(u) = n.as_u64() {
            Self::Unsigned(u)
        } else {
            Self::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    /// Whether this is an integer of either width
    #[inline]
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Unsigned(_))
    }

    fn to_yaml(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::Number(Number::from(*i)),
            Self::Unsigned(u) => Value::Number(Number::from(*u)),
            Self::Float(f) => Value::Number(Number::from(*f)),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

/// Node carrying an explicit YAML tag, e.g. `!Ref value`
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedDocument {
    /// Tag including the leading `!`
    pub tag: String,
    /// Tagged content
    pub value: Document,
}

/// Configuration tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Ordered key → node mapping
    Mapping(Mapping),
    /// Ordered list of nodes
    Sequence(Vec<Document>),
    /// Typed leaf
    Scalar(Scalar),
    /// Tagged node
    Tagged(Box<TaggedDocument>),
}

impl Document {
    /// String scalar node
    #[inline]
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(s.into()))
    }

    /// Integer scalar node
    #[inline]
    #[must_use]
    pub fn integer(i: i64) -> Self {
        Self::Scalar(Scalar::Integer(i))
    }

    /// Float scalar node
    #[inline]
    #[must_use]
    pub fn float(f: f64) -> Self {
        Self::Scalar(Scalar::Float(f))
    }

    /// Parse YAML text into a typed tree
    ///
    /// # Errors
    /// Returns error if the text is not valid YAML or uses a mapping key the
    /// tree cannot represent
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::try_from(value)
    }

    /// Render the tree as YAML text
    ///
    /// # Errors
    /// Returns error if the emitter fails
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.to_yaml())
    }

    /// Convert back into a `serde_yaml` value
    #[must_use]
    pub fn to_yaml(&self) -> Value {
        match self {
            Self::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(key, value)| (key.to_yaml(), value.to_yaml()))
                    .collect(),
            ),
            Self::Sequence(items) => Value::Sequence(items.iter().map(Self::to_yaml).collect()),
            Self::Scalar(scalar) => scalar.to_yaml(),
            Self::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
                tag: Tag::new(tagged.tag.clone()),
                value: tagged.value.to_yaml(),
            })),
        }
    }

    /// Child of a mapping node by string key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Self::Mapping(map) => map.get(&Key::from(key)),
            _ => None,
        }
    }

    /// Mutable child of a mapping node by string key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
        match self {
            Self::Mapping(map) => map.get_mut(&Key::from(key)),
            _ => None,
        }
    }

    /// Scalar view of this node
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// String view of this node, if it is a string scalar
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Mutable mapping view of this node
    #[inline]
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::from_number(&n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(Key::from_yaml(key)?, Self::try_from(value)?);
                }
                Self::Mapping(out)
            }
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                Self::Tagged(Box::new(TaggedDocument {
                    tag: tag.to_string(),
                    value: Self::try_from(value)?,
                }))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Document {
        Document::from_yaml_str(text).unwrap()
    }

    #[test]
    fn scalars_keep_their_type() {
        let doc = parse("a: 3\nb: 2.5\nc: text\nd: true\ne: ~\n");

        assert_eq!(doc.get("a"), Some(&Document::integer(3)));
        assert_eq!(doc.get("b"), Some(&Document::float(2.5)));
        assert_eq!(doc.get("c"), Some(&Document::string("text")));
        assert_eq!(doc.get("d"), Some(&Document::Scalar(Scalar::Bool(true))));
        assert_eq!(doc.get("e"), Some(&Document::Scalar(Scalar::Null)));
    }

    #[test]
    fn mapping_order_is_preserved() {
        let doc = parse("zeta: 1\nalpha: 2\nmid: 3\n");
        let Document::Mapping(map) = &doc else {
            panic!("expected mapping");
        };
        let keys: Vec<String> = map.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let out = doc.to_yaml_string().unwrap();
        assert_eq!(out, "zeta: 1\nalpha: 2\nmid: 3\n");
    }

    #[test]
    fn non_string_keys_are_kept() {
        let doc = parse("1: one\ntrue: yes\n");
        let Document::Mapping(map) = &doc else {
            panic!("expected mapping");
        };
        assert!(map.contains_key(&Key::Integer(1)));
        assert!(map.contains_key(&Key::Bool(true)));
        assert_eq!(Key::Integer(1).as_str(), None);
    }

    #[test]
    fn sequence_keys_are_rejected() {
        let result = Document::from_yaml_str("? [1, 2]\n: pair\n");
        assert!(matches!(result, Err(DocumentError::UnsupportedKey(_))));
    }

    #[test]
    fn integers_above_i64_load_as_unsigned() {
        let doc = parse("big: 18446744073709551615\nsmall: -1\n");
        assert_eq!(
            doc.get("big").and_then(Document::as_scalar),
            Some(&Scalar::Unsigned(u64::MAX))
        );
        assert_eq!(doc.get("small"), Some(&Document::integer(-1)));
        assert_eq!(doc.to_yaml_string().unwrap(), "big: 18446744073709551615\nsmall: -1\n");
    }

    #[test]
    fn malformed_yaml_is_a_syntax_error() {
        let result = Document::from_yaml_str("a: [1, 2\n");
        assert!(matches!(result, Err(DocumentError::Syntax(_))));
    }

    #[test]
    fn tagged_nodes_survive_round_trip() {
        let doc = parse("policy: !Ref MajorityAdmins\n");
        let Some(Document::Tagged(tagged)) = doc.get("policy") else {
            panic!("expected tagged node");
        };
        assert_eq!(tagged.tag, "!Ref");
        assert_eq!(tagged.value, Document::string("MajorityAdmins"));

        let reparsed = parse(&doc.to_yaml_string().unwrap());
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn get_on_non_mapping() {
        assert_eq!(Document::integer(1).get("x"), None);
        assert_eq!(Document::string("x").as_str(), Some("x"));
    }
}
