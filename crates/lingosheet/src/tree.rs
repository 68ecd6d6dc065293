//! Nested translation documents.

use crate::error::SheetError;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::Path;

/// An insertion-ordered JSON object whose leaves are translated strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTree(Map<String, Value>);

impl TranslationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed JSON value. The root must be an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn parse(content: &str) -> Result<Self, SheetError> {
        Self::parse_named(content, "JSON document")
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let content = fs::read_to_string(path)?;
        Self::parse_named(&content, &path.display().to_string())
    }

    fn parse_named(content: &str, name: &str) -> Result<Self, SheetError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value).ok_or_else(|| SheetError::NotAnObject(name.to_string()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the value at `path`. Arrays are addressed by index.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut node = self.0.get(first.as_ref())?;
        for segment in rest {
            node = child(node, segment.as_ref())?;
        }
        Some(node)
    }

    /// The text of the leaf at `path`, if `path` ends on a scalar.
    pub fn leaf_text<S: AsRef<str>>(&self, path: &[S]) -> Option<String> {
        self.get(path).and_then(leaf_text)
    }

    /// Set the leaf at `path` to `value`, creating intermediate objects.
    ///
    /// Returns `false` and leaves the tree untouched when an intermediate
    /// segment already holds something other than an object.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], value: &str) -> bool {
        let Some((leaf, parents)) = path.split_last() else {
            return false;
        };

        let mut node = &mut self.0;
        for segment in parents {
            let Some(inner) = object_slot(node, segment.as_ref()) else {
                return false;
            };
            node = inner;
        }
        node.insert(leaf.as_ref().to_string(), Value::String(value.to_string()));
        true
    }

    /// Serialize with `indent` spaces per level, keeping insertion order.
    pub fn to_pretty_json(&self, indent: usize) -> Result<String, SheetError> {
        let indent = " ".repeat(indent);
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.0.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn write(&self, path: &Path, indent: usize) -> Result<(), SheetError> {
        let content = self.to_pretty_json(indent)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl From<Map<String, Value>> for TranslationTree {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn object_slot<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Option<&'a mut Map<String, Value>> {
    map.entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}

pub(crate) fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Whether a value produces a row when flattened.
///
/// `null`, `false`, `0` and `""` are falsy. Objects and arrays are always
/// truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as cell text. Containers and `null` have no text.
pub fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn tree(value: Value) -> TranslationTree {
        TranslationTree::from_value(value).unwrap()
    }

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(""), false)]
    #[case(json!(true), true)]
    #[case(json!(7), true)]
    #[case(json!("x"), true)]
    #[case(json!({}), true)]
    #[case(json!([]), true)]
    fn test_is_truthy(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(TranslationTree::from_value(json!(["a"])).is_none());
        assert!(TranslationTree::from_value(json!("a")).is_none());
    }

    #[test]
    fn test_parse_reports_non_object_root() {
        let err = TranslationTree::parse("[1, 2]").unwrap_err();
        assert!(matches!(err, SheetError::NotAnObject(_)));
    }

    #[test]
    fn test_get_walks_objects_and_arrays() {
        let t = tree(json!({"a": {"b": ["x", "y"]}}));
        assert_eq!(t.get(&["a", "b", "1"]), Some(&json!("y")));
        assert_eq!(t.get(&["a", "c"]), None);
        assert_eq!(t.get::<&str>(&[]), None);
    }

    #[test]
    fn test_leaf_text_only_for_scalars() {
        let t = tree(json!({"a": {"b": "hi"}, "n": 3, "z": null}));
        assert_eq!(t.leaf_text(&["a", "b"]), Some("hi".to_string()));
        assert_eq!(t.leaf_text(&["n"]), Some("3".to_string()));
        assert_eq!(t.leaf_text(&["a"]), None);
        assert_eq!(t.leaf_text(&["z"]), None);
    }

    #[test]
    fn test_insert_creates_intermediate_objects() {
        let mut t = TranslationTree::new();
        t.insert(&["a", "b", "c"], "deep");
        assert_eq!(t, tree(json!({"a": {"b": {"c": "deep"}}})));
    }

    #[test]
    fn test_insert_keeps_sibling_keys() {
        let mut t = tree(json!({"x": {"y": "old"}}));
        t.insert(&["x", "z"], "new");
        assert_eq!(t, tree(json!({"x": {"y": "old", "z": "new"}})));
    }

    #[test]
    fn test_insert_keeps_leaf_in_the_way() {
        let mut t = tree(json!({"x": "flat", "a": {"b": 0}}));

        assert!(!t.insert(&["x", "y"], "nested"));
        assert!(!t.insert(&["a", "b", "c"], "deeper"));
        assert_eq!(t, tree(json!({"x": "flat", "a": {"b": 0}})));
    }

    #[test]
    fn test_insert_overwrites_matching_leaf() {
        let mut t = tree(json!({"x": {"y": "old"}}));
        assert!(t.insert(&["x", "y"], "new"));
        assert_eq!(t, tree(json!({"x": {"y": "new"}})));
    }

    #[test]
    fn test_to_pretty_json_keeps_insertion_order() {
        let mut t = TranslationTree::new();
        t.insert(&["zeta"], "last letter");
        t.insert(&["alpha", "beta"], "first");

        insta::assert_snapshot!(t.to_pretty_json(4).unwrap(), @r#"
        {
            "zeta": "last letter",
            "alpha": {
                "beta": "first"
            }
        }
        "#);
    }

    #[test]
    fn test_to_pretty_json_empty_tree() {
        assert_eq!(TranslationTree::new().to_pretty_json(4).unwrap(), "{}");
    }
}
