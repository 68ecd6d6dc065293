//! JSON tree → flat records.

use crate::model::FlatRecord;
use crate::tree::{TranslationTree, child, is_truthy, leaf_text};
use serde_json::Value;

/// How a tree relates to the base language when it is flattened.
#[derive(Clone, Copy, Debug)]
pub enum FlattenRole<'a> {
    /// The tree is the base language: its values fill the `English` column.
    Base,
    /// The tree is a translation. `English` is looked up in `base` at the same path.
    Translation { base: Option<&'a TranslationTree> },
}

/// Flatten `tree` into one record per truthy leaf, depth first, in key order.
///
/// Keys take the form `<logical_id>:<dotted.path>`. Falsy leaves (`""`, `null`,
/// `0`, `false`) are dropped.
pub fn flatten(tree: &TranslationTree, logical_id: &str, role: FlattenRole<'_>) -> Vec<FlatRecord> {
    let mut walker = Walker {
        logical_id,
        role,
        path: Vec::new(),
        records: Vec::new(),
    };

    for (key, value) in tree.as_map() {
        let base = match role {
            FlattenRole::Translation { base: Some(base) } => base.as_map().get(key),
            _ => None,
        };
        walker.visit(key, value, base);
    }

    walker.records
}

struct Walker<'a> {
    logical_id: &'a str,
    role: FlattenRole<'a>,
    path: Vec<String>,
    records: Vec<FlatRecord>,
}

impl Walker<'_> {
    fn visit(&mut self, key: &str, value: &Value, base: Option<&Value>) {
        if !is_truthy(value) {
            return;
        }

        self.path.push(key.to_string());
        match value {
            Value::Object(map) => {
                for (child_key, child_value) in map {
                    let child_base = base.and_then(|b| child(b, child_key));
                    self.visit(child_key, child_value, child_base);
                }
            },
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let index = index.to_string();
                    let child_base = base.and_then(|b| child(b, &index));
                    self.visit(&index, item, child_base);
                }
            },
            leaf => self.emit(leaf, base),
        }
        self.path.pop();
    }

    fn emit(&mut self, leaf: &Value, base: Option<&Value>) {
        let Some(text) = leaf_text(leaf) else {
            return;
        };
        let key = format!("{}:{}", self.logical_id, self.path.join("."));

        let record = match self.role {
            FlattenRole::Base => FlatRecord::base(key, text),
            FlattenRole::Translation { .. } => {
                FlatRecord::translated(key, base.and_then(leaf_text), text)
            },
        };
        self.records.push(record);
    }
}
