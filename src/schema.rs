//! Schema node model
//!
//! The owned, immutable description of a nested data shape. Callers build a
//! `SchemaNode` tree once; the reflection engine only reads it and allocates
//! fresh trees for derived output.

use serde::{Deserialize, Serialize};

/// Scalar kinds: value types with no children of their own.
///
/// `Null` and `Absent` are the absence markers; they classify as scalars so
/// that a field declared as "always null" still halts traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Text,
    Number,
    BigInt,
    Boolean,
    Null,
    Absent,
}

/// Opaque composite kinds treated as leaves.
///
/// These carry internal structure at runtime (a date has components, a map
/// has entries) but expose no traversable field schema, so the walker never
/// descends into them. The set is fixed and exhaustive; extending or
/// shrinking it changes which fields halt recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalKind {
    /// Date/time values.
    DateTime,
    /// Pattern matchers (regular expressions).
    Pattern,
    /// Callables of any signature.
    Callable,
    /// Set-like containers with opaque element types.
    OpaqueSet,
    /// Map-like containers with opaque key/value types.
    OpaqueMap,
    /// Weak references (weak sets, weak maps).
    WeakRef,
}

/// A named field inside a `Record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as it appears in the record.
    pub name: String,
    /// Schema of the field's value.
    pub node: SchemaNode,
}

impl Field {
    pub fn new(name: impl Into<String>, node: SchemaNode) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }
}

/// One position in a shape graph.
///
/// `Optional` wraps another node and marks it nullable/absent-capable; it is
/// transparent to classification and traversal. Field order in a `Record` is
/// insertion order; names must be unique (the walker rejects duplicates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaNode {
    /// A scalar leaf.
    Scalar { scalar: ScalarKind },
    /// An opaque composite leaf.
    Terminal { terminal: TerminalKind },
    /// A record with named fields.
    Record { fields: Vec<Field> },
    /// A homogeneous array; `element` describes every entry.
    Array { element: Box<SchemaNode> },
    /// A nullable/absent-capable wrapper around another node.
    Optional { inner: Box<SchemaNode> },
}

impl SchemaNode {
    pub fn scalar(kind: ScalarKind) -> Self {
        SchemaNode::Scalar { scalar: kind }
    }

    pub fn terminal(kind: TerminalKind) -> Self {
        SchemaNode::Terminal { terminal: kind }
    }

    pub fn text() -> Self {
        Self::scalar(ScalarKind::Text)
    }

    pub fn number() -> Self {
        Self::scalar(ScalarKind::Number)
    }

    pub fn boolean() -> Self {
        Self::scalar(ScalarKind::Boolean)
    }

    /// Build a record from `(name, node)` pairs, preserving order.
    pub fn record<N, I>(fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, SchemaNode)>,
    {
        SchemaNode::Record {
            fields: fields
                .into_iter()
                .map(|(name, node)| Field::new(name, node))
                .collect(),
        }
    }

    pub fn array(element: SchemaNode) -> Self {
        SchemaNode::Array {
            element: Box::new(element),
        }
    }

    /// Wrap in `Optional`. Idempotent: an already-optional node is returned
    /// unchanged, so derived schemas never stack wrappers.
    pub fn optional(self) -> Self {
        if matches!(self, SchemaNode::Optional { .. }) {
            self
        } else {
            SchemaNode::Optional {
                inner: Box::new(self),
            }
        }
    }

    /// Whether the outermost layer is an `Optional` wrapper.
    pub fn is_optional(&self) -> bool {
        matches!(self, SchemaNode::Optional { .. })
    }

    /// Strip every `Optional` layer and return the underlying node.
    pub fn unwrap_optional(&self) -> &SchemaNode {
        let mut node = self;
        while let SchemaNode::Optional { inner } = node {
            node = inner;
        }
        node
    }

    /// Look up a direct field of a record (optional-transparent).
    pub fn field(&self, name: &str) -> Option<&SchemaNode> {
        match self.unwrap_optional() {
            SchemaNode::Record { fields } => {
                fields.iter().find(|f| f.name == name).map(|f| &f.node)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_is_idempotent() {
        let once = SchemaNode::text().optional();
        let twice = once.clone().optional();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unwrap_optional_strips_all_layers() {
        let node = SchemaNode::Optional {
            inner: Box::new(SchemaNode::Optional {
                inner: Box::new(SchemaNode::number()),
            }),
        };
        assert_eq!(node.unwrap_optional(), &SchemaNode::number());
    }

    #[test]
    fn test_field_lookup_through_optional() {
        let schema = SchemaNode::record([("a", SchemaNode::text())]).optional();
        assert_eq!(schema.field("a"), Some(&SchemaNode::text()));
        assert_eq!(schema.field("missing"), None);
    }

    #[test]
    fn test_record_preserves_field_order() {
        let schema = SchemaNode::record([
            ("z", SchemaNode::text()),
            ("a", SchemaNode::number()),
        ]);
        match schema {
            SchemaNode::Record { fields } => {
                assert_eq!(fields[0].name, "z");
                assert_eq!(fields[1].name, "a");
            }
            other => panic!("Expected Record, got {:?}", other),
        }
    }
}
