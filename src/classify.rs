//! Leaf Classification
//!
//! Decides, for a single schema node, whether the walker stops (scalars and
//! opaque terminals) or descends (records, arrays). Pure shape inspection -
//! no traversal decisions happen here; the walker consumes these
//! classifications together with its array mode and depth bound.

use crate::schema::{Field, ScalarKind, SchemaNode, TerminalKind};

/// Classification of one schema node.
///
/// Borrows the wrapped node for `Array` and `Optional` so classification
/// never copies.
#[derive(Debug, Clone, Copy)]
pub enum NodeClass<'a> {
    /// Scalar leaf: never traversed into.
    Scalar(ScalarKind),
    /// Opaque composite leaf: never traversed into.
    Terminal(TerminalKind),
    /// Record with traversable named fields.
    Record(&'a [Field]),
    /// Array with a single element schema.
    Array(&'a SchemaNode),
    /// Nullable wrapper; traversal unwraps it before classifying again.
    Optional(&'a SchemaNode),
}

impl NodeClass<'_> {
    /// True for the kinds that halt traversal outright.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeClass::Scalar(_) | NodeClass::Terminal(_))
    }
}

/// Classify a schema node. Total over the variant set; pure.
pub fn classify(node: &SchemaNode) -> NodeClass<'_> {
    match node {
        SchemaNode::Scalar { scalar } => NodeClass::Scalar(*scalar),
        SchemaNode::Terminal { terminal } => NodeClass::Terminal(*terminal),
        SchemaNode::Record { fields } => NodeClass::Record(fields),
        SchemaNode::Array { element } => NodeClass::Array(element),
        SchemaNode::Optional { inner } => NodeClass::Optional(inner),
    }
}

/// Whether a node is a leaf once `Optional` wrappers are stripped.
///
/// Fixed precedence for optional-wrapped composites: unwrap, then classify.
/// An `Optional<Array<Record>>` field is therefore an array slot, never a
/// leaf.
pub fn is_leaf(node: &SchemaNode) -> bool {
    classify(node.unwrap_optional()).is_leaf()
}
