//! Bounded Recursive Walker
//!
//! The shared traversal engine behind every derivation and enumeration
//! operation. One walk is a pure function of (schema, config, visitor): the
//! walker classifies each node, threads an accumulated path and depth
//! counter through the recursion, and hands control to a [`NodeVisitor`] at
//! every leaf and composite boundary. Depth is bounded by the path taken,
//! not by node identity, so structurally self-similar schemas terminate.
//!
//! Array handling is configurable: stop at array fields, descend through
//! elements with an any-index path slot, or pierce arrays transparently.
//! Unwrap-then-classify is the fixed precedence for `Optional` wrappers:
//! an optional array field is an array slot, never a leaf.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{classify, NodeClass};
use crate::error::{ReflectError, Result};
use crate::schema::SchemaNode;

/// Depth bound applied when the caller does not choose one.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Largest accepted depth bound. Walks this deep are already pathological;
/// the entry check keeps configuration failures out of the recursion.
pub const MAX_SUPPORTED_DEPTH: usize = 100;

// =============================================================================
// Path Segments
// =============================================================================

/// A segment in a lookup path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathSegment {
    /// A named record field.
    Key(String),
    /// Placeholder standing for any array index, never a concrete digit.
    Index,
}

impl PathSegment {
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index => write!(f, "*"),
        }
    }
}

/// Ordered route from the schema root to a node.
pub type Path = Vec<PathSegment>;

/// Render a path as a dot-joined string; the empty path is the root.
pub fn format_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return String::from("<root>");
    }
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

// =============================================================================
// Walk Configuration
// =============================================================================

/// How the walker treats array fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMode {
    /// Array fields are leaves; only the path up to the field is visited.
    StopAtArray,
    /// Descend into element schemas, spending an `Index` path slot.
    DescendWithIndexSlot,
    /// Descend into element schemas transparently, no index slot.
    PierceWithoutIndexSlot,
}

/// Immutable configuration for one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Maximum number of record-field descents before remaining nodes are
    /// treated as leaves. Zero visits only the root's direct fields.
    pub max_depth: usize,
    /// Array handling mode.
    pub array_mode: ArrayMode,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            array_mode: ArrayMode::DescendWithIndexSlot,
        }
    }
}

impl WalkConfig {
    pub fn new(max_depth: usize, array_mode: ArrayMode) -> Self {
        Self {
            max_depth,
            array_mode,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_array_mode(mut self, array_mode: ArrayMode) -> Self {
        self.array_mode = array_mode;
        self
    }

    /// Fail fast on out-of-range configuration, before any traversal.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ReflectError::DepthOutOfRange {
                requested: self.max_depth,
                max: MAX_SUPPORTED_DEPTH,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Visitor
// =============================================================================

/// Strategy invoked by the walker at every traversal boundary.
///
/// Derivation visitors rebuild a schema tree bottom-up through the `fold_*`
/// hooks; enumeration visitors accumulate paths in `at_leaf`/`at_composite`
/// and implement the folds as no-ops.
pub trait NodeVisitor {
    /// Per-branch result, assembled bottom-up by the walker.
    type Output;

    /// A position that halts traversal: a scalar/terminal node, an array
    /// under `StopAtArray`, or any node at the depth bound. `node` arrives
    /// with `Optional` wrappers already stripped; `path` includes the field
    /// that led here (empty only for a leaf root).
    fn at_leaf(&mut self, node: &SchemaNode, path: &[PathSegment]) -> Self::Output;

    /// A composite field the walker is about to descend into. `path`
    /// includes the field itself.
    fn at_composite(&mut self, node: &SchemaNode, path: &[PathSegment]);

    /// Rebuild a record from per-field child outputs, in field order.
    fn fold_record(&mut self, fields: Vec<(String, Self::Output)>) -> Self::Output;

    /// Rebuild an array around its element output.
    fn fold_array(&mut self, element: Self::Output) -> Self::Output;

    /// Restore an `Optional` wrapper the walker stripped before descending.
    fn fold_optional(&mut self, inner: Self::Output) -> Self::Output;
}

// =============================================================================
// Walker
// =============================================================================

/// The bounded-depth traversal engine.
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    /// Validate the configuration and build a walker.
    pub fn new(config: WalkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Run one traversal over `root`. The input is never mutated; all
    /// output lives in the visitor and the returned value.
    pub fn walk<V: NodeVisitor>(&self, root: &SchemaNode, visitor: &mut V) -> Result<V::Output> {
        let mut path = Vec::new();
        self.walk_node(root, visitor, &mut path, 0)
    }

    /// Visit `node` (a root or a composite the field loop chose to enter).
    /// `depth` counts record-field descents taken so far; array descent
    /// piggybacks on the field step that entered it and spends no extra
    /// depth unit.
    fn walk_node<V: NodeVisitor>(
        &self,
        node: &SchemaNode,
        visitor: &mut V,
        path: &mut Path,
        depth: usize,
    ) -> Result<V::Output> {
        let inner = node.unwrap_optional();
        let out = match classify(inner) {
            NodeClass::Scalar(_) | NodeClass::Terminal(_) => visitor.at_leaf(inner, path),
            NodeClass::Array(element) => self.walk_array(inner, element, visitor, path, depth)?,
            NodeClass::Record(fields) => {
                let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
                let mut children = Vec::with_capacity(fields.len());
                for field in fields {
                    if !seen.insert(field.name.as_str()) {
                        return Err(ReflectError::DuplicateField {
                            name: field.name.clone(),
                            path: format_path(path),
                        });
                    }
                    path.push(PathSegment::key(&field.name));
                    let child = if depth < self.config.max_depth && self.slot_descends(&field.node)
                    {
                        visitor.at_composite(&field.node, path);
                        self.walk_node(&field.node, visitor, path, depth + 1)?
                    } else {
                        self.leaf_slot(&field.node, visitor, path)
                    };
                    path.pop();
                    children.push((field.name.clone(), child));
                }
                visitor.fold_record(children)
            }
            // unwrap_optional already removed every wrapper
            NodeClass::Optional(_) => unreachable!("optional wrapper survived unwrapping"),
        };
        Ok(if node.is_optional() {
            visitor.fold_optional(out)
        } else {
            out
        })
    }

    fn walk_array<V: NodeVisitor>(
        &self,
        array: &SchemaNode,
        element: &SchemaNode,
        visitor: &mut V,
        path: &mut Path,
        depth: usize,
    ) -> Result<V::Output> {
        match self.config.array_mode {
            // Reachable only for a root-level array; array fields are
            // already leaf slots in this mode.
            ArrayMode::StopAtArray => Ok(visitor.at_leaf(array, path)),
            ArrayMode::DescendWithIndexSlot => {
                if crate::classify::is_leaf(element) {
                    // Array of terminals counts as terminal at this slot.
                    return Ok(visitor.at_leaf(array, path));
                }
                path.push(PathSegment::Index);
                let out = self.walk_node(element, visitor, path, depth)?;
                path.pop();
                Ok(visitor.fold_array(out))
            }
            ArrayMode::PierceWithoutIndexSlot => {
                let out = self.walk_node(element, visitor, path, depth)?;
                Ok(visitor.fold_array(out))
            }
        }
    }

    /// A field slot that halts traversal: unwrap, hand the node to the
    /// visitor as a leaf, restore the wrapper.
    fn leaf_slot<V: NodeVisitor>(
        &self,
        node: &SchemaNode,
        visitor: &mut V,
        path: &[PathSegment],
    ) -> V::Output {
        let out = visitor.at_leaf(node.unwrap_optional(), path);
        if node.is_optional() {
            visitor.fold_optional(out)
        } else {
            out
        }
    }

    /// Whether a field slot is composite under the configured array mode.
    ///
    /// Records always descend. Arrays descend when piercing; under
    /// `DescendWithIndexSlot` only when the element chain eventually
    /// reaches a record (an array of terminals is a terminal slot); under
    /// `StopAtArray` never.
    fn slot_descends(&self, node: &SchemaNode) -> bool {
        match classify(node.unwrap_optional()) {
            NodeClass::Record(_) => true,
            NodeClass::Array(element) => match self.config.array_mode {
                ArrayMode::StopAtArray => false,
                ArrayMode::PierceWithoutIndexSlot => true,
                ArrayMode::DescendWithIndexSlot => self.slot_descends(element),
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;

    /// Counts visitor callbacks; output-free.
    #[derive(Default)]
    struct CountingVisitor {
        leaves: usize,
        composites: usize,
    }

    impl NodeVisitor for CountingVisitor {
        type Output = ();

        fn at_leaf(&mut self, _node: &SchemaNode, _path: &[PathSegment]) {
            self.leaves += 1;
        }

        fn at_composite(&mut self, _node: &SchemaNode, _path: &[PathSegment]) {
            self.composites += 1;
        }

        fn fold_record(&mut self, _fields: Vec<(String, ())>) {}
        fn fold_array(&mut self, _element: ()) {}
        fn fold_optional(&mut self, _inner: ()) {}
    }

    #[test]
    fn test_config_validation_rejects_excessive_depth() {
        let config = WalkConfig::default().with_max_depth(MAX_SUPPORTED_DEPTH + 1);
        match Walker::new(config) {
            Err(ReflectError::DepthOutOfRange { requested, max }) => {
                assert_eq!(requested, MAX_SUPPORTED_DEPTH + 1);
                assert_eq!(max, MAX_SUPPORTED_DEPTH);
            }
            other => panic!("Expected DepthOutOfRange, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_leaf_root_visits_single_leaf() {
        let walker = Walker::new(WalkConfig::default()).unwrap();
        let mut visitor = CountingVisitor::default();
        walker.walk(&SchemaNode::text(), &mut visitor).unwrap();
        assert_eq!(visitor.leaves, 1);
        assert_eq!(visitor.composites, 0);
    }

    #[test]
    fn test_depth_zero_stays_at_direct_fields() {
        let schema = SchemaNode::record([(
            "a",
            SchemaNode::record([("b", SchemaNode::text())]),
        )]);
        let walker = Walker::new(WalkConfig::default().with_max_depth(0)).unwrap();
        let mut visitor = CountingVisitor::default();
        walker.walk(&schema, &mut visitor).unwrap();
        // Field `a` is visited as a leaf; `b` is never reached.
        assert_eq!(visitor.leaves, 1);
        assert_eq!(visitor.composites, 0);
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let schema = SchemaNode::Record {
            fields: vec![
                crate::schema::Field::new("a", SchemaNode::text()),
                crate::schema::Field::new("a", SchemaNode::number()),
            ],
        };
        let walker = Walker::new(WalkConfig::default()).unwrap();
        let mut visitor = CountingVisitor::default();
        match walker.walk(&schema, &mut visitor) {
            Err(ReflectError::DuplicateField { name, path }) => {
                assert_eq!(name, "a");
                assert_eq!(path, "<root>");
            }
            other => panic!("Expected DuplicateField, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "<root>");
        let path = vec![
            PathSegment::key("a"),
            PathSegment::Index,
            PathSegment::key("foo"),
        ];
        assert_eq!(format_path(&path), "a.*.foo");
    }
}
