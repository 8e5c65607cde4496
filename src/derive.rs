//! Shape Derivation
//!
//! Walker configurations that rebuild a schema tree with transformed
//! optionality: deep-partial (every reachable record field becomes
//! optional), deep-required (every `Optional` wrapper within the depth
//! bound is stripped), and the keep-some variant layered on deep-partial.
//!
//! Derivation always pierces arrays: element schemas are rewritten in
//! place and the array structure is preserved.

use tracing::debug;

use crate::error::Result;
use crate::schema::{Field, SchemaNode};
use crate::walk::{ArrayMode, NodeVisitor, PathSegment, WalkConfig, Walker};

/// Marks every record field optional, recursively.
struct DeepPartial;

impl NodeVisitor for DeepPartial {
    type Output = SchemaNode;

    fn at_leaf(&mut self, node: &SchemaNode, _path: &[PathSegment]) -> SchemaNode {
        // Leaves and depth-exhausted subtrees are copied unchanged; the
        // parent fold still marks the field optional.
        node.clone()
    }

    fn at_composite(&mut self, _node: &SchemaNode, _path: &[PathSegment]) {}

    fn fold_record(&mut self, fields: Vec<(String, SchemaNode)>) -> SchemaNode {
        SchemaNode::Record {
            fields: fields
                .into_iter()
                .map(|(name, node)| Field::new(name, node.optional()))
                .collect(),
        }
    }

    fn fold_array(&mut self, element: SchemaNode) -> SchemaNode {
        SchemaNode::array(element)
    }

    fn fold_optional(&mut self, inner: SchemaNode) -> SchemaNode {
        inner.optional()
    }
}

/// Strips optionality from every field and wrapper, recursively.
struct DeepRequired;

impl NodeVisitor for DeepRequired {
    type Output = SchemaNode;

    fn at_leaf(&mut self, node: &SchemaNode, _path: &[PathSegment]) -> SchemaNode {
        // The walker already stripped the slot's own wrapper; anything
        // below the depth bound stays as-is.
        node.clone()
    }

    fn at_composite(&mut self, _node: &SchemaNode, _path: &[PathSegment]) {}

    fn fold_record(&mut self, fields: Vec<(String, SchemaNode)>) -> SchemaNode {
        SchemaNode::Record {
            fields: fields
                .into_iter()
                .map(|(name, node)| Field::new(name, node))
                .collect(),
        }
    }

    fn fold_array(&mut self, element: SchemaNode) -> SchemaNode {
        SchemaNode::array(element)
    }

    fn fold_optional(&mut self, inner: SchemaNode) -> SchemaNode {
        // Dropping the wrapper is the whole derivation.
        inner
    }
}

fn derivation_config(max_depth: usize) -> WalkConfig {
    WalkConfig::new(max_depth, ArrayMode::PierceWithoutIndexSlot)
}

/// Derive the deep-partial of a schema: every record field reachable within
/// `max_depth` becomes optional. Idempotent; existing wrappers are kept.
pub fn deep_partial(schema: &SchemaNode, max_depth: usize) -> Result<SchemaNode> {
    debug!(max_depth, "deriving deep-partial schema");
    let walker = Walker::new(derivation_config(max_depth))?;
    walker.walk(schema, &mut DeepPartial)
}

/// Derive the deep-required of a schema: every `Optional` wrapper reachable
/// within `max_depth` is removed. Leaves are copied unchanged.
pub fn deep_required(schema: &SchemaNode, max_depth: usize) -> Result<SchemaNode> {
    debug!(max_depth, "deriving deep-required schema");
    let walker = Walker::new(derivation_config(max_depth))?;
    walker.walk(schema, &mut DeepRequired)
}

/// Deep-partial, except that the named top-level fields keep their original
/// schema and optionality. Names that match no field are ignored; non-record
/// roots are derived as-is.
pub fn deep_partial_except(
    schema: &SchemaNode,
    keep: &[&str],
    max_depth: usize,
) -> Result<SchemaNode> {
    debug!(max_depth, ?keep, "deriving deep-partial-except schema");
    let fields = match deep_partial(schema, max_depth)? {
        SchemaNode::Record { fields } => fields,
        other => return Ok(other),
    };
    let restored = fields
        .into_iter()
        .map(|field| {
            if keep.contains(&field.name.as_str()) {
                match schema.field(&field.name) {
                    Some(original) => Field::new(field.name, original.clone()),
                    None => field,
                }
            } else {
                field
            }
        })
        .collect();
    Ok(SchemaNode::Record { fields: restored })
}
