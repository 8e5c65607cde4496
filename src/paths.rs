//! Lookup Path Enumeration
//!
//! Walker configurations that emit every valid access path into a schema:
//! as segment tuples ([`lookup_paths`]) or as dot-joined strings
//! ([`lookup_strings`]). Both renderings come from the same traversal, so
//! their members correspond one to one. Paths are emitted at every level:
//! a record field and all of its reachable descendants each contribute one
//! path.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::schema::SchemaNode;
use crate::walk::{format_path, NodeVisitor, Path, PathSegment, WalkConfig, Walker};

/// Accumulates every emitted path. Set semantics: piercing an array of
/// leaves revisits the field path, which must not duplicate.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Path>,
}

impl NodeVisitor for PathCollector {
    type Output = ();

    fn at_leaf(&mut self, _node: &SchemaNode, path: &[PathSegment]) {
        // The empty path is the root itself, not a field route.
        if !path.is_empty() {
            self.paths.insert(path.to_vec());
        }
    }

    fn at_composite(&mut self, _node: &SchemaNode, path: &[PathSegment]) {
        self.paths.insert(path.to_vec());
    }

    fn fold_record(&mut self, _fields: Vec<(String, ())>) {}
    fn fold_array(&mut self, _element: ()) {}
    fn fold_optional(&mut self, _inner: ()) {}
}

/// Enumerate every valid lookup path as a segment tuple, under the
/// configured depth bound and array mode.
pub fn lookup_paths(schema: &SchemaNode, config: &WalkConfig) -> Result<BTreeSet<Path>> {
    debug!(
        max_depth = config.max_depth,
        array_mode = ?config.array_mode,
        "enumerating lookup paths"
    );
    let walker = Walker::new(*config)?;
    let mut collector = PathCollector::default();
    walker.walk(schema, &mut collector)?;
    Ok(collector.paths)
}

/// Enumerate every valid lookup path as a dot-joined string. Array index
/// placeholders render as the any-index marker `*`, never a concrete digit.
pub fn lookup_strings(schema: &SchemaNode, config: &WalkConfig) -> Result<BTreeSet<String>> {
    Ok(lookup_paths(schema, config)?
        .iter()
        .map(|path| format_path(path))
        .collect())
}
