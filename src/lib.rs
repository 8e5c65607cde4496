//! Structural Schema Reflection
//!
//! Given a description of a nested data shape, this crate derives related
//! shapes (deep-partial, deep-required) and enumerates valid access paths
//! into it (segment tuples or dot-joined strings), without the caller
//! hand-writing either.
//!
//! ## Features
//!
//! - **One traversal engine**: every operation is a small visitor over the
//!   same bounded-depth recursive walker, so depth limiting and leaf
//!   classification can never drift between variants
//! - **Safe on self-similar shapes**: the walker bounds by path depth, not
//!   node identity, so repeated or tree-like schemas always terminate
//! - **Configurable array handling**: stop at arrays, descend with an
//!   any-index path slot, or pierce arrays transparently
//! - **Pure and shareable**: inputs are never mutated; concurrent walks
//!   over one schema are safe
//!
//! ## Architecture
//!
//! ```text
//! SchemaNode (schema) ──► Walker (walk) ──► classify (classify)
//!                            │
//!                            ├─► derive:  deep_partial / deep_required
//!                            └─► paths:   lookup_paths / lookup_strings
//! ```

pub mod classify;
pub mod derive;
pub mod error;
pub mod paths;
pub mod schema;
pub mod walk;

pub use classify::{classify, is_leaf, NodeClass};
pub use derive::{deep_partial, deep_partial_except, deep_required};
pub use error::{ReflectError, Result};
pub use paths::{lookup_paths, lookup_strings};
pub use schema::{Field, ScalarKind, SchemaNode, TerminalKind};
pub use walk::{
    format_path, ArrayMode, NodeVisitor, Path, PathSegment, WalkConfig, Walker,
    DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH,
};
