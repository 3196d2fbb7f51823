//! Pandoc JSON AST boundary.
//!
//! This module defines the **contract** between:
//! 1) the pandoc process that hands us its document as JSON, and
//! 2) the resolution/rendering engine that only understands code nodes.
//!
//! Design goals:
//! - Typed views only for the elements the filter reads or rewrites
//!   (`CodeBlock`, `Code`, `Header`, `HorizontalRule`, metadata).
//! - Every other element is kept as an opaque `serde_json::Value`, so the
//!   output stays faithful to whatever pandoc version produced the input.

mod meta;
mod nodes;

pub use meta::*;
pub use nodes::*;

/// Oldest `pandoc-api-version` (major, minor) whose `Attr`/`CodeBlock`/`Code`
/// layout matches what this filter reads.
pub const MIN_API_VERSION: [u32; 2] = [1, 17];

/// Whether a document's `pandoc-api-version` is at least [`MIN_API_VERSION`].
pub fn api_version_supported(version: &[u32]) -> bool {
    let major = version.first().copied().unwrap_or(0);
    let minor = version.get(1).copied().unwrap_or(0);
    (major, minor) >= (MIN_API_VERSION[0], MIN_API_VERSION[1])
}
