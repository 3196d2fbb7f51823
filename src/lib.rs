pub mod ast;
pub mod config;
pub mod error;
pub mod render;
pub mod resolve;
pub mod target;
pub mod walk;

use crate::ast::Document;
use crate::config::DocumentConfig;
use crate::render::{RenderContext, frames};
use crate::target::{OutputFormat, RenderTarget};
use std::io::{Read, Write};

pub use error::{FilterError, Result};

/// Options that come from the command line rather than the document.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Defaults the document's own `minted` metadata is layered over.
    pub base_config: DocumentConfig,

    /// Beamer slide level; computed the way pandoc does when `None`.
    pub slide_level: Option<u8>,
}

/// Rewrite every code node of `doc` for `target`.
pub fn filter_document(doc: &mut Document, target: &RenderTarget, opts: &FilterOptions) -> Result<()> {
    if !ast::api_version_supported(&doc.api_version) {
        tracing::warn!(
            version = ?doc.api_version,
            "pandoc-api-version older than {}.{}; output may be wrong",
            ast::MIN_API_VERSION[0],
            ast::MIN_API_VERSION[1]
        );
    }

    let section = doc.meta_value(config::META_KEY);
    let config = DocumentConfig::parse_over(&opts.base_config, section.as_ref());
    tracing::debug!(?config, format = ?target.format, "filter configuration");

    let slide_level = opts
        .slide_level
        .unwrap_or_else(|| frames::slide_level(&doc.blocks));

    let ctx = RenderContext::new(config, *target);
    let rendered = walk::rewrite_blocks(&mut doc.blocks, &ctx)?;

    if target.format == OutputFormat::Beamer {
        let blocks = std::mem::take(&mut doc.blocks);
        doc.blocks = frames::mark_fragile_frames(blocks, &rendered, slide_level)?;
    }

    let count = rendered.iter().filter(|r| **r).count();
    tracing::debug!(blocks_with_minted = count, slide_level, "filter finished");
    Ok(())
}

/// JSON string in, JSON string out.
pub fn filter_json(input: &str, target: &RenderTarget, opts: &FilterOptions) -> Result<String> {
    let mut doc: Document = serde_json::from_str(input)?;
    filter_document(&mut doc, target, opts)?;
    Ok(serde_json::to_string(&doc)?)
}

/// Stream variant used by the binary: read the whole document, filter, write.
pub fn run_filter<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    target: &RenderTarget,
    opts: &FilterOptions,
) -> Result<()> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let output = filter_json(&input, target, opts)?;
    writer.write_all(output.as_bytes())?;
    writer.flush()?;
    Ok(())
}
