//! Document-order traversal of the pandoc JSON tree.
//!
//! Code can sit anywhere: list items, table cells, notes, divs, figure
//! captions, even citation prefixes. Rather than modelling every container
//! we descend through all arrays and object values and stop at `CodeBlock`
//! / `Code` elements.

use crate::ast::CodeNode;
use crate::error::Result;
use crate::render::{RenderContext, rewrite_code};
use serde_json::Value;

/// Rewrite each top-level block in place.
///
/// Returns one flag per block: whether anything inside it was rendered as a
/// minted command.
pub fn rewrite_blocks(blocks: &mut [Value], ctx: &RenderContext) -> Result<Vec<bool>> {
    blocks.iter_mut().map(|block| rewrite_tree(block, ctx)).collect()
}

/// Rewrite every code element under `value`; true if any was rendered.
pub fn rewrite_tree(value: &mut Value, ctx: &RenderContext) -> Result<bool> {
    match value {
        Value::Array(items) => {
            let mut rendered = false;
            for item in items {
                rendered |= rewrite_tree(item, ctx)?;
            }
            Ok(rendered)
        }
        Value::Object(_) => {
            if let Some(node) = CodeNode::from_element(value)? {
                let replacement = rewrite_code(&node, ctx);
                *value = replacement.node;
                return Ok(replacement.rendered);
            }
            let Value::Object(map) = value else {
                return Ok(false);
            };
            let mut rendered = false;
            for child in map.values_mut() {
                rendered |= rewrite_tree(child, ctx)?;
            }
            Ok(rendered)
        }
        _ => Ok(false),
    }
}
