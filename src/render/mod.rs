//! Code node -> replacement node synthesis.
//!
//! This module operates **only** on one code node at a time; the single
//! cross-node concern (beamer frame fragility) lives in [`frames`].

pub mod frames;

use crate::ast::*;
use crate::config::DocumentConfig;
use crate::resolve::{self, Action, SwitchSet};
use crate::target::RenderTarget;
use serde_json::Value;

/// Raw format used for emitted minted commands (also accepted by beamer).
const RAW_FORMAT: &str = "latex";

/// Everything a node needs that is fixed for the whole document.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub config: DocumentConfig,
    pub switches: SwitchSet,
    pub target: RenderTarget,
}

impl RenderContext {
    pub fn new(config: DocumentConfig, target: RenderTarget) -> Self {
        let switches = SwitchSet::new(&config);
        Self {
            config,
            switches,
            target,
        }
    }
}

/// The node that replaces a code element in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub node: Value,
    /// True when a minted command was emitted (drives frame fragility).
    pub rendered: bool,
}

/// Run one code node through classify -> language -> merge -> decide -> synthesize.
pub fn rewrite_code(node: &CodeNode, ctx: &RenderContext) -> Replacement {
    let classified = resolve::classify(node, &ctx.switches);
    let language = resolve::resolve_language(classified.language.as_deref(), node.kind, &ctx.config);
    let attrs = resolve::merge(&classified.switches, &classified.key_values, node.kind, &ctx.config);
    let action = resolve::decide(node, &classified, &ctx.config, &ctx.target);

    tracing::trace!(kind = ?node.kind, %language, ?attrs, ?action, "resolved code node");
    synthesize(node, &language, &attrs, action, &ctx.target)
}

pub fn synthesize(
    node: &CodeNode,
    language: &str,
    attrs: &[String],
    action: Action,
    target: &RenderTarget,
) -> Replacement {
    if action == Action::Render {
        let options = attrs.join(",");
        match node.kind {
            CodeKind::Block => {
                let text = format!(
                    "\\begin{{minted}}[{options}]{{{language}}}\n{}\n\\end{{minted}}",
                    node.content
                );
                return Replacement {
                    node: raw_element(CodeKind::Block, RAW_FORMAT, &text),
                    rendered: true,
                };
            }
            CodeKind::Inline => {
                if let Some(d) = resolve::inline_delimiter(&node.content) {
                    let text =
                        format!("\\mintinline[{options}]{{{language}}}{d}{}{d}", node.content);
                    return Replacement {
                        node: raw_element(CodeKind::Inline, RAW_FORMAT, &text),
                        rendered: true,
                    };
                }
                // decide() already routes delimiter-less code here; keep the
                // synthesizer total regardless.
            }
        }
    }

    tracing::trace!(
        host_highlighting = target.highlighting_enabled,
        "leaving code node to the host writer"
    );
    Replacement {
        node: code_element(node.kind, &pass_through_attr(node), &node.content),
        rendered: false,
    }
}

/// Attributes left on a code node handed back to the host: the identifier and
/// the language tag. Whether the host styles it is up to the host writer.
fn pass_through_attr(node: &CodeNode) -> Attr {
    Attr {
        identifier: node.identifier.clone(),
        classes: node.language.iter().cloned().collect(),
        attributes: Vec::new(),
    }
}
