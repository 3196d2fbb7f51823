use crate::ast::{CodeKind, CodeNode};
use crate::config::DocumentConfig;
use crate::resolve::Classified;
use crate::target::RenderTarget;

/// Inline delimiters tried in order by `\mintinline`; the first one absent
/// from the code wins.
const INLINE_DELIMITERS: &str =
    "|!@#^&*-=+0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// What happens to a single code node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit a `minted` environment or `\mintinline` command.
    Render,
    /// Strip minted-specific attributes and leave the node to the host.
    PassThrough,
}

/// Pick the first usable `\mintinline` delimiter for `code`.
pub fn inline_delimiter(code: &str) -> Option<char> {
    INLINE_DELIMITERS.chars().find(|d| !code.contains(*d))
}

/// Render or pass through, given the node's already classified classes.
pub fn decide(
    node: &CodeNode,
    classified: &Classified,
    config: &DocumentConfig,
    target: &RenderTarget,
) -> Action {
    if !target.format.supports_minted() {
        return Action::PassThrough;
    }

    match node.kind {
        CodeKind::Block => Action::Render,
        CodeKind::Inline => {
            if classified.no_minted || config.no_mintinline {
                return Action::PassThrough;
            }
            if inline_delimiter(&node.content).is_none() {
                tracing::warn!(
                    code = %node.content,
                    "no free \\mintinline delimiter; leaving inline code to the host"
                );
                return Action::PassThrough;
            }
            Action::Render
        }
    }
}
