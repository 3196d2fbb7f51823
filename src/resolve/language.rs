use crate::ast::CodeKind;
use crate::config::DocumentConfig;

/// Last-resort lexer when neither the node nor the configuration names one.
const FALLBACK_LANGUAGE: &str = "text";

/// The lexer name for a node: its own language class if it has one,
/// otherwise the configured default for its kind.
pub fn resolve_language(candidate: Option<&str>, kind: CodeKind, config: &DocumentConfig) -> String {
    if let Some(lang) = candidate
        && !lang.is_empty()
    {
        return lang.to_string();
    }

    let configured = match kind {
        CodeKind::Block => config.default_block_language.as_str(),
        CodeKind::Inline => config.default_inline_language.as_str(),
    };
    if configured.is_empty() {
        FALLBACK_LANGUAGE.to_string()
    } else {
        configured.to_string()
    }
}
