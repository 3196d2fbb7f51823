use crate::ast::CodeKind;
use crate::config::DocumentConfig;
use std::collections::HashSet;

/// Switch appended to every block unless suppressed.
pub const AUTOGOBBLE: &str = "autogobble";

/// The name part of an option: `style` for `style=tango`, `linenos` for `linenos`.
pub fn attribute_key(attr: &str) -> &str {
    match attr.split_once('=') {
        Some((key, _)) => key.trim(),
        None => attr.trim(),
    }
}

/// Combine node-level and configured options into the final minted option list.
///
/// Tiers, highest priority first:
/// 1. node `key=value` attributes
/// 2. node switch classes
/// 3. `block_attributes` / `inline_attributes`
/// 4. implicit `autogobble` (blocks only)
///
/// On a key collision the first occurrence is kept where it stands and later
/// ones are dropped.
pub fn merge(
    switches: &[String],
    key_values: &[(String, String)],
    kind: CodeKind,
    config: &DocumentConfig,
) -> Vec<String> {
    let node_kv = key_values.iter().map(|(k, v)| format!("{k}={v}"));
    let node_switches = switches.iter().cloned();
    let configured = config
        .attributes_for(kind)
        .iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for attr in node_kv.chain(node_switches).chain(configured) {
        if seen.insert(attribute_key(&attr).to_string()) {
            out.push(attr);
        }
    }

    if kind == CodeKind::Block && !config.no_default_autogobble && !seen.contains(AUTOGOBBLE) {
        out.push(AUTOGOBBLE.to_string());
    }
    out
}
