//! Document-level `minted` configuration.
//!
//! Goals:
//! - Read the `minted` metadata mapping once per document.
//! - Never fail on bad values: a malformed key keeps its default.
//! - Optionally layer the document over defaults from a `--config` file
//!   (plain YAML, or a Markdown file with YAML front matter).

use crate::ast::{CodeKind, MetaValue};
use crate::error::{FilterError, Result};
use std::fs;
use std::path::Path;

/// Metadata key holding the filter's settings.
pub const META_KEY: &str = "minted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Suppress the implicit `autogobble` on code blocks.
    pub no_default_autogobble: bool,
    pub default_block_language: String,
    pub default_inline_language: String,
    pub block_attributes: Vec<String>,
    pub inline_attributes: Vec<String>,
    /// Leave every inline code span to the host pipeline.
    pub no_mintinline: bool,
    /// Class names accepted as boolean switches on top of the built-in set.
    pub extra_switches: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            no_default_autogobble: false,
            default_block_language: "text".to_string(),
            default_inline_language: "text".to_string(),
            block_attributes: Vec::new(),
            inline_attributes: Vec::new(),
            no_mintinline: false,
            extra_switches: Vec::new(),
        }
    }
}

impl DocumentConfig {
    /// Build a configuration from the `minted` metadata mapping.
    pub fn parse(front_matter: Option<&MetaValue>) -> Self {
        Self::parse_over(&Self::default(), front_matter)
    }

    /// Like [`DocumentConfig::parse`], but keys that are absent or malformed
    /// keep the value from `base` instead of the library default.
    pub fn parse_over(base: &DocumentConfig, front_matter: Option<&MetaValue>) -> Self {
        let mut cfg = base.clone();
        let Some(section) = front_matter else {
            return cfg;
        };
        let MetaValue::Map(entries) = section else {
            tracing::warn!("`{META_KEY}` metadata is not a mapping; using defaults");
            return cfg;
        };

        for (key, value) in entries {
            match key.as_str() {
                "no_default_autogobble" => set_bool(&mut cfg.no_default_autogobble, key, value),
                "no_mintinline" => set_bool(&mut cfg.no_mintinline, key, value),
                "default_block_language" => set_string(&mut cfg.default_block_language, key, value),
                "default_inline_language" => {
                    set_string(&mut cfg.default_inline_language, key, value)
                }
                "block_attributes" => set_list(&mut cfg.block_attributes, key, value),
                "inline_attributes" => set_list(&mut cfg.inline_attributes, key, value),
                "extra_switches" => set_list(&mut cfg.extra_switches, key, value),
                other => tracing::debug!(key = other, "ignoring unknown `{META_KEY}` key"),
            }
        }
        cfg
    }

    /// The attribute list configured for a node kind.
    pub fn attributes_for(&self, kind: CodeKind) -> &[String] {
        match kind {
            CodeKind::Block => &self.block_attributes,
            CodeKind::Inline => &self.inline_attributes,
        }
    }
}

fn set_bool(slot: &mut bool, key: &str, value: &MetaValue) {
    match value.as_bool() {
        Some(b) => *slot = b,
        None => tracing::warn!(key, ?value, "expected a boolean; keeping {slot}"),
    }
}

fn set_string(slot: &mut String, key: &str, value: &MetaValue) {
    match value.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => *slot = s.to_string(),
        _ => tracing::warn!(key, ?value, "expected a non-empty string; keeping {slot:?}"),
    }
}

fn set_list(slot: &mut Vec<String>, key: &str, value: &MetaValue) {
    let MetaValue::List(items) = value else {
        tracing::warn!(key, ?value, "expected a list of strings; keeping defaults");
        return;
    };
    *slot = items
        .iter()
        .filter_map(|item| {
            let s = item.as_str();
            if s.is_none() {
                tracing::warn!(key, ?item, "skipping non-string list entry");
            }
            s.map(str::to_string)
        })
        .collect();
}

/// Load defaults from a config file.
///
/// Accepted layouts:
/// - YAML with a top-level `minted:` mapping.
/// - YAML that *is* the mapping (no `minted:` wrapper).
/// - Markdown with a leading `---` front matter block holding `minted:`.
pub fn load_config_file(path: &Path) -> Result<DocumentConfig> {
    let text = fs::read_to_string(path)?;

    let yaml_text = match split_yaml_frontmatter(&text) {
        Some((fm, _rest)) => extract_yaml_inner(&fm).unwrap_or_default(),
        None => text,
    };

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&yaml_text).map_err(|source| FilterError::Config {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(meta) = MetaValue::from_yaml(&yaml) else {
        // empty file.
        return Ok(DocumentConfig::default());
    };
    let section = meta.get(META_KEY).unwrap_or(&meta);
    Ok(DocumentConfig::parse(Some(section)))
}

/// If `text` starts with YAML frontmatter (`---` ... `---`), return the frontmatter
/// block verbatim (including both `---` lines) and the remainder of the document.
pub fn split_yaml_frontmatter(text: &str) -> Option<(String, &str)> {
    // "---" must be exactly on the first line; accept both \n and \r\n.
    if !(text.starts_with("---\n") || text.starts_with("---\r\n")) {
        return None;
    }

    let mut pos = 0usize;
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    pos += first.len();

    for line in lines {
        pos += line.len();
        let trimmed = line.trim_end_matches(['\n', '\r']);
        // pandoc also accepts `...` as the closing delimiter.
        if trimmed == "---" || trimmed == "..." {
            return Some((text[..pos].to_string(), &text[pos..]));
        }
    }
    None
}

fn extract_yaml_inner(frontmatter_block: &str) -> Option<String> {
    let mut lines = frontmatter_block.lines();
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut out = String::new();
    for line in lines {
        let t = line.trim_end();
        if t == "---" || t == "..." {
            break;
        }
        out.push_str(line);
        out.push('\n');
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> MetaValue {
        MetaValue::String(v.to_string())
    }

    fn map(entries: Vec<(&str, MetaValue)>) -> MetaValue {
        MetaValue::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn absent_front_matter_gives_defaults() {
        let cfg = DocumentConfig::parse(None);
        assert_eq!(cfg, DocumentConfig::default());
        assert_eq!(cfg.default_block_language, "text");
        assert_eq!(cfg.default_inline_language, "text");
        assert!(!cfg.no_default_autogobble);
        assert!(!cfg.no_mintinline);
    }

    #[test]
    fn reads_every_known_key() {
        let fm = map(vec![
            ("no_default_autogobble", MetaValue::Bool(true)),
            ("no_mintinline", MetaValue::Bool(true)),
            ("default_block_language", s("haskell")),
            ("default_inline_language", s("cpp")),
            ("block_attributes", MetaValue::List(vec![s("style=monokai"), s("bgcolor=monokai_bg")])),
            ("inline_attributes", MetaValue::List(vec![s("showspaces")])),
            ("extra_switches", MetaValue::List(vec![s("myswitch")])),
        ]);
        let cfg = DocumentConfig::parse(Some(&fm));
        assert!(cfg.no_default_autogobble);
        assert!(cfg.no_mintinline);
        assert_eq!(cfg.default_block_language, "haskell");
        assert_eq!(cfg.default_inline_language, "cpp");
        assert_eq!(cfg.block_attributes, vec!["style=monokai", "bgcolor=monokai_bg"]);
        assert_eq!(cfg.inline_attributes, vec!["showspaces"]);
        assert_eq!(cfg.extra_switches, vec!["myswitch"]);
    }

    #[test]
    fn attributes_follow_node_kind() {
        let cfg = DocumentConfig {
            block_attributes: vec!["linenos".to_string()],
            inline_attributes: vec!["showspaces".to_string()],
            ..DocumentConfig::default()
        };
        assert_eq!(cfg.attributes_for(CodeKind::Block), ["linenos"]);
        assert_eq!(cfg.attributes_for(CodeKind::Inline), ["showspaces"]);
    }

    #[test]
    fn malformed_values_fall_back() {
        let fm = map(vec![
            ("no_default_autogobble", s("yes")),
            ("default_block_language", s("   ")),
            ("block_attributes", s("showspaces")),
            ("inline_attributes", MetaValue::List(vec![s("linenos"), MetaValue::Bool(true)])),
            ("bogus", MetaValue::Bool(true)),
        ]);
        let cfg = DocumentConfig::parse(Some(&fm));
        assert!(!cfg.no_default_autogobble);
        assert_eq!(cfg.default_block_language, "text");
        assert!(cfg.block_attributes.is_empty());
        assert_eq!(cfg.inline_attributes, vec!["linenos"]);
    }

    #[test]
    fn non_mapping_section_is_ignored() {
        let cfg = DocumentConfig::parse(Some(&MetaValue::Bool(true)));
        assert_eq!(cfg, DocumentConfig::default());
    }

    #[test]
    fn parse_over_keeps_base_for_absent_keys() {
        let base = DocumentConfig {
            default_block_language: "python".to_string(),
            no_mintinline: true,
            ..DocumentConfig::default()
        };
        let fm = map(vec![("no_mintinline", MetaValue::Bool(false))]);
        let cfg = DocumentConfig::parse_over(&base, Some(&fm));
        assert_eq!(cfg.default_block_language, "python");
        assert!(!cfg.no_mintinline);
    }

    #[test]
    fn split_frontmatter_accepts_dots_terminator() {
        let text = "---\nminted:\n  no_mintinline: true\n...\nbody\n";
        let (fm, rest) = split_yaml_frontmatter(text).unwrap();
        assert!(fm.ends_with("...\n"));
        assert_eq!(rest, "body\n");
        assert_eq!(
            extract_yaml_inner(&fm).unwrap(),
            "minted:\n  no_mintinline: true\n"
        );
    }

    #[test]
    fn split_frontmatter_requires_leading_fence() {
        assert!(split_yaml_frontmatter("text\n---\n").is_none());
        assert!(split_yaml_frontmatter("---\nunterminated: true\n").is_none());
    }
}
