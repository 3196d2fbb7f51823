use crate::ast::MetaValue;
use crate::error::{FilterError, Result};
use crate::resolve::ClassToken;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Root of a pandoc JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "pandoc-api-version")]
    pub api_version: Vec<u32>,

    #[serde(default)]
    pub meta: Map<String, Value>,

    /// Top-level blocks, kept opaque; see [`crate::walk`].
    #[serde(default)]
    pub blocks: Vec<Value>,
}

impl Document {
    /// Look up a top-level metadata entry.
    pub fn meta_value(&self, key: &str) -> Option<MetaValue> {
        self.meta.get(key).and_then(MetaValue::from_json)
    }
}

/// Pandoc `Attr`, serialized as `[identifier, [classes], [[key, value], ...]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AttrRepr", into = "AttrRepr")]
pub struct Attr {
    pub identifier: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

#[derive(Serialize, Deserialize)]
struct AttrRepr(String, Vec<String>, Vec<(String, String)>);

impl From<AttrRepr> for Attr {
    fn from(AttrRepr(identifier, classes, attributes): AttrRepr) -> Self {
        Attr {
            identifier,
            classes,
            attributes,
        }
    }
}

impl From<Attr> for AttrRepr {
    fn from(attr: Attr) -> Self {
        AttrRepr(attr.identifier, attr.classes, attr.attributes)
    }
}

/// Whether a code node is a block (`CodeBlock`) or a span (`Code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    Block,
    Inline,
}

impl CodeKind {
    /// The pandoc element tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            CodeKind::Block => "CodeBlock",
            CodeKind::Inline => "Code",
        }
    }

    pub fn from_tag(tag: &str) -> Option<CodeKind> {
        match tag {
            "CodeBlock" => Some(CodeKind::Block),
            "Code" => Some(CodeKind::Inline),
            _ => None,
        }
    }
}

/// A code element lifted out of the JSON tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeNode {
    pub kind: CodeKind,
    pub identifier: String,

    /// Leading class token, unless that token is a control class.
    pub language: Option<String>,

    /// Remaining classes in source order (language excluded).
    pub classes: Vec<String>,

    pub key_values: Vec<(String, String)>,

    /// Raw code text, never modified by the filter.
    pub content: String,
}

impl CodeNode {
    pub fn new(kind: CodeKind, attr: Attr, content: impl Into<String>) -> Self {
        let mut classes = attr.classes;
        let language = match classes.first() {
            Some(first) if !matches!(ClassToken::leading(first), ClassToken::Control(_)) => {
                Some(classes.remove(0))
            }
            _ => None,
        };
        CodeNode {
            kind,
            identifier: attr.identifier,
            language,
            classes,
            key_values: attr.attributes,
            content: content.into(),
        }
    }

    /// Parse a `CodeBlock`/`Code` element. Returns `Ok(None)` for any other element.
    pub fn from_element(value: &Value) -> Result<Option<CodeNode>> {
        let Some(kind) = node_tag(value).and_then(CodeKind::from_tag) else {
            return Ok(None);
        };
        let tag = kind.tag();

        let parts = value
            .get("c")
            .and_then(Value::as_array)
            .ok_or_else(|| FilterError::malformed(tag, "content must be an array"))?;
        let [attr, text] = parts.as_slice() else {
            return Err(FilterError::malformed(
                tag,
                format!("expected [attr, text], found {} elements", parts.len()),
            ));
        };

        let attr: Attr = serde_json::from_value(attr.clone())
            .map_err(|e| FilterError::malformed(tag, format!("bad attr: {e}")))?;
        let text = text
            .as_str()
            .ok_or_else(|| FilterError::malformed(tag, "text must be a string"))?;

        Ok(Some(CodeNode::new(kind, attr, text)))
    }
}

/// Read the `t` tag of a pandoc element.
pub fn node_tag(value: &Value) -> Option<&str> {
    value.get("t")?.as_str()
}

/// Build a pandoc element `{"t": tag, "c": content}`.
pub fn element(tag: &str, content: Value) -> Value {
    json!({ "t": tag, "c": content })
}

/// Build a `CodeBlock` or `Code` element.
pub fn code_element(kind: CodeKind, attr: &Attr, text: &str) -> Value {
    element(kind.tag(), json!([attr, text]))
}

/// Build a `RawBlock` or `RawInline` element for the given raw format.
pub fn raw_element(kind: CodeKind, format: &str, text: &str) -> Value {
    let tag = match kind {
        CodeKind::Block => "RawBlock",
        CodeKind::Inline => "RawInline",
    };
    element(tag, json!([format, text]))
}

/// The level of a `Header` element, if `value` is one.
pub fn header_level(value: &Value) -> Option<u8> {
    if node_tag(value) != Some("Header") {
        return None;
    }
    let level = value.get("c")?.get(0)?.as_u64()?;
    u8::try_from(level).ok()
}

pub fn is_horizontal_rule(value: &Value) -> bool {
    node_tag(value) == Some("HorizontalRule")
}

/// Build a `Header` with empty content.
pub fn empty_header(level: u8, attr: &Attr) -> Value {
    element("Header", json!([level, attr, []]))
}

/// Append `class` to a `Header`'s attributes unless already present.
pub fn add_header_class(header: &mut Value, class: &str) -> Result<()> {
    let classes = header
        .get_mut("c")
        .and_then(|c| c.get_mut(1))
        .and_then(|attr| attr.get_mut(1))
        .and_then(Value::as_array_mut)
        .ok_or_else(|| FilterError::malformed("Header", "expected [level, attr, inlines]"))?;

    if !classes.iter().any(|c| c.as_str() == Some(class)) {
        classes.push(Value::String(class.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_block_splits_language_from_classes() {
        let el = json!({
            "t": "CodeBlock",
            "c": [["snippet", ["cpp", "showspaces", "hello"], [["style", "tango"]]], "int x;"]
        });
        let node = CodeNode::from_element(&el).unwrap().unwrap();
        assert_eq!(node.kind, CodeKind::Block);
        assert_eq!(node.identifier, "snippet");
        assert_eq!(node.language.as_deref(), Some("cpp"));
        assert_eq!(node.classes, vec!["showspaces", "hello"]);
        assert_eq!(node.key_values, vec![("style".to_string(), "tango".to_string())]);
        assert_eq!(node.content, "int x;");
    }

    #[test]
    fn leading_control_class_is_not_a_language() {
        let node = CodeNode::new(
            CodeKind::Inline,
            Attr {
                classes: vec!["no_minted".to_string()],
                ..Attr::default()
            },
            "x",
        );
        assert_eq!(node.language, None);
        assert_eq!(node.classes, vec!["no_minted"]);
    }

    #[test]
    fn non_code_elements_are_ignored() {
        let el = json!({"t": "Str", "c": "hi"});
        assert_eq!(CodeNode::from_element(&el).unwrap(), None);
    }

    #[test]
    fn malformed_code_is_an_error() {
        let el = json!({"t": "Code", "c": ["only one"]});
        let err = CodeNode::from_element(&el).unwrap_err();
        assert!(matches!(err, FilterError::MalformedNode { ref tag, .. } if tag == "Code"));
    }

    #[test]
    fn header_class_is_added_once() {
        let mut h = json!({"t": "Header", "c": [2, ["", ["fragile"], []], []]});
        assert_eq!(header_level(&h), Some(2));
        add_header_class(&mut h, "fragile").unwrap();
        add_header_class(&mut h, "other").unwrap();
        assert_eq!(h["c"][1][1], json!(["fragile", "other"]));
    }
}
