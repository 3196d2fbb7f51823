use serde_json::Value;

/// Document metadata reduced to the shapes configuration cares about.
///
/// Pandoc wraps every YAML scalar in a tagged `Meta*` node, and the
/// `--config` file arrives as plain YAML; both are lowered into this one
/// type so the configuration reader only has to deal with a single shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Map(Vec<(String, MetaValue)>),
    List(Vec<MetaValue>),
    Bool(bool),
    String(String),
}

impl MetaValue {
    /// Lower a pandoc `Meta*` JSON node. Returns `None` for shapes we do not
    /// recognize.
    pub fn from_json(value: &Value) -> Option<MetaValue> {
        let tag = value.get("t")?.as_str()?;
        let content = value.get("c");
        match tag {
            "MetaMap" => {
                let map = content?.as_object()?;
                Some(MetaValue::Map(
                    map.iter()
                        .filter_map(|(k, v)| Some((k.clone(), MetaValue::from_json(v)?)))
                        .collect(),
                ))
            }
            "MetaList" => Some(MetaValue::List(
                content?
                    .as_array()?
                    .iter()
                    .filter_map(MetaValue::from_json)
                    .collect(),
            )),
            "MetaBool" => content?.as_bool().map(MetaValue::Bool),
            "MetaString" => content?.as_str().map(|s| MetaValue::String(s.to_string())),
            "MetaInlines" => Some(MetaValue::String(stringify_inlines(content?.as_array()?))),
            "MetaBlocks" => Some(MetaValue::String(stringify_blocks(content?.as_array()?))),
            _ => None,
        }
    }

    /// Lower a plain YAML value (from a `--config` file).
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<MetaValue> {
        use serde_yaml::Value as Yaml;
        match value {
            Yaml::Mapping(map) => Some(MetaValue::Map(
                map.iter()
                    .filter_map(|(k, v)| Some((k.as_str()?.to_string(), MetaValue::from_yaml(v)?)))
                    .collect(),
            )),
            Yaml::Sequence(items) => Some(MetaValue::List(
                items.iter().filter_map(MetaValue::from_yaml).collect(),
            )),
            Yaml::Bool(b) => Some(MetaValue::Bool(*b)),
            Yaml::String(s) => Some(MetaValue::String(s.clone())),
            // pandoc reads unquoted numbers as text, so do we.
            Yaml::Number(n) => Some(MetaValue::String(n.to_string())),
            Yaml::Tagged(tagged) => MetaValue::from_yaml(&tagged.value),
            Yaml::Null => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        match self {
            MetaValue::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Flatten pandoc inlines to plain text, the way `pandoc.utils.stringify` does.
fn stringify_inlines(inlines: &[Value]) -> String {
    let mut out = String::new();
    for inline in inlines {
        push_inline_text(inline, &mut out);
    }
    out
}

fn push_inline_text(inline: &Value, out: &mut String) {
    let Some(tag) = inline.get("t").and_then(Value::as_str) else {
        return;
    };
    let content = inline.get("c");
    match tag {
        "Str" => {
            if let Some(s) = content.and_then(Value::as_str) {
                out.push_str(s);
            }
        }
        "Space" | "SoftBreak" | "LineBreak" => out.push(' '),
        // [attr, text] / [format, text] / [mathtype, text]
        "Code" | "RawInline" | "Math" => {
            if let Some(s) = content.and_then(|c| c.get(1)).and_then(Value::as_str) {
                out.push_str(s);
            }
        }
        "Emph" | "Strong" | "Underline" | "Strikeout" | "Superscript" | "Subscript"
        | "SmallCaps" => {
            if let Some(children) = content.and_then(Value::as_array) {
                for child in children {
                    push_inline_text(child, out);
                }
            }
        }
        // [attr | quote type | citations, inlines, ...]
        "Span" | "Quoted" | "Link" | "Image" | "Cite" => {
            if let Some(children) = content.and_then(|c| c.get(1)).and_then(Value::as_array) {
                for child in children {
                    push_inline_text(child, out);
                }
            }
        }
        _ => {}
    }
}

fn stringify_blocks(blocks: &[Value]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for block in blocks {
        match block.get("t").and_then(Value::as_str) {
            Some("Plain" | "Para") => {
                if let Some(inlines) = block.get("c").and_then(Value::as_array) {
                    parts.push(stringify_inlines(inlines));
                }
            }
            _ => continue,
        }
    }
    parts.join("\n")
}
