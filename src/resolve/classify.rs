use crate::ast::CodeNode;
use crate::config::DocumentConfig;
use std::collections::HashSet;

/// minted's boolean options, usable as bare classes (`{.cpp .linenos}`).
pub const BUILTIN_SWITCHES: &[&str] = &[
    "autogobble",
    "beameroverlays",
    "breakanywhere",
    "breakautoindent",
    "breakbytoken",
    "breakbytokenanywhere",
    "breaklines",
    "codetagify",
    "curlyquotes",
    "funcnamehighlighting",
    "linenos",
    "mathescape",
    "numberblanklines",
    "numberfirstline",
    "obeytabs",
    "python3",
    "resetmargins",
    "samepage",
    "showspaces",
    "showtabs",
    "startinline",
    "stepnumberfromfirst",
    "stepnumberoffsetvalues",
    "stripall",
    "stripnl",
    "texcl",
    "texcomments",
];

/// Classes that steer the filter and are never forwarded to minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// `.no_minted`: leave this inline span to the host pipeline.
    NoMinted,
}

impl Control {
    pub fn from_class(class: &str) -> Option<Control> {
        match class {
            "no_minted" => Some(Control::NoMinted),
            _ => None,
        }
    }
}

/// A class token, tagged once so later stages never re-inspect strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassToken {
    Language(String),
    Switch(String),
    Control(Control),
    Unknown(String),
}

impl ClassToken {
    /// Tag the leading class of a node: a language unless it is a control class.
    pub fn leading(class: &str) -> ClassToken {
        match Control::from_class(class) {
            Some(c) => ClassToken::Control(c),
            None => ClassToken::Language(class.to_string()),
        }
    }

    /// Tag a non-leading class.
    pub fn trailing(class: &str, switches: &SwitchSet) -> ClassToken {
        if let Some(c) = Control::from_class(class) {
            ClassToken::Control(c)
        } else if switches.contains(class) {
            ClassToken::Switch(class.to_string())
        } else {
            ClassToken::Unknown(class.to_string())
        }
    }
}

/// The recognized switch names: built-ins plus `extra_switches`.
#[derive(Debug, Clone)]
pub struct SwitchSet {
    names: HashSet<String>,
}

impl SwitchSet {
    pub fn new(config: &DocumentConfig) -> Self {
        let names = BUILTIN_SWITCHES
            .iter()
            .map(|s| s.to_string())
            .chain(config.extra_switches.iter().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .collect();
        SwitchSet { names }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.names.contains(class)
    }
}

/// A node's classes and attributes, split into what minted should see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub language: Option<String>,
    /// Recognized switch classes, source order.
    pub switches: Vec<String>,
    /// Key-value attributes, source order, forwarded untouched.
    pub key_values: Vec<(String, String)>,
    pub no_minted: bool,
}

pub fn classify(node: &CodeNode, switches: &SwitchSet) -> Classified {
    let mut out = Classified {
        language: node.language.clone(),
        key_values: node.key_values.clone(),
        ..Classified::default()
    };

    for class in &node.classes {
        match ClassToken::trailing(class, switches) {
            ClassToken::Switch(name) => out.switches.push(name),
            ClassToken::Control(Control::NoMinted) => out.no_minted = true,
            ClassToken::Unknown(name) => {
                tracing::debug!(class = %name, "dropping class minted does not know");
            }
            // trailing() never yields a language.
            ClassToken::Language(_) => {}
        }
    }
    out
}
