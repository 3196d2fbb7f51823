//! Per-node resolution: which language, which `minted` options, and whether
//! the node is rendered by us or left to the host pipeline.
//!
//! Each step takes the document configuration and render target explicitly;
//! nothing here keeps state between nodes.

mod classify;
mod fallback;
mod language;
mod merge;

pub use classify::{BUILTIN_SWITCHES, ClassToken, Classified, Control, SwitchSet, classify};
pub use fallback::{Action, decide, inline_delimiter};
pub use language::resolve_language;
pub use merge::{AUTOGOBBLE, attribute_key, merge};
