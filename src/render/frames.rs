//! Beamer frame fragility.
//!
//! Frames holding a minted command must be opened with `[fragile]`. pandoc
//! builds frames from slide-level headings (and horizontal rules) when it
//! writes beamer, so we mark the heading that will open each affected frame.
//!
//! This runs as a second pass: the walk first reports, for every top-level
//! block, whether anything inside it was rendered; here we group blocks into
//! frames and annotate the opener.

use crate::ast::*;
use crate::error::Result;
use serde_json::Value;

pub const FRAGILE: &str = "fragile";

/// Deepest heading level pandoc considers when picking a slide level.
const MAX_SLIDE_LEVEL: u8 = 6;

/// pandoc's default slide level: the highest heading level that is directly
/// followed by content other than a heading or rule.
pub fn slide_level(blocks: &[Value]) -> u8 {
    let mut least = MAX_SLIDE_LEVEL;
    for pair in blocks.windows(2) {
        if let Some(level) = header_level(&pair[0])
            && level < least
            && header_level(&pair[1]).is_none()
            && !is_horizontal_rule(&pair[1])
        {
            least = level;
        }
    }
    least
}

#[derive(Debug, Clone, Copy)]
enum Opener {
    /// Content before the first heading or rule.
    DocumentStart,
    Header(usize),
    Rule(usize),
}

/// Mark every frame that contains a rendered block as fragile.
///
/// `rendered[i]` says whether `blocks[i]` holds a minted command.
pub fn mark_fragile_frames(blocks: Vec<Value>, rendered: &[bool], slide_level: u8) -> Result<Vec<Value>> {
    debug_assert_eq!(blocks.len(), rendered.len());

    let mut out: Vec<Value> = Vec::with_capacity(blocks.len() + 1);
    let mut opener = Opener::DocumentStart;
    let mut frame_rendered = false;
    let mut prepend_header = false;

    for (block, was_rendered) in blocks.into_iter().zip(rendered.iter().copied()) {
        let starts_frame = header_level(&block).is_some_and(|l| l <= slide_level);
        let is_rule = is_horizontal_rule(&block);

        if starts_frame || is_rule {
            if frame_rendered {
                close_frame(&mut out, opener, slide_level, &mut prepend_header)?;
            }
            opener = if is_rule {
                Opener::Rule(out.len())
            } else {
                Opener::Header(out.len())
            };
            // a heading's title is typeset inside the frame it opens.
            frame_rendered = was_rendered;
        } else {
            frame_rendered |= was_rendered;
        }
        out.push(block);
    }

    if frame_rendered {
        close_frame(&mut out, opener, slide_level, &mut prepend_header)?;
    }
    if prepend_header {
        out.insert(0, fragile_header(slide_level));
    }
    Ok(out)
}

fn close_frame(out: &mut [Value], opener: Opener, slide_level: u8, prepend_header: &mut bool) -> Result<()> {
    match opener {
        Opener::Header(i) => {
            tracing::debug!(index = i, "marking frame heading fragile");
            add_header_class(&mut out[i], FRAGILE)
        }
        Opener::Rule(i) => {
            // an untitled frame: swap the rule for an empty fragile heading,
            // which pandoc also reads as a frame break.
            tracing::debug!(index = i, "replacing rule with fragile frame heading");
            out[i] = fragile_header(slide_level);
            Ok(())
        }
        Opener::DocumentStart => {
            *prepend_header = true;
            Ok(())
        }
    }
}

fn fragile_header(level: u8) -> Value {
    let attr = Attr {
        classes: vec![FRAGILE.to_string()],
        ..Attr::default()
    };
    empty_header(level, &attr)
}
