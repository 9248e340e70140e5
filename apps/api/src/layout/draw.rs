//! Draw commands: the substrate-independent output of the export layout.
//!
//! A PDF or print backend only needs to place text at a position with a size and
//! colour, and stroke a horizontal rule.

use serde::Serialize;

use crate::imperfection::{AnnotatedChar, Baseline, Ink};
use crate::layout::metrics::{BASELINE_SHIFT, HEAVY_STRIKE_OFFSET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl InkColor {
    pub const BLACK: InkColor = InkColor { r: 0, g: 0, b: 0 };
    pub const FADED: InkColor = InkColor {
        r: 128,
        g: 128,
        b: 128,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// One strike of a typed glyph; `y` is the baseline.
    Glyph {
        glyph: char,
        x: f32,
        y: f32,
        size: f32,
        color: InkColor,
    },
    /// Header and footer text.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
    },
    /// Horizontal separator.
    Rule { x1: f32, x2: f32, y: f32 },
}

/// Emits the strikes for one glyph at `(x, y)`.
///
/// Heavy ink strikes twice in black, the second strike nudged right; this overrides
/// faded. Uneven glyphs shift every strike off the baseline. Whitespace is never drawn.
pub fn push_glyph(out: &mut Vec<DrawCommand>, ch: &AnnotatedChar, x: f32, y: f32, size: f32) {
    if ch.glyph.is_whitespace() {
        return;
    }

    let y = match ch.effects.baseline {
        Some(Baseline::Up) => y - BASELINE_SHIFT,
        Some(Baseline::Down) => y + BASELINE_SHIFT,
        None => y,
    };
    let strike = |x: f32, color: InkColor| DrawCommand::Glyph {
        glyph: ch.glyph,
        x,
        y,
        size,
        color,
    };

    match ch.effects.ink() {
        Ink::Heavy => {
            out.push(strike(x, InkColor::BLACK));
            out.push(strike(x + HEAVY_STRIKE_OFFSET, InkColor::BLACK));
        }
        Ink::Faded => out.push(strike(x, InkColor::FADED)),
        Ink::Normal => out.push(strike(x, InkColor::BLACK)),
    }
}
