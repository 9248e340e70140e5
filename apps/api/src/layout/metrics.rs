//! Typewriter type metrics for the export page.
//!
//! Every glyph shares one advance width (a typewriter is monospaced), derived from
//! the configured font size. All values are millimetres on the page.
//!
//! `spaced` and `tight` change only the advance of the glyph that carries them;
//! the carriage still moves for unprinted spaces.

use crate::imperfection::{AnnotatedChar, EffectSet, Spacing};
use crate::layout::config::ExportLayoutConfig;

/// Glyph advance as a fraction of the font size.
pub const ADVANCE_RATIO: f32 = 0.6;
/// Converts `font size × line-height multiplier` into millimetres.
pub const LINE_HEIGHT_MM_PER_PT: f32 = 0.35;
pub const SPACED_EXTRA: f32 = 1.0;
pub const TIGHT_EXTRA: f32 = -0.5;
/// Vertical displacement of an uneven glyph.
pub const BASELINE_SHIFT: f32 = 0.5;
/// Horizontal offset of the second strike of a heavy glyph.
pub const HEAVY_STRIKE_OFFSET: f32 = 0.1;
/// Space left between paragraphs, as a fraction of the line height.
pub const PARAGRAPH_GAP_LINES: f32 = 0.5;
/// Slack (mm) for accumulated f32 error when checking whether content fits.
pub const FIT_TOLERANCE: f32 = 1e-3;

/// True when `extent` runs past `limit` by more than rounding error.
/// An extent that lands exactly on the limit still fits.
pub fn overflows(extent: f32, limit: f32) -> bool {
    extent > limit + FIT_TOLERANCE
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub advance: f32,
    pub line_height: f32,
    pub content_width: f32,
}

impl LayoutMetrics {
    pub fn from_config(config: &ExportLayoutConfig) -> Self {
        Self {
            advance: config.font_size * ADVANCE_RATIO,
            line_height: config.font_size * config.line_height * LINE_HEIGHT_MM_PER_PT,
            content_width: config.content_width(),
        }
    }

    /// Advance of one character including its spacing effect.
    pub fn advance_of(&self, ch: &AnnotatedChar) -> f32 {
        self.advance + extra_advance(&ch.effects)
    }

    /// Smallest advance any character can have.
    pub fn min_advance(&self) -> f32 {
        self.advance + TIGHT_EXTRA
    }

    /// Sum of advances over a run of characters.
    #[cfg(test)]
    pub fn measure(&self, chars: &[AnnotatedChar]) -> f32 {
        chars.iter().map(|c| self.advance_of(c)).sum()
    }

    pub fn paragraph_gap(&self) -> f32 {
        self.line_height * PARAGRAPH_GAP_LINES
    }
}

pub fn extra_advance(effects: &EffectSet) -> f32 {
    match effects.spacing {
        Some(Spacing::Spaced) => SPACED_EXTRA,
        Some(Spacing::Tight) => TIGHT_EXTRA,
        None => 0.0,
    }
}
