//! HTML markup for the live view, plain text, and effect statistics.

use serde::Serialize;

use crate::imperfection::effects::{AnnotatedChar, Baseline, EffectTag, Ink, Spacing};

/// Renders the stream as HTML. Effect-free glyphs are emitted as escaped text;
/// annotated glyphs as `<span class="char-…">g</span>`.
///
/// Ink classes are resolved before emission, so a glyph that is both heavy and
/// faded carries only `char-heavy`, matching the export path.
pub fn to_markup(chars: &[AnnotatedChar]) -> String {
    let mut out = String::with_capacity(chars.len() * 2);
    for ch in chars {
        let classes = css_classes(ch);
        if classes.is_empty() {
            push_escaped(&mut out, ch.glyph);
            continue;
        }
        out.push_str("<span class=\"");
        out.push_str(&classes.join(" "));
        out.push_str("\">");
        push_escaped(&mut out, ch.glyph);
        out.push_str("</span>");
    }
    out
}

/// The typed glyphs without effects, e.g. for copying to the clipboard.
pub fn plain_text(chars: &[AnnotatedChar]) -> String {
    chars.iter().map(|c| c.glyph).collect()
}

fn css_classes(ch: &AnnotatedChar) -> Vec<&'static str> {
    let effects = &ch.effects;
    let mut classes = Vec::new();
    match effects.ink() {
        Ink::Heavy => classes.push(EffectTag::Heavy.css_class()),
        Ink::Faded => classes.push(EffectTag::Faded.css_class()),
        Ink::Normal => {}
    }
    match effects.baseline {
        Some(Baseline::Up) => classes.push(EffectTag::UnevenUp.css_class()),
        Some(Baseline::Down) => classes.push(EffectTag::UnevenDown.css_class()),
        None => {}
    }
    match effects.spacing {
        Some(Spacing::Spaced) => classes.push(EffectTag::Spaced.css_class()),
        Some(Spacing::Tight) => classes.push(EffectTag::Tight.css_class()),
        None => {}
    }
    classes
}

fn push_escaped(out: &mut String, glyph: char) {
    match glyph {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        other => out.push(other),
    }
}

/// Per-tag counts over an annotated stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectStats {
    pub total_chars: usize,
    pub annotated_chars: usize,
    pub faded: usize,
    pub heavy: usize,
    pub uneven_up: usize,
    pub uneven_down: usize,
    pub spaced: usize,
    pub tight: usize,
}

impl EffectStats {
    pub fn collect(chars: &[AnnotatedChar]) -> Self {
        let mut stats = EffectStats {
            total_chars: chars.len(),
            ..Default::default()
        };
        for ch in chars {
            if !ch.effects.is_empty() {
                stats.annotated_chars += 1;
            }
            for tag in ch.effects.tags() {
                *stats.count_mut(tag) += 1;
            }
        }
        stats
    }

    #[cfg(test)]
    pub fn count(&self, tag: EffectTag) -> usize {
        match tag {
            EffectTag::Faded => self.faded,
            EffectTag::Heavy => self.heavy,
            EffectTag::UnevenUp => self.uneven_up,
            EffectTag::UnevenDown => self.uneven_down,
            EffectTag::Spaced => self.spaced,
            EffectTag::Tight => self.tight,
        }
    }

    /// Fraction of all characters carrying `tag`; 0 for an empty stream.
    #[cfg(test)]
    pub fn rate(&self, tag: EffectTag) -> f64 {
        if self.total_chars == 0 {
            return 0.0;
        }
        self.count(tag) as f64 / self.total_chars as f64
    }

    fn count_mut(&mut self, tag: EffectTag) -> &mut usize {
        match tag {
            EffectTag::Faded => &mut self.faded,
            EffectTag::Heavy => &mut self.heavy,
            EffectTag::UnevenUp => &mut self.uneven_up,
            EffectTag::UnevenDown => &mut self.uneven_down,
            EffectTag::Spaced => &mut self.spaced,
            EffectTag::Tight => &mut self.tight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imperfection::effects::EffectSet;

    fn annotated(glyph: char, effects: EffectSet) -> AnnotatedChar {
        AnnotatedChar::with_effects(glyph, effects)
    }

    #[test]
    fn test_plain_chars_are_bare_text() {
        let chars: Vec<AnnotatedChar> = "hi there".chars().map(AnnotatedChar::plain).collect();
        assert_eq!(to_markup(&chars), "hi there");
    }

    #[test]
    fn test_annotated_char_is_wrapped_in_span() {
        let chars = vec![
            AnnotatedChar::plain('a'),
            annotated(
                'b',
                EffectSet {
                    faded: true,
                    baseline: Some(Baseline::Up),
                    spacing: Some(Spacing::Tight),
                    ..EffectSet::NONE
                },
            ),
        ];
        assert_eq!(
            to_markup(&chars),
            "a<span class=\"char-faded char-uneven char-tight\">b</span>"
        );
    }

    #[test]
    fn test_heavy_suppresses_faded_class() {
        let chars = vec![annotated(
            'x',
            EffectSet {
                faded: true,
                heavy: true,
                ..EffectSet::NONE
            },
        )];
        assert_eq!(to_markup(&chars), "<span class=\"char-heavy\">x</span>");
    }

    #[test]
    fn test_markup_escapes_html() {
        let chars: Vec<AnnotatedChar> = "<a & 'b'>".chars().map(AnnotatedChar::plain).collect();
        assert_eq!(to_markup(&chars), "&lt;a &amp; &#39;b&#39;&gt;");

        let heavy_amp = vec![annotated(
            '&',
            EffectSet {
                heavy: true,
                ..EffectSet::NONE
            },
        )];
        assert_eq!(to_markup(&heavy_amp), "<span class=\"char-heavy\">&amp;</span>");
    }

    #[test]
    fn test_plain_text_drops_effects() {
        let chars = vec![
            annotated(
                'o',
                EffectSet {
                    heavy: true,
                    ..EffectSet::NONE
                },
            ),
            AnnotatedChar::plain('k'),
        ];
        assert_eq!(plain_text(&chars), "ok");
    }

    #[test]
    fn test_stats_count_each_tag() {
        let chars = vec![
            annotated(
                'a',
                EffectSet {
                    faded: true,
                    heavy: true,
                    ..EffectSet::NONE
                },
            ),
            annotated(
                'b',
                EffectSet {
                    spacing: Some(Spacing::Spaced),
                    ..EffectSet::NONE
                },
            ),
            AnnotatedChar::plain(' '),
            AnnotatedChar::plain('c'),
        ];
        let stats = EffectStats::collect(&chars);
        assert_eq!(stats.total_chars, 4);
        assert_eq!(stats.annotated_chars, 2);
        assert_eq!(stats.faded, 1);
        assert_eq!(stats.heavy, 1);
        assert_eq!(stats.spaced, 1);
        assert_eq!(stats.tight, 0);
        assert_eq!(stats.rate(EffectTag::Faded), 0.25);
    }

    #[test]
    fn test_stats_rate_of_empty_stream_is_zero() {
        assert_eq!(EffectStats::collect(&[]).rate(EffectTag::Heavy), 0.0);
    }
}
