//! Paragraph segmentation and greedy line wrapping over annotated characters.

use crate::imperfection::AnnotatedChar;
use crate::layout::metrics::{overflows, LayoutMetrics};

/// Splits the stream into paragraphs.
///
/// A `\n\n` pair ends a paragraph and is consumed; a lone `\n` becomes an
/// effect-free space. Carriage returns are dropped so `\r\n` text behaves like `\n`.
/// Paragraphs with no characters are skipped.
pub fn split_paragraphs(stream: &[AnnotatedChar]) -> Vec<Vec<AnnotatedChar>> {
    let chars: Vec<&AnnotatedChar> = stream.iter().filter(|c| c.glyph != '\r').collect();
    let mut paragraphs = Vec::new();
    let mut current: Vec<AnnotatedChar> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let item = chars[i];
        if item.glyph == '\n' {
            if chars.get(i + 1).is_some_and(|next| next.glyph == '\n') {
                if !current.is_empty() {
                    paragraphs.push(std::mem::take(&mut current));
                }
                i += 2;
                continue;
            }
            current.push(AnnotatedChar::plain(' '));
        } else {
            current.push(*item);
        }
        i += 1;
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Greedy character wrap. A new line starts when the next character would push the
/// running width past the content width and the current line already holds something.
///
/// Lines are slices into `paragraph`; an empty paragraph yields no lines.
pub fn wrap_paragraph<'a>(
    paragraph: &'a [AnnotatedChar],
    metrics: &LayoutMetrics,
) -> Vec<&'a [AnnotatedChar]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0.0_f32;

    for (idx, ch) in paragraph.iter().enumerate() {
        let advance = metrics.advance_of(ch);
        if overflows(width + advance, metrics.content_width) && idx > start {
            lines.push(&paragraph[start..idx]);
            start = idx;
            width = advance;
        } else {
            width += advance;
        }
    }

    if start < paragraph.len() {
        lines.push(&paragraph[start..]);
    }
    lines
}
