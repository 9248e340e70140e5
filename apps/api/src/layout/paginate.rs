//! Export pagination: places the annotated stream onto fixed-size pages.
//!
//! # Algorithm
//! 1. Validate the config (no drawing happens for an invalid one).
//! 2. Draw the header on page one; the content cursor starts below it.
//! 3. Segment paragraphs, wrap each greedily, and place lines top-down. A line that
//!    would cross `page height − bottom margin` starts a new page at the top margin.
//! 4. Half a line height separates paragraphs (none after the last).
//! 5. Stamp the footer on every page once the page count is known.
//!
//! The function is pure: the header timestamp is an argument, not a clock read.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::imperfection::AnnotatedChar;
use crate::layout::config::{ExportLayoutConfig, LayoutError, PageSize};
use crate::layout::draw::{push_glyph, DrawCommand};
use crate::layout::metrics::overflows;
use crate::layout::wrap::{split_paragraphs, wrap_paragraph};

pub const BRANDING_TEXT: &str = "Generated with Typewriter";

const TITLE_SIZE: f32 = 14.0;
const META_SIZE: f32 = 8.0;
const TITLE_GAP: f32 = 10.0;
const FONT_LINE_GAP: f32 = 5.0;
const TIMESTAMP_GAP: f32 = 8.0;
const SEPARATOR_GAP: f32 = 8.0;
/// Footer baseline sits this far below the bottom content edge.
const FOOTER_OFFSET: f32 = 5.0;
/// Branding follows the page number at this x offset when both are shown.
const BRANDING_OFFSET: f32 = 40.0;

/// Header content for page one.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderInfo {
    pub title: String,
    pub font_name: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPage {
    /// 1-based page number.
    pub number: usize,
    /// Body lines placed on this page.
    pub line_count: usize,
    pub commands: Vec<DrawCommand>,
}

impl ExportPage {
    fn new(number: usize) -> Self {
        Self {
            number,
            line_count: 0,
            commands: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub page: PageSize,
    pub pages: Vec<ExportPage>,
}

impl ExportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lays the annotated stream out as pages of draw commands.
pub fn layout_for_export(
    annotated: &[AnnotatedChar],
    config: &ExportLayoutConfig,
    header: &HeaderInfo,
) -> Result<ExportDocument, LayoutError> {
    let metrics = config.validate()?;
    let left = config.margins.left;
    let top = config.margins.top;
    let bottom = config.content_bottom();

    let mut pages = Vec::new();
    let mut page = ExportPage::new(1);
    let mut y = top;

    if config.show_header {
        y = draw_header(&mut page, config, header);
        if overflows(y + metrics.line_height, bottom) {
            return Err(LayoutError::InvalidLayoutConfig(format!(
                "header ends at {y:.1}mm and leaves no room for a line above {bottom:.1}mm"
            )));
        }
    }

    let paragraphs = split_paragraphs(annotated);
    let last = paragraphs.len().saturating_sub(1);

    for (p_idx, paragraph) in paragraphs.iter().enumerate() {
        for line in wrap_paragraph(paragraph, &metrics) {
            if overflows(y + metrics.line_height, bottom) {
                let next = ExportPage::new(page.number + 1);
                pages.push(std::mem::replace(&mut page, next));
                y = top;
            }

            let mut x = left;
            for ch in line {
                push_glyph(&mut page.commands, ch, x, y, config.font_size);
                x += metrics.advance_of(ch);
            }
            page.line_count += 1;
            y += metrics.line_height;
        }

        if p_idx < last {
            y += metrics.paragraph_gap();
        }
    }

    pages.push(page);

    if config.show_footer || config.show_branding {
        draw_footers(&mut pages, config);
    }

    debug!(
        chars = annotated.len(),
        paragraphs = paragraphs.len(),
        pages = pages.len(),
        "export layout complete"
    );

    Ok(ExportDocument {
        page: config.page,
        pages,
    })
}

/// Draws the page-one header and returns the y where body text starts.
fn draw_header(page: &mut ExportPage, config: &ExportLayoutConfig, header: &HeaderInfo) -> f32 {
    let left = config.margins.left;
    let mut y = config.margins.top;

    page.commands.push(DrawCommand::Text {
        text: header.title.clone(),
        x: left,
        y,
        size: TITLE_SIZE,
    });
    y += TITLE_GAP;

    page.commands.push(DrawCommand::Text {
        text: format!("Font: {}", header.font_name),
        x: left,
        y,
        size: META_SIZE,
    });
    y += FONT_LINE_GAP;

    page.commands.push(DrawCommand::Text {
        text: format!(
            "Generated: {}",
            header.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        x: left,
        y,
        size: META_SIZE,
    });
    y += TIMESTAMP_GAP;

    if config.show_separator_line {
        page.commands.push(DrawCommand::Rule {
            x1: left,
            x2: config.page.width - config.margins.right,
            y,
        });
        y += SEPARATOR_GAP;
    }

    y
}

fn draw_footers(pages: &mut [ExportPage], config: &ExportLayoutConfig) {
    let total = pages.len();
    let left = config.margins.left;
    let y = config.content_bottom() + FOOTER_OFFSET;

    for page in pages.iter_mut() {
        if config.show_footer {
            page.commands.push(DrawCommand::Text {
                text: format!("Page {} of {}", page.number, total),
                x: left,
                y,
                size: META_SIZE,
            });
        }
        if config.show_branding {
            let (text, x) = if config.show_footer {
                (format!(" - {BRANDING_TEXT}"), left + BRANDING_OFFSET)
            } else {
                (BRANDING_TEXT.to_string(), left)
            };
            page.commands.push(DrawCommand::Text {
                text,
                x,
                y,
                size: META_SIZE,
            });
        }
    }
}
