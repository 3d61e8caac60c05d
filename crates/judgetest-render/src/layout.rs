//! Page layout and pagination.
//!
//! Coordinates are in points measured from the top-left corner of the page;
//! the PDF encoder flips them to the bottom-left origin.

use judgetest_core::config::{JudgetestConfig, PaperSize};
use judgetest_core::model::ComposedTest;

use crate::metrics::{text_width, wrap, FontStyle};

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

const PAGE_MARGIN: f32 = 10.0 * MM;
const CELL_PADDING: f32 = 1.0 * MM;
const HEADER_HEIGHT: f32 = 10.0 * MM;
const HEADER_FONT_SIZE: f32 = 12.0;
const SUBHEADING_HEIGHT: f32 = 20.0 * MM;
const BODY_FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 10.0 * MM;
const QUESTION_GAP: f32 = 5.0 * MM;
/// Content may not extend below this distance from the page bottom.
const BREAK_MARGIN: f32 = 20.0 * MM;
/// Distance of the footer band from the page bottom.
const FOOTER_OFFSET: f32 = 15.0 * MM;
const FOOTER_HEIGHT: f32 = 10.0 * MM;
const FOOTER_FONT_SIZE: f32 = 8.0;
const MIN_CENTERED_FONT_SIZE: f32 = 6.0;

/// The answer line printed under every question.
pub const ANSWER_LINE: &str = "[  ] True   [  ] False";

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl From<PaperSize> for PageSize {
    fn from(paper: PaperSize) -> Self {
        match paper {
            PaperSize::A4 => PageSize::A4,
            PaperSize::Letter => PageSize::LETTER,
        }
    }
}

/// Options for document rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub page_size: PageSize,
    /// Heading printed under the title on the first page only.
    pub subheading: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            subheading: Some("True/False Questions".to_string()),
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &JudgetestConfig) -> Self {
        Self {
            page_size: config.page_size.into(),
            subheading: config.subheading().map(str::to_string),
        }
    }
}

/// A single line of text placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Left edge of the text.
    pub x: f32,
    /// Baseline, measured down from the top of the page.
    pub baseline: f32,
    pub font_size: f32,
    pub style: FontStyle,
}

/// A numbered question together with its answer line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedQuestion {
    pub number: usize,
    /// Wrapped lines of `"{number}. {text}"`.
    pub lines: Vec<TextLine>,
    pub answer: TextLine,
}

/// Everything drawn on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// 1-based page number.
    pub number: usize,
    pub header: TextLine,
    pub subheading: Option<TextLine>,
    pub questions: Vec<PlacedQuestion>,
    pub footer: TextLine,
}

impl PageLayout {
    /// All lines on the page in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        std::iter::once(&self.header)
            .chain(self.subheading.iter())
            .chain(
                self.questions
                    .iter()
                    .flat_map(|q| q.lines.iter().chain(std::iter::once(&q.answer))),
            )
            .chain(std::iter::once(&self.footer))
    }
}

/// Vertical space available to question blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Where the first block goes on page 1.
    pub first_top: f32,
    /// Where the first block goes on later pages.
    pub top: f32,
    /// Blocks must end at or above this line.
    pub bottom: f32,
    /// Space left after each block.
    pub gap: f32,
}

/// Where a block landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// 0-based page index.
    pub page: usize,
    pub top: f32,
}

/// Assign each block to a page, in order, without splitting any block.
///
/// A block that does not fit in the remaining space starts a new page. A
/// block taller than an empty page is placed alone at the top of a fresh
/// page and allowed to overflow.
pub fn paginate(heights: &[f32], frame: &Frame) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(heights.len());
    let mut page = 0;
    let mut y = frame.first_top;

    for &height in heights {
        if y + height > frame.bottom && y > frame.top {
            page += 1;
            y = frame.top;
        }
        placements.push(Placement { page, top: y });
        y += height + frame.gap;
    }

    placements
}

/// Number of pages `placements` occupy. An empty document still has one.
pub fn page_count(placements: &[Placement]) -> usize {
    placements.last().map_or(1, |p| p.page + 1)
}

/// A line centered between the margins. Text wider than the margins is
/// set smaller (down to a floor) and never starts left of the margin.
fn centered(
    text: &str,
    band_top: f32,
    band_height: f32,
    size: f32,
    style: FontStyle,
    page: PageSize,
) -> TextLine {
    let inset = PAGE_MARGIN + CELL_PADDING;
    let available = page.width - 2.0 * inset;
    let mut width = text_width(text, style, size);
    let mut size = size;
    if width > available {
        size = (size * available / width).max(MIN_CENTERED_FONT_SIZE);
        width = text_width(text, style, size);
    }
    TextLine {
        text: text.to_string(),
        x: ((page.width - width) / 2.0).max(inset),
        baseline: baseline_in(band_top, band_height, size),
        font_size: size,
        style,
    }
}

fn left(text: &str, band_top: f32, band_height: f32, size: f32, style: FontStyle) -> TextLine {
    TextLine {
        text: text.to_string(),
        x: PAGE_MARGIN + CELL_PADDING,
        baseline: baseline_in(band_top, band_height, size),
        font_size: size,
        style,
    }
}

/// Baseline that vertically centers a line of `size` in a band.
fn baseline_in(band_top: f32, band_height: f32, size: f32) -> f32 {
    band_top + band_height / 2.0 + 0.3 * size
}

/// Lay out a composed test as pages.
pub fn layout(title: &str, test: &ComposedTest, options: &RenderOptions) -> Vec<PageLayout> {
    let page = options.page_size;
    let text_width_max = page.width - 2.0 * (PAGE_MARGIN + CELL_PADDING);

    let body_top = PAGE_MARGIN + HEADER_HEIGHT;
    let first_top = if options.subheading.is_some() {
        body_top + SUBHEADING_HEIGHT
    } else {
        body_top
    };
    let frame = Frame {
        first_top,
        top: body_top,
        bottom: page.height - BREAK_MARGIN,
        gap: QUESTION_GAP,
    };

    let wrapped: Vec<Vec<String>> = test
        .iter()
        .map(|q| wrap(&q.label(), text_width_max, FontStyle::Regular, BODY_FONT_SIZE))
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let heights: Vec<f32> = wrapped
        .iter()
        .map(|lines| (lines.len() + 1) as f32 * LINE_HEIGHT)
        .collect();

    let placements = paginate(&heights, &frame);
    let total_pages = page_count(&placements);

    let mut pages: Vec<PageLayout> = (1..=total_pages)
        .map(|number| PageLayout {
            number,
            header: centered(
                title,
                PAGE_MARGIN,
                HEADER_HEIGHT,
                HEADER_FONT_SIZE,
                FontStyle::Bold,
                page,
            ),
            subheading: None,
            questions: Vec::new(),
            footer: centered(
                &format!("Page {number}"),
                page.height - FOOTER_OFFSET,
                FOOTER_HEIGHT,
                FOOTER_FONT_SIZE,
                FontStyle::Oblique,
                page,
            ),
        })
        .collect();

    if let (Some(text), Some(first)) = (&options.subheading, pages.first_mut()) {
        first.subheading = Some(left(
            text,
            body_top,
            HEADER_HEIGHT,
            HEADER_FONT_SIZE,
            FontStyle::Bold,
        ));
    }

    for ((question, lines), placement) in test.iter().zip(wrapped).zip(&placements) {
        let mut y = placement.top;
        let mut placed_lines = Vec::with_capacity(lines.len());
        for line in &lines {
            placed_lines.push(left(line, y, LINE_HEIGHT, BODY_FONT_SIZE, FontStyle::Regular));
            y += LINE_HEIGHT;
        }
        let answer = left(ANSWER_LINE, y, LINE_HEIGHT, BODY_FONT_SIZE, FontStyle::Regular);

        pages[placement.page].questions.push(PlacedQuestion {
            number: question.number,
            lines: placed_lines,
            answer,
        });
    }

    tracing::debug!(
        "laid out {} questions on {} page(s)",
        test.len(),
        total_pages
    );

    pages
}
