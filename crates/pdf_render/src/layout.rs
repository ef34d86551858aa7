//! Two-level item layout
//!
//! Turns the flat item stream into positioned page content. Top-level
//! items are set in bold at the left margin, sub-level items indented
//! beneath them, each labeled per the configured bullet kind. An item's
//! text and image are kept on one page whenever they fit on a single
//! page at all.

use exam_model::{Item, ItemLevel};

use crate::document::MediaBox;
use crate::fonts::{self, StandardFont};
use crate::images::{self, ImageData};
use crate::options::{BulletKind, PageSize, RenderOptions};
use crate::writer::{PdfError, Result};

const MARGIN: f64 = 50.0;
const SUB_INDENT: f64 = 20.0;
const IMAGE_WIDTH: f64 = 80.0;
const LEADING_FACTOR: f64 = 1.4;
const FOOTER_Y: f64 = 25.0;

/// One positioned element on a page
#[derive(Debug, Clone, PartialEq)]
pub enum Placed {
    /// A line of text with its baseline at (x, y)
    Text {
        x: f64,
        y: f64,
        font: StandardFont,
        size: f64,
        text: String,
    },
    /// An image, drawn into the rectangle at (x, y)
    Image {
        /// Index into [`LayoutResult::images`]
        index: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// One laid-out page
#[derive(Debug, Clone, Default)]
pub struct LayoutPage {
    pub placed: Vec<Placed>,
}

/// The positioned document, ready to be written
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub pages: Vec<LayoutPage>,
    pub images: Vec<ImageData>,
    pub media_box: MediaBox,
}

/// Lay out an item stream.
///
/// A sub-level item arriving before any top-level item violates the
/// stream protocol and is an error.
pub fn layout_items<I>(items: I, options: &RenderOptions) -> Result<LayoutResult>
where
    I: IntoIterator<Item = Item>,
{
    let mut engine = LayoutEngine::new(options);
    let mut seen_top = false;

    for item in items {
        match item.level {
            ItemLevel::Top => {
                seen_top = true;
                engine.place_item(&item, ItemLevel::Top)?;
            }
            ItemLevel::Sub => {
                if !seen_top {
                    return Err(PdfError::Protocol(
                        "sub-level item before any top-level item".to_string(),
                    ));
                }
                engine.place_item(&item, ItemLevel::Sub)?;
            }
        }
    }

    Ok(engine.finish())
}

struct LayoutEngine<'a> {
    options: &'a RenderOptions,
    media_box: MediaBox,
    cursor: f64,
    current: Vec<Placed>,
    pages: Vec<LayoutPage>,
    images: Vec<ImageData>,
    top_count: u32,
    sub_count: u32,
}

impl<'a> LayoutEngine<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        let media_box = match options.page_size {
            PageSize::A4 => MediaBox::a4(),
            PageSize::Letter => MediaBox::letter(),
        };
        let mut engine = Self {
            options,
            media_box,
            cursor: 0.0,
            current: Vec::new(),
            pages: Vec::new(),
            images: Vec::new(),
            top_count: 0,
            sub_count: 0,
        };
        engine.start_page();
        engine
    }

    fn leading(&self) -> f64 {
        self.options.font_size * LEADING_FACTOR
    }

    fn heading_gap(&self) -> f64 {
        if self.options.heading.is_some() {
            2.0 * self.leading()
        } else {
            0.0
        }
    }

    /// Vertical space available for items on a fresh page
    fn usable_height(&self) -> f64 {
        self.media_box.height() - 2.0 * MARGIN - self.heading_gap()
    }

    fn start_page(&mut self) {
        self.cursor = self.media_box.height() - MARGIN;
        if let Some(heading) = &self.options.heading {
            self.current.push(Placed::Text {
                x: MARGIN,
                y: self.cursor,
                font: StandardFont::HelveticaBold,
                size: self.options.font_size + 1.0,
                text: heading.clone(),
            });
            self.cursor -= self.heading_gap();
        }
    }

    fn break_page(&mut self) {
        let placed = std::mem::take(&mut self.current);
        self.pages.push(LayoutPage { placed });
        self.start_page();
    }

    fn place_item(&mut self, item: &Item, level: ItemLevel) -> Result<()> {
        let (font, indent, bullet) = match level {
            ItemLevel::Top => {
                self.top_count += 1;
                self.sub_count = 0;
                // Breathing room between question blocks
                self.cursor -= 0.5 * self.leading();
                (
                    StandardFont::HelveticaBold,
                    0.0,
                    bullet_label(self.options.top_bullet, self.top_count),
                )
            }
            ItemLevel::Sub => {
                self.sub_count += 1;
                (
                    StandardFont::Helvetica,
                    SUB_INDENT,
                    bullet_label(self.options.sub_bullet, self.sub_count),
                )
            }
        };

        let size = self.options.font_size;
        let text = match bullet {
            Some(label) => format!("{} {}", label, item.text),
            None => item.text.clone(),
        };
        let max_width = self.media_box.width() - 2.0 * MARGIN - indent;
        let lines = wrap_text(&text, font, size, max_width);

        let image = item
            .image
            .as_deref()
            .map(images::load_image)
            .transpose()?;
        let image_height = image
            .as_ref()
            .map(|img| IMAGE_WIDTH * img.height as f64 / img.width as f64)
            .unwrap_or(0.0);

        // Keep text and image together when the whole block fits on a
        // single page; oversized blocks flow across pages line by line.
        let block = lines.len() as f64 * self.leading()
            + if image.is_some() {
                image_height + 0.5 * self.leading()
            } else {
                0.0
            };
        if self.cursor - block < MARGIN && block <= self.usable_height() {
            self.break_page();
        }

        for line in lines {
            if self.cursor - self.leading() < MARGIN {
                self.break_page();
            }
            self.cursor -= self.leading();
            self.current.push(Placed::Text {
                x: MARGIN + indent,
                y: self.cursor,
                font,
                size,
                text: line,
            });
        }

        if let Some(image) = image {
            if self.cursor - image_height < MARGIN {
                self.break_page();
            }
            self.cursor -= image_height;
            let index = self.images.len();
            self.current.push(Placed::Image {
                index,
                x: MARGIN + indent,
                y: self.cursor,
                width: IMAGE_WIDTH,
                height: image_height,
            });
            self.cursor -= 0.5 * self.leading();
            self.images.push(image);
        }

        Ok(())
    }

    fn finish(mut self) -> LayoutResult {
        if !self.current.is_empty() {
            let placed = std::mem::take(&mut self.current);
            self.pages.push(LayoutPage { placed });
        }

        // Footer and page numbers need the final page count
        let total = self.pages.len();
        let size = self.options.font_size - 2.0;
        for (i, page) in self.pages.iter_mut().enumerate() {
            if let Some(footer) = &self.options.footer {
                page.placed.push(Placed::Text {
                    x: MARGIN,
                    y: FOOTER_Y,
                    font: StandardFont::HelveticaOblique,
                    size,
                    text: footer.clone(),
                });
            }
            let label = format!("Page {} of {}", i + 1, total);
            let x = self.media_box.width()
                - MARGIN
                - fonts::text_width(&label, StandardFont::Helvetica, size);
            page.placed.push(Placed::Text {
                x,
                y: FOOTER_Y,
                font: StandardFont::Helvetica,
                size,
                text: label,
            });
        }

        LayoutResult {
            pages: self.pages,
            images: self.images,
            media_box: self.media_box,
        }
    }
}

fn bullet_label(kind: BulletKind, count: u32) -> Option<String> {
    match kind {
        BulletKind::Number => Some(format!("{}.", count)),
        BulletKind::Letter => {
            let letter = char::from(b'A' + ((count - 1) % 26) as u8);
            Some(format!("{})", letter))
        }
        BulletKind::None => None,
    }
}

/// Greedy word wrap using average-width estimates
fn wrap_text(text: &str, font: StandardFont, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if line.is_empty() || fonts::text_width(&candidate, font, size) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
