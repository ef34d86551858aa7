//! High-level rendering entry points

use std::path::Path;

use exam_model::Item;

use crate::layout;
use crate::options::RenderOptions;
use crate::writer::{self, Result};

/// Render an item stream into PDF bytes
pub fn render_to_bytes<I>(items: I, options: &RenderOptions) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = Item>,
{
    let laid_out = layout::layout_items(items, options)?;
    tracing::debug!(
        pages = laid_out.pages.len(),
        images = laid_out.images.len(),
        "laid out document"
    );
    writer::write_document(&laid_out, options)
}

/// Render an item stream into a PDF file
pub fn render_to_file<I>(items: I, options: &RenderOptions, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = Item>,
{
    let bytes = render_to_bytes(items, options)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), "wrote PDF");
    Ok(())
}
