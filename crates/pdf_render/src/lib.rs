//! PDF rendering for two-level item streams
//!
//! This crate turns the flat item sequence produced by the exam
//! serializer into a PDF document:
//!
//! - `layout`: positions items on pages (word wrap, bullets, images,
//!   keep-together, heading and footer)
//! - `writer`: the PDF file machinery (objects, xref, compression)
//! - `objects`, `content`, `document`, `fonts`, `images`: the object
//!   model, content-stream operators and resources the writer emits
//!
//! The top-level entry points are [`render_to_bytes`] and
//! [`render_to_file`].
//!
//! # Example
//!
//! ```no_run
//! use exam_model::Item;
//! use pdf_render::{render_to_file, RenderOptions};
//!
//! let items = vec![
//!     Item::top("What color is the sky?", None),
//!     Item::sub("blue", None),
//!     Item::sub("green", None),
//! ];
//! let options = RenderOptions::new().with_title("Exam 1");
//! render_to_file(items, &options, "exam.pdf".as_ref())?;
//! # Ok::<(), pdf_render::PdfError>(())
//! ```

mod api;
mod content;
mod document;
mod fonts;
mod images;
mod layout;
mod objects;
mod options;
mod writer;

pub use api::{render_to_bytes, render_to_file};
pub use images::ImageError;
pub use options::{BulletKind, PageSize, RenderOptions};
pub use writer::{PdfError, Result};
