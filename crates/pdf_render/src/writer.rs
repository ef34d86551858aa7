//! PDF file generation
//!
//! The low-level [`PdfWriter`] handles object numbering, byte offsets,
//! stream compression and the file skeleton (header, body, xref,
//! trailer). [`write_document`] assembles a laid-out document into a
//! complete file.

use std::io::{self, Write};

use thiserror::Error;

use crate::content::ContentStream;
use crate::document::{create_catalog, create_pages, DocumentInfo, PdfPage, PdfVersion};
use crate::fonts::{create_font_dict, FontManager};
use crate::images::{ImageError, ImageManager};
use crate::layout::{LayoutResult, Placed};
use crate::objects::{PdfObject, PdfSerializer, PdfStream};
use crate::options::RenderOptions;

/// Error type for rendering
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    /// Item stream protocol violation
    #[error("malformed item stream: {0}")]
    Protocol(String),
    /// Image loading or embedding failure
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Result type for rendering
pub type Result<T> = std::result::Result<T, PdfError>;

/// An object recorded for the cross-reference table
#[derive(Debug)]
struct ObjectEntry {
    obj_num: u32,
    gen_num: u16,
    offset: u64,
}

/// Low-level PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    objects: Vec<ObjectEntry>,
    next_obj_num: u32,
    version: PdfVersion,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    /// Create a new PDF writer
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            next_obj_num: 1,
            version,
            compress: true,
        }
    }

    /// Set whether to compress streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the PDF header with the binary marker
    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", self.version.as_str()))?;
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: PdfObject) -> Result<()> {
        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&object)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")?;

        self.objects.push(ObjectEntry {
            obj_num,
            gen_num: 0,
            offset,
        });

        Ok(())
    }

    /// Write a stream object, compressing it when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));

        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Stream(stream))?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")?;

        self.objects.push(ObjectEntry {
            obj_num,
            gen_num: 0,
            offset,
        });

        Ok(())
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;

        self.objects.sort_by_key(|e| e.obj_num);
        let entries: Vec<_> = self
            .objects
            .iter()
            .map(|e| (e.obj_num, e.offset, e.gen_num))
            .collect();

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", self.next_obj_num))?;

        // Free entry for object 0
        self.write_str("0000000000 65535 f \n")?;

        let mut expected_num = 1u32;
        for (obj_num, offset, gen_num) in entries {
            // Unwritten object numbers become free entries
            while expected_num < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected_num += 1;
            }
            self.write_str(&format!("{:010} {:05} n \n", offset, gen_num))?;
            expected_num = obj_num + 1;
        }

        self.write_str("trailer\n")?;

        let mut trailer = crate::objects::PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(self.next_obj_num as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref, 0));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info, 0));
        }

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Compress stream data with zlib
fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));

    Ok(stream)
}

/// Write a laid-out document as a complete PDF file
pub fn write_document(layout: &LayoutResult, options: &RenderOptions) -> Result<Vec<u8>> {
    if layout.pages.is_empty() {
        return Err(PdfError::InvalidDocument("no pages to write".to_string()));
    }

    let mut pdf = PdfWriter::new(Vec::new(), PdfVersion::default());
    pdf.set_compression(options.compress);
    pdf.write_header()?;

    let catalog_ref = pdf.allocate_object();
    let pages_ref = pdf.allocate_object();
    let info_ref = pdf.allocate_object();

    // Build content streams first so every used font gets a resource name
    let mut font_manager = FontManager::new();
    let mut image_manager = ImageManager::new();
    let image_names: Vec<String> = layout.images.iter().map(|_| image_manager.register()).collect();

    let mut content_streams = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        content_streams.push(build_content(page, &image_names, &mut font_manager));
    }

    let used_fonts: Vec<_> = font_manager
        .fonts()
        .map(|(font, name)| (font, name.to_string()))
        .collect();
    let font_refs: Vec<_> = used_fonts
        .into_iter()
        .map(|(font, name)| (font, name, pdf.allocate_object()))
        .collect();

    let image_refs: Vec<u32> = layout.images.iter().map(|_| pdf.allocate_object()).collect();

    let mut page_refs = Vec::with_capacity(layout.pages.len());
    let mut content_refs = Vec::with_capacity(layout.pages.len());
    for _ in &layout.pages {
        page_refs.push(pdf.allocate_object());
        content_refs.push(pdf.allocate_object());
    }

    pdf.write_object(catalog_ref, PdfObject::Dictionary(create_catalog(pages_ref)))?;
    pdf.write_object(pages_ref, PdfObject::Dictionary(create_pages(&page_refs)))?;

    let mut info = DocumentInfo::new();
    info.title = options.title.clone();
    info.author = options.author.clone();
    info.subject = options.subject.clone();
    pdf.write_object(info_ref, PdfObject::Dictionary(info.to_dictionary()))?;

    for (font, _, obj_ref) in &font_refs {
        pdf.write_object(*obj_ref, PdfObject::Dictionary(create_font_dict(*font)))?;
    }

    for (image, obj_ref) in layout.images.iter().zip(&image_refs) {
        pdf.write_stream_object(*obj_ref, image.to_xobject())?;
    }

    for (i, content) in content_streams.into_iter().enumerate() {
        pdf.write_stream_object(content_refs[i], PdfStream::new(content.into_bytes()))?;

        let mut page = PdfPage::new(layout.media_box).with_content(content_refs[i]);
        for (_, name, obj_ref) in &font_refs {
            page.add_font(name.clone(), *obj_ref);
        }
        for (name, obj_ref) in image_names.iter().zip(&image_refs) {
            page.add_image(name.clone(), *obj_ref);
        }
        pdf.write_object(page_refs[i], PdfObject::Dictionary(page.to_dictionary(pages_ref)))?;
    }

    pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
    pdf.finish()
}

/// Translate one page's placed elements into content stream operators
fn build_content(
    page: &crate::layout::LayoutPage,
    image_names: &[String],
    fonts: &mut FontManager,
) -> ContentStream {
    let mut content = ContentStream::new();

    for placed in &page.placed {
        match placed {
            Placed::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                let name = fonts.resource_name(*font);
                content
                    .begin_text()
                    .set_font(&name, *size)
                    .move_text(*x, *y)
                    .show_text(text)
                    .end_text();
            }
            Placed::Image {
                index,
                x,
                y,
                width,
                height,
            } => {
                content
                    .save_state()
                    .transform(*width, 0.0, 0.0, *height, *x, *y)
                    .draw_xobject(&image_names[*index])
                    .restore_state();
            }
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::PdfDictionary;

    #[test]
    fn test_writer_header() {
        let mut writer = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        writer.write_header().unwrap();
        let buffer = writer.finish().unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.starts_with("%PDF-1.4"));
    }

    #[test]
    fn test_writer_object_framing() {
        let mut writer = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        let obj_num = writer.allocate_object();
        writer.write_object(obj_num, PdfObject::Integer(42)).unwrap();
        let buffer = writer.finish().unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("1 0 obj"));
        assert!(output.contains("42"));
        assert!(output.contains("endobj"));
    }

    #[test]
    fn test_writer_xref_gap_filling() {
        let mut writer = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        let first = writer.allocate_object();
        let _skipped = writer.allocate_object();
        let third = writer.allocate_object();
        writer.write_object(first, PdfObject::Integer(1)).unwrap();
        writer.write_object(third, PdfObject::Integer(3)).unwrap();
        writer.write_xref_and_trailer(first, None).unwrap();
        let buffer = writer.finish().unwrap();

        let output = String::from_utf8_lossy(&buffer);
        // Object 0 plus the skipped object are free entries
        assert_eq!(output.matches("0000000000 65535 f").count(), 2);
        assert!(output.contains("startxref"));
        assert!(output.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_stream_compression_sets_filter() {
        let mut writer = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        let obj_num = writer.allocate_object();
        writer
            .write_stream_object(obj_num, PdfStream::new(b"BT ET".to_vec()))
            .unwrap();
        let buffer = writer.finish().unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("/Filter /FlateDecode"));
        assert!(output.contains("/Length"));
    }

    #[test]
    fn test_stream_uncompressed_keeps_data() {
        let mut writer = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        writer.set_compression(false);
        let obj_num = writer.allocate_object();
        let mut stream = PdfStream::new(b"BT ET".to_vec());
        stream.dict = PdfDictionary::new();
        writer.write_stream_object(obj_num, stream).unwrap();
        let buffer = writer.finish().unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("BT ET"));
        assert!(!output.contains("FlateDecode"));
    }
}
