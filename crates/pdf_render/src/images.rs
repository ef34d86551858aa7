//! Image embedding
//!
//! JPEG data is passed through untouched (DCTDecode) after scanning the
//! header for dimensions. PNG IDAT data is likewise embedded as-is with
//! FlateDecode and a predictor DecodeParms entry, which restricts
//! support to 8-bit grayscale or RGB images without interlacing or
//! transparency.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::objects::{PdfDictionary, PdfObject, PdfStream};

/// Error type for image operations
#[derive(Debug, Error)]
pub enum ImageError {
    /// Malformed image data
    #[error("invalid image data: {0}")]
    InvalidFormat(String),
    /// IO error reading the image file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Valid image the renderer cannot embed
    #[error("unsupported image: {0}")]
    Unsupported(String),
}

/// Color space for images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component)
    DeviceGray,
    /// RGB (3 components)
    DeviceRGB,
}

impl ColorSpace {
    /// Get the PDF name for this color space
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }

    /// Get the number of components
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }
}

/// Image compression filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    /// DCT (JPEG) compression
    DCTDecode,
    /// Flate (zlib) compression
    FlateDecode,
}

impl ImageFilter {
    /// Get the PDF name for this filter
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ImageFilter::DCTDecode => "DCTDecode",
            ImageFilter::FlateDecode => "FlateDecode",
        }
    }
}

/// Image data ready for embedding as an XObject
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per component
    pub bits_per_component: u8,
    /// Color space
    pub color_space: ColorSpace,
    /// Pre-encoded image data
    pub data: Vec<u8>,
    /// Filter the viewer decodes the data with
    pub filter: ImageFilter,
    /// DecodeParms entry, required for PNG predictor data
    pub decode_parms: Option<PdfDictionary>,
}

impl ImageData {
    /// Create image data from JPEG bytes
    pub fn from_jpeg(data: Vec<u8>) -> Result<Self, ImageError> {
        let (width, height) = parse_jpeg_dimensions(&data)?;

        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space: ColorSpace::DeviceRGB,
            data,
            filter: ImageFilter::DCTDecode,
            decode_parms: None,
        })
    }

    /// Create image data from PNG bytes
    pub fn from_png(data: Vec<u8>) -> Result<Self, ImageError> {
        let header = parse_png_header(&data)?;

        let color_space = match header.color_type {
            0 => ColorSpace::DeviceGray,
            2 => ColorSpace::DeviceRGB,
            other => {
                return Err(ImageError::Unsupported(format!(
                    "PNG color type {} (only grayscale and RGB)",
                    other
                )))
            }
        };
        if header.bit_depth != 8 {
            return Err(ImageError::Unsupported(format!(
                "PNG bit depth {} (only 8)",
                header.bit_depth
            )));
        }
        if header.interlace != 0 {
            return Err(ImageError::Unsupported(
                "interlaced PNG".to_string(),
            ));
        }

        // The concatenated IDAT payload is a zlib stream of per-row
        // predictor-filtered scanlines, exactly what FlateDecode with
        // a PNG predictor expects.
        let mut parms = PdfDictionary::new();
        parms.insert("Predictor", PdfObject::Integer(15));
        parms.insert("Colors", PdfObject::Integer(color_space.components() as i64));
        parms.insert("BitsPerComponent", PdfObject::Integer(8));
        parms.insert("Columns", PdfObject::Integer(header.width as i64));

        Ok(Self {
            width: header.width,
            height: header.height,
            bits_per_component: 8,
            color_space,
            data: collect_idat(&data)?,
            filter: ImageFilter::FlateDecode,
            decode_parms: Some(parms),
        })
    }

    /// Convert to PDF XObject stream
    pub fn to_xobject(&self) -> PdfStream {
        let mut dict = PdfDictionary::new().with_type("XObject");

        dict.insert("Subtype", PdfObject::name("Image"));
        dict.insert("Width", PdfObject::Integer(self.width as i64));
        dict.insert("Height", PdfObject::Integer(self.height as i64));
        dict.insert(
            "BitsPerComponent",
            PdfObject::Integer(self.bits_per_component as i64),
        );
        dict.insert("ColorSpace", PdfObject::name(self.color_space.pdf_name()));
        dict.insert("Filter", PdfObject::name(self.filter.pdf_name()));
        if let Some(ref parms) = self.decode_parms {
            dict.insert("DecodeParms", PdfObject::Dictionary(parms.clone()));
        }

        PdfStream {
            dict,
            data: self.data.clone(),
            compressed: true,
        }
    }
}

/// Load an image file, dispatching on its extension
pub fn load_image(path: &Path) -> Result<ImageData, ImageError> {
    let data = std::fs::read(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => ImageData::from_jpeg(data),
        "png" => ImageData::from_png(data),
        other => Err(ImageError::Unsupported(format!(
            "image format {:?} of {}",
            other,
            path.display()
        ))),
    }
}

/// Parse a JPEG header to extract dimensions
fn parse_jpeg_dimensions(data: &[u8]) -> Result<(u32, u32), ImageError> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(ImageError::InvalidFormat("not a valid JPEG".to_string()));
    }

    let mut pos = 2;
    while pos < data.len() - 1 {
        if data[pos] != 0xFF {
            return Err(ImageError::InvalidFormat("invalid JPEG marker".to_string()));
        }

        let marker = data[pos + 1];
        pos += 2;

        while pos < data.len() && data[pos] == 0xFF {
            pos += 1;
        }

        // Standalone markers carry no length
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            continue;
        }

        if pos + 2 > data.len() {
            break;
        }

        let length = ((data[pos] as usize) << 8) | (data[pos + 1] as usize);

        // SOF markers contain the image dimensions
        if (0xC0..=0xC3).contains(&marker)
            || (0xC5..=0xC7).contains(&marker)
            || (0xC9..=0xCB).contains(&marker)
            || (0xCD..=0xCF).contains(&marker)
        {
            if pos + 7 > data.len() {
                break;
            }
            let height = ((data[pos + 3] as u32) << 8) | (data[pos + 4] as u32);
            let width = ((data[pos + 5] as u32) << 8) | (data[pos + 6] as u32);
            return Ok((width, height));
        }

        pos += length;
    }

    Err(ImageError::InvalidFormat(
        "could not find image dimensions in JPEG".to_string(),
    ))
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

struct PngHeader {
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    interlace: u8,
}

/// Parse the PNG signature and IHDR chunk
fn parse_png_header(data: &[u8]) -> Result<PngHeader, ImageError> {
    if data.len() < 33 || data[..8] != PNG_SIGNATURE {
        return Err(ImageError::InvalidFormat("not a valid PNG".to_string()));
    }
    if &data[12..16] != b"IHDR" {
        return Err(ImageError::InvalidFormat("missing PNG IHDR".to_string()));
    }

    Ok(PngHeader {
        width: u32::from_be_bytes([data[16], data[17], data[18], data[19]]),
        height: u32::from_be_bytes([data[20], data[21], data[22], data[23]]),
        bit_depth: data[24],
        color_type: data[25],
        interlace: data[28],
    })
}

/// Concatenate the payloads of every IDAT chunk
fn collect_idat(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    let mut payload = Vec::new();
    let mut pos = 8;

    while pos + 8 <= data.len() {
        let length =
            u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]) as usize;
        let chunk_type = &data[pos + 4..pos + 8];
        let chunk_end = pos + 8 + length;
        if chunk_end + 4 > data.len() {
            return Err(ImageError::InvalidFormat("truncated PNG chunk".to_string()));
        }

        if chunk_type == b"IDAT" {
            payload.extend_from_slice(&data[pos + 8..chunk_end]);
        }
        if chunk_type == b"IEND" {
            break;
        }

        // Skip payload and CRC
        pos = chunk_end + 4;
    }

    if payload.is_empty() {
        return Err(ImageError::InvalidFormat("PNG has no IDAT data".to_string()));
    }
    Ok(payload)
}

/// Assigns resource names (Im0, Im1, ...) to a document's images
#[derive(Debug, Default)]
pub struct ImageManager {
    count: u32,
}

impl ImageManager {
    /// Create a new image manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next image and return its resource name
    pub fn register(&mut self) -> String {
        let name = format!("Im{}", self.count);
        self.count += 1;
        name
    }

    /// Number of registered images
    pub fn image_count(&self) -> usize {
        self.count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal JPEG prefix: SOI followed by a SOF0 frame for 20x10
    fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x0B, 0x08]);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&[0x03, 0x01, 0x11, 0x00]);
        data
    }

    /// Minimal PNG: signature, IHDR, one IDAT byte, IEND
    fn png_bytes(width: u32, height: u32, color_type: u8) -> Vec<u8> {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, color_type, 0, 0, 0]);
        data.extend_from_slice(&[0, 0, 0, 0]); // CRC (unchecked)
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"IDAT");
        data.push(0x78);
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(b"IEND");
        data.extend_from_slice(&[0, 0, 0, 0]);
        data
    }

    #[test]
    fn test_jpeg_dimensions() {
        let image = ImageData::from_jpeg(jpeg_bytes(20, 10)).unwrap();
        assert_eq!(image.width, 20);
        assert_eq!(image.height, 10);
        assert_eq!(image.filter, ImageFilter::DCTDecode);
    }

    #[test]
    fn test_jpeg_invalid() {
        assert!(matches!(
            ImageData::from_jpeg(vec![0x00, 0x01]),
            Err(ImageError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_png_rgb() {
        let image = ImageData::from_png(png_bytes(30, 40, 2)).unwrap();
        assert_eq!(image.width, 30);
        assert_eq!(image.height, 40);
        assert_eq!(image.color_space, ColorSpace::DeviceRGB);
        assert_eq!(image.filter, ImageFilter::FlateDecode);
        assert!(image.decode_parms.is_some());
        assert_eq!(image.data, vec![0x78]);
    }

    #[test]
    fn test_png_unsupported_color_type() {
        // Color type 6 is RGBA
        assert!(matches!(
            ImageData::from_png(png_bytes(30, 40, 6)),
            Err(ImageError::Unsupported(_))
        ));
    }

    #[test]
    fn test_xobject_dictionary() {
        let image = ImageData::from_jpeg(jpeg_bytes(20, 10)).unwrap();
        let xobject = image.to_xobject();
        assert!(xobject.dict.get("Width").is_some());
        assert!(xobject.dict.get("Height").is_some());
        assert!(xobject.dict.get("ColorSpace").is_some());
        assert!(xobject.dict.get("Filter").is_some());
        assert!(xobject.compressed);
    }

    #[test]
    fn test_image_manager_names() {
        let mut manager = ImageManager::new();
        assert_eq!(manager.register(), "Im0");
        assert_eq!(manager.register(), "Im1");
        assert_eq!(manager.image_count(), 2);
    }

    #[test]
    fn test_load_image_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.bmp");
        std::fs::write(&path, b"data").unwrap();
        assert!(matches!(
            load_image(&path),
            Err(ImageError::Unsupported(_))
        ));
    }

    #[test]
    fn test_load_image_missing_file() {
        assert!(matches!(
            load_image(Path::new("does/not/exist.png")),
            Err(ImageError::Io(_))
        ));
    }
}
