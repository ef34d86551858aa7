//! PDF document structure
//!
//! High-level document objects: the catalog, page tree, page objects
//! with their resource dictionaries, and the info dictionary.

use std::collections::HashMap;

use crate::objects::{PdfDictionary, PdfObject};

/// PDF version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfVersion {
    /// PDF 1.4 (Acrobat 5)
    #[default]
    V1_4,
    /// PDF 1.7 (Acrobat 8)
    V1_7,
}

impl PdfVersion {
    /// Get the version string
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_7 => "1.7",
        }
    }
}

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// PDF producer
    pub producer: Option<String>,
}

impl DocumentInfo {
    /// Create a new document info with default values
    pub fn new() -> Self {
        Self {
            creator: Some("examgen".to_string()),
            producer: Some("examgen PDF renderer".to_string()),
            ..Default::default()
        }
    }

    /// Convert to PDF dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();

        if let Some(ref title) = self.title {
            dict.insert("Title", PdfObject::string(title));
        }
        if let Some(ref author) = self.author {
            dict.insert("Author", PdfObject::string(author));
        }
        if let Some(ref subject) = self.subject {
            dict.insert("Subject", PdfObject::string(subject));
        }
        if let Some(ref creator) = self.creator {
            dict.insert("Creator", PdfObject::string(creator));
        }
        if let Some(ref producer) = self.producer {
            dict.insert("Producer", PdfObject::string(producer));
        }

        dict
    }
}

/// Page media box (page dimensions)
#[derive(Debug, Clone, Copy)]
pub struct MediaBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl MediaBox {
    /// Create a media box from dimensions (origin at lower-left)
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        Self {
            llx: 0.0,
            lly: 0.0,
            urx: width,
            ury: height,
        }
    }

    /// A4 size (210 x 297 mm)
    pub fn a4() -> Self {
        Self::from_dimensions(595.0, 842.0)
    }

    /// US Letter size (8.5 x 11 inches)
    pub fn letter() -> Self {
        Self::from_dimensions(612.0, 792.0)
    }

    /// Convert to PDF array
    pub fn to_array(&self) -> PdfObject {
        PdfObject::Array(vec![
            PdfObject::Real(self.llx),
            PdfObject::Real(self.lly),
            PdfObject::Real(self.urx),
            PdfObject::Real(self.ury),
        ])
    }

    /// Get page width
    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    /// Get page height
    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }
}

impl Default for MediaBox {
    fn default() -> Self {
        Self::a4()
    }
}

/// PDF page object
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page media box
    pub media_box: MediaBox,
    /// Content stream reference (object number)
    pub content_ref: Option<u32>,
    /// Font resources (name -> object reference)
    pub fonts: HashMap<String, u32>,
    /// Image XObject resources (name -> object reference)
    pub images: HashMap<String, u32>,
}

impl PdfPage {
    /// Create a new page with the given media box
    pub fn new(media_box: MediaBox) -> Self {
        Self {
            media_box,
            content_ref: None,
            fonts: HashMap::new(),
            images: HashMap::new(),
        }
    }

    /// Set the content stream reference
    pub fn with_content(mut self, content_ref: u32) -> Self {
        self.content_ref = Some(content_ref);
        self
    }

    /// Add a font resource
    pub fn add_font(&mut self, name: impl Into<String>, obj_ref: u32) {
        self.fonts.insert(name.into(), obj_ref);
    }

    /// Add an image resource
    pub fn add_image(&mut self, name: impl Into<String>, obj_ref: u32) {
        self.images.insert(name.into(), obj_ref);
    }

    /// Build the resources dictionary
    pub fn build_resources(&self) -> PdfDictionary {
        let mut resources = PdfDictionary::new();

        if !self.fonts.is_empty() {
            let mut font_dict = PdfDictionary::new();
            for (name, obj_ref) in &self.fonts {
                font_dict.insert(name.clone(), PdfObject::Reference(*obj_ref, 0));
            }
            resources.insert("Font", PdfObject::Dictionary(font_dict));
        }

        if !self.images.is_empty() {
            let mut xobject_dict = PdfDictionary::new();
            for (name, obj_ref) in &self.images {
                xobject_dict.insert(name.clone(), PdfObject::Reference(*obj_ref, 0));
            }
            resources.insert("XObject", PdfObject::Dictionary(xobject_dict));
        }

        // ProcSet is required for PDF 1.4 compatibility
        resources.insert(
            "ProcSet",
            PdfObject::Array(vec![
                PdfObject::name("PDF"),
                PdfObject::name("Text"),
                PdfObject::name("ImageB"),
                PdfObject::name("ImageC"),
            ]),
        );

        resources
    }

    /// Build the page dictionary
    pub fn to_dictionary(&self, parent_ref: u32) -> PdfDictionary {
        let mut dict = PdfDictionary::new().with_type("Page");

        dict.insert("Parent", PdfObject::Reference(parent_ref, 0));
        dict.insert("MediaBox", self.media_box.to_array());
        dict.insert("Resources", PdfObject::Dictionary(self.build_resources()));

        if let Some(content_ref) = self.content_ref {
            dict.insert("Contents", PdfObject::Reference(content_ref, 0));
        }

        dict
    }
}

/// Create a catalog dictionary
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Catalog");
    dict.insert("Pages", PdfObject::Reference(pages_ref, 0));
    dict
}

/// Create a pages dictionary (page tree root)
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Pages");

    let kids: Vec<PdfObject> = page_refs
        .iter()
        .map(|&r| PdfObject::Reference(r, 0))
        .collect();

    dict.insert("Kids", PdfObject::Array(kids));
    dict.insert("Count", PdfObject::Integer(page_refs.len() as i64));

    dict
}
