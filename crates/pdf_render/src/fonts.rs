//! Standard font handling
//!
//! The renderer only uses the built-in Type1 fonts, so no embedding is
//! needed: a font dictionary names the base font and its encoding, and
//! line breaking works from average-width estimates.

use crate::objects::{PdfDictionary, PdfObject};

/// Standard PDF fonts used by the renderer (built into every viewer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    Courier,
}

impl StandardFont {
    /// Get the PDF name for this font
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::Courier => "Courier",
        }
    }

    /// Get the font encoding
    pub fn encoding(&self) -> &'static str {
        "WinAnsiEncoding"
    }

    /// Average glyph width as a fraction of the font size
    fn average_width(&self) -> f64 {
        match self {
            StandardFont::Courier => 0.6,
            StandardFont::Helvetica | StandardFont::HelveticaOblique => 0.5,
            StandardFont::HelveticaBold => 0.52,
            StandardFont::TimesRoman | StandardFont::TimesItalic => 0.45,
            StandardFont::TimesBold => 0.48,
        }
    }
}

/// Estimate the width of a string at the given size
pub fn text_width(text: &str, font: StandardFont, font_size: f64) -> f64 {
    text.chars().count() as f64 * font.average_width() * font_size
}

/// Assigns resource names (F0, F1, ...) to the fonts a document uses
#[derive(Debug, Default)]
pub struct FontManager {
    fonts: Vec<(StandardFont, String)>,
}

impl FontManager {
    /// Create a new font manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource name for a font, registering it on first use
    pub fn resource_name(&mut self, font: StandardFont) -> String {
        if let Some((_, name)) = self.fonts.iter().find(|(f, _)| *f == font) {
            return name.clone();
        }
        let name = format!("F{}", self.fonts.len());
        self.fonts.push((font, name.clone()));
        name
    }

    /// Iterate over registered fonts with their resource names
    pub fn fonts(&self) -> impl Iterator<Item = (StandardFont, &str)> {
        self.fonts.iter().map(|(font, name)| (*font, name.as_str()))
    }

    /// Number of registered fonts
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}

/// Create a font dictionary for a standard font
pub fn create_font_dict(font: StandardFont) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Font");
    dict.insert("Subtype", PdfObject::name("Type1"));
    dict.insert("BaseFont", PdfObject::name(font.pdf_name()));
    dict.insert("Encoding", PdfObject::name(font.encoding()));
    dict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_names() {
        assert_eq!(StandardFont::Helvetica.pdf_name(), "Helvetica");
        assert_eq!(StandardFont::HelveticaBold.pdf_name(), "Helvetica-Bold");
        assert_eq!(StandardFont::TimesBold.pdf_name(), "Times-Bold");
    }

    #[test]
    fn test_font_manager_reuses_names() {
        let mut manager = FontManager::new();
        assert_eq!(manager.resource_name(StandardFont::Helvetica), "F0");
        assert_eq!(manager.resource_name(StandardFont::HelveticaBold), "F1");
        assert_eq!(manager.resource_name(StandardFont::Helvetica), "F0");
        assert_eq!(manager.font_count(), 2);
    }

    #[test]
    fn test_create_font_dict() {
        let dict = create_font_dict(StandardFont::Helvetica);
        assert!(dict.get("Type").is_some());
        assert!(dict.get("Subtype").is_some());
        assert!(dict.get("BaseFont").is_some());
        assert!(dict.get("Encoding").is_some());
    }

    #[test]
    fn test_text_width_estimate() {
        let width = text_width("Hello", StandardFont::Helvetica, 12.0);
        assert!(width > 0.0);
        assert!(width < 100.0);
    }
}
