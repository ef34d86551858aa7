//! PDF content stream generation
//!
//! Builder for the graphics operators that define the visual appearance
//! of a page: text objects (BT/ET, Tf, Td, Tj), transformations (q/Q,
//! cm) and image placement (Do).

use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    /// Create a new empty content stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the content stream data
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Check if the content stream is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // Graphics state
    // =========================================================================

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q");
        self
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q");
        self
    }

    /// Set the transformation matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} {} {} {} cm\n",
            Self::fmt_num(a),
            Self::fmt_num(b),
            Self::fmt_num(c),
            Self::fmt_num(d),
            Self::fmt_num(e),
            Self::fmt_num(f)
        ));
        self
    }

    // =========================================================================
    // Text operators
    // =========================================================================

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Set the font and size (Tf)
    pub fn set_font(&mut self, font_name: &str, size: f64) -> &mut Self {
        self.write_fmt(format_args!("/{} {} Tf\n", font_name, Self::fmt_num(size)));
        self
    }

    /// Move text position (Td)
    pub fn move_text(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} Td\n",
            Self::fmt_num(tx),
            Self::fmt_num(ty)
        ));
        self
    }

    /// Show a text string (Tj)
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.write_pdf_string(text);
        self.write_line(" Tj");
        self
    }

    // =========================================================================
    // XObjects
    // =========================================================================

    /// Paint an XObject (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        self.write_fmt(format_args!("/{} Do\n", name));
        self
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }

    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = self.data.write_fmt(args);
    }

    /// Write a PDF string (escaped)
    fn write_pdf_string(&mut self, s: &str) {
        self.data.push(b'(');
        for byte in s.bytes() {
            match byte {
                b'(' | b')' | b'\\' => {
                    self.data.push(b'\\');
                    self.data.push(byte);
                }
                0x0A => self.data.extend_from_slice(b"\\n"),
                0x0D => self.data.extend_from_slice(b"\\r"),
                0x09 => self.data.extend_from_slice(b"\\t"),
                _ => self.data.push(byte),
            }
        }
        self.data.push(b')');
    }

    /// Format a number for PDF output
    fn fmt_num(n: f64) -> String {
        if n.fract() == 0.0 {
            format!("{:.0}", n)
        } else {
            let s = format!("{:.4}", n);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_stream_text() {
        let mut cs = ContentStream::new();
        cs.begin_text()
            .set_font("F0", 11.0)
            .move_text(50.0, 780.0)
            .show_text("1. What is an exam?")
            .end_text();

        let content = String::from_utf8(cs.into_bytes()).unwrap();
        assert!(content.contains("BT"));
        assert!(content.contains("/F0 11 Tf"));
        assert!(content.contains("50 780 Td"));
        assert!(content.contains("(1. What is an exam?) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_content_stream_image() {
        let mut cs = ContentStream::new();
        cs.save_state()
            .transform(80.0, 0.0, 0.0, 60.0, 50.0, 500.0)
            .draw_xobject("Im0")
            .restore_state();

        let content = String::from_utf8(cs.into_bytes()).unwrap();
        assert!(content.contains("q"));
        assert!(content.contains("80 0 0 60 50 500 cm"));
        assert!(content.contains("/Im0 Do"));
        assert!(content.contains("Q"));
    }

    #[test]
    fn test_string_escaping() {
        let mut cs = ContentStream::new();
        cs.show_text("a(b)c\\d");
        let content = String::from_utf8(cs.into_bytes()).unwrap();
        assert!(content.contains("(a\\(b\\)c\\\\d) Tj"));
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(ContentStream::fmt_num(1.0), "1");
        assert_eq!(ContentStream::fmt_num(3.14159), "3.1416");
        assert_eq!(ContentStream::fmt_num(0.5), "0.5");
    }
}
