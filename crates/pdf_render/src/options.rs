//! Render options

use serde::{Deserialize, Serialize};

/// How items at one nesting level are labeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BulletKind {
    /// "1." "2." "3." ...
    #[default]
    Number,
    /// "A)" "B)" "C)" ...
    Letter,
    /// No label
    None,
}

/// Page dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 595 x 842 points
    #[default]
    A4,
    /// 612 x 792 points
    Letter,
}

/// Options controlling document rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Document title (Info dictionary)
    pub title: Option<String>,
    /// Document author (Info dictionary)
    pub author: Option<String>,
    /// Document subject (Info dictionary)
    pub subject: Option<String>,
    /// Heading printed at the top of every page
    pub heading: Option<String>,
    /// Footer printed at the bottom of every page
    pub footer: Option<String>,
    /// Labeling of top-level items
    pub top_bullet: BulletKind,
    /// Labeling of sub-level items
    pub sub_bullet: BulletKind,
    /// Whether to compress content streams
    pub compress: bool,
    /// Page dimensions
    pub page_size: PageSize,
    /// Body font size in points
    pub font_size: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            heading: None,
            footer: None,
            top_bullet: BulletKind::Number,
            sub_bullet: BulletKind::Letter,
            compress: true,
            page_size: PageSize::A4,
            font_size: 11.0,
        }
    }
}

impl RenderOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the per-page heading
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Set the per-page footer
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set the bullet kinds for both levels
    pub fn with_bullets(mut self, top: BulletKind, sub: BulletKind) -> Self {
        self.top_bullet = top;
        self.sub_bullet = sub;
        self
    }

    /// Enable or disable content stream compression
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.top_bullet, BulletKind::Number);
        assert_eq!(options.sub_bullet, BulletKind::Letter);
        assert!(options.compress);
        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.font_size, 11.0);
    }

    #[test]
    fn test_builders() {
        let options = RenderOptions::new()
            .with_title("Exam 1")
            .with_heading("Final exam")
            .with_bullets(BulletKind::Letter, BulletKind::Number)
            .with_compression(false);

        assert_eq!(options.title.as_deref(), Some("Exam 1"));
        assert_eq!(options.heading.as_deref(), Some("Final exam"));
        assert_eq!(options.top_bullet, BulletKind::Letter);
        assert!(!options.compress);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"topBullet": "letter", "compress": false}"#).unwrap();
        assert_eq!(options.top_bullet, BulletKind::Letter);
        assert!(!options.compress);
        // Unset fields keep their defaults
        assert_eq!(options.sub_bullet, BulletKind::Letter);
        assert_eq!(options.page_size, PageSize::A4);
    }
}
