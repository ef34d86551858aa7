//! Candidate answers
//!
//! An answer is either multi-choice (free text) or true/false (a
//! boolean whose display text is derived). Both variants know how to
//! populate themselves field-by-field from a flat value stream through
//! an ordered load sequence.

use std::path::{Path, PathBuf};

use crate::cast;
use crate::error::Result;

/// One attribute slot in an answer's load sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerField {
    Text,
    Boolean,
    Image,
}

const MULTI_CHOICE_SEQUENCE: &[AnswerField] = &[AnswerField::Text, AnswerField::Image];
const TRUE_FALSE_SEQUENCE: &[AnswerField] = &[AnswerField::Boolean, AnswerField::Image];

/// Outcome of one sequential load.
///
/// Early exhaustion of the value stream is not an error: the values
/// already consumed stay applied, and the caller reads `exhausted` to
/// know no further answers can be loaded. `all_empty` drives the
/// empty-answer discard policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerLoad {
    /// Number of raw values consumed from the stream
    pub consumed: usize,
    /// Whether the stream ran out before all fields were filled
    pub exhausted: bool,
    /// Whether every consumed raw value was the empty string
    pub all_empty: bool,
}

/// A candidate answer with an optional image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Free-text alternative
    MultiChoice {
        text: String,
        image: Option<PathBuf>,
    },
    /// Boolean alternative; the display text is derived
    TrueFalse {
        boolean: bool,
        image: Option<PathBuf>,
    },
}

impl Answer {
    /// Create a multi-choice answer without an image
    pub fn multi_choice(text: impl Into<String>) -> Self {
        Answer::MultiChoice {
            text: text.into(),
            image: None,
        }
    }

    /// Create a true/false answer without an image
    pub fn true_false(boolean: bool) -> Self {
        Answer::TrueFalse {
            boolean,
            image: None,
        }
    }

    /// Attach an image
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        match &mut self {
            Answer::MultiChoice { image, .. } | Answer::TrueFalse { image, .. } => {
                *image = Some(path.into());
            }
        }
        self
    }

    /// Display text ("True"/"False" for boolean answers)
    pub fn text(&self) -> &str {
        match self {
            Answer::MultiChoice { text, .. } => text,
            Answer::TrueFalse { boolean: true, .. } => "True",
            Answer::TrueFalse { boolean: false, .. } => "False",
        }
    }

    /// The image, if any
    pub fn image(&self) -> Option<&Path> {
        match self {
            Answer::MultiChoice { image, .. } | Answer::TrueFalse { image, .. } => {
                image.as_deref()
            }
        }
    }

    /// Boolean payload of a true/false answer
    pub fn boolean(&self) -> Option<bool> {
        match self {
            Answer::TrueFalse { boolean, .. } => Some(*boolean),
            Answer::MultiChoice { .. } => None,
        }
    }

    /// Prefix the image path; an unset image stays unset
    pub fn add_parent_path(&mut self, parent: &Path) {
        match self {
            Answer::MultiChoice { image, .. } | Answer::TrueFalse { image, .. } => {
                if let Some(path) = image.take() {
                    *image = Some(parent.join(path));
                }
            }
        }
    }

    fn load_sequence(&self) -> &'static [AnswerField] {
        match self {
            Answer::MultiChoice { .. } => MULTI_CHOICE_SEQUENCE,
            Answer::TrueFalse { .. } => TRUE_FALSE_SEQUENCE,
        }
    }

    fn set_field(&mut self, field: AnswerField, raw: &str) -> Result<()> {
        match (&mut *self, field) {
            (Answer::MultiChoice { text, .. }, AnswerField::Text) => {
                *text = raw.to_string();
            }
            (Answer::TrueFalse { boolean, .. }, AnswerField::Boolean) => {
                *boolean = cast::boolean(raw)?;
            }
            (Answer::MultiChoice { image, .. }, AnswerField::Image)
            | (Answer::TrueFalse { image, .. }, AnswerField::Image) => {
                *image = cast::image(raw);
            }
            // The load sequence is fixed per variant, so a mismatched
            // field cannot be reached from load_sequentially.
            _ => {}
        }
        Ok(())
    }

    /// Fill attributes in load-sequence order from the value stream.
    ///
    /// Consumes exactly one value per field and leaves surplus values
    /// in the stream. A cast failure propagates as a data-format error.
    pub fn load_sequentially<I>(&mut self, values: &mut I) -> Result<AnswerLoad>
    where
        I: Iterator<Item = String>,
    {
        let mut load = AnswerLoad {
            consumed: 0,
            exhausted: false,
            all_empty: true,
        };

        for &field in self.load_sequence() {
            let Some(raw) = values.next() else {
                load.exhausted = true;
                break;
            };
            load.consumed += 1;
            if !raw.is_empty() {
                load.all_empty = false;
            }
            self.set_field(field, &raw)?;
        }

        Ok(load)
    }
}
