//! Flattening an exam into a renderable item stream
//!
//! The renderer consumes a flat sequence of two-level items: a `Top`
//! item opens a block and `Sub` items belong to the most recent `Top`.
//! Two passes exist over the same exam: the assignment (questions with
//! their alternatives) and the correction key (one line per question
//! naming the correct option).

use std::path::{Path, PathBuf};

use crate::exam::Exam;
use crate::question::Question;

/// Heading text of the correction pass
const CORRECTION_HEADING: &str = "correction";

/// Nesting level of a serialized item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLevel {
    /// Opens a block; every non-empty stream starts with one
    Top,
    /// Belongs to the preceding top-level item
    Sub,
}

/// One renderable unit: a level, a text and an optional image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub level: ItemLevel,
    pub text: String,
    pub image: Option<PathBuf>,
}

impl Item {
    /// Create a top-level item
    pub fn top(text: impl Into<String>, image: Option<PathBuf>) -> Self {
        Self {
            level: ItemLevel::Top,
            text: text.into(),
            image,
        }
    }

    /// Create a sub-level item
    pub fn sub(text: impl Into<String>, image: Option<PathBuf>) -> Self {
        Self {
            level: ItemLevel::Sub,
            text: text.into(),
            image,
        }
    }
}

/// Lazy item-stream views over a borrowed exam
#[derive(Debug, Clone, Copy)]
pub struct SerializeExam<'a> {
    exam: &'a Exam,
}

impl<'a> SerializeExam<'a> {
    pub fn new(exam: &'a Exam) -> Self {
        Self { exam }
    }

    /// The assignment stream: each question as a `Top` item followed by
    /// one `Sub` item per answer, in the exam's current order.
    pub fn assignment(&self) -> impl Iterator<Item = Item> + 'a {
        self.exam.questions().iter().flat_map(|question| {
            let answers = question
                .answers()
                .iter()
                .map(|answer| Item::sub(answer.text(), answer.image().map(Path::to_path_buf)));
            std::iter::once(question_item(question)).chain(answers)
        })
    }

    /// The correction stream: a "correction" heading followed by one
    /// `Sub` item per question carrying its correct option. An exam
    /// with no questions yields an empty stream, heading included.
    pub fn correction(&self) -> impl Iterator<Item = Item> + 'a {
        let questions = self.exam.questions();
        let heading = (!questions.is_empty()).then(|| Item::top(CORRECTION_HEADING, None));

        heading.into_iter().chain(
            questions
                .iter()
                .map(|question| Item::sub(question.correct_option().unwrap_or_default(), None)),
        )
    }
}

fn question_item(question: &Question) -> Item {
    Item::top(question.text(), question.image().map(Path::to_path_buf))
}
