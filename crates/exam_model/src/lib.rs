//! Exam data model
//!
//! This crate holds the in-memory representation of an exam and the
//! operations the generation pipeline relies on:
//!
//! - `answer`: candidate answers, loaded field-by-field from a flat
//!   value stream via an explicit (field, caster) dispatch table
//! - `question`: a question with an ordered answer list, single-correct
//!   tracking, and a correctness-preserving shuffle
//! - `exam`: the question container; loads rows through an optional
//!   attribute selector, resolves image paths, shuffles
//! - `serialize`: flattens an exam into the two-level item stream the
//!   PDF renderer consumes (assignment pass and correction pass)
//!
//! Shuffling always takes an explicit `&mut impl Rng`, so callers and
//! tests control seeding.

mod answer;
mod cast;
mod error;
mod exam;
mod question;
mod serialize;

pub use answer::{Answer, AnswerLoad};
pub use error::{ExamError, Result};
pub use exam::Exam;
pub use question::{Question, QuestionKind};
pub use serialize::{Item, ItemLevel, SerializeExam};
