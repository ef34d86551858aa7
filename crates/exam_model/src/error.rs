//! Error types for the exam model

use thiserror::Error;

/// Errors raised while building or mutating an exam
#[derive(Debug, Error)]
pub enum ExamError {
    /// A raw field value could not be cast to its target type
    #[error("invalid {field} value in input data: {value:?}")]
    InvalidField {
        field: &'static str,
        value: String,
    },

    /// The attribute selector names a column absent from a row
    #[error("key mismatch in csv file: column {0:?} not found")]
    KeyMismatch(String),

    /// "Question type" value outside the recognized set
    #[error("unknown question type: {0:?}")]
    UnknownQuestionType(String),

    /// Correct answer selected by an index not among the answers
    #[error("no answer with index {0}")]
    IndexNotFound(usize),

    /// Correct answer selected by a letter not among the answers
    #[error("no answer with letter {0:?}")]
    LetterNotFound(String),

    /// True/false questions take exactly two answers with distinct booleans
    #[error("only two alternative answers are allowed")]
    TrueFalseAnswers,
}

/// Result type for exam model operations
pub type Result<T> = std::result::Result<T, ExamError>;
