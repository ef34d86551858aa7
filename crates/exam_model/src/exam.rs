//! The exam container
//!
//! An exam owns an ordered question list and knows how to populate it
//! from input rows. Column-to-field mapping is either the row's natural
//! column order or an explicit attribute selector whose "void" entries
//! pad the load sequence with empty values.

use std::path::Path;

use question_bank::Record;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ExamError, Result};
use crate::question::{Question, QuestionKind};

/// Optional row field naming the question variant
const QUESTION_TYPE_KEY: &str = "Question type";

/// Selector entry contributing an empty value instead of a column read
const VOID_KEY: &str = "void";

/// An ordered collection of questions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exam {
    questions: Vec<Question>,
    attribute_selector: Vec<String>,
}

impl Exam {
    /// Create an empty exam
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exam from existing questions
    pub fn from_questions<I>(questions: I) -> Self
    where
        I: IntoIterator<Item = Question>,
    {
        Self {
            questions: questions.into_iter().collect(),
            attribute_selector: Vec::new(),
        }
    }

    /// Questions in their current order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check whether the exam has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Append one question
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// The configured attribute selector, empty when unset
    pub fn attribute_selector(&self) -> &[String] {
        &self.attribute_selector
    }

    /// Set which named row fields are read, and in what order. "void"
    /// entries keep their position in the load sequence but contribute
    /// an empty value instead of reading any column.
    pub fn set_attribute_selector<I, S>(&mut self, selection: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_selector = selection.into_iter().map(Into::into).collect();
    }

    /// Load questions from input rows, appending to any already present.
    ///
    /// The question variant comes from the optional "Question type"
    /// field (absent means multi-choice). Rows yielding zero values are
    /// skipped; a selector key missing from a row is fatal.
    pub fn load<'a, I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for row in rows {
            let kind = question_kind(row)?;
            let values = self.select_values(row)?;
            if values.is_empty() {
                tracing::debug!("skipped row with no loadable values");
                continue;
            }

            let mut question = Question::new(kind);
            question.load_sequentially(&mut values.into_iter())?;
            self.questions.push(question);
        }
        Ok(())
    }

    fn select_values(&self, row: &Record) -> Result<Vec<String>> {
        if self.attribute_selector.is_empty() {
            return Ok(row.values().map(str::to_string).collect());
        }

        let mut selected = Vec::with_capacity(self.attribute_selector.len());
        for key in &self.attribute_selector {
            if key == VOID_KEY {
                selected.push(String::new());
                continue;
            }
            let value = row
                .get(key)
                .ok_or_else(|| ExamError::KeyMismatch(key.clone()))?;
            selected.push(value.to_string());
        }
        Ok(selected)
    }

    /// Resolve every image path relative to the source file or folder
    pub fn add_path_parent(&mut self, source: &Path) {
        for question in &mut self.questions {
            question.add_parent_path(source);
        }
    }

    /// Shuffle question order, then each question's answers
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions_shuffle(rng);
        self.answers_shuffle(rng);
    }

    /// Shuffle answer order within every question
    pub fn answers_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for question in &mut self.questions {
            question.shuffle(rng);
        }
    }

    /// Shuffle the top-level question order
    pub fn questions_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
    }
}

fn question_kind(row: &Record) -> Result<QuestionKind> {
    match row.get(QUESTION_TYPE_KEY) {
        None | Some("MultiChoice") => Ok(QuestionKind::MultiChoice),
        Some("TrueFalse") => Ok(QuestionKind::TrueFalse),
        Some(other) => Err(ExamError::UnknownQuestionType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Answer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn full_row() -> Record {
        Record::from_pairs([
            ("question", "Q"),
            ("subject", "S"),
            ("image", "I"),
            ("level", "1"),
            ("A", "a"),
            ("Ai", "ai"),
            ("B", "b"),
            ("Bi", "bi"),
            ("C", "c"),
            ("Ci", "ci"),
        ])
    }

    #[test]
    fn test_load_natural_column_order() {
        let rows = vec![full_row()];
        let mut exam = Exam::new();
        exam.load(&rows).unwrap();

        assert_eq!(exam.len(), 1);
        let question = &exam.questions()[0];
        assert_eq!(question.text(), "Q");
        assert_eq!(question.subject(), "S");
        assert_eq!(question.image(), Some(Path::new("I")));
        assert_eq!(question.level(), 1);

        let texts: Vec<&str> = question.answers().iter().map(Answer::text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        let images: Vec<Option<&Path>> =
            question.answers().iter().map(Answer::image).collect();
        assert_eq!(
            images,
            vec![
                Some(Path::new("ai")),
                Some(Path::new("bi")),
                Some(Path::new("ci"))
            ]
        );
    }

    #[test]
    fn test_load_with_void_selector() {
        let rows = vec![Record::from_pairs([
            ("question", "Q"),
            ("A", "a"),
            ("B", "b"),
            ("C", "c"),
            ("D", "d"),
            ("E", "e"),
        ])];

        let mut exam = Exam::new();
        exam.set_attribute_selector([
            "question", "void", "void", "void", "A", "void", "B", "void", "C", "void",
            "D", "void", "E",
        ]);
        exam.load(&rows).unwrap();

        let question = &exam.questions()[0];
        assert_eq!(question.text(), "Q");
        // Voids pad subject, image and level, then each answer's image.
        assert_eq!(question.subject(), "");
        assert_eq!(question.image(), None);
        assert_eq!(question.level(), 0);

        let texts: Vec<&str> = question.answers().iter().map(Answer::text).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d", "e"]);
        assert!(question.answers().iter().all(|a| a.image().is_none()));
    }

    #[test]
    fn test_load_selector_maps_named_fields() {
        let rows = vec![Record::from_pairs([
            ("extra", "x"),
            ("question", "Q"),
            ("subject", "S"),
            ("image", ""),
            ("level", "2"),
            ("A", "a"),
            ("Ai", ""),
        ])];

        let mut exam = Exam::new();
        exam.set_attribute_selector([
            "question", "subject", "image", "level", "A", "Ai",
        ]);
        exam.load(&rows).unwrap();

        let question = &exam.questions()[0];
        assert_eq!(question.text(), "Q");
        assert_eq!(question.level(), 2);
        assert_eq!(question.answers().len(), 1);
        assert_eq!(question.answers()[0].text(), "a");
    }

    #[test]
    fn test_load_missing_selector_key_is_fatal() {
        let rows = vec![Record::from_pairs([("question", "Q")])];
        let mut exam = Exam::new();
        exam.set_attribute_selector(["question", "absent"]);

        let result = exam.load(&rows);
        assert!(matches!(result, Err(ExamError::KeyMismatch(key)) if key == "absent"));
    }

    #[test]
    fn test_load_skips_rows_with_no_values() {
        let rows = vec![Record::new(), full_row()];
        let mut exam = Exam::new();
        exam.load(&rows).unwrap();
        assert_eq!(exam.len(), 1);
    }

    #[test]
    fn test_load_appends_across_calls() {
        let mut exam = Exam::new();
        exam.load(&[full_row()]).unwrap();
        exam.load(&[full_row()]).unwrap();
        assert_eq!(exam.len(), 2);
    }

    #[test]
    fn test_load_true_false_question_type() {
        let rows = vec![Record::from_pairs([
            ("question", "Q"),
            ("subject", "S"),
            ("image", ""),
            ("level", "0"),
            ("A", "true"),
            ("Ai", ""),
            ("B", "false"),
            ("Bi", ""),
        ])];

        let mut exam = Exam::new();
        exam.set_attribute_selector([
            "question", "subject", "image", "level", "A", "Ai", "B", "Bi",
        ]);
        // Natural order would consume the type column itself, so the
        // type key rides alongside the selected fields.
        let rows: Vec<Record> = rows
            .into_iter()
            .map(|mut record| {
                record.push("Question type", "TrueFalse");
                record
            })
            .collect();
        exam.load(&rows).unwrap();

        let question = &exam.questions()[0];
        assert_eq!(question.kind(), QuestionKind::TrueFalse);
        assert_eq!(question.answers().len(), 2);
        assert_eq!(question.correct_option().as_deref(), Some("True"));
    }

    #[test]
    fn test_load_unknown_question_type_is_fatal() {
        let rows = vec![Record::from_pairs([
            ("Question type", "Essay"),
            ("question", "Q"),
        ])];
        let mut exam = Exam::new();
        let result = exam.load(&rows);
        assert!(matches!(result, Err(ExamError::UnknownQuestionType(_))));
    }

    #[test]
    fn test_add_path_parent() {
        let mut exam = Exam::new();
        exam.load(&[full_row()]).unwrap();
        exam.add_path_parent(Path::new("bank/questions.csv"));

        let question = &exam.questions()[0];
        assert_eq!(question.image(), Some(Path::new("bank/I")));
        assert_eq!(
            question.answers()[0].image(),
            Some(Path::new("bank/ai"))
        );
    }

    #[test]
    fn test_shuffle_reproducible_across_identical_exams() {
        let build = || {
            let mut exam = Exam::new();
            exam.load(&[full_row(), full_row(), full_row()]).unwrap();
            exam
        };
        let mut first = build();
        let mut second = build();

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        first.shuffle(&mut rng_a);
        second.shuffle(&mut rng_b);

        let snapshot = |exam: &Exam| -> Vec<(Vec<String>, Option<String>)> {
            exam.questions()
                .iter()
                .map(|q| {
                    (
                        q.answers().iter().map(|a| a.text().to_string()).collect(),
                        q.correct_option(),
                    )
                })
                .collect()
        };
        assert_eq!(snapshot(&first), snapshot(&second));
    }

    #[test]
    fn test_questions_shuffle_only_reorders_top_level() {
        let mut exam = Exam::new();
        for text in ["one", "two", "three", "four"] {
            exam.add_question(Question::multi_choice().with_text(text));
        }

        let mut rng = StdRng::seed_from_u64(3);
        exam.questions_shuffle(&mut rng);

        let mut texts: Vec<&str> = exam.questions().iter().map(Question::text).collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["four", "one", "three", "two"]);
    }

    #[test]
    fn test_image_paths_are_pathbufs() {
        let mut exam = Exam::new();
        exam.load(&[full_row()]).unwrap();
        let image: Option<PathBuf> =
            exam.questions()[0].image().map(Path::to_path_buf);
        assert_eq!(image.as_deref(), Some(Path::new("I")));
    }
}
