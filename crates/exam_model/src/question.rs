//! Questions with single-correct answer tracking
//!
//! A question owns an ordered answer list and tracks exactly one
//! correct answer whenever the list is non-empty. The invariant holds
//! across every mutation: adding answers, selecting the correct one by
//! index or letter, and shuffling.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::answer::Answer;
use crate::cast;
use crate::error::{ExamError, Result};

const LETTER_A: u8 = b'A';

/// Question variants; answer-count and correctness rules differ per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Generic question, letter-labeled answers
    Plain,
    /// Multi-choice question, letter-labeled answers
    MultiChoice,
    /// True/false question, exactly two answers with distinct booleans
    TrueFalse,
}

impl QuestionKind {
    /// Fresh answer of the kind this question loads
    fn answer_template(self) -> Answer {
        match self {
            QuestionKind::Plain | QuestionKind::MultiChoice => Answer::multi_choice(""),
            QuestionKind::TrueFalse => Answer::true_false(false),
        }
    }
}

/// One attribute slot in the question's load sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionField {
    Text,
    Subject,
    Image,
    Level,
}

const LOAD_SEQUENCE: &[QuestionField] = &[
    QuestionField::Text,
    QuestionField::Subject,
    QuestionField::Image,
    QuestionField::Level,
];

/// A question with its candidate answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    kind: QuestionKind,
    text: String,
    subject: String,
    image: Option<PathBuf>,
    level: u32,
    answers: Vec<Answer>,
    correct_index: Option<usize>,
}

impl Question {
    /// Create an empty question of the given kind
    pub fn new(kind: QuestionKind) -> Self {
        Self {
            kind,
            text: String::new(),
            subject: String::new(),
            image: None,
            level: 0,
            answers: Vec::new(),
            correct_index: None,
        }
    }

    /// Create an empty multi-choice question
    pub fn multi_choice() -> Self {
        Self::new(QuestionKind::MultiChoice)
    }

    /// Create an empty true/false question
    pub fn true_false() -> Self {
        Self::new(QuestionKind::TrueFalse)
    }

    /// Set the question text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Attach an image
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Set the difficulty level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Answers in their current (possibly shuffled) order
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Position of the correct answer, if any answers exist
    pub fn correct_index(&self) -> Option<usize> {
        self.correct_index
    }

    /// The correct answer, if any answers exist
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.correct_index.and_then(|i| self.answers.get(i))
    }

    /// Human-readable correct label: a letter for letter-labeled kinds,
    /// the boolean text for true/false questions
    pub fn correct_option(&self) -> Option<String> {
        match self.kind {
            QuestionKind::TrueFalse => self.correct_answer().map(|a| a.text().to_string()),
            QuestionKind::Plain | QuestionKind::MultiChoice => {
                self.correct_index.map(option_letter)
            }
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append an answer.
    ///
    /// The first answer added is correct by default; later answers
    /// become correct only when `is_correct` is true. True/false
    /// questions accept at most two answers with distinct booleans.
    pub fn add_answer(&mut self, answer: Answer, is_correct: bool) -> Result<()> {
        if self.kind == QuestionKind::TrueFalse {
            if self.answers.len() >= 2 {
                return Err(ExamError::TrueFalseAnswers);
            }
            if let (Some(first), Some(new)) = (
                self.answers.first().and_then(Answer::boolean),
                answer.boolean(),
            ) {
                if first == new {
                    return Err(ExamError::TrueFalseAnswers);
                }
            }
        }

        self.answers.push(answer);
        if is_correct || self.correct_index.is_none() {
            self.correct_index = Some(self.answers.len() - 1);
        }
        Ok(())
    }

    /// Select the correct answer by position
    pub fn set_correct_index(&mut self, index: usize) -> Result<()> {
        if index >= self.answers.len() {
            return Err(ExamError::IndexNotFound(index));
        }
        self.correct_index = Some(index);
        Ok(())
    }

    /// Select the correct answer by option letter, 'A' being the first
    pub fn set_correct_option(&mut self, letter: &str) -> Result<()> {
        let index = letter
            .bytes()
            .next()
            .filter(|_| letter.len() == 1)
            .filter(|b| b.is_ascii_uppercase())
            .map(|b| (b - LETTER_A) as usize)
            .ok_or_else(|| ExamError::LetterNotFound(letter.to_string()))?;

        if index >= self.answers.len() {
            return Err(ExamError::LetterNotFound(letter.to_string()));
        }
        self.correct_index = Some(index);
        Ok(())
    }

    /// Permute the answers in place, preserving which answer is correct.
    ///
    /// Letter-labeled kinds get a uniform permutation; true/false
    /// questions are normalized so the "True" alternative is listed
    /// first. No-op with fewer than two answers.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.answers.len() < 2 {
            return;
        }

        match self.kind {
            QuestionKind::TrueFalse => {
                if self.answers[1].boolean() == Some(true) {
                    self.answers.swap(0, 1);
                    self.correct_index = self.correct_index.map(|i| 1 - i);
                }
            }
            QuestionKind::Plain | QuestionKind::MultiChoice => {
                let mut order: Vec<usize> = (0..self.answers.len()).collect();
                order.shuffle(rng);

                let shuffled: Vec<Answer> =
                    order.iter().map(|&i| self.answers[i].clone()).collect();
                self.answers = shuffled;

                if let Some(correct) = self.correct_index {
                    self.correct_index = order.iter().position(|&i| i == correct);
                }
            }
        }
    }

    /// Prefix the question's image and every answer image with the
    /// parent directory of `base` (or `base` itself when it is a
    /// directory). Unset images stay unset.
    pub fn add_parent_path(&mut self, base: &Path) {
        let parent = if base.is_dir() {
            base
        } else {
            base.parent().unwrap_or_else(|| Path::new(""))
        };

        if let Some(image) = self.image.take() {
            self.image = Some(parent.join(image));
        }
        for answer in &mut self.answers {
            answer.add_parent_path(parent);
        }
    }

    // =========================================================================
    // Sequential loading
    // =========================================================================

    /// Fill the question's own fields (text, subject, image, level) from
    /// the value stream, then load answers from the remaining values.
    ///
    /// Answers whose every loaded field is the empty string are
    /// discarded; a partially-filled final answer is kept when
    /// non-empty. Loading stops when the stream is exhausted.
    pub fn load_sequentially<I>(&mut self, values: &mut I) -> Result<()>
    where
        I: Iterator<Item = String>,
    {
        for &field in LOAD_SEQUENCE {
            let Some(raw) = values.next() else {
                return Ok(());
            };
            self.set_field(field, &raw)?;
        }
        self.load_answers(values)
    }

    fn set_field(&mut self, field: QuestionField, raw: &str) -> Result<()> {
        match field {
            QuestionField::Text => self.text = raw.to_string(),
            QuestionField::Subject => self.subject = raw.to_string(),
            QuestionField::Image => self.image = cast::image(raw),
            QuestionField::Level => self.level = cast::level(raw)?,
        }
        Ok(())
    }

    fn load_answers<I>(&mut self, values: &mut I) -> Result<()>
    where
        I: Iterator<Item = String>,
    {
        loop {
            // True/false questions are full at two answers; trailing
            // empty cells must not manufacture a third.
            if self.kind == QuestionKind::TrueFalse && self.answers.len() == 2 {
                return Ok(());
            }

            let mut answer = self.kind.answer_template();
            let load = answer.load_sequentially(values)?;

            if load.consumed > 0 && !load.all_empty {
                self.add_answer(answer, false)?;
            } else if load.consumed > 0 {
                tracing::debug!(text = self.text.as_str(), "discarded empty answer");
            }

            if load.exhausted {
                return Ok(());
            }
        }
    }
}

fn option_letter(index: usize) -> String {
    char::from(LETTER_A + index as u8).to_string()
}
