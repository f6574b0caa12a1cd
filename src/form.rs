//! The fixed question list and per-question answer storage.

/// Number of pages in the form.
pub const QUESTION_COUNT: usize = 4;

/// Identifier for one of the four fixed questions.
///
/// The variants are ordered by page, so the page index and the 1-based
/// wire number are both derived from the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionId {
    Name,
    Email,
    Profession,
    Feedback,
}

impl QuestionId {
    /// All questions in page order.
    pub const ALL: [QuestionId; QUESTION_COUNT] = [
        QuestionId::Name,
        QuestionId::Email,
        QuestionId::Profession,
        QuestionId::Feedback,
    ];

    /// 0-based position in the page sequence.
    pub fn index(self) -> usize {
        match self {
            QuestionId::Name => 0,
            QuestionId::Email => 1,
            QuestionId::Profession => 2,
            QuestionId::Feedback => 3,
        }
    }

    /// 1-based question number used on the wire.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_index(index: usize) -> Option<QuestionId> {
        QuestionId::ALL.get(index).copied()
    }

    pub fn from_number(number: u8) -> Option<QuestionId> {
        QuestionId::from_index(usize::from(number).checked_sub(1)?)
    }

    /// Prompt text shown on the question page.
    pub fn prompt(self) -> &'static str {
        match self {
            QuestionId::Name => "What is your full name?",
            QuestionId::Email => "What is your email address?",
            QuestionId::Profession => "What is your profession?",
            QuestionId::Feedback => "What is your feedback or comments?",
        }
    }
}

/// One owned answer per question, present (possibly empty) from
/// construction onward.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    values: [String; QUESTION_COUNT],
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: QuestionId) -> &str {
        &self.values[id.index()]
    }

    pub fn set(&mut self, id: QuestionId, value: impl Into<String>) {
        self.values[id.index()] = value.into();
    }

    /// Whether the answer is empty after trimming whitespace.
    pub fn is_blank(&self, id: QuestionId) -> bool {
        self.get(id).trim().is_empty()
    }
}
