//! Session selection and quiz building.
//!
//! A session is defined by a study mode and, in deck mode, an ordered list of
//! selected decks. Two orderings matter and are deliberately different:
//!
//! - the question sequence concatenates decks in *selection* order, so the
//!   user studies decks in the order they picked them;
//! - the session key sorts deck labels, so `[B, A]` and `[A, B]` resume from
//!   the same saved position.

use clap::ValueEnum;
use thiserror::Error;

use crate::bank::{Question, QuestionBank};
use crate::progress::ProgressState;

/// Study mode: which questions make up the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SessionMode {
    /// Questions from explicitly selected decks, in selection order.
    #[default]
    Deck,
    /// Every question in the bank, in bank order.
    All,
    /// Starred questions only, in bank order.
    Starred,
}

impl SessionMode {
    /// Display label for the setup screen.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deck => "By deck",
            Self::All => "All questions",
            Self::Starred => "Starred only",
        }
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Deck => "deck",
            Self::All => "all",
            Self::Starred => "starred",
        };
        write!(f, "{name}")
    }
}

/// Why a quiz could not be started. The display text is shown to the user
/// verbatim in the error overlay; the app stays on the setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Starred mode with nothing starred yet.
    #[error("no starred questions yet - star questions while studying first")]
    NoStarredQuestions,

    /// Deck mode with no decks picked.
    #[error("select at least one deck to study")]
    NoDeckSelected,

    /// A selected deck label is not in the bank.
    #[error("unknown deck: \"{0}\"")]
    UnknownDeck(String),

    /// Selection produced zero questions (e.g. all selected decks are empty).
    #[error("nothing to study - the selection contains no questions")]
    EmptySelection,
}

/// Derive the resume key for a mode/deck combination.
///
/// Deck labels are sorted before joining so the key is independent of
/// selection order.
#[must_use]
pub fn session_key(mode: SessionMode, selected_decks: &[String]) -> String {
    match mode {
        SessionMode::All => "mode_all".to_string(),
        SessionMode::Starred => "mode_starred".to_string(),
        SessionMode::Deck => {
            let mut labels: Vec<&str> = selected_decks.iter().map(String::as_str).collect();
            labels.sort_unstable();
            format!("deck_{}", labels.join("_"))
        }
    }
}

/// Build the question sequence for a session.
///
/// # Errors
///
/// Returns a [`SelectionError`] describing why the session cannot start; the
/// caller leaves all state unchanged.
pub fn build_question_set(
    mode: SessionMode,
    selected_decks: &[String],
    bank: &QuestionBank,
    progress: &ProgressState,
) -> Result<Vec<Question>, SelectionError> {
    let questions: Vec<Question> = match mode {
        SessionMode::All => bank.all_questions().cloned().collect(),
        SessionMode::Starred => {
            let starred: Vec<Question> = bank
                .all_questions()
                .filter(|q| progress.is_starred(&q.id))
                .cloned()
                .collect();
            if starred.is_empty() {
                return Err(SelectionError::NoStarredQuestions);
            }
            starred
        }
        SessionMode::Deck => {
            if selected_decks.is_empty() {
                return Err(SelectionError::NoDeckSelected);
            }
            let mut questions = Vec::new();
            for label in selected_decks {
                let deck = bank
                    .deck(label)
                    .ok_or_else(|| SelectionError::UnknownDeck(label.clone()))?;
                questions.extend(deck.questions.iter().cloned());
            }
            questions
        }
    };

    if questions.is_empty() {
        return Err(SelectionError::EmptySelection);
    }

    Ok(questions)
}

/// An active quiz: the built question sequence and the cursor into it.
#[derive(Debug, Clone)]
pub struct QuizSession {
    key: String,
    questions: Vec<Question>,
    index: usize,
}

impl QuizSession {
    /// Build a session and restore its saved position.
    ///
    /// The stored index is used as-is when it is in range; an out-of-range
    /// value (the bank shrank since it was saved) resets to 0.
    ///
    /// # Errors
    ///
    /// Any [`SelectionError`] from [`build_question_set`].
    pub fn start(
        mode: SessionMode,
        selected_decks: &[String],
        bank: &QuestionBank,
        progress: &ProgressState,
    ) -> Result<Self, SelectionError> {
        let questions = build_question_set(mode, selected_decks, bank, progress)?;
        let key = session_key(mode, selected_decks);

        let saved = progress.resume_index(&key);
        let index = if saved < questions.len() { saved } else { 0 };

        log::debug!(
            "Starting session {key}: {} questions, resuming at {index}",
            questions.len()
        );

        Ok(Self {
            key,
            questions,
            index,
        })
    }

    /// The resume key this session persists its index under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of questions in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Sessions are never empty; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// All questions in study order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Current cursor position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The question under the cursor.
    #[must_use]
    pub fn current(&self) -> &Question {
        &self.questions[self.index]
    }

    /// Whether the cursor is on the first question.
    #[must_use]
    pub fn at_first(&self) -> bool {
        self.index == 0
    }

    /// Whether the cursor is on the last question.
    #[must_use]
    pub fn at_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    /// Advance to the next question. No-op at the last question.
    ///
    /// Returns `true` if the cursor moved; only a move re-enters a question
    /// and triggers persistence.
    pub fn next(&mut self) -> bool {
        if self.at_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Step back to the previous question. No-op at the first question.
    pub fn prev(&mut self) -> bool {
        if self.at_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Progress through the session as a percentage for the gauge, counting
    /// the current question as reached.
    #[must_use]
    pub fn position_percent(&self) -> u16 {
        (((self.index + 1) as f64 / self.questions.len() as f64) * 100.0).min(100.0) as u16
    }
}
