//! Data structures for the question bank.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single question.
///
/// Bank authors may use integers or strings; both are accepted and kept
/// distinct (`1` and `"1"` are different ids). Ids are the sole identity used
/// by progress tracking, so they must be unique across all decks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    /// Numeric id, e.g. `42`.
    Number(u64),
    /// String id, e.g. `"net-001"`.
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A single flashcard: prompt text and the answer revealed on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier across the whole bank.
    pub id: QuestionId,
    /// Prompt text shown first.
    pub question: String,
    /// Answer text revealed on demand.
    pub answer: String,
}

/// A named, ordered group of questions; the unit of selection in deck mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Display label, also the key used in deck selection.
    pub label: String,
    /// Questions in authored order.
    pub questions: Vec<Question>,
}

impl Deck {
    /// Number of questions in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check whether the deck has no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The full question bank: an ordered sequence of decks.
///
/// Order matters: "all" and "starred" modes iterate decks in bank order, and
/// the setup screen lists decks in the same order.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    decks: Vec<Deck>,
}

impl QuestionBank {
    /// Build a bank from decks. Callers are expected to have validated id
    /// uniqueness; [`crate::bank::loader`] does this for parsed input.
    #[must_use]
    pub fn new(decks: Vec<Deck>) -> Self {
        Self { decks }
    }

    /// All decks in bank order.
    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    /// Look up a deck by label.
    #[must_use]
    pub fn deck(&self, label: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.label == label)
    }

    /// Deck labels in bank order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.decks.iter().map(|d| d.label.as_str())
    }

    /// Number of decks.
    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    /// Total number of questions across all decks.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.decks.iter().map(Deck::len).sum()
    }

    /// Check whether the bank contains no questions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_questions() == 0
    }

    /// Iterate over every question in bank order.
    pub fn all_questions(&self) -> impl Iterator<Item = &Question> {
        self.decks.iter().flat_map(|d| d.questions.iter())
    }

    /// The set of every question id in the bank.
    #[must_use]
    pub fn id_set(&self) -> BTreeSet<QuestionId> {
        self.all_questions().map(|q| q.id.clone()).collect()
    }

    /// Check whether an id exists anywhere in the bank.
    #[must_use]
    pub fn contains_id(&self, id: &QuestionId) -> bool {
        self.all_questions().any(|q| &q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bank() -> QuestionBank {
        QuestionBank::new(vec![
            Deck {
                label: "Alpha".to_string(),
                questions: vec![
                    Question {
                        id: 1.into(),
                        question: "q1".to_string(),
                        answer: "a1".to_string(),
                    },
                    Question {
                        id: 2.into(),
                        question: "q2".to_string(),
                        answer: "a2".to_string(),
                    },
                ],
            },
            Deck {
                label: "Beta".to_string(),
                questions: vec![Question {
                    id: "b-1".into(),
                    question: "q3".to_string(),
                    answer: "a3".to_string(),
                }],
            },
        ])
    }

    #[test]
    fn test_question_id_display() {
        assert_eq!(QuestionId::Number(7).to_string(), "7");
        assert_eq!(QuestionId::Text("x-1".to_string()).to_string(), "x-1");
    }

    #[test]
    fn test_question_id_number_and_text_are_distinct() {
        assert_ne!(QuestionId::from(1), QuestionId::from("1"));
    }

    #[test]
    fn test_question_id_serde_untagged() {
        let n: QuestionId = serde_json::from_str("3").unwrap();
        assert_eq!(n, QuestionId::Number(3));

        let s: QuestionId = serde_json::from_str("\"os-3\"").unwrap();
        assert_eq!(s, QuestionId::Text("os-3".to_string()));

        assert_eq!(serde_json::to_string(&n).unwrap(), "3");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"os-3\"");
    }

    #[test]
    fn test_bank_counts() {
        let bank = make_bank();
        assert_eq!(bank.deck_count(), 2);
        assert_eq!(bank.total_questions(), 3);
        assert!(!bank.is_empty());
    }

    #[test]
    fn test_bank_deck_lookup() {
        let bank = make_bank();
        assert_eq!(bank.deck("Alpha").unwrap().len(), 2);
        assert!(bank.deck("Gamma").is_none());
    }

    #[test]
    fn test_bank_labels_preserve_order() {
        let bank = make_bank();
        let labels: Vec<&str> = bank.labels().collect();
        assert_eq!(labels, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_bank_contains_id() {
        let bank = make_bank();
        assert!(bank.contains_id(&1.into()));
        assert!(bank.contains_id(&"b-1".into()));
        assert!(!bank.contains_id(&99.into()));
        // Numeric 1 present, string "1" is not
        assert!(!bank.contains_id(&"1".into()));
    }

    #[test]
    fn test_bank_id_set() {
        let bank = make_bank();
        let ids = bank.id_set();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&2.into()));
    }

    #[test]
    fn test_empty_bank() {
        let bank = QuestionBank::default();
        assert!(bank.is_empty());
        assert_eq!(bank.deck_count(), 0);
    }
}
