//! Data structures for persisted progress.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::bank::{QuestionBank, QuestionId};

/// Persisted study progress.
///
/// The serialized shape is the interchange contract with earlier versions of
/// this tool: `{"completed": [...], "starred": [...], "savedIndices": {...}}`.
/// `savedIndices` keeps its camelCase spelling on the wire. All fields default
/// to empty so partial documents load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Ids of every question that has been displayed at least once.
    #[serde(default)]
    pub completed: BTreeSet<QuestionId>,

    /// Ids the user flagged for focused review.
    #[serde(default)]
    pub starred: BTreeSet<QuestionId>,

    /// Last viewed index per session key, so each mode/deck combination
    /// resumes at its own position.
    #[serde(default, rename = "savedIndices")]
    pub saved_indices: BTreeMap<String, usize>,
}

impl ProgressState {
    /// Mark a question as completed.
    ///
    /// Returns `true` if the set changed; re-marking an already completed
    /// question is a no-op, which keeps repeated views of the same index
    /// idempotent on persisted state.
    pub fn mark_completed(&mut self, id: QuestionId) -> bool {
        self.completed.insert(id)
    }

    /// Flip star membership for a question. Returns `true` if it is starred
    /// after the call.
    pub fn toggle_star(&mut self, id: QuestionId) -> bool {
        if self.starred.remove(&id) {
            false
        } else {
            self.starred.insert(id);
            true
        }
    }

    /// Check whether a question is starred.
    #[must_use]
    pub fn is_starred(&self, id: &QuestionId) -> bool {
        self.starred.contains(id)
    }

    /// Record the current index for a session key.
    pub fn save_index(&mut self, key: &str, index: usize) {
        self.saved_indices.insert(key.to_string(), index);
    }

    /// The stored resume index for a session key, 0 if none.
    ///
    /// The caller clamps against the actual question count; a stored value
    /// at or past the end resets to 0 (see [`crate::session::QuizSession`]).
    #[must_use]
    pub fn resume_index(&self, key: &str) -> usize {
        self.saved_indices.get(key).copied().unwrap_or(0)
    }

    /// Clear the completed and starred sets.
    ///
    /// Deliberately leaves `saved_indices` alone: resetting progress does not
    /// forget resume positions. This mirrors the historical behavior and is
    /// flagged in DESIGN.md pending product confirmation.
    pub fn clear_sets(&mut self) {
        self.completed.clear();
        self.starred.clear();
    }

    /// Drop ids that no longer exist in the bank.
    ///
    /// Returns the number of pruned ids. Run once at startup; ids go stale
    /// when the embedded bank changes between releases.
    pub fn retain_known(&mut self, bank: &QuestionBank) -> usize {
        let known = bank.id_set();
        let before = self.completed.len() + self.starred.len();
        self.completed.retain(|id| known.contains(id));
        self.starred.retain(|id| known.contains(id));
        before - (self.completed.len() + self.starred.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Deck, Question};

    fn bank_with_ids(ids: &[u64]) -> QuestionBank {
        QuestionBank::new(vec![Deck {
            label: "D".to_string(),
            questions: ids
                .iter()
                .map(|&n| Question {
                    id: n.into(),
                    question: format!("q{n}"),
                    answer: format!("a{n}"),
                })
                .collect(),
        }])
    }

    #[test]
    fn test_mark_completed_idempotent() {
        let mut state = ProgressState::default();
        assert!(state.mark_completed(1.into()));
        assert!(!state.mark_completed(1.into()));
        assert_eq!(state.completed.len(), 1);
    }

    #[test]
    fn test_toggle_star() {
        let mut state = ProgressState::default();
        assert!(state.toggle_star(5.into()));
        assert!(state.is_starred(&5.into()));
        assert!(!state.toggle_star(5.into()));
        assert!(!state.is_starred(&5.into()));
    }

    #[test]
    fn test_resume_index_default_zero() {
        let state = ProgressState::default();
        assert_eq!(state.resume_index("mode_all"), 0);
    }

    #[test]
    fn test_save_and_resume_index() {
        let mut state = ProgressState::default();
        state.save_index("deck_A", 7);
        assert_eq!(state.resume_index("deck_A"), 7);
        assert_eq!(state.resume_index("deck_B"), 0);
    }

    #[test]
    fn test_clear_sets_keeps_saved_indices() {
        let mut state = ProgressState::default();
        state.mark_completed(1.into());
        state.toggle_star(2.into());
        state.save_index("mode_all", 3);

        state.clear_sets();

        assert!(state.completed.is_empty());
        assert!(state.starred.is_empty());
        assert_eq!(state.resume_index("mode_all"), 3);
    }

    #[test]
    fn test_retain_known_prunes_stale_ids() {
        let mut state = ProgressState::default();
        state.mark_completed(1.into());
        state.mark_completed(99.into());
        state.toggle_star(2.into());
        state.toggle_star(98.into());

        let pruned = state.retain_known(&bank_with_ids(&[1, 2, 3]));

        assert_eq!(pruned, 2);
        assert!(state.completed.contains(&1.into()));
        assert!(!state.completed.contains(&99.into()));
        assert!(state.starred.contains(&2.into()));
        assert!(!state.starred.contains(&98.into()));
    }

    #[test]
    fn test_wire_format_field_names() {
        let mut state = ProgressState::default();
        state.mark_completed(1.into());
        state.save_index("mode_all", 2);

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"completed\":[1]"));
        assert!(json.contains("\"savedIndices\":{\"mode_all\":2}"));
        assert!(!json.contains("saved_indices"));
    }

    #[test]
    fn test_partial_document_loads_with_defaults() {
        let state: ProgressState = serde_json::from_str(r#"{"completed": [1, "x"]}"#).unwrap();
        assert_eq!(state.completed.len(), 2);
        assert!(state.starred.is_empty());
        assert!(state.saved_indices.is_empty());
    }
}
