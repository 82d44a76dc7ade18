//! Progress statistics shown in the setup header and by `quizdrill stats`.

use serde::Serialize;

use crate::bank::QuestionBank;
use crate::progress::ProgressState;

/// Aggregated progress counters.
///
/// A pure projection of bank plus progress; recomputed after every mutation
/// and whenever another instance's write is merged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Total questions across all decks.
    pub total: usize,
    /// Questions displayed at least once.
    pub completed: usize,
    /// Questions currently starred.
    pub starred: usize,
    /// `completed / total` rounded to whole percent; 0 for an empty bank.
    pub percent: u32,
}

impl Stats {
    /// Compute stats from the bank and current progress.
    #[must_use]
    pub fn compute(bank: &QuestionBank, progress: &ProgressState) -> Self {
        let total = bank.total_questions();
        let completed = progress.completed.len();
        let percent = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total,
            completed,
            starred: progress.starred.len(),
            percent,
        }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} total | {} completed ({}%) | {} starred",
            self.total, self.completed, self.percent, self.starred
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Deck, Question, QuestionBank};

    fn bank_of(n: u64) -> QuestionBank {
        QuestionBank::new(vec![Deck {
            label: "D".to_string(),
            questions: (1..=n)
                .map(|i| Question {
                    id: i.into(),
                    question: format!("q{i}"),
                    answer: format!("a{i}"),
                })
                .collect(),
        }])
    }

    #[test]
    fn test_stats_empty_bank() {
        let stats = Stats::compute(&QuestionBank::default(), &ProgressState::default());
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_stats_counts_and_percent() {
        let bank = bank_of(4);
        let mut progress = ProgressState::default();
        progress.mark_completed(1.into());
        progress.toggle_star(2.into());

        let stats = Stats::compute(&bank, &progress);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.starred, 1);
        assert_eq!(stats.percent, 25);
    }

    #[test]
    fn test_stats_percent_rounds() {
        let bank = bank_of(3);
        let mut progress = ProgressState::default();
        progress.mark_completed(1.into());

        // 1/3 = 33.33 -> 33
        assert_eq!(Stats::compute(&bank, &progress).percent, 33);

        progress.mark_completed(2.into());
        // 2/3 = 66.67 -> 67
        assert_eq!(Stats::compute(&bank, &progress).percent, 67);
    }

    #[test]
    fn test_stats_full_completion() {
        let bank = bank_of(2);
        let mut progress = ProgressState::default();
        progress.mark_completed(1.into());
        progress.mark_completed(2.into());

        let stats = Stats::compute(&bank, &progress);
        assert_eq!(stats.percent, 100);
    }

    #[test]
    fn test_stats_display() {
        let bank = bank_of(2);
        let mut progress = ProgressState::default();
        progress.mark_completed(1.into());

        let text = Stats::compute(&bank, &progress).to_string();
        assert_eq!(text, "2 total | 1 completed (50%) | 0 starred");
    }
}
