//! Integration tests for progress persistence.
//!
//! Exercises the store through its public API the way the application uses
//! it: load on startup, save after mutations, reset, and cross-instance
//! change detection against a shared file.

use quizdrill::bank::{Deck, Question, QuestionBank};
use quizdrill::progress::{LoadOutcome, ProgressState, ProgressStore};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> ProgressStore {
    ProgressStore::new(dir.path().join("progress.json"))
}

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
fn test_first_run_starts_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let (state, outcome) = store.load_with_outcome();
    assert_eq!(outcome, LoadOutcome::Absent);
    assert!(state.completed.is_empty());
    assert!(state.starred.is_empty());
    assert!(state.saved_indices.is_empty());
}

#[test]
fn test_progress_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = store_in(&dir);
        let mut state = store.load();
        state.mark_completed(1.into());
        state.mark_completed("os-4".into());
        state.toggle_star(1.into());
        state.save_index("deck_Networking", 3);
        store.save(&state).unwrap();
    }

    // A fresh store (new process) sees everything
    let mut store = store_in(&dir);
    let (state, outcome) = store.load_with_outcome();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert!(state.completed.contains(&1.into()));
    assert!(state.completed.contains(&"os-4".into()));
    assert!(state.is_starred(&1.into()));
    assert_eq!(state.resume_index("deck_Networking"), 3);
}

#[test]
fn test_wire_format_is_stable() {
    // A document written by an earlier version of the tool loads as-is
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.json");
    std::fs::write(
        &path,
        r#"{
            "completed": [1, 2, "net-9"],
            "starred": ["net-9"],
            "savedIndices": {"mode_all": 4, "deck_A_B": 1}
        }"#,
    )
    .unwrap();

    let mut store = ProgressStore::new(path);
    let (state, outcome) = store.load_with_outcome();

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(state.completed.len(), 3);
    assert!(state.is_starred(&"net-9".into()));
    assert_eq!(state.resume_index("mode_all"), 4);
    assert_eq!(state.resume_index("deck_A_B"), 1);

    // And writing it back keeps the camelCase key
    store.save(&state).unwrap();
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("savedIndices"));
    assert!(!raw.contains("saved_indices"));
}

#[test]
fn test_corrupt_file_discarded_without_error() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    std::fs::write(store.path(), "not json at all").unwrap();

    let (state, outcome) = store.load_with_outcome();
    assert_eq!(outcome, LoadOutcome::Corrupt);
    assert_eq!(state, ProgressState::default());
}

#[test]
fn test_reset_keeps_resume_positions() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let mut state = store.load();
    state.mark_completed(1.into());
    state.toggle_star(2.into());
    state.save_index("mode_starred", 7);
    store.save(&state).unwrap();

    store.reset(&mut state).unwrap();

    assert!(state.completed.is_empty());
    assert!(state.starred.is_empty());
    assert_eq!(state.resume_index("mode_starred"), 7);
    assert!(!store.path().exists());

    // The next save writes the kept indices back out
    store.save(&state).unwrap();
    let reloaded = store.load();
    assert_eq!(reloaded.resume_index("mode_starred"), 7);
    assert!(reloaded.completed.is_empty());
}

#[test]
fn test_two_instances_last_writer_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.json");

    let mut first = ProgressStore::new(path.clone());
    let mut second = ProgressStore::new(path);

    let mut first_state = first.load();
    let mut second_state = second.load();

    // First instance completes question 1 and saves
    first_state.mark_completed(1.into());
    first.save(&first_state).unwrap();

    // Second instance observes the change and adopts it wholesale
    let adopted = second
        .poll_external_change()
        .expect("second instance should see the write");
    assert!(adopted.completed.contains(&1.into()));
    second_state = adopted;

    // Second instance stars a question; first adopts that in turn
    second_state.toggle_star(2.into());
    second.save(&second_state).unwrap();

    let adopted = first
        .poll_external_change()
        .expect("first instance should see the write");
    assert!(adopted.is_starred(&2.into()));
    assert!(adopted.completed.contains(&1.into()));

    // Quiet once both have observed the latest write
    assert!(first.poll_external_change().is_none());
    assert!(second.poll_external_change().is_none());
}

#[test]
fn test_stale_ids_pruned_but_save_load_stable() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let mut state = ProgressState::default();
    state.mark_completed(1.into());
    state.mark_completed(99.into());
    state.save_index("mode_all", 2);
    store.save(&state).unwrap();

    // Startup reconciliation against a bank that no longer has id 99
    let mut loaded = store.load();
    let pruned = loaded.retain_known(&bank_with_ids(&[1, 2, 3]));
    assert_eq!(pruned, 1);
    assert!(loaded.completed.contains(&1.into()));
    assert!(!loaded.completed.contains(&99.into()));
    // Resume positions are untouched by pruning
    assert_eq!(loaded.resume_index("mode_all"), 2);

    // After the pruned state is saved, load/save is a fixed point
    store.save(&loaded).unwrap();
    let first = std::fs::read_to_string(store.path()).unwrap();
    let roundtripped = store.load();
    store.save(&roundtripped).unwrap();
    let second = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(first, second);
}
