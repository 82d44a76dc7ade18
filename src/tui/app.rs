//! TUI application state management.
//!
//! # Overview
//!
//! This module manages the application state for the interactive TUI:
//! - Current screen (Setup, Quiz, ConfirmingReset, Quitting)
//! - Study mode and deck selection on the setup screen
//! - The active quiz session and answer visibility
//! - Progress mutations and the flags that tell the run loop to persist them
//!
//! # Architecture
//!
//! The `App` struct is the central state container for the TUI. It is pure
//! state: all file I/O (saving progress, resetting the file, detecting
//! external writes) lives in the run loop, which consumes the
//! [`App::take_pending_save`] and [`App::take_pending_reset`] flags after
//! each action. This keeps every state transition unit-testable without a
//! filesystem.
//!
//! # Example
//!
//! ```
//! use quizdrill::bank::{Deck, Question, QuestionBank};
//! use quizdrill::progress::ProgressState;
//! use quizdrill::session::SessionMode;
//! use quizdrill::tui::app::{Action, App, Screen};
//!
//! let bank = QuestionBank::new(vec![Deck {
//!     label: "Demo".to_string(),
//!     questions: vec![Question {
//!         id: 1u64.into(),
//!         question: "Q?".to_string(),
//!         answer: "A.".to_string(),
//!     }],
//! }]);
//!
//! let mut app = App::new(bank, ProgressState::default(), SessionMode::All, vec![]);
//! app.handle_action(Action::Confirm);
//! assert_eq!(app.screen(), Screen::Quiz);
//! ```

use crate::bank::QuestionBank;
use crate::progress::ProgressState;
use crate::session::{QuizSession, SessionMode};
use crate::stats::Stats;

/// Which screen the TUI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Setup screen: mode picker and deck selection.
    #[default]
    Setup,
    /// Quiz screen: one question at a time.
    Quiz,
    /// Modal confirmation before wiping progress.
    ConfirmingReset,
    /// Application is quitting.
    Quitting,
}

impl Screen {
    /// Check if the application is done (quitting).
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Quitting)
    }
}

/// User action triggered by keyboard input.
///
/// Actions are the result of key event processing. The same action can mean
/// different things on different screens; [`App::handle_action`] interprets
/// them, and actions that make no sense on the current screen are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the deck cursor up (setup screen)
    NavigateUp,
    /// Move the deck cursor down (setup screen)
    NavigateDown,
    /// Cycle through study modes (setup screen)
    CycleMode,
    /// Toggle the deck under the cursor in or out of the selection
    ToggleSelect,
    /// Advance to the next question (quiz screen)
    NextQuestion,
    /// Step back to the previous question (quiz screen)
    PreviousQuestion,
    /// Toggle the star on the current question (quiz screen)
    ToggleStar,
    /// Reveal or hide the answer (quiz screen)
    ShowAnswer,
    /// Ask to wipe completed/starred progress (setup screen)
    ResetProgress,
    /// Confirm: start the quiz, reveal the answer, or approve the reset
    Confirm,
    /// Cancel: leave the quiz, dismiss a modal
    Cancel,
    /// Quit the application
    Quit,
}

impl Action {
    /// All action names accepted in custom keybinding configuration.
    #[must_use]
    pub fn all_names() -> Vec<&'static str> {
        vec![
            "navigate_up",
            "navigate_down",
            "cycle_mode",
            "toggle_select",
            "next_question",
            "previous_question",
            "toggle_star",
            "show_answer",
            "reset_progress",
            "confirm",
            "cancel",
            "quit",
        ]
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "navigate_up" => Ok(Self::NavigateUp),
            "navigate_down" => Ok(Self::NavigateDown),
            "cycle_mode" => Ok(Self::CycleMode),
            "toggle_select" => Ok(Self::ToggleSelect),
            "next_question" => Ok(Self::NextQuestion),
            "previous_question" => Ok(Self::PreviousQuestion),
            "toggle_star" => Ok(Self::ToggleStar),
            "show_answer" => Ok(Self::ShowAnswer),
            "reset_progress" => Ok(Self::ResetProgress),
            "confirm" => Ok(Self::Confirm),
            "cancel" => Ok(Self::Cancel),
            "quit" => Ok(Self::Quit),
            _ => Err(format!("unknown action: {s}")),
        }
    }
}

/// TUI application state.
///
/// # Thread Safety
///
/// This struct is NOT thread-safe and should only be accessed from the main
/// thread. Terminal operations are not thread-safe, so all TUI state
/// modifications happen on the main thread.
#[derive(Debug, Clone)]
pub struct App {
    /// The loaded question bank (immutable for the app's lifetime)
    bank: QuestionBank,
    /// Completed/starred/resume state, mutated as the user studies
    progress: ProgressState,
    /// Aggregated progress stats shown in the header
    stats: Stats,
    /// Current screen
    screen: Screen,
    /// Study mode selected on the setup screen
    mode: SessionMode,
    /// Cursor into the deck list on the setup screen
    deck_cursor: usize,
    /// Selected deck labels, in selection order (the study order)
    selected_decks: Vec<String>,
    /// The active quiz, present while on the quiz screen
    session: Option<QuizSession>,
    /// Whether the current question's answer is visible
    answer_revealed: bool,
    /// Error message to display as an overlay (if any)
    error_message: Option<String>,
    /// Progress changed and should be written to disk
    needs_save: bool,
    /// The user confirmed a reset; the run loop wipes the file
    pending_reset: bool,
}

impl App {
    /// Create a new App on the setup screen.
    ///
    /// `preselected_decks` come from the CLI; labels not present in the bank
    /// are dropped with a warning rather than failing startup.
    #[must_use]
    pub fn new(
        bank: QuestionBank,
        progress: ProgressState,
        mode: SessionMode,
        preselected_decks: Vec<String>,
    ) -> Self {
        let selected_decks: Vec<String> = preselected_decks
            .into_iter()
            .filter(|label| {
                let known = bank.deck(label).is_some();
                if !known {
                    log::warn!("Ignoring unknown deck from CLI: {label:?}");
                }
                known
            })
            .collect();

        let stats = Stats::compute(&bank, &progress);

        Self {
            bank,
            progress,
            stats,
            screen: Screen::Setup,
            mode,
            deck_cursor: 0,
            selected_decks,
            session: None,
            answer_revealed: false,
            error_message: None,
            needs_save: false,
            pending_reset: false,
        }
    }

    // ==================== Accessors ====================

    /// Get the current screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Get the loaded question bank.
    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Get the current progress state.
    #[must_use]
    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    /// Mutable access for the run loop's reset handling.
    pub fn progress_mut(&mut self) -> &mut ProgressState {
        &mut self.progress
    }

    /// Get the current aggregated stats.
    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Get the study mode shown on the setup screen.
    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Get the deck cursor position on the setup screen.
    #[must_use]
    pub fn deck_cursor(&self) -> usize {
        self.deck_cursor
    }

    /// Selected deck labels in selection order.
    #[must_use]
    pub fn selected_decks(&self) -> &[String] {
        &self.selected_decks
    }

    /// Check whether a deck label is currently selected.
    #[must_use]
    pub fn is_deck_selected(&self, label: &str) -> bool {
        self.selected_decks.iter().any(|l| l == label)
    }

    /// The active quiz session, if on the quiz screen.
    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Whether the current question's answer is visible.
    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    /// Get the current error overlay message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether the app wants to exit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.screen.is_done()
    }

    // ==================== Persistence Flags ====================

    /// Consume the save flag. The run loop writes progress when this is true.
    pub fn take_pending_save(&mut self) -> bool {
        std::mem::take(&mut self.needs_save)
    }

    /// Consume the reset flag. The run loop wipes the progress file when
    /// this is true.
    pub fn take_pending_reset(&mut self) -> bool {
        std::mem::take(&mut self.pending_reset)
    }

    /// Replace progress with a state written by another instance.
    ///
    /// Last writer wins: the whole in-memory state is replaced, not merged
    /// field by field. The active session keeps its in-memory cursor.
    pub fn merge_external(&mut self, state: ProgressState) {
        log::info!("Progress file changed externally, adopting new state");
        self.progress = state;
        self.refresh_stats();
    }

    /// Show an error overlay. The run loop uses this for persistence
    /// failures; the next key press dismisses it.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Recompute header stats. Called internally after every progress
    /// mutation, and by the run loop after it mutates progress directly
    /// (reset).
    pub fn refresh_stats(&mut self) {
        self.stats = Stats::compute(&self.bank, &self.progress);
    }

    // ==================== Action Handling ====================

    /// Apply a user action to the current screen.
    ///
    /// Actions that make no sense on the current screen are ignored. While
    /// an error overlay is visible, any action dismisses it.
    pub fn handle_action(&mut self, action: Action) {
        if self.error_message.is_some() {
            self.error_message = None;
            return;
        }

        match self.screen {
            Screen::Setup => self.handle_setup_action(action),
            Screen::Quiz => self.handle_quiz_action(action),
            Screen::ConfirmingReset => self.handle_confirm_action(action),
            Screen::Quitting => {}
        }
    }

    fn handle_setup_action(&mut self, action: Action) {
        match action {
            Action::NavigateUp => {
                self.deck_cursor = self.deck_cursor.saturating_sub(1);
            }
            Action::NavigateDown => {
                let last = self.bank.deck_count().saturating_sub(1);
                self.deck_cursor = (self.deck_cursor + 1).min(last);
            }
            Action::CycleMode => {
                self.mode = match self.mode {
                    SessionMode::Deck => SessionMode::All,
                    SessionMode::All => SessionMode::Starred,
                    SessionMode::Starred => SessionMode::Deck,
                };
            }
            Action::ToggleSelect => self.toggle_deck_under_cursor(),
            Action::Confirm => self.start_quiz(),
            Action::ResetProgress => {
                self.screen = Screen::ConfirmingReset;
            }
            Action::Quit => {
                self.screen = Screen::Quitting;
            }
            _ => {}
        }
    }

    fn handle_quiz_action(&mut self, action: Action) {
        match action {
            Action::NextQuestion => {
                // Boundary no-op: nothing moved, nothing re-persisted
                if self.session.as_mut().is_some_and(QuizSession::next) {
                    self.enter_question();
                }
            }
            Action::PreviousQuestion => {
                if self.session.as_mut().is_some_and(QuizSession::prev) {
                    self.enter_question();
                }
            }
            Action::ToggleStar => {
                if let Some(session) = &self.session {
                    let id = session.current().id.clone();
                    let now_starred = self.progress.toggle_star(id);
                    log::debug!("Star toggled: now_starred={now_starred}");
                    self.needs_save = true;
                    self.refresh_stats();
                }
            }
            Action::ShowAnswer | Action::Confirm => {
                self.answer_revealed = !self.answer_revealed;
            }
            Action::Cancel => self.back_to_setup(),
            Action::Quit => {
                self.screen = Screen::Quitting;
            }
            _ => {}
        }
    }

    fn handle_confirm_action(&mut self, action: Action) {
        match action {
            Action::Confirm => {
                self.pending_reset = true;
                self.screen = Screen::Setup;
            }
            Action::Cancel => {
                self.screen = Screen::Setup;
            }
            Action::Quit => {
                self.screen = Screen::Quitting;
            }
            _ => {}
        }
    }

    // ==================== Transitions ====================

    /// Toggle the deck under the cursor in or out of the selection.
    ///
    /// Selecting a deck implies deck mode; the mode switches automatically
    /// so the selection is never silently ignored.
    fn toggle_deck_under_cursor(&mut self) {
        let Some(deck) = self.bank.decks().get(self.deck_cursor) else {
            return;
        };
        let label = deck.label.clone();

        self.mode = SessionMode::Deck;
        if let Some(pos) = self.selected_decks.iter().position(|l| *l == label) {
            self.selected_decks.remove(pos);
        } else {
            self.selected_decks.push(label);
        }
    }

    /// Try to start a quiz from the current mode and deck selection.
    ///
    /// On failure the selection error is shown in the overlay and all state
    /// stays unchanged.
    fn start_quiz(&mut self) {
        match QuizSession::start(self.mode, &self.selected_decks, &self.bank, &self.progress) {
            Ok(session) => {
                self.session = Some(session);
                self.screen = Screen::Quiz;
                self.enter_question();
            }
            Err(e) => {
                log::debug!("Cannot start session: {e}");
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Book-keeping on arriving at a question: mark it completed, remember
    /// the position under the session key, and hide the previous answer.
    fn enter_question(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let id = session.current().id.clone();
        let key = session.key().to_string();
        let index = session.index();

        self.progress.mark_completed(id);
        self.progress.save_index(&key, index);
        self.needs_save = true;
        self.answer_revealed = false;
        self.refresh_stats();
    }

    /// Leave the quiz and return to a fresh setup screen.
    ///
    /// The deck selection is cleared; the resume index saved under the
    /// session key survives in progress, so re-selecting the same decks
    /// resumes where the user left off.
    fn back_to_setup(&mut self) {
        self.session = None;
        self.answer_revealed = false;
        self.selected_decks.clear();
        self.screen = Screen::Setup;
    }
}
