//! TUI layout and rendering with ratatui.
//!
//! # Overview
//!
//! This module handles rendering the user interface:
//! - Header with title and aggregated progress stats
//! - Setup screen: mode picker and deck selection list
//! - Quiz screen: progress gauge, question card, answer card
//! - Footer with the key hints for the current screen
//! - Modal dialogs for errors and reset confirmation

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{Action, App, Screen};
use super::keybindings::KeyBindings;
use super::theme::Theme;
use crate::session::SessionMode;

/// Create a bordered block with rounded corners.
fn create_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
}

/// Render the TUI based on current application state.
///
/// This is the main entry point for rendering. It dispatches to
/// screen-specific rendering functions based on the current [`Screen`].
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, bindings: &KeyBindings) {
    let area = frame.area();

    // Main layout: header, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, app, theme, chunks[0]);
    render_content(frame, app, theme, chunks[1]);
    render_footer(frame, app, theme, bindings, chunks[2]);

    if app.screen() == Screen::ConfirmingReset {
        render_reset_dialog(frame, app, theme, area);
    }

    // The error overlay sits on top of everything
    if app.error_message().is_some() {
        render_error_dialog(frame, app, theme, area);
    }
}

/// Render the header with title and stats.
fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let suffix = match app.screen() {
        Screen::Setup => "",
        Screen::Quiz => " [Studying]",
        Screen::ConfirmingReset => " [Reset Progress]",
        Screen::Quitting => " - Goodbye!",
    };

    let header_text = format!("quizdrill - Terminal Flashcards{suffix} | {}", app.stats());
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(create_block().border_style(Style::default().fg(theme.primary)));

    frame.render_widget(header, area);
}

/// Render the main content area based on current screen.
fn render_content(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    match app.screen() {
        Screen::Setup | Screen::ConfirmingReset => render_setup(frame, app, theme, area),
        Screen::Quiz => render_quiz(frame, app, theme, area),
        Screen::Quitting => render_quitting(frame, theme, area),
    }
}

/// Render quitting message.
fn render_quitting(frame: &mut Frame, theme: &Theme, area: Rect) {
    let message = Paragraph::new("Goodbye! Progress saved.")
        .style(Style::default().fg(theme.success))
        .alignment(Alignment::Center)
        .block(create_block());
    frame.render_widget(message, area);
}

// ==================== Setup Screen ====================

/// Render the setup screen: mode picker on the left, deck list on the right.
fn render_setup(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(0)])
        .split(area);

    render_mode_picker(frame, app, theme, columns[0]);
    render_deck_list(frame, app, theme, columns[1]);
}

/// Render the study mode list with the active mode highlighted.
fn render_mode_picker(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let modes = [SessionMode::Deck, SessionMode::All, SessionMode::Starred];

    let items: Vec<ListItem> = modes
        .iter()
        .map(|mode| {
            let active = *mode == app.mode();
            let marker = if active { "●" } else { "○" };
            let style = if active {
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.normal)
            };
            ListItem::new(Line::from(Span::styled(
                format!(" {marker} {}", mode.label()),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        create_block()
            .title(" Mode ")
            .border_style(Style::default().fg(theme.primary)),
    );

    frame.render_widget(list, area);
}

/// Render the deck list with selection markers and the cursor row.
fn render_deck_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = app
        .bank()
        .decks()
        .iter()
        .enumerate()
        .map(|(i, deck)| {
            let line = deck_line(app, &deck.label, deck.len());
            let mut style = Style::default().fg(theme.normal);
            if app.is_deck_selected(&deck.label) {
                style = Style::default().fg(theme.success);
            }
            if i == app.deck_cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(Span::styled(line, style)))
        })
        .collect();

    let title = match app.mode() {
        SessionMode::Deck => " Decks (study order follows selection order) ",
        _ => " Decks ",
    };

    let list = List::new(items).block(
        create_block()
            .title(title)
            .border_style(Style::default().fg(theme.primary)),
    );

    frame.render_widget(list, area);
}

/// One row of the deck list. Selected decks show their position in the
/// study order.
fn deck_line(app: &App, label: &str, question_count: usize) -> String {
    let marker = match app.selected_decks().iter().position(|l| l == label) {
        Some(pos) => format!("[{}]", pos + 1),
        None => "[ ]".to_string(),
    };
    format!(" {marker} {label} ({question_count} questions)")
}

// ==================== Quiz Screen ====================

/// Render the quiz screen: gauge, question card, answer card.
fn render_quiz(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(session) = app.session() else {
        // Never reached: the quiz screen always has a session
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Progress gauge
            Constraint::Percentage(50), // Question
            Constraint::Min(0),         // Answer
        ])
        .split(area);

    // Position gauge
    let gauge_label = Span::styled(
        format!("Question {} of {}", session.index() + 1, session.len()),
        Style::default().fg(theme.inverted_fg),
    );
    let gauge = Gauge::default()
        .block(create_block().border_style(Style::default().fg(theme.primary)))
        .gauge_style(Style::default().fg(theme.success))
        .percent(session.position_percent())
        .label(gauge_label);
    frame.render_widget(gauge, rows[0]);

    // Question card; a starred question shows it in the title
    let question = session.current();
    let star = if app.progress().is_starred(&question.id) {
        Span::styled(" ★ ", Style::default().fg(theme.star))
    } else {
        Span::raw(" ")
    };
    let question_block = create_block()
        .title(Line::from(vec![Span::raw(" Question"), star]))
        .border_style(Style::default().fg(theme.primary));
    let question_text = Paragraph::new(question.question.as_str())
        .style(Style::default().fg(theme.normal))
        .wrap(Wrap { trim: true })
        .block(question_block);
    frame.render_widget(question_text, rows[1]);

    // Answer card, hidden until revealed
    let answer = if app.answer_revealed() {
        Paragraph::new(question.answer.as_str())
            .style(Style::default().fg(theme.normal))
            .wrap(Wrap { trim: true })
    } else {
        Paragraph::new("Press Enter to reveal the answer")
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center)
    };
    let answer_border = if app.answer_revealed() {
        theme.secondary
    } else {
        theme.dim
    };
    frame.render_widget(
        answer.block(
            create_block()
                .title(" Answer ")
                .border_style(Style::default().fg(answer_border)),
        ),
        rows[2],
    );
}

// ==================== Footer ====================

/// Render the footer with key hints for the current screen.
fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, bindings: &KeyBindings, area: Rect) {
    let commands = footer_commands(app.screen(), bindings);

    let spans: Vec<Span> = commands
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    format!("[{key}]"),
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{desc} "), Style::default().fg(theme.normal)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(create_block().border_style(Style::default().fg(theme.dim)));

    frame.render_widget(footer, area);
}

/// Key hints per screen, derived from the active bindings so custom
/// overrides show up in the footer.
fn footer_commands(screen: Screen, bindings: &KeyBindings) -> Vec<(String, String)> {
    let hint = |action: Action| bindings.key_hint(&action);

    match screen {
        Screen::Setup => vec![
            (
                format!("{}/{}", hint(Action::NavigateUp), hint(Action::NavigateDown)),
                "Move".to_string(),
            ),
            (hint(Action::ToggleSelect), "Select deck".to_string()),
            (hint(Action::CycleMode), "Mode".to_string()),
            (hint(Action::Confirm), "Start".to_string()),
            (hint(Action::ResetProgress), "Reset".to_string()),
            (hint(Action::Quit), "Quit".to_string()),
        ],
        Screen::Quiz => vec![
            (
                format!(
                    "{}/{}",
                    hint(Action::PreviousQuestion),
                    hint(Action::NextQuestion)
                ),
                "Prev/Next".to_string(),
            ),
            (hint(Action::Confirm), "Reveal".to_string()),
            (hint(Action::ToggleStar), "Star".to_string()),
            (hint(Action::Cancel), "Back".to_string()),
            (hint(Action::Quit), "Quit".to_string()),
        ],
        Screen::ConfirmingReset => vec![
            (hint(Action::Confirm), "Confirm reset".to_string()),
            (hint(Action::Cancel), "Cancel".to_string()),
        ],
        Screen::Quitting => vec![],
    }
}

// ==================== Dialogs ====================

/// Render the reset confirmation dialog.
fn render_reset_dialog(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let dialog_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            "Reset Progress",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Clear {} completed and {} starred questions?",
            app.stats().completed,
            app.stats().starred
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Saved positions are kept; sessions still resume where they were.",
            Style::default().fg(theme.dim),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to confirm, Esc to cancel",
            Style::default().fg(theme.secondary),
        )),
    ];

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(create_block().border_style(Style::default().fg(theme.danger)));

    frame.render_widget(dialog, dialog_area);
}

/// Render the error message dialog.
fn render_error_dialog(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let dialog_area = centered_rect(60, 20, area);
    frame.render_widget(Clear, dialog_area);

    let message = app.error_message().unwrap_or("Unknown error");

    let error = Paragraph::new(vec![
        Line::from(Span::styled(
            "Cannot continue",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().fg(theme.dim),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(create_block().border_style(Style::default().fg(theme.danger)));

    frame.render_widget(error, dialog_area);
}

// ==================== Helper Functions ====================

/// Compute a centered rectangle taking a percentage of the area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Deck, Question, QuestionBank};
    use crate::progress::ProgressState;
    use crate::tui::keybindings::KeybindingProfile;

    fn test_app() -> App {
        let bank = QuestionBank::new(vec![Deck {
            label: "Alpha".to_string(),
            questions: vec![Question {
                id: 1u64.into(),
                question: "q1".to_string(),
                answer: "a1".to_string(),
            }],
        }]);
        App::new(bank, ProgressState::default(), SessionMode::Deck, vec![])
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let dialog = centered_rect(60, 20, area);
        assert!(dialog.width <= 60);
        assert!(dialog.x >= 20);
        assert!(dialog.y >= 20 * 50 / 100 / 2);
    }

    #[test]
    fn test_deck_line_shows_selection_position() {
        let mut app = test_app();
        assert_eq!(deck_line(&app, "Alpha", 1), " [ ] Alpha (1 questions)");

        app.handle_action(Action::ToggleSelect);
        assert_eq!(deck_line(&app, "Alpha", 1), " [1] Alpha (1 questions)");
    }

    #[test]
    fn test_footer_commands_per_screen() {
        let bindings = KeyBindings::from_profile(KeybindingProfile::Universal);

        let setup = footer_commands(Screen::Setup, &bindings);
        assert!(setup.iter().any(|(_, desc)| desc == "Start"));
        assert!(setup.iter().any(|(_, desc)| desc == "Reset"));

        let quiz = footer_commands(Screen::Quiz, &bindings);
        assert!(quiz.iter().any(|(_, desc)| desc == "Star"));
        assert!(!quiz.iter().any(|(_, desc)| desc == "Start"));

        assert!(footer_commands(Screen::Quitting, &bindings).is_empty());
    }

    #[test]
    fn test_footer_uses_bound_keys() {
        let bindings = KeyBindings::from_profile(KeybindingProfile::Universal);
        let quiz = footer_commands(Screen::Quiz, &bindings);
        let (star_key, _) = quiz.iter().find(|(_, d)| d == "Star").unwrap();
        assert_eq!(star_key, "s");
    }
}
