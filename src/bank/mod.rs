//! Question bank: named decks of question/answer cards.
//!
//! The bank is loaded once at startup, either from the JSON document embedded
//! into the binary or from a file given with `--bank`, and is immutable for
//! the lifetime of the process. Deck order follows the order of the source
//! document; every question id must be unique across the whole bank, since
//! progress tracking keys off ids alone.

pub mod data;
pub mod loader;

pub use data::{Deck, Question, QuestionBank, QuestionId};
pub use loader::{load_bank, load_embedded, load_file, BankError};
