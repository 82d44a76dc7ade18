//! Loading and validating the question bank.
//!
//! The default source is a JSON document embedded into the binary at compile
//! time; `--bank <path>` substitutes a file with the same schema. Either way
//! the bank is parsed once at startup and any failure is fatal: the
//! application is unusable without questions.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::data::{Deck, Question, QuestionBank, QuestionId};

/// The question bank compiled into the binary.
const EMBEDDED_BANK: &str = include_str!("../../assets/questions.json");

/// Fatal errors while obtaining the question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// A bank file given with `--bank` could not be read.
    #[error("failed to read bank file {path}: {source}")]
    Read {
        /// The path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bank document is not valid JSON or has the wrong shape.
    #[error("invalid bank data ({origin}): {message}")]
    Invalid {
        /// Where the document came from ("embedded" or a file path).
        origin: String,
        /// What was wrong with it.
        message: String,
    },

    /// Two questions share an id; progress tracking would conflate them.
    #[error("duplicate question id {id} in deck \"{deck}\"")]
    DuplicateId {
        /// The repeated id.
        id: QuestionId,
        /// The deck containing the second occurrence.
        deck: String,
    },

    /// The bank parsed but contains no questions at all.
    #[error("bank ({origin}) contains no questions")]
    Empty {
        /// Where the document came from.
        origin: String,
    },
}

/// Load the bank from the CLI-provided file, or the embedded data if none.
///
/// # Errors
///
/// Any [`BankError`]; all are fatal at startup.
pub fn load_bank(path: Option<&Path>) -> Result<QuestionBank, BankError> {
    match path {
        Some(p) => load_file(p),
        None => load_embedded(),
    }
}

/// Load and validate the embedded question bank.
///
/// # Errors
///
/// Returns [`BankError::Invalid`], [`BankError::DuplicateId`] or
/// [`BankError::Empty`] if the embedded document is unusable. These indicate
/// a broken build rather than a user mistake.
pub fn load_embedded() -> Result<QuestionBank, BankError> {
    let bank = parse_bank(EMBEDDED_BANK, "embedded")?;
    log::info!(
        "Loaded embedded bank: {} decks, {} questions",
        bank.deck_count(),
        bank.total_questions()
    );
    Ok(bank)
}

/// Load and validate a question bank from a JSON file.
///
/// # Errors
///
/// Returns [`BankError::Read`] if the file cannot be read, plus any parse or
/// validation failure.
pub fn load_file(path: &Path) -> Result<QuestionBank, BankError> {
    let content = std::fs::read_to_string(path).map_err(|source| BankError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let bank = parse_bank(&content, &path.display().to_string())?;
    log::info!(
        "Loaded bank from {}: {} decks, {} questions",
        path.display(),
        bank.deck_count(),
        bank.total_questions()
    );
    Ok(bank)
}

/// Parse a bank document and validate id uniqueness.
///
/// The expected shape is a JSON object mapping deck label to an array of
/// `{id, question, answer}` objects. Deck order follows document order.
fn parse_bank(content: &str, origin: &str) -> Result<QuestionBank, BankError> {
    let root: Value = serde_json::from_str(content).map_err(|e| BankError::Invalid {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    let Value::Object(map) = root else {
        return Err(BankError::Invalid {
            origin: origin.to_string(),
            message: "top level must be an object mapping deck label to questions".to_string(),
        });
    };

    let mut decks = Vec::with_capacity(map.len());
    let mut seen: BTreeSet<QuestionId> = BTreeSet::new();

    for (label, value) in map {
        let questions: Vec<Question> =
            serde_json::from_value(value).map_err(|e| BankError::Invalid {
                origin: origin.to_string(),
                message: format!("deck \"{label}\": {e}"),
            })?;

        for q in &questions {
            if !seen.insert(q.id.clone()) {
                return Err(BankError::DuplicateId {
                    id: q.id.clone(),
                    deck: label.clone(),
                });
            }
        }

        decks.push(Deck { label, questions });
    }

    let bank = QuestionBank::new(decks);
    if bank.is_empty() {
        return Err(BankError::Empty {
            origin: origin.to_string(),
        });
    }

    Ok(bank)
}
