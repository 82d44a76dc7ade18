//! I/O for the progress file.
//!
//! The store owns the file path and the last observed modification time.
//! Writes are atomic (temp file + rename) so a concurrent reader never sees a
//! half-written document.
//!
//! # Concurrent instances
//!
//! Multiple instances sharing one progress file follow last-writer-wins: each
//! save replaces the whole document, and [`ProgressStore::poll_external_change`]
//! lets the event loop notice a foreign write and replace its in-memory state
//! wholesale. There is no merging; two instances mutating at the same time
//! will silently overwrite each other, same as the original tool's storage
//! events. Acceptable for a single-user local tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::data::ProgressState;

/// File name of the progress document inside the data directory.
const PROGRESS_FILE: &str = "progress.json";

/// How a load attempt resolved.
///
/// Absence and corruption both fall back to empty defaults, but they are
/// distinct, separately logged outcomes: a corrupt file means user data was
/// discarded and deserves a warning, a missing file is just a first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read and parsed.
    Loaded,
    /// No file existed; defaults returned.
    Absent,
    /// The file existed but could not be read or parsed; defaults returned.
    Corrupt,
}

/// Handle to the persisted progress file.
#[derive(Debug)]
pub struct ProgressStore {
    path: PathBuf,
    /// Modification time after our last load or save; used to detect writes
    /// by other instances.
    last_mtime: Option<SystemTime>,
}

impl ProgressStore {
    /// Create a store for an explicit path (`--progress-file`).
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_mtime: None,
        }
    }

    /// Create a store at the default platform-specific path.
    ///
    /// # Errors
    ///
    /// Fails only if the platform data directory cannot be determined.
    pub fn from_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// The default platform-specific progress file path.
    ///
    /// # Errors
    ///
    /// Fails if no home directory can be resolved.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "quizdrill", "quizdrill")
            .context("failed to determine project directories")?;
        Ok(dirs.data_dir().join(PROGRESS_FILE))
    }

    /// The path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load progress, falling back to empty defaults.
    ///
    /// Never fails: absence and corruption both produce defaults, logged at
    /// different levels (see [`LoadOutcome`]).
    pub fn load(&mut self) -> ProgressState {
        self.load_with_outcome().0
    }

    /// Load progress and report how the attempt resolved.
    pub fn load_with_outcome(&mut self) -> (ProgressState, LoadOutcome) {
        self.last_mtime = file_mtime(&self.path);

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No progress file at {}, starting fresh",
                    self.path.display()
                );
                return (ProgressState::default(), LoadOutcome::Absent);
            }
            Err(e) => {
                log::warn!(
                    "Failed to read progress file {}: {}; starting fresh",
                    self.path.display(),
                    e
                );
                return (ProgressState::default(), LoadOutcome::Corrupt);
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => (state, LoadOutcome::Loaded),
            Err(e) => {
                log::warn!(
                    "Progress file {} is corrupt ({}); discarding and starting fresh",
                    self.path.display(),
                    e
                );
                (ProgressState::default(), LoadOutcome::Corrupt)
            }
        }
    }

    /// Persist the full state atomically.
    ///
    /// Writes to a sibling temp file and renames it over the target, then
    /// records the new modification time so the write is not mistaken for an
    /// external change.
    ///
    /// # Errors
    ///
    /// Any I/O or serialization failure, with path context.
    pub fn save(&mut self, state: &ProgressState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create progress directory {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(state).context("failed to serialize progress")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("failed to write progress to {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!("failed to move progress into place at {}", self.path.display())
        })?;

        self.last_mtime = file_mtime(&self.path);
        log::debug!(
            "Saved progress: {} completed, {} starred, {} resume keys",
            state.completed.len(),
            state.starred.len(),
            state.saved_indices.len()
        );
        Ok(())
    }

    /// Reset progress: clear the sets in memory and delete the file.
    ///
    /// `saved_indices` stays in memory untouched; the next save writes it
    /// back (see `ProgressState::clear_sets`).
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be removed.
    pub fn reset(&mut self, state: &mut ProgressState) -> Result<()> {
        state.clear_sets();

        match fs::remove_file(&self.path) {
            Ok(()) => log::info!("Progress reset, removed {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Progress reset with no file to remove");
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to remove progress file {}", self.path.display())
                });
            }
        }

        self.last_mtime = file_mtime(&self.path);
        Ok(())
    }

    /// Check whether another process wrote the file since our last load/save.
    ///
    /// Returns the freshly loaded state if so. The caller replaces its
    /// in-memory `completed`/`starred`/`saved_indices` wholesale
    /// (last-writer-wins).
    pub fn poll_external_change(&mut self) -> Option<ProgressState> {
        let current = file_mtime(&self.path);
        if current == self.last_mtime {
            return None;
        }

        log::info!(
            "Progress file {} changed externally, reloading",
            self.path.display()
        );
        let (state, outcome) = self.load_with_outcome();
        // A deleted or corrupted file still counts as a change: the writer's
        // state wins, even when that state is empty.
        match outcome {
            LoadOutcome::Loaded | LoadOutcome::Absent | LoadOutcome::Corrupt => Some(state),
        }
    }
}

/// Modification time of a file, `None` if it does not exist.
fn file_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
