//! Error types for composing a puzzle, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (C001-C008) for documentation lookup:
//!
//! - C001: `BadOrientation` (Placement orientation is neither "hor" nor "ver")
//! - C002: `NegativeCoordinate` (Placement starts outside the grid)
//! - C003: `ConflictingCrossing` (Two words disagree on a shared letter, strict mode only)
//! - C004: `UnknownMode` (Placement mode string not recognized)
//! - C005: `Io` (Reading an input file failed)
//! - C006: `InvalidPlacements` (A placement document is not valid JSON)
//! - C007: `GridTooLarge` (Placements span more cells than a grid may hold)
//! - C008: `EmptyWord` (A placement has no letters)
//!
//! Only C001-C003, C007 and C008 can abort a composition pass. A failing placement collaborator
//! never produces an error: it produces an empty placement list instead.
//!
//! # Examples
//!
//! ```
//! use crossword::errors::CompositionError;
//!
//! let err = CompositionError::BadOrientation {
//!     id: 3,
//!     word: "cat".to_string(),
//!     orientation: "diag".to_string(),
//! };
//! assert_eq!(err.code(), "C001");
//! println!("{}", err.display_detailed());
//! ```

use std::io;

/// Unified error type for the composition pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    #[error("word \"{word}\" (id {id}) has bad orientation \"{orientation}\"")]
    BadOrientation {
        id: usize,
        word: String,
        orientation: String,
    },

    #[error("word \"{word}\" (id {id}) starts at negative coordinate ({x}, {y})")]
    NegativeCoordinate {
        id: usize,
        word: String,
        x: i64,
        y: i64,
    },

    #[error("crossing at ({x}, {y}) holds '{existing}' but word \"{word}\" writes '{incoming}'")]
    ConflictingCrossing {
        x: usize,
        y: usize,
        existing: char,
        incoming: char,
        word: String,
    },

    #[error("unknown placement mode \"{mode}\"")]
    UnknownMode { mode: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid placement document: {source}")]
    InvalidPlacements {
        #[source]
        source: serde_json::Error,
    },

    #[error("word \"{word}\" (id {id}) would grow the grid past {max_cells} cells")]
    GridTooLarge {
        id: usize,
        word: String,
        max_cells: usize,
    },

    #[error("placement id {id} has an empty word")]
    EmptyWord { id: usize },
}

impl CompositionError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CompositionError::BadOrientation { .. } => "C001",
            CompositionError::NegativeCoordinate { .. } => "C002",
            CompositionError::ConflictingCrossing { .. } => "C003",
            CompositionError::UnknownMode { .. } => "C004",
            CompositionError::Io { .. } => "C005",
            CompositionError::InvalidPlacements { .. } => "C006",
            CompositionError::GridTooLarge { .. } => "C007",
            CompositionError::EmptyWord { .. } => "C008",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            CompositionError::BadOrientation { .. } => "Placement orientation is neither \"hor\" nor \"ver\"",
            CompositionError::NegativeCoordinate { .. } => "Placement starts outside the grid",
            CompositionError::ConflictingCrossing { .. } => "Two crossing words disagree on a shared letter",
            CompositionError::UnknownMode { .. } => "Placement mode not recognized",
            CompositionError::Io { .. } => "Failed to read an input file",
            CompositionError::InvalidPlacements { .. } => "Placement document is not valid JSON",
            CompositionError::GridTooLarge { .. } => "Placements span too many cells",
            CompositionError::EmptyWord { .. } => "Placement has no letters",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            CompositionError::BadOrientation { .. } => "The placement generator returned a word whose orientation is not one of \"hor\" or \"ver\". Grid bounds cannot be computed for such a word, so the whole pass is rejected and the previous puzzle is kept.",
            CompositionError::NegativeCoordinate { .. } => "Grid coordinates are zero-based with the origin at the top-left corner. A placement with a negative x or y cannot be addressed, so the whole pass is rejected and the previous puzzle is kept.",
            CompositionError::ConflictingCrossing { .. } => "In strict merge mode, two words sharing a cell must agree on its letter. The generator produced a crossing where they differ.",
            CompositionError::UnknownMode { .. } => "The placement mode must be either InputOrder or Automatic.",
            CompositionError::Io { .. } => "A word list or placement file could not be read from disk or stdin.",
            CompositionError::InvalidPlacements { .. } => "A recorded placement document must be a JSON array of {id, x, y, word, orientation} objects.",
            CompositionError::GridTooLarge { .. } => "The grid covers every cell from the origin to the furthest letter placed. A placement far from the origin would need more cells than the composer allocates, so the whole pass is rejected and the previous puzzle is kept.",
            CompositionError::EmptyWord { .. } => "Every placed word must have at least one letter to carry its clue number. A placement with an empty word cannot be drawn, so the whole pass is rejected and the previous puzzle is kept.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            CompositionError::BadOrientation { .. } => Some("Check the generator output: orientation must be \"hor\" or \"ver\""),
            CompositionError::NegativeCoordinate { .. } => Some("The generator must normalize its layout so that the top-left word starts at (0, 0)"),
            CompositionError::ConflictingCrossing { .. } => Some("Run without --strict to keep the last written letter, or fix the generator"),
            CompositionError::UnknownMode { .. } => Some("Use 'input-order' or 'automatic'"),
            CompositionError::InvalidPlacements { .. } => Some("Example: [{\"id\": 1, \"x\": 0, \"y\": 0, \"word\": \"cat\", \"orientation\": \"hor\"}]"),
            CompositionError::GridTooLarge { .. } => Some("The generator must place words close to (0, 0); check for uninitialized or sentinel coordinates"),
            CompositionError::EmptyWord { .. } => Some("Check the generator output: every placement needs a non-empty word"),
            CompositionError::Io { .. } => None,
        }
    }

    /// Whether this error aborts a composition pass (as opposed to failing at a boundary)
    #[must_use]
    pub fn is_fatal_for_pass(&self) -> bool {
        matches!(
            self,
            CompositionError::BadOrientation { .. }
                | CompositionError::NegativeCoordinate { .. }
                | CompositionError::ConflictingCrossing { .. }
                | CompositionError::GridTooLarge { .. }
                | CompositionError::EmptyWord { .. }
        )
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

impl From<CompositionError> for io::Error {
    fn from(ce: CompositionError) -> Self {
        match ce {
            CompositionError::Io { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
