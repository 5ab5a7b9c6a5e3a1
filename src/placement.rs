//! The boundary with the external placement generator.
//!
//! The generator decides which words cross where. This crate only consumes its
//! output through the [`Placer`] trait:
//!
//! ```text
//! place(words, "InputOrder" | "Automatic") -> [{id, x, y, word, orientation: "hor" | "ver"}]
//! ```
//!
//! A generator that fails (cannot be spawned, exits non-zero, prints garbage)
//! yields an empty placement list. That is never an error for the caller: every
//! requested word simply ends up dropped.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CompositionError;
use crate::grid::MAX_GRID_CELLS;

/// Direction a word is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    /// Left-to-right
    #[serde(rename = "hor")]
    Horizontal,
    /// Top-to-bottom
    #[serde(rename = "ver")]
    Vertical,
}

impl Orientation {
    /// Wire name used by generators.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "hor",
            Orientation::Vertical => "ver",
        }
    }

    /// Offset of the `i`-th letter from the word's start.
    #[must_use]
    pub(crate) fn step(self, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (i, 0),
            Orientation::Vertical => (0, i),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy hint passed to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Input order influences placement; useful while the word list is being written.
    #[default]
    InputOrder,
    /// The generator is free to reorder words.
    Automatic,
}

impl PlacementMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementMode::InputOrder => "InputOrder",
            PlacementMode::Automatic => "Automatic",
        }
    }

    /// The other mode (the UI toggles between the two).
    #[must_use]
    pub fn toggled(self) -> PlacementMode {
        match self {
            PlacementMode::InputOrder => PlacementMode::Automatic,
            PlacementMode::Automatic => PlacementMode::InputOrder,
        }
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacementMode {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inputorder" | "input-order" | "input_order" => Ok(PlacementMode::InputOrder),
            "automatic" => Ok(PlacementMode::Automatic),
            _ => Err(CompositionError::UnknownMode { mode: s.to_string() }),
        }
    }
}

/// One placed word exactly as a generator reports it.
///
/// Coordinates and orientation are not trusted yet; see [`PlacedWord::try_from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub id: usize,
    pub x: i64,
    pub y: i64,
    pub word: String,
    pub orientation: String,
}

impl PlacementRecord {
    pub fn new(id: usize, x: i64, y: i64, word: &str, orientation: Orientation) -> PlacementRecord {
        PlacementRecord {
            id,
            x,
            y,
            word: word.to_string(),
            orientation: orientation.as_str().to_string(),
        }
    }
}

/// A validated placement: non-negative start cell and a known orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedWord {
    pub id: usize,
    pub x: usize,
    pub y: usize,
    pub word: String,
    pub orientation: Orientation,
}

impl PlacedWord {
    /// Validate a generator record.
    ///
    /// # Errors
    ///
    /// `BadOrientation` if the orientation is not `"hor"`/`"ver"`,
    /// `NegativeCoordinate` if the word would start outside the grid,
    /// `GridTooLarge` if a coordinate does not fit in `usize`, and `EmptyWord`
    /// if there are no letters to place. All of them are contract violations by
    /// the generator and abort the pass.
    pub fn try_from_record(record: &PlacementRecord) -> Result<PlacedWord, CompositionError> {
        let orientation = match record.orientation.as_str() {
            "hor" => Orientation::Horizontal,
            "ver" => Orientation::Vertical,
            other => {
                return Err(CompositionError::BadOrientation {
                    id: record.id,
                    word: record.word.clone(),
                    orientation: other.to_string(),
                });
            }
        };

        if record.x < 0 || record.y < 0 {
            return Err(CompositionError::NegativeCoordinate {
                id: record.id,
                word: record.word.clone(),
                x: record.x,
                y: record.y,
            });
        }
        let (Ok(x), Ok(y)) = (usize::try_from(record.x), usize::try_from(record.y)) else {
            return Err(CompositionError::GridTooLarge {
                id: record.id,
                word: record.word.clone(),
                max_cells: MAX_GRID_CELLS,
            });
        };

        if record.word.is_empty() {
            return Err(CompositionError::EmptyWord { id: record.id });
        }

        Ok(PlacedWord {
            id: record.id,
            x,
            y,
            word: record.word.to_lowercase(),
            orientation,
        })
    }

    /// Number of cells the word occupies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Exclusive `(max_x, max_y)` corner of the word's span, or `None` if it
    /// does not fit in `usize`.
    #[must_use]
    pub fn extent(&self) -> Option<(usize, usize)> {
        match self.orientation {
            Orientation::Horizontal => Some((self.x.checked_add(self.len())?, self.y.checked_add(1)?)),
            Orientation::Vertical => Some((self.x.checked_add(1)?, self.y.checked_add(self.len())?)),
        }
    }

    /// `(x, y, char)` for every letter, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.word.chars().enumerate().map(move |(i, c)| {
            let (dx, dy) = self.orientation.step(i);
            (self.x + dx, self.y + dy, c)
        })
    }
}

/// The external placement generator.
///
/// Implementations must behave like a pure function for a given input and
/// must not fail: on any internal problem, return an empty list.
pub trait Placer {
    fn place(&self, words: &[String], mode: PlacementMode) -> Vec<PlacementRecord>;
}

impl<F> Placer for F
where
    F: Fn(&[String], PlacementMode) -> Vec<PlacementRecord>,
{
    fn place(&self, words: &[String], mode: PlacementMode) -> Vec<PlacementRecord> {
        self(words, mode)
    }
}

/// Helper so closures get the right (higher-ranked) signature inferred.
pub fn placer_fn<F>(f: F) -> F
where
    F: Fn(&[String], PlacementMode) -> Vec<PlacementRecord>,
{
    f
}

/// Replays a recorded generator output.
///
/// Only the records whose word was actually requested are returned, so a
/// single recording can serve several word lists. The mode is ignored.
#[derive(Debug, Clone, Default)]
pub struct ReplayPlacer {
    records: Vec<PlacementRecord>,
}

impl ReplayPlacer {
    #[must_use]
    pub fn new(records: Vec<PlacementRecord>) -> ReplayPlacer {
        ReplayPlacer { records }
    }

    /// Parse a JSON array of placement records.
    ///
    /// # Errors
    ///
    /// `InvalidPlacements` if `json` is not an array of records.
    pub fn from_json_str(json: &str) -> Result<ReplayPlacer, CompositionError> {
        let records: Vec<PlacementRecord> =
            serde_json::from_str(json).map_err(|source| CompositionError::InvalidPlacements { source })?;
        Ok(ReplayPlacer::new(records))
    }

    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidPlacements` if it is not valid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<ReplayPlacer, CompositionError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|source| CompositionError::Io {
            context: format!("failed to read placements from '{}'", path_ref.display()),
            source,
        })?;
        Self::from_json_str(&data)
    }

    #[must_use]
    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }
}

impl Placer for ReplayPlacer {
    fn place(&self, words: &[String], _mode: PlacementMode) -> Vec<PlacementRecord> {
        let requested: HashSet<&str> = words.iter().map(String::as_str).collect();
        self.records
            .iter()
            .filter(|r| requested.contains(r.word.to_lowercase().as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use command::CommandPlacer;

#[cfg(not(target_arch = "wasm32"))]
mod command {
    use std::io::Write;
    use std::path::PathBuf;
    use std::process::{Command, ExitStatus, Stdio};

    use log::{debug, warn};

    use super::{PlacementMode, PlacementRecord, Placer};

    #[derive(Debug, thiserror::Error)]
    enum GeneratorFailure {
        #[error("could not run generator: {0}")]
        Spawn(#[from] std::io::Error),

        #[error("generator exited with {status}: {stderr}")]
        Exit { status: ExitStatus, stderr: String },

        #[error("generator printed invalid JSON: {0}")]
        Output(#[from] serde_json::Error),
    }

    /// Runs an external generator executable.
    ///
    /// The candidate words are written to its stdin one per line, the mode is
    /// appended to the configured arguments (`InputOrder` or `Automatic`), and a
    /// JSON array of placement records is expected on stdout.
    #[derive(Debug, Clone)]
    pub struct CommandPlacer {
        program: PathBuf,
        args: Vec<String>,
    }

    impl CommandPlacer {
        pub fn new<P: Into<PathBuf>>(program: P) -> CommandPlacer {
            CommandPlacer { program: program.into(), args: Vec::new() }
        }

        #[must_use]
        pub fn with_args<I, S>(mut self, args: I) -> CommandPlacer
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.args.extend(args.into_iter().map(Into::into));
            self
        }

        fn run(&self, words: &[String], mode: PlacementMode) -> Result<Vec<PlacementRecord>, GeneratorFailure> {
            let mut child = Command::new(&self.program)
                .args(&self.args)
                .arg(mode.as_str())
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()?;

            // write from another thread so a chatty generator cannot deadlock on a full stdout pipe
            let writer = child.stdin.take().map(|mut stdin| {
                let mut input = words.join("\n");
                input.push('\n');
                std::thread::spawn(move || stdin.write_all(input.as_bytes()))
            });

            let output = child.wait_with_output()?;
            if let Some(handle) = writer
                && let Ok(Err(e)) = handle.join()
            {
                debug!("generator did not read all of stdin: {e}");
            }

            if !output.status.success() {
                return Err(GeneratorFailure::Exit {
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            Ok(serde_json::from_slice(&output.stdout)?)
        }
    }

    impl Placer for CommandPlacer {
        fn place(&self, words: &[String], mode: PlacementMode) -> Vec<PlacementRecord> {
            if words.is_empty() {
                return Vec::new();
            }
            debug!("running generator {} for {} words ({mode})", self.program.display(), words.len());
            match self.run(words, mode) {
                Ok(records) => records,
                Err(e) => {
                    warn!("placement generator failed, treating as no placements: {e}");
                    Vec::new()
                }
            }
        }
    }
}
