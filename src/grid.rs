//! Grid composition: lay placed words onto a 2D grid and number the clues.
//!
//! The grid is an arena (`Vec<Option<GridCell>>`) addressed by `y * width + x`.
//! A cell is `None` when no word passes through it.
//!
//! Words are written in ascending `(id, orientation)` order, Horizontal first,
//! so the result does not depend on the order the generator returned them in.
//! When two words share a cell:
//! - the clue number already in the cell is kept, unless there is none and the
//!   incoming letter starts a word;
//! - the letter is taken from the later write. Mismatches are recorded in
//!   [`Grid::conflicts`] (or rejected under [`MergePolicy::Strict`]).

use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::errors::CompositionError;
use crate::placement::PlacedWord;

/// Largest number of cells (`width * height`) a composed grid may have.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// What to do when two crossing words disagree on a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Keep the letter written last and record the conflict.
    #[default]
    LastWriterWins,
    /// Abort the pass with `ConflictingCrossing`.
    Strict,
}

/// One occupied square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    #[serde(rename = "char")]
    pub ch: char,
    /// Clue number shown in the corner; only set on a word's first cell.
    #[serde(rename = "clueId", serialize_with = "serialize_clue_id")]
    pub clue_id: Option<usize>,
}

// Clue ids are strings on the wire, matching what a renderer puts in the corner.
fn serialize_clue_id<S: serde::Serializer>(clue_id: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
    match clue_id {
        Some(id) => s.serialize_some(&id.to_string()),
        None => s.serialize_none(),
    }
}

/// A crossing where two words wanted different letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub x: usize,
    pub y: usize,
    pub existing: char,
    pub incoming: char,
}

/// Result of one composition pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<GridCell>>,
    conflicts: Vec<Conflict>,
}

/// Merge an incoming letter into a cell.
///
/// Returns the conflict if both sides hold different letters.
pub(crate) fn merge_cell(slot: &mut Option<GridCell>, ch: char, clue_id: Option<usize>) -> Option<(char, char)> {
    match slot {
        None => {
            *slot = Some(GridCell { ch, clue_id });
            None
        }
        Some(cell) => {
            let mismatch = (cell.ch != ch).then_some((cell.ch, ch));
            if cell.clue_id.is_none() {
                cell.clue_id = clue_id;
            }
            cell.ch = ch;
            mismatch
        }
    }
}

/// `(width, height)` of the smallest grid holding every word.
///
/// Fails on the first word (in the given order) that pushes the area past
/// [`MAX_GRID_CELLS`].
fn bounds(words: &[PlacedWord]) -> Result<(usize, usize), CompositionError> {
    let (mut width, mut height) = (0, 0);
    for word in words {
        let too_large = || CompositionError::GridTooLarge {
            id: word.id,
            word: word.word.clone(),
            max_cells: MAX_GRID_CELLS,
        };
        let (ex, ey) = word.extent().ok_or_else(too_large)?;
        width = width.max(ex);
        height = height.max(ey);
        if width.checked_mul(height).is_none_or(|area| area > MAX_GRID_CELLS) {
            return Err(too_large());
        }
    }
    Ok((width, height))
}

impl Grid {
    /// Compose validated words into a grid.
    ///
    /// # Errors
    ///
    /// `GridTooLarge` when the words span more than [`MAX_GRID_CELLS`] cells,
    /// and `ConflictingCrossing` when `policy` is `Strict` and two words
    /// disagree on a shared letter.
    pub fn compose(words: &[PlacedWord], policy: MergePolicy) -> Result<Grid, CompositionError> {
        let (width, height) = bounds(words)?;
        debug!("composing {} words into a {width}x{height} grid", words.len());

        let mut grid = Grid {
            width,
            height,
            cells: vec![None; width * height],
            conflicts: Vec::new(),
        };

        let mut ordered: Vec<&PlacedWord> = words.iter().collect();
        ordered.sort_by_key(|w| (w.id, w.orientation));

        for word in ordered {
            for (i, (x, y, ch)) in word.cells().enumerate() {
                let clue_id = (i == 0).then_some(word.id);
                let idx = grid.index(x, y);
                if let Some((existing, incoming)) = merge_cell(&mut grid.cells[idx], ch, clue_id) {
                    if policy == MergePolicy::Strict {
                        return Err(CompositionError::ConflictingCrossing {
                            x,
                            y,
                            existing,
                            incoming,
                            word: word.word.clone(),
                        });
                    }
                    warn!("crossing at ({x}, {y}): '{existing}' overwritten by '{incoming}' from \"{}\"", word.word);
                    grid.conflicts.push(Conflict { x, y, existing, incoming });
                }
            }
        }

        Ok(grid)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Number of columns (`maxX`).
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (`maxY`).
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `(x, y)`, or `None` if it is empty or out of bounds.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&GridCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[self.index(x, y)].as_ref()
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<GridCell>]> {
        // `max(1)` keeps `chunks` happy for the 0x0 grid (which has no cells anyway)
        self.cells.chunks(self.width.max(1))
    }

    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Text rendering; empty squares use `fill`, and `hide_letters` blanks
    /// occupied squares to `_` (print mode).
    #[must_use]
    pub fn to_text(&self, fill: char, hide_letters: bool) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        None => fill,
                        Some(_) if hide_letters => '_',
                        Some(c) => c.ch,
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    /// A "fill character" passed in the formatter fills empty squares, e.g. `{:_>0}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        f.write_str(&self.to_text(f.fill(), false))
    }
}
