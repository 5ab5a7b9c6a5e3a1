//! One composition pass: text + mode -> grid, clues and dropped words.
//!
//! # Examples
//!
//! ```
//! use crossword::placement::{placer_fn, Orientation, PlacementMode, PlacementRecord};
//! use crossword::puzzle::{build_puzzle, ComposeOptions};
//!
//! // A stand-in generator that only manages to place "cat".
//! let placer = placer_fn(|words: &[String], _mode: PlacementMode| {
//!     words
//!         .iter()
//!         .filter(|w| w.as_str() == "cat")
//!         .map(|w| PlacementRecord::new(1, 0, 0, w, Orientation::Horizontal))
//!         .collect()
//! });
//!
//! let text = "cat small feline\ndog man's best friend\n";
//! let puzzle = build_puzzle(text, PlacementMode::InputOrder, &placer, &ComposeOptions::default())?;
//!
//! assert_eq!(puzzle.dropped(), ["dog"]);
//! assert_eq!((puzzle.grid().width(), puzzle.grid().height()), (3, 1));
//! assert_eq!(puzzle.grid().cell(0, 0).unwrap().clue_id, Some(1));
//! # Ok::<(), crossword::errors::CompositionError>(())
//! ```

use instant::Instant;
use log::{debug, info, warn};
use serde::Serialize;

use crate::errors::CompositionError;
use crate::grid::{Conflict, Grid, MergePolicy};
use crate::normalizer::WordDefinitions;
use crate::placement::{Orientation, PlacedWord, PlacementMode, PlacementRecord, Placer};
use crate::reconcile;

/// Knobs for a composition pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    pub merge_policy: MergePolicy,
}

/// An entry in the clue panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    pub id: usize,
    pub word: String,
    /// `None` when the generator placed a word that was never requested.
    pub definition: Option<String>,
    pub orientation: Orientation,
}

/// Immutable output of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Puzzle {
    grid: Grid,
    clues: Vec<Clue>,
    dropped: Vec<String>,
}

impl Puzzle {
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All clues, sorted by id (Horizontal before Vertical on equal ids).
    #[must_use]
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn horizontal_clues(&self) -> impl Iterator<Item = &Clue> {
        self.clues.iter().filter(|c| c.orientation == Orientation::Horizontal)
    }

    pub fn vertical_clues(&self) -> impl Iterator<Item = &Clue> {
        self.clues.iter().filter(|c| c.orientation == Orientation::Vertical)
    }

    /// Requested words the generator could not place, in input order.
    #[must_use]
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Serializable snapshot for renderers. With `hide_letters` the letters are
    /// left out but clue numbers stay.
    #[must_use]
    pub fn view(&self, hide_letters: bool) -> PuzzleView<'_> {
        let cells = self
            .grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.as_ref().map(|c| CellView {
                            ch: if hide_letters { None } else { Some(c.ch) },
                            clue_id: c.clue_id.map(|id| id.to_string()),
                        })
                    })
                    .collect()
            })
            .collect();

        PuzzleView {
            width: self.grid.width(),
            height: self.grid.height(),
            hide_letters,
            cells,
            horizontal: self.horizontal_clues().collect(),
            vertical: self.vertical_clues().collect(),
            dropped: &self.dropped,
            conflicts: self.grid.conflicts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    #[serde(rename = "char")]
    pub ch: Option<char>,
    #[serde(rename = "clueId")]
    pub clue_id: Option<String>,
}

/// Render-ready form of a [`Puzzle`], shared by the JSON and WASM outputs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleView<'a> {
    pub width: usize,
    pub height: usize,
    pub hide_letters: bool,
    pub cells: Vec<Vec<Option<CellView>>>,
    pub horizontal: Vec<&'a Clue>,
    pub vertical: Vec<&'a Clue>,
    pub dropped: &'a [String],
    pub conflicts: &'a [Conflict],
}

/// Run a full pass: normalize `text`, ask `placer` for placements, compose and reconcile.
///
/// # Errors
///
/// Fails only on generator contract violations (bad orientation, negative or
/// oversized coordinates, empty word) or, with `MergePolicy::Strict`, on a
/// mismatched crossing.
pub fn build_puzzle<P: Placer + ?Sized>(
    text: &str,
    mode: PlacementMode,
    placer: &P,
    options: &ComposeOptions,
) -> Result<Puzzle, CompositionError> {
    let t_start = Instant::now();
    let definitions = WordDefinitions::parse_from_str(text);

    let records = if definitions.is_empty() {
        Vec::new()
    } else {
        placer.place(definitions.words(), mode)
    };
    debug!("generator placed {} of {} words ({mode})", records.len(), definitions.len());

    let puzzle = compose_puzzle(&definitions, &records, options)?;
    info!(
        "composed {}x{} puzzle: {} clues, {} dropped in {:.3}s",
        puzzle.grid.width(),
        puzzle.grid.height(),
        puzzle.clues.len(),
        puzzle.dropped.len(),
        t_start.elapsed().as_secs_f64()
    );
    Ok(puzzle)
}

/// Compose already-obtained generator output against the requested words.
///
/// # Errors
///
/// See [`build_puzzle`].
pub fn compose_puzzle(
    definitions: &WordDefinitions,
    records: &[PlacementRecord],
    options: &ComposeOptions,
) -> Result<Puzzle, CompositionError> {
    let placed = records
        .iter()
        .map(PlacedWord::try_from_record)
        .collect::<Result<Vec<_>, _>>()?;

    let grid = Grid::compose(&placed, options.merge_policy)?;

    let mut clues: Vec<Clue> = placed
        .iter()
        .map(|p| Clue {
            id: p.id,
            word: p.word.clone(),
            definition: definitions.definition(&p.word).map(str::to_string),
            orientation: p.orientation,
        })
        .collect();
    clues.sort_by_key(|c| (c.id, c.orientation));

    for word in reconcile::unknown_placements(definitions.words(), &placed) {
        warn!("generator placed unrequested word \"{word}\"; it has no definition");
    }
    for word in reconcile::duplicate_placements(&placed) {
        warn!("generator placed \"{word}\" more than once");
    }

    let dropped = reconcile::dropped_words(definitions.words(), &placed);
    if !dropped.is_empty() {
        debug!("dropped words: {dropped:?}");
    }

    Ok(Puzzle { grid, clues, dropped })
}
