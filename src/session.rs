//! Interactive session: the latest successfully composed puzzle plus the
//! inputs that produced it.
//!
//! Every text submission or mode change runs a full pass. A pass that fails
//! leaves the previous puzzle in place, so a renderer never shows a partial
//! grid. For generators that answer asynchronously, [`Session::begin`] hands
//! out a [`PassTicket`] and [`Session::complete`] ignores tickets that have
//! been superseded by a newer submission.

use log::{debug, warn};

use crate::errors::CompositionError;
use crate::normalizer::WordDefinitions;
use crate::placement::{PlacementMode, PlacementRecord, Placer};
use crate::puzzle::{build_puzzle, compose_puzzle, ComposeOptions, Puzzle};

/// Identifies one submitted pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassTicket {
    generation: u64,
    text: String,
    definitions: WordDefinitions,
    mode: PlacementMode,
}

impl PassTicket {
    /// Words to hand to the generator for this pass.
    #[must_use]
    pub fn words(&self) -> &[String] {
        self.definitions.words()
    }

    #[must_use]
    pub fn mode(&self) -> PlacementMode {
        self.mode
    }
}

/// What happened to a completed pass.
#[derive(Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// The puzzle was replaced.
    Applied,
    /// A newer submission exists; the result was discarded.
    Stale,
}

pub struct Session<P: Placer> {
    placer: P,
    options: ComposeOptions,
    mode: PlacementMode,
    text: String,
    puzzle: Puzzle,
    generation: u64,
}

impl<P: Placer> Session<P> {
    pub fn new(placer: P, options: ComposeOptions) -> Session<P> {
        Session {
            placer,
            options,
            mode: PlacementMode::default(),
            text: String::new(),
            puzzle: Puzzle::default(),
            generation: 0,
        }
    }

    /// The last puzzle that composed cleanly.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Text the current puzzle was built from.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Compose `text` with the current mode.
    ///
    /// # Errors
    ///
    /// Returns the pass error; the previous puzzle is kept.
    pub fn submit(&mut self, text: &str) -> Result<&Puzzle, CompositionError> {
        self.run(text.to_string(), self.mode)
    }

    /// Switch mode and recompose the current text.
    ///
    /// # Errors
    ///
    /// Returns the pass error; the previous puzzle and mode are kept.
    pub fn set_mode(&mut self, mode: PlacementMode) -> Result<&Puzzle, CompositionError> {
        let text = self.text.clone();
        self.run(text, mode)
    }

    /// # Errors
    ///
    /// See [`Session::set_mode`].
    pub fn toggle_mode(&mut self) -> Result<&Puzzle, CompositionError> {
        self.set_mode(self.mode.toggled())
    }

    fn run(&mut self, text: String, mode: PlacementMode) -> Result<&Puzzle, CompositionError> {
        self.generation += 1;
        match build_puzzle(&text, mode, &self.placer, &self.options) {
            Ok(puzzle) => {
                self.puzzle = puzzle;
                self.text = text;
                self.mode = mode;
                Ok(&self.puzzle)
            }
            Err(e) => {
                warn!("pass {} failed, keeping previous puzzle: {e}", self.generation);
                Err(e)
            }
        }
    }

    /// Start a pass whose placements will arrive later.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin(&mut self, text: &str, mode: PlacementMode) -> PassTicket {
        self.generation += 1;
        debug!("pass {} started ({mode})", self.generation);
        PassTicket {
            generation: self.generation,
            text: text.to_string(),
            definitions: WordDefinitions::parse_from_str(text),
            mode,
        }
    }

    /// Finish a pass started with [`Session::begin`].
    ///
    /// # Errors
    ///
    /// Returns the pass error for a current ticket; the previous puzzle is kept.
    /// Stale tickets never fail: their records are dropped unexamined.
    pub fn complete(&mut self, ticket: PassTicket, records: &[PlacementRecord]) -> Result<PassOutcome, CompositionError> {
        if ticket.generation != self.generation {
            debug!("discarding stale pass {} (latest is {})", ticket.generation, self.generation);
            return Ok(PassOutcome::Stale);
        }
        match compose_puzzle(&ticket.definitions, records, &self.options) {
            Ok(puzzle) => {
                self.puzzle = puzzle;
                self.text = ticket.text;
                self.mode = ticket.mode;
                Ok(PassOutcome::Applied)
            }
            Err(e) => {
                warn!("pass {} failed, keeping previous puzzle: {e}", ticket.generation);
                Err(e)
            }
        }
    }
}
