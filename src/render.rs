//! Plain-text rendering of a puzzle for the terminal.
//!
//! Each square is three characters wide: the clue number right-aligned in two
//! columns, then the letter. In print mode the letter becomes `_` and the
//! numbers stay.

use std::fmt::Write;

use crate::puzzle::{Clue, Puzzle};

const EMPTY_SQUARE: &str = "   ";

/// Render grid, clue panels, and dropped words.
#[must_use]
pub fn render_text(puzzle: &Puzzle, hide_letters: bool) -> String {
    let mut out = String::new();

    // NB: writing to a String never fails
    for row in puzzle.grid().rows() {
        let line = row
            .iter()
            .map(|cell| match cell {
                None => EMPTY_SQUARE.to_string(),
                Some(c) => {
                    let number = c.clue_id.map(|id| id.to_string()).unwrap_or_default();
                    let letter = if hide_letters { '_' } else { c.ch };
                    format!("{number:>2}{letter}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{}", line.trim_end());
    }

    write_panel(&mut out, "Horizontal", puzzle.horizontal_clues());
    write_panel(&mut out, "Vertical", puzzle.vertical_clues());

    if !puzzle.dropped().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Dropped words");
        for word in puzzle.dropped() {
            let _ = writeln!(out, "{word}");
        }
    }

    out
}

fn write_panel<'a>(out: &mut String, title: &str, clues: impl Iterator<Item = &'a Clue>) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    for clue in clues {
        let _ = writeln!(out, "{}: {}", clue.id, clue.definition.as_deref().unwrap_or(""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Orientation, PlacementMode, PlacementRecord, ReplayPlacer};
    use crate::puzzle::{build_puzzle, ComposeOptions};

    fn sample() -> Puzzle {
        let placer = ReplayPlacer::new(vec![
            PlacementRecord::new(1, 0, 0, "cat", Orientation::Horizontal),
            PlacementRecord::new(1, 0, 0, "car", Orientation::Vertical),
        ]);
        let text = "cat small feline\ncar to drive\ndog man's best friend\n";
        build_puzzle(text, PlacementMode::InputOrder, &placer, &ComposeOptions::default()).unwrap()
    }

    #[test]
    fn test_render_with_letters() {
        let text = render_text(&sample(), false);
        let expected = " 1c   a   t\n  a\n  r\n\nHorizontal\n1: small feline\n\nVertical\n1: to drive\n\nDropped words\ndog\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_print_mode_keeps_numbers() {
        let text = render_text(&sample(), true);
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, " 1_   _   _");
        assert!(!text.lines().take(3).any(|l| l.contains('c') || l.contains('a')));
    }

    #[test]
    fn test_render_empty_puzzle() {
        let text = render_text(&Puzzle::default(), false);
        assert_eq!(text, "\nHorizontal\n\nVertical\n");
    }
}
