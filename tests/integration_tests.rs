//! Integration tests for the crossword composer.
//!
//! These tests run complete passes, from raw "word definition" text through a
//! stand-in placement generator to the composed grid, clue panels and dropped
//! words.

use std::collections::HashSet;
use std::fs;

use crossword::grid::{Grid, MergePolicy};
use crossword::normalizer::WordDefinitions;
use crossword::placement::{
    placer_fn, Orientation, PlacedWord, PlacementMode, PlacementRecord, Placer, ReplayPlacer,
};
use crossword::puzzle::{build_puzzle, compose_puzzle, ComposeOptions, Puzzle};
use crossword::session::Session;

/// Load the sample word list from fixtures
fn load_words() -> String {
    fs::read_to_string("tests/fixtures/words.txt").expect("Failed to read word fixture")
}

/// Load the recorded generator output from fixtures
fn load_placer() -> ReplayPlacer {
    ReplayPlacer::load_from_path("tests/fixtures/placements.json").expect("Failed to read placement fixture")
}

fn compose(text: &str, records: Vec<PlacementRecord>) -> Puzzle {
    build_puzzle(text, PlacementMode::InputOrder, &ReplayPlacer::new(records), &ComposeOptions::default()).unwrap()
}

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn test_one_word_placed_one_dropped() {
        let text = "cat small feline\ndog man's best friend\n";
        let defs = WordDefinitions::parse_from_str(text);
        assert_eq!(defs.words(), ["cat", "dog"]);

        let puzzle = compose(text, vec![PlacementRecord::new(1, 0, 0, "cat", Orientation::Horizontal)]);

        assert_eq!(puzzle.dropped(), ["dog"]);
        assert_eq!(puzzle.grid().height(), 1);
        assert_eq!(puzzle.grid().width(), 3);
        assert_eq!(puzzle.grid().cell(0, 0).unwrap().clue_id, Some(1));
        let json = serde_json::to_value(puzzle.view(false)).unwrap();
        assert_eq!(json["cells"][0][0]["clueId"], "1");
    }

    #[test]
    fn test_duplicate_lines_last_definition_wins() {
        let defs = WordDefinitions::parse_from_str("cat a\ncat b\n");

        assert_eq!(defs.len(), 1);
        assert_eq!(defs.definition("cat"), Some("b"));
    }

    #[test]
    fn test_shared_start_cell_has_single_winner() {
        let puzzle = compose(
            "cat feline\ncar to drive\n",
            vec![
                PlacementRecord::new(2, 0, 0, "car", Orientation::Vertical),
                PlacementRecord::new(1, 0, 0, "cat", Orientation::Horizontal),
            ],
        );

        assert_eq!(puzzle.grid().cell(0, 0).unwrap().clue_id, Some(1));
        // both clues are still listed
        assert_eq!(puzzle.clues().len(), 2);
    }

    #[test]
    fn test_empty_text() {
        let puzzle = compose("", Vec::new());

        assert_eq!((puzzle.grid().width(), puzzle.grid().height()), (0, 0));
        assert!(puzzle.clues().is_empty());
        assert_eq!(puzzle.horizontal_clues().count(), 0);
        assert_eq!(puzzle.vertical_clues().count(), 0);
        assert!(puzzle.dropped().is_empty());
    }
}

#[cfg(test)]
mod properties {
    use super::*;

    fn fixture_puzzle() -> Puzzle {
        build_puzzle(&load_words(), PlacementMode::Automatic, &load_placer(), &ComposeOptions::default()).unwrap()
    }

    fn fixture_placed() -> Vec<PlacedWord> {
        let defs = WordDefinitions::parse_from_str(&load_words());
        load_placer()
            .place(defs.words(), PlacementMode::Automatic)
            .iter()
            .map(|r| PlacedWord::try_from_record(r).unwrap())
            .collect()
    }

    #[test]
    fn test_fixture_layout() {
        let puzzle = fixture_puzzle();

        assert_eq!((puzzle.grid().width(), puzzle.grid().height()), (4, 5));
        assert_eq!(puzzle.dropped(), ["car", "trap"]);
        let clues: Vec<(usize, &str, Option<&str>)> = puzzle
            .clues()
            .iter()
            .map(|c| (c.id, c.word.as_str(), c.definition.as_deref()))
            .collect();
        assert_eq!(
            clues,
            vec![(1, "boar", Some("boar")), (1, "bird", Some("flies")), (2, "robot", Some("not human"))]
        );
        assert!(puzzle.grid().conflicts().is_empty());
    }

    #[test]
    fn test_coverage_is_disjoint_union_of_candidates() {
        let puzzle = fixture_puzzle();
        let defs = WordDefinitions::parse_from_str(&load_words());

        let placed: HashSet<String> = puzzle.clues().iter().map(|c| c.word.clone()).collect();
        let dropped: HashSet<String> = puzzle.dropped().iter().cloned().collect();
        let candidates: HashSet<String> = defs.words().iter().cloned().collect();

        assert!(placed.is_disjoint(&dropped));
        assert_eq!(placed.union(&dropped).cloned().collect::<HashSet<_>>(), candidates);
    }

    #[test]
    fn test_clue_numbers_only_on_origins() {
        let puzzle = fixture_puzzle();
        let placed = fixture_placed();
        let origins: HashSet<(usize, usize)> = placed.iter().map(|p| (p.x, p.y)).collect();

        for word in &placed {
            let origin = puzzle.grid().cell(word.x, word.y).unwrap();
            // ids on a shared origin belong to the first word written there
            let expected = placed
                .iter()
                .filter(|p| (p.x, p.y) == (word.x, word.y))
                .map(|p| p.id)
                .min();
            assert_eq!(origin.clue_id, expected);

            for (x, y, _) in word.cells().skip(1) {
                let cell = puzzle.grid().cell(x, y).unwrap();
                if !origins.contains(&(x, y)) {
                    assert_eq!(cell.clue_id, None, "unexpected clue number at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_bounds_match_word_extents() {
        let puzzle = fixture_puzzle();
        let placed = fixture_placed();

        let max_x = placed
            .iter()
            .map(|p| match p.orientation {
                Orientation::Horizontal => p.x + p.len(),
                Orientation::Vertical => p.x + 1,
            })
            .max()
            .unwrap();
        let max_y = placed
            .iter()
            .map(|p| match p.orientation {
                Orientation::Horizontal => p.y + 1,
                Orientation::Vertical => p.y + p.len(),
            })
            .max()
            .unwrap();

        assert_eq!(puzzle.grid().width(), max_x);
        assert_eq!(puzzle.grid().height(), max_y);
    }

    #[test]
    fn test_same_input_same_output() {
        assert_eq!(fixture_puzzle(), fixture_puzzle());
    }

    #[test]
    fn test_generator_output_order_does_not_matter() {
        let mut placed = fixture_placed();
        let forward = Grid::compose(&placed, MergePolicy::default()).unwrap();
        placed.reverse();
        let backward = Grid::compose(&placed, MergePolicy::default()).unwrap();
        assert_eq!(forward, backward);
    }
}

#[cfg(test)]
mod error_cases {
    use super::*;

    #[test]
    fn test_bad_orientation_is_fatal() {
        let placer = placer_fn(|words: &[String], _mode: PlacementMode| {
            words
                .iter()
                .map(|w| PlacementRecord {
                    id: 1,
                    x: 0,
                    y: 0,
                    word: w.clone(),
                    orientation: "hor?".to_string(),
                })
                .collect()
        });
        let err = build_puzzle("cat feline", PlacementMode::InputOrder, &placer, &ComposeOptions::default()).unwrap_err();
        assert_eq!(err.code(), "C001");
        assert!(err.display_detailed().contains("hor?"));
    }

    #[test]
    fn test_generator_failure_drops_everything() {
        let placer = placer_fn(|_: &[String], _: PlacementMode| Vec::new());
        let puzzle = build_puzzle("cat feline\ndog canine", PlacementMode::Automatic, &placer, &ComposeOptions::default()).unwrap();

        assert!(puzzle.grid().is_empty());
        assert_eq!(puzzle.dropped(), ["cat", "dog"]);
    }

    #[test]
    fn test_unrequested_word_still_rendered() {
        let placer = placer_fn(|_: &[String], _: PlacementMode| {
            vec![PlacementRecord::new(1, 0, 0, "emu", Orientation::Vertical)]
        });
        let puzzle = build_puzzle("cat feline", PlacementMode::InputOrder, &placer, &ComposeOptions::default()).unwrap();

        assert_eq!(puzzle.clues()[0].definition, None);
        assert_eq!(puzzle.grid().cell(0, 2).unwrap().ch, 'u');
        assert_eq!(puzzle.dropped(), ["cat"]);
    }

    #[test]
    fn test_huge_coordinates_fail_the_pass() {
        let defs = WordDefinitions::parse_from_str("cat feline");
        for record in [
            PlacementRecord::new(1, i64::MAX, 0, "cat", Orientation::Horizontal),
            PlacementRecord::new(1, 4_000_000_000, 0, "cat", Orientation::Horizontal),
            PlacementRecord::new(1, 0, 4_000_000_000, "cat", Orientation::Vertical),
        ] {
            let err = compose_puzzle(&defs, &[record], &ComposeOptions::default()).unwrap_err();
            assert_eq!(err.code(), "C007");
        }
    }

    #[test]
    fn test_empty_word_fails_the_pass() {
        let placer = placer_fn(|_: &[String], _: PlacementMode| {
            vec![
                PlacementRecord::new(1, 0, 0, "cat", Orientation::Horizontal),
                PlacementRecord::new(2, 0, 3, "", Orientation::Horizontal),
            ]
        });
        let err = build_puzzle("cat feline", PlacementMode::InputOrder, &placer, &ComposeOptions::default()).unwrap_err();
        assert_eq!(err.code(), "C008");
    }

    #[test]
    fn test_strict_policy_rejects_mismatched_crossing() {
        let records = vec![
            PlacementRecord::new(1, 0, 0, "cat", Orientation::Horizontal),
            PlacementRecord::new(2, 0, 0, "dog", Orientation::Vertical),
        ];
        let strict = ComposeOptions { merge_policy: MergePolicy::Strict };
        let err = build_puzzle("cat a\ndog b", PlacementMode::InputOrder, &ReplayPlacer::new(records.clone()), &strict)
            .unwrap_err();
        assert_eq!(err.code(), "C003");

        // the default policy keeps the later letter and reports the conflict
        let puzzle = compose("cat a\ndog b", records);
        assert_eq!(puzzle.grid().cell(0, 0).unwrap().ch, 'd');
        assert_eq!(puzzle.grid().conflicts().len(), 1);
    }

    #[test]
    fn test_session_survives_fatal_pass() {
        let placer = placer_fn(|words: &[String], _mode: PlacementMode| {
            words
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let x = if w == "bad" { -3 } else { 0 };
                    PlacementRecord::new(i + 1, x, 2 * i as i64, w, Orientation::Horizontal)
                })
                .collect()
        });
        let mut session = Session::new(placer, ComposeOptions::default());

        session.submit("cat feline\ndog canine").unwrap();
        let good = session.puzzle().clone();

        let err = session.submit("cat feline\nbad word").unwrap_err();
        assert_eq!(err.code(), "C002");
        assert_eq!(session.puzzle(), &good);
    }
}

#[cfg(test)]
mod cli {
    use std::process::Command;

    #[test]
    fn test_cli_replays_placements() {
        let output = Command::new(env!("CARGO_BIN_EXE_crossword"))
            .args(["tests/fixtures/words.txt", "--placements", "tests/fixtures/placements.json"])
            .output()
            .expect("failed to run crossword binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with(" 1b   o   a  2r\n"));
        assert!(stdout.contains("Horizontal\n1: boar\n"));
        assert!(stdout.contains("Vertical\n1: flies\n2: not human\n"));
        assert!(stdout.contains("Dropped words\ncar\ntrap\n"));
    }

    #[test]
    fn test_cli_json_print_mode() {
        let output = Command::new(env!("CARGO_BIN_EXE_crossword"))
            .args(["tests/fixtures/words.txt", "-p", "tests/fixtures/placements.json", "--json", "--hide-letters"])
            .output()
            .expect("failed to run crossword binary");

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["width"], 4);
        assert_eq!(json["cells"][0][0]["char"], serde_json::Value::Null);
        assert_eq!(json["cells"][0][0]["clueId"], "1");
        assert_eq!(json["dropped"], serde_json::json!(["car", "trap"]));
    }

    #[test]
    fn test_cli_missing_input_fails_with_code() {
        let output = Command::new(env!("CARGO_BIN_EXE_crossword"))
            .args(["tests/fixtures/nope.txt", "--placements", "tests/fixtures/placements.json"])
            .output()
            .expect("failed to run crossword binary");

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("C005"));
    }
}
