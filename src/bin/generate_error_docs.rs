//! Generate error code documentation from the source of truth (the error enum).
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use crossword::errors::CompositionError;

/// One instance of every `CompositionError` variant, with representative payloads.
fn all_error_variants() -> Vec<CompositionError> {
    vec![
        CompositionError::BadOrientation {
            id: 3,
            word: "boar".to_string(),
            orientation: "diagonal".to_string(),
        },
        CompositionError::NegativeCoordinate {
            id: 2,
            word: "robot".to_string(),
            x: -1,
            y: 4,
        },
        CompositionError::ConflictingCrossing {
            x: 2,
            y: 0,
            existing: 'b',
            incoming: 'x',
            word: "xyz".to_string(),
        },
        CompositionError::UnknownMode { mode: "random".to_string() },
        CompositionError::Io {
            context: "failed to read word list from 'words.txt'".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        },
        CompositionError::InvalidPlacements {
            // create by parsing malformed JSON
            source: serde_json::from_str::<Vec<u8>>("[1, 2").unwrap_err(),
        },
        CompositionError::GridTooLarge {
            id: 5,
            word: "trap".to_string(),
            max_cells: crossword::grid::MAX_GRID_CELLS,
        },
        CompositionError::EmptyWord { id: 6 },
    ]
}

fn main() {
    println!("# Error Codes\n");
    println!("Errors C001-C003, C007 and C008 abort a composition pass; the previously shown puzzle is kept.\n");

    for error in all_error_variants() {
        println!("### {}: {}\n", error.code(), error.description());
        println!("**Details:** {}\n", error.details());

        if let Some(help_text) = error.help() {
            println!("**How to fix:**");
            println!("```");
            println!("{help_text}");
            println!("```\n");
        }

        println!("**Example error message:**");
        println!("```");
        println!("{error}");
        println!("```\n");

        println!("**Detailed format:**");
        println!("```");
        println!("{}", error.display_detailed());
        println!("```\n");

        println!("---\n");
    }
}
