use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use crossword::errors::CompositionError;
use crossword::grid::MergePolicy;
use crossword::placement::{CommandPlacer, PlacementMode, Placer, ReplayPlacer};
use crossword::puzzle::{build_puzzle, ComposeOptions};
use crossword::render::render_text;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Compose a crossword grid and clue list from "word definition" lines
#[derive(Parser, Debug)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
struct Cli {
    /// File with one "word definition" pair per line ("-" reads stdin)
    input: String,

    /// Placement mode passed to the generator
    #[arg(short, long, value_enum, default_value_t = ModeArg::InputOrder)]
    mode: ModeArg,

    /// External generator executable: reads words on stdin, prints placement JSON
    #[arg(short, long, conflicts_with = "placements", required_unless_present = "placements")]
    generator: Option<PathBuf>,

    /// Extra argument for the generator (repeatable); the mode is appended last
    #[arg(long = "generator-arg", requires = "generator")]
    generator_args: Vec<String>,

    /// Recorded generator output (JSON array of placements) to replay
    #[arg(short, long)]
    placements: Option<PathBuf>,

    /// Print mode: hide letters, keep clue numbers
    #[arg(long)]
    hide_letters: bool,

    /// Emit the puzzle as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Treat crossing words that disagree on a letter as an error
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    InputOrder,
    Automatic,
}

impl From<ModeArg> for PlacementMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::InputOrder => PlacementMode::InputOrder,
            ModeArg::Automatic => PlacementMode::Automatic,
        }
    }
}

/// Entry point of the crossword CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    crossword::log::init_logger(crossword::log::debug_requested());

    if let Err(e) = try_main() {
        if let Some(ce) = e.downcast_ref::<CompositionError>() {
            eprintln!("Error: {}", ce.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic:
/// 1. Parse CLI arguments.
/// 2. Read the word/definition text.
/// 3. Pick the placement collaborator (subprocess or replay).
/// 4. Run one composition pass and print the result on stdout.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let text = read_input(&cli.input)?;

    let placer: Box<dyn Placer> = match (&cli.generator, &cli.placements) {
        (Some(program), _) => Box::new(CommandPlacer::new(program).with_args(cli.generator_args.iter().cloned())),
        (None, Some(path)) => Box::new(ReplayPlacer::load_from_path(path)?),
        (None, None) => return Err("either --generator or --placements is required".into()),
    };

    let options = ComposeOptions {
        merge_policy: if cli.strict { MergePolicy::Strict } else { MergePolicy::LastWriterWins },
    };

    let puzzle = build_puzzle(&text, cli.mode.into(), placer.as_ref(), &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&puzzle.view(cli.hide_letters))?);
    } else {
        print!("{}", render_text(&puzzle, cli.hide_letters));
    }

    if !puzzle.grid().conflicts().is_empty() {
        eprintln!(
            "⚠️  {} crossing(s) had mismatched letters; rerun with --strict to reject them",
            puzzle.grid().conflicts().len()
        );
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String, CompositionError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CompositionError::Io { context: "failed to read stdin".to_string(), source })?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).map_err(|source| CompositionError::Io {
            context: format!("failed to read word list from '{input}'"),
            source,
        })
    }
}
