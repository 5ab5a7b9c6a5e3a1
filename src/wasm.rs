use crate::errors::CompositionError;
use crate::grid::MergePolicy;
use crate::log::init_logger;
use crate::normalizer::WordDefinitions;
use crate::placement::{PlacementMode, PlacementRecord, Placer};
use crate::puzzle::{build_puzzle, compose_puzzle, ComposeOptions, Puzzle};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Error payload handed to the web front end.
///
/// Codes are the `CompositionError` codes (`C001`..), or `WASM0xx` for
/// problems crossing the JS boundary.
#[derive(Debug, Serialize)]
struct WasmError {
    code: String,
    message: String,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl WasmError {
    /// A value could not be moved across the JS boundary.
    fn boundary(code: &str, message: String, details: &str, help: Option<&str>) -> WasmError {
        WasmError {
            code: code.to_string(),
            message,
            details: details.to_string(),
            help: help.map(str::to_string),
        }
    }
}

impl From<CompositionError> for WasmError {
    fn from(e: CompositionError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut sections = vec![format!("Error {}: {}", e.code, e.message)];
        if !e.details.is_empty() {
            sections.push(e.details);
        }
        if let Some(help) = e.help {
            sections.push(format!("Suggestion: {help}"));
        }
        js_sys::Error::new(&sections.join("\n\n")).into()
    }
}

/// Placement generator implemented in JavaScript:
/// `(words: string[], mode: "InputOrder" | "Automatic") => PlacementRecord[]`.
///
/// A throwing or misbehaving function counts as "nothing placed".
struct JsPlacer<'a> {
    place_fn: &'a js_sys::Function,
}

impl Placer for JsPlacer<'_> {
    fn place(&self, words: &[String], mode: PlacementMode) -> Vec<PlacementRecord> {
        let js_words = match serde_wasm_bindgen::to_value(words) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("could not pass words to the generator: {e}");
                return Vec::new();
            }
        };
        let returned = match self.place_fn.call2(&JsValue::NULL, &js_words, &JsValue::from_str(mode.as_str())) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("placement generator threw: {e:?}");
                return Vec::new();
            }
        };
        serde_wasm_bindgen::from_value(returned).unwrap_or_else(|e| {
            log::warn!("placement generator returned unexpected data: {e}");
            Vec::new()
        })
    }
}

/// Set up the panic hook and logging. Call once after the module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("crossword composer {} ready", env!("CARGO_PKG_VERSION"));
}

fn options(strict: bool) -> ComposeOptions {
    ComposeOptions {
        merge_policy: if strict { MergePolicy::Strict } else { MergePolicy::LastWriterWins },
    }
}

fn puzzle_to_js(puzzle: &Puzzle, hide_letters: bool) -> Result<JsValue, JsValue> {
    // json_compatible so that missing clue ids arrive as `null`, not `undefined`
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    puzzle.view(hide_letters).serialize(&serializer).map_err(|e| {
        WasmError::boundary(
            "WASM002",
            format!("could not serialize puzzle: {e}"),
            "The composed puzzle could not be converted to a JavaScript object.",
            Some("This is an internal error. Please report this issue."),
        )
        .into()
    })
}

/// JS entry: run a full pass with a JavaScript placement generator.
///
/// Returns `{width, height, hideLetters, cells, horizontal, vertical, dropped, conflicts}`.
#[wasm_bindgen]
pub fn compose_puzzle_wasm(
    text: &str,
    mode: &str,
    place_fn: &js_sys::Function,
    hide_letters: bool,
    strict: bool,
) -> Result<JsValue, JsValue> {
    let mode: PlacementMode = mode.parse().map_err(WasmError::from)?;
    let placer = JsPlacer { place_fn };
    let puzzle = build_puzzle(text, mode, &placer, &options(strict)).map_err(WasmError::from)?;
    puzzle_to_js(&puzzle, hide_letters)
}

/// JS entry: compose already-computed placements (`PlacementRecord[]`) against `text`.
///
/// For front ends that run the generator asynchronously and only call back
/// into the composer once the placements are ready.
#[wasm_bindgen]
pub fn compose_from_placements_wasm(
    text: &str,
    placements: JsValue,
    hide_letters: bool,
    strict: bool,
) -> Result<JsValue, JsValue> {
    let records: Vec<PlacementRecord> = serde_wasm_bindgen::from_value(placements).map_err(|e| {
        WasmError::boundary(
            "WASM001",
            format!("placements must be an array of placement records: {e}"),
            "Each placement must be an object {id, x, y, word, orientation}.",
            Some("Example: [{id: 1, x: 0, y: 0, word: 'cat', orientation: 'hor'}]"),
        )
    })?;
    let definitions = WordDefinitions::parse_from_str(text);
    let puzzle = compose_puzzle(&definitions, &records, &options(strict)).map_err(WasmError::from)?;
    puzzle_to_js(&puzzle, hide_letters)
}

/// JS entry: the candidate words for `text`, in the order a generator should receive them.
#[wasm_bindgen]
pub fn candidate_words_wasm(text: &str) -> Result<JsValue, JsValue> {
    let definitions = WordDefinitions::parse_from_str(text);
    serde_wasm_bindgen::to_value(definitions.words()).map_err(|e| {
        WasmError::boundary(
            "WASM003",
            format!("could not serialize candidate words: {e}"),
            "The candidate word list could not be converted to a JavaScript array.",
            Some("This is an internal error. Please report this issue."),
        )
        .into()
    })
}

/// A plain-text report users can paste into a bug report.
///
/// Lists the candidate words the composer derived from `input_text` so a
/// mis-parsed line is visible without re-running anything.
#[wasm_bindgen]
pub fn get_debug_info(input_text: &str, error_message: &str, mode: &str) -> String {
    let definitions = WordDefinitions::parse_from_str(input_text);
    let mode_line = match mode.parse::<PlacementMode>() {
        Ok(m) => m.to_string(),
        Err(e) => format!("{mode} ({})", e.code()),
    };
    let generated = js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = vec![
        format!("crossword {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
        format!("generated: {generated}"),
        String::new(),
        format!("error: {error_message}"),
        format!("mode: {mode_line}"),
        format!("candidate words ({}):", definitions.len()),
    ];
    lines.extend(
        definitions
            .iter()
            .map(|(word, definition)| format!("  {word}: {definition}")),
    );

    if let Some(window) = web_sys::window() {
        lines.push(String::new());
        if let Ok(user_agent) = window.navigator().user_agent() {
            lines.push(format!("user agent: {user_agent}"));
        }
        if let Ok(href) = window.location().href() {
            lines.push(format!("location: {href}"));
        }
    }

    lines.join("\n")
}
