// Library API shared by the CLI and the wasm build
pub mod errors;
pub mod grid;
pub mod log;
pub mod normalizer;
pub mod placement;
pub mod puzzle;
pub mod reconcile;
pub mod render;
pub mod session;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
