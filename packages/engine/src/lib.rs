//! Arrows Engine - chunked logic-circuit cellular automaton in WASM
//!
//! Architecture:
//! - domain/      - Cell model and settings
//! - spatial/     - Chunks and the sparse chunk store
//! - systems/     - Per-type cell rules
//! - codec/       - Binary world format and base64 transport
//! - simulation/  - Tick engine, edit commands, wasm facade

pub mod spatial;
pub mod domain;
pub mod systems;
pub mod codec;
pub mod simulation;
pub mod error;

pub mod world {
    pub use crate::simulation::*;
}

// Short paths for the most used modules
pub use spatial::chunks;
pub use systems::rules;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Arrows WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use simulation::{PerfStats, World, WorldCore};
pub use domain::cells::{Cell, CellType, Direction, Signal, CELL_TYPE_COUNT};
pub use domain::config::SimConfig;
pub use error::{ConfigError, DecodeError, EncodeError, RuleError, SimError};

/// Number of cell types known to this engine, for JS palettes
#[wasm_bindgen]
pub fn cell_type_count() -> u8 { CELL_TYPE_COUNT as u8 }
