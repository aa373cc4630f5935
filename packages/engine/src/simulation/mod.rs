//! World - chunked logic-circuit simulation
//!
//! `WorldCore` owns the chunk store and runs the two-phase tick:
//! - evaluate: every awake chunk runs its cells' rules, queueing messages in
//!   its own outbox only (parallel over chunks)
//! - apply: outboxes are drained in store order and each message is delivered
//!   to its target cell, creating and waking chunks as needed (sequential)
//!
//! Rules live in systems/rules, storage in spatial/chunks, the binary world
//! format in codec.

use crate::domain::cells::{Cell, Signal};
use crate::domain::config::SimConfig;
use crate::error::{ConfigError, DecodeError, EncodeError, RuleError, SimError};
use crate::spatial::chunks::{ChunkPos, ChunkStore};
use crate::systems::rules::RuleRegistry;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/evaluate.rs"]
mod evaluate;
#[path = "step/apply.rs"]
mod apply;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/import.rs"]
mod import;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// Format version written by this engine when a world has none.
pub const DEFAULT_WORLD_VERSION: u16 = 0;

/// The simulation world
pub struct WorldCore {
    version: u16,
    store: ChunkStore,
    rules: RuleRegistry,
    config: SimConfig,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,

    // State
    tick: u64,
    rng_state: u32,
    tick_debt: f32,
    paused: bool,
    fault: Option<RuleError>,
    evaluated_total: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create an empty world with default settings.
    pub fn new() -> Self {
        init::create_world_core_default()
    }

    /// Create an empty world; fails if the settings are out of range.
    pub fn with_config(config: SimConfig) -> Result<Self, ConfigError> {
        init::create_world_core(config)
    }

    pub fn version(&self) -> u16 { self.version }

    pub fn set_version(&mut self, version: u16) { self.version = version; }

    /// Ticks completed since creation or the last `clear`.
    pub fn tick_count(&self) -> u64 { self.tick }

    pub fn chunk_count(&self) -> usize { self.store.len() }

    /// Read-only view for renderers. Must not be used while a tick runs.
    pub fn store(&self) -> &ChunkStore { &self.store }

    pub fn chunk_idle_ticks(&self, pos: ChunkPos) -> Option<u8> {
        self.store.get(pos).map(|chunk| chunk.idle_ticks())
    }

    /// Total chunk evaluations across all ticks.
    pub fn evaluated_chunks_total(&self) -> u64 { self.evaluated_total }

    pub fn is_faulted(&self) -> bool { self.fault.is_some() }

    pub fn fault(&self) -> Option<&RuleError> { self.fault.as_ref() }

    // === Settings ===

    pub fn config(&self) -> &SimConfig { &self.config }

    /// Replace every setting at once; nothing changes if validation fails.
    pub fn apply_config(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        settings::apply_config(self, config)
    }

    pub fn set_ticks_per_second(&mut self, tps: f32) -> Result<(), ConfigError> {
        settings::set_ticks_per_second(self, tps)
    }

    pub fn set_threads(&mut self, threads: usize) -> Result<(), ConfigError> {
        settings::set_threads(self, threads)
    }

    pub fn set_dormancy_threshold(&mut self, threshold: u8) -> Result<(), ConfigError> {
        settings::set_dormancy_threshold(self, threshold)
    }

    pub fn set_paused(&mut self, paused: bool) {
        settings::set_paused(self, paused);
    }

    pub fn is_paused(&self) -> bool { self.paused }

    /// Enable or disable per-tick timings (adds clock reads when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Stats of the last tick
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Cells ===

    /// Snapshot of one cell; untouched space reads as empty and is not
    /// allocated.
    pub fn get_cell(&self, x: i32, y: i32) -> Cell {
        self.store.peek_cell(x, y).copied().unwrap_or(Cell::EMPTY)
    }

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        commands::set_cell(self, x, y, cell)
    }

    /// Reset a cell to empty. Returns false if it was already empty.
    pub fn remove_cell(&mut self, x: i32, y: i32) -> bool {
        commands::remove_cell(self, x, y)
    }

    /// Overwrite a cell's signal from outside the tick (button presses,
    /// level sources). The change is seen by the next evaluate phase.
    pub fn force_signal(&mut self, x: i32, y: i32, signal: Signal) {
        commands::force_signal(self, x, y, signal)
    }

    /// Drop every signal and pending message, keeping the placed elements.
    pub fn clear_signals(&mut self) {
        commands::clear_signals(self)
    }

    /// Remove everything and reset the tick counter and any fault.
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Import / export ===

    /// Overlay a binary world onto this one. On error nothing is modified.
    pub fn import(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        import::import(self, bytes)
    }

    pub fn import_base64(&mut self, text: &str) -> Result<(), DecodeError> {
        import::import_base64(self, text)
    }

    pub fn export(&self) -> Result<Vec<u8>, EncodeError> {
        import::export(self)
    }

    pub fn export_base64(&self) -> Result<String, EncodeError> {
        import::export_base64(self)
    }

    // === Ticking ===

    /// Advance exactly `n` ticks.
    pub fn tick(&mut self, n: u32) -> Result<(), SimError> {
        step::tick(self, n)
    }

    /// Called once per presentation frame: runs the ticks owed at the
    /// configured rate and returns how many ran.
    pub fn advance(&mut self) -> Result<u32, SimError> {
        step::advance(self)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
