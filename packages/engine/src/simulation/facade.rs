use wasm_bindgen::prelude::*;

use crate::domain::cells::{Cell, CellType, Direction, Signal};
use crate::domain::config::SimConfig;
use crate::spatial::chunks::ChunkPos;

use super::perf_stats::PerfStats;
use super::WorldCore;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create an empty world with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: WorldCore::new() }
    }

    /// Create an empty world from a JSON `SimConfig`
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<World, JsValue> {
        let config = SimConfig::from_json(json).map_err(js_err)?;
        let core = WorldCore::with_config(config).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> u16 { self.core.version() }

    #[wasm_bindgen(setter)]
    pub fn set_version(&mut self, version: u16) {
        self.core.set_version(version);
    }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 { self.core.tick_count() }

    #[wasm_bindgen(getter)]
    pub fn chunk_count(&self) -> usize { self.core.chunk_count() }

    #[wasm_bindgen(getter)]
    pub fn faulted(&self) -> bool { self.core.is_faulted() }

    // === Ticking ===

    pub fn tick(&mut self, n: u32) -> Result<(), JsValue> {
        self.core.tick(n).map_err(js_err)
    }

    /// Run the ticks owed for one presentation frame; returns how many ran
    pub fn advance(&mut self) -> Result<u32, JsValue> {
        self.core.advance().map_err(js_err)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool { self.core.is_paused() }

    // === Settings ===

    pub fn set_ticks_per_second(&mut self, tps: f32) -> Result<(), JsValue> {
        self.core.set_ticks_per_second(tps).map_err(js_err)
    }

    pub fn set_threads(&mut self, threads: usize) -> Result<(), JsValue> {
        self.core.set_threads(threads).map_err(js_err)
    }

    pub fn set_dormancy_threshold(&mut self, threshold: u8) -> Result<(), JsValue> {
        self.core.set_dormancy_threshold(threshold).map_err(js_err)
    }

    pub fn apply_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config = SimConfig::from_json(json).map_err(js_err)?;
        self.core.apply_config(config).map_err(js_err)
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    /// Enable or disable per-tick timings (adds clock reads when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Stats of the last tick
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn perf_stats_json(&self) -> String {
        self.core.get_perf_stats().to_json()
    }

    // === Cells ===

    pub fn cell_type(&self, x: i32, y: i32) -> u8 {
        self.core.get_cell(x, y).kind.id()
    }

    pub fn cell_signal(&self, x: i32, y: i32) -> u8 {
        self.core.get_cell(x, y).signal.id()
    }

    pub fn cell_direction(&self, x: i32, y: i32) -> u8 {
        self.core.get_cell(x, y).direction.bits()
    }

    pub fn cell_flipped(&self, x: i32, y: i32) -> bool {
        self.core.get_cell(x, y).flipped
    }

    /// Place an element; `direction` is 0..=3 (north, east, south, west)
    pub fn set_cell(&mut self, x: i32, y: i32, type_id: u8, direction: u8, flipped: bool) -> Result<(), JsValue> {
        let kind = CellType::from_id(type_id)
            .ok_or_else(|| JsValue::from_str(&format!("unknown cell type {type_id}")))?;
        let cell = Cell::new(kind, Direction::from_bits(direction)).flipped(flipped);
        self.core.set_cell(x, y, cell);
        Ok(())
    }

    pub fn remove_cell(&mut self, x: i32, y: i32) -> bool {
        self.core.remove_cell(x, y)
    }

    pub fn force_signal(&mut self, x: i32, y: i32, signal: u8) -> Result<(), JsValue> {
        let signal = Signal::from_id(signal)
            .ok_or_else(|| JsValue::from_str(&format!("unknown signal {signal}")))?;
        self.core.force_signal(x, y, signal);
        Ok(())
    }

    pub fn clear_signals(&mut self) {
        self.core.clear_signals();
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === Snapshots for the renderer ===

    /// Chunk coordinates as flat `[x0, y0, x1, y1, ...]`, in store order
    pub fn chunk_positions(&self) -> Vec<i32> {
        self.core
            .store()
            .iter()
            .flat_map(|(pos, _)| [pos.x, pos.y])
            .collect()
    }

    /// Cell type ids of one chunk, row-major; empty if the chunk is absent
    pub fn chunk_types(&self, cx: i32, cy: i32) -> Vec<u8> {
        self.core
            .store()
            .get(ChunkPos::new(cx, cy))
            .map(|chunk| chunk.cells().iter().map(|c| c.kind.id()).collect())
            .unwrap_or_default()
    }

    /// Signal ids of one chunk, row-major; empty if the chunk is absent
    pub fn chunk_signals(&self, cx: i32, cy: i32) -> Vec<u8> {
        self.core
            .store()
            .get(ChunkPos::new(cx, cy))
            .map(|chunk| chunk.cells().iter().map(|c| c.signal.id()).collect())
            .unwrap_or_default()
    }

    // === Import / export ===

    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.core.import(bytes).map_err(js_err)
    }

    pub fn import_base64(&mut self, text: &str) -> Result<(), JsValue> {
        self.core.import_base64(text).map_err(js_err)
    }

    pub fn export_bytes(&self) -> Result<Vec<u8>, JsValue> {
        self.core.export().map_err(js_err)
    }

    pub fn export_base64(&self) -> Result<String, JsValue> {
        self.core.export_base64().map_err(js_err)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Native access for embedders that drive the engine directly.
    pub fn core(&self) -> &WorldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WorldCore {
        &mut self.core
    }
}
