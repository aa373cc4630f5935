use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Snapshot of the last tick. Counters are always recorded; timings only
/// while perf metrics are enabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfStats {
    pub(super) tick: u64,
    pub(super) chunks_total: u32,
    pub(super) chunks_evaluated: u32,
    pub(super) chunks_dormant: u32,
    pub(super) chunks_created: u32,
    pub(super) chunks_woken: u32,
    pub(super) messages_applied: u32,
    pub(super) power_dropped: u32,

    pub(super) step_ms: f64,
    pub(super) evaluate_ms: f64,
    pub(super) apply_ms: f64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.tick }
    #[wasm_bindgen(getter)]
    pub fn chunks_total(&self) -> u32 { self.chunks_total }
    #[wasm_bindgen(getter)]
    pub fn chunks_evaluated(&self) -> u32 { self.chunks_evaluated }
    #[wasm_bindgen(getter)]
    pub fn chunks_dormant(&self) -> u32 { self.chunks_dormant }
    #[wasm_bindgen(getter)]
    pub fn chunks_created(&self) -> u32 { self.chunks_created }
    #[wasm_bindgen(getter)]
    pub fn chunks_woken(&self) -> u32 { self.chunks_woken }
    #[wasm_bindgen(getter)]
    pub fn messages_applied(&self) -> u32 { self.messages_applied }
    #[wasm_bindgen(getter)]
    pub fn power_dropped(&self) -> u32 { self.power_dropped }
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn evaluate_ms(&self) -> f64 { self.evaluate_ms }
    #[wasm_bindgen(getter)]
    pub fn apply_ms(&self) -> f64 { self.apply_ms }
}
