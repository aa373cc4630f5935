//! Browser tests for the wasm facade: `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use arrows_engine::{CellType, Signal, World};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn facade_reports_errors_as_js_values() {
    let mut world = World::new();
    assert!(world.set_cell(0, 0, 200, 0, false).is_err());
    assert!(world.force_signal(0, 0, 99).is_err());
    assert!(world.import_base64("not base64!").is_err());
    assert!(World::with_config(r#"{"threads": 0}"#).is_err());
    assert_eq!(world.chunk_count(), 0);
}

#[wasm_bindgen_test]
fn facade_ticks_a_wire() {
    let mut world = World::new();
    world.set_cell(0, 0, CellType::Arrow.id(), 1, false).unwrap();
    world.force_signal(0, 0, Signal::Red.id()).unwrap();
    world.tick(1).unwrap();
    assert_eq!(world.cell_signal(1, 0), Signal::None.id());
    assert_eq!(world.cell_type(1, 0), CellType::Empty.id());
    assert_eq!(world.chunk_positions(), vec![0, 0]);
}
