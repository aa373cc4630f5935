use arrows_engine::{CellType, Signal, World};

// version 3, one chunk at (1, 0): arrows at (16, 0) and (17, 2) facing east,
// a flipped diagonal at (19, 15) facing south
const SAMPLE: &str = "AwABAAEAAAABAQEAASEBCwDzBg==";

#[test]
fn world_smoke_import_tick_export() {
    let mut world = World::new();
    world.import_base64(SAMPLE.trim_end_matches('=')).unwrap();

    assert_eq!(world.version(), 3);
    assert_eq!(world.chunk_count(), 1);
    assert_eq!(world.cell_type(16, 0), CellType::Arrow.id());
    assert_eq!(world.cell_direction(16, 0), 1);
    assert_eq!(world.cell_type(19, 15), CellType::Diagonal.id());
    assert!(world.cell_flipped(19, 15));
    assert_eq!(world.export_base64().unwrap(), SAMPLE);

    world.force_signal(16, 0, Signal::Red.id()).unwrap();
    world.tick(1).unwrap();
    assert_eq!(world.cell_signal(16, 0), Signal::None.id());
    assert_eq!(world.cell_signal(17, 0), Signal::Red.id());
    assert_eq!(world.chunk_types(1, 0).len(), 256);
    assert!(world.chunk_types(5, 5).is_empty());
    assert_eq!(world.chunk_positions(), vec![1, 0]);
}

#[test]
fn world_smoke_config_json() {
    let mut world = World::with_config(r#"{"ticksPerSecond": 120, "frameRate": 60, "threads": 2}"#).unwrap();
    assert_eq!(world.advance().unwrap(), 2);
    assert!(world.config_json().contains("\"dormancyThreshold\":5"));
}
