use crate::domain::cells::{Cell, Signal};
use crate::spatial::chunks::{local_index, ChunkPos};

use super::WorldCore;

/// Edits wake the chunk they land in so the change is evaluated next tick.
fn edit_cell(world: &mut WorldCore, x: i32, y: i32) -> &mut Cell {
    let threshold = world.config.dormancy_threshold;
    let chunk = world.store.get_or_create(ChunkPos::containing(x, y));
    chunk.wake(threshold);
    chunk.cell_mut(local_index(x, y))
}

pub(super) fn set_cell(world: &mut WorldCore, x: i32, y: i32, cell: Cell) {
    *edit_cell(world, x, y) = cell;
}

pub(super) fn remove_cell(world: &mut WorldCore, x: i32, y: i32) -> bool {
    match world.store.peek_cell(x, y) {
        Some(cell) if !cell.is_empty() => {}
        _ => return false,
    }
    *edit_cell(world, x, y) = Cell::EMPTY;
    true
}

pub(super) fn force_signal(world: &mut WorldCore, x: i32, y: i32, signal: Signal) {
    edit_cell(world, x, y).signal = signal;
}

pub(super) fn clear_signals(world: &mut WorldCore) {
    for slot in world.store.slots_mut() {
        for cell in slot.chunk.cells_mut().iter_mut() {
            cell.reset_signal();
        }
        slot.chunk.clear_outbox();
        slot.chunk.mark_active();
    }
}

pub(super) fn clear(world: &mut WorldCore) {
    world.store.clear();
    world.tick = 0;
    world.tick_debt = 0.0;
    world.fault = None;
    world.evaluated_total = 0;
    world.rng_state = world.config.rng_seed();
    world.perf_stats.reset();
}
