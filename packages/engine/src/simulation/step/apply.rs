use crate::error::RuleError;
use crate::spatial::chunks::{local_index, ChunkPos};
use crate::systems::rules::Delivery;

use super::WorldCore;

/// Counters gathered while draining outboxes.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct ApplyCounts {
    pub created: u32,
    pub woken: u32,
    pub applied: u32,
    pub dropped: u32,
}

/// Apply phase: drain every outbox in store order, oldest message first.
/// Targets are created on first touch and woken. Chunks created here are
/// appended to the store and have nothing queued, so the loop bound may grow
/// without visiting new work.
pub(super) fn apply_phase(world: &mut WorldCore) -> Result<ApplyCounts, RuleError> {
    let threshold = world.config.dormancy_threshold;
    let mut counts = ApplyCounts::default();

    let mut id = 0;
    while id < world.store.len() {
        let outbox = world.store.slot_mut(id).chunk.take_outbox();
        let mut result = Ok(());

        for msg in &outbox {
            let (target, created) = world.store.get_or_create_id(ChunkPos::containing(msg.x, msg.y));
            if created {
                counts.created += 1;
            }
            let chunk = &mut world.store.slot_mut(target).chunk;
            if chunk.wake(threshold) {
                counts.woken += 1;
            }
            let cell = chunk.cell_mut(local_index(msg.x, msg.y));
            match world.rules.deliver(cell, msg.x, msg.y, msg.kind, &mut world.rng_state) {
                Ok(Delivery::Dropped) => counts.dropped += 1,
                Ok(_) => counts.applied += 1,
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }

        world.store.slot_mut(id).chunk.restore_outbox(outbox);
        result?;
        id += 1;
    }

    Ok(counts)
}
