use crate::error::RuleError;
use crate::spatial::chunks::ChunkSlot;
use crate::systems::rules::{EvalContext, RuleRegistry};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::WorldCore;

/// Evaluate phase: every awake chunk runs its cells' rules and fills its
/// own outbox. Chunks share nothing, so they run in parallel.
/// Returns the number of chunks evaluated.
pub(super) fn evaluate_phase(world: &mut WorldCore) -> Result<u32, RuleError> {
    let rules = &world.rules;
    let threshold = world.config.dormancy_threshold;
    let slots = world.store.slots_mut();

    #[cfg(feature = "parallel")]
    {
        let mut run = move || {
            slots
                .into_par_iter()
                .map(|slot| evaluate_chunk(slot, rules, threshold))
                .try_reduce(|| 0, |a, b| Ok(a + b))
        };
        match &world.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        slots
            .iter_mut()
            .map(|slot| evaluate_chunk(slot, rules, threshold))
            .try_fold(0, |acc, n| n.map(|n| acc + n))
    }
}

fn evaluate_chunk(slot: &mut ChunkSlot, rules: &RuleRegistry, threshold: u8) -> Result<u32, RuleError> {
    if slot.chunk.is_dormant(threshold) {
        return Ok(0);
    }
    let pos = slot.pos;
    let (cells, outbox) = slot.chunk.cells_and_outbox();
    for (local, cell) in cells.iter_mut().enumerate() {
        let (x, y) = pos.cell_coords(local);
        let mut ctx = EvalContext::new(cell, x, y, outbox);
        rules.evaluate(&mut ctx)?;
    }
    slot.chunk.end_evaluate();
    Ok(1)
}
