use tracing::{debug, error, trace};

use crate::error::{RuleError, SimError};

use super::apply::apply_phase;
use super::evaluate::evaluate_phase;
use super::{PerfTimer, WorldCore};

/// Run `n` ticks back to back. A rule failure faults the world: the tick in
/// progress is abandoned and every later call fails until `clear`.
pub(super) fn tick(world: &mut WorldCore, n: u32) -> Result<(), SimError> {
    for _ in 0..n {
        step(world)?;
    }
    Ok(())
}

fn step(world: &mut WorldCore) -> Result<(), SimError> {
    if let Some(fault) = &world.fault {
        return Err(SimError::Faulted(fault.clone()));
    }

    let perf_on = world.perf_enabled;
    world.perf_stats.reset();
    world.perf_stats.chunks_total = world.store.len() as u32;
    let step_timer = PerfTimer::start_if(perf_on);

    // === EVALUATE ===
    let t0 = PerfTimer::start_if(perf_on);
    let evaluated = match evaluate_phase(world) {
        Ok(n) => n,
        Err(err) => return Err(fault(world, err)),
    };
    if let Some(t0) = t0 {
        world.perf_stats.evaluate_ms = t0.elapsed_ms();
    }

    // === APPLY ===
    let t0 = PerfTimer::start_if(perf_on);
    let counts = match apply_phase(world) {
        Ok(counts) => counts,
        Err(err) => return Err(fault(world, err)),
    };
    if let Some(t0) = t0 {
        world.perf_stats.apply_ms = t0.elapsed_ms();
    }

    world.tick += 1;
    world.evaluated_total += u64::from(evaluated);

    let stats = &mut world.perf_stats;
    stats.tick = world.tick;
    stats.chunks_evaluated = evaluated;
    stats.chunks_dormant = stats.chunks_total.saturating_sub(evaluated);
    stats.chunks_created = counts.created;
    stats.chunks_woken = counts.woken;
    stats.messages_applied = counts.applied;
    stats.power_dropped = counts.dropped;
    if let Some(t) = step_timer {
        stats.step_ms = t.elapsed_ms();
    }

    if counts.woken > 0 {
        debug!(tick = world.tick, woken = counts.woken, "dormant chunks woken");
    }
    trace!(
        tick = world.tick,
        evaluated,
        messages = counts.applied,
        created = counts.created,
        "tick complete"
    );
    Ok(())
}

/// Mark the world faulted. Messages queued by the abandoned tick are dropped;
/// cell signals already rewritten by its evaluate pass stay as they are and
/// are only reset by `clear` or `clear_signals`.
fn fault(world: &mut WorldCore, err: RuleError) -> SimError {
    for slot in world.store.slots_mut() {
        slot.chunk.clear_outbox();
    }
    error!(tick = world.tick, error = %err, "rule failure, simulation halted");
    world.fault = Some(err.clone());
    SimError::Rule(err)
}

/// Frame driver: accrue `ticks_per_second / frame_rate` ticks of debt and run
/// the whole ticks owed. Fractional debt carries over to the next frame.
pub(super) fn advance(world: &mut WorldCore) -> Result<u32, SimError> {
    if world.paused {
        return Ok(0);
    }
    if let Some(fault) = &world.fault {
        return Err(SimError::Faulted(fault.clone()));
    }
    world.tick_debt += world.config.ticks_per_frame();
    let due = world.tick_debt.floor();
    world.tick_debt -= due;
    let due = due as u32;
    tick(world, due)?;
    Ok(due)
}
