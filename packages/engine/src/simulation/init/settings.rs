use tracing::info;

use crate::domain::config::{validate_threads, validate_tps, SimConfig};
use crate::error::ConfigError;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn apply_config(world: &mut WorldCore, config: SimConfig) -> Result<(), ConfigError> {
    config.validate()?;
    if config.threads != world.config.threads {
        set_threads(world, config.threads)?;
    }
    world.rng_state = config.rng_seed();
    world.config = config;
    info!(config = %world.config.to_json(), "simulation settings applied");
    Ok(())
}

pub(super) fn set_ticks_per_second(world: &mut WorldCore, tps: f32) -> Result<(), ConfigError> {
    validate_tps(tps)?;
    world.config.ticks_per_second = tps;
    Ok(())
}

pub(super) fn set_threads(world: &mut WorldCore, threads: usize) -> Result<(), ConfigError> {
    validate_threads(threads)?;
    #[cfg(feature = "parallel")]
    {
        world.pool = super::init::build_pool(threads)?;
    }
    world.config.threads = threads;
    info!(threads, "evaluate worker count changed");
    Ok(())
}

pub(super) fn set_dormancy_threshold(world: &mut WorldCore, threshold: u8) -> Result<(), ConfigError> {
    if threshold == 0 {
        return Err(ConfigError::DormancyThreshold);
    }
    world.config.dormancy_threshold = threshold;
    Ok(())
}

pub(super) fn set_paused(world: &mut WorldCore, paused: bool) {
    world.paused = paused;
    if paused {
        world.tick_debt = 0.0;
    }
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}
