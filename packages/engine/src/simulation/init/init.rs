#[cfg(feature = "parallel")]
use tracing::warn;

use crate::domain::config::SimConfig;
use crate::error::ConfigError;
use crate::spatial::chunks::ChunkStore;
use crate::systems::rules::RuleRegistry;

use super::perf_stats::PerfStats;
use super::{WorldCore, DEFAULT_WORLD_VERSION};

pub(super) fn create_world_core(config: SimConfig) -> Result<WorldCore, ConfigError> {
    config.validate()?;
    #[allow(unused_mut)]
    let mut world = assemble(config);
    #[cfg(feature = "parallel")]
    {
        world.pool = build_pool(world.config.threads)?;
    }
    Ok(world)
}

/// Defaults always validate; only the worker pool can fail, in which case
/// evaluation falls back to rayon's global pool.
pub(super) fn create_world_core_default() -> WorldCore {
    #[allow(unused_mut)]
    let mut world = assemble(SimConfig::default());
    #[cfg(feature = "parallel")]
    match build_pool(world.config.threads) {
        Ok(pool) => world.pool = pool,
        Err(err) => warn!(error = %err, "falling back to the global worker pool"),
    }
    world
}

fn assemble(config: SimConfig) -> WorldCore {
    WorldCore {
        version: DEFAULT_WORLD_VERSION,
        store: ChunkStore::new(),
        rules: RuleRegistry::new(),
        rng_state: config.rng_seed(),
        config,
        #[cfg(feature = "parallel")]
        pool: None,
        tick: 0,
        tick_debt: 0.0,
        paused: false,
        fault: None,
        evaluated_total: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

/// Dedicated pool sized by the `threads` setting. On wasm the pool comes
/// from `init_thread_pool` on the JS side, so the global one is used.
#[cfg(feature = "parallel")]
pub(super) fn build_pool(threads: usize) -> Result<Option<rayon::ThreadPool>, ConfigError> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = threads;
        Ok(None)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("arrows-eval-{i}"))
            .build()
            .map(Some)
            .map_err(|e| ConfigError::ThreadPool(e.to_string()))
    }
}
