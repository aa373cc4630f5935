//! Systems - per-cell rules driven by the tick engine.

pub mod rules;
