//! Domain types: cells and simulation settings.

pub mod cells;
pub mod config;
