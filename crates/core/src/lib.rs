//! Trace-driven superscalar out-of-order pipeline simulator library.
//!
//! This crate implements a cycle-accurate model of a Tomasulo-style dynamically
//! scheduled pipeline with the following:
//! 1. **Pipeline:** Five stages (fetch, dispatch, issue, execute, writeback)
//!    with register renaming, a latched completion broadcast, and in-order
//!    retirement from the reorder buffer head.
//! 2. **Structures:** Reorder buffer, dispatch queue, scheduling queue, and a
//!    bounded execute list modelling the function units.
//! 3. **Simulation:** Trace loader, configuration, cycle driver, and
//!    statistics collection.

/// Shared error types.
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Pipeline engine (instruction records, queues, stage handlers).
pub mod core;
/// Trace operation classes.
pub mod isa;
/// Trace loader and cycle driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from TOML.
pub use crate::config::Config;
/// Cycle driver; owns the pipeline state and the unread tail of the trace.
pub use crate::sim::Simulator;
/// Counters and end-of-run reporting.
pub use crate::stats::SimStats;
