//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline pipeline constants (width, queue sizing, execute
//!    latencies).
//! 2. **Structures:** Hierarchical config for general and pipeline settings.
//!
//! Configuration comes from CLI arguments, optionally merged over a TOML file;
//! `Config::default()` is the baseline.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Superscalar width: per-cycle cap on every inter-stage transition.
    pub const WIDTH: usize = 1;

    /// Scheduling queue capacity (entries waiting for operand wake-up).
    pub const SCHED_QUEUE_SIZE: usize = 8;

    /// The dispatch queue holds this many times the pipeline width.
    pub const DISPATCH_QUEUE_FACTOR: usize = 2;

    /// Execute latency in cycles per operation class (codes 0, 1, 2).
    pub const EXECUTE_LATENCIES: [u64; 3] = [1, 2, 10];
}

/// Root configuration for a simulation run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation options.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Pipeline geometry and timing.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// General simulation options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Log per-stage pipeline activity to stderr.
    #[serde(default)]
    pub trace_pipeline: bool,
}

/// Pipeline geometry and timing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Superscalar width (instructions per stage per cycle).
    #[serde(default = "PipelineConfig::default_width")]
    pub width: usize,

    /// Scheduling queue capacity.
    #[serde(default = "PipelineConfig::default_sched_queue_size")]
    pub sched_queue_size: usize,

    /// Execute latency per operation class.
    #[serde(default = "PipelineConfig::default_latencies")]
    pub latencies: [u64; 3],
}

impl PipelineConfig {
    /// Dispatch queue capacity, fixed at twice the width.
    pub fn dispatch_queue_size(&self) -> usize {
        defaults::DISPATCH_QUEUE_FACTOR * self.width
    }

    /// Returns the default superscalar width.
    fn default_width() -> usize {
        defaults::WIDTH
    }

    /// Returns the default scheduling queue capacity.
    fn default_sched_queue_size() -> usize {
        defaults::SCHED_QUEUE_SIZE
    }

    /// Returns the default execute latency table.
    fn default_latencies() -> [u64; 3] {
        defaults::EXECUTE_LATENCIES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            sched_queue_size: defaults::SCHED_QUEUE_SIZE,
            latencies: defaults::EXECUTE_LATENCIES,
        }
    }
}
