//! Pipeline state and per-cycle machinery.
//!
//! The pipeline is a bag of shared state mutated by the five stage handlers in
//! `stages`. A cycle runs the handlers in reverse pipeline order (retire
//! first, fetch last) so no instruction moves through more than one stage per
//! cycle, then latches the common data bus so completions become visible to
//! issue on the following cycle.

pub mod cdb;
pub mod instruction;
pub mod rename;
pub mod rob;
pub mod stages;

use std::collections::VecDeque;

use crate::config::Config;
use crate::stats::SimStats;
use self::cdb::CommonDataBus;
use self::instruction::{Instruction, Tag};
use self::rename::RenameMap;
use self::rob::ReorderBuffer;

/// Shared pipeline state operated on by the stage handlers.
pub struct Pipeline {
    /// Superscalar width (N).
    pub width: usize,
    /// Dispatch queue capacity (2N).
    pub dispatch_capacity: usize,
    /// Scheduling queue capacity (S).
    pub sched_capacity: usize,
    /// Execute latency per operation class.
    pub latencies: [u64; 3],
    /// Current cycle, numbered from 1; 0 before the first cycle.
    pub cycle: u64,
    /// All in-flight instructions, in program order.
    pub rob: ReorderBuffer,
    /// Fetched instructions waiting for rename.
    pub dispatch_queue: VecDeque<Tag>,
    /// Dispatched instructions waiting for operand wake-up.
    pub sched_queue: Vec<Tag>,
    /// Instructions occupying function units.
    pub execute_list: Vec<Tag>,
    /// Architectural register to in-flight producer.
    pub rename: RenameMap,
    /// Completion broadcast and completed set.
    pub cdb: CommonDataBus,
    /// Instructions retired so far, in tag order.
    pub retired: Vec<Instruction>,
    /// Simulation counters.
    pub stats: SimStats,
    /// Per-stage activity logging to stderr.
    pub trace: bool,
}

impl Pipeline {
    /// Creates an idle pipeline from the configuration.
    pub fn new(config: &Config) -> Self {
        let pipeline = &config.pipeline;
        debug_assert!(pipeline.width >= 1);
        debug_assert!(pipeline.sched_queue_size >= 1);
        Self {
            width: pipeline.width,
            dispatch_capacity: pipeline.dispatch_queue_size(),
            sched_capacity: pipeline.sched_queue_size,
            latencies: pipeline.latencies,
            cycle: 0,
            rob: ReorderBuffer::new(),
            dispatch_queue: VecDeque::with_capacity(pipeline.dispatch_queue_size()),
            sched_queue: Vec::with_capacity(pipeline.sched_queue_size),
            execute_list: Vec::with_capacity(pipeline.width),
            rename: RenameMap::new(),
            cdb: CommonDataBus::new(),
            retired: Vec::new(),
            stats: SimStats::default(),
            trace: config.general.trace_pipeline,
        }
    }

    /// Latches this cycle's completion broadcasts: tags join the completed set
    /// and wake matching operands still waiting in the scheduling queue.
    pub fn latch_cdb(&mut self) {
        for tag in self.cdb.latch() {
            for &waiter in &self.sched_queue {
                if let Some(instr) = self.rob.get_mut(waiter) {
                    instr.src1.wake(tag);
                    instr.src2.wake(tag);
                }
            }
            if self.trace {
                eprintln!("CDB cycle={} tag={} complete", self.cycle, tag);
            }
        }
    }

    /// Structural capacity invariants, checked each cycle in debug builds.
    pub fn assert_invariants(&self) {
        debug_assert!(self.dispatch_queue.len() <= self.dispatch_capacity);
        debug_assert!(self.sched_queue.len() <= self.sched_capacity);
        debug_assert!(self.execute_list.len() <= self.width);
    }
}
