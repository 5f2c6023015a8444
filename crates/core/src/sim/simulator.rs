//! Simulator: owns the pipeline and the unread trace, drives cycles.
//!
//! Within a cycle the handlers run in reverse pipeline order (retire, execute,
//! issue, dispatch, fetch) so each instruction advances at most one stage per
//! cycle; the common data bus then latches, making this cycle's completions
//! visible to issue from the following cycle. The run ends on the cycle the
//! last instruction retires, so the final cycle count never includes a
//! trailing empty cycle.

use std::collections::VecDeque;

use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::core::pipeline::instruction::Instruction;
use crate::core::pipeline::stages::{
    dispatch_stage, execute_stage, fetch_stage, issue_stage, retire_stage,
};
use crate::stats::SimStats;

/// Top-level simulator: pipeline state plus the unread tail of the trace.
pub struct Simulator {
    pipeline: Pipeline,
    trace: VecDeque<Instruction>,
}

impl Simulator {
    /// Creates a simulator over a program already read from a trace.
    pub fn new(config: &Config, program: Vec<Instruction>) -> Self {
        Self {
            pipeline: Pipeline::new(config),
            trace: program.into(),
        }
    }

    /// True when the trace is drained and no instruction is in flight.
    pub fn done(&self) -> bool {
        self.trace.is_empty() && self.pipeline.rob.is_empty()
    }

    /// Advances the simulation by one clock cycle.
    pub fn step(&mut self) {
        self.pipeline.cycle += 1;
        retire_stage(&mut self.pipeline);
        execute_stage(&mut self.pipeline);
        issue_stage(&mut self.pipeline);
        dispatch_stage(&mut self.pipeline);
        fetch_stage(&mut self.pipeline, &mut self.trace);
        self.pipeline.latch_cdb();
        self.pipeline.stats.cycles = self.pipeline.cycle;
        self.pipeline.assert_invariants();
    }

    /// Runs the simulation to completion.
    pub fn run(&mut self) {
        while !self.done() {
            self.step();
        }
    }

    /// Instructions retired so far, in program order.
    pub fn retired(&self) -> &[Instruction] {
        &self.pipeline.retired
    }

    /// Simulation counters.
    pub fn stats(&self) -> &SimStats {
        &self.pipeline.stats
    }

    /// Read access to the pipeline state.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}
