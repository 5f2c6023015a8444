//! Simulation statistics collection and reporting.
//!
//! This module tracks counters for the pipeline simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and the derived
//!    instructions-per-cycle figure.
//! 2. **Instruction mix:** Retired counts per operation class.
//! 3. **Stalls:** Dispatch (capacity) and scheduling (wake-up/structural)
//!    stall counts.

use std::io::{self, Write};

use crate::isa::OpClass;

/// Counters accumulated over a simulation run.
#[derive(Debug, Default, Clone)]
pub struct SimStats {
    /// Total cycles simulated; equals the retirement cycle of the last
    /// instruction.
    pub cycles: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// Retired instructions per operation class (codes 0, 1, 2).
    pub inst_by_class: [u64; 3],
    /// Candidate-cycles spent stalled at dispatch for capacity reasons.
    pub dispatch_stalls: u64,
    /// Entry-cycles spent waiting in the scheduling queue.
    pub issue_stalls: u64,
}

impl SimStats {
    /// Records one retired instruction of the given class.
    pub fn count_op(&mut self, op: OpClass) {
        self.inst_by_class[op.index()] += 1;
    }

    /// Instructions per cycle; 0.0 before any cycle has run.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Writes the end-of-run report in the fixed text format.
    pub fn write_summary<W: Write>(
        &self,
        out: &mut W,
        width: usize,
        sched_capacity: usize,
    ) -> io::Result<()> {
        writeln!(out, "CONFIGURATION")?;
        writeln!(out, " superscalar bandwidth (N)      = {}", width)?;
        writeln!(out, " dispatch queue size (2*N)      = {}", 2 * width)?;
        writeln!(out, " schedule queue size (S)        = {}", sched_capacity)?;
        writeln!(out, "RESULTS")?;
        writeln!(out, " number of instructions = {}", self.instructions_retired)?;
        writeln!(out, " number of cycles       = {}", self.cycles)?;
        writeln!(out, " IPC                    = {:.2}", self.ipc())
    }

    /// Dumps extended counters to stderr (pipeline-trace mode).
    pub fn print_detailed(&self) {
        eprintln!("----------------------------------------------------------");
        eprintln!("PIPELINE COUNTERS");
        eprintln!("  inst.class0            {}", self.inst_by_class[0]);
        eprintln!("  inst.class1            {}", self.inst_by_class[1]);
        eprintln!("  inst.class2            {}", self.inst_by_class[2]);
        eprintln!("  stalls.dispatch        {}", self.dispatch_stalls);
        eprintln!("  stalls.schedule        {}", self.issue_stalls);
        eprintln!("----------------------------------------------------------");
    }
}
