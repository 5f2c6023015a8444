//! Execute stage: count down latencies and broadcast completions.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::instruction::{Stage, Timing};

/// Executes the Execute stage.
///
/// Each occupied function unit counts down one cycle; an instruction whose
/// latency elapses moves to writeback, frees its unit, and broadcasts its tag
/// on the common data bus for the end-of-cycle latch.
pub fn execute_stage(pl: &mut Pipeline) {
    let cycle = pl.cycle;
    let trace_on = pl.trace;
    let Pipeline {
        rob,
        execute_list,
        cdb,
        ..
    } = pl;

    execute_list.retain(|&tag| {
        let Some(instr) = rob.get_mut(tag) else {
            return false;
        };
        if instr.stage != Stage::Execute || cycle < instr.execute.start {
            return true;
        }

        instr.cycles_left -= 1;
        if instr.cycles_left > 0 {
            return true;
        }

        instr.stage = Stage::Writeback;
        instr.writeback = Timing::new(instr.execute.end(), 1);
        cdb.broadcast(tag);
        if trace_on {
            eprintln!("EX  cycle={} tag={} done", cycle, tag);
        }
        false
    });
}
