//! Fetch stage: bring trace instructions into the pipeline.

use std::collections::VecDeque;

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::instruction::{Instruction, Stage, Timing};

/// Executes the Fetch stage.
///
/// Takes up to `width` instructions from the trace while the dispatch queue
/// has room, stamping each with a one-cycle fetch interval. Entries fetched on
/// an earlier cycle then advance to the dispatch state.
pub fn fetch_stage(pl: &mut Pipeline, trace: &mut VecDeque<Instruction>) {
    let mut fetched = 0;
    while fetched < pl.width && pl.dispatch_queue.len() < pl.dispatch_capacity {
        let Some(mut instr) = trace.pop_front() else {
            break;
        };
        instr.stage = Stage::Fetch;
        instr.fetch = Timing::new(pl.cycle, 1);
        if pl.trace {
            eprintln!("IF  cycle={} tag={} pc={:#x}", pl.cycle, instr.tag, instr.pc);
        }
        pl.dispatch_queue.push_back(instr.tag);
        pl.rob.push(instr);
        fetched += 1;
    }

    for &tag in &pl.dispatch_queue {
        if let Some(instr) = pl.rob.get_mut(tag) {
            if instr.stage == Stage::Fetch && instr.fetch.start < pl.cycle {
                instr.stage = Stage::Dispatch;
            }
        }
    }
}
