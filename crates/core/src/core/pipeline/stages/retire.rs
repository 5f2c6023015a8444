//! Retire stage: in-order removal from the reorder buffer head.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::instruction::Stage;

/// Executes the Retire stage.
///
/// Pops the ROB head while it has finished writeback, recording each popped
/// instruction in retirement (= tag) order. An instruction with a younger tag
/// never leaves before all older tags have.
pub fn retire_stage(pl: &mut Pipeline) {
    let cycle = pl.cycle;
    while pl
        .rob
        .head()
        .is_some_and(|head| head.stage == Stage::Writeback && cycle >= head.writeback.end())
    {
        let Some(instr) = pl.rob.pop_head() else {
            break;
        };
        pl.stats.instructions_retired += 1;
        pl.stats.count_op(instr.op);
        if pl.trace {
            eprintln!("RT  cycle={} tag={}", pl.cycle, instr.tag);
        }
        pl.retired.push(instr);
    }
}
