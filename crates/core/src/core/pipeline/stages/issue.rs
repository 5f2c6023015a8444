//! Issue stage: wake-up and select.
//!
//! Ready scheduling-queue entries are selected in program order, capped by the
//! superscalar width and by function-unit availability: the execute list holds
//! at most `width` in-flight instructions, so a long-latency instruction keeps
//! its unit occupied for the whole execute interval. Renaming at dispatch
//! already masks WAW hazards, so only source readiness is checked here.
//! Entries left behind accrue scheduling residency.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::instruction::{Stage, Tag, Timing};

/// Executes the Issue stage.
pub fn issue_stage(pl: &mut Pipeline) {
    let cycle = pl.cycle;
    let width = pl.width;
    let trace_on = pl.trace;

    let mut ready: Vec<Tag> = pl
        .sched_queue
        .iter()
        .copied()
        .filter(|&tag| {
            pl.rob.get(tag).is_some_and(|instr| {
                instr.stage == Stage::Issue
                    && cycle >= instr.issue.start
                    && instr.src1.is_ready()
                    && instr.src2.is_ready()
            })
        })
        .collect();
    ready.sort_unstable();

    let Pipeline {
        rob,
        sched_queue,
        execute_list,
        latencies,
        stats,
        ..
    } = pl;

    let mut issued = 0;
    for tag in ready {
        if issued >= width || execute_list.len() >= width {
            break;
        }
        let Some(instr) = rob.get_mut(tag) else {
            continue;
        };

        let latency = latencies[instr.op.index()];
        instr.execute = Timing::new(instr.issue.end(), latency);
        instr.cycles_left = latency;
        instr.stage = Stage::Execute;
        if trace_on {
            eprintln!("IS  cycle={} tag={} latency={}", cycle, tag, latency);
        }

        sched_queue.retain(|&t| t != tag);
        execute_list.push(tag);
        issued += 1;
    }

    // Whoever is still waiting accrues scheduling residency.
    for &tag in sched_queue.iter() {
        if let Some(instr) = rob.get_mut(tag) {
            if instr.stage == Stage::Issue && cycle >= instr.issue.start {
                instr.issue.duration += 1;
                stats.issue_stalls += 1;
            }
        }
    }
}
