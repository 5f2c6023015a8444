//! Dispatch stage: register renaming and entry into the scheduling queue.
//!
//! Candidates are processed in program order. A candidate stalls when the
//! per-cycle width is exhausted or the scheduling queue is full; every cycle
//! spent waiting accumulates in its dispatch-interval duration.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::instruction::{Stage, Tag, Timing};

/// Executes the Dispatch stage.
///
/// For each candidate admitted this cycle: capture source producer tags from
/// the rename map, claim the destination register (masking WAW and WAR
/// hazards), and move the instruction to the scheduling queue.
pub fn dispatch_stage(pl: &mut Pipeline) {
    // Entries still waiting from an earlier cycle accrue dispatch residency.
    for &tag in &pl.dispatch_queue {
        if let Some(instr) = pl.rob.get_mut(tag) {
            if instr.stage == Stage::Dispatch && instr.dispatch.is_stamped() {
                instr.dispatch.duration += 1;
            }
        }
    }

    let mut candidates: Vec<Tag> = pl
        .dispatch_queue
        .iter()
        .copied()
        .filter(|&tag| {
            pl.rob
                .get(tag)
                .is_some_and(|instr| instr.stage == Stage::Dispatch)
        })
        .collect();
    candidates.sort_unstable();

    let width = pl.width;
    let sched_capacity = pl.sched_capacity;
    let cycle = pl.cycle;
    let trace_on = pl.trace;
    let Pipeline {
        rob,
        rename,
        cdb,
        dispatch_queue,
        sched_queue,
        stats,
        ..
    } = pl;

    let mut dispatched = 0;
    for tag in candidates {
        let Some(instr) = rob.get_mut(tag) else {
            continue;
        };

        if dispatched >= width || sched_queue.len() >= sched_capacity {
            if !instr.dispatch.is_stamped() {
                instr.dispatch = Timing::new(instr.fetch.end(), 1);
            }
            stats.dispatch_stalls += 1;
            continue;
        }

        if !instr.dispatch.is_stamped() {
            instr.dispatch = Timing::new(instr.fetch.end(), 1);
        }

        // Sources capture their producers before the destination claim, so an
        // instruction reading its own destination sees the previous writer.
        instr.src1.capture_producer(rename, cdb);
        instr.src2.capture_producer(rename, cdb);
        if let Some(dest) = instr.dest {
            rename.set_producer(dest, tag);
        }

        instr.stage = Stage::Issue;
        instr.issue = Timing::new(instr.dispatch.end(), 1);
        if trace_on {
            eprintln!(
                "ID  cycle={} tag={} src1={:?} src2={:?}",
                cycle, tag, instr.src1.producer, instr.src2.producer
            );
        }

        dispatch_queue.retain(|&t| t != tag);
        sched_queue.push(tag);
        dispatched += 1;
    }
}
