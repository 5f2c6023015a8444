//! In-flight instruction record and per-stage timing bookkeeping.
//!
//! Every trace record becomes one `Instruction` that lives in the reorder
//! buffer from fetch to retirement. The record carries:
//! 1. **Identity:** tag (program order), pc, and operation class.
//! 2. **Operands:** destination register and two renamable sources.
//! 3. **Timing:** a `(start, duration)` cycle interval per pipeline stage.
//!
//! Its `Display` impl renders the per-instruction report line.

use std::fmt;

use crate::core::pipeline::cdb::CommonDataBus;
use crate::core::pipeline::rename::RenameMap;
use crate::isa::OpClass;

/// Architectural register index as it appears in the trace.
pub type RegId = u32;

/// Unique tag identifying an in-flight instruction; equals its program-order
/// index in the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u32);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pipeline stage an instruction currently occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Being fetched from the trace (IF).
    Fetch,
    /// Waiting in the dispatch queue for rename (ID).
    Dispatch,
    /// Waiting in the scheduling queue for operands (IS).
    Issue,
    /// Occupying a function unit (EX).
    Execute,
    /// Result broadcast; waiting to retire (WB).
    Writeback,
}

/// Cycle interval spent in one stage.
///
/// Cycles are numbered from 1, so an all-zero interval means "not stamped
/// yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timing {
    /// First cycle of the interval.
    pub start: u64,
    /// Number of cycles the stage was occupied.
    pub duration: u64,
}

impl Timing {
    /// Creates a stamped interval.
    pub fn new(start: u64, duration: u64) -> Self {
        Self { start, duration }
    }

    /// Has this interval been stamped?
    pub fn is_stamped(&self) -> bool {
        self.start != 0
    }

    /// First cycle after the interval.
    pub fn end(&self) -> u64 {
        self.start + self.duration
    }
}

/// One renamable source operand.
#[derive(Clone, Copy, Debug)]
pub struct SourceOperand {
    /// Architectural register, or `None` when the slot is unused.
    pub reg: Option<RegId>,
    /// Tag of the in-flight producer captured at dispatch; `None` when the
    /// value was already architectural at rename time.
    pub producer: Option<Tag>,
    /// Wake-up flag: set once the producer's completion has been latched.
    pub ready: bool,
}

impl SourceOperand {
    /// Creates an operand that has not been renamed yet.
    pub fn new(reg: Option<RegId>) -> Self {
        Self {
            reg,
            producer: None,
            ready: false,
        }
    }

    /// Captures the operand's producer from the rename map and seeds the
    /// wake-up flag from completions latched so far.
    pub fn capture_producer(&mut self, map: &RenameMap, cdb: &CommonDataBus) {
        self.producer = self.reg.and_then(|reg| map.producer(reg));
        self.ready = match self.producer {
            None => true,
            Some(tag) => cdb.is_complete(tag),
        };
    }

    /// Marks the operand ready if `tag` is its producer.
    pub fn wake(&mut self, tag: Tag) {
        if self.producer == Some(tag) {
            self.ready = true;
        }
    }

    /// The operand no longer blocks issue.
    pub fn is_ready(&self) -> bool {
        self.producer.is_none() || self.ready
    }
}

/// One in-flight instruction.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Program-order tag.
    pub tag: Tag,
    /// Program counter; opaque to the engine, reproduced in output.
    pub pc: u64,
    /// Operation class selecting the execute latency.
    pub op: OpClass,
    /// Destination register, if any.
    pub dest: Option<RegId>,
    /// First source operand.
    pub src1: SourceOperand,
    /// Second source operand.
    pub src2: SourceOperand,
    /// Stage the instruction currently occupies.
    pub stage: Stage,
    /// Fetch interval (IF).
    pub fetch: Timing,
    /// Dispatch interval (ID).
    pub dispatch: Timing,
    /// Scheduling interval (IS).
    pub issue: Timing,
    /// Execute interval (EX).
    pub execute: Timing,
    /// Writeback interval (WB).
    pub writeback: Timing,
    /// Execute countdown; initialized from the latency table at issue.
    pub cycles_left: u64,
}

impl Instruction {
    /// Creates a trace-loaded instruction that has not entered the pipeline.
    pub fn new(
        tag: Tag,
        pc: u64,
        op: OpClass,
        dest: Option<RegId>,
        src1: Option<RegId>,
        src2: Option<RegId>,
    ) -> Self {
        Self {
            tag,
            pc,
            op,
            dest,
            src1: SourceOperand::new(src1),
            src2: SourceOperand::new(src2),
            stage: Stage::Fetch,
            fetch: Timing::default(),
            dispatch: Timing::default(),
            issue: Timing::default(),
            execute: Timing::default(),
            writeback: Timing::default(),
            cycles_left: 0,
        }
    }
}

impl fmt::Display for Instruction {
    /// Renders the retired-instruction report line. Missing registers print
    /// as `-1`, matching the trace sentinel.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn reg(reg: Option<RegId>) -> i64 {
            reg.map_or(-1, |r| i64::from(r))
        }

        write!(
            f,
            "{}  fu{{{}}} src{{{},{}}} dst{{{}}} IF{{{},{}}} ID{{{},{}}} IS{{{},{}}} EX{{{},{}}} WB{{{},{}}}",
            self.tag,
            self.op.code(),
            reg(self.src1.reg),
            reg(self.src2.reg),
            reg(self.dest),
            self.fetch.start,
            self.fetch.duration,
            self.dispatch.start,
            self.dispatch.duration,
            self.issue.start,
            self.issue.duration,
            self.execute.start,
            self.execute.duration,
            self.writeback.start,
            self.writeback.duration,
        )
    }
}
