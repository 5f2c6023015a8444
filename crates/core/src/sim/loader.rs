//! Trace loader.
//!
//! Reads the line-oriented instruction trace and validates every record up
//! front: `<pc-hex> <op> <dst> <src1> <src2>`, with `-1` meaning "no register"
//! and an optional `0x` prefix on the pc. File order is program order; tags
//! are assigned sequentially from 0. Blank lines are skipped; anything else
//! that does not match the format is rejected with its line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::error::TraceError;
use crate::core::pipeline::instruction::{Instruction, RegId, Tag};
use crate::isa::OpClass;

/// Reads and validates a trace file.
pub fn read_trace(path: &Path) -> Result<Vec<Instruction>, TraceError> {
    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.display().to_string(),
        source,
    })?;
    parse_trace(BufReader::new(file))
}

/// Parses a trace from any buffered reader.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<Instruction>, TraceError> {
    let mut program = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| TraceError::Read { line_no, source })?;
        if line.trim().is_empty() {
            continue;
        }
        let (pc, op, dest, src1, src2) = parse_line(&line, line_no)?;
        let tag = Tag(program.len() as u32);
        program.push(Instruction::new(tag, pc, op, dest, src1, src2));
    }
    Ok(program)
}

/// Parses one trace record.
fn parse_line(
    line: &str,
    line_no: usize,
) -> Result<(u64, OpClass, Option<RegId>, Option<RegId>, Option<RegId>), TraceError> {
    let malformed = |reason: &'static str| TraceError::Malformed {
        line_no,
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(malformed("expected 5 fields"));
    }

    let pc_text = fields[0].trim_start_matches("0x");
    let pc = u64::from_str_radix(pc_text, 16).map_err(|_| malformed("bad pc"))?;
    let code: u32 = fields[1].parse().map_err(|_| malformed("bad op class"))?;
    let op = OpClass::from_code(code).ok_or_else(|| malformed("op class out of range"))?;
    let dest = parse_reg(fields[2]).ok_or_else(|| malformed("bad destination register"))?;
    let src1 = parse_reg(fields[3]).ok_or_else(|| malformed("bad source register"))?;
    let src2 = parse_reg(fields[4]).ok_or_else(|| malformed("bad source register"))?;

    Ok((pc, op, dest, src1, src2))
}

/// `-1` means "no register"; anything else must be a non-negative index.
fn parse_reg(field: &str) -> Option<Option<RegId>> {
    if field == "-1" {
        return Some(None);
    }
    field.parse::<RegId>().ok().map(Some)
}
