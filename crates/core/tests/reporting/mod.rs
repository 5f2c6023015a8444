//! Output formatting, summary, and determinism checks.

use crate::common::{render_report, run_trace};

#[test]
fn test_retired_line_format() {
    let sim = run_trace(1, 1, "0x1000 0 1 2 3\n");
    assert_eq!(
        sim.retired()[0].to_string(),
        "0  fu{0} src{2,3} dst{1} IF{1,1} ID{2,1} IS{3,1} EX{4,1} WB{5,1}"
    );
}

#[test]
fn test_missing_registers_print_as_minus_one() {
    let sim = run_trace(1, 1, "0x1000 1 -1 -1 -1\n");
    assert_eq!(
        sim.retired()[0].to_string(),
        "0  fu{1} src{-1,-1} dst{-1} IF{1,1} ID{2,1} IS{3,1} EX{4,2} WB{6,1}"
    );
}

#[test]
fn test_full_report_block() {
    let sim = run_trace(1, 1, "0x1000 0 1 2 3\n");
    let report = render_report(&sim, 1, 1);
    let expected = [
        "0  fu{0} src{2,3} dst{1} IF{1,1} ID{2,1} IS{3,1} EX{4,1} WB{5,1}",
        "CONFIGURATION",
        " superscalar bandwidth (N)      = 1",
        " dispatch queue size (2*N)      = 2",
        " schedule queue size (S)        = 1",
        "RESULTS",
        " number of instructions = 1",
        " number of cycles       = 6",
        " IPC                    = 0.17",
        "",
    ]
    .join("\n");
    assert_eq!(report, expected);
}

#[test]
fn test_identical_runs_produce_identical_output() {
    let trace = "0x1000 2 1 -1 -1\n\
                 0x1004 0 2 1 -1\n\
                 0x1008 1 3 2 1\n\
                 0x100c 0 1 3 -1\n\
                 0x1010 2 -1 1 2\n";
    let first = render_report(&run_trace(2, 4, trace), 2, 4);
    let second = render_report(&run_trace(2, 4, trace), 2, 4);
    assert_eq!(first, second);
}

#[test]
fn test_empty_trace_reports_zero_cycles() {
    let sim = run_trace(1, 1, "");
    assert!(sim.retired().is_empty());
    assert_eq!(sim.stats().cycles, 0);
    assert_eq!(format!("{:.2}", sim.stats().ipc()), "0.00");
}
