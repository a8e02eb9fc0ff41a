use std::fmt::Write as _;

use mbpoll_core::{DecodedValue, Format, PollReport, PollTarget, ReadPlan};

/// Connection summary printed before polling.
pub fn render_header(target: &PollTarget, plan: &ReadPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "IP Address: {}", target.address);
    let _ = writeln!(out, "Port: {}", target.port);
    let _ = writeln!(out, "Slave RTU: {}", target.unit_id);
    let _ = writeln!(out, "Starting Register: {}", plan.start_address());
    let _ = writeln!(out, "Number of Registers To Read: {}", plan.register_count());
    let _ = writeln!(
        out,
        "Registers: {}-{}",
        plan.start_address(),
        plan.end_address()
    );
    out.push('\n');
    out
}

/// One `ADDRESS:<tab>VALUE` line per decoded value.
pub fn render_values(values: &[DecodedValue]) -> String {
    let mut out = String::new();
    for value in values {
        let _ = writeln!(out, "{}:\t{}", value.address, value.text);
    }
    out
}

pub fn serialize_report(report: &PollReport, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

/// Format list and usage example appended to `--help`.
pub fn help_footer(program: &str) -> String {
    let mut out = String::from("Formats:\n");
    for format in Format::ALL {
        let _ = writeln!(out, "  {} - {}", format.letter(), format.description());
    }
    let _ = write!(
        out,
        "\nExamples:\n  {program} -s 1 -t 3 -p 502 192.168.1.5 40001,10,u\n    \
         Poll 10 registers from 192.168.1.5, slave address 1,\n    \
         on port 502 with a 3 second timeout starting at\n    \
         register 40001. Print values as unsigned shorts."
    );
    out
}
