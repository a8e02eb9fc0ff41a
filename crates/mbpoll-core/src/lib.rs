//! mbpoll core library for one-shot Modbus/TCP holding register polls.
//!
//! This crate implements everything the CLI needs apart from argument
//! handling: the register spec parser turns `start,end_or_count,format` into
//! a validated [`ReadPlan`], the Modbus/TCP client (a thin session over the
//! blocking `tokio_modbus` client) fetches raw words, and the decoder
//! reinterprets those words as integers, floats, bit strings or characters.
//! Parsing and decoding are pure; all socket I/O is isolated in `client`.
//!
//! Invariants:
//! - A `ReadPlan` is validated once and never mutated.
//! - Two-register formats always carry an even register count.
//! - Decoding never reads past the register buffer; short buffers are
//!   rejected before iteration starts.
//!
//! # Examples
//! ```
//! use mbpoll_core::{Format, decode, parse_csv};
//!
//! let plan = parse_csv("40001,2,f")?;
//! assert_eq!(plan.format(), Format::Float32);
//!
//! let words = [0x447A, 0x0000];
//! let values = decode(&plan, &words, 40001)?.collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(values[0].text, "1000.00");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;

mod client;
mod decode;
mod poll;
mod register_spec;

pub use client::{ClientError, RegisterSource, TcpSession, exception_name};
pub use decode::{
    DecodeError, DecodedValue, Decoder, Format, RegisterValue, WordOrder, decode,
    decode_with_order,
};
pub use poll::{PollError, PollTarget, poll_source, poll_target, wire_offset};
pub use register_spec::{ReadPlan, SpecError, parse, parse_csv};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default Modbus/TCP port.
pub const DEFAULT_PORT: u16 = 502;
/// Default response timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;
/// Default unit (slave) identifier.
pub const DEFAULT_UNIT_ID: u8 = 1;

/// Result of a single poll, ready to be rendered or serialized.
///
/// # Examples
/// ```
/// use std::net::{IpAddr, Ipv4Addr};
/// use std::time::Duration;
///
/// use mbpoll_core::{PollTarget, WordOrder, make_report, parse_csv};
///
/// let target = PollTarget {
///     address: IpAddr::V4(Ipv4Addr::LOCALHOST),
///     port: 502,
///     unit_id: 1,
///     timeout: Duration::from_secs(3),
/// };
/// let plan = parse_csv("40001,10,u")?;
/// let report = make_report(&target, &plan, WordOrder::HighFirst, Vec::new());
/// assert_eq!(report.report_version, mbpoll_core::REPORT_VERSION);
/// assert_eq!(report.target.port, 502);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PollReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Device that was polled.
    pub target: TargetInfo,
    /// Validated read plan used for the request.
    pub plan: ReadPlan,
    /// Word order applied to two-register values.
    pub word_order: WordOrder,
    /// Decoded values in address order.
    pub registers: Vec<DecodedValue>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "mbpoll").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Connection parameters embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct TargetInfo {
    /// Device IP address as a string.
    pub address: String,
    /// TCP port.
    pub port: u16,
    /// Modbus unit identifier.
    pub unit_id: u8,
    /// Response timeout in whole seconds.
    pub timeout_s: u64,
}

/// Build a report from a finished poll.
pub fn make_report(
    target: &PollTarget,
    plan: &ReadPlan,
    word_order: WordOrder,
    registers: Vec<DecodedValue>,
) -> PollReport {
    PollReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "mbpoll".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        target: TargetInfo {
            address: target.address.to_string(),
            port: target.port,
            unit_id: target.unit_id,
            timeout_s: target.timeout.as_secs(),
        },
        plan: *plan,
        word_order,
        registers,
    }
}
