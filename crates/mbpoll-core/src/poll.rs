use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::client::{ClientError, RegisterSource, TcpSession};
use crate::decode::{DecodeError, DecodedValue, WordOrder, decode_with_order};
use crate::register_spec::ReadPlan;
use crate::{PollReport, make_report};

#[derive(Debug, Error)]
pub enum PollError {
    #[error("register {address} has no wire offset: the first addressable register is 40001")]
    Unaddressable { address: u16 },
    #[error("transport error: {0}")]
    Client(#[from] ClientError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl PollError {
    /// Whether the failure came from the device or the connection rather
    /// than from local validation.
    pub fn is_transport(&self) -> bool {
        !matches!(self, PollError::Unaddressable { .. })
    }
}

/// Where and how to poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTarget {
    pub address: IpAddr,
    pub port: u16,
    pub unit_id: u8,
    pub timeout: Duration,
}

impl PollTarget {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Issue the plan's single read against `source` and decode the reply.
///
/// # Examples
/// ```
/// use mbpoll_core::{ClientError, RegisterSource, WordOrder, parse_csv, poll_source};
///
/// struct Fixed(Vec<u16>);
///
/// impl RegisterSource for Fixed {
///     fn read_holding_registers(&mut self, _offset: u16, count: u16) -> Result<Vec<u16>, ClientError> {
///         Ok(self.0[..usize::from(count)].to_vec())
///     }
/// }
///
/// let plan = parse_csv("40001,2,f")?;
/// let values = poll_source(&mut Fixed(vec![0x447A, 0x0000]), &plan, WordOrder::HighFirst)?;
/// assert_eq!(values[0].text, "1000.00");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Returns [`PollError`] when the plan has no wire offset, the source fails,
/// or the source returns fewer words than requested.
pub fn poll_source<S: RegisterSource>(
    source: &mut S,
    plan: &ReadPlan,
    word_order: WordOrder,
) -> Result<Vec<DecodedValue>, PollError> {
    let offset = wire_offset(plan)?;
    let words = source.read_holding_registers(offset, plan.register_count())?;
    let values = decode_with_order(plan, &words, u32::from(plan.start_address()), word_order)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(values)
}

/// Connect to `target`, poll once, close, and build a report.
///
/// # Errors
/// Returns [`PollError`]; an unaddressable plan is rejected before any
/// connection is attempted.
pub fn poll_target(
    target: &PollTarget,
    plan: &ReadPlan,
    word_order: WordOrder,
) -> Result<PollReport, PollError> {
    wire_offset(plan)?;

    let mut session = TcpSession::connect(target.socket_addr(), target.timeout)?;
    session.set_unit_id(target.unit_id);
    let result = poll_source(&mut session, plan, word_order);
    session.close();

    let registers = result?;
    debug!(values = registers.len(), "poll complete");
    Ok(make_report(target, plan, word_order, registers))
}

/// Zero-based wire offset of the plan's first register.
///
/// # Errors
/// Returns [`PollError::Unaddressable`] for register 40000, which passes
/// range validation but has no wire offset.
pub fn wire_offset(plan: &ReadPlan) -> Result<u16, PollError> {
    plan.wire_offset().ok_or(PollError::Unaddressable {
        address: plan.start_address(),
    })
}
