mod tcp;

pub use tcp::TcpSession;

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Anything that can answer a Read Holding Registers request.
pub trait RegisterSource {
    /// Read `count` registers starting at the zero-based wire `offset`.
    fn read_holding_registers(&mut self, offset: u16, count: u16) -> Result<Vec<u16>, ClientError>;
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection to {target} failed: {source}")]
    Connect {
        target: SocketAddr,
        source: io::Error,
    },
    #[error("response timed out after {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("device exception 0x{code:02X}: {name}")]
    Exception { code: u8, name: &'static str },
    #[error("protocol error: {message}")]
    Protocol { message: String },
}

impl ClientError {
    pub(crate) fn exception(code: u8) -> Self {
        ClientError::Exception {
            code,
            name: exception_name(code),
        }
    }
}

/// Standard name of a Modbus exception code.
pub fn exception_name(code: u8) -> &'static str {
    match code {
        0x01 => "illegal function",
        0x02 => "illegal data address",
        0x03 => "illegal data value",
        0x04 => "server device failure",
        0x05 => "acknowledge",
        0x06 => "server device busy",
        0x08 => "memory parity error",
        0x0A => "gateway path unavailable",
        0x0B => "gateway target device failed to respond",
        _ => "unknown exception",
    }
}
