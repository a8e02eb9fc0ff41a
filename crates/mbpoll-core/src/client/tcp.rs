//! Blocking Modbus/TCP session on top of `tokio_modbus`' sync client.
//!
//! One socket, one outstanding request at a time. The response timeout
//! covers the connect and every request, so a silent device surfaces as
//! `ClientError::Timeout` instead of blocking forever.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio_modbus::client::sync::{Context, Reader, tcp};
use tokio_modbus::slave::{Slave, SlaveContext as _};
use tokio_modbus::{Error as ModbusError, ExceptionCode};
use tracing::{debug, info, warn};

use crate::DEFAULT_UNIT_ID;

use super::{ClientError, RegisterSource};

pub struct TcpSession {
    context: Context,
    peer: SocketAddr,
    unit_id: u8,
    timeout: Duration,
}

impl TcpSession {
    /// Connect to `target`, using `timeout` for both the connect and every
    /// later response.
    pub fn connect(target: SocketAddr, timeout: Duration) -> Result<Self, ClientError> {
        let context =
            tcp::connect_slave_with_timeout(target, Slave(DEFAULT_UNIT_ID), Some(timeout))
                .map_err(|source| ClientError::Connect { target, source })?;
        info!(peer = %target, "modbus session opened");
        Ok(Self {
            context,
            peer: target,
            unit_id: DEFAULT_UNIT_ID,
            timeout,
        })
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.context.set_timeout(Some(timeout));
        self.timeout = timeout;
    }

    pub fn set_unit_id(&mut self, unit_id: u8) {
        self.context.set_slave(Slave(unit_id));
        self.unit_id = unit_id;
    }

    pub fn unit_id(&self) -> u8 {
        self.unit_id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Drop the connection; the socket closes with the context.
    pub fn close(self) {
        info!(peer = %self.peer, "modbus session closed");
    }

    fn transport_error(&self, err: ModbusError) -> ClientError {
        match err {
            ModbusError::Transport(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
                ) =>
            {
                ClientError::Timeout {
                    timeout: self.timeout,
                }
            }
            ModbusError::Transport(err) => ClientError::Io(err),
            other => ClientError::Protocol {
                message: other.to_string(),
            },
        }
    }
}

impl RegisterSource for TcpSession {
    fn read_holding_registers(&mut self, offset: u16, count: u16) -> Result<Vec<u16>, ClientError> {
        debug!(
            unit_id = self.unit_id,
            offset, count, "sending read holding registers request"
        );
        match self.context.read_holding_registers(offset, count) {
            Ok(Ok(words)) => {
                debug!(words = words.len(), "received register data");
                Ok(words)
            }
            Ok(Err(code)) => {
                let err = exception_error(code);
                if let ClientError::Exception { code, name } = &err {
                    warn!(code, name, "device returned an exception");
                }
                Err(err)
            }
            Err(err) => Err(self.transport_error(err)),
        }
    }
}

fn exception_error(code: ExceptionCode) -> ClientError {
    ClientError::exception(u8::from(code))
}
