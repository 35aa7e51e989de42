// src/sweep/io_helpers.rs

use super::SweepController;
use crate::common::{
    error::SweepError,
    hal_traits::{InputLine, OutputLine, SweepDisplay, SweepSerial, SweepTimer},
    message::{parse_host_line, DeviceMessage, HostMessage, LINE_TERMINATOR},
    timing,
};
use core::fmt::Debug;
use core::time::Duration;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF, TP, EP, MP, D> SweepController<IF, TP, EP, MP, D>
where
    IF: SweepSerial + SweepTimer,
    IF::Error: Debug,
    TP: OutputLine,
    EP: InputLine,
    MP: OutputLine,
    D: SweepDisplay,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a
    /// timeout error.
    pub(super) fn blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, SweepError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let start_time = self.interface.now();
        let deadline = start_time + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(SweepError::Timeout);
                    }
                    // Small delay to avoid busy-spinning the UART register
                    self.interface.delay_us(100);
                }
                Err(nb::Error::Other(e)) => return Err(SweepError::Io(e)),
            }
        }
    }

    /// Sends one outbound message as a terminated line and flushes it.
    pub(super) fn write_line(
        &mut self,
        message: &DeviceMessage,
    ) -> Result<(), SweepError<IF::Error>> {
        let line = message
            .format_into()
            .map_err(|_| SweepError::MessageFormat)?;

        for &byte in line.as_bytes() {
            self.blocking_io_with_timeout(timing::WRITE_TIMEOUT, |iface| iface.write_byte(byte))?;
        }
        self.blocking_io_with_timeout(timing::WRITE_TIMEOUT, |iface| {
            iface.write_byte(LINE_TERMINATOR)
        })?;
        self.blocking_io_with_timeout(timing::FLUSH_TIMEOUT, |iface| iface.flush())?;

        Ok(())
    }

    /// Drains whatever inbound bytes are available right now, assembling
    /// them into lines across calls.
    ///
    /// Returns as soon as a *recognized* message completes. Unrecognized
    /// and over-long lines are discarded without an error; a partial line
    /// stays buffered for the next call. Returns `Ok(None)` once the
    /// receiver runs dry.
    pub(super) fn poll_host_line(&mut self) -> Result<Option<HostMessage>, SweepError<IF::Error>> {
        loop {
            match self.interface.read_byte() {
                Ok(byte) if byte == LINE_TERMINATOR => {
                    let message = if self.line_overflow {
                        None
                    } else {
                        parse_host_line(&self.line_buf[..self.line_len])
                    };
                    self.line_len = 0;
                    self.line_overflow = false;
                    if message.is_some() {
                        return Ok(message);
                    }
                    // Ignored line; keep draining.
                }
                Ok(byte) => {
                    if self.line_len < self.line_buf.len() {
                        self.line_buf[self.line_len] = byte;
                        self.line_len += 1;
                    } else {
                        // Too long to be anything we understand; discard
                        // the rest of the line when its terminator shows.
                        self.line_overflow = true;
                    }
                }
                Err(nb::Error::WouldBlock) => return Ok(None),
                Err(nb::Error::Other(e)) => return Err(SweepError::Io(e)),
            }
        }
    }
}
