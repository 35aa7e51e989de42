// src/sweep/handshake.rs

use super::{SweepController, SweepState};
use crate::common::{
    error::SweepError,
    hal_traits::{InputLine, OutputLine, SweepDisplay, SweepSerial, SweepTimer},
    message::{DeviceMessage, HostMessage},
    timing,
};
use core::fmt::Debug;

/// Shown on the display while the host has not answered yet.
const WAITING_LABEL: &str = "Waiting for host";

impl<IF, TP, EP, MP, D> SweepController<IF, TP, EP, MP, D>
where
    IF: SweepSerial + SweepTimer,
    IF::Error: Debug,
    TP: OutputLine,
    EP: InputLine,
    MP: OutputLine,
    D: SweepDisplay,
{
    /// Blocks until the host signals readiness, then enters `Active`.
    ///
    /// On the fixed poll interval: send the wait message, check the
    /// channel for `RDY`. Every other inbound line is ignored without
    /// comment. The motor stays stopped for the whole wait; on `RDY` the
    /// acknowledgment goes out, the display clears, and the motor
    /// resumes in the initial forward direction.
    ///
    /// The transition fires exactly once; calling this again on an
    /// active controller is a no-op.
    pub fn await_ready(&mut self) -> Result<(), SweepError<IF::Error>> {
        if self.state == SweepState::Active {
            return Ok(());
        }

        self.display.render(0, 0, WAITING_LABEL);
        self.motor.stop();

        loop {
            self.write_line(&DeviceMessage::ReadyWait)?;

            if let Some(HostMessage::Ready) = self.poll_host_line()? {
                self.write_line(&DeviceMessage::ReadyAck)?;
                self.display.clear();
                self.state = SweepState::Active;
                self.motor.resume();
                return Ok(());
            }

            self.interface
                .delay_ms(timing::READY_POLL_INTERVAL.as_millis() as u32);
        }
    }
}
