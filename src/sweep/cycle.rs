// src/sweep/cycle.rs

use super::{SweepController, SweepState};
use crate::common::{
    error::SweepError,
    hal_traits::{InputLine, OutputLine, SweepDisplay, SweepSerial, SweepTimer},
    message::DeviceMessage,
    timing,
    types::DistanceSample,
};
use core::convert::Infallible;
use core::fmt::Debug;
use core::fmt::Write;

use arrayvec::ArrayString;

/// Fixed label on the display's top row.
const DISTANCE_LABEL: &str = "Distance:";
/// Column the numeric value starts at, right of the label.
const VALUE_COLUMN: u8 = 10;

impl<IF, TP, EP, MP, D> SweepController<IF, TP, EP, MP, D>
where
    IF: SweepSerial + SweepTimer,
    IF::Error: Debug,
    TP: OutputLine,
    EP: InputLine,
    MP: OutputLine,
    D: SweepDisplay,
{
    /// Runs one measurement cycle and returns its sample.
    ///
    /// The per-cycle ordering is a protocol contract: `FWR` always
    /// precedes the distance report, and when a pass completes, `CDR`
    /// goes out before the new direction reaches the windings: the
    /// reversal is announced, then applied, then motion resumes.
    ///
    /// Refused with [`SweepError::NotReady`] until the handshake has
    /// completed: nothing may reach the wire before the host's `RDY`.
    pub fn run_cycle(&mut self) -> Result<DistanceSample, SweepError<IF::Error>> {
        if self.state != SweepState::Active {
            return Err(SweepError::NotReady);
        }

        // Rate-limit the loop before touching anything.
        self.interface
            .delay_ms(timing::CYCLE_LEAD_DELAY.as_millis() as u32);

        // Hold the platform still for a stable measurement.
        self.motor.stop();
        self.write_line(&DeviceMessage::MeasureBegin)?;

        let sample = self.sensor.sample(&mut self.interface);
        self.last_sample = sample;
        if !sample.is_valid() {
            self.anomalies = self.anomalies.saturating_add(1);
        }

        self.render_sample(sample);
        self.interface
            .delay_ms(timing::DISPLAY_SETTLE.as_millis() as u32);

        self.write_line(&DeviceMessage::DistanceReport(sample))?;

        if self.steps.advance() {
            // Pass complete: announce first, then flip the stored
            // direction; resume below applies it.
            self.write_line(&DeviceMessage::DirectionChange)?;
            self.motor.reverse();
        }

        self.motor.resume();

        Ok(sample)
    }

    /// Runs the sweep forever: handshake, then cycles.
    ///
    /// No sensor or protocol anomaly halts the loop; a failed cycle
    /// bumps the anomaly counter and the sweep keeps going. The only way
    /// out is external reset or power-cycle, so the success type is
    /// uninhabited; the error covers the handshake I/O path only.
    pub fn run(&mut self) -> Result<Infallible, SweepError<IF::Error>> {
        self.await_ready()?;
        loop {
            if self.run_cycle().is_err() {
                self.anomalies = self.anomalies.saturating_add(1);
            }
        }
    }

    /// Two render calls per cycle: the fixed label, then the value with
    /// two decimals, both on the top row.
    fn render_sample(&mut self, sample: DistanceSample) {
        self.display.render(0, 0, DISTANCE_LABEL);
        let mut text = ArrayString::<16>::new();
        if write!(&mut text, "{:.2}", sample.as_cm()).is_ok() {
            self.display.render(0, VALUE_COLUMN, &text);
        }
    }
}
