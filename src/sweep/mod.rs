// src/sweep/mod.rs

//! The sweep state machine.
//!
//! [`SweepController`] owns every collaborator (host link, range sensor,
//! motor, display) and sequences the stop, measure, report, resume
//! cycle, reversing the sweep every completed pass. It starts in
//! `AwaitingReady` with the motor held stopped and nothing but the
//! readiness poll on the wire; the host's `RDY` line moves it to `Active`
//! permanently. There is no shutdown state: once active, the loop runs
//! until power-off.

// Declare the sibling impl files
mod cycle;
mod handshake;
mod io_helpers;

use core::fmt::Debug;

use crate::common::hal_traits::{InputLine, OutputLine, SweepDisplay, SweepSerial, SweepTimer};
use crate::common::types::{DistanceSample, StepCounter, SweepDirection};
use crate::motor::SweepMotor;
use crate::ranging::RangeSensor;

/// Capacity of the inbound line assembler. The host's entire vocabulary
/// is `RDY`; longer lines are discarded unparsed, which is
/// indistinguishable from ignoring them.
const LINE_BUF_LEN: usize = 32;

/// Where the controller sits in its two-state life cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepState {
    /// Polling for the host's `RDY`, motor stopped.
    AwaitingReady,
    /// Sweeping and measuring, forever.
    Active,
}

/// The orchestrating state machine of the ranging sweep.
///
/// Generic over the serial+timer interface bundle and the pin/display
/// capabilities so the whole machine runs against mocks in tests and
/// against the board's HAL in firmware.
pub struct SweepController<IF, TP, EP, MP, D>
where
    IF: SweepSerial + SweepTimer,
    IF::Error: Debug,
    TP: OutputLine,
    EP: InputLine,
    MP: OutputLine,
    D: SweepDisplay,
{
    interface: IF,
    sensor: RangeSensor<TP, EP>,
    motor: SweepMotor<MP>,
    display: D,
    state: SweepState,
    steps: StepCounter,
    last_sample: DistanceSample,
    line_buf: [u8; LINE_BUF_LEN],
    line_len: usize,
    line_overflow: bool,
    anomalies: u32,
}

impl<IF, TP, EP, MP, D> SweepController<IF, TP, EP, MP, D>
where
    IF: SweepSerial + SweepTimer,
    IF::Error: Debug,
    TP: OutputLine,
    EP: InputLine,
    MP: OutputLine,
    D: SweepDisplay,
{
    /// Assembles the controller and applies the power-up defaults: motor
    /// enabled (the gate is set once here and never per cycle) but
    /// stopped, state `AwaitingReady`.
    pub fn new(interface: IF, sensor: RangeSensor<TP, EP>, mut motor: SweepMotor<MP>, display: D) -> Self {
        motor.set_enabled(true);
        motor.stop();
        SweepController {
            interface,
            sensor,
            motor,
            display,
            state: SweepState::AwaitingReady,
            steps: StepCounter::new(),
            last_sample: DistanceSample::INVALID,
            line_buf: [0; LINE_BUF_LEN],
            line_len: 0,
            line_overflow: false,
            anomalies: 0,
        }
    }

    /// Current life-cycle state.
    #[inline]
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Direction the motor is (or will be) sweeping in.
    #[inline]
    pub fn direction(&self) -> SweepDirection {
        self.motor.direction()
    }

    /// Completed cycles within the current pass.
    #[inline]
    pub fn step_count(&self) -> u8 {
        self.steps.count()
    }

    /// The most recent measurement (the sentinel before the first cycle).
    #[inline]
    pub fn last_sample(&self) -> DistanceSample {
        self.last_sample
    }

    /// Count of anomalies absorbed so far: invalid samples and failed
    /// cycles. Observability only: nothing on the wire changes with it.
    #[inline]
    pub fn anomaly_count(&self) -> u32 {
        self.anomalies
    }
}
