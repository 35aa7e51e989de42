// src/common/types.rs

use core::fmt;
use core::time::Duration;

// --- Distance Sample ---

/// Closest distance the sensor can resolve, in centimeters.
pub const MIN_RANGE_CM: f32 = 2.0;
/// Farthest distance the sensor can resolve, in centimeters.
pub const MAX_RANGE_CM: f32 = 400.0;

/// Microseconds-of-round-trip to centimeters: sound covers 0.034 cm/us
/// and the pulse travels to the target and back.
const SPEED_OF_SOUND_CM_PER_US: f32 = 0.034;

/// One time-of-flight distance measurement, in centimeters.
///
/// The constructor applies the sensor's validity filter: anything outside
/// `[MIN_RANGE_CM, MAX_RANGE_CM]` becomes the `0.0` sentinel. The sentinel
/// deliberately conflates "too close", "too far" and "no echo": the wire
/// protocol has a single representation for all three, and a receiver
/// cannot tell them apart. [`DistanceSample::is_valid`] distinguishes
/// sentinel from measurement in-process, but nothing downstream of the
/// wire can.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceSample(f32);

impl DistanceSample {
    /// The sentinel reported for any measurement that is not a real sample.
    pub const INVALID: DistanceSample = DistanceSample(0.0);

    /// Creates a sample from a raw distance, applying the validity filter.
    pub fn new(cm: f32) -> Self {
        if (MIN_RANGE_CM..=MAX_RANGE_CM).contains(&cm) {
            Self(cm)
        } else {
            Self::INVALID
        }
    }

    /// Creates a sample from a measured echo round-trip time.
    pub fn from_round_trip(duration: Duration) -> Self {
        let us = duration.as_micros() as f32;
        Self::new(us * SPEED_OF_SOUND_CM_PER_US / 2.0)
    }

    /// Returns the distance in centimeters (`0.0` for the sentinel).
    #[inline]
    pub fn as_cm(&self) -> f32 {
        self.0
    }

    /// `false` if this sample is the invalid-measurement sentinel.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 != 0.0
    }
}

// --- Sweep Direction ---

/// Direction of travel of the sweep motor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepDirection {
    Forward,
    Reverse,
}

impl SweepDirection {
    /// Returns the opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            SweepDirection::Forward => SweepDirection::Reverse,
            SweepDirection::Reverse => SweepDirection::Forward,
        }
    }
}

impl Default for SweepDirection {
    /// The sweep always starts out moving forward.
    fn default() -> Self {
        SweepDirection::Forward
    }
}

impl fmt::Display for SweepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepDirection::Forward => write!(f, "forward"),
            SweepDirection::Reverse => write!(f, "reverse"),
        }
    }
}

// --- Step Counter ---

/// Completed measurement cycles per sweep pass; the counter wraps and the
/// direction reverses when a pass finishes.
pub const STEPS_PER_PASS: u8 = 90;

/// Counts completed measurement cycles within the current pass.
///
/// The count stays in `[0, STEPS_PER_PASS)`. `advance` increments once per
/// completed cycle; the increment that would reach `STEPS_PER_PASS` resets
/// the counter instead and reports the wrap, so a reversal fires exactly
/// once per `STEPS_PER_PASS` cycles and the counter reads 0 on the same
/// cycle the reversal fires.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepCounter(u8);

impl StepCounter {
    pub fn new() -> Self {
        StepCounter(0)
    }

    /// Records one completed cycle. Returns `true` when the pass finished
    /// and the counter wrapped back to 0.
    pub fn advance(&mut self) -> bool {
        if self.0 + 1 >= STEPS_PER_PASS {
            self.0 = 0;
            true
        } else {
            self.0 += 1;
            false
        }
    }

    /// Current count within the pass.
    #[inline]
    pub fn count(&self) -> u8 {
        self.0
    }
}
