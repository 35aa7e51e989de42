// src/ranging/mod.rs

//! HC-SR04 time-of-flight ranging.
//!
//! One measurement is: a fixed-shape pulse on the trigger line, then a
//! single high pulse on the echo line whose width is the acoustic round
//! trip. Both echo edges are waited for against deadlines on the injected
//! clock: a missing or wedged sensor produces the invalid-sample
//! sentinel, never an unbounded stall.

use crate::common::hal_traits::{InputLine, OutputLine, SweepTimer};
use crate::common::timing;
use crate::common::types::DistanceSample;

/// The ultrasonic ranging sensor behind its trigger/echo pin pair.
pub struct RangeSensor<T: OutputLine, E: InputLine> {
    trigger: T,
    echo: E,
}

impl<T: OutputLine, E: InputLine> RangeSensor<T, E> {
    /// Creates a sensor with the trigger line driven low.
    pub fn new(mut trigger: T, echo: E) -> Self {
        trigger.set_low();
        RangeSensor { trigger, echo }
    }

    /// Takes one distance measurement.
    ///
    /// Cannot fail and cannot block past the echo timeouts: too close,
    /// too far, no echo and pulse-never-ends all collapse to
    /// [`DistanceSample::INVALID`]. A caller that needs to tell a real
    /// zero-ish reading apart from an anomaly cannot; the sentinel is
    /// the sensor's only anomaly channel.
    pub fn sample<TM: SweepTimer>(&mut self, timer: &mut TM) -> DistanceSample {
        // Trigger shape fixed by the sensor: >=2 us low, 10 us high, low.
        self.trigger.set_low();
        timer.delay_us(timing::TRIGGER_SETTLE.as_micros() as u32);
        self.trigger.set_high();
        timer.delay_us(timing::TRIGGER_PULSE.as_micros() as u32);
        self.trigger.set_low();

        // Rising edge of the echo pulse.
        let start_deadline = timer.now() + timing::ECHO_START_TIMEOUT;
        while !self.echo.is_high() {
            if timer.now() >= start_deadline {
                return DistanceSample::INVALID;
            }
        }

        // Time the high pulse.
        let pulse_start = timer.now();
        let pulse_deadline = pulse_start + timing::ECHO_PULSE_TIMEOUT;
        let mut pulse_end = pulse_start;
        while self.echo.is_high() {
            pulse_end = timer.now();
            if pulse_end >= pulse_deadline {
                return DistanceSample::INVALID;
            }
        }

        DistanceSample::from_round_trip(pulse_end - pulse_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use core::time::Duration;
    use std::vec::Vec;

    /// Microsecond clock shared between the mock timer and the mock pins.
    struct SharedClock(Cell<u64>);

    impl SharedClock {
        fn new() -> Self {
            SharedClock(Cell::new(0))
        }
        fn advance(&self, us: u64) {
            self.0.set(self.0.get() + us);
        }
    }

    /// Timer over the shared clock. Every `now()` costs one simulated
    /// microsecond, standing in for the real polling loop's iteration
    /// cost, so edge waits make progress.
    struct MockTimer<'a>(&'a SharedClock);

    #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct MockInstant(u64);

    impl core::ops::Add<Duration> for MockInstant {
        type Output = Self;
        fn add(self, rhs: Duration) -> Self {
            MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
        }
    }
    impl core::ops::Sub<MockInstant> for MockInstant {
        type Output = Duration;
        fn sub(self, rhs: MockInstant) -> Duration {
            Duration::from_micros(self.0.saturating_sub(rhs.0))
        }
    }

    impl SweepTimer for MockTimer<'_> {
        type Instant = MockInstant;
        fn delay_us(&mut self, us: u32) {
            self.0.advance(us as u64);
        }
        fn delay_ms(&mut self, ms: u32) {
            self.0.advance(ms as u64 * 1000);
        }
        fn now(&self) -> MockInstant {
            let t = self.0 .0.get();
            self.0.advance(1);
            MockInstant(t)
        }
    }

    /// Trigger line that logs (level, time) transitions.
    struct MockTrigger<'a> {
        clock: &'a SharedClock,
        log: &'a RefCell<Vec<(bool, u64)>>,
    }

    impl OutputLine for MockTrigger<'_> {
        fn set_high(&mut self) {
            self.log.borrow_mut().push((true, self.clock.0.get()));
        }
        fn set_low(&mut self) {
            self.log.borrow_mut().push((false, self.clock.0.get()));
        }
    }

    /// Echo line that is high exactly for `rise_at <= t < fall_at`.
    struct MockEcho<'a> {
        clock: &'a SharedClock,
        rise_at: u64,
        fall_at: u64,
    }

    impl InputLine for MockEcho<'_> {
        fn is_high(&mut self) -> bool {
            let t = self.clock.0.get();
            t >= self.rise_at && t < self.fall_at
        }
    }

    fn measure(rise_at: u64, fall_at: u64) -> DistanceSample {
        let clock = SharedClock::new();
        let log = RefCell::new(Vec::new());
        let mut sensor = RangeSensor::new(
            MockTrigger { clock: &clock, log: &log },
            MockEcho { clock: &clock, rise_at, fall_at },
        );
        let mut timer = MockTimer(&clock);
        sensor.sample(&mut timer)
    }

    #[test]
    fn trigger_shape_is_2us_low_10us_high() {
        let clock = SharedClock::new();
        let log = RefCell::new(Vec::new());
        let mut sensor = RangeSensor::new(
            MockTrigger { clock: &clock, log: &log },
            MockEcho { clock: &clock, rise_at: 20, fall_at: 620 },
        );
        let mut timer = MockTimer(&clock);
        sensor.sample(&mut timer);

        let events = log.borrow();
        // new() low, then the pulse: low, +2us high, +10us low
        assert_eq!(events[0], (false, 0));
        let (level1, t1) = events[1];
        let (level2, t2) = events[2];
        let (level3, t3) = events[3];
        assert!(!level1 && level2 && !level3);
        assert_eq!(t2 - t1, 2);
        assert_eq!(t3 - t2, 10);
    }

    #[test]
    fn in_range_pulse_measures_its_width() {
        // ~584 us round trip -> 584 * 0.034 / 2 = 9.928 cm
        let sample = measure(20, 20 + 584);
        assert!(sample.is_valid());
        assert!(
            (sample.as_cm() - 9.928).abs() < 0.05,
            "got {}",
            sample.as_cm()
        );
    }

    #[test]
    fn out_of_range_pulse_is_sentinel() {
        // 30000 us -> 510 cm, past the far limit
        let sample = measure(20, 20 + 30_000);
        assert_eq!(sample, DistanceSample::INVALID);
    }

    #[test]
    fn missing_echo_times_out_to_sentinel() {
        let sample = measure(u64::MAX, u64::MAX);
        assert_eq!(sample, DistanceSample::INVALID);
    }

    #[test]
    fn endless_pulse_times_out_to_sentinel() {
        let sample = measure(20, u64::MAX);
        assert_eq!(sample, DistanceSample::INVALID);
    }
}
