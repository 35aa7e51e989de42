// src/common/timing.rs

use core::time::Duration;

// Note: every fixed delay in the control loop lives here so tests can
// reason about the cycle against an injected clock instead of wall-clock
// sleeps. Values come from the HC-SR04 datasheet (trigger/echo) and from
// the reference sweep cadence (lead/settle/poll).

// === Trigger Pulse Shape (HC-SR04 datasheet) ===

/// Quiet time on the trigger line before the pulse. The datasheet asks
/// for >= 2 us of settled low level.
pub const TRIGGER_SETTLE: Duration = Duration::from_micros(2);
/// Width of the trigger pulse itself. Fixed at 10 us by the sensor's
/// hardware protocol; must be reproduced exactly.
pub const TRIGGER_PULSE: Duration = Duration::from_micros(10);

// === Echo Timing Bounds ===

/// Maximum wait for the echo line's rising edge after the trigger pulse.
/// The module raises echo well under 1 ms after the burst; 30 ms means
/// the sensor is absent or wedged.
pub const ECHO_START_TIMEOUT: Duration = Duration::from_millis(30);
/// Maximum width of the echo pulse itself. With no target in range the
/// HC-SR04 holds echo high for about 38 ms before giving up; anything
/// longer than that cannot be a real measurement.
pub const ECHO_PULSE_TIMEOUT: Duration = Duration::from_millis(38);

// === Sweep Cadence ===

/// Pause at the top of each measurement cycle. Rate-limits the loop so
/// serial output and display refresh stay bounded.
pub const CYCLE_LEAD_DELAY: Duration = Duration::from_millis(70);
/// Pause between rendering the measurement and reporting it, giving the
/// display time to latch the new value.
pub const DISPLAY_SETTLE: Duration = Duration::from_millis(60);
/// Interval between readiness polls while waiting for the host's `RDY`.
pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

// === Byte Timing at 115200 Baud (8N1) ===
// 1 start bit + 8 data bits + 1 stop bit = 10 bits per byte
// Time per byte = 10 / 115200 s = 86.8 us

/// Nominal duration of a single byte (10 bits total) at 115200 baud.
pub const BYTE_DURATION: Duration = Duration::from_micros(87);

// === Link I/O Timeouts ===

/// Upper bound for accepting one outbound byte into the transmit buffer.
/// Generous against `BYTE_DURATION`; expiring means the UART is wedged.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(20);
/// Upper bound for draining the transmit buffer after a full line.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(10);
