// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point on a platform's monotonic clock.
///
/// Implemented by whatever instant type the platform timer provides
/// (e.g. `embassy_time::Instant` on Embassy targets, or a plain
/// microsecond counter in tests). Arithmetic against `Duration` is all
/// the sweep logic needs to turn blocking waits into bounded ones.
pub trait SweepInstant:
    Copy + PartialOrd + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

// Blanket impl: anything with the right arithmetic is an instant.
impl<T> SweepInstant for T where
    T: Copy + PartialOrd + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for timer/delay operations required by the sweep loop.
///
/// Note: the delay half could be replaced by `embedded_hal::delay::DelayNs`
/// if embedded-hal v1 is mandated; `now()` has no embedded-hal equivalent,
/// so the trait stays self-contained.
pub trait SweepTimer {
    /// Monotonic instant type used for deadlines.
    type Instant: SweepInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Returns the current instant on the monotonic clock.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for synchronous (non-blocking) serial communication with
/// the host.
///
/// The reference link runs at 115200 baud, 8 data bits, newline-framed
/// text, one message per line. Framing lives above this trait; here it is
/// bytes only.
pub trait SweepSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as
    /// `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or
    /// `Err(nb::Error::WouldBlock)` if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes
    /// have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}

/// A digital output line (motor direction, motor enable, sensor trigger).
///
/// Infallible: the lines this crate drives are plain push-pull GPIO with
/// no feedback channel, so there is no failure to report. Platforms whose
/// pins are fallible can adapt through [`HalOutputPin`].
pub trait OutputLine {
    /// Drives the line to the active (high) level.
    fn set_high(&mut self);

    /// Drives the line to the inactive (low) level.
    fn set_low(&mut self);
}

/// A digital input line (the sensor's echo output).
///
/// Takes `&mut self` to match `embedded_hal::digital::InputPin`.
pub trait InputLine {
    /// Samples the current level of the line.
    fn is_high(&mut self) -> bool;
}

/// The two-row text display the sweep renders measurements on.
///
/// The display itself is an external collaborator; the sweep only needs
/// "put this text at this cell" and "clear".
pub trait SweepDisplay {
    /// Renders `text` starting at the given row and column.
    fn render(&mut self, row: u8, col: u8, text: &str);

    /// Clears the whole display.
    fn clear(&mut self);
}

// --- embedded-hal adapters (feature = "embedded-hal") ---
//
// Wrap an infallible embedded-hal v1 pin so it satisfies the crate's
// line traits. Pins with a real error type need a platform-specific
// adapter instead.

/// Adapts an infallible `embedded_hal::digital::OutputPin` into an
/// [`OutputLine`].
#[cfg(feature = "embedded-hal")]
pub struct HalOutputPin<P>(pub P);

#[cfg(feature = "embedded-hal")]
impl<P> OutputLine for HalOutputPin<P>
where
    P: embedded_hal::digital::OutputPin<Error = core::convert::Infallible>,
{
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => (),
            Err(e) => match e {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => (),
            Err(e) => match e {},
        }
    }
}

/// Adapts an infallible `embedded_hal::digital::InputPin` into an
/// [`InputLine`].
#[cfg(feature = "embedded-hal")]
pub struct HalInputPin<P>(pub P);

#[cfg(feature = "embedded-hal")]
impl<P> InputLine for HalInputPin<P>
where
    P: embedded_hal::digital::InputPin<Error = core::convert::Infallible>,
{
    fn is_high(&mut self) -> bool {
        match self.0.is_high() {
            Ok(level) => level,
            Err(e) => match e {},
        }
    }
}
