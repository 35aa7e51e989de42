// src/common/message.rs

//! Handshake wire vocabulary.
//!
//! Every exchange with the host is one ASCII line. The device's outbound
//! vocabulary is fixed and case-sensitive; the host recognizes `FWR`,
//! `CDR` and the `Distance:` prefix, and silently ignores everything
//! else (including both readiness texts). The only inbound line the
//! device understands is `RDY`; hosts commonly terminate with `\r\n`, so
//! a trailing carriage return is stripped before comparison.
//!
//! The link is assumed reliable and in-order. There is no acknowledgment,
//! retry, or checksum layer; this is a deliberate simplification of the design,
//! not something callers may rely on this module to detect.

use core::fmt;

use arrayvec::ArrayString;

use super::types::DistanceSample;

/// Line terminator for outbound messages.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Upper bound on a formatted outbound line, terminator excluded.
/// The longest fixed text is the readiness poll at 25 bytes; a distance
/// report tops out at `Distance: 400.000000` (20 bytes).
pub const MAX_MESSAGE_LEN: usize = 32;

/// A message the device sends to the host.
///
/// The `Display` implementation produces the exact wire text, without the
/// line terminator.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMessage {
    /// Readiness poll, repeated until the host answers `RDY`.
    ReadyWait,
    /// One-time acknowledgment of `RDY`. The host ignores it.
    ReadyAck,
    /// `FWR`: a measurement is about to be taken.
    MeasureBegin,
    /// `Distance: <value>`: the measurement just taken, in centimeters.
    /// Six decimal places, matching the reference firmware's `%f`.
    DistanceReport(DistanceSample),
    /// `CDR`: the sweep direction is about to reverse.
    DirectionChange,
}

impl fmt::Display for DeviceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMessage::ReadyWait => write!(f, "Waiting for RDY signal..."),
            DeviceMessage::ReadyAck => write!(f, "Ready signal received."),
            DeviceMessage::MeasureBegin => write!(f, "FWR"),
            DeviceMessage::DistanceReport(sample) => {
                write!(f, "Distance: {:.6}", sample.as_cm())
            }
            DeviceMessage::DirectionChange => write!(f, "CDR"),
        }
    }
}

impl DeviceMessage {
    /// Formats the message into a fixed-capacity buffer, terminator
    /// excluded. Fails only if the text exceeds `MAX_MESSAGE_LEN`, which
    /// no current variant can.
    pub fn format_into(&self) -> Result<ArrayString<MAX_MESSAGE_LEN>, fmt::Error> {
        use core::fmt::Write;
        let mut buffer = ArrayString::new();
        write!(&mut buffer, "{}", self)?;
        Ok(buffer)
    }
}

/// A message the host sends to the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// `RDY`: the host is listening; start sweeping.
    Ready,
}

/// Parses one inbound line (terminator already removed).
///
/// Returns `None` for anything unrecognized; the caller ignores such
/// lines without reporting an error.
pub fn parse_host_line(line: &[u8]) -> Option<HostMessage> {
    let line = match line.split_last() {
        Some((&b'\r', rest)) => rest,
        _ => line,
    };
    match line {
        b"RDY" => Some(HostMessage::Ready),
        _ => None,
    }
}
