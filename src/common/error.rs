// src/common/error.rs

#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying serial I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// A bounded serial operation timed out.
    ///
    /// This covers the *link* only. Sensor echo timeouts are not errors:
    /// they collapse to the invalid-sample sentinel, exactly like an
    /// out-of-range reading.
    #[error("Operation timed out")]
    Timeout,

    /// An outbound message did not fit its formatting buffer.
    #[error("Message formatting failed")]
    MessageFormat,

    /// A measurement cycle was requested before the host sent `RDY`.
    #[error("Handshake not completed")]
    NotReady,
}

// Allow mapping from underlying HAL error if From is implemented
impl<E: core::fmt::Debug> From<E> for SweepError<E> {
    fn from(e: E) -> Self {
        SweepError::Io(e)
    }
}

// Note: For the Io(E) variant's #[error("...")] message to work correctly even
// in no_std, the underlying error type `E` must implement `core::fmt::Debug`.
