// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod error;
pub mod hal_traits;
pub mod message;
pub mod timing;
pub mod types;

// --- Re-export key types/traits for easier access ---

// From error.rs
pub use error::SweepError;

// From hal_traits.rs
pub use hal_traits::{InputLine, OutputLine, SweepDisplay, SweepInstant, SweepSerial, SweepTimer};

// From message.rs
pub use message::{parse_host_line, DeviceMessage, HostMessage};

// From types.rs
pub use types::{DistanceSample, StepCounter, SweepDirection};

// From timing.rs (constants - users access via common::timing::*)
// No re-exports by default.

// --- Feature-gated re-exports ---

// embedded-hal pin adapters (from hal_traits.rs)
#[cfg(feature = "embedded-hal")]
pub use hal_traits::{HalInputPin, HalOutputPin};
