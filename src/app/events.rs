//! Outbound application events.
//!
//! The [`LightService`](super::service::LightService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; none of them feed back into the
//! brightness state.

use super::matcher::Rejection;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service is registered and serving (carries initial level).
    Started { level: u8 },

    /// Brightness went from zero to a positive value.
    SwitchedOn,

    /// Brightness went from a positive value to zero.
    SwitchedOff,

    /// Brightness was set to a value below the maximum.
    BrightnessSet(u8),

    /// The requested level reached the maximum and was clamped to it.
    Saturated { requested: u8, level: u8 },

    /// The current level was read without modification.
    Queried(u8),

    /// An Interest was not for this service and was declined silently.
    Rejected(Rejection),
}
