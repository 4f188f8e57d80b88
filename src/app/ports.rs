//! Port traits — the hexagonal boundary between the light service and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LightService (domain)
//! ```
//!
//! Driven adapters (light actuator, event sinks, service discovery)
//! implement these traits.  The [`LightService`](super::service::LightService)
//! consumes them via generics, so the domain core never touches hardware
//! or sockets directly.

use crate::identity::DeviceIdentity;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Light port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this when the brightness changes.
pub trait LightPort {
    /// Drive the light to `level` (0 is off, 10 is full).
    fn set_brightness(&mut self, level: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Discovery port (driven adapter: device → service discovery)
// ───────────────────────────────────────────────────────────────

/// One service this device offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceRecord {
    /// Selector byte the service is registered under.
    pub id: u8,
    /// Whether the service should be announced to peers.
    pub advertise: bool,
    /// Opaque status byte published with the record.
    pub status: u8,
}

/// Announces this device's services to the home network.
pub trait DiscoveryPort {
    /// Insert or replace the record for service `id`.
    fn add_or_update_self_service(&mut self, id: u8, advertise: bool, status: u8);

    /// Begin announcing under `identity`. Calling it again is a no-op.
    fn start(&mut self, identity: &DeviceIdentity);

    /// Stop announcing. Calling it while stopped is a no-op.
    fn stop(&mut self);
}
