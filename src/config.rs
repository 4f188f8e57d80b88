//! Device configuration parameters
//!
//! All tunable parameters for the light device. Defaults match a device on
//! the standard NDN IoT multicast group; values can be overridden from a
//! JSON file and then from the command line.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Standard NDN IoT multicast group.
pub const DEFAULT_MULTICAST_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 23, 170);
/// Standard NDN IoT multicast port.
pub const DEFAULT_MULTICAST_PORT: u16 = 56363;

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    // --- Service ---
    /// Selector byte the light service registers under (0 = LED)
    pub service_id: u8,

    // --- Face ---
    /// IPv4 multicast group to join
    pub multicast_group: Ipv4Addr,
    /// UDP port to bind and send to
    pub multicast_port: u16,

    // --- Timing ---
    /// Forwarder poll interval (milliseconds)
    pub poll_interval_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            // Service
            service_id: 0,

            // Face
            multicast_group: DEFAULT_MULTICAST_GROUP,
            multicast_port: DEFAULT_MULTICAST_PORT,

            // Timing
            poll_interval_ms: 10, // 100 Hz
        }
    }
}

impl DeviceConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            line: e.line(),
            column: e.column(),
        })
    }

    /// Reject values the device cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.multicast_group.is_multicast() {
            return Err(ConfigError::ValidationFailed(
                "multicast_group must be an IPv4 multicast address",
            ));
        }
        if self.multicast_port == 0 {
            return Err(ConfigError::ValidationFailed("multicast_port must be non-zero"));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 1000 {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be in 1..=1000",
            ));
        }
        Ok(())
    }
}
