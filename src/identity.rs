//! Device identity and the locator derived from it.
//!
//! The identity is supplied once at startup (e.g. `/ndn-iot/bedroom/light1`)
//! and never changes afterwards:
//!
//! ```text
//!   identity     /ndn-iot/bedroom/light1
//!   home prefix  /ndn-iot
//!   locator               /bedroom/light1
//! ```
//!
//! The home prefix is used for prefix registration; the locator is what
//! incoming commands are checked against.

use log::warn;

use crate::error::ConfigError;
use crate::ndn::name::{Component, Name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    identity: Name,
    home_prefix: Name,
    locator: Name,
}

impl DeviceIdentity {
    /// Derive home prefix and locator from a non-empty identity.
    ///
    /// A one-component identity gives an empty locator. That is legal, but
    /// only commands addressed to the whole home can match it.
    pub fn new(identity: Name) -> Result<Self, ConfigError> {
        if identity.is_empty() {
            return Err(ConfigError::EmptyIdentity);
        }
        let home_prefix = identity.sub_name(0, 1);
        let locator = identity.sub_name(1, identity.len());
        if locator.is_empty() {
            warn!(
                "Identity {} has no locator; only home-wide commands will match",
                identity
            );
        }
        Ok(Self {
            identity,
            home_prefix,
            locator,
        })
    }

    /// Parse an identity URI such as `/ndn-iot/bedroom/light1`.
    pub fn from_uri(uri: &str) -> Result<Self, ConfigError> {
        let identity: Name = uri.parse().map_err(ConfigError::InvalidIdentity)?;
        Self::new(identity)
    }

    pub fn identity(&self) -> &Name {
        &self.identity
    }

    pub fn home_prefix(&self) -> &Name {
        &self.home_prefix
    }

    pub fn locator(&self) -> &Name {
        &self.locator
    }

    /// Registration name for a service: home prefix plus one selector byte.
    pub fn registered_prefix(&self, selector: u8) -> Name {
        let mut prefix = self.home_prefix.clone();
        // A one-component home prefix always has room for the selector.
        let _ = prefix.push(Component::from_byte(selector));
        prefix
    }
}
