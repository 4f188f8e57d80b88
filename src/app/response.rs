//! Response composer — the Data reply to an accepted command.

use core::time::Duration;

use crate::ndn::data::encode_data;
use crate::ndn::interest::Interest;
use crate::ndn::name::Name;

/// Freshness advertised on every light response.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_millis(1000);

/// Reply carrying the post-command brightness.
///
/// The name is the request's own name, including any parameters digest,
/// and `name_wire` holds the request's Name TLV bytes as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightResponse {
    name: Name,
    name_wire: Vec<u8>,
    content: [u8; 1],
    freshness: Duration,
}

impl LightResponse {
    pub fn compose(interest: &Interest, level: u8, freshness: Duration) -> Self {
        Self {
            name: interest.name().clone(),
            name_wire: interest.name_wire().to_vec(),
            content: [level],
            freshness,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn name_wire(&self) -> &[u8] {
        &self.name_wire
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn level(&self) -> u8 {
        self.content[0]
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Encode as a DigestSha256-signed Data packet.
    pub fn encode(&self) -> Vec<u8> {
        encode_data(&self.name_wire, &self.content, self.freshness)
    }
}
