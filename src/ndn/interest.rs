//! Interest packet — the request side of the exchange.
//!
//! Decoding keeps the raw Name TLV bytes next to the parsed [`Name`]:
//! a reply must carry a name byte-identical to the request, and
//! re-encoding would normalise any non-minimal length encodings the
//! requester used.

use core::time::Duration;

use super::name::{Component, ComponentType, Name, NameError};
use super::tlv::{self, TlvError, TlvReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    name: Name,
    name_wire: Vec<u8>,
    can_be_prefix: bool,
    must_be_fresh: bool,
    nonce: Option<u32>,
    lifetime: Option<Duration>,
    hop_limit: Option<u8>,
    app_parameters: Option<Vec<u8>>,
}

/// SHA-256 over the ApplicationParameters element, as carried in the
/// name's ParametersSha256Digest component.
pub fn parameters_digest(params: &[u8]) -> [u8; 32] {
    let mut element = Vec::with_capacity(params.len() + 4);
    tlv::write_tlv(&mut element, tlv::TLV_APPLICATION_PARAMETERS, params);
    hmac_sha256::Hash::hash(&element)
}

impl Interest {
    pub fn new(name: Name) -> Self {
        let name_wire = name.encode();
        Self {
            name,
            name_wire,
            can_be_prefix: false,
            must_be_fresh: false,
            nonce: None,
            lifetime: None,
            hop_limit: None,
            app_parameters: None,
        }
    }

    // ── Builder ───────────────────────────────────────────────

    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    pub fn with_must_be_fresh(mut self, must_be_fresh: bool) -> Self {
        self.must_be_fresh = must_be_fresh;
        self
    }

    pub fn with_can_be_prefix(mut self, can_be_prefix: bool) -> Self {
        self.can_be_prefix = can_be_prefix;
        self
    }

    pub fn with_hop_limit(mut self, hop_limit: u8) -> Self {
        self.hop_limit = Some(hop_limit);
        self
    }

    /// Attach parameters and append (or replace) the trailing
    /// ParametersSha256Digest component.
    pub fn with_app_parameters(mut self, params: Vec<u8>) -> Result<Self, NameError> {
        let digest = parameters_digest(&params);
        let keep = match self.name.last() {
            Some(c) if c.kind() == ComponentType::ParametersSha256Digest => self.name.len() - 1,
            _ => self.name.len(),
        };
        self.name = self
            .name
            .sub_name(0, keep)
            .append(Component::parameters_digest(&digest))?;
        self.name_wire = self.name.encode();
        self.app_parameters = Some(params);
        Ok(self)
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The Name TLV exactly as received (or as encoded, for built Interests).
    pub fn name_wire(&self) -> &[u8] {
        &self.name_wire
    }

    pub fn app_parameters(&self) -> Option<&[u8]> {
        self.app_parameters.as_deref()
    }

    pub fn can_be_prefix(&self) -> bool {
        self.can_be_prefix
    }

    pub fn must_be_fresh(&self) -> bool {
        self.must_be_fresh
    }

    pub fn nonce(&self) -> Option<u32> {
        self.nonce
    }

    pub fn lifetime(&self) -> Option<Duration> {
        self.lifetime
    }

    pub fn hop_limit(&self) -> Option<u8> {
        self.hop_limit
    }

    // ── TLV ───────────────────────────────────────────────────

    pub fn encode(&self) -> Vec<u8> {
        let mut value = Vec::with_capacity(self.name_wire.len() + 32);
        value.extend_from_slice(&self.name_wire);
        if self.can_be_prefix {
            tlv::write_tlv(&mut value, tlv::TLV_CAN_BE_PREFIX, &[]);
        }
        if self.must_be_fresh {
            tlv::write_tlv(&mut value, tlv::TLV_MUST_BE_FRESH, &[]);
        }
        if let Some(nonce) = self.nonce {
            tlv::write_tlv(&mut value, tlv::TLV_NONCE, &nonce.to_be_bytes());
        }
        if let Some(lifetime) = self.lifetime {
            let ms = u64::try_from(lifetime.as_millis()).unwrap_or(u64::MAX);
            tlv::write_nonneg_tlv(&mut value, tlv::TLV_INTEREST_LIFETIME, ms);
        }
        if let Some(hop_limit) = self.hop_limit {
            tlv::write_tlv(&mut value, tlv::TLV_HOP_LIMIT, &[hop_limit]);
        }
        if let Some(params) = &self.app_parameters {
            tlv::write_tlv(&mut value, tlv::TLV_APPLICATION_PARAMETERS, params);
        }

        let mut out = Vec::with_capacity(value.len() + 4);
        tlv::write_tlv(&mut out, tlv::TLV_INTEREST, &value);
        out
    }

    /// Decode a complete Interest packet.
    ///
    /// Unknown non-critical elements are skipped; unknown critical ones
    /// reject the packet. Signature elements are accepted but not verified.
    pub fn decode(wire: &[u8]) -> Result<Self, TlvError> {
        let outer = tlv::read_outer(wire, tlv::TLV_INTEREST)?;
        let mut reader = TlvReader::new(outer.value);

        if reader.is_empty() {
            return Err(TlvError::Missing(tlv::TLV_NAME));
        }
        let name_el = reader.expect(tlv::TLV_NAME)?;
        let mut interest = Self {
            name: Name::decode_value(name_el.value)?,
            name_wire: name_el.wire.to_vec(),
            can_be_prefix: false,
            must_be_fresh: false,
            nonce: None,
            lifetime: None,
            hop_limit: None,
            app_parameters: None,
        };

        while !reader.is_empty() {
            let el = reader.read()?;
            match el.typ {
                tlv::TLV_CAN_BE_PREFIX => interest.can_be_prefix = true,
                tlv::TLV_MUST_BE_FRESH => interest.must_be_fresh = true,
                tlv::TLV_NONCE => {
                    let bytes: [u8; 4] = el
                        .value
                        .try_into()
                        .map_err(|_| TlvError::BadLength(tlv::TLV_NONCE))?;
                    interest.nonce = Some(u32::from_be_bytes(bytes));
                }
                tlv::TLV_INTEREST_LIFETIME => {
                    let ms = tlv::read_nonneg_int(el.value)?;
                    interest.lifetime = Some(Duration::from_millis(ms));
                }
                tlv::TLV_HOP_LIMIT => match el.value {
                    [h] => interest.hop_limit = Some(*h),
                    _ => return Err(TlvError::BadLength(tlv::TLV_HOP_LIMIT)),
                },
                tlv::TLV_APPLICATION_PARAMETERS => {
                    interest.app_parameters = Some(el.value.to_vec());
                }
                tlv::TLV_FORWARDING_HINT
                | tlv::TLV_INTEREST_SIGNATURE_INFO
                | tlv::TLV_INTEREST_SIGNATURE_VALUE => {}
                other if tlv::is_critical(other) => {
                    return Err(TlvError::UnrecognizedCritical(other));
                }
                _ => {}
            }
        }

        Ok(interest)
    }
}
