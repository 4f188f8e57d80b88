//! Data packet — the named, content-bound reply.
//!
//! ```text
//! Data ─┬─ Name            (request name bytes, verbatim)
//!       ├─ MetaInfo ── FreshnessPeriod
//!       ├─ Content
//!       ├─ SignatureInfo ── SignatureType = DigestSha256
//!       └─ SignatureValue = SHA-256(Name … SignatureInfo)
//! ```
//!
//! Only the unkeyed DigestSha256 signature is produced; keyed signing and
//! trust-schema validation belong to the security layer.

use core::time::Duration;

use super::name::Name;
use super::tlv::{self, TlvError, TlvReader};

/// Build an encoded Data packet.
///
/// `name_wire` is a complete Name TLV and is copied unchanged, so the
/// Data name is byte-identical to the Interest it answers.
pub fn encode_data(name_wire: &[u8], content: &[u8], freshness: Duration) -> Vec<u8> {
    let mut signed = Vec::with_capacity(name_wire.len() + content.len() + 16);
    signed.extend_from_slice(name_wire);

    let mut meta = Vec::with_capacity(6);
    let ms = u64::try_from(freshness.as_millis()).unwrap_or(u64::MAX);
    tlv::write_nonneg_tlv(&mut meta, tlv::TLV_FRESHNESS_PERIOD, ms);
    tlv::write_tlv(&mut signed, tlv::TLV_META_INFO, &meta);

    tlv::write_tlv(&mut signed, tlv::TLV_CONTENT, content);

    let mut sig_info = Vec::with_capacity(3);
    tlv::write_nonneg_tlv(&mut sig_info, tlv::TLV_SIGNATURE_TYPE, tlv::SIGNATURE_DIGEST_SHA256);
    tlv::write_tlv(&mut signed, tlv::TLV_SIGNATURE_INFO, &sig_info);

    let digest = hmac_sha256::Hash::hash(&signed);
    tlv::write_tlv(&mut signed, tlv::TLV_SIGNATURE_VALUE, &digest);

    let mut out = Vec::with_capacity(signed.len() + 4);
    tlv::write_tlv(&mut out, tlv::TLV_DATA, &signed);
    out
}

/// A decoded Data packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    name: Name,
    name_wire: Vec<u8>,
    content_type: Option<u64>,
    freshness: Option<Duration>,
    content: Vec<u8>,
    signature_type: u64,
    signature_value: Vec<u8>,
    signed_portion: Vec<u8>,
}

impl Data {
    pub fn decode(wire: &[u8]) -> Result<Self, TlvError> {
        let outer = tlv::read_outer(wire, tlv::TLV_DATA)?;
        let mut reader = TlvReader::new(outer.value);

        if reader.is_empty() {
            return Err(TlvError::Missing(tlv::TLV_NAME));
        }
        let name_el = reader.expect(tlv::TLV_NAME)?;

        let mut content_type = None;
        let mut freshness = None;
        let mut content = Vec::new();
        let mut signature_type = None;

        loop {
            let sig_offset = reader.position();
            if reader.is_empty() {
                return Err(TlvError::Missing(tlv::TLV_SIGNATURE_VALUE));
            }
            let el = reader.read()?;
            match el.typ {
                tlv::TLV_META_INFO => {
                    let mut meta = TlvReader::new(el.value);
                    while !meta.is_empty() {
                        let m = meta.read()?;
                        match m.typ {
                            tlv::TLV_CONTENT_TYPE => {
                                content_type = Some(tlv::read_nonneg_int(m.value)?);
                            }
                            tlv::TLV_FRESHNESS_PERIOD => {
                                let ms = tlv::read_nonneg_int(m.value)?;
                                freshness = Some(Duration::from_millis(ms));
                            }
                            tlv::TLV_FINAL_BLOCK_ID => {}
                            other if tlv::is_critical(other) => {
                                return Err(TlvError::UnrecognizedCritical(other));
                            }
                            _ => {}
                        }
                    }
                }
                tlv::TLV_CONTENT => content = el.value.to_vec(),
                tlv::TLV_SIGNATURE_INFO => {
                    let mut info = TlvReader::new(el.value);
                    let typ = info.expect(tlv::TLV_SIGNATURE_TYPE)?;
                    signature_type = Some(tlv::read_nonneg_int(typ.value)?);
                }
                tlv::TLV_SIGNATURE_VALUE => {
                    if !reader.is_empty() {
                        return Err(TlvError::TrailingBytes);
                    }
                    let signature_type =
                        signature_type.ok_or(TlvError::Missing(tlv::TLV_SIGNATURE_INFO))?;
                    return Ok(Self {
                        name: Name::decode_value(name_el.value)?,
                        name_wire: name_el.wire.to_vec(),
                        content_type,
                        freshness,
                        content,
                        signature_type,
                        signature_value: el.value.to_vec(),
                        signed_portion: outer.value[..sig_offset].to_vec(),
                    });
                }
                other if tlv::is_critical(other) => {
                    return Err(TlvError::UnrecognizedCritical(other));
                }
                _ => {}
            }
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

    pub fn content_type(&self) -> Option<u64> {
        self.content_type
    }

    pub fn freshness(&self) -> Option<Duration> {
        self.freshness
    }

    pub fn signature_type(&self) -> u64 {
        self.signature_type
    }

    /// Check a DigestSha256 signature. Other signature types are not
    /// verifiable here and report `false`.
    pub fn verify_digest(&self) -> bool {
        self.signature_type == tlv::SIGNATURE_DIGEST_SHA256
            && hmac_sha256::Hash::hash(&self.signed_portion)[..] == self.signature_value[..]
    }
}
