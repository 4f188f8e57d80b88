//! NDN TLV primitives.
//!
//! Wire format (NDN packet format v0.3):
//! ```text
//! ┌──────────────┬────────────────┬──────────────────┐
//! │ TLV-TYPE     │ TLV-LENGTH     │ TLV-VALUE (L B)  │
//! │ VarNumber    │ VarNumber      │                  │
//! └──────────────┴────────────────┴──────────────────┘
//!
//! VarNumber: < 253        → 1 byte
//!            253 + u16 BE → 3 bytes
//!            254 + u32 BE → 5 bytes
//!            255 + u64 BE → 9 bytes
//! ```
//!
//! The reader borrows the input and never copies; every slice it hands
//! out is bounds-checked against the declared length first.

use core::fmt;

use super::name::NameError;

// ── TLV type numbers ──────────────────────────────────────────

pub const TLV_IMPLICIT_SHA256_DIGEST: u64 = 0x01;
pub const TLV_PARAMETERS_SHA256_DIGEST: u64 = 0x02;
pub const TLV_INTEREST: u64 = 0x05;
pub const TLV_DATA: u64 = 0x06;
pub const TLV_NAME: u64 = 0x07;
pub const TLV_GENERIC_NAME_COMPONENT: u64 = 0x08;
pub const TLV_NONCE: u64 = 0x0A;
pub const TLV_INTEREST_LIFETIME: u64 = 0x0C;
pub const TLV_MUST_BE_FRESH: u64 = 0x12;
pub const TLV_META_INFO: u64 = 0x14;
pub const TLV_CONTENT: u64 = 0x15;
pub const TLV_SIGNATURE_INFO: u64 = 0x16;
pub const TLV_SIGNATURE_VALUE: u64 = 0x17;
pub const TLV_CONTENT_TYPE: u64 = 0x18;
pub const TLV_FRESHNESS_PERIOD: u64 = 0x19;
pub const TLV_FINAL_BLOCK_ID: u64 = 0x1A;
pub const TLV_SIGNATURE_TYPE: u64 = 0x1B;
pub const TLV_CAN_BE_PREFIX: u64 = 0x21;
pub const TLV_HOP_LIMIT: u64 = 0x22;
pub const TLV_APPLICATION_PARAMETERS: u64 = 0x24;
pub const TLV_FORWARDING_HINT: u64 = 0x1E;
pub const TLV_INTEREST_SIGNATURE_INFO: u64 = 0x2C;
pub const TLV_INTEREST_SIGNATURE_VALUE: u64 = 0x2E;

/// SignatureType value for an unkeyed SHA-256 digest.
pub const SIGNATURE_DIGEST_SHA256: u64 = 0;

/// Largest packet a face is expected to carry.
pub const MAX_NDN_PACKET_SIZE: usize = 8800;

// ── Errors ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlvError {
    /// Input ended inside a TLV header or value.
    Truncated,
    /// Declared length does not fit the platform's address space.
    LengthOverflow,
    /// A specific element was required here.
    UnexpectedType { expected: u64, found: u64 },
    /// An unknown element whose type marks it as critical.
    UnrecognizedCritical(u64),
    /// NonNegativeInteger value was not 1, 2, 4 or 8 bytes.
    InvalidNonNegInt(usize),
    /// A fixed-size element (Nonce, HopLimit) had the wrong length.
    BadLength(u64),
    /// A mandatory element was absent.
    Missing(u64),
    /// Bytes left over after the outermost element.
    TrailingBytes,
    /// A name component violated the name model's bounds.
    Name(NameError),
}

impl fmt::Display for TlvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated TLV"),
            Self::LengthOverflow => write!(f, "TLV length overflow"),
            Self::UnexpectedType { expected, found } => {
                write!(f, "expected TLV type {expected:#x}, found {found:#x}")
            }
            Self::UnrecognizedCritical(t) => write!(f, "unrecognized critical element {t:#x}"),
            Self::InvalidNonNegInt(len) => write!(f, "invalid NonNegativeInteger length {len}"),
            Self::BadLength(t) => write!(f, "element {t:#x} has the wrong length"),
            Self::Missing(t) => write!(f, "missing element {t:#x}"),
            Self::TrailingBytes => write!(f, "trailing bytes after packet"),
            Self::Name(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TlvError {}

impl From<NameError> for TlvError {
    fn from(e: NameError) -> Self {
        Self::Name(e)
    }
}

/// Evolvability rule: unknown types `<= 31` or odd must not be ignored.
pub fn is_critical(typ: u64) -> bool {
    typ <= 31 || typ & 1 == 1
}

// ── VarNumber ─────────────────────────────────────────────────

/// Decode a VarNumber from the start of `buf`.
/// Returns the value and the number of bytes consumed.
pub fn read_var_number(buf: &[u8]) -> Result<(u64, usize), TlvError> {
    let first = *buf.first().ok_or(TlvError::Truncated)?;
    let width = match first {
        0..=252 => return Ok((u64::from(first), 1)),
        253 => 2,
        254 => 4,
        255 => 8,
    };
    let bytes = buf.get(1..=width).ok_or(TlvError::Truncated)?;
    let value = bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    Ok((value, 1 + width))
}

/// Append the shortest VarNumber encoding of `n`.
pub fn write_var_number(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=252 => out.push(n as u8),
        253..=0xFFFF => {
            out.push(253);
            out.extend_from_slice(&(n as u16).to_be_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.push(254);
            out.extend_from_slice(&(n as u32).to_be_bytes());
        }
        _ => {
            out.push(255);
            out.extend_from_slice(&n.to_be_bytes());
        }
    }
}

// ── NonNegativeInteger ────────────────────────────────────────

pub fn read_nonneg_int(value: &[u8]) -> Result<u64, TlvError> {
    match value.len() {
        1 | 2 | 4 | 8 => Ok(value.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))),
        len => Err(TlvError::InvalidNonNegInt(len)),
    }
}

/// Append a complete TLV whose value is the shortest NonNegativeInteger for `n`.
pub fn write_nonneg_tlv(out: &mut Vec<u8>, typ: u64, n: u64) {
    if let Ok(v) = u8::try_from(n) {
        write_tlv(out, typ, &[v]);
    } else if let Ok(v) = u16::try_from(n) {
        write_tlv(out, typ, &v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(n) {
        write_tlv(out, typ, &v.to_be_bytes());
    } else {
        write_tlv(out, typ, &n.to_be_bytes());
    }
}

// ── Writer ────────────────────────────────────────────────────

/// Append `typ`, `value.len()` and `value`.
pub fn write_tlv(out: &mut Vec<u8>, typ: u64, value: &[u8]) {
    write_var_number(out, typ);
    write_var_number(out, value.len() as u64);
    out.extend_from_slice(value);
}

// ── Reader ────────────────────────────────────────────────────

/// One decoded element, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    pub typ: u64,
    pub value: &'a [u8],
    /// The full element: type, length and value bytes.
    pub wire: &'a [u8],
}

/// Sequential reader over a run of sibling TLV elements.
pub struct TlvReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> TlvReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Byte offset of the next element.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Type of the next element without consuming it.
    pub fn peek_type(&self) -> Result<Option<u64>, TlvError> {
        if self.is_empty() {
            return Ok(None);
        }
        read_var_number(&self.buf[self.pos..]).map(|(t, _)| Some(t))
    }

    /// Read the next element.
    pub fn read(&mut self) -> Result<Element<'a>, TlvError> {
        let start = self.pos;
        let rest = &self.buf[start..];
        let (typ, t_len) = read_var_number(rest)?;
        let (len, l_len) = read_var_number(&rest[t_len..])?;
        let len = usize::try_from(len).map_err(|_| TlvError::LengthOverflow)?;

        let value_start = start + t_len + l_len;
        let value_end = value_start.checked_add(len).ok_or(TlvError::LengthOverflow)?;
        if value_end > self.buf.len() {
            return Err(TlvError::Truncated);
        }

        self.pos = value_end;
        Ok(Element {
            typ,
            value: &self.buf[value_start..value_end],
            wire: &self.buf[start..value_end],
        })
    }

    /// Read the next element and require it to be of type `typ`.
    pub fn expect(&mut self, typ: u64) -> Result<Element<'a>, TlvError> {
        let el = self.read()?;
        if el.typ != typ {
            return Err(TlvError::UnexpectedType {
                expected: typ,
                found: el.typ,
            });
        }
        Ok(el)
    }
}

/// Read exactly one outer element of type `typ` spanning all of `buf`.
pub fn read_outer(buf: &[u8], typ: u64) -> Result<Element<'_>, TlvError> {
    let mut reader = TlvReader::new(buf);
    let el = reader.expect(typ)?;
    if !reader.is_empty() {
        return Err(TlvError::TrailingBytes);
    }
    Ok(el)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(n: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_var_number(&mut out, n);
        out
    }

    #[test]
    fn var_number_width_boundaries() {
        assert_eq!(var(252), vec![252]);
        assert_eq!(var(253), vec![253, 0x00, 0xFD]);
        assert_eq!(var(0xFFFF), vec![253, 0xFF, 0xFF]);
        assert_eq!(var(0x1_0000), vec![254, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(var(0x1_0000_0000).len(), 9);
    }

    #[test]
    fn var_number_reads_back_with_consumed_length() {
        for n in [0, 1, 252, 253, 1000, 0xFFFF, 0x1_0000, u64::MAX] {
            let bytes = var(n);
            assert_eq!(read_var_number(&bytes), Ok((n, bytes.len())));
        }
    }

    #[test]
    fn truncated_var_number_is_error() {
        assert_eq!(read_var_number(&[]), Err(TlvError::Truncated));
        assert_eq!(read_var_number(&[253, 0x01]), Err(TlvError::Truncated));
        assert_eq!(read_var_number(&[255, 0, 0, 0]), Err(TlvError::Truncated));
    }

    #[test]
    fn reader_walks_siblings_and_keeps_wire() {
        let mut buf = Vec::new();
        write_tlv(&mut buf, 0x08, b"ab");
        write_tlv(&mut buf, 0x02, &[9; 3]);

        let mut r = TlvReader::new(&buf);
        assert_eq!(r.peek_type(), Ok(Some(0x08)));
        let a = r.read().unwrap();
        assert_eq!(a.value, b"ab");
        assert_eq!(a.wire, &buf[..4]);
        let b = r.expect(0x02).unwrap();
        assert_eq!(b.value, &[9, 9, 9]);
        assert!(r.is_empty());
        assert_eq!(r.peek_type(), Ok(None));
    }

    #[test]
    fn declared_length_past_end_is_truncated() {
        let buf = [0x08, 0x05, b'a'];
        assert_eq!(TlvReader::new(&buf).read(), Err(TlvError::Truncated));
    }

    #[test]
    fn expect_reports_found_type() {
        let buf = [0x06, 0x00];
        assert_eq!(
            TlvReader::new(&buf).expect(TLV_INTEREST),
            Err(TlvError::UnexpectedType {
                expected: TLV_INTEREST,
                found: TLV_DATA
            })
        );
    }

    #[test]
    fn read_outer_rejects_trailing_bytes() {
        let buf = [0x05, 0x00, 0x00];
        assert_eq!(read_outer(&buf, TLV_INTEREST), Err(TlvError::TrailingBytes));
    }

    #[test]
    fn nonneg_int_uses_shortest_width() {
        let mut out = Vec::new();
        write_nonneg_tlv(&mut out, TLV_FRESHNESS_PERIOD, 1000);
        assert_eq!(out, vec![0x19, 0x02, 0x03, 0xE8]);
        assert_eq!(read_nonneg_int(&out[2..]), Ok(1000));
        assert_eq!(read_nonneg_int(&[1, 2, 3]), Err(TlvError::InvalidNonNegInt(3)));
    }

    #[test]
    fn critical_rule() {
        assert!(is_critical(0x05));
        assert!(is_critical(33));
        assert!(!is_critical(32));
        assert!(!is_critical(TLV_APPLICATION_PARAMETERS));
    }
}
