//! Name model — typed, ordered name components.
//!
//! A [`Name`] is a fixed-capacity sequence of [`Component`]s.  Each
//! component is a `(type, bytes)` pair; two components are equal only when
//! both the type and the value match, so a one-byte generic component
//! `0x00` never equals a typed component with the same byte.
//!
//! ```text
//!   /ndn-iot/bedroom/light1/%00/params-sha256=…
//!    └──────┘└──────┘└─────┘└─┘└──────────────┘
//!    Generic Generic Generic Gen ParametersSha256Digest
//! ```
//!
//! Capacity is bounded ([`MAX_NAME_COMPONENTS`], [`MAX_COMPONENT_LEN`]) so
//! a hostile packet cannot grow a name without limit; overflow is a
//! [`NameError`], never a truncation.

use core::fmt;
use core::str::FromStr;

use super::tlv::{self, TlvError, TlvReader};

/// Maximum number of components in a name.
pub const MAX_NAME_COMPONENTS: usize = 16;

/// Maximum length of a single component value in bytes.
pub const MAX_COMPONENT_LEN: usize = 64;

/// Length of both SHA-256 digest component types.
pub const DIGEST_LEN: usize = 32;

// ── Errors ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// More than [`MAX_NAME_COMPONENTS`] components.
    TooManyComponents,
    /// A component value exceeds [`MAX_COMPONENT_LEN`].
    ComponentTooLong,
    /// Component TLV-TYPE outside `1..=65535`.
    InvalidComponentType(u64),
    /// A digest component whose value is not 32 bytes.
    InvalidDigest,
    /// A malformed `%XX` escape in a URI.
    InvalidEscape,
    /// The URI is structurally invalid.
    InvalidUri(&'static str),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyComponents => {
                write!(f, "name exceeds {MAX_NAME_COMPONENTS} components")
            }
            Self::ComponentTooLong => {
                write!(f, "component exceeds {MAX_COMPONENT_LEN} bytes")
            }
            Self::InvalidComponentType(t) => write!(f, "invalid component type {t}"),
            Self::InvalidDigest => write!(f, "digest component must be {DIGEST_LEN} bytes"),
            Self::InvalidEscape => write!(f, "invalid percent escape"),
            Self::InvalidUri(msg) => write!(f, "invalid name URI: {msg}"),
        }
    }
}

impl std::error::Error for NameError {}

// ── ComponentType ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Implicit digest of a whole Data packet (TLV 1).
    ImplicitSha256Digest,
    /// Digest of an Interest's parameters, appended by the requester (TLV 2).
    ParametersSha256Digest,
    /// Plain byte component (TLV 8).
    Generic,
    /// Any other typed component (keyword, segment, version, …).
    Other(u64),
}

impl ComponentType {
    pub const fn from_tlv(typ: u64) -> Self {
        match typ {
            tlv::TLV_IMPLICIT_SHA256_DIGEST => Self::ImplicitSha256Digest,
            tlv::TLV_PARAMETERS_SHA256_DIGEST => Self::ParametersSha256Digest,
            tlv::TLV_GENERIC_NAME_COMPONENT => Self::Generic,
            other => Self::Other(other),
        }
    }

    pub const fn tlv_type(self) -> u64 {
        match self {
            Self::ImplicitSha256Digest => tlv::TLV_IMPLICIT_SHA256_DIGEST,
            Self::ParametersSha256Digest => tlv::TLV_PARAMETERS_SHA256_DIGEST,
            Self::Generic => tlv::TLV_GENERIC_NAME_COMPONENT,
            Self::Other(t) => t,
        }
    }

    pub const fn is_digest(self) -> bool {
        matches!(
            self,
            Self::ImplicitSha256Digest | Self::ParametersSha256Digest
        )
    }
}

// ── Component ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    kind: ComponentType,
    value: heapless::Vec<u8, MAX_COMPONENT_LEN>,
}

impl Component {
    pub fn new(kind: ComponentType, value: &[u8]) -> Result<Self, NameError> {
        let typ = kind.tlv_type();
        if typ == 0 || typ > 0xFFFF {
            return Err(NameError::InvalidComponentType(typ));
        }
        let kind = ComponentType::from_tlv(typ);
        if kind.is_digest() && value.len() != DIGEST_LEN {
            return Err(NameError::InvalidDigest);
        }
        let value = heapless::Vec::from_slice(value).map_err(|_| NameError::ComponentTooLong)?;
        Ok(Self { kind, value })
    }

    /// A generic component holding `value`.
    pub fn generic(value: &[u8]) -> Result<Self, NameError> {
        Self::new(ComponentType::Generic, value)
    }

    /// A one-byte generic component, as used for service and function selectors.
    pub fn from_byte(byte: u8) -> Self {
        let mut value = heapless::Vec::new();
        // Capacity is far above one byte.
        let _ = value.push(byte);
        Self {
            kind: ComponentType::Generic,
            value,
        }
    }

    pub fn parameters_digest(digest: &[u8; DIGEST_LEN]) -> Self {
        Self {
            kind: ComponentType::ParametersSha256Digest,
            value: heapless::Vec::from_slice(digest).unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> ComponentType {
        self.kind
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        tlv::write_tlv(out, self.kind.tlv_type(), &self.value);
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ComponentType::ImplicitSha256Digest => {
                write!(f, "sha256digest={}", hex::encode(&self.value))
            }
            ComponentType::ParametersSha256Digest => {
                write!(f, "params-sha256={}", hex::encode(&self.value))
            }
            ComponentType::Generic => write_escaped(f, &self.value),
            ComponentType::Other(t) => {
                write!(f, "{t}=")?;
                write_escaped(f, &self.value)
            }
        }
    }
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &[u8]) -> fmt::Result {
    // Values made only of periods gain three extra so they survive parsing.
    if value.iter().all(|b| *b == b'.') {
        for _ in 0..value.len() + 3 {
            f.write_str(".")?;
        }
        return Ok(());
    }
    for &b in value {
        if is_unreserved(b) {
            write!(f, "{}", b as char)?;
        } else {
            write!(f, "%{b:02X}")?;
        }
    }
    Ok(())
}

fn unescape(segment: &str) -> Result<heapless::Vec<u8, MAX_COMPONENT_LEN>, NameError> {
    let mut out = heapless::Vec::new();
    let bytes = segment.as_bytes();

    if bytes.len() >= 3 && bytes.iter().all(|b| *b == b'.') {
        for _ in 0..bytes.len() - 3 {
            out.push(b'.').map_err(|_| NameError::ComponentTooLong)?;
        }
        return Ok(out);
    }

    let mut i = 0;
    while i < bytes.len() {
        let b = if bytes[i] == b'%' {
            let hex = segment.get(i + 1..i + 3).ok_or(NameError::InvalidEscape)?;
            i += 3;
            if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
                return Err(NameError::InvalidEscape);
            }
            u8::from_str_radix(hex, 16).map_err(|_| NameError::InvalidEscape)?
        } else {
            i += 1;
            bytes[i - 1]
        };
        out.push(b).map_err(|_| NameError::ComponentTooLong)?;
    }
    Ok(out)
}

impl FromStr for Component {
    type Err = NameError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        if let Some((prefix, rest)) = segment.split_once('=') {
            match prefix {
                "sha256digest" | "params-sha256" => {
                    let digest = hex::decode(rest).map_err(|_| NameError::InvalidDigest)?;
                    let kind = if prefix == "sha256digest" {
                        ComponentType::ImplicitSha256Digest
                    } else {
                        ComponentType::ParametersSha256Digest
                    };
                    return Self::new(kind, &digest);
                }
                _ if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
                    let typ: u64 = prefix
                        .parse()
                        .map_err(|_| NameError::InvalidUri("component type out of range"))?;
                    return Self::new(ComponentType::from_tlv(typ), &unescape(rest)?);
                }
                _ => {}
            }
        }
        Ok(Self {
            kind: ComponentType::Generic,
            value: unescape(segment)?,
        })
    }
}

// ── Name ──────────────────────────────────────────────────────

/// An ordered sequence of typed components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    components: heapless::Vec<Component, MAX_NAME_COMPONENTS>,
}

impl Name {
    /// The empty name (`/`).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components<I>(components: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = Component>,
    {
        let mut name = Self::new();
        for c in components {
            name.push(c)?;
        }
        Ok(name)
    }

    /// Append a component in place.
    pub fn push(&mut self, component: Component) -> Result<(), NameError> {
        self.components
            .push(component)
            .map_err(|_| NameError::TooManyComponents)
    }

    /// Builder-style append.
    pub fn append(mut self, component: Component) -> Result<Self, NameError> {
        self.push(component)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    pub fn last(&self) -> Option<&Component> {
        self.components.last()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Components `[start, end)` as a new name.
    ///
    /// # Panics
    /// If the range is out of bounds.
    pub fn sub_name(&self, start: usize, end: usize) -> Self {
        Self {
            components: heapless::Vec::from_slice(&self.components[start..end])
                .unwrap_or_default(),
        }
    }

    /// Whether every component of `self` leads `other`.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.len() <= other.len() && compare_subrange(self, 0, self.len(), other, 0, self.len())
    }

    // ── TLV ───────────────────────────────────────────────────

    /// Decode a complete Name TLV (type 7) spanning all of `wire`.
    pub fn decode(wire: &[u8]) -> Result<Self, TlvError> {
        let el = tlv::read_outer(wire, tlv::TLV_NAME)?;
        Self::decode_value(el.value)
    }

    /// Decode the value of a Name TLV: a run of component TLVs.
    pub fn decode_value(value: &[u8]) -> Result<Self, TlvError> {
        let mut name = Self::new();
        let mut reader = TlvReader::new(value);
        while !reader.is_empty() {
            let el = reader.read()?;
            let component = Component::new(ComponentType::from_tlv(el.typ), el.value)?;
            name.push(component)?;
        }
        Ok(name)
    }

    /// Canonical Name TLV encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut value = Vec::new();
        for c in &self.components {
            c.encode_into(&mut value);
        }
        let mut out = Vec::with_capacity(value.len() + 4);
        tlv::write_tlv(&mut out, tlv::TLV_NAME, &value);
        out
    }
}

/// Compare two half-open component ranges.
///
/// Returns `true` iff `a[a_start..a_end]` and `b[b_start..b_end]` have the
/// same length and are element-wise equal in type and value.
///
/// # Panics
/// If either range is out of bounds for its name. Callers check the
/// component counts first; an out-of-range index is a logic error.
pub fn compare_subrange(
    a: &Name,
    a_start: usize,
    a_end: usize,
    b: &Name,
    b_start: usize,
    b_end: usize,
) -> bool {
    a.components()[a_start..a_end] == b.components()[b_start..b_end]
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("/");
        }
        for c in &self.components {
            write!(f, "/{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = NameError;

    /// Parse an NDN URI such as `/ndn-iot/bedroom/light1`.
    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let uri = uri.trim();
        let uri = uri.strip_prefix("ndn:").unwrap_or(uri);
        let path = uri
            .strip_prefix('/')
            .ok_or(NameError::InvalidUri("must start with '/'"))?;
        let path = path.strip_suffix('/').unwrap_or(path);

        let mut name = Self::new();
        if path.is_empty() {
            return Ok(name);
        }
        for segment in path.split('/') {
            if segment.is_empty() {
                return Err(NameError::InvalidUri("empty component"));
            }
            name.push(segment.parse()?)?;
        }
        Ok(name)
    }
}
