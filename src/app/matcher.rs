//! Decides whether an Interest is addressed to this service instance.
//!
//! Command names are laid out as
//!
//! ```text
//!   /<c0>/<c1>/<locator-prefix…>/<selector>[/params-sha256=…]
//!    └──┬───┘  └──────┬───────┘  └───┬───┘ └───────┬───────┘
//!   not checked  compared with     1 byte    ignored for
//!                our locator       == ours   matching
//! ```
//!
//! The locator part may be any leading run of the device's locator, so a
//! command for `/bedroom` reaches every light in the bedroom.  All index
//! arithmetic is bounds-checked before any comparison is made; a hostile
//! name can only produce a [`Rejection`], never a panic.

use core::fmt;

use crate::ndn::name::{ComponentType, Name, compare_subrange};
use crate::ndn::tlv::TlvError;

/// Leading components that precede the locator and are not compared.
const SKIPPED_LEADING: usize = 2;

/// Why an Interest was declined. Every variant is silent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The packet could not be decoded.
    Malformed(TlvError),
    /// Not enough components to carry a selector and a locator.
    TooShort,
    /// Selector component is not exactly our one-byte selector.
    SelectorMismatch,
    /// Locator part is longer than our locator.
    NameTooLong,
    /// Locator part differs from our locator.
    LocatorMismatch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(e) => write!(f, "malformed interest: {e}"),
            Self::TooShort => write!(f, "name too short"),
            Self::SelectorMismatch => write!(f, "selector mismatch"),
            Self::NameTooLong => write!(f, "name too long for locator"),
            Self::LocatorMismatch => write!(f, "locator mismatch"),
        }
    }
}

/// Shape of an accepted request name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Component count once a trailing parameters digest is set aside.
    pub effective_len: usize,
    /// Whether a trailing ParametersSha256Digest was present.
    pub has_digest: bool,
    /// How many locator components the request named.
    pub locator_depth: usize,
}

/// Matches request names against one registered selector and locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMatcher {
    selector: u8,
    locator: Name,
}

impl RequestMatcher {
    pub fn new(selector: u8, locator: Name) -> Self {
        Self { selector, locator }
    }

    pub fn selector(&self) -> u8 {
        self.selector
    }

    pub fn locator(&self) -> &Name {
        &self.locator
    }

    /// Check `name` against the selector and locator.
    pub fn check(&self, name: &Name) -> Result<Match, Rejection> {
        let has_digest = name
            .last()
            .is_some_and(|c| c.kind() == ComponentType::ParametersSha256Digest);
        let effective_len = if has_digest { name.len() - 1 } else { name.len() };

        let Some(selector) = effective_len.checked_sub(1).and_then(|i| name.get(i)) else {
            return Err(Rejection::TooShort);
        };
        if !matches!(selector.value(), [b] if *b == self.selector) {
            return Err(Rejection::SelectorMismatch);
        }

        // Components between the skipped head and the selector.
        let Some(locator_depth) = effective_len.checked_sub(SKIPPED_LEADING + 1) else {
            return Err(Rejection::TooShort);
        };
        if locator_depth > self.locator.len() {
            return Err(Rejection::NameTooLong);
        }
        if !compare_subrange(
            &self.locator,
            0,
            locator_depth,
            name,
            SKIPPED_LEADING,
            effective_len - 1,
        ) {
            return Err(Rejection::LocatorMismatch);
        }

        Ok(Match {
            effective_len,
            has_digest,
            locator_depth,
        })
    }
}
