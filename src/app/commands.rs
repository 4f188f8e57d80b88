//! Inbound commands to the light service.
//!
//! A command is derived from an Interest's ApplicationParameters. The wire
//! reserves `0xFF` to mean "query"; that sentinel is translated here and
//! never travels further into the core.

/// Parameter byte that requests a read without mutation.
pub const QUERY_SENTINEL: u8 = 0xFF;

/// Commands the light service acts upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    /// Report the current brightness without changing it.
    Query,

    /// Set the brightness. Values above the maximum saturate.
    Set(u8),
}

impl LightCommand {
    /// Interpret an Interest's parameters.
    ///
    /// Absent or empty parameters, or a first byte of [`QUERY_SENTINEL`],
    /// is a query. Otherwise the first byte is the requested level and any
    /// further bytes are ignored.
    pub fn from_parameters(params: Option<&[u8]>) -> Self {
        match params.and_then(|p| p.first()) {
            None | Some(&QUERY_SENTINEL) => Self::Query,
            Some(&level) => Self::Set(level),
        }
    }

    /// The single parameter byte a requester sends for this command.
    pub fn to_parameter(self) -> u8 {
        match self {
            Self::Query => QUERY_SENTINEL,
            Self::Set(level) => level,
        }
    }
}
