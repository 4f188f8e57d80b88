//! Application service — the hexagonal core.
//!
//! [`LightService`] owns the request matcher and the command dispatcher
//! (and with it the brightness level).  It exposes a clean,
//! transport-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!   Interest ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                │         LightService          │
//!  LightPort ◀── │ match · dispatch · compose    │ ──▶ Outcome
//!                └──────────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::DeviceConfig;
use crate::fwd::strategy::ForwardingStrategy;
use crate::identity::DeviceIdentity;
use crate::ndn::interest::Interest;
use crate::ndn::name::Name;

use super::commands::LightCommand;
use super::dispatcher::CommandDispatcher;
use super::events::AppEvent;
use super::matcher::{Rejection, RequestMatcher};
use super::ports::{EventSink, LightPort};
use super::response::{DEFAULT_FRESHNESS, LightResponse};

// ───────────────────────────────────────────────────────────────
// Outcome
// ───────────────────────────────────────────────────────────────

/// Result of handling one Interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// What the forwarder should do with the Interest next.
    pub strategy: ForwardingStrategy,
    /// The reply, present only when the Interest was accepted.
    pub response: Option<LightResponse>,
}

impl Outcome {
    fn declined() -> Self {
        Self {
            strategy: ForwardingStrategy::Suppress,
            response: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.response.is_some()
    }
}

// ───────────────────────────────────────────────────────────────
// LightService
// ───────────────────────────────────────────────────────────────

/// The light service orchestrates all domain logic.
pub struct LightService {
    identity: DeviceIdentity,
    matcher: RequestMatcher,
    dispatcher: CommandDispatcher,
    accepted_count: u64,
    rejected_count: u64,
}

impl LightService {
    /// Construct the service for `identity`, registered under
    /// `config.service_id`.
    pub fn new(identity: DeviceIdentity, config: &DeviceConfig) -> Self {
        let matcher = RequestMatcher::new(config.service_id, identity.locator().clone());
        Self {
            identity,
            matcher,
            dispatcher: CommandDispatcher::new(),
            accepted_count: 0,
            rejected_count: 0,
        }
    }

    /// Validate `config`, parse `identity_uri` and build the service.
    pub fn from_config(identity_uri: &str, config: &DeviceConfig) -> crate::error::Result<Self> {
        config.validate()?;
        let identity = DeviceIdentity::from_uri(identity_uri)?;
        Ok(Self::new(identity, config))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the light to its initial level and announce the service.
    pub fn start(&mut self, hw: &mut impl LightPort, sink: &mut impl EventSink) {
        let level = self.dispatcher.level();
        hw.set_brightness(level);
        sink.emit(&AppEvent::Started { level });
        info!(
            "LightService started for {} under {}",
            self.identity.identity(),
            self.registered_prefix()
        );
    }

    // ── Request handling ──────────────────────────────────────

    /// Decode `wire` as an Interest and handle it.
    ///
    /// An undecodable packet is declined like any foreign request.
    pub fn handle_wire(
        &mut self,
        wire: &[u8],
        hw: &mut impl LightPort,
        sink: &mut impl EventSink,
    ) -> Outcome {
        match Interest::decode(wire) {
            Ok(interest) => self.handle_interest(&interest, hw, sink),
            Err(e) => self.decline(Rejection::Malformed(e), sink),
        }
    }

    /// Match, dispatch and compose the reply for one Interest.
    pub fn handle_interest(
        &mut self,
        interest: &Interest,
        hw: &mut impl LightPort,
        sink: &mut impl EventSink,
    ) -> Outcome {
        if let Err(reason) = self.matcher.check(interest.name()) {
            debug!("Declined {}: {}", interest.name(), reason);
            return self.decline(reason, sink);
        }

        let cmd = LightCommand::from_parameters(interest.app_parameters());
        let before = self.dispatcher.level();
        let level = self.dispatcher.apply(cmd, sink);
        if level != before {
            hw.set_brightness(level);
        }

        self.accepted_count += 1;
        debug!("Accepted {} ({:?}) -> level {}", interest.name(), cmd, level);

        Outcome {
            strategy: ForwardingStrategy::Suppress,
            response: Some(LightResponse::compose(interest, level, DEFAULT_FRESHNESS)),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Name to register with the forwarder: home prefix plus selector.
    pub fn registered_prefix(&self) -> Name {
        self.identity.registered_prefix(self.matcher.selector())
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn service_id(&self) -> u8 {
        self.matcher.selector()
    }

    /// Current brightness level.
    pub fn brightness(&self) -> u8 {
        self.dispatcher.level()
    }

    /// Interests accepted since startup.
    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    /// Interests declined since startup.
    pub fn rejected_count(&self) -> u64 {
        self.rejected_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn decline(&mut self, reason: Rejection, sink: &mut impl EventSink) -> Outcome {
        self.rejected_count += 1;
        sink.emit(&AppEvent::Rejected(reason));
        Outcome::declined()
    }
}
