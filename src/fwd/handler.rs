//! Interest handlers, the targets of prefix registrations.

use log::warn;

use crate::app::ports::{EventSink, LightPort};
use crate::app::service::LightService;
use crate::ndn::interest::Interest;

use super::face::DataSink;
use super::strategy::ForwardingStrategy;

/// Receives Interests under a registered prefix.
pub trait InterestHandler {
    /// Handle `interest`, putting any reply into `out`.
    fn on_interest(&mut self, interest: &Interest, out: &mut dyn DataSink) -> ForwardingStrategy;
}

/// Binds a [`LightService`] to its light actuator and event sink.
pub struct LightHandler<L, S> {
    service: LightService,
    light: L,
    sink: S,
}

impl<L: LightPort, S: EventSink> LightHandler<L, S> {
    pub fn new(service: LightService, light: L, sink: S) -> Self {
        Self {
            service,
            light,
            sink,
        }
    }

    /// Run [`LightService::start`] with the bound adapters.
    pub fn start(&mut self) {
        self.service.start(&mut self.light, &mut self.sink);
    }

    pub fn service(&self) -> &LightService {
        &self.service
    }

    pub fn light(&self) -> &L {
        &self.light
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<L: LightPort, S: EventSink> InterestHandler for LightHandler<L, S> {
    fn on_interest(&mut self, interest: &Interest, out: &mut dyn DataSink) -> ForwardingStrategy {
        let outcome = self
            .service
            .handle_interest(interest, &mut self.light, &mut self.sink);
        if let Some(response) = outcome.response {
            if let Err(e) = out.put_data(&response.encode()) {
                warn!("Reply for {} not sent: {}", response.name(), e);
            }
        }
        outcome.strategy
    }
}
