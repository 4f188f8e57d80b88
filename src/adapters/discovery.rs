//! Service discovery adapter.
//!
//! Keeps the table of services this device offers and announces it when
//! started.  The announcement goes to the log only; no discovery protocol
//! is spoken on the wire.
//!
//! Lifecycle is tied to the face: start once the prefix is registered,
//! stop on shutdown.

use log::{info, warn};

use crate::app::ports::{DiscoveryPort, ServiceRecord};
use crate::identity::DeviceIdentity;

/// Most services one device can offer.
pub const MAX_SELF_SERVICES: usize = 8;

/// Logging discovery adapter.
#[derive(Debug, Default)]
pub struct LogDiscovery {
    services: heapless::Vec<ServiceRecord, MAX_SELF_SERVICES>,
    active: bool,
}

impl LogDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether services are currently being announced.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn services(&self) -> &[ServiceRecord] {
        &self.services
    }
}

impl DiscoveryPort for LogDiscovery {
    fn add_or_update_self_service(&mut self, id: u8, advertise: bool, status: u8) {
        let record = ServiceRecord {
            id,
            advertise,
            status,
        };
        if let Some(existing) = self.services.iter_mut().find(|s| s.id == id) {
            *existing = record;
        } else if self.services.push(record).is_err() {
            warn!("SD: service table full, service {} not added", id);
        }
    }

    fn start(&mut self, identity: &DeviceIdentity) {
        if self.active {
            return;
        }
        self.active = true;
        for s in self.services.iter().filter(|s| s.advertise) {
            info!(
                "SD: advertising {}/{} status={}",
                identity.identity(),
                s.id,
                s.status
            );
        }
    }

    fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        info!("SD: stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> DeviceIdentity {
        DeviceIdentity::from_uri("/ndn-iot/bedroom/light1").unwrap()
    }

    #[test]
    fn start_stop_lifecycle() {
        let mut sd = LogDiscovery::new();
        assert!(!sd.is_active());
        sd.start(&identity());
        assert!(sd.is_active());
        sd.stop();
        assert!(!sd.is_active());
    }

    #[test]
    fn double_start_and_stop_are_idempotent() {
        let mut sd = LogDiscovery::new();
        sd.stop();
        assert!(!sd.is_active());
        sd.start(&identity());
        sd.start(&identity());
        assert!(sd.is_active());
    }

    #[test]
    fn update_replaces_existing_record() {
        let mut sd = LogDiscovery::new();
        sd.add_or_update_self_service(0, true, 0);
        sd.add_or_update_self_service(0, false, 3);
        assert_eq!(
            sd.services(),
            &[ServiceRecord {
                id: 0,
                advertise: false,
                status: 3
            }]
        );
    }

    #[test]
    fn full_table_drops_new_services() {
        let mut sd = LogDiscovery::new();
        for id in 0..=MAX_SELF_SERVICES as u8 {
            sd.add_or_update_self_service(id, true, 0);
        }
        assert_eq!(sd.services().len(), MAX_SELF_SERVICES);
    }
}
