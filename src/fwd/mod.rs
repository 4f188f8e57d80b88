//! Single-face forwarder.
//!
//! ```text
//!   Face ──recv──▶ Forwarder ──prefix match──▶ InterestHandler
//!    ▲                                              │
//!    └──────────────── put_data ◀───────────────────┘
//! ```
//!
//! The forwarder owns one [`Face`] and a list of prefix registrations.
//! It does not route Interests outward or keep pending-interest state:
//! every Interest either reaches a local handler or is dropped.

pub mod face;
pub mod handler;
pub mod strategy;

use log::{debug, info};

use crate::error::FaceError;
use crate::ndn::interest::Interest;
use crate::ndn::name::Name;
use crate::ndn::tlv::{self, TlvReader};

pub use face::{DataSink, Face, NullFace};
pub use handler::{InterestHandler, LightHandler};
pub use strategy::ForwardingStrategy;

struct Registration {
    prefix: Name,
    handler: Box<dyn InterestHandler>,
}

/// Delivers Interests from one face to locally registered handlers.
pub struct Forwarder<F: Face> {
    face: F,
    registrations: Vec<Registration>,
    buf: Vec<u8>,
}

impl<F: Face> Forwarder<F> {
    pub fn new(face: F) -> Self {
        Self {
            face,
            registrations: Vec::new(),
            buf: vec![0; tlv::MAX_NDN_PACKET_SIZE],
        }
    }

    /// Deliver Interests under `prefix` to `handler`.
    ///
    /// Registrations are tried in the order they were made.
    pub fn register_prefix(&mut self, prefix: Name, handler: Box<dyn InterestHandler>) {
        info!("Registered prefix {}", prefix);
        self.registrations.push(Registration { prefix, handler });
    }

    pub fn registered_prefixes(&self) -> impl Iterator<Item = &Name> {
        self.registrations.iter().map(|r| &r.prefix)
    }

    /// Drain every packet pending on the face.
    ///
    /// Returns how many packets were taken off the face.  A receive error
    /// stops the drain and is returned; handler send errors are not.
    pub fn process(&mut self) -> Result<usize, FaceError> {
        let mut count = 0;
        while let Some(len) = self.face.recv(&mut self.buf)? {
            count += 1;
            let packet = &self.buf[..len];
            dispatch(packet, &mut self.registrations, &mut self.face);
        }
        Ok(count)
    }

    pub fn face(&self) -> &F {
        &self.face
    }

    pub fn face_mut(&mut self) -> &mut F {
        &mut self.face
    }
}

fn dispatch<F: Face>(packet: &[u8], registrations: &mut [Registration], face: &mut F) {
    match TlvReader::new(packet).peek_type() {
        Ok(Some(tlv::TLV_INTEREST)) => {}
        Ok(Some(tlv::TLV_DATA)) => {
            debug!("Dropped Data packet ({} bytes)", packet.len());
            return;
        }
        Ok(other) => {
            debug!("Dropped unknown packet type {:?}", other);
            return;
        }
        Err(e) => {
            debug!("Dropped undecodable packet: {}", e);
            return;
        }
    }

    let interest = match Interest::decode(packet) {
        Ok(interest) => interest,
        Err(e) => {
            debug!("Dropped malformed Interest: {}", e);
            return;
        }
    };

    let mut delivered = false;
    for reg in registrations
        .iter_mut()
        .filter(|r| r.prefix.is_prefix_of(interest.name()))
    {
        delivered = true;
        if reg.handler.on_interest(&interest, &mut *face) == ForwardingStrategy::Suppress {
            return;
        }
    }
    if !delivered {
        debug!("No registration for {}", interest.name());
    }
}
