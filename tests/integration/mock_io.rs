//! Mock adapters for integration tests.
//!
//! Every mock records what the core asked of it behind a shared handle, so
//! tests can keep asserting after the adapter has been boxed into a
//! forwarder registration.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use iot_light::app::events::AppEvent;
use iot_light::app::ports::{EventSink, LightPort};
use iot_light::error::FaceError;
use iot_light::fwd::Face;

// ── MockLight ─────────────────────────────────────────────────

/// Records every brightness written to the light.
#[derive(Clone, Default)]
pub struct MockLight {
    levels: Rc<RefCell<Vec<u8>>>,
}

#[allow(dead_code)]
impl MockLight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Vec<u8> {
        self.levels.borrow().clone()
    }

    pub fn last_level(&self) -> Option<u8> {
        self.levels.borrow().last().copied()
    }
}

impl LightPort for MockLight {
    fn set_brightness(&mut self, level: u8) {
        self.levels.borrow_mut().push(level);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Records every emitted event in order.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<AppEvent>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.borrow_mut().push(*event);
    }
}

// ── MemoryFace ────────────────────────────────────────────────

/// Face fed from a queue; sent packets are kept for inspection.
#[derive(Default)]
pub struct MemoryFace {
    pub inbound: VecDeque<Vec<u8>>,
    pub sent: Vec<Vec<u8>>,
    /// When set, the next `recv` fails with this error.
    pub fail_next_recv: Option<FaceError>,
}

#[allow(dead_code)]
impl MemoryFace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, packet: Vec<u8>) {
        self.inbound.push_back(packet);
    }
}

impl Face for MemoryFace {
    fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, FaceError> {
        if let Some(e) = self.fail_next_recv.take() {
            return Err(e);
        }
        let Some(packet) = self.inbound.pop_front() else {
            return Ok(None);
        };
        buf[..packet.len()].copy_from_slice(&packet);
        Ok(Some(packet.len()))
    }

    fn send(&mut self, packet: &[u8]) -> Result<(), FaceError> {
        self.sent.push(packet.to_vec());
        Ok(())
    }
}
