//! End-to-end command scenarios for the light service.
//!
//! Each test drives an encoded Interest through `LightService::handle_wire`
//! and checks the resulting level, the reply on the wire and the events.

use std::time::Duration;

use iot_light::app::events::AppEvent;
use iot_light::app::matcher::Rejection;
use iot_light::app::service::LightService;
use iot_light::config::DeviceConfig;
use iot_light::fwd::ForwardingStrategy;
use iot_light::identity::DeviceIdentity;
use iot_light::ndn::{Component, ComponentType, Data, Interest, Name};

use crate::mock_io::{MockLight, RecordingSink};

const IDENTITY: &str = "/ndn-iot/bedroom/light1";
const LIGHT1: &str = "/ndn/ndn-iot/bedroom/light1/%00";

fn make_service() -> (LightService, MockLight, RecordingSink) {
    let identity = DeviceIdentity::from_uri(IDENTITY).unwrap();
    let mut svc = LightService::new(identity, &DeviceConfig::default());
    let mut light = MockLight::new();
    let mut sink = RecordingSink::new();
    svc.start(&mut light, &mut sink);
    sink.clear();
    (svc, light, sink)
}

fn command(uri: &str, param: Option<u8>) -> Interest {
    let interest = Interest::new(uri.parse().unwrap()).with_nonce(0x1234_5678);
    match param {
        Some(p) => interest.with_app_parameters(vec![p]).unwrap(),
        None => interest,
    }
}

/// Send `interest` over the wire path and return the decoded reply.
fn send(
    svc: &mut LightService,
    light: &mut MockLight,
    sink: &mut RecordingSink,
    interest: &Interest,
) -> Option<Data> {
    let out = svc.handle_wire(&interest.encode(), light, sink);
    assert_eq!(out.strategy, ForwardingStrategy::Suppress);
    out.response.map(|r| Data::decode(&r.encode()).unwrap())
}

// ── A: set in range ───────────────────────────────────────────

#[test]
fn scenario_a_sets_level_and_replies_with_it() {
    let (mut svc, mut light, mut sink) = make_service();
    let interest = command(LIGHT1, Some(5));
    assert_eq!(interest.name().len(), 6);
    assert_eq!(
        interest.name().last().unwrap().kind(),
        ComponentType::ParametersSha256Digest
    );

    let data = send(&mut svc, &mut light, &mut sink, &interest).unwrap();

    assert_eq!(svc.brightness(), 5);
    assert_eq!(data.content(), &[5]);
    assert_eq!(data.freshness(), Some(Duration::from_millis(1000)));
    assert_eq!(light.levels(), vec![0, 5]);
    assert_eq!(
        sink.events(),
        vec![AppEvent::SwitchedOn, AppEvent::BrightnessSet(5)]
    );
}

// ── B: saturation ─────────────────────────────────────────────

#[test]
fn scenario_b_out_of_range_saturates() {
    let (mut svc, mut light, mut sink) = make_service();
    let data = send(&mut svc, &mut light, &mut sink, &command(LIGHT1, Some(200))).unwrap();

    assert_eq!(svc.brightness(), 10);
    assert_eq!(data.content(), &[10]);
    assert!(sink.events().contains(&AppEvent::Saturated {
        requested: 200,
        level: 10
    }));
}

// ── C: query ──────────────────────────────────────────────────

#[test]
fn scenario_c_query_reports_current_level() {
    let (mut svc, mut light, mut sink) = make_service();
    send(&mut svc, &mut light, &mut sink, &command(LIGHT1, Some(7)));
    sink.clear();

    let data = send(&mut svc, &mut light, &mut sink, &command(LIGHT1, None)).unwrap();
    assert_eq!(svc.brightness(), 7);
    assert_eq!(data.content(), &[7]);

    let data = send(&mut svc, &mut light, &mut sink, &command(LIGHT1, Some(0xFF))).unwrap();
    assert_eq!(svc.brightness(), 7);
    assert_eq!(data.content(), &[7]);

    assert_eq!(sink.events(), vec![AppEvent::Queried(7), AppEvent::Queried(7)]);
    assert_eq!(light.levels(), vec![0, 7]);
}

// ── D: wrong leaf ─────────────────────────────────────────────

#[test]
fn scenario_d_wrong_leaf_is_ignored() {
    let (mut svc, mut light, mut sink) = make_service();
    send(&mut svc, &mut light, &mut sink, &command(LIGHT1, Some(3)));
    sink.clear();

    let reply = send(
        &mut svc,
        &mut light,
        &mut sink,
        &command("/ndn/ndn-iot/bedroom/light2/%00", Some(9)),
    );
    assert!(reply.is_none());
    assert_eq!(svc.brightness(), 3);
    assert_eq!(
        sink.events(),
        vec![AppEvent::Rejected(Rejection::LocatorMismatch)]
    );
}

// ── E: two-byte selector ──────────────────────────────────────

#[test]
fn scenario_e_two_byte_selector_is_rejected() {
    let (mut svc, mut light, mut sink) = make_service();
    let reply = send(
        &mut svc,
        &mut light,
        &mut sink,
        &command("/ndn/ndn-iot/bedroom/light1/%00%00", Some(4)),
    );
    assert!(reply.is_none());
    assert_eq!(svc.brightness(), 0);
    assert_eq!(
        sink.events(),
        vec![AppEvent::Rejected(Rejection::SelectorMismatch)]
    );
}

// ── Name identity ─────────────────────────────────────────────

#[test]
fn reply_name_is_byte_identical_to_request() {
    let (mut svc, mut light, mut sink) = make_service();
    let interest = command(LIGHT1, Some(2));
    let wire = interest.encode();
    let decoded = Interest::decode(&wire).unwrap();

    let data = send(&mut svc, &mut light, &mut sink, &interest).unwrap();
    assert_eq!(data.name_wire(), decoded.name_wire());
    assert_eq!(data.name(), interest.name());
    assert!(data.verify_digest());
}

#[test]
fn foreign_typed_components_survive_the_round_trip() {
    // A non-generic, non-digest component in the skipped head is echoed
    // back exactly as received.
    let (mut svc, mut light, mut sink) = make_service();
    let name = Name::from_components([
        Component::new(ComponentType::Other(0x20), b"v1").unwrap(),
        Component::generic(b"ndn-iot").unwrap(),
        Component::generic(b"bedroom").unwrap(),
        Component::generic(b"light1").unwrap(),
        Component::from_byte(0),
    ])
    .unwrap();
    let interest = Interest::new(name).with_app_parameters(vec![1]).unwrap();

    let data = send(&mut svc, &mut light, &mut sink, &interest).unwrap();
    assert_eq!(data.name(), interest.name());
    assert_eq!(data.content(), &[1]);
}

// ── Group addressing ──────────────────────────────────────────

#[test]
fn room_level_request_reaches_the_light() {
    let (mut svc, mut light, mut sink) = make_service();
    let data = send(
        &mut svc,
        &mut light,
        &mut sink,
        &command("/ndn/ndn-iot/bedroom/%00", Some(6)),
    )
    .unwrap();
    assert_eq!(data.content(), &[6]);
    assert_eq!(svc.brightness(), 6);
}

#[test]
fn other_room_is_ignored() {
    let (mut svc, mut light, mut sink) = make_service();
    let reply = send(
        &mut svc,
        &mut light,
        &mut sink,
        &command("/ndn/ndn-iot/kitchen/%00", Some(6)),
    );
    assert!(reply.is_none());
    assert_eq!(svc.brightness(), 0);
    assert_eq!(light.levels(), vec![0]);
}

#[test]
fn truncated_packet_is_silently_dropped() {
    let (mut svc, mut light, mut sink) = make_service();
    let mut wire = command(LIGHT1, Some(5)).encode();
    wire.truncate(wire.len() - 3);
    let out = svc.handle_wire(&wire, &mut light, &mut sink);
    assert!(out.response.is_none());
    assert_eq!(svc.brightness(), 0);
    assert!(matches!(
        sink.events().as_slice(),
        [AppEvent::Rejected(Rejection::Malformed(_))]
    ));
}
