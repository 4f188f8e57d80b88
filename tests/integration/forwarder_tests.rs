//! Forwarder → LightHandler → face round trips.
//!
//! The light is registered under its home prefix plus selector, exactly as
//! the binary does, so request names here start with `/ndn-iot/%00`.

use iot_light::app::events::AppEvent;
use iot_light::app::service::LightService;
use iot_light::config::DeviceConfig;
use iot_light::error::FaceError;
use iot_light::fwd::{Forwarder, LightHandler};
use iot_light::identity::DeviceIdentity;
use iot_light::ndn::{Data, Interest};

use crate::mock_io::{MemoryFace, MockLight, RecordingSink};

fn make_forwarder() -> (Forwarder<MemoryFace>, MockLight, RecordingSink) {
    let identity = DeviceIdentity::from_uri("/ndn-iot/bedroom/light1").unwrap();
    let service = LightService::new(identity, &DeviceConfig::default());
    let prefix = service.registered_prefix();
    let light = MockLight::new();
    let sink = RecordingSink::new();

    let mut handler = LightHandler::new(service, light.clone(), sink.clone());
    handler.start();

    let mut fwd = Forwarder::new(MemoryFace::new());
    fwd.register_prefix(prefix, Box::new(handler));
    (fwd, light, sink)
}

fn command(uri: &str, level: u8) -> Vec<u8> {
    Interest::new(uri.parse().unwrap())
        .with_nonce(42)
        .with_app_parameters(vec![level])
        .unwrap()
        .encode()
}

#[test]
fn accepted_interest_gets_exactly_one_reply() {
    let (mut fwd, light, _sink) = make_forwarder();
    let wire = command("/ndn-iot/%00/bedroom/light1/%00", 8);
    fwd.face_mut().push(wire.clone());

    assert_eq!(fwd.process(), Ok(1));
    assert_eq!(fwd.face().sent.len(), 1);

    let data = Data::decode(&fwd.face().sent[0]).unwrap();
    let interest = Interest::decode(&wire).unwrap();
    assert_eq!(data.name_wire(), interest.name_wire());
    assert_eq!(data.content(), &[8]);
    assert_eq!(light.last_level(), Some(8));
}

#[test]
fn unregistered_prefix_never_reaches_the_service() {
    let (mut fwd, light, sink) = make_forwarder();
    sink.clear();
    fwd.face_mut()
        .push(command("/ndn-iot/%01/bedroom/light1/%01", 8));
    fwd.face_mut().push(command("/other-home/%00/bedroom/light1/%00", 8));

    assert_eq!(fwd.process(), Ok(2));
    assert!(fwd.face().sent.is_empty());
    assert!(sink.events().is_empty());
    assert_eq!(light.levels(), vec![0]);
}

#[test]
fn registered_prefix_but_foreign_locator_is_silent() {
    let (mut fwd, light, sink) = make_forwarder();
    sink.clear();
    fwd.face_mut()
        .push(command("/ndn-iot/%00/kitchen/light1/%00", 8));

    assert_eq!(fwd.process(), Ok(1));
    assert!(fwd.face().sent.is_empty());
    assert!(matches!(sink.events().as_slice(), [AppEvent::Rejected(_)]));
    assert_eq!(light.levels(), vec![0]);
}

#[test]
fn batch_is_drained_in_order() {
    let (mut fwd, light, _sink) = make_forwarder();
    for level in [1, 4, 200, 0] {
        fwd.face_mut()
            .push(command("/ndn-iot/%00/bedroom/light1/%00", level));
    }

    assert_eq!(fwd.process(), Ok(4));
    let contents: Vec<u8> = fwd
        .face()
        .sent
        .iter()
        .map(|p| Data::decode(p).unwrap().content()[0])
        .collect();
    assert_eq!(contents, vec![1, 4, 10, 0]);
    assert_eq!(light.levels(), vec![0, 1, 4, 10, 0]);
}

#[test]
fn receive_error_is_returned_and_loop_can_continue() {
    let (mut fwd, _light, _sink) = make_forwarder();
    fwd.face_mut().fail_next_recv = Some(FaceError::Io(std::io::ErrorKind::ConnectionReset));
    fwd.face_mut()
        .push(command("/ndn-iot/%00/bedroom/light1/%00", 2));

    assert_eq!(
        fwd.process(),
        Err(FaceError::Io(std::io::ErrorKind::ConnectionReset))
    );
    assert_eq!(fwd.process(), Ok(1));
    assert_eq!(fwd.face().sent.len(), 1);
}
