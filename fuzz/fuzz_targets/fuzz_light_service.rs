//! Fuzz target: `LightService::handle_wire`
//!
//! Feeds arbitrary packets to a light service and checks that the level
//! stays in range and that every reply echoes the request's name bytes.
//!
//! cargo fuzz run fuzz_light_service

#![no_main]

use iot_light::app::events::AppEvent;
use iot_light::app::ports::{EventSink, LightPort};
use iot_light::app::service::LightService;
use iot_light::config::DeviceConfig;
use iot_light::identity::DeviceIdentity;
use iot_light::ndn::{Data, Interest};
use libfuzzer_sys::fuzz_target;

struct Lamp;

impl LightPort for Lamp {
    fn set_brightness(&mut self, level: u8) {
        assert!(level <= 10, "light driven out of range");
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let identity = DeviceIdentity::from_uri("/ndn-iot/bedroom/light1").expect("valid identity");
    let mut svc = LightService::new(identity, &DeviceConfig::default());

    let out = svc.handle_wire(data, &mut Lamp, &mut Discard);
    assert!(svc.brightness() <= 10);

    if let Some(reply) = out.response {
        let request = Interest::decode(data).expect("accepted packet must decode");
        let data = Data::decode(&reply.encode()).expect("reply must decode");
        assert_eq!(data.name_wire(), request.name_wire());
        assert_eq!(data.content(), &[svc.brightness()]);
    }
});
