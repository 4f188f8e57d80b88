//! Fuzz target: `Interest::decode`
//!
//! Drives arbitrary bytes into the Interest decoder and asserts that it
//! never panics, and that anything it accepts re-encodes to a packet that
//! decodes to the same name.
//!
//! cargo fuzz run fuzz_interest_decoder

#![no_main]

use iot_light::ndn::Interest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(interest) = Interest::decode(data) else {
        return;
    };

    let again = Interest::decode(&interest.encode()).expect("re-encoded Interest must decode");
    assert_eq!(again.name(), interest.name());
    assert_eq!(again.app_parameters(), interest.app_parameters());
});
