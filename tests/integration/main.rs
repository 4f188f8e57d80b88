//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no network or
//! real hardware required.

mod forwarder_tests;
mod mock_io;
mod scenario_tests;
