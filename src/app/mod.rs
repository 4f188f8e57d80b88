//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules of the light service: deciding
//! whether a request is addressed to this device, applying the command to
//! the brightness level, and composing the reply.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals or sockets.

pub mod commands;
pub mod dispatcher;
pub mod events;
pub mod matcher;
pub mod ports;
pub mod response;
pub mod service;
