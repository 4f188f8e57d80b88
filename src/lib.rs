//! NDN IoT light device library.
//!
//! Exposes the name model, the packet codec and the light service for the
//! device binary, integration tests and fuzz targets.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fwd;
pub mod identity;
pub mod ndn;
