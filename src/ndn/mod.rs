//! NDN packet layer — names and the TLV codec.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      NDN layer                           │
//! │                                                          │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────────────────┐ │
//! │  │   tlv    │──▶│   name   │──▶│ interest  ·  data    │ │
//! │  │ VarNumber│   │ Component│   │ decode   ·  compose  │ │
//! │  └──────────┘   └──────────┘   └──────────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod data;
pub mod interest;
pub mod name;
pub mod tlv;

pub use data::{Data, encode_data};
pub use interest::Interest;
pub use name::{Component, ComponentType, Name, NameError, compare_subrange};
pub use tlv::TlvError;
