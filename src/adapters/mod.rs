//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements    | Connects to               |
//! |--------------|---------------|---------------------------|
//! | `discovery`  | DiscoveryPort | Log output                |
//! | `light`      | LightPort     | `embedded-hal` PWM channel|
//! | `log_sink`   | EventSink     | Log output                |
//! | `udp_face`   | Face          | UDP multicast group       |

pub mod discovery;
pub mod light;
pub mod log_sink;
pub mod udp_face;
