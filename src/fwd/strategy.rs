/// What the forwarder does with an Interest after a handler has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForwardingStrategy {
    /// Stop here; no further handler sees the Interest.
    #[default]
    Suppress,
    /// Offer the Interest to the next matching registration.
    Forward,
}
