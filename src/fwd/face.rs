//! Faces: packet channels to the network.
//!
//! A [`Face`] moves whole NDN packets; one `recv` is one packet.  Real
//! faces (UDP multicast) live in [`crate::adapters`]; [`NullFace`] is a
//! default when no network is attached.

use crate::error::FaceError;

/// A non-blocking packet channel.
pub trait Face {
    /// Receive one packet into `buf`.
    /// Returns `Ok(None)` if nothing is pending.
    fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, FaceError>;

    /// Send one encoded packet.
    fn send(&mut self, packet: &[u8]) -> Result<(), FaceError>;
}

/// Where handlers put their Data replies.
pub trait DataSink {
    fn put_data(&mut self, data: &[u8]) -> Result<(), FaceError>;
}

impl<F: Face + ?Sized> DataSink for F {
    fn put_data(&mut self, data: &[u8]) -> Result<(), FaceError> {
        self.send(data)
    }
}

/// A face that never receives and discards all sends.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFace;

impl Face for NullFace {
    fn recv(&mut self, _buf: &mut [u8]) -> Result<Option<usize>, FaceError> {
        Ok(None)
    }

    fn send(&mut self, _packet: &[u8]) -> Result<(), FaceError> {
        Ok(())
    }
}
