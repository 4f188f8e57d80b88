//! UDP multicast face adapter.
//!
//! Binds the NDN IoT port on all interfaces with address reuse, joins the
//! multicast group and sends every packet to the group.  The socket is
//! non-blocking; `recv` returns `Ok(None)` when nothing is queued.
//! Multicast loopback is disabled so the device never hears its own replies.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use log::{debug, info};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::config::DeviceConfig;
use crate::error::{self, FaceError};
use crate::fwd::face::Face;

/// A [`Face`] on an IPv4 multicast group.
pub struct UdpMulticastFace {
    socket: UdpSocket,
    group: SocketAddrV4,
}

impl UdpMulticastFace {
    /// Bind `port` and join `group`.
    pub fn open(group: Ipv4Addr, port: u16) -> Result<Self, FaceError> {
        let socket = bind_multicast(group, port).map_err(|e| FaceError::Setup(e.kind()))?;
        let group = SocketAddrV4::new(group, port);
        info!("UDP face joined {}", group);
        Ok(Self { socket, group })
    }

    /// Validate `config` and open the face it describes.
    pub fn from_config(config: &DeviceConfig) -> error::Result<Self> {
        config.validate()?;
        Ok(Self::open(config.multicast_group, config.multicast_port)?)
    }

    /// Group address packets are sent to.
    pub fn group(&self) -> SocketAddrV4 {
        self.group
    }

    pub fn local_addr(&self) -> Result<SocketAddr, FaceError> {
        self.socket.local_addr().map_err(|e| FaceError::Io(e.kind()))
    }
}

fn bind_reusable(addr: SocketAddrV4) -> io::Result<Socket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&SockAddr::from(addr))?;
    Ok(socket)
}

fn bind_multicast(group: Ipv4Addr, port: u16) -> io::Result<UdpSocket> {
    let socket = bind_reusable(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port))?;
    socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)?;
    socket.set_multicast_loop_v4(false)?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}

impl Face for UdpMulticastFace {
    fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, FaceError> {
        match self.socket.recv_from(buf) {
            Ok((len, from)) => {
                debug!("UDP face: {} bytes from {}", len, from);
                Ok(Some(len))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(FaceError::Io(e.kind())),
        }
    }

    fn send(&mut self, packet: &[u8]) -> Result<(), FaceError> {
        self.socket
            .send_to(packet, self.group)
            .map(|_| ())
            .map_err(|e| FaceError::Io(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};

    /// A face on loopback unicast, so tests need no multicast route.
    fn loopback_face() -> UdpMulticastFace {
        let socket = bind_reusable(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0)).unwrap();
        socket.set_nonblocking(true).unwrap();
        let socket: UdpSocket = socket.into();
        let group = match socket.local_addr().unwrap() {
            SocketAddr::V4(addr) => addr,
            SocketAddr::V6(_) => unreachable!(),
        };
        UdpMulticastFace { socket, group }
    }

    #[test]
    fn idle_recv_is_none() {
        let mut face = loopback_face();
        let mut buf = [0u8; 64];
        assert_eq!(face.recv(&mut buf), Ok(None));
    }

    #[test]
    fn sent_packet_is_received() {
        let mut face = loopback_face();
        face.send(&[0x05, 0x00]).unwrap();

        let mut buf = [0u8; 64];
        let mut got = None;
        for _ in 0..100 {
            got = face.recv(&mut buf).unwrap();
            if got.is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(got, Some(2));
        assert_eq!(&buf[..2], &[0x05, 0x00]);
    }

    #[test]
    fn port_can_be_shared() {
        let first = bind_reusable(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0)).unwrap();
        let addr = first.local_addr().unwrap().as_socket_ipv4().unwrap();
        assert!(bind_reusable(addr).is_ok());
    }

    #[test]
    fn invalid_config_is_rejected_before_binding() {
        let config = DeviceConfig {
            multicast_group: Ipv4Addr::LOCALHOST,
            ..DeviceConfig::default()
        };
        assert!(matches!(
            UdpMulticastFace::from_config(&config),
            Err(Error::Config(ConfigError::ValidationFailed(_)))
        ));
    }
}
