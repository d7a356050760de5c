#![forbid(unsafe_code)]

use super::{Datagram, Transport, local_broadcast};
use crate::error::Error;
use config::{MIN_RECV_FRAME_LEN, Network};
use std::io::ErrorKind;
use std::net::{SocketAddr, SocketAddrV4, UdpSocket};
use tracing::{debug, info, trace, warn};

/// Non-blocking, broadcast-enabled UDP socket.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    frame: Vec<u8>,
    broadcast: Option<SocketAddr>,
}

impl UdpTransport {
    pub fn bind(network: &Network) -> Result<Self, Error> {
        let socket = UdpSocket::bind(SocketAddr::new(network.bind_addr, network.port))?;
        socket.set_nonblocking(true)?;
        socket.set_broadcast(true)?;

        let broadcast = network
            .broadcast_override
            .or_else(local_broadcast)
            .map(|ip| SocketAddr::V4(SocketAddrV4::new(ip, network.port)));
        match broadcast {
            Some(addr) => info!(local = ?socket.local_addr().ok(), broadcast = %addr, "udp transport ready"),
            None => warn!("no local IPv4 address found, discovery broadcast disabled"),
        }

        Ok(Self {
            socket,
            frame: vec![0; network.recv_frame_len.max(MIN_RECV_FRAME_LEN)],
            broadcast,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.socket.local_addr()?)
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, payload: &[u8], to: SocketAddr) -> bool {
        match self.socket.send_to(payload, to) {
            Ok(_) => true,
            Err(err) => {
                debug!(%err, %to, "send dropped");
                false
            }
        }
    }

    fn poll_receive(&mut self) -> Option<Datagram> {
        // the socket truncates to the frame, Datagram::framed trims the
        // terminator byte
        match self.socket.recv_from(&mut self.frame) {
            Ok((len, from)) => {
                trace!(len, %from, "datagram received");
                Some(Datagram::framed(
                    self.frame[..len].to_vec(),
                    from,
                    self.frame.len(),
                ))
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => None,
            Err(err) => {
                debug!(%err, "receive failed");
                None
            }
        }
    }

    fn broadcast_addr(&self) -> Option<SocketAddr> {
        self.broadcast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn loopback(port: u16) -> Network {
        Network {
            port,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            recv_frame_len: 16,
            broadcast_override: Some(Ipv4Addr::LOCALHOST),
        }
    }

    #[test]
    fn empty_socket_does_not_block() {
        let mut transport = UdpTransport::bind(&loopback(0)).unwrap();
        assert_eq!(transport.poll_receive(), None);
    }

    fn receive_one(transport: &mut UdpTransport) -> Datagram {
        for _ in 0..200 {
            if let Some(datagram) = transport.poll_receive() {
                return datagram;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("no datagram arrived");
    }

    #[test]
    fn zero_frame_still_fits_announcement() {
        let network = Network {
            recv_frame_len: 0,
            ..loopback(0)
        };
        let mut transport = UdpTransport::bind(&network).unwrap();
        let to = transport.local_addr().unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(b"SERVER", to).unwrap();

        assert_eq!(receive_one(&mut transport).payload, b"SERVER");
    }

    #[test]
    fn oversized_datagram_is_truncated() {
        let mut transport = UdpTransport::bind(&loopback(0)).unwrap();
        let to = transport.local_addr().unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(&[b'a'; 64], to).unwrap();

        let datagram = receive_one(&mut transport);
        assert_eq!(datagram.payload.len(), 15);
        assert_eq!(datagram.from, sender.local_addr().unwrap());
    }
}
