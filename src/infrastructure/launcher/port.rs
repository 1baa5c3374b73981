//! TCP readiness probing
//!
//! The smoke check needs to know when a freshly launched service starts
//! accepting connections on its exposed port. One probe is one connection
//! attempt with a short timeout; callers poll.

use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// One connection attempt; true when `addr` accepted within `timeout`.
pub fn probe(addr: SocketAddr, timeout: Duration) -> bool {
    match TcpStream::connect_timeout(&addr, timeout) {
        Ok(_stream) => true,
        Err(_) => false,
    }
}
