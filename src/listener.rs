//! Listening socket setup.

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Pending connections the kernel queues while one request is being served.
pub const BACKLOG: i32 = 5;

/// Creates a `TcpListener` with `SO_REUSEADDR` enabled, so a restarted server
/// can bind its port while old connections linger in `TIME_WAIT`.
pub(crate) fn reusable_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    // tokio drives the socket; it must not block the runtime.
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
