//! The accept loop and request dispatch.
//!
//! # One connection at a time
//!
//! Every accepted connection goes through the same short life:
//!
//! ```text
//! ACCEPTED → READ → DISPATCHED → RESPONDED → CLOSED
//! ```
//!
//! and the loop does not accept the next one until the current one is closed.
//! Requests are served strictly in acceptance order; while one is in flight,
//! new clients wait in the kernel backlog ([`BACKLOG`](crate::BACKLOG)
//! entries). There are no timeouts, so a client that connects and never sends
//! a line holds up everyone behind it.
//!
//! # Failures stay inside the connection
//!
//! A bad request line becomes `400 Bad Request`, a handler that rejects its
//! input becomes `400 Bad Request`, and a handler that panics becomes
//! `500 Internal Server Error`. I/O errors on a connection are logged. In every
//! case the connection is closed and the loop moves on.
//!
//! # Shutdown
//!
//! [`Server::serve`] stops on SIGTERM or Ctrl-C. The signal is only looked at
//! between connections: a connection being served is always finished first.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::handler::ErasedHandler;
use crate::listener::reusable_listener;
use crate::request::Request;
use crate::response::Reply;
use crate::router::Router;
use crate::status::Status;

/// Most bytes read from a connection. Anything past this is never looked at.
pub const MAX_REQUEST_BYTES: usize = 2048;

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
}

impl Server {
    /// Resolves `host`, then binds and listens on the first address that
    /// accepts the bind.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), multiapp::Error> {
    /// let server = multiapp::Server::bind("localhost", 1234).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn bind(host: &str, port: u16) -> Result<Self, Error> {
        let mut last_err = None;
        for addr in tokio::net::lookup_host((host, port)).await? {
            match reusable_listener(addr) {
                Ok(listener) => {
                    let addr = listener.local_addr()?;
                    return Ok(Self { listener, addr });
                }
                Err(e) => {
                    debug!(%addr, "bind failed: {e}");
                    last_err = Some(e);
                }
            }
        }
        Err(match last_err {
            Some(e) => Error::Io(e),
            None => Error::Resolve { host: host.to_owned(), port },
        })
    }

    /// The address actually bound; useful after binding port `0`.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serves `router` until SIGTERM or Ctrl-C.
    pub async fn serve(self, router: Router) {
        self.serve_with_shutdown(router, shutdown_signal()).await;
    }

    /// Serves `router` until `signal` resolves.
    pub async fn serve_with_shutdown<F>(self, router: Router, signal: F)
    where
        F: Future<Output = ()>,
    {
        info!(addr = %self.addr, "multiapp listening");

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a pending signal wins over queued
                // connections.
                biased;

                () = &mut signal => {
                    info!("shutdown signal received");
                    break;
                }

                res = self.listener.accept() => {
                    let (mut stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };
                    debug!(%peer, "connection accepted");

                    if let Err(e) = handle_connection(&router, &mut stream).await {
                        error!(%peer, "connection error: {e}");
                    }
                    debug!(%peer, "connection closed");
                }
            }
        }

        info!("multiapp stopped");
    }
}

// ── Connection ────────────────────────────────────────────────────────────────

/// Reads one request, writes one reply, shuts the write side down.
async fn handle_connection<S>(router: &Router, stream: &mut S) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let raw = read_request(stream).await?;
    if raw.is_empty() {
        debug!("peer closed without sending a request");
        return Ok(());
    }
    debug!(bytes = raw.len(), request = %String::from_utf8_lossy(&raw), "request read");

    let reply = dispatch(router, &raw);
    reply.write_to(stream).await?;
    debug!(status = %reply.status(), "reply written");
    stream.shutdown().await
}

/// Reads until the request line is complete, the peer stops sending, or
/// [`MAX_REQUEST_BYTES`] are buffered.
async fn read_request<R>(reader: &mut R) -> io::Result<BytesMut>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(MAX_REQUEST_BYTES);
    while buf.len() < MAX_REQUEST_BYTES && !buf.contains(&b'\n') {
        let remaining = (MAX_REQUEST_BYTES - buf.len()) as u64;
        if (&mut *reader).take(remaining).read_buf(&mut buf).await? == 0 {
            break;
        }
    }
    Ok(buf)
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Routes one raw request to its handler and produces one reply.
///
/// Never fails: every problem is expressed as an error [`Reply`].
pub(crate) fn dispatch(router: &Router, raw: &[u8]) -> Reply {
    let request = match Request::parse(raw) {
        Ok(r) => r,
        Err(e) => {
            warn!("rejected request: {e}");
            return Reply::error(Status::BadRequest, &e.to_string());
        }
    };

    let selected = router.select(request.path());
    match selected.prefix {
        Some(prefix) => info!(prefix, rest = selected.rest, "running app"),
        None => info!(path = request.path(), "running default app"),
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        selected.handler.call(&request, selected.rest)
    }));

    match outcome {
        Ok(Ok(reply)) => reply,
        Ok(Err(e)) => {
            warn!(path = request.path(), "app rejected request: {e}");
            Reply::error(Status::BadRequest, &e.to_string())
        }
        Err(_) => {
            error!(path = request.path(), "app panicked");
            Reply::error(Status::InternalServerError, "The application failed.")
        }
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). If a handler cannot be
/// installed, that signal is logged and ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
