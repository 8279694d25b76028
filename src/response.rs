//! Outgoing reply type.
//!
//! A handler produces a [`Reply`]: a status and an HTML body. The server
//! serialises it as the bare minimum a browser will render:
//!
//! ```text
//! HTTP/1.1 200 OK \r\n\r\n<html>…</html>\r\n
//! ```
//!
//! No `content-type`, no `content-length`, no other headers. The connection
//! is closed right after, which is how the client knows the body ended.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::status::Status;

/// An outgoing reply: status token plus HTML body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    pub(crate) status: Status,
    pub(crate) body: String,
}

impl Reply {
    /// `200 OK` with the given HTML document.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(Status::Ok, body)
    }

    pub fn new(status: Status, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// A complete HTML error page whose heading is the status token.
    pub fn error(status: Status, detail: &str) -> Self {
        Self::new(
            status,
            format!("<html><body><h1>{status}</h1><p>{}</p></body></html>", escape(detail)),
        )
    }

    pub fn status(&self) -> Status { self.status }
    pub fn body(&self) -> &str { &self.body }

    /// The exact bytes sent on the wire.
    pub fn to_wire(&self) -> Vec<u8> {
        format!("HTTP/1.1 {} \r\n\r\n{}\r\n", self.status, self.body).into_bytes()
    }

    pub(crate) async fn write_to<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writer.write_all(&self.to_wire()).await?;
        writer.flush().await
    }
}

/// Minimal HTML escaping for text that echoes client input.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _    => out.push(c),
        }
    }
    out
}
