//! Incoming HTTP request type.
//!
//! Only the request line is interpreted. Headers and body, if the client sent
//! any within the read limit, stay in [`Request::raw`] untouched.

use crate::error::RequestError;

/// An incoming request, parsed from the first bytes of a TCP stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    pub(crate) raw: String,
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) version: Option<String>,
}

impl Request {
    /// Parses `METHOD SP PATH SP VERSION` from the first line of `raw`.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. The version is
    /// optional; the path is not.
    pub fn parse(raw: &[u8]) -> Result<Self, RequestError> {
        let raw = String::from_utf8_lossy(raw).into_owned();
        let line = raw.lines().next().unwrap_or_default();
        if line.trim().is_empty() {
            return Err(RequestError::Empty);
        }

        let mut tokens = line.splitn(3, ' ');
        let method = tokens.next().unwrap_or_default();
        let path = tokens.next().unwrap_or_default();
        if method.is_empty() || path.is_empty() {
            return Err(RequestError::MalformedRequestLine(line.to_owned()));
        }
        let version = tokens.next().map(|v| v.trim_end().to_owned());

        Ok(Self {
            method: method.to_owned(),
            path: path.to_owned(),
            version,
            raw,
        })
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn version(&self) -> Option<&str> { self.version.as_deref() }

    /// Everything that was read from the socket, request line included.
    pub fn raw(&self) -> &str { &self.raw }
}
