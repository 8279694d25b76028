//! Unified error types.

use std::num::ParseIntError;

use thiserror::Error;

/// The error type returned by the server's fallible operations.
///
/// Per-request failures never surface here: they are turned into error
/// [`Reply`](crate::Reply) values at the connection boundary. This type covers
/// infrastructure failures such as binding to a port.
#[derive(Debug, Error)]
pub enum Error {
    /// Bind, accept, read or write failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The host name resolved to no usable address.
    #[error("could not resolve {host}:{port}")]
    Resolve { host: String, port: u16 },
}

/// The raw request could not be read as an HTTP request line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("empty request")]
    Empty,

    /// Fewer than two space-delimited tokens on the first line.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
}

/// A handler rejected the remainder of the path it was given.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("missing path segment #{index}")]
    MissingSegment { index: usize },

    #[error("path segment {segment:?} is not an integer: {source}")]
    InvalidNumber {
        segment: String,
        #[source]
        source: ParseIntError,
    },

    #[error("arithmetic overflow")]
    Overflow,
}
