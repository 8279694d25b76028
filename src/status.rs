//! HTTP status codes as a typed enum.
//!
//! Only the codes the dispatch loop can actually produce are listed. The
//! wire form is the status token, code and reason phrase together:
//!
//! ```rust
//! use multiapp::Status;
//!
//! assert_eq!(Status::Ok.to_string(), "200 OK");
//! assert_eq!(u16::from(Status::BadRequest), 400);
//! ```

use std::fmt;

/// Status of a [`Reply`](crate::Reply).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl Status {
    /// Returns the reason phrase (e.g. `"OK"`).
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                  => "OK",
            Self::BadRequest          => "Bad Request",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::BadRequest          => 400,
            Status::InternalServerError => 500,
        }
    }
}

/// The status token as written after `HTTP/1.1`, e.g. `200 OK`.
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", u16::from(*self), self.reason())
    }
}
