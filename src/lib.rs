//! # multiapp
//!
//! A deliberately tiny HTTP server that hosts several mini-applications
//! behind one port and picks one per request by path prefix.
//!
//! ## The contract
//!
//! multiapp reads the request line and nothing else. No headers, no body, no
//! keep-alive, no TLS. One connection is served at a time, one request per
//! connection, and the reply is written with no headers at all:
//!
//! ```text
//! HTTP/1.1 200 OK \r\n\r\n<html>…</html>\r\n
//! ```
//!
//! What is left is the part worth reading:
//!
//! - Prefix routing: literal prefixes, longest match wins, a fallback for
//!   everything else
//! - A two-step [`Handler`] contract: `parse` the rest of the path, then
//!   `process` it into a status and an HTML page
//! - Failures that stay inside their connection: `400` or `500`, never a dead
//!   server
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use multiapp::{Handler, HandlerError, Reply, Request, Router, Server};
//!
//! struct Greet;
//!
//! impl Handler for Greet {
//!     type Parsed = String;
//!
//!     fn parse(&self, _req: &Request, rest: &str) -> Result<String, HandlerError> {
//!         Ok(rest.trim_start_matches('/').to_owned())
//!     }
//!
//!     fn process(&self, name: String) -> Reply {
//!         Reply::ok(format!("<html><body><h1>Hola {name}</h1></body></html>"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), multiapp::Error> {
//!     let app = Router::new().route("/greet", Greet);
//!     Server::bind("localhost", 1234).await?.serve(app).await;
//!     Ok(())
//! }
//! ```

mod error;
mod handler;
mod listener;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod apps;

pub use error::{Error, HandlerError, RequestError};
pub use handler::Handler;
pub use listener::BACKLOG;
pub use request::Request;
pub use response::Reply;
pub use router::Router;
pub use server::{MAX_REQUEST_BYTES, Server};
pub use status::Status;
