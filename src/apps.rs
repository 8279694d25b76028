//! Built-in mini-applications.
//!
//! | Prefix | Handler | Page |
//! |---|---|---|
//! | `/app`, `/other` | [`Acknowledge`] | "It works!" |
//! | `/hola`, `/adios` | [`StaticPage`] | a fixed greeting |
//! | `/suma` | [`Sum`] | `/suma/3/4` → `3 + 4 = 7` |
//! | `/aleat` | [`RandomLink`] | a random number and a link to another one |
//! | `/github` | [`RepoInfo`] | `/github/code`, `/github/who`, or a help page |
//!
//! [`demo_router`] registers all of them the way the `multiapp` binary serves
//! them:
//!
//! ```rust,no_run
//! use multiapp::{Server, apps};
//!
//! # async fn run() -> Result<(), multiapp::Error> {
//! Server::bind("localhost", 1234).await?.serve(apps::demo_router()).await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use rand::Rng;

use crate::error::HandlerError;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::Reply;
use crate::router::Router;

/// Upper bound (exclusive) of the number [`RandomLink`] embeds.
pub const RANDOM_LIMIT: u64 = 10_000_000_000_000;

const REPO_URL: &str = "https://github.com/dlumbrer/X-Serv-14.8-ServVariasApps";
const AUTHOR_URL: &str = "https://github.com/dlumbrer/";

/// The routing table of the demo server.
pub fn demo_router() -> Router {
    let acknowledge = Arc::new(Acknowledge);
    Router::new()
        .route("/app", Arc::clone(&acknowledge))
        .route("/other", acknowledge)
        .route("/hola", StaticPage::new("Hola mundo"))
        .route("/adios", StaticPage::new("Adios mundo"))
        .route("/suma", Sum)
        .route("/aleat", RandomLink::new("/aleat"))
        .route("/github", RepoInfo::new("/github"))
}

/// Path segments after the leading `/`: `"/3/4"` → `["3", "4"]`.
fn segments(rest: &str) -> Vec<&str> {
    rest.split('/').skip(1).collect()
}

// ── Acknowledge ───────────────────────────────────────────────────────────────

/// Says it works. Also the router's default fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct Acknowledge;

impl Handler for Acknowledge {
    type Parsed = ();
}

// ── StaticPage ────────────────────────────────────────────────────────────────

/// Always the same page with a single heading.
#[derive(Clone, Debug)]
pub struct StaticPage {
    heading: String,
}

impl StaticPage {
    pub fn new(heading: impl Into<String>) -> Self {
        Self { heading: heading.into() }
    }
}

impl Handler for StaticPage {
    type Parsed = ();

    fn process(&self, _parsed: ()) -> Reply {
        Reply::ok(format!("<html><body><h1>{}</h1></body></html>", self.heading))
    }
}

// ── Sum ───────────────────────────────────────────────────────────────────────

/// Adds the two integers in `/<a>/<b>`. Further segments are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

/// Both operands of a [`Sum`] request, and their sum.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Operands {
    pub left: i64,
    pub right: i64,
    pub total: i64,
}

impl Handler for Sum {
    type Parsed = Operands;

    fn parse(&self, _request: &Request, rest: &str) -> Result<Operands, HandlerError> {
        let segments = segments(rest);
        let operand = |index: usize| -> Result<i64, HandlerError> {
            let segment = segments
                .get(index)
                .filter(|s| !s.is_empty())
                .ok_or(HandlerError::MissingSegment { index })?;
            segment.parse().map_err(|source| HandlerError::InvalidNumber {
                segment: (*segment).to_owned(),
                source,
            })
        };

        let left = operand(0)?;
        let right = operand(1)?;
        let total = left.checked_add(right).ok_or(HandlerError::Overflow)?;
        Ok(Operands { left, right, total })
    }

    fn process(&self, parsed: Operands) -> Reply {
        let Operands { left, right, total } = parsed;
        Reply::ok(format!(
            "<html><body><h1>La suma es</h1><p>{left} + {right} = {total}</p></body></html>"
        ))
    }
}

// ── RandomLink ────────────────────────────────────────────────────────────────

/// A fresh random number per request, linking back to its own prefix.
#[derive(Clone, Debug)]
pub struct RandomLink {
    mount: String,
}

impl RandomLink {
    /// `mount` is the prefix this handler is registered under.
    pub fn new(mount: impl Into<String>) -> Self {
        Self { mount: mount.into() }
    }
}

impl Handler for RandomLink {
    type Parsed = ();

    fn process(&self, _parsed: ()) -> Reply {
        let n = rand::thread_rng().gen_range(0..RANDOM_LIMIT);
        Reply::ok(format!(
            "<html><body><h1>ALEATORIO</h1>\
             <p><a href='{}/{n}'>Dame Otra!!</a></p></body></html>",
            self.mount
        ))
    }
}

// ── RepoInfo ──────────────────────────────────────────────────────────────────

/// Links to the source code or its author, or a page offering both.
#[derive(Clone, Debug)]
pub struct RepoInfo {
    mount: String,
}

/// Which [`RepoInfo`] page to show.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Topic {
    Code,
    Who,
    #[default]
    Help,
}

impl RepoInfo {
    pub fn new(mount: impl Into<String>) -> Self {
        Self { mount: mount.into() }
    }
}

impl Handler for RepoInfo {
    type Parsed = Topic;

    fn parse(&self, _request: &Request, rest: &str) -> Result<Topic, HandlerError> {
        Ok(match segments(rest).first().copied() {
            Some("code") => Topic::Code,
            Some("who") => Topic::Who,
            _ => Topic::Help,
        })
    }

    fn process(&self, topic: Topic) -> Reply {
        let body = match topic {
            Topic::Code => format!(
                "<html><body><h1>CODE</h1>\
                 <p><a href='{REPO_URL}'>Aqui tienes el codigo</a></p></body></html>"
            ),
            Topic::Who => format!(
                "<html><body><h1>Yo soy</h1>\
                 <p><a href='{AUTHOR_URL}'>David Moreno Lumbreras</a></p></body></html>"
            ),
            Topic::Help => format!(
                "<html><body><h1>UY</h1>\
                 <p><a href='{mount}/code'>Quieres ver el codigo?</a></p>\
                 <p><a href='{mount}/who'>Quieres saber quien soy?</a></p></body></html>",
                mount = self.mount
            ),
        };
        Reply::ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ErasedHandler;
    use crate::status::Status;

    fn request() -> Request {
        Request::parse(b"GET / HTTP/1.1\r\n").unwrap()
    }

    #[test]
    fn static_page_ignores_rest() {
        let reply = StaticPage::new("Hola mundo").call(&request(), "/whatever").unwrap();
        assert_eq!(reply.status(), Status::Ok);
        assert_eq!(reply.body(), "<html><body><h1>Hola mundo</h1></body></html>");
    }

    #[test]
    fn sum_adds_and_echoes_operands() {
        let reply = Sum.call(&request(), "/3/4").unwrap();
        assert_eq!(reply.status(), Status::Ok);
        assert!(reply.body().contains("La suma es"));
        assert!(reply.body().contains("3 + 4 = 7"));
    }

    #[test]
    fn sum_handles_negatives_and_extra_segments() {
        let parsed = Sum.parse(&request(), "/-10/4/ignored").unwrap();
        assert_eq!(parsed, Operands { left: -10, right: 4, total: -6 });
    }

    #[test]
    fn sum_rejects_non_numeric_operand() {
        let err = Sum.parse(&request(), "/3/bad").unwrap_err();
        assert!(matches!(err, HandlerError::InvalidNumber { ref segment, .. } if segment == "bad"));
    }

    #[test]
    fn sum_rejects_missing_operands() {
        assert_eq!(Sum.parse(&request(), ""), Err(HandlerError::MissingSegment { index: 0 }));
        assert_eq!(Sum.parse(&request(), "/3"), Err(HandlerError::MissingSegment { index: 1 }));
        assert_eq!(Sum.parse(&request(), "/3/"), Err(HandlerError::MissingSegment { index: 1 }));
    }

    #[test]
    fn sum_rejects_overflow() {
        let rest = format!("/{}/1", i64::MAX);
        assert_eq!(Sum.parse(&request(), &rest), Err(HandlerError::Overflow));
    }

    #[test]
    fn random_link_points_back_at_its_mount() {
        let handler = RandomLink::new("/aleat");
        for _ in 0..50 {
            let reply = handler.call(&request(), "").unwrap();
            let body = reply.body();
            let start = body.find("href='/aleat/").expect("link") + "href='/aleat/".len();
            let digits: String = body[start..].chars().take_while(char::is_ascii_digit).collect();
            let n: u64 = digits.parse().unwrap();
            assert!(n < RANDOM_LIMIT);
        }
    }

    #[test]
    fn repo_info_selects_topic_by_first_segment() {
        let handler = RepoInfo::new("/github");
        assert_eq!(handler.parse(&request(), "/code").unwrap(), Topic::Code);
        assert_eq!(handler.parse(&request(), "/who/else").unwrap(), Topic::Who);
        assert_eq!(handler.parse(&request(), "/other").unwrap(), Topic::Help);
        assert_eq!(handler.parse(&request(), "").unwrap(), Topic::Help);

        let help = handler.call(&request(), "").unwrap();
        assert!(help.body().contains("href='/github/code'"));
        assert!(help.body().contains("href='/github/who'"));
        assert!(handler.call(&request(), "/code").unwrap().body().contains(REPO_URL));
    }

    #[test]
    fn demo_router_registers_every_app() {
        let prefixes: Vec<_> = demo_router().prefixes().map(str::to_owned).collect();
        assert_eq!(prefixes, ["/app", "/other", "/hola", "/adios", "/suma", "/aleat", "/github"]);
    }
}
