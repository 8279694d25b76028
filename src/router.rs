//! Prefix request router.
//!
//! An ordered list of `(prefix, handler)` pairs plus a fallback. Prefixes are
//! literal strings: `/hola` matches `/hola`, `/hola/x` and `/holamundo` alike.
//! When several prefixes match, the longest one wins, so the outcome never
//! depends on registration order.

use std::sync::Arc;

use crate::apps::Acknowledge;
use crate::handler::{self, BoxedHandler, Handler};

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::route`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: Vec<(String, BoxedHandler)>,
    fallback: BoxedHandler,
}

/// Outcome of [`Router::select`].
pub(crate) struct Selected<'a> {
    pub(crate) handler: BoxedHandler,
    /// `None` when the fallback was chosen.
    pub(crate) prefix: Option<&'a str>,
    pub(crate) rest: &'a str,
}

impl Router {
    /// An empty table whose fallback is [`Acknowledge`].
    pub fn new() -> Self {
        Self { routes: Vec::new(), fallback: handler::boxed(Acknowledge) }
    }

    /// Registers `handler` under `prefix`. Returns `self` for chaining.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use multiapp::Router;
    /// use multiapp::apps::{Acknowledge, StaticPage, Sum};
    ///
    /// let shared = Arc::new(Acknowledge);
    /// Router::new()
    ///     .route("/hola", StaticPage::new("Hola mundo"))
    ///     .route("/suma", Sum)
    ///     .route("/app",   Arc::clone(&shared))
    ///     .route("/other", shared);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `prefix` is already registered.
    pub fn route<H>(mut self, prefix: &str, handler: H) -> Self
    where
        H: Handler + Send + Sync + 'static,
    {
        if self.routes.iter().any(|(p, _)| p == prefix) {
            panic!("duplicate route prefix `{prefix}`");
        }
        self.routes.push((prefix.to_owned(), handler::boxed(handler)));
        self
    }

    /// Replaces the handler used when no prefix matches.
    pub fn fallback<H>(mut self, handler: H) -> Self
    where
        H: Handler + Send + Sync + 'static,
    {
        self.fallback = handler::boxed(handler);
        self
    }

    /// Registered prefixes, in registration order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(p, _)| p.as_str())
    }

    /// Longest registered prefix of `path`, with `path` stripped of it. Falls
    /// back to the default handler and the whole path.
    pub(crate) fn select<'a>(&'a self, path: &'a str) -> Selected<'a> {
        let best = self
            .routes
            .iter()
            .filter_map(|(prefix, handler)| {
                path.strip_prefix(prefix.as_str()).map(|rest| (prefix.as_str(), handler, rest))
            })
            .max_by_key(|(prefix, _, _)| prefix.len());

        match best {
            Some((prefix, handler, rest)) => Selected {
                handler: Arc::clone(handler),
                prefix: Some(prefix),
                rest,
            },
            None => Selected {
                handler: Arc::clone(&self.fallback),
                prefix: None,
                rest: path,
            },
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
