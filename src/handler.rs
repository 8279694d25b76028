//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! Every handler has its own `Parsed` type, so `Handler` itself cannot be a
//! trait object: the router could not name the type flowing from `parse` to
//! `process`. Instead each handler is wrapped behind [`ErasedHandler`], whose
//! single `call` runs both steps and only exposes the [`Reply`]:
//!
//! ```text
//! impl Handler for Sum { type Parsed = Operands; … }   ← user writes this
//!        ↓ router.route("/suma", Sum)
//! Arc::new(Sum)                                       ← coerced to BoxedHandler
//!        ↓  stored as Arc<dyn ErasedHandler>
//! handler.call(&request, "/3/4")  at request time     ← one vtable dispatch
//!        ↓
//! Sum.process(Sum.parse(&request, "/3/4")?)           ← typed, monomorphised
//! ```

use std::sync::Arc;

use crate::error::HandlerError;
use crate::request::Request;
use crate::response::Reply;

/// A mini-application reachable under a path prefix.
///
/// Both methods have defaults: an implementation that overrides neither is a
/// page that just says it works.
///
/// ```rust
/// use multiapp::{Handler, HandlerError, Reply, Request};
///
/// struct Echo;
///
/// impl Handler for Echo {
///     type Parsed = String;
///
///     fn parse(&self, _request: &Request, rest: &str) -> Result<String, HandlerError> {
///         Ok(rest.to_owned())
///     }
///
///     fn process(&self, rest: String) -> Reply {
///         Reply::ok(format!("<html><body><p>{rest}</p></body></html>"))
///     }
/// }
/// ```
pub trait Handler {
    /// What `parse` extracts from the request. `Default` is the value the
    /// default `parse` hands to `process`.
    type Parsed: Default;

    /// Extracts handler data from `rest`, the path left after the matched
    /// prefix. The full `request` is available for handlers that need more.
    fn parse(&self, _request: &Request, _rest: &str) -> Result<Self::Parsed, HandlerError> {
        Ok(Default::default())
    }

    /// Builds the reply. Always returns a complete HTML document.
    fn process(&self, _parsed: Self::Parsed) -> Reply {
        Reply::ok(format!(
            "<html><body><h1>Dumb application just saying 'It works!'</h1>\
             <p>App id: {}</p></body></html>",
            std::any::type_name::<Self>()
        ))
    }
}

/// Lets one handler instance be registered under several prefixes.
impl<H: Handler + ?Sized> Handler for Arc<H> {
    type Parsed = H::Parsed;

    fn parse(&self, request: &Request, rest: &str) -> Result<Self::Parsed, HandlerError> {
        (**self).parse(request, rest)
    }

    fn process(&self, parsed: Self::Parsed) -> Reply {
        (**self).process(parsed)
    }
}

// ── Erasure ───────────────────────────────────────────────────────────────────

/// Object-safe view of a [`Handler`]: parse then process in one call.
pub(crate) trait ErasedHandler {
    fn call(&self, request: &Request, rest: &str) -> Result<Reply, HandlerError>;
}

impl<H: Handler> ErasedHandler for H {
    fn call(&self, request: &Request, rest: &str) -> Result<Reply, HandlerError> {
        let parsed = self.parse(request, rest)?;
        Ok(self.process(parsed))
    }
}

/// A type-erased handler as held by the router.
pub(crate) type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

pub(crate) fn boxed<H>(handler: H) -> BoxedHandler
where
    H: Handler + Send + Sync + 'static,
{
    Arc::new(handler)
}
