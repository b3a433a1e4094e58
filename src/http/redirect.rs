//! Redirect middleware.
//!
//! `RedirectService` wraps a fallback service. A request whose path is in
//! the lookup table is answered with a 301 and never reaches the fallback;
//! any other request is passed to the fallback unchanged. Services nest, so
//! one table can fall back to another.
//!
//! The path is percent-decoded before lookup, so `/caf%C3%A9` matches a
//! `/café` entry. Paths that do not decode to UTF-8 are looked up raw.

use std::borrow::Cow;
use std::convert::Infallible;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{Request, Uri},
    response::Response,
};
use futures_util::future::Either;
use percent_encoding::percent_decode_str;
use tower::util::{Oneshot, ServiceExt};
use tower::{Layer, Service};

use crate::http::response::permanent_redirect;
use crate::observability::metrics;
use crate::routing::{LookupTable, Resolution, Router};

/// Layer that wraps a fallback service in a [`RedirectService`].
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    router: Router,
}

impl RedirectLayer {
    pub fn new(table: impl Into<Arc<LookupTable>>) -> Self {
        Self {
            router: Router::new(table),
        }
    }
}

impl<F> Layer<F> for RedirectLayer {
    type Service = RedirectService<F>;

    fn layer(&self, fallback: F) -> Self::Service {
        RedirectService {
            router: self.router.clone(),
            fallback,
        }
    }
}

/// Answers matched paths with a redirect, everything else with `fallback`.
#[derive(Debug, Clone)]
pub struct RedirectService<F> {
    router: Router,
    fallback: F,
}

impl<F> RedirectService<F> {
    pub fn new(table: impl Into<Arc<LookupTable>>, fallback: F) -> Self {
        RedirectLayer::new(table).layer(fallback)
    }

    pub fn table(&self) -> &LookupTable {
        self.router.table()
    }
}

impl<F> Service<Request<Body>> for RedirectService<F>
where
    F: Service<Request<Body>, Response = Response, Error = Infallible> + Clone,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Either<Ready<Result<Response, Infallible>>, Oneshot<F, Request<Body>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // The fallback is driven to readiness by `oneshot` only when used.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let redirect = {
            let path = lookup_path(request.uri());
            match self.router.resolve(&path) {
                Resolution::Matched(target) => {
                    tracing::debug!(path = %path, location = %target, "Redirecting");
                    metrics::record_redirect();
                    Some(permanent_redirect(target))
                }
                Resolution::Unmatched => {
                    tracing::debug!(path = %path, "No redirect matched, falling back");
                    metrics::record_fallback();
                    None
                }
            }
        };

        match redirect {
            Some(response) => Either::Left(ready(Ok(response))),
            None => Either::Right(self.fallback.clone().oneshot(request)),
        }
    }
}

/// Percent-decoded path of `uri`, or the raw path if it is not UTF-8.
pub fn lookup_path(uri: &Uri) -> Cow<'_, str> {
    let raw = uri.path();
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}
