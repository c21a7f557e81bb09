//! # Function-backed feed (`FeedFn`)
//!
//! [`FeedFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing a
//! fresh future per attempt. Each restart therefore starts from a clean
//! state; if runs need to share state, put an `Arc<...>` inside the closure
//! explicitly.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use feedvisor::{FeedError, FeedFn, FeedRef};
//!
//! let feed: FeedRef = FeedFn::arc("ticker", |ctx: CancellationToken| async move {
//!     if ctx.is_cancelled() {
//!         return Err(FeedError::Canceled);
//!     }
//!     // ingest...
//!     Ok(())
//! });
//!
//! assert_eq!(feed.name(), "ticker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::FeedError;
use crate::feeds::feed::Feed;

/// Function-backed feed implementation.
///
/// Wraps a closure that *creates* a new future per attempt.
#[derive(Debug)]
pub struct FeedFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> FeedFn<F> {
    /// Creates a new function-backed feed.
    ///
    /// Prefer [`FeedFn::arc`] when you immediately need a
    /// [`FeedRef`](crate::FeedRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the feed and returns it as a shared handle (`Arc<Self>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Feed for FeedFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), FeedError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), FeedError> {
        (self.f)(ctx).await
    }
}
