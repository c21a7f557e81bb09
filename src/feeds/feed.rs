//! # The feed abstraction.
//!
//! [`Feed`] is the contract between the supervisor and the operation it keeps
//! alive: an async, cancellable, named unit of work. The supervisor never
//! looks inside — what the feed ingests, parses, or persists is its own
//! business. The shared handle type is [`FeedRef`], an `Arc<dyn Feed>`.
//!
//! A feed receives a [`CancellationToken`] and must check it cooperatively:
//! the runtime cannot preempt an attempt that ignores its token.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::FeedError;

/// Shared handle to a feed.
pub type FeedRef = Arc<dyn Feed>;

/// # A cancellable background operation supervised by the runtime.
///
/// A `Feed` has a stable [`name`](Feed::name) and an async
/// [`run`](Feed::run) method that receives a [`CancellationToken`].
/// Implementations should poll the token at their blocking points and return
/// promptly once it is cancelled — either `Ok(())` or
/// `Err(FeedError::Canceled)`; both count as a graceful stop.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use feedvisor::{Feed, FeedError};
///
/// struct MarketFeed;
///
/// #[async_trait]
/// impl Feed for MarketFeed {
///     fn name(&self) -> &str { "market-feed" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), FeedError> {
///         while !ctx.is_cancelled() {
///             // ingest a batch...
///             # break;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Feed: Send + Sync + 'static {
    /// Returns a stable, human-readable feed name.
    fn name(&self) -> &str;

    /// Executes one run of the feed until completion, failure, or
    /// cancellation.
    ///
    /// Implementations should check `ctx` regularly and exit quickly during
    /// shutdown.
    async fn run(&self, ctx: CancellationToken) -> Result<(), FeedError>;
}
