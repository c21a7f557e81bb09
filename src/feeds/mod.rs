//! # Feed abstractions and specifications.
//!
//! - [`Feed`] - trait for the cancellable background operation
//! - [`FeedFn`] - closure-based feed implementation
//! - [`FeedRef`] - shared reference to a feed (`Arc<dyn Feed>`)
//! - [`FeedSpec`] - specification bundling the feed with its policies

mod feed;
mod feed_fn;
mod spec;

pub use feed::{Feed, FeedRef};
pub use feed_fn::FeedFn;
pub use spec::FeedSpec;
