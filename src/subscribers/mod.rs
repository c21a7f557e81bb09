//! # Event subscribers.
//!
//! The [`Subscribe`] trait and built-in implementations for handling runtime
//! events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ```text
//! Event flow:
//!   FeedWorker ── publish(Event) ──► Bus ──► supervisor listener
//!                                               │
//!                                          ┌────┴─────┬────────┐
//!                                          ▼          ▼        ▼
//!                                      LogWriter   metrics   custom...
//! ```

mod log;
mod subscribe;

pub use log::LogWriter;
pub use subscribe::Subscribe;
