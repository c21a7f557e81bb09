//! Restart and cool-down policies.
//!
//! This module groups the knobs that control **whether** the feed is started
//! again after an attempt and **how long** to wait before doing so.
//!
//! ## Contents
//! - [`RestartPolicy`] what to do after a successful run (retire / keep alive)
//! - [`CooldownPolicy`] how the delay between failed attempts evolves
//!
//! ## Quick wiring
//! ```text
//! FeedSpec { restart: RestartPolicy, cooldown: CooldownPolicy }
//!      └─► core::worker::FeedWorker uses:
//!           - restart to decide continue/exit after success
//!           - cooldown.next(attempt) to schedule the next attempt after failure
//! ```
//!
//! ## Defaults
//! - `RestartPolicy::OnFailure` — retire after the first success.
//! - `CooldownPolicy::default()` — fixed 5 s between retries.

mod cooldown;
mod restart;

pub use cooldown::{CooldownPolicy, DEFAULT_COOLDOWN};
pub use restart::RestartPolicy;
