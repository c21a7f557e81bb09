//! Runtime events and the broadcast bus that carries them.
//!
//! The restart loop and the supervisor publish [`Event`]s describing every
//! lifecycle transition; [`Bus`] fans them out to whoever subscribed
//! (the supervisor's listener, test harnesses).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{CooldownSource, Event, EventKind};
