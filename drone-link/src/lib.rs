//! Session engine for the drone serial link.
//!
//! Sits on top of `drone-proto` and owns everything stateful about a
//! conversation with the drone: the latest-telemetry [`status::StatusCache`],
//! the [`ack::AckRegistry`] matching sent commands to their acknowledgement
//! frames, the [`dispatch::Dispatcher`] that a reader task pumps inbound
//! bytes through, and the [`link::Link`] sender over any
//! `embedded_io_async::Write` transport.
//!
//! Concurrency model: exactly one task feeds the dispatcher; any number of
//! tasks read the cache and await ack handles. Waiting on an ack is the
//! only suspension point and is bounded by a caller-supplied deadline
//! future, so the crate needs no timer driver of its own.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod ack;
pub mod dispatch;
pub mod link;
pub mod status;

#[cfg(test)]
pub(crate) mod test_util;

pub use ack::{AckHandle, AckOutcome, AckRegistry, MAX_PENDING_ACKS};
pub use dispatch::{Clock, Dispatcher};
pub use link::{Link, SendError};
pub use status::{Stamped, StatusCache};

#[cfg(feature = "std")]
pub use dispatch::StdClock;
