//! Inbound byte routing.
//!
//! One task owns a [`Dispatcher`] and pumps every received byte through it.
//! Validated frames are routed by payload: telemetry lands in the status
//! cache stamped with the current clock reading, acks resolve pending
//! registry entries, and anything a peer should not be sending us is logged
//! and dropped.

use drone_proto::receiver::{Frame, FrameError, FrameReceiver, ReceiverStats};
use drone_proto::{DataType, Payload};

use crate::ack::AckRegistry;
use crate::status::StatusCache;

/// Millisecond clock used to stamp cached telemetry.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock for host-side use, counting from its creation.
#[cfg(feature = "std")]
pub struct StdClock(std::time::Instant);

#[cfg(feature = "std")]
impl StdClock {
    #[must_use]
    pub fn new() -> Self {
        Self(std::time::Instant::now())
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

/// Owns the frame receiver and routes what it yields.
pub struct Dispatcher<'a, C: Clock> {
    receiver: FrameReceiver,
    cache: &'a StatusCache,
    acks: &'a AckRegistry,
    clock: C,
}

impl<'a, C: Clock> Dispatcher<'a, C> {
    #[must_use]
    pub fn new(cache: &'a StatusCache, acks: &'a AckRegistry, clock: C) -> Self {
        Self {
            receiver: FrameReceiver::new(),
            cache,
            acks,
            clock,
        }
    }

    /// Receiver health counters.
    #[must_use]
    pub fn stats(&self) -> ReceiverStats {
        self.receiver.stats()
    }

    /// Feed one byte from the transport.
    ///
    /// Returns the data type of the frame the byte completed, if any.
    pub fn feed(&mut self, byte: u8) -> Result<Option<DataType>, FrameError> {
        match self.receiver.push_byte(byte)? {
            Some(frame) => Ok(Some(self.route(frame))),
            None => Ok(None),
        }
    }

    /// Feed a chunk of bytes, returning how many frames were routed.
    pub fn feed_slice(&mut self, bytes: &[u8]) -> Result<usize, FrameError> {
        let mut routed = 0;
        for &byte in bytes {
            if self.feed(byte)?.is_some() {
                routed += 1;
            }
        }
        Ok(routed)
    }

    fn route(&mut self, frame: Frame) -> DataType {
        let data_type = frame.header.data_type;
        let Some(payload) = frame.payload else {
            // Header-only frames carry no state to route.
            log::trace!("header-only {data_type:?} frame from {:?}", frame.header.from);
            return data_type;
        };

        match &payload {
            Payload::Ack(ack) => {
                if !self.acks.complete(ack.data_type) {
                    log::debug!("stray ack for {:?}", ack.data_type);
                }
            }
            Payload::Request(request) => {
                // We are the client side; peers should not be polling us.
                log::debug!("ignoring inbound request for {:?}", request.data_type);
            }
            _ => {
                if !self.cache.store(&payload, self.clock.now_ms()) {
                    log::debug!("ignoring inbound {data_type:?} command");
                }
            }
        }
        data_type
    }
}
