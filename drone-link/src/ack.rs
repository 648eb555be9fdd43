//! Pending-acknowledgement registry.
//!
//! Commands sent with an acknowledgement expectation register here before
//! the bytes go out, so an ack racing the send cannot be missed. The table
//! is a fixed set of slots; each slot is claimed by one [`AckHandle`] and
//! freed when that handle drops, whether it was awaited, timed out, or
//! simply abandoned.

use core::cell::Cell;
use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use drone_proto::DataType;

/// How many commands can be awaiting acknowledgement at once.
pub const MAX_PENDING_ACKS: usize = 4;

/// Result of waiting for an acknowledgement with a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckOutcome {
    Acknowledged,
    TimedOut,
}

struct AckSlot {
    /// The discriminant this slot is waiting on, `None` when free.
    claimed: Mutex<CriticalSectionRawMutex, Cell<Option<DataType>>>,
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl AckSlot {
    const fn new() -> Self {
        Self {
            claimed: Mutex::new(Cell::new(None)),
            signal: Signal::new(),
        }
    }

    fn claim_for(&self) -> Option<DataType> {
        self.claimed.lock(Cell::get)
    }
}

/// Fixed-capacity table of commands awaiting acknowledgement.
pub struct AckRegistry {
    slots: [AckSlot; MAX_PENDING_ACKS],
}

impl AckRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [
                AckSlot::new(),
                AckSlot::new(),
                AckSlot::new(),
                AckSlot::new(),
            ],
        }
    }

    /// Register an expectation for an ack of `data_type`.
    ///
    /// Returns `None` when every slot is taken.
    #[must_use]
    pub fn expect(&self, data_type: DataType) -> Option<AckHandle<'_>> {
        for (index, slot) in self.slots.iter().enumerate() {
            let claimed = slot.claimed.lock(|cell| {
                if cell.get().is_none() {
                    cell.set(Some(data_type));
                    true
                } else {
                    false
                }
            });
            if claimed {
                slot.signal.reset();
                return Some(AckHandle {
                    registry: self,
                    index,
                    data_type,
                });
            }
        }
        None
    }

    /// Resolve one pending expectation for `data_type`.
    ///
    /// Called by the dispatcher when an ack frame arrives. Completes the
    /// first matching slot that has not already been completed; returns
    /// `false` for a stray ack nobody is waiting on.
    pub fn complete(&self, data_type: DataType) -> bool {
        for slot in &self.slots {
            if slot.claim_for() == Some(data_type) && !slot.signal.signaled() {
                slot.signal.signal(());
                return true;
            }
        }
        false
    }

    /// Count of currently claimed slots.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.claim_for().is_some())
            .count()
    }

    fn release(&self, index: usize) {
        let slot = &self.slots[index];
        slot.claimed.lock(|cell| cell.set(None));
        slot.signal.reset();
    }
}

impl Default for AckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A claim on one registry slot. Dropping the handle frees the slot.
pub struct AckHandle<'a> {
    registry: &'a AckRegistry,
    index: usize,
    data_type: DataType,
}

impl core::fmt::Debug for AckHandle<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AckHandle")
            .field("index", &self.index)
            .field("data_type", &self.data_type)
            .finish_non_exhaustive()
    }
}

impl AckHandle<'_> {
    /// The discriminant this handle is waiting on.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Whether the ack has already arrived.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.registry.slots[self.index].signal.signaled()
    }

    /// Wait for the ack with no bound.
    pub async fn wait(&self) {
        self.registry.slots[self.index].signal.wait().await;
    }

    /// Wait for the ack, giving up when `deadline` completes first.
    pub async fn wait_until<F: Future>(&self, deadline: F) -> AckOutcome {
        match select(self.wait(), deadline).await {
            Either::First(()) => AckOutcome::Acknowledged,
            Either::Second(_) => AckOutcome::TimedOut,
        }
    }
}

impl Drop for AckHandle<'_> {
    fn drop(&mut self) {
        self.registry.release(self.index);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::test_util::block_on;
    use core::future::{pending, ready};

    #[test]
    fn test_ack_resolves_pending_entry() {
        let registry = AckRegistry::new();
        let handle = registry.expect(DataType::Buzzer).unwrap();
        assert!(!handle.is_complete());

        assert!(registry.complete(DataType::Buzzer));
        assert!(handle.is_complete());
        block_on(handle.wait());
    }

    #[test]
    fn test_stray_ack_is_a_no_op() {
        let registry = AckRegistry::new();
        let _handle = registry.expect(DataType::Buzzer).unwrap();
        assert!(!registry.complete(DataType::LightMode));
    }

    #[test]
    fn test_ack_resolves_exactly_one_entry() {
        let registry = AckRegistry::new();
        let first = registry.expect(DataType::Buzzer).unwrap();
        let second = registry.expect(DataType::Buzzer).unwrap();

        assert!(registry.complete(DataType::Buzzer));
        assert!(first.is_complete());
        assert!(!second.is_complete());

        assert!(registry.complete(DataType::Buzzer));
        assert!(second.is_complete());
    }

    #[test]
    fn test_drop_frees_the_slot() {
        let registry = AckRegistry::new();
        {
            let _handles = [
                registry.expect(DataType::Buzzer).unwrap(),
                registry.expect(DataType::LightMode).unwrap(),
                registry.expect(DataType::LightEvent).unwrap(),
                registry.expect(DataType::DisplayClearAll).unwrap(),
            ];
            assert_eq!(registry.pending(), MAX_PENDING_ACKS);
            assert!(registry.expect(DataType::Buzzer).is_none());
        }
        assert_eq!(registry.pending(), 0);
        assert!(registry.expect(DataType::Buzzer).is_some());
    }

    #[test]
    fn test_abandoned_completion_does_not_leak_into_next_claim() {
        let registry = AckRegistry::new();
        let handle = registry.expect(DataType::Buzzer).unwrap();
        registry.complete(DataType::Buzzer);
        drop(handle);

        // A fresh claim on the recycled slot must start unsignaled.
        let next = registry.expect(DataType::Buzzer).unwrap();
        assert!(!next.is_complete());
    }

    #[test]
    fn test_wait_until_deadline() {
        let registry = AckRegistry::new();
        let handle = registry.expect(DataType::Buzzer).unwrap();

        // Deadline that fires immediately: times out.
        let outcome = block_on(handle.wait_until(ready(())));
        assert_eq!(outcome, AckOutcome::TimedOut);

        // Ack arrives, deadline never does: acknowledged.
        registry.complete(DataType::Buzzer);
        let outcome = block_on(handle.wait_until(pending::<()>()));
        assert_eq!(outcome, AckOutcome::Acknowledged);
    }
}
