//! Latest-value telemetry cache.
//!
//! One slot per telemetry type. The dispatcher swaps whole snapshots in;
//! readers copy whole snapshots out. A reader can never observe half of an
//! update because the swap happens inside a blocking-mutex critical section
//! and every cached type is `Copy`.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use drone_proto::telemetry::{
    Address, Altitude, Attitude, CardColor, Count, ErrorState, Flow, Information, Motion,
    Position, Range, State,
};
use drone_proto::{DataType, Payload};

/// A cached value plus the dispatcher clock reading when it was decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stamped<T> {
    pub value: T,
    pub timestamp_ms: u64,
}

struct Slot<T: Copy>(Mutex<CriticalSectionRawMutex, Cell<Option<Stamped<T>>>>);

impl<T: Copy> Slot<T> {
    const fn new() -> Self {
        Self(Mutex::new(Cell::new(None)))
    }

    fn set(&self, value: T, timestamp_ms: u64) {
        self.0.lock(|cell| {
            cell.set(Some(Stamped {
                value,
                timestamp_ms,
            }));
        });
    }

    fn get(&self) -> Option<Stamped<T>> {
        self.0.lock(Cell::get)
    }
}

/// Shared cache of the latest decoded telemetry, one slot per type.
///
/// Written only by the dispatcher task; read from anywhere.
pub struct StatusCache {
    state: Slot<State>,
    attitude: Slot<Attitude>,
    position: Slot<Position>,
    altitude: Slot<Altitude>,
    motion: Slot<Motion>,
    range: Slot<Range>,
    flow: Slot<Flow>,
    card_color: Slot<CardColor>,
    error: Slot<ErrorState>,
    count: Slot<Count>,
    information: Slot<Information>,
    address: Slot<Address>,
}

impl StatusCache {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Slot::new(),
            attitude: Slot::new(),
            position: Slot::new(),
            altitude: Slot::new(),
            motion: Slot::new(),
            range: Slot::new(),
            flow: Slot::new(),
            card_color: Slot::new(),
            error: Slot::new(),
            count: Slot::new(),
            information: Slot::new(),
            address: Slot::new(),
        }
    }

    /// Store a decoded payload if it is a cacheable telemetry type.
    ///
    /// Returns whether the payload landed in a slot.
    pub fn store(&self, payload: &Payload, now_ms: u64) -> bool {
        match payload {
            Payload::State(v) => self.state.set(*v, now_ms),
            Payload::Attitude(v) => self.attitude.set(*v, now_ms),
            Payload::Position(v) => self.position.set(*v, now_ms),
            Payload::Altitude(v) => self.altitude.set(*v, now_ms),
            Payload::Motion(v) => self.motion.set(*v, now_ms),
            Payload::Range(v) => self.range.set(*v, now_ms),
            Payload::Flow(v) => self.flow.set(*v, now_ms),
            Payload::CardColor(v) => self.card_color.set(*v, now_ms),
            Payload::Error(v) => self.error.set(*v, now_ms),
            Payload::Count(v) => self.count.set(*v, now_ms),
            Payload::Information(v) => self.information.set(*v, now_ms),
            Payload::Address(v) => self.address.set(*v, now_ms),
            _ => return false,
        }
        true
    }

    /// Latest payload of the given type, if one has been cached.
    #[must_use]
    pub fn latest(&self, data_type: DataType) -> Option<Stamped<Payload>> {
        fn wrap<T: Copy>(
            slot: Option<Stamped<T>>,
            f: impl FnOnce(T) -> Payload,
        ) -> Option<Stamped<Payload>> {
            slot.map(|s| Stamped {
                value: f(s.value),
                timestamp_ms: s.timestamp_ms,
            })
        }
        match data_type {
            DataType::State => wrap(self.state.get(), Payload::State),
            DataType::Attitude => wrap(self.attitude.get(), Payload::Attitude),
            DataType::Position => wrap(self.position.get(), Payload::Position),
            DataType::Altitude => wrap(self.altitude.get(), Payload::Altitude),
            DataType::Motion => wrap(self.motion.get(), Payload::Motion),
            DataType::Range => wrap(self.range.get(), Payload::Range),
            DataType::Flow => wrap(self.flow.get(), Payload::Flow),
            DataType::CardColor => wrap(self.card_color.get(), Payload::CardColor),
            DataType::Error => wrap(self.error.get(), Payload::Error),
            DataType::Count => wrap(self.count.get(), Payload::Count),
            DataType::Information => wrap(self.information.get(), Payload::Information),
            DataType::Address => wrap(self.address.get(), Payload::Address),
            _ => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> Option<Stamped<State>> {
        self.state.get()
    }

    #[must_use]
    pub fn attitude(&self) -> Option<Stamped<Attitude>> {
        self.attitude.get()
    }

    #[must_use]
    pub fn position(&self) -> Option<Stamped<Position>> {
        self.position.get()
    }

    #[must_use]
    pub fn altitude(&self) -> Option<Stamped<Altitude>> {
        self.altitude.get()
    }

    #[must_use]
    pub fn motion(&self) -> Option<Stamped<Motion>> {
        self.motion.get()
    }

    #[must_use]
    pub fn range(&self) -> Option<Stamped<Range>> {
        self.range.get()
    }

    #[must_use]
    pub fn flow(&self) -> Option<Stamped<Flow>> {
        self.flow.get()
    }

    #[must_use]
    pub fn card_color(&self) -> Option<Stamped<CardColor>> {
        self.card_color.get()
    }

    #[must_use]
    pub fn error(&self) -> Option<Stamped<ErrorState>> {
        self.error.get()
    }

    #[must_use]
    pub fn count(&self) -> Option<Stamped<Count>> {
        self.count.get()
    }

    #[must_use]
    pub fn information(&self) -> Option<Stamped<Information>> {
        self.information.get()
    }

    #[must_use]
    pub fn address(&self) -> Option<Stamped<Address>> {
        self.address.get()
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drone_proto::command::Ack;
    use drone_proto::modes::ModeFlight;

    #[test]
    fn test_empty_cache_has_no_values() {
        let cache = StatusCache::new();
        assert!(cache.state().is_none());
        assert!(cache.latest(DataType::Attitude).is_none());
    }

    #[test]
    fn test_store_and_read_back() {
        let cache = StatusCache::new();
        let state = State {
            mode_flight: ModeFlight::Flight,
            battery: 85,
            ..State::default()
        };
        assert!(cache.store(&Payload::State(state), 1000));

        let stamped = cache.state().unwrap();
        assert_eq!(stamped.value, state);
        assert_eq!(stamped.timestamp_ms, 1000);

        let generic = cache.latest(DataType::State).unwrap();
        assert_eq!(generic.value, Payload::State(state));
    }

    #[test]
    fn test_newer_value_replaces_older() {
        let cache = StatusCache::new();
        let first = Attitude {
            roll: 1,
            pitch: 2,
            yaw: 3,
        };
        let second = Attitude {
            roll: -4,
            pitch: -5,
            yaw: -6,
        };
        cache.store(&Payload::Attitude(first), 10);
        cache.store(&Payload::Attitude(second), 20);

        let stamped = cache.attitude().unwrap();
        assert_eq!(stamped.value, second);
        assert_eq!(stamped.timestamp_ms, 20);
    }

    #[test]
    fn test_non_telemetry_is_not_cached() {
        let cache = StatusCache::new();
        let ack = Payload::Ack(Ack {
            data_type: DataType::Buzzer,
        });
        assert!(!cache.store(&ack, 5));
        assert!(cache.latest(DataType::Ack).is_none());
    }
}
