//! Open-addressing hash table and set keyed by 64-bit hashes.
//!
//! Keys are precomputed hashes (usually [`Name::raw`](crate::Name::raw)), so
//! the table never hashes anything itself: the low bits of the key pick the
//! home slot and collisions probe linearly.
//!
//! # Layout
//!
//! ```text
//! slots: [ {hash, value} ; capacity ]     capacity is always a power of two
//!          hash == 0  => vacant slot
//! ```
//!
//! Hash `0` is the vacancy marker, so it is never a valid key.
//!
//! # Growth
//!
//! Before a new key is stored the table checks `(used + 1) / 0.75 > capacity`
//! and, if so, doubles its capacity and re-inserts every live entry into the
//! fresh storage. Iteration order is unspecified and changes on growth.

use std::mem;

/// Hash value marking a vacant slot.
pub const VACANT: u64 = 0;

const INITIAL_CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot<V> {
    hash: u64,
    value: V,
}

impl<V: Default> Slot<V> {
    fn vacant() -> Self {
        Slot {
            hash: VACANT,
            value: V::default(),
        }
    }
}

/// Hash table from a 64-bit hash to `V`.
///
/// `V: Default` provides the zero value of a freshly upserted slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashTable<V> {
    slots: Vec<Slot<V>>,
    used: usize,
}

impl<V: Default> HashTable<V> {
    /// Create an empty table with the initial capacity of 16 slots.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty table with room for at least `capacity` slots.
    ///
    /// The capacity is rounded up to a power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        HashTable {
            slots: Self::vacant_slots(capacity),
            used: 0,
        }
    }

    fn vacant_slots(capacity: usize) -> Vec<Slot<V>> {
        (0..capacity).map(|_| Slot::vacant()).collect()
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Whether the table has no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Number of slots (always a power of two).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low bits select the home slot"
    )]
    fn home(&self, hash: u64) -> usize {
        (hash as usize) & self.mask()
    }

    /// Probe for `hash`: `Ok(index)` of its slot, or `Err(index)` of the
    /// vacant slot that ends its probe run.
    ///
    /// Terminates because the load factor keeps at least one slot vacant.
    fn probe(&self, hash: u64) -> Result<usize, usize> {
        let mask = self.mask();
        let mut index = self.home(hash);
        loop {
            match self.slots[index].hash {
                h if h == hash => return Ok(index),
                VACANT => return Err(index),
                _ => index = (index + 1) & mask,
            }
        }
    }

    fn needs_grow(&self) -> bool {
        // (used + 1) / 0.75 > capacity, in integers.
        (self.used + 1) * 4 > self.capacity() * 3
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        tracing::trace!(
            from = self.capacity(),
            to = new_capacity,
            used = self.used,
            "hash table grow"
        );
        let old = mem::replace(&mut self.slots, Self::vacant_slots(new_capacity));
        for slot in old {
            if slot.hash == VACANT {
                continue;
            }
            let (Ok(index) | Err(index)) = self.probe(slot.hash);
            self.slots[index] = slot;
        }
    }

    /// Upsert: return the slot for `hash`, creating a zero-valued entry if
    /// it is absent.
    ///
    /// # Panics
    /// Panics if `hash` is the reserved vacancy marker `0`.
    pub fn insert(&mut self, hash: u64) -> &mut V {
        assert_ne!(hash, VACANT, "hash 0 is reserved for vacant slots");
        let index = match self.probe(hash) {
            Ok(index) => index,
            Err(vacant) => {
                let index = if self.needs_grow() {
                    self.grow();
                    let (Ok(index) | Err(index)) = self.probe(hash);
                    index
                } else {
                    vacant
                };
                self.slots[index].hash = hash;
                self.slots[index].value = V::default();
                self.used += 1;
                index
            }
        };
        &mut self.slots[index].value
    }

    /// Look up the value stored for `hash`.
    pub fn get(&self, hash: u64) -> Option<&V> {
        if hash == VACANT {
            return None;
        }
        self.probe(hash).ok().map(|index| &self.slots[index].value)
    }

    /// Look up the value stored for `hash`, mutably.
    pub fn get_mut(&mut self, hash: u64) -> Option<&mut V> {
        if hash == VACANT {
            return None;
        }
        match self.probe(hash) {
            Ok(index) => Some(&mut self.slots[index].value),
            Err(_) => None,
        }
    }

    /// Whether `hash` has a live entry.
    #[inline]
    pub fn contains(&self, hash: u64) -> bool {
        self.get(hash).is_some()
    }

    /// Remove the entry for `hash`, returning its value.
    ///
    /// The slot's hash is zeroed, then the rest of its probe run is shifted
    /// back so every remaining key stays reachable from its home slot.
    pub fn remove(&mut self, hash: u64) -> Option<V> {
        if hash == VACANT {
            return None;
        }
        let mut hole = self.probe(hash).ok()?;
        let value = mem::take(&mut self.slots[hole].value);
        self.slots[hole].hash = VACANT;
        self.used -= 1;

        let mask = self.mask();
        let mut next = (hole + 1) & mask;
        while self.slots[next].hash != VACANT {
            let home = self.home(self.slots[next].hash);
            // The entry may move into the hole unless its home lies
            // cyclically within (hole, next].
            let stays = if hole <= next {
                hole < home && home <= next
            } else {
                hole < home || home <= next
            };
            if !stays {
                self.slots.swap(hole, next);
                hole = next;
            }
            next = (next + 1) & mask;
        }
        Some(value)
    }

    /// Drop every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::vacant();
        }
        self.used = 0;
    }

    /// Iterate live `(hash, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> {
        self.slots
            .iter()
            .filter(|slot| slot.hash != VACANT)
            .map(|slot| (slot.hash, &slot.value))
    }
}

impl<V: Default> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Set of 64-bit hashes, a [`HashTable`] without payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashSet {
    table: HashTable<()>,
}

impl HashSet {
    /// Create an empty set.
    pub fn new() -> Self {
        HashSet {
            table: HashTable::new(),
        }
    }

    /// Create an empty set with room for at least `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        HashSet {
            table: HashTable::with_capacity(capacity),
        }
    }

    /// Insert `hash`, returning `true` if it was not present.
    pub fn insert(&mut self, hash: u64) -> bool {
        let fresh = !self.table.contains(hash);
        self.table.insert(hash);
        fresh
    }

    /// Whether `hash` is in the set.
    #[inline]
    pub fn contains(&self, hash: u64) -> bool {
        self.table.contains(hash)
    }

    /// Remove `hash`, returning `true` if it was present.
    pub fn remove(&mut self, hash: u64) -> bool {
        self.table.remove(hash).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate the hashes in the set.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.table.iter().map(|(hash, _)| hash)
    }

    /// Hashes in either set.
    #[must_use]
    pub fn union(&self, other: &HashSet) -> HashSet {
        let mut result = HashSet::with_capacity((self.len() + other.len()) * 2);
        for hash in self.iter().chain(other.iter()) {
            result.insert(hash);
        }
        result
    }

    /// Hashes in both sets.
    #[must_use]
    pub fn intersection(&self, other: &HashSet) -> HashSet {
        let (smaller, bigger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller
            .iter()
            .filter(|&hash| bigger.contains(hash))
            .collect()
    }

    /// Whether every hash of `self` is also in `other`.
    pub fn is_subset(&self, other: &HashSet) -> bool {
        self.len() <= other.len() && self.iter().all(|hash| other.contains(hash))
    }
}

impl FromIterator<u64> for HashSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut set = HashSet::new();
        for hash in iter {
            set.insert(hash);
        }
        set
    }
}
