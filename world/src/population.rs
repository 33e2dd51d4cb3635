//! Bounded creature storage with stable slot indices.

use shoal_core::{Creature, Slot, MAX_POPULATION};

/// Ordered set of live creatures.
///
/// Slots form a dense prefix `0..len`. Creatures are only ever replaced in
/// place or appended at the end, so a slot keeps addressing the same visual
/// binding for the lifetime of a game.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    creatures: Vec<Creature>,
    capacity: usize,
}

impl Population {
    /// Creates an empty population that holds at most `capacity` creatures.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            creatures: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of live creatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Reports whether no creature is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Reports whether another creature can be appended.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.creatures.len() >= self.capacity
    }

    /// Maximum number of creatures the population may hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creature in the provided slot, if the slot is live.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Creature> {
        self.creatures.get(slot.index())
    }

    /// Live creatures in slot order.
    #[must_use]
    pub fn as_slice(&self) -> &[Creature] {
        &self.creatures
    }

    /// Iterates over live creatures paired with their slots.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Creature)> + '_ {
        self.creatures
            .iter()
            .enumerate()
            .map(|(index, creature)| (slot_at(index), creature))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Slot, &mut Creature)> + '_ {
        self.creatures
            .iter_mut()
            .enumerate()
            .map(|(index, creature)| (slot_at(index), creature))
    }

    /// Overwrites a live slot and returns the creature it held.
    pub(crate) fn replace(&mut self, slot: Slot, creature: Creature) -> Option<Creature> {
        self.creatures
            .get_mut(slot.index())
            .map(|current| std::mem::replace(current, creature))
    }

    /// Appends a creature, returning its slot, or `None` when at capacity.
    pub(crate) fn append(&mut self, creature: Creature) -> Option<Slot> {
        if self.is_full() {
            return None;
        }
        self.creatures.push(creature);
        Some(slot_at(self.creatures.len() - 1))
    }

    pub(crate) fn clear(&mut self) {
        self.creatures.clear();
    }

    /// Slot the next appended creature would occupy.
    #[must_use]
    pub fn next_slot(&self) -> Slot {
        slot_at(self.creatures.len())
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::with_capacity(MAX_POPULATION)
    }
}

fn slot_at(index: usize) -> Slot {
    Slot::new(index as u32)
}
