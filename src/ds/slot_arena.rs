//! Slot arena backing the recency list.
//!
//! Each slot is either occupied or vacant. Vacant slots form a singly linked
//! free chain threaded through the slots themselves, so recycling needs no
//! side vector and the most recently freed slot is reused first.
//!
//! ```text
//!   slots:  [ Occupied(a) | Vacant(next: 3) | Occupied(b) | Vacant(next: -) ]
//!                                ▲                               ▲
//!   free_head ───────────────────┘          (chain: 1 ─► 3 ─► end)
//! ```
//!
//! A [`SlotId`] is only meaningful for the arena that issued it, and after a
//! removal the same id may be handed out again for a new entry.

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Arena index, used in invariant reports.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Vector of slots with an embedded free chain.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Reserves room for `capacity` slots up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            occupied: 0,
        }
    }

    /// Stores `value`, reusing the most recently vacated slot if any.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        if let Some(idx) = self.free_head {
            let reused = std::mem::replace(&mut self.slots[idx], Slot::Occupied(value));
            if let Slot::Vacant { next_free } = reused {
                self.free_head = next_free;
            }
            return SlotId(idx);
        }
        self.slots.push(Slot::Occupied(value));
        SlotId(self.slots.len() - 1)
    }

    /// Vacates the slot and returns its value; `None` if already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }
        let vacated = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(value) = std::mem::replace(slot, vacated) else {
            return None;
        };
        self.free_head = Some(id.0);
        self.occupied -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Drops every value. Previously issued ids become meaningless.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.occupied = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recently_freed_slot_is_reused_first() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        let c = arena.insert("c");

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.remove(c), Some("c"));
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.insert("d").index(), c.index());
        assert_eq!(arena.insert("e").index(), a.index());
        assert_eq!(arena.insert("f").index(), 3);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn double_remove_leaves_free_chain_intact() {
        let mut arena = SlotArena::new();
        let id = arena.insert(5);
        assert_eq!(arena.remove(id), Some(5));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());

        assert_eq!(arena.insert(6), id);
        assert_eq!(arena.insert(7).index(), 1);
    }

    #[test]
    fn unknown_handle_is_absent() {
        let mut arena: SlotArena<u8> = SlotArena::with_capacity(4);
        assert_eq!(arena.get(SlotId(3)), None);
        assert_eq!(arena.get_mut(SlotId(3)), None);
        assert_eq!(arena.remove(SlotId(3)), None);
        assert!(!arena.contains(SlotId(3)));
    }

    #[test]
    fn clear_forgets_vacant_slots() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1);
        arena.insert(2);
        arena.remove(a);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.insert(3).index(), 0);
        assert_eq!(arena.insert(4).index(), 1);
    }
}
