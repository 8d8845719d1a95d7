//! Doubly linked recency list backed by [`SlotArena`].
//!
//! Nodes are stored in the arena and linked by [`SlotId`], so promotion and
//! unlinking are O(1) and the list never holds a reference cycle. List
//! operations only ever compare handles; payloads are opaque.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_4   │ { value: A, prev: None, next: Some(id_0) }  │
//!   │ id_0   │ { value: B, prev: Some(id_4), next: id_2 }  │
//!   │ id_2   │ { value: C, prev: Some(id_0), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (MRU) ─► [id_4] ◄──► [id_0] ◄──► [id_2] ◄── tail (LRU)
//! ```
//!
//! ## Relinking rules
//!
//! - Unlinking an interior node joins its neighbours.
//! - Unlinking the head advances `head`; unlinking the tail retreats `tail`.
//! - Moving a node to the end it already occupies is a no-op.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Recency-ordered list: front is most recently used, back is next to evict.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Payload of the least recently used node.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Iterates payloads from head (MRU) to tail (LRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Inserts `value` as the new head and returns its handle.
    ///
    /// On an empty list the node is also the tail.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        id
    }

    /// Unlinks and returns the tail payload.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks the node `id` and returns its payload.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Promotes `id` to head; returns `false` if `id` is not in the list.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head != Some(id) {
            self.detach(id);
            self.attach_front(id);
        }
        true
    }

    /// Demotes `id` to tail; returns `false` if `id` is not in the list.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.tail != Some(id) {
            self.detach(id);
            self.attach_back(id);
        }
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn attach_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail.and_then(|t| self.arena.get_mut(t)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Walks the chain and verifies the links agree with the arena.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found along the walk.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let held = self.arena.len();
        match (self.head, self.tail) {
            (None, None) if held == 0 => return Ok(()),
            (None, None) => return Err(InvariantError::OrphanedNodes { held }),
            (Some(_), None) | (None, Some(_)) => return Err(InvariantError::HalfOpenEnds),
            (Some(_), Some(_)) => {},
        }

        let mut reached = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or(InvariantError::DanglingLink { slot: id.0 })?;
            if node.prev != prev {
                return Err(InvariantError::StalePrev { slot: id.0 });
            }
            reached += 1;
            if reached > held {
                return Err(InvariantError::Cycle);
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::TailMismatch { slot: id.0 });
            }
            prev = Some(id);
            current = node.next;
        }

        if reached != held {
            return Err(InvariantError::Unreachable { reached, held });
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list payloads from MRU to LRU.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_most_recent_first() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        assert_eq!(list.head, Some(a));
        assert_eq!(list.tail, Some(a));

        list.push_front("b");
        list.push_front("c");
        assert_eq!(order(&list), vec!["c", "b", "a"]);
        assert_eq!(list.iter().next(), Some(&"c"));
        assert_eq!(list.back(), Some(&"a"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_from_tail_and_middle() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert!(list.move_to_front(a));
        assert_eq!(order(&list), vec!["a", "c", "b"]);
        assert_eq!(list.tail, Some(b));

        let middle = list.second_id();
        assert!(list.move_to_front(middle));
        assert_eq!(order(&list), vec!["c", "a", "b"]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_on_head_is_noop() {
        let mut list = RecencyList::new();
        list.push_front(1);
        let head = list.push_front(2);
        assert!(list.move_to_front(head));
        assert!(list.move_to_front(head));
        assert_eq!(order(&list), vec![2, 1]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_back_from_head_and_tail() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert!(list.move_to_back(a));
        assert_eq!(order(&list), vec!["c", "b", "a"]);

        assert!(list.move_to_back(c));
        assert_eq!(order(&list), vec!["b", "a", "c"]);
        assert_eq!(list.tail, Some(c));
        list.check_invariants().unwrap();
    }

    #[test]
    fn single_node_move_keeps_both_ends() {
        let mut list = RecencyList::new();
        let only = list.push_front(7);
        assert!(list.move_to_back(only));
        assert!(list.move_to_front(only));
        assert_eq!(list.head, Some(only));
        assert_eq!(list.tail, Some(only));
        list.check_invariants().unwrap();
    }

    #[test]
    fn pop_back_drains_oldest_first() {
        let mut list = RecencyList::new();
        for i in 1..=3 {
            list.push_front(i);
        }
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.head, None);
        assert_eq!(list.tail, None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_interior_joins_neighbours() {
        let mut list = RecencyList::new();
        list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(order(&list), vec!["c", "a"]);
        assert_eq!(list.get(b), None);
        assert_eq!(list.remove(b), None);
        assert!(!list.move_to_front(b));
        assert!(!list.move_to_back(b));
        list.check_invariants().unwrap();
    }

    #[test]
    fn clear_resets_ends() {
        let mut list = RecencyList::with_capacity(4);
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.back(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn get_mut_updates_payload_in_place() {
        let mut list = RecencyList::new();
        let id = list.push_front(10);
        if let Some(value) = list.get_mut(id) {
            *value = 20;
        }
        assert_eq!(list.get(id), Some(&20));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn check_invariants_detects_broken_tail() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        let head = list.head;
        list.tail = head;
        assert_eq!(
            list.check_invariants(),
            Err(InvariantError::TailMismatch {
                slot: list.second_id().index()
            })
        );
    }

    impl<T> RecencyList<T> {
        fn second_id(&self) -> SlotId {
            let head = self.head.unwrap();
            self.arena.get(head).and_then(|node| node.next).unwrap()
        }
    }
}
