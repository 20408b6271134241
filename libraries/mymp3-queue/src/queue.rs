//! Circular playback queue
//!
//! Nodes live in an arena of slots linked by explicit `next`/`prev` indices,
//! forming a single closed cycle:
//!
//! ```text
//!        origin                      cursor
//!          │                           │
//!          ▼                           ▼
//!   ┌──▶ [ A ] ⇄ [ B ] ⇄ [ C ] ⇄ ... [ N ] ──┐
//!   └─────────────────────────────────────────┘
//! ```
//!
//! New tracks are linked after the cursor and become the new cursor, so the
//! cycle read from the origin is insertion order. Removal by reference is O(1).

use crate::error::{QueueError, Result};
use crate::types::{TrackEntry, TrackRef};
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of per-queue identifiers baked into every [`TrackRef`]
static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(1);

/// Arena slot
///
/// Links are always valid slot indices. A free slot links to itself and has
/// no entry.
#[derive(Debug)]
struct Slot {
    generation: u32,
    next: u32,
    prev: u32,
    entry: Option<TrackEntry>,
}

/// Ordered playback queue with O(1) append and O(1) removal by reference
#[derive(Debug)]
pub struct PlaybackQueue {
    /// Identifier checked against incoming references
    id: u64,

    /// Node arena
    slots: Vec<Slot>,

    /// Indices of free slots, reused before the arena grows
    free: Vec<u32>,

    /// Number of live nodes
    count: usize,

    /// Oldest surviving node (iteration start)
    origin: Option<u32>,

    /// Most recently inserted node (insertion point)
    cursor: Option<u32>,
}

impl PlaybackQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty queue with room for `capacity` tracks
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            count: 0,
            origin: None,
            cursor: None,
        }
    }

    /// Identifier shared by every reference this queue hands out
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Add a track after the cursor
    ///
    /// The new node becomes the cursor. Returns a reference usable later
    /// for [`dequeue_node`](Self::dequeue_node).
    pub fn enqueue(
        &mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> TrackRef {
        self.push(TrackEntry::new(title, artist, album))
    }

    /// Add an already built entry after the cursor
    pub fn push(&mut self, entry: TrackEntry) -> TrackRef {
        let idx = self.allocate(entry);

        match self.cursor {
            None => {
                // Sole node: allocate() left it linked to itself
                self.origin = Some(idx);
            }
            Some(cursor) => {
                let after = self.slots[cursor as usize].next;
                self.slots[idx as usize].prev = cursor;
                self.slots[idx as usize].next = after;
                self.slots[cursor as usize].next = idx;
                self.slots[after as usize].prev = idx;
            }
        }

        self.cursor = Some(idx);
        self.count += 1;
        self.make_ref(idx)
    }

    /// Remove the node named by `track`
    ///
    /// Fails with [`QueueError::InvalidReference`] if the reference belongs to
    /// another queue or its node was already removed; the queue is left
    /// unmodified in that case.
    pub fn dequeue_node(&mut self, track: TrackRef) -> Result<TrackEntry> {
        let idx = self.resolve(track)?;
        self.unlink(idx).ok_or(QueueError::InvalidReference(track))
    }

    /// Remove the oldest track
    pub fn dequeue(&mut self) -> Option<TrackEntry> {
        let origin = self.origin?;
        self.unlink(origin)
    }

    /// Look up the entry named by `track`
    pub fn get(&self, track: TrackRef) -> Option<&TrackEntry> {
        let idx = self.resolve(track).ok()?;
        self.slots[idx as usize].entry.as_ref()
    }

    /// Check whether `track` names a live node of this queue
    pub fn contains(&self, track: TrackRef) -> bool {
        self.resolve(track).is_ok()
    }

    /// Reference to the oldest surviving node
    pub fn origin(&self) -> Option<TrackRef> {
        self.origin.map(|idx| self.make_ref(idx))
    }

    /// Reference to the most recently inserted node
    pub fn cursor(&self) -> Option<TrackRef> {
        self.cursor.map(|idx| self.make_ref(idx))
    }

    /// Reference to the track at `position` in playback order
    pub fn nth_ref(&self, position: usize) -> Option<TrackRef> {
        self.iter().nth(position).map(|(track, _)| track)
    }

    /// Number of tracks in queue
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove every track
    ///
    /// All outstanding references become invalid.
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                slot.next = idx as u32;
                slot.prev = idx as u32;
                self.free.push(idx as u32);
            }
        }
        self.count = 0;
        self.origin = None;
        self.cursor = None;
    }

    /// Iterate tracks in playback order, starting at the origin
    ///
    /// Follows `next` links exactly `len()` times, so the walk never passes
    /// its starting point. Call again to restart.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            next: self.origin,
            remaining: self.count,
        }
    }

    /// Iterate entries only, in playback order
    pub fn entries(&self) -> impl Iterator<Item = &TrackEntry> + '_ {
        self.iter().map(|(_, entry)| entry)
    }

    /// Verify the cycle and cursor invariants
    ///
    /// Walks both directions from the origin. Intended for diagnostics and
    /// tests; O(n).
    pub fn check_invariants(&self) -> bool {
        let (Some(origin), Some(cursor)) = (self.origin, self.cursor) else {
            return self.count == 0 && self.origin.is_none() && self.cursor.is_none();
        };

        // Origin follows the cursor in a well-formed cycle
        if self.slots[cursor as usize].next != origin {
            return false;
        }

        let mut idx = origin;
        for _ in 0..self.count {
            let slot = &self.slots[idx as usize];
            if slot.entry.is_none() || self.slots[slot.next as usize].prev != idx {
                return false;
            }
            idx = slot.next;
        }
        if idx != origin {
            return false;
        }

        let mut idx = origin;
        for _ in 0..self.count {
            idx = self.slots[idx as usize].prev;
        }
        idx == origin && self.slots.len() - self.free.len() == self.count
    }

    fn allocate(&mut self, entry: TrackEntry) -> u32 {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.entry = Some(entry);
            slot.next = idx;
            slot.prev = idx;
            return idx;
        }

        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            next: idx,
            prev: idx,
            entry: Some(entry),
        });
        idx
    }

    fn resolve(&self, track: TrackRef) -> Result<u32> {
        if track.queue != self.id {
            return Err(QueueError::InvalidReference(track));
        }

        match self.slots.get(track.slot as usize) {
            Some(slot) if slot.generation == track.generation && slot.entry.is_some() => {
                Ok(track.slot)
            }
            _ => Err(QueueError::InvalidReference(track)),
        }
    }

    fn unlink(&mut self, idx: u32) -> Option<TrackEntry> {
        let (prev, next) = {
            let slot = &self.slots[idx as usize];
            slot.entry.as_ref()?;
            (slot.prev, slot.next)
        };

        if self.count == 1 {
            self.origin = None;
            self.cursor = None;
        } else {
            self.slots[prev as usize].next = next;
            self.slots[next as usize].prev = prev;

            if self.origin == Some(idx) {
                self.origin = Some(next);
            }
            if self.cursor == Some(idx) {
                self.cursor = Some(prev);
            }
        }
        self.count -= 1;

        let slot = &mut self.slots[idx as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.next = idx;
        slot.prev = idx;
        self.free.push(idx);
        slot.entry.take()
    }

    fn make_ref(&self, idx: u32) -> TrackRef {
        TrackRef {
            queue: self.id,
            slot: idx,
            generation: self.slots[idx as usize].generation,
        }
    }
}

impl Default for PlaybackQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PlaybackQueue {
    type Item = (TrackRef, &'a TrackEntry);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Playback-order iterator over a [`PlaybackQueue`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    queue: &'a PlaybackQueue,
    next: Option<u32>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (TrackRef, &'a TrackEntry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next?;
        let queue = self.queue;
        let slot = &queue.slots[idx as usize];
        self.remaining -= 1;
        self.next = Some(slot.next);
        slot.entry.as_ref().map(|entry| (queue.make_ref(idx), entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(queue: &PlaybackQueue) -> Vec<&str> {
        queue.entries().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn new_queue_is_empty() {
        let queue = PlaybackQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.origin().is_none());
        assert!(queue.cursor().is_none());
        assert_eq!(queue.iter().count(), 0);
        assert!(queue.check_invariants());
    }

    #[test]
    fn single_node_links_to_itself() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");

        assert_eq!(queue.origin(), Some(a));
        assert_eq!(queue.cursor(), Some(a));
        assert_eq!(queue.slots[a.slot as usize].next, a.slot);
        assert_eq!(queue.slots[a.slot as usize].prev, a.slot);
        assert!(queue.check_invariants());
    }

    #[test]
    fn enqueue_keeps_insertion_order() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");
        queue.enqueue("B", "Artist", "Album");
        let c = queue.enqueue("C", "Artist", "Album");

        assert_eq!(queue.len(), 3);
        assert_eq!(titles(&queue), vec!["A", "B", "C"]);
        assert_eq!(queue.origin(), Some(a));
        assert_eq!(queue.cursor(), Some(c));
        assert!(queue.check_invariants());
    }

    #[test]
    fn remove_middle_node() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");
        let b = queue.enqueue("B", "Artist", "Album");
        let c = queue.enqueue("C", "Artist", "Album");

        let removed = queue.dequeue_node(b).unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(titles(&queue), vec!["A", "C"]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.origin(), Some(a));
        assert_eq!(queue.cursor(), Some(c));
        assert!(queue.check_invariants());
    }

    #[test]
    fn removing_origin_advances_it() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");
        let b = queue.enqueue("B", "Artist", "Album");
        queue.enqueue("C", "Artist", "Album");

        queue.dequeue_node(a).unwrap();
        assert_eq!(queue.origin(), Some(b));
        assert_eq!(titles(&queue), vec!["B", "C"]);
        assert!(queue.check_invariants());
    }

    #[test]
    fn removing_cursor_retreats_it() {
        let mut queue = PlaybackQueue::new();
        queue.enqueue("A", "Artist", "Album");
        let b = queue.enqueue("B", "Artist", "Album");
        let c = queue.enqueue("C", "Artist", "Album");

        queue.dequeue_node(c).unwrap();
        assert_eq!(queue.cursor(), Some(b));

        // Next insertion lands after the retreated cursor
        queue.enqueue("D", "Artist", "Album");
        assert_eq!(titles(&queue), vec!["A", "B", "D"]);
        assert!(queue.check_invariants());
    }

    #[test]
    fn removing_last_node_clears_both_cursors() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");

        queue.dequeue_node(a).unwrap();
        assert!(queue.is_empty());
        assert!(queue.origin().is_none());
        assert!(queue.cursor().is_none());
        assert!(queue.check_invariants());
    }

    #[test]
    fn double_remove_is_invalid_reference() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");
        queue.enqueue("B", "Artist", "Album");

        queue.dequeue_node(a).unwrap();
        assert_eq!(queue.dequeue_node(a), Err(QueueError::InvalidReference(a)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn stale_reference_does_not_hit_reused_slot() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");
        queue.dequeue_node(a).unwrap();

        // Reuses the freed slot with a new generation
        let b = queue.enqueue("B", "Artist", "Album");
        assert_eq!(a.slot, b.slot);
        assert_ne!(a, b);

        assert!(queue.dequeue_node(a).is_err());
        assert_eq!(queue.get(b).map(|e| e.title.as_str()), Some("B"));
    }

    #[test]
    fn foreign_reference_is_rejected() {
        let mut first = PlaybackQueue::new();
        let mut second = PlaybackQueue::new();
        let a = first.enqueue("A", "Artist", "Album");
        second.enqueue("X", "Artist", "Album");

        assert!(!second.contains(a));
        assert_eq!(second.dequeue_node(a), Err(QueueError::InvalidReference(a)));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn dequeue_pops_oldest() {
        let mut queue = PlaybackQueue::new();
        queue.enqueue("A", "Artist", "Album");
        queue.enqueue("B", "Artist", "Album");

        assert_eq!(queue.dequeue().map(|e| e.title), Some("A".to_string()));
        assert_eq!(queue.dequeue().map(|e| e.title), Some("B".to_string()));
        assert!(queue.dequeue().is_none());
        assert!(queue.check_invariants());
    }

    #[test]
    fn clear_invalidates_references() {
        let mut queue = PlaybackQueue::new();
        let a = queue.enqueue("A", "Artist", "Album");
        queue.enqueue("B", "Artist", "Album");

        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.contains(a));
        assert!(queue.check_invariants());

        queue.enqueue("C", "Artist", "Album");
        assert_eq!(titles(&queue), vec!["C"]);
        assert!(queue.check_invariants());
    }

    #[test]
    fn iteration_is_restartable_and_exact_size() {
        let mut queue = PlaybackQueue::new();
        for title in ["A", "B", "C", "D"] {
            queue.enqueue(title, "Artist", "Album");
        }

        let iter = queue.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(titles(&queue), titles(&queue));

        // Walk stops after len() steps even though the links are cyclic
        assert_eq!(queue.iter().count(), 4);
    }

    #[test]
    fn nth_ref_follows_playback_order() {
        let mut queue = PlaybackQueue::new();
        queue.enqueue("A", "Artist", "Album");
        let b = queue.enqueue("B", "Artist", "Album");

        assert_eq!(queue.nth_ref(1), Some(b));
        assert_eq!(queue.nth_ref(2), None);
    }
}
