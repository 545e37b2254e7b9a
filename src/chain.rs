//! Bucket chains over an entry arena.
//!
//! Entries live in a growable arena and are addressed by [`Slot`]. Each bucket
//! head names the most recently inserted entry of its chain; entries link to
//! the next older one. Vacated slots form an intrusive free list and are
//! reused by later insertions.

use core::mem;

use log::debug;
use log::trace;

use crate::error::Error;
use crate::error::Result;
use crate::index::Bucket;
use crate::index::Fd;
use crate::index::Slot;
use crate::params::Capacity;

struct Entry<T> {
  key: Fd,
  value: T,
  next: Option<Slot>,
}

enum Node<T> {
  Occupied(Entry<T>),
  /// Link to the next vacant slot.
  Vacant(Option<Slot>),
}

// -----------------------------------------------------------------------------
// Chains
// -----------------------------------------------------------------------------

pub(crate) struct Chains<T> {
  capacity: Capacity,
  /// Chain heads, one per bucket. `None` until the first insertion.
  heads: Option<Box<[Option<Slot>]>>,
  nodes: Vec<Node<T>>,
  free: Option<Slot>,
  count: usize,
}

impl<T> Chains<T> {
  #[inline]
  pub(crate) const fn new(capacity: Capacity) -> Self {
    Self {
      capacity,
      heads: None,
      nodes: Vec::new(),
      free: None,
      count: 0,
    }
  }

  #[inline]
  pub(crate) const fn len(&self) -> usize {
    self.count
  }

  #[inline]
  pub(crate) const fn is_allocated(&self) -> bool {
    self.heads.is_some()
  }

  /// Returns the number of arena slots, occupied or vacant.
  #[cfg(test)]
  pub(crate) const fn slots(&self) -> usize {
    self.nodes.len()
  }

  /// Links a new entry at the head of its bucket chain.
  ///
  /// Existing entries with the same key are left in place and become shadowed
  /// until the new entry is unlinked.
  pub(crate) fn push(&mut self, key: Fd, value: T) -> Result<Slot> {
    self.allocate_heads()?;

    let bucket: Bucket = Bucket::of(key, self.capacity);
    let slot: Slot = self.vacant_slot()?;
    let next: Option<Slot> = self.heads_mut()[bucket.get()].replace(slot);

    self.nodes[slot.get()] = Node::Occupied(Entry { key, value, next });
    self.count += 1;

    Ok(slot)
  }

  /// Returns the newest entry stored under `key`.
  pub(crate) fn find(&self, key: Fd) -> Option<Slot> {
    let mut cursor: Option<Slot> = self.head(Bucket::of(key, self.capacity));

    while let Some(slot) = cursor {
      let entry: &Entry<T> = self.entry(slot);

      if entry.key == key {
        return Some(slot);
      }

      cursor = entry.next;
    }

    None
  }

  /// Unlinks exactly the entry at `slot` and returns its value.
  ///
  /// Matches by slot identity, not by key, so shadowed duplicates of the same
  /// key are unaffected. Unlinking the last entry frees the arena; the bucket
  /// heads stay allocated.
  pub(crate) fn unlink(&mut self, slot: Slot) -> Option<T> {
    let Node::Occupied(entry) = self.nodes.get(slot.get())? else {
      return None;
    };

    let bucket: Bucket = Bucket::of(entry.key, self.capacity);
    let next: Option<Slot> = entry.next;

    let mut prev: Option<Slot> = None;
    let mut cursor: Option<Slot> = self.head(bucket);

    loop {
      match cursor {
        None => return None,
        Some(current) if current == slot => break,
        Some(current) => {
          prev = Some(current);
          cursor = self.entry(current).next;
        }
      }
    }

    match prev {
      None => self.heads_mut()[bucket.get()] = next,
      Some(prev) => self.entry_mut(prev).next = next,
    }

    let node: Node<T> = mem::replace(&mut self.nodes[slot.get()], Node::Vacant(self.free));

    self.free = Some(slot);
    self.count -= 1;

    // The arena only grows while entries are live; hand it back once empty.
    if self.count == 0 {
      self.nodes = Vec::new();
      self.free = None;
    }

    match node {
      Node::Occupied(entry) => Some(entry.value),
      Node::Vacant(_) => None,
    }
  }

  /// Removes every entry, visiting buckets in index order and each chain from
  /// newest to oldest.
  ///
  /// Each entry is unlinked before `f` observes it; if `f` panics, the entries
  /// not yet visited are dropped with the arena.
  pub(crate) fn drain<F>(&mut self, mut f: F)
  where
    F: FnMut(Fd, T),
  {
    let Some(mut heads) = self.heads.take() else {
      return;
    };

    for head in &mut *heads {
      let mut cursor: Option<Slot> = head.take();

      while let Some(slot) = cursor {
        let node: Node<T> = mem::replace(&mut self.nodes[slot.get()], Node::Vacant(None));

        let Node::Occupied(entry) = node else {
          break;
        };

        cursor = entry.next;
        self.count -= 1;

        f(entry.key, entry.value);
      }
    }

    self.nodes.clear();
    self.free = None;
  }

  #[inline]
  pub(crate) fn key(&self, slot: Slot) -> Fd {
    self.entry(slot).key
  }

  #[inline]
  pub(crate) fn value(&self, slot: Slot) -> &T {
    &self.entry(slot).value
  }

  #[inline]
  pub(crate) fn value_mut(&mut self, slot: Slot) -> &mut T {
    &mut self.entry_mut(slot).value
  }

  #[inline]
  fn entry(&self, slot: Slot) -> &Entry<T> {
    match &self.nodes[slot.get()] {
      Node::Occupied(entry) => entry,
      Node::Vacant(_) => unreachable!("slot {slot:?} is vacant"),
    }
  }

  #[inline]
  fn entry_mut(&mut self, slot: Slot) -> &mut Entry<T> {
    match &mut self.nodes[slot.get()] {
      Node::Occupied(entry) => entry,
      Node::Vacant(_) => unreachable!("slot {slot:?} is vacant"),
    }
  }

  #[inline]
  fn head(&self, bucket: Bucket) -> Option<Slot> {
    self
      .heads
      .as_deref()
      .and_then(|heads| heads.get(bucket.get()).copied().flatten())
  }

  #[inline]
  fn heads_mut(&mut self) -> &mut [Option<Slot>] {
    self.heads.as_deref_mut().unwrap_or_default()
  }

  fn allocate_heads(&mut self) -> Result<()> {
    if self.is_allocated() {
      return Ok(());
    }

    let count: usize = self.capacity.get();
    let mut heads: Vec<Option<Slot>> = Vec::new();

    if heads.try_reserve_exact(count).is_err() {
      debug!("failed to allocate {count} buckets");
      return Err(Error::OutOfMemory);
    }

    heads.resize(count, None);

    trace!("allocated {count} buckets");

    self.heads = Some(heads.into_boxed_slice());

    Ok(())
  }

  fn vacant_slot(&mut self) -> Result<Slot> {
    if let Some(slot) = self.free {
      if let Node::Vacant(next) = &self.nodes[slot.get()] {
        self.free = *next;
      }

      return Ok(slot);
    }

    if self.nodes.try_reserve(1).is_err() {
      debug!("failed to allocate entry #{}", self.nodes.len());
      return Err(Error::OutOfMemory);
    }

    let slot: Slot = Slot::new(self.nodes.len());

    self.nodes.push(Node::Vacant(None));

    Ok(slot)
  }
}
