use std::cell::RefCell;
use std::rc::Rc;

use crate::chain::Chains;
use crate::index::Fd;
use crate::index::Slot;
use crate::params::Capacity;

type TestChains = Chains<usize>;

fn chains() -> TestChains {
  Chains::new(Capacity::DEFAULT)
}

#[test]
fn test_new_is_unallocated() {
  let chains: TestChains = chains();

  assert_eq!(chains.len(), 0);
  assert!(!chains.is_allocated());
  assert_eq!(chains.find(1), None);
}

#[test]
fn test_push_allocates_heads() {
  let mut chains: TestChains = chains();
  let slot: Slot = chains.push(1, 10).unwrap();

  assert!(chains.is_allocated());
  assert_eq!(chains.len(), 1);
  assert_eq!(chains.key(slot), 1);
  assert_eq!(*chains.value(slot), 10);
}

#[test]
fn test_find_colliding_keys() {
  let mut chains: TestChains = chains();

  let a: Slot = chains.push(1, 10).unwrap();
  let b: Slot = chains.push(65, 650).unwrap();
  let c: Slot = chains.push(129, 1290).unwrap();

  assert_eq!(chains.find(1), Some(a));
  assert_eq!(chains.find(65), Some(b));
  assert_eq!(chains.find(129), Some(c));
  assert_eq!(chains.find(193), None);
}

#[test]
fn test_find_newest_duplicate() {
  let mut chains: TestChains = chains();

  let old: Slot = chains.push(5, 1).unwrap();
  let new: Slot = chains.push(5, 2).unwrap();

  assert_eq!(chains.find(5), Some(new));
  assert_eq!(chains.unlink(new), Some(2));
  assert_eq!(chains.find(5), Some(old));
  assert_eq!(chains.unlink(old), Some(1));
  assert_eq!(chains.find(5), None);
}

#[test]
fn test_unlink_middle_of_chain() {
  let mut chains: TestChains = chains();

  let a: Slot = chains.push(1, 1).unwrap();
  let b: Slot = chains.push(65, 65).unwrap();
  let c: Slot = chains.push(129, 129).unwrap();

  assert_eq!(chains.unlink(b), Some(65));
  assert_eq!(chains.len(), 2);
  assert_eq!(chains.find(1), Some(a));
  assert_eq!(chains.find(65), None);
  assert_eq!(chains.find(129), Some(c));
}

#[test]
fn test_unlink_twice() {
  let mut chains: TestChains = chains();
  let slot: Slot = chains.push(3, 3).unwrap();

  assert_eq!(chains.unlink(slot), Some(3));
  assert_eq!(chains.unlink(slot), None);
  assert_eq!(chains.len(), 0);
}

#[test]
fn test_slot_reuse() {
  let mut chains: TestChains = chains();

  let a: Slot = chains.push(1, 1).unwrap();
  let b: Slot = chains.push(2, 2).unwrap();
  let _keep: Slot = chains.push(9, 9).unwrap();

  chains.unlink(a).unwrap();
  chains.unlink(b).unwrap();

  // Free list is LIFO.
  assert_eq!(chains.push(3, 3).unwrap(), b);
  assert_eq!(chains.push(4, 4).unwrap(), a);
  assert_eq!(*chains.value(b), 3);
  assert_eq!(*chains.value(a), 4);
  assert_eq!(chains.slots(), 3);
}

#[test]
fn test_arena_freed_when_empty() {
  let mut chains: TestChains = chains();

  let slots: Vec<Slot> = (0..32).map(|key| chains.push(key, 0).unwrap()).collect();

  assert_eq!(chains.slots(), 32);

  for slot in &slots[1..] {
    chains.unlink(*slot).unwrap();
  }

  // One live entry pins the arena at its peak size.
  assert_eq!(chains.slots(), 32);

  chains.unlink(slots[0]).unwrap();

  assert_eq!(chains.slots(), 0);
  assert!(chains.is_allocated());
  assert_eq!(chains.find(0), None);

  // Fresh insertions start over from the first slot.
  assert_eq!(chains.push(7, 7).unwrap(), Slot::new(0));
  assert_eq!(chains.slots(), 1);
  assert_eq!(chains.find(7), Some(Slot::new(0)));
}

#[test]
fn test_value_mut() {
  let mut chains: TestChains = chains();
  let slot: Slot = chains.push(8, 0).unwrap();

  *chains.value_mut(slot) += 42;

  assert_eq!(*chains.value(slot), 42);
}

#[test]
fn test_drain_order() {
  let mut chains: TestChains = chains();

  for key in [65, 2, 1, 130] {
    chains.push(key, key as usize).unwrap();
  }

  let mut seen: Vec<(Fd, usize)> = Vec::new();

  chains.drain(|key, value| seen.push((key, value)));

  // Bucket 1 holds 1 (newest) then 65, bucket 2 holds 130 then 2.
  assert_eq!(seen, [(1, 1), (65, 65), (130, 130), (2, 2)]);
  assert_eq!(chains.len(), 0);
  assert!(!chains.is_allocated());
}

#[test]
fn test_drain_unallocated() {
  let mut chains: TestChains = chains();
  let mut calls: usize = 0;

  chains.drain(|_, _| calls += 1);

  assert_eq!(calls, 0);
}

#[test]
fn test_drain_after_removals() {
  let mut chains: TestChains = chains();

  let a: Slot = chains.push(1, 1).unwrap();
  let b: Slot = chains.push(2, 2).unwrap();

  chains.unlink(a).unwrap();
  chains.unlink(b).unwrap();

  let mut calls: usize = 0;

  chains.drain(|_, _| calls += 1);

  assert_eq!(calls, 0);
}

#[test]
fn test_drop_releases_values() {
  struct Tracked(Fd, Rc<RefCell<Vec<Fd>>>);

  impl Drop for Tracked {
    fn drop(&mut self) {
      self.1.borrow_mut().push(self.0);
    }
  }

  let tracker: Rc<RefCell<Vec<Fd>>> = Rc::new(RefCell::new(Vec::new()));

  {
    let mut chains: Chains<Tracked> = Chains::new(Capacity::new(4));

    for key in 0..8 {
      chains.push(key, Tracked(key, Rc::clone(&tracker))).unwrap();
    }

    let slot: Slot = chains.find(3).unwrap();
    drop(chains.unlink(slot));

    assert_eq!(*tracker.borrow(), [3]);
  }

  let mut dropped: Vec<Fd> = tracker.borrow().clone();
  dropped.sort_unstable();

  assert_eq!(dropped, [0, 1, 2, 3, 4, 5, 6, 7]);
}
