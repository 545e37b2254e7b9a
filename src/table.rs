//! Core table implementation.
//!
//! One mutex guards every bucket chain. A successful [`Table::reserve`] or
//! [`Table::find`] moves its guard into the returned [`Checkout`], handing the
//! lock to the caller until the checkout is released or removed.

use log::trace;

use crate::checkout::Checkout;
use crate::chain::Chains;
use crate::error::Error;
use crate::error::Result;
use crate::index::Fd;
use crate::index::Slot;
use crate::params::Capacity;
use crate::sync::Mutex;
use crate::sync::MutexGuard;
use crate::sync::PoisonError;
use crate::sync::TryLockError;

pub(crate) struct Table<T> {
  capacity: Capacity,
  chains: Mutex<Chains<T>>,
}

impl<T> Table<T> {
  #[inline]
  pub(crate) fn new(capacity: Capacity) -> Self {
    Self {
      capacity,
      chains: Mutex::new(Chains::new(capacity)),
    }
  }

  #[inline]
  pub(crate) const fn cap(&self) -> Capacity {
    self.capacity
  }

  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.lock().len()
  }

  pub(crate) fn reserve(&self, key: Fd, value: T) -> Result<Checkout<'_, T>> {
    let mut guard: MutexGuard<'_, Chains<T>> = self.lock();
    let slot: Slot = guard.push(key, value)?;

    Ok(Checkout::new(guard, slot))
  }

  pub(crate) fn find(&self, key: Fd) -> Result<Checkout<'_, T>> {
    let guard: MutexGuard<'_, Chains<T>> = self.lock();

    Self::checkout(guard, key).ok_or(Error::NotFound)
  }

  pub(crate) fn try_find(&self, key: Fd) -> Result<Option<Checkout<'_, T>>> {
    let Some(guard) = self.try_lock() else {
      return Ok(None);
    };

    match Self::checkout(guard, key) {
      Some(checkout) => Ok(Some(checkout)),
      None => Err(Error::NotFound),
    }
  }

  pub(crate) fn drain<F>(&self, f: F)
  where
    F: FnMut(Fd, T),
  {
    let mut guard: MutexGuard<'_, Chains<T>> = self.lock();

    trace!("destroying table with {} entries", guard.len());

    guard.drain(f);
  }

  #[inline]
  fn checkout(guard: MutexGuard<'_, Chains<T>>, key: Fd) -> Option<Checkout<'_, T>> {
    let slot: Slot = guard.find(key)?;

    Some(Checkout::new(guard, slot))
  }

  // A panicking caller can only poison the lock while holding a checkout, and
  // checkouts never expose the chain structure, so the chains are consistent.
  #[inline]
  fn lock(&self) -> MutexGuard<'_, Chains<T>> {
    self.chains.lock().unwrap_or_else(PoisonError::into_inner)
  }

  #[inline]
  fn try_lock(&self) -> Option<MutexGuard<'_, Chains<T>>> {
    match self.chains.try_lock() {
      Ok(guard) => Some(guard),
      Err(TryLockError::Poisoned(error)) => Some(error.into_inner()),
      Err(TryLockError::WouldBlock) => None,
    }
  }
}
