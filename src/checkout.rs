use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use core::ops::Deref;
use core::ops::DerefMut;

use log::warn;

use crate::chain::Chains;
use crate::error::Error;
use crate::error::Result;
use crate::index::Fd;
use crate::index::Slot;
use crate::sync::MutexGuard;

/// Exclusive access to one entry of an [`FdTab`].
///
/// A checkout is returned by [`FdTab::reserve()`], [`FdTab::find()`] and their
/// variants. It holds the table lock for as long as it lives: no other thread
/// can insert, look up, or remove any entry of the same table until the
/// checkout is [released] (or dropped) or [removed].
///
/// Keep checkouts short. Slow or blocking work done while holding one stalls
/// every other user of the table, not just users of this entry. Requesting a
/// second checkout from the same table on the same thread deadlocks.
///
/// # Examples
///
/// ```
/// use fdtab::FdTab;
///
/// let table: FdTab<Vec<u8>> = FdTab::new();
///
/// let mut buffer = table.reserve_default(3).unwrap();
/// buffer.extend_from_slice(b"hello");
/// buffer.release();
///
/// let buffer = table.find(3).unwrap();
/// assert_eq!(buffer.key(), 3);
/// assert_eq!(&buffer[..], b"hello");
/// ```
///
/// [`FdTab`]: crate::FdTab
/// [`FdTab::reserve()`]: crate::FdTab::reserve
/// [`FdTab::find()`]: crate::FdTab::find
/// [released]: Self::release
/// [removed]: Self::remove
#[must_use = "dropping a checkout immediately releases the entry"]
pub struct Checkout<'table, T> {
  guard: MutexGuard<'table, Chains<T>>,
  slot: Slot,
}

impl<'table, T> Checkout<'table, T> {
  #[inline]
  pub(crate) fn new(guard: MutexGuard<'table, Chains<T>>, slot: Slot) -> Self {
    Self { guard, slot }
  }

  /// Returns the key this entry is stored under.
  #[inline]
  pub fn key(&self) -> Fd {
    self.guard.key(self.slot)
  }

  /// Releases the entry and unlocks the table.
  ///
  /// Equivalent to dropping the checkout.
  #[inline]
  pub fn release(self) {
    drop(self);
  }

  /// Removes the entry from the table, unlocks the table, and returns the
  /// stored value.
  ///
  /// Only this exact entry is removed: if older entries share its key, the
  /// most recent of them becomes visible to [`FdTab::find()`] again.
  ///
  /// # Errors
  ///
  /// Returns [`Error::NotFound`] if the entry is no longer linked into its
  /// bucket chain. This indicates internal inconsistency and does not occur
  /// under normal use. The table is unlocked in either case.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::{Error, FdTab};
  ///
  /// let table: FdTab<u32> = FdTab::new();
  ///
  /// table.reserve(7, 70).unwrap().release();
  ///
  /// let value: u32 = table.find(7).unwrap().remove().unwrap();
  /// assert_eq!(value, 70);
  /// assert_eq!(table.find(7).unwrap_err(), Error::NotFound);
  /// ```
  ///
  /// [`FdTab::find()`]: crate::FdTab::find
  pub fn remove(self) -> Result<T> {
    let Self { mut guard, slot } = self;

    match guard.unlink(slot) {
      Some(value) => Ok(value),
      None => {
        warn!("checked-out entry {slot:?} is missing from its bucket chain");
        Err(Error::NotFound)
      }
    }
  }
}

impl<T> Deref for Checkout<'_, T> {
  type Target = T;

  #[inline]
  fn deref(&self) -> &Self::Target {
    self.guard.value(self.slot)
  }
}

impl<T> DerefMut for Checkout<'_, T> {
  #[inline]
  fn deref_mut(&mut self) -> &mut Self::Target {
    self.guard.value_mut(self.slot)
  }
}

impl<T> Debug for Checkout<'_, T>
where
  T: Debug,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Checkout")
      .field("key", &self.key())
      .field("value", &**self)
      .finish()
  }
}
