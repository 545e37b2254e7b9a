use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;

use crate::checkout::Checkout;
use crate::error::Error;
use crate::error::Result;
use crate::index::Fd;
use crate::params::Capacity;
use crate::table::Table;

/// A thread-safe table binding user data to file descriptors.
///
/// `FdTab` maps [`Fd`] keys to values of type `T` using a fixed number of
/// hash buckets chosen at construction. Bucket storage is allocated on the
/// first insertion. Every access goes through a [`Checkout`], which holds the
/// table lock until it is released or removed.
///
/// See the [crate-level documentation][crate] for an overview and examples.
///
/// # Memory
///
/// Entry storage grows to the peak number of live entries and is reused by
/// later insertions. It is released once the table becomes empty. The bucket
/// array is kept until the table is destroyed.
///
/// # Examples
///
/// ```
/// use fdtab::FdTab;
///
/// #[derive(Default)]
/// struct Conn {
///   reads: u64,
/// }
///
/// let table: FdTab<Conn> = FdTab::new();
///
/// let mut conn = table.reserve_default(4).unwrap();
/// conn.reads = 1;
/// conn.release();
///
/// let mut conn = table.find(4).unwrap();
/// conn.reads += 1;
/// assert_eq!(conn.reads, 2);
/// ```
pub struct FdTab<T> {
  inner: Table<T>,
}

impl<T> FdTab<T> {
  /// Creates a new, empty table with [`Capacity::DEFAULT`] buckets.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::FdTab;
  ///
  /// let table: FdTab<u8> = FdTab::new();
  /// assert_eq!(table.capacity(), 64);
  /// ```
  #[inline]
  pub fn new() -> Self {
    Self::with_capacity(0)
  }

  /// Creates a new, empty table sized for roughly `hint` file descriptors.
  ///
  /// The bucket count is the smallest power of two not less than `hint`;
  /// hints of zero or below select [`Capacity::DEFAULT`]. The bucket count
  /// never changes afterwards.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::FdTab;
  ///
  /// assert_eq!(FdTab::<u8>::with_capacity(10).capacity(), 16);
  /// assert_eq!(FdTab::<u8>::with_capacity(65).capacity(), 128);
  /// assert_eq!(FdTab::<u8>::with_capacity(-1).capacity(), 64);
  /// ```
  #[inline]
  pub fn with_capacity(hint: isize) -> Self {
    Self {
      inner: Table::new(Capacity::new(hint)),
    }
  }

  /// Returns the number of hash buckets.
  ///
  /// Does not lock the table.
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.inner.cap().get()
  }

  /// Returns the number of entries currently in the table.
  ///
  /// Entries sharing a key are counted individually. Blocks while another
  /// thread holds a checkout, and deadlocks if the calling thread holds one.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::FdTab;
  ///
  /// let table: FdTab<i32> = FdTab::new();
  /// assert_eq!(table.len(), 0);
  ///
  /// table.reserve(1, 10).unwrap().release();
  /// table.reserve(1, 11).unwrap().release();
  /// assert_eq!(table.len(), 2);
  /// ```
  #[inline]
  pub fn len(&self) -> usize {
    self.inner.len()
  }

  /// Returns `true` if the table contains no entries.
  ///
  /// Locks the table like [`len()`].
  ///
  /// [`len()`]: Self::len
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Inserts `value` under `key` and returns a checkout of the new entry.
  ///
  /// An existing entry with the same key is not replaced: the new entry
  /// shadows it until the new entry is removed.
  ///
  /// The table stays locked until the returned checkout is released, which
  /// lets the caller finish initializing the entry before any other thread
  /// can observe it.
  ///
  /// # Errors
  ///
  /// Returns [`Error::OutOfMemory`] if the bucket array or entry storage
  /// cannot be allocated. `value` is dropped and the table is left unlocked.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::FdTab;
  ///
  /// let table: FdTab<&str> = FdTab::new();
  ///
  /// table.reserve(5, "old").unwrap().release();
  /// table.reserve(5, "new").unwrap().release();
  ///
  /// assert_eq!(*table.find(5).unwrap(), "new");
  /// ```
  #[inline]
  pub fn reserve(&self, key: Fd, value: T) -> Result<Checkout<'_, T>> {
    self.inner.reserve(key, value)
  }

  /// Inserts a value produced by `init` under `key`.
  ///
  /// `init` runs before the table is locked.
  ///
  /// # Errors
  ///
  /// See [`reserve()`].
  ///
  /// [`reserve()`]: Self::reserve
  #[inline]
  pub fn reserve_with<F>(&self, key: Fd, init: F) -> Result<Checkout<'_, T>>
  where
    F: FnOnce() -> T,
  {
    let value: T = init();

    self.inner.reserve(key, value)
  }

  /// Inserts `T::default()` under `key`.
  ///
  /// # Errors
  ///
  /// See [`reserve()`].
  ///
  /// [`reserve()`]: Self::reserve
  #[inline]
  pub fn reserve_default(&self, key: Fd) -> Result<Checkout<'_, T>>
  where
    T: Default,
  {
    self.reserve_with(key, T::default)
  }

  /// Looks up the most recently inserted entry for `key`.
  ///
  /// Blocks while another thread holds a checkout of this table.
  ///
  /// # Errors
  ///
  /// Returns [`Error::NotFound`] if no entry exists for `key`. The table is
  /// unlocked before returning.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::{Error, FdTab};
  ///
  /// let table: FdTab<u64> = FdTab::new();
  ///
  /// assert_eq!(table.find(9).unwrap_err(), Error::NotFound);
  ///
  /// table.reserve(9, 900).unwrap().release();
  /// assert_eq!(*table.find(9).unwrap(), 900);
  /// ```
  #[inline]
  pub fn find(&self, key: Fd) -> Result<Checkout<'_, T>> {
    self.inner.find(key)
  }

  /// Looks up `key` without blocking.
  ///
  /// Returns `Ok(None)` if the table is currently locked.
  ///
  /// # Errors
  ///
  /// Returns [`Error::NotFound`] if the table was acquired but holds no entry
  /// for `key`.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::FdTab;
  ///
  /// let table: FdTab<u64> = FdTab::new();
  /// let held = table.reserve(1, 10).unwrap();
  ///
  /// assert!(table.try_find(1).unwrap().is_none());
  ///
  /// held.release();
  /// assert_eq!(table.try_find(1).unwrap().map(|entry| *entry), Some(10));
  /// ```
  #[inline]
  pub fn try_find(&self, key: Fd) -> Result<Option<Checkout<'_, T>>> {
    self.inner.try_find(key)
  }

  /// Destroys the table, passing every remaining entry to `f`.
  ///
  /// Buckets are visited in index order and entries sharing a bucket from
  /// newest to oldest. Each entry is handed to `f` exactly once. Dropping the
  /// table is equivalent to calling this with a no-op callback.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::FdTab;
  ///
  /// let table: FdTab<i32> = FdTab::new();
  ///
  /// for fd in [1, 2, 65] {
  ///   table.reserve(fd, fd * 10).unwrap().release();
  /// }
  ///
  /// let mut seen: Vec<(i32, i32)> = Vec::new();
  /// table.destroy_with(|fd, value| seen.push((fd, value)));
  ///
  /// seen.sort_unstable();
  /// assert_eq!(seen, [(1, 10), (2, 20), (65, 650)]);
  /// ```
  #[inline]
  pub fn destroy_with<F>(self, f: F)
  where
    F: FnMut(Fd, T),
  {
    self.inner.drain(f);
  }
}

impl FdTab<Box<[u8]>> {
  /// Inserts a zeroed byte buffer of `size` bytes under `key`.
  ///
  /// The buffer is allocated before the table is locked and is never resized.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] if `size` exceeds `isize::MAX`, or
  /// [`Error::OutOfMemory`] if the buffer, the bucket array, or the entry
  /// cannot be allocated.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::FdTab;
  ///
  /// let table: FdTab<Box<[u8]>> = FdTab::new();
  ///
  /// let mut data = table.reserve_bytes(0, 4).unwrap();
  /// data.copy_from_slice(&[1, 2, 3, 4]);
  /// data.release();
  ///
  /// assert_eq!(&table.find(0).unwrap()[..], &[1_u8, 2, 3, 4]);
  /// ```
  pub fn reserve_bytes(&self, key: Fd, size: usize) -> Result<Checkout<'_, Box<[u8]>>> {
    if isize::try_from(size).is_err() {
      return Err(Error::InvalidArgument);
    }

    let mut bytes: Vec<u8> = Vec::new();

    if bytes.try_reserve_exact(size).is_err() {
      return Err(Error::OutOfMemory);
    }

    bytes.resize(size, 0);

    self.reserve(key, bytes.into_boxed_slice())
  }
}

impl<T> Debug for FdTab<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("FdTab")
      .field("capacity", &self.inner.cap())
      .finish_non_exhaustive()
  }
}

impl<T> Default for FdTab<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
