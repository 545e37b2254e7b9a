//! Key and index types.
//!
//! Provides [`Fd`], the public key type, and internal index types for bucket
//! and arena slot addressing.

use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result;
use core::num::NonZeroUsize;

use crate::params::Capacity;

/// The key type of an [`FdTab`].
///
/// Usually a file descriptor. Negative values are accepted; they are
/// reinterpreted as unsigned when selecting a bucket.
///
/// [`FdTab`]: crate::FdTab
pub type Fd = i32;

macro_rules! internal_index {
  ($name:ident) => {
    #[derive(Clone, Copy, PartialEq, Eq)]
    #[repr(transparent)]
    pub(crate) struct $name {
      source: usize,
    }

    impl $name {
      #[inline]
      pub(crate) const fn new(source: usize) -> Self {
        Self { source }
      }

      #[inline]
      pub(crate) const fn get(self) -> usize {
        self.source
      }
    }

    internal_index!(@debug $name);
  };
  // Stored off by one so that `Option<$name>` has the size of `usize`.
  ($name:ident, niche) => {
    #[derive(Clone, Copy, PartialEq, Eq)]
    #[repr(transparent)]
    pub(crate) struct $name {
      source: NonZeroUsize,
    }

    impl $name {
      #[inline]
      pub(crate) const fn new(source: usize) -> Self {
        Self {
          source: NonZeroUsize::MIN.saturating_add(source),
        }
      }

      #[inline]
      pub(crate) const fn get(self) -> usize {
        self.source.get() - 1
      }
    }

    internal_index!(@debug $name);
  };
  (@debug $name:ident) => {
    impl Debug for $name {
      fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Debug::fmt(&self.get(), f)
      }
    }
  };
}

// -----------------------------------------------------------------------------
// Bucket Index
// -----------------------------------------------------------------------------

internal_index!(Bucket);

impl Bucket {
  /// Selects the bucket holding entries for `key`.
  #[inline]
  pub(crate) const fn of(key: Fd, capacity: Capacity) -> Self {
    Self::new(key.cast_unsigned() as usize & capacity.mask())
  }
}

// -----------------------------------------------------------------------------
// Slot Index
// -----------------------------------------------------------------------------

// Position of an entry in the arena. Stable for the entry's lifetime; reused
// only after the entry is unlinked. Arena positions never reach `usize::MAX`.
internal_index!(Slot, niche);
