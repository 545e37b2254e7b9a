use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use core::num::NonZeroUsize;

// -----------------------------------------------------------------------------
// Capacity
// -----------------------------------------------------------------------------

/// A validated bucket count.
///
/// Always a power of two. The bucket index of a key is computed by masking the
/// key with <code>[get()] - 1</code>, see [`mask()`].
///
/// # Construction
///
/// Use [`new()`] to derive a capacity from a caller-provided hint; it rounds up
/// to the nearest power of two. Hints of zero or below select [`DEFAULT`].
///
/// ```
/// use fdtab::Capacity;
///
/// // Exact power of two
/// assert_eq!(Capacity::new(64).get(), 64);
///
/// // Rounded up
/// assert_eq!(Capacity::new(10).get(), 16);
/// assert_eq!(Capacity::new(65).get(), 128);
///
/// // Non-positive hints select the default
/// assert_eq!(Capacity::new(0), Capacity::DEFAULT);
/// assert_eq!(Capacity::new(-5), Capacity::DEFAULT);
/// ```
///
/// [get()]: Self::get
/// [`mask()`]: Self::mask
/// [`new()`]: Self::new
/// [`DEFAULT`]: Self::DEFAULT
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
  /// The bucket count used when no positive hint is given (2⁶ buckets).
  pub const DEFAULT: Self = Self(NonZeroUsize::new(1 << 6).unwrap());

  /// Creates a new [`Capacity`] from a sizing hint.
  ///
  /// Returns the smallest power of two greater than or equal to `hint`, or
  /// [`DEFAULT`] when `hint <= 0`.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::Capacity;
  ///
  /// assert_eq!(Capacity::new(1).get(), 1);
  /// assert_eq!(Capacity::new(100).get(), 128);
  /// ```
  ///
  /// [`DEFAULT`]: Self::DEFAULT
  #[inline]
  pub const fn new(hint: isize) -> Self {
    if hint <= 0 {
      return Self::DEFAULT;
    }

    // `isize::MAX` rounds up to `1 << (usize::BITS - 1)`, which cannot overflow.
    match NonZeroUsize::new(hint.cast_unsigned().next_power_of_two()) {
      Some(count) => Self(count),
      None => Self::DEFAULT,
    }
  }

  /// Returns the bucket count.
  #[inline]
  pub const fn get(self) -> usize {
    self.0.get()
  }

  /// Returns the bucket count as a [`NonZeroUsize`].
  #[inline]
  pub const fn as_nonzero(self) -> NonZeroUsize {
    self.0
  }

  /// Returns the bit mask applied to keys to select a bucket.
  ///
  /// # Examples
  ///
  /// ```
  /// use fdtab::Capacity;
  ///
  /// assert_eq!(Capacity::DEFAULT.mask(), 63);
  /// assert_eq!(Capacity::new(1).mask(), 0);
  /// ```
  #[inline]
  pub const fn mask(self) -> usize {
    self.0.get() - 1
  }

  /// Returns the base-2 logarithm of the bucket count.
  #[inline]
  pub const fn log2(self) -> u32 {
    self.0.trailing_zeros()
  }
}

impl Debug for Capacity {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{:?} (1 << {:?})", self.as_nonzero(), self.log2())
  }
}

impl Default for Capacity {
  #[inline]
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl From<Capacity> for NonZeroUsize {
  #[inline]
  fn from(other: Capacity) -> Self {
    other.as_nonzero()
  }
}

impl From<Capacity> for usize {
  #[inline]
  fn from(other: Capacity) -> Self {
    other.get()
  }
}
