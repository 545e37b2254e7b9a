//! Error types for the `fdtab` crate.

/// Errors reported by [`FdTab`] operations.
///
/// Every error is returned with the table unlocked: a failing call never
/// leaves a checkout behind.
///
/// [`FdTab`]: crate::FdTab
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// An argument cannot be represented by the table.
  ///
  /// Raised for byte payloads larger than `isize::MAX`.
  #[error("invalid argument")]
  InvalidArgument,

  /// Storage for the bucket array or an entry could not be allocated.
  ///
  /// Any partially constructed entry is dropped before returning.
  #[error("out of memory")]
  OutOfMemory,

  /// No entry exists for the requested key.
  ///
  /// Also returned when a removal cannot locate its own entry, which
  /// indicates internal inconsistency.
  #[error("entry not found")]
  NotFound,
}

/// A specialized [`Result`] type for table operations.
///
/// [`Result`]: core::result::Result
pub type Result<T, E = Error> = core::result::Result<T, E>;
