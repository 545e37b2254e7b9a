//! A thread-safe table binding user data to file descriptors.
//!
//! `fdtab` provides [`FdTab`], a hash table keyed by small integers (usually
//! file descriptors) whose every access is a short exclusive *checkout* of one
//! entry. The checkout doubles as the synchronization primitive: while a
//! [`Checkout`] is alive, the whole table is locked.
//!
//! # Overview
//!
//! The table is split into a fixed number of buckets, selected by masking the
//! key. Bucket storage is only allocated on the first insertion, so tables
//! that are created but never populated cost a single small allocation.
//! Entries sharing a bucket are chained, newest first.
//!
//! # Usage
//!
//! ```
//! use fdtab::{Error, FdTab};
//!
//! // Create a table with the default bucket count
//! let table: FdTab<u32> = FdTab::new();
//!
//! // Insert an entry; the table stays locked until the checkout is released
//! let mut entry = table.reserve(1, 0).unwrap();
//! *entry = 1;
//! entry.release();
//!
//! // Look the entry up and update it in place
//! let mut entry = table.find(1).unwrap();
//! *entry += 1;
//! entry.release();
//!
//! // Remove the entry, taking ownership of its value
//! let value: u32 = table.find(1).unwrap().remove().unwrap();
//! assert_eq!(value, 2);
//!
//! // The entry is gone
//! assert_eq!(table.find(1).unwrap_err(), Error::NotFound);
//! ```
//!
//! # Configuration
//!
//! The bucket count is derived from a hint passed to [`FdTab::with_capacity`]
//! and is fixed for the lifetime of the table:
//!
//! ```
//! use fdtab::{Capacity, FdTab};
//!
//! let table: FdTab<u64> = FdTab::with_capacity(1000);
//! assert_eq!(table.capacity(), 1024);
//!
//! // Zero or negative hints select the default
//! let table: FdTab<u64> = FdTab::with_capacity(0);
//! assert_eq!(table.capacity(), Capacity::DEFAULT.get());
//! ```
//!
//! The table never rehashes. Choose a hint close to the expected number of
//! descriptors; chains grow linearly once that number is exceeded.
//!
//! # Duplicate Keys
//!
//! Insertion does not check for an existing entry. A second entry for the same
//! key shadows the first: lookups return the newest one, and removing it
//! exposes the older entry again.
//!
//! ```
//! use fdtab::FdTab;
//!
//! let table: FdTab<&str> = FdTab::new();
//!
//! table.reserve(3, "first").unwrap().release();
//! table.reserve(3, "second").unwrap().release();
//!
//! assert_eq!(table.find(3).unwrap().remove(), Ok("second"));
//! assert_eq!(*table.find(3).unwrap(), "first");
//! ```
//!
//! # Concurrency
//!
//! [`FdTab`] is [`Sync`] when `T` is [`Send`], so it can be shared between
//! threads directly or through an [`Arc`]. All operations are synchronous and
//! may block on the table lock.
//!
//! ```no_run
//! use fdtab::FdTab;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let table: Arc<FdTab<u64>> = Arc::new(FdTab::new());
//!
//! let handles: Vec<_> = (0..4)
//!   .map(|fd| {
//!     let table = Arc::clone(&table);
//!     thread::spawn(move || {
//!       table.reserve(fd, 0).unwrap().release();
//!
//!       for _ in 0..100 {
//!         *table.find(fd).unwrap() += 1;
//!       }
//!     })
//!   })
//!   .collect();
//!
//! for handle in handles {
//!   handle.join().unwrap();
//! }
//! ```
//!
//! At most one checkout per table is alive at any instant. Holding a checkout
//! while waiting on anything else stalls every thread using the table, and
//! asking the same table for a second checkout from the thread that already
//! holds one deadlocks.
//!
//! # Destruction
//!
//! Dropping an [`FdTab`] drops every remaining value. Use
//! [`FdTab::destroy_with`] to take ownership of them instead, for example to
//! close the descriptors they describe.
//!
//! [`Arc`]: std::sync::Arc
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod chain;
mod checkout;
mod error;
mod index;
mod params;
mod public;
mod table;
mod utils;

#[cfg(test)]
mod tests;

pub(crate) use crate::utils::sync;

pub use self::checkout::Checkout;
pub use self::error::Error;
pub use self::error::Result;
pub use self::index::Fd;
pub use self::params::Capacity;
pub use self::public::FdTab;
