#[cfg(all(loom, shuttle))]
compile_error!("cannot use loom and shuttle at once");

#[cfg(not(any(loom, shuttle)))]
pub(crate) mod sync {
  pub(crate) use ::std::sync::Mutex;
  pub(crate) use ::std::sync::MutexGuard;
  pub(crate) use ::std::sync::PoisonError;
  pub(crate) use ::std::sync::TryLockError;
}

#[cfg(loom)]
pub(crate) mod sync {
  pub(crate) use ::loom::sync::Mutex;
  pub(crate) use ::loom::sync::MutexGuard;
  pub(crate) use ::std::sync::PoisonError;
  pub(crate) use ::std::sync::TryLockError;
}

#[cfg(shuttle)]
pub(crate) mod sync {
  pub(crate) use ::shuttle::sync::Mutex;
  pub(crate) use ::shuttle::sync::MutexGuard;
  pub(crate) use ::std::sync::PoisonError;
  pub(crate) use ::std::sync::TryLockError;
}
