use thiserror::Error;

/// Errors that can occur when operating on a [`SlotPool`][crate::SlotPool].
///
/// None of these are fatal to the pool. The pool is left unchanged by any operation that
/// returns an error, though a rejected [`insert()`][crate::SlotPool::insert] drops the value
/// that was passed to it.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An insert was attempted but every slot is either occupied or has exhausted its
    /// generation counter. Exhausted slots only become usable again after a reset.
    ///
    /// The value that could not be inserted has already been dropped.
    #[error("no slot is available: every slot is either occupied or generation-exhausted")]
    NoAvailableSlots,

    /// The handle refers to a slot index beyond the capacity of the pool.
    #[error("handle refers to a slot outside the bounds of the pool")]
    AccessOutOfBounds,

    /// The handle matches the generation of its slot but the slot holds no value.
    ///
    /// This can only be observed after a slot has been forcibly reset while a handle
    /// issued at generation zero was still held by the caller.
    #[error("handle matches its slot generation but the slot holds no value")]
    InvalidHandle,

    /// The slot the handle refers to has been released since the handle was issued.
    #[error("handle is dangling: its slot has been released since the handle was issued")]
    DanglingHandle,
}

/// A specialized `Result` type for slot pool operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug, Copy);

    #[test]
    fn messages_describe_the_failure() {
        assert!(Error::NoAvailableSlots.to_string().contains("no slot is available"));
        assert!(Error::AccessOutOfBounds.to_string().contains("outside the bounds"));
        assert!(Error::InvalidHandle.to_string().contains("holds no value"));
        assert!(Error::DanglingHandle.to_string().contains("dangling"));
    }

    #[test]
    fn usable_as_std_error() {
        let error: Box<dyn std::error::Error + Send + Sync> = Box::new(Error::DanglingHandle);

        assert!(error.source().is_none());
        assert_eq!(error.downcast_ref::<Error>(), Some(&Error::DanglingHandle));
    }
}
