use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::slot::Generation;

const GENERATION_BITS: u32 = 8;
const GENERATION_MASK: u32 = 0xFF;

/// The largest number of slots a [`SlotPool`][crate::SlotPool] can have.
///
/// A handle packs the slot index into the upper 24 bits of a `u32`, with the lower 8 bits
/// holding the slot generation, which bounds the number of addressable slots.
pub const MAX_CAPACITY: usize = (1 << (u32::BITS - GENERATION_BITS)) - 1;

/// An opaque reference to a value stored in a [`SlotPool`][crate::SlotPool].
///
/// Handles are returned by [`SlotPool::insert()`][crate::SlotPool::insert] and are the only way
/// to access or release the stored value. A handle remembers which generation of its slot it
/// was issued for, so once the value is released the handle becomes dangling and every
/// further use of it is rejected with [`Error::DanglingHandle`][crate::Error::DanglingHandle],
/// even if the slot has since been filled with a new value.
///
/// Handles are cheap to copy and compare. They cannot be constructed or decoded outside the pool.
///
/// # Scope
///
/// A handle is only meaningful for the pool that issued it. The value type is part of the
/// handle type, so handles from a pool of a different item type are rejected at compile time.
/// Handles from a different pool of the same item type are not detected.
///
/// # Example
///
/// ```rust
/// use slot_pool::{Error, SlotPool};
///
/// let mut pool = SlotPool::<&str>::new(4);
///
/// let handle = pool.insert("hello").unwrap();
/// let copy = handle;
///
/// assert_eq!(pool.get(copy), Ok(&"hello"));
///
/// pool.release(handle).unwrap();
/// assert_eq!(pool.get(copy), Err(Error::DanglingHandle));
/// ```
pub struct Handle<T> {
    raw: u32,

    // `fn() -> T` keeps the handle `Send + Sync` regardless of `T`, as it owns no `T`.
    _item: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// # Panics
    ///
    /// Panics if the index does not fit into the bits reserved for it.
    #[must_use]
    pub(crate) fn new(index: usize, generation: Generation) -> Self {
        assert!(
            index < MAX_CAPACITY,
            "slot index {index} does not fit in a handle for {}",
            type_name::<T>()
        );

        let index = u32::try_from(index).expect("guarded by MAX_CAPACITY assertion above");

        Self {
            raw: (index << GENERATION_BITS) | u32::from(generation.get()),
            _item: PhantomData,
        }
    }

    /// The index of the slot this handle refers to.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        usize::try_from(self.raw >> GENERATION_BITS)
            .expect("a 24-bit index always fits in usize on supported targets")
    }

    /// The slot generation this handle was issued for.
    #[must_use]
    pub(crate) fn generation(self) -> Generation {
        Generation::from_raw(
            u8::try_from(self.raw & GENERATION_MASK).expect("masked down to the lowest 8 bits"),
        )
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("index", &self.index())
            .field("generation", &self.generation().get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, const_assert_eq};

    use super::*;

    // The handle owns no item, so it moves between threads even if the item cannot.
    assert_impl_all!(Handle<Rc<u32>>: Send, Sync, Copy);

    const_assert_eq!(MAX_CAPACITY, 16_777_215);

    #[test]
    fn decodes_index_and_generation() {
        let handle = Handle::<u32>::new(5, Generation::from_raw(3));

        assert_eq!(handle.index(), 5);
        assert_eq!(handle.generation(), Generation::from_raw(3));
    }

    #[test]
    fn generation_is_only_the_low_byte() {
        // With a mask that kept the upper bits instead of the lowest byte, the index would
        // bleed into the decoded generation as soon as both are non-zero.
        let handle = Handle::<u32>::new(1, Generation::from_raw(7));

        assert_eq!(handle.raw, 0x107);
        assert_eq!(handle.generation().get(), 7);
        assert_eq!(handle.index(), 1);
    }

    #[test]
    fn extremes_do_not_overlap() {
        let handle = Handle::<u32>::new(MAX_CAPACITY - 1, Generation::EXHAUSTED);

        assert_eq!(handle.index(), MAX_CAPACITY - 1);
        assert_eq!(handle.generation(), Generation::EXHAUSTED);

        let handle = Handle::<u32>::new(MAX_CAPACITY - 1, Generation::ZERO);

        assert_eq!(handle.index(), MAX_CAPACITY - 1);
        assert_eq!(handle.generation(), Generation::ZERO);
    }

    #[test]
    #[should_panic]
    fn index_beyond_capacity_panics() {
        _ = Handle::<u32>::new(MAX_CAPACITY, Generation::ZERO);
    }

    #[test]
    fn equality_covers_index_and_generation() {
        let a = Handle::<u32>::new(2, Generation::from_raw(1));
        let b = Handle::<u32>::new(2, Generation::from_raw(1));
        let other_generation = Handle::<u32>::new(2, Generation::from_raw(2));
        let other_index = Handle::<u32>::new(3, Generation::from_raw(1));

        assert_eq!(a, b);
        assert_ne!(a, other_generation);
        assert_ne!(a, other_index);

        let set: HashSet<_> = [a, b, other_generation, other_index].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn debug_shows_decoded_parts() {
        let handle = Handle::<u32>::new(12, Generation::from_raw(4));

        let debug = format!("{handle:?}");

        assert!(debug.contains("index: 12"));
        assert!(debug.contains("generation: 4"));
        assert!(debug.contains("u32"));
    }
}
