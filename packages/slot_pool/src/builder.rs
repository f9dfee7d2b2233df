use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{DropPolicy, SlotPool};

/// Builder for creating an instance of [`SlotPool`].
///
/// The capacity is mandatory, whereas other settings are optional. If you only need to set the
/// capacity, [`SlotPool::new()`] is a shorthand for this builder.
///
/// # Examples
///
/// ```
/// use slot_pool::{DropPolicy, SlotPool};
///
/// let pool = SlotPool::<String>::builder()
///     .capacity(64)
///     .drop_policy(DropPolicy::MayDropItems)
///     .build();
///
/// assert_eq!(pool.capacity(), 64);
/// ```
#[must_use]
pub struct SlotPoolBuilder<T> {
    capacity: Option<usize>,
    drop_policy: DropPolicy,

    _item: PhantomData<T>,
}

impl<T> fmt::Debug for SlotPoolBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotPoolBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &self.capacity)
            .field("drop_policy", &self.drop_policy)
            .finish()
    }
}

impl<T> SlotPoolBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: None,
            drop_policy: DropPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Sets the number of slots in the pool. The pool never grows beyond this.
    ///
    /// The value is validated when the pool is built.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_pool::SlotPool;
    ///
    /// let pool = SlotPool::<u64>::builder().capacity(8).build();
    /// assert_eq!(pool.capacity(), 8);
    /// ```
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the [drop policy][DropPolicy] for the pool. This governs how
    /// to treat remaining values in the pool when the pool is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_pool::{DropPolicy, SlotPool};
    ///
    /// let pool = SlotPool::<u32>::builder()
    ///     .capacity(4)
    ///     .drop_policy(DropPolicy::MustNotDropItems)
    ///     .build();
    /// ```
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Builds the slot pool with the specified configuration.
    ///
    /// All slots are allocated here. No operation on the resulting pool allocates memory.
    ///
    /// # Panics
    ///
    /// Panics if no capacity has been set, or if the capacity is zero or greater than
    /// [`MAX_CAPACITY`][crate::MAX_CAPACITY].
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_pool::SlotPool;
    ///
    /// let pool = SlotPool::<u32>::builder().capacity(1).build();
    /// assert!(pool.is_empty());
    /// ```
    #[must_use]
    pub fn build(self) -> SlotPool<T> {
        let capacity = self.capacity.unwrap_or_else(|| {
            panic!(
                "capacity must be set before building a SlotPool of {}",
                type_name::<T>()
            )
        });

        SlotPool::new_inner(capacity, self.drop_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_settings() {
        let pool = SlotPoolBuilder::<u32>::new()
            .capacity(3)
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();

        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.drop_policy(), DropPolicy::MustNotDropItems);
    }

    #[test]
    fn default_drop_policy_may_drop() {
        let pool = SlotPoolBuilder::<u32>::new().capacity(3).build();

        assert_eq!(pool.drop_policy(), DropPolicy::MayDropItems);
    }

    #[test]
    #[should_panic]
    fn missing_capacity_panics() {
        drop(SlotPoolBuilder::<u32>::new().build());
    }

    #[test]
    fn debug_does_not_require_debug_item() {
        struct Opaque;

        let builder = SlotPoolBuilder::<Opaque>::new().capacity(2);
        let debug = format!("{builder:?}");

        assert!(debug.contains("Opaque"));
        assert!(debug.contains("Some(2)"));
    }
}
