use std::any::type_name;
use std::{fmt, iter, thread};

use tracing::{debug, trace, warn};

use crate::slot::Slot;
use crate::{DropPolicy, Error, Handle, MAX_CAPACITY, Result, SlotPoolBuilder};

/// A fixed-capacity object pool that hands out validated [`Handle`]s instead of references.
///
/// All storage is allocated when the pool is created. Inserting, reading and releasing values
/// never allocates, which makes the pool suitable for real-time and other latency-sensitive code
/// where the number of live values is known up front.
///
/// # Handles and generations
///
/// Every slot carries an 8-bit generation counter. A handle records the slot index together with
/// the generation that was current when the value was inserted. Releasing a value advances the
/// generation of its slot, so any handle still referring to the released value is detected as
/// dangling on its next use, even after the slot has been filled with a new value.
///
/// The counter saturates rather than wrapping around: after 255 releases a slot is no longer
/// handed out by [`insert()`][Self::insert]. [`reusable_slot_count()`][Self::reusable_slot_count]
/// reports how many slots are still in circulation and [`reset()`][Self::reset] or
/// [`reset_slot()`][Self::reset_slot] return exhausted slots to service.
///
/// # Thread safety
///
/// The pool performs no internal synchronization. It can be moved between threads if `T` can be,
/// and shared if `T` can be, but mutation requires exclusive access, so concurrent callers need
/// to wrap it in a mutex.
///
/// # Example
///
/// ```rust
/// use slot_pool::{Error, SlotPool};
///
/// let mut pool = SlotPool::<String>::new(2);
///
/// let alice = pool.insert("Alice".to_string()).unwrap();
/// let bob = pool.insert("Bob".to_string()).unwrap();
///
/// // The pool is now full.
/// assert_eq!(pool.insert("Charlie".to_string()), Err(Error::NoAvailableSlots));
///
/// pool.release(bob).unwrap();
///
/// // Bob's slot is reused but his handle stays invalid.
/// let charlie = pool.insert("Charlie".to_string()).unwrap();
/// assert_eq!(pool.get(bob), Err(Error::DanglingHandle));
/// assert_eq!(pool.get(charlie).unwrap(), "Charlie");
/// assert_eq!(pool.get(alice).unwrap(), "Alice");
/// ```
pub struct SlotPool<T> {
    /// Fixed at construction; never resized.
    slots: Box<[Slot<T>]>,

    /// Number of occupied slots.
    len: usize,

    drop_policy: DropPolicy,
}

impl<T> SlotPool<T> {
    /// # Panics
    ///
    /// Panics if the capacity is zero or greater than [`MAX_CAPACITY`].
    #[must_use]
    pub(crate) fn new_inner(capacity: usize, drop_policy: DropPolicy) -> Self {
        assert!(
            capacity > 0,
            "SlotPool of {} must have non-zero capacity",
            type_name::<T>()
        );
        assert!(
            capacity <= MAX_CAPACITY,
            "SlotPool of {} was given capacity {capacity} but handles can only address {MAX_CAPACITY} slots",
            type_name::<T>()
        );

        let slots = iter::repeat_with(Slot::new)
            .take(capacity)
            .collect::<Box<[_]>>();

        debug!(
            item_type = type_name::<T>(),
            capacity, "created slot pool"
        );

        Self {
            slots,
            len: 0,
            drop_policy,
        }
    }

    /// Creates a new [`SlotPool`] with `capacity` empty slots and the default configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::SlotPool;
    ///
    /// let pool = SlotPool::<u64>::new(10);
    ///
    /// assert_eq!(pool.capacity(), 10);
    /// assert_eq!(pool.len(), 0);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero or greater than [`MAX_CAPACITY`]. Both are programming
    /// errors rather than runtime conditions.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::builder().capacity(capacity).build()
    }

    /// Starts building a new [`SlotPool`].
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::{DropPolicy, SlotPool};
    ///
    /// let pool = SlotPool::<u32>::builder()
    ///     .capacity(32)
    ///     .drop_policy(DropPolicy::MustNotDropItems)
    ///     .build();
    ///
    /// assert!(pool.is_empty());
    /// ```
    pub fn builder() -> SlotPoolBuilder<T> {
        SlotPoolBuilder::new()
    }

    /// The number of slots in the pool, occupied or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The number of values currently stored in the pool.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::SlotPool;
    ///
    /// let mut pool = SlotPool::<i32>::new(4);
    /// assert_eq!(pool.len(), 0);
    ///
    /// let handle = pool.insert(42).unwrap();
    /// assert_eq!(pool.len(), 1);
    ///
    /// pool.release(handle).unwrap();
    /// assert_eq!(pool.len(), 0);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next [`insert()`][Self::insert] would fail.
    ///
    /// A pool can be full while some of its slots are empty, if those slots have exhausted
    /// their generation counter.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.slots.iter().any(Slot::is_available)
    }

    /// The [drop policy][DropPolicy] the pool was created with.
    #[must_use]
    pub fn drop_policy(&self) -> DropPolicy {
        self.drop_policy
    }

    /// Stores a value in the first available slot and returns a handle to it.
    ///
    /// Slots are scanned in index order. A slot is available if it is empty and its generation
    /// counter is not exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAvailableSlots`] if every slot is either occupied or exhausted. The
    /// value is dropped in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::{Error, SlotPool};
    ///
    /// let mut pool = SlotPool::<i32>::new(1);
    ///
    /// let handle = pool.insert(42).unwrap();
    /// assert_eq!(pool.get(handle), Ok(&42));
    ///
    /// assert_eq!(pool.insert(43), Err(Error::NoAvailableSlots));
    /// ```
    pub fn insert(&mut self, value: T) -> Result<Handle<T>> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let Some((index, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_available())
        else {
            debug!(
                item_type = type_name::<T>(),
                len = self.len,
                "rejected insert because no slot is available"
            );
            return Err(Error::NoAvailableSlots);
        };

        let generation = slot.fill(value);

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by capacity <= MAX_CAPACITY in ctor");

        trace!(index, generation = generation.get(), "inserted value");

        Ok(Handle::new(index, generation))
    }

    /// Gets a shared reference to the value referenced by a handle.
    ///
    /// The handle remains valid and can be used again.
    ///
    /// # Errors
    ///
    /// * [`Error::AccessOutOfBounds`] if the handle points beyond the capacity of this pool.
    /// * [`Error::DanglingHandle`] if the value has been released since the handle was issued.
    /// * [`Error::InvalidHandle`] if the slot was reset and holds no value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::SlotPool;
    ///
    /// let mut pool = SlotPool::<String>::new(4);
    /// let handle = pool.insert("Hello".to_string()).unwrap();
    ///
    /// assert_eq!(pool.get(handle).unwrap(), "Hello");
    /// assert_eq!(pool.get(handle).unwrap(), "Hello");
    /// ```
    pub fn get(&self, handle: Handle<T>) -> Result<&T> {
        self.slot(handle)?.value().ok_or(Error::InvalidHandle)
    }

    /// Gets an exclusive reference to the value referenced by a handle.
    ///
    /// # Errors
    ///
    /// Same as [`get()`][Self::get].
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::SlotPool;
    ///
    /// let mut pool = SlotPool::<String>::new(4);
    /// let handle = pool.insert("Hello".to_string()).unwrap();
    ///
    /// pool.get_mut(handle).unwrap().push_str(", World!");
    ///
    /// assert_eq!(pool.get(handle).unwrap(), "Hello, World!");
    /// ```
    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T> {
        self.slot_mut(handle)?
            .value_mut()
            .ok_or(Error::InvalidHandle)
    }

    /// Whether the handle currently refers to a value in this pool, i.e. whether
    /// [`get()`][Self::get] would succeed.
    #[must_use]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_ok()
    }

    /// Releases the value referenced by a handle, dropping it and invalidating the handle.
    ///
    /// A handle pointing beyond the capacity of the pool cannot refer to anything in it, so
    /// releasing one is silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingHandle`] if the value has already been released, including when
    /// the same handle is released twice.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::{Error, SlotPool};
    ///
    /// let mut pool = SlotPool::<u32>::new(4);
    /// let handle = pool.insert(7).unwrap();
    ///
    /// assert_eq!(pool.release(handle), Ok(()));
    /// assert_eq!(pool.release(handle), Err(Error::DanglingHandle));
    /// ```
    pub fn release(&mut self, handle: Handle<T>) -> Result<()> {
        match self.slot(handle) {
            Ok(_) => {}
            Err(Error::AccessOutOfBounds) => {
                trace!(
                    index = handle.index(),
                    "ignored release of handle beyond pool capacity"
                );
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        drop(self.vacate(handle.index()));
        Ok(())
    }

    /// Removes the value referenced by a handle and returns it, invalidating the handle.
    ///
    /// This is [`release()`][Self::release] for callers that want the value back.
    ///
    /// # Errors
    ///
    /// Same as [`get()`][Self::get]. On error the pool is unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::{Error, SlotPool};
    ///
    /// let mut pool = SlotPool::<String>::new(4);
    /// let handle = pool.insert("Hello".to_string()).unwrap();
    ///
    /// assert_eq!(pool.take(handle).unwrap(), "Hello");
    /// assert_eq!(pool.take(handle), Err(Error::DanglingHandle));
    /// ```
    pub fn take(&mut self, handle: Handle<T>) -> Result<T> {
        if !self.slot(handle)?.is_occupied() {
            return Err(Error::InvalidHandle);
        }

        Ok(self
            .vacate(handle.index())
            .expect("we verified above that the slot is occupied"))
    }

    /// Releases whatever is in the slot at `index`, without any handle validation.
    ///
    /// The slot moves to its next generation exactly as with [`release()`][Self::release], so
    /// every handle to it becomes dangling. This is meant for callers that track slot indexes
    /// themselves, e.g. to clear a known range of slots. An index beyond the capacity of the
    /// pool is ignored.
    ///
    /// Releasing an empty slot this way still advances its generation and so still brings it
    /// closer to exhaustion.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::{Error, SlotPool};
    ///
    /// let mut pool = SlotPool::<u32>::new(1);
    /// let handle = pool.insert(7).unwrap();
    ///
    /// pool.release_index(0);
    ///
    /// assert_eq!(pool.get(handle), Err(Error::DanglingHandle));
    /// assert!(pool.is_empty());
    /// ```
    pub fn release_index(&mut self, index: usize) {
        if index >= self.slots.len() {
            trace!(index, "ignored release of index beyond pool capacity");
            return;
        }

        drop(self.vacate(index));
    }

    /// The number of slots whose generation counter is not yet exhausted, whether or not they
    /// currently hold a value.
    ///
    /// This is the number of slots that can still be handed out by [`insert()`][Self::insert]
    /// at some point in the future. As it approaches zero, consider a [`reset()`][Self::reset].
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::SlotPool;
    ///
    /// let mut pool = SlotPool::<u32>::new(1);
    ///
    /// for _ in 0..255 {
    ///     assert_eq!(pool.reusable_slot_count(), 1);
    ///     let handle = pool.insert(1).unwrap();
    ///     pool.release(handle).unwrap();
    /// }
    ///
    /// assert_eq!(pool.reusable_slot_count(), 0);
    /// assert!(pool.insert(1).is_err());
    /// ```
    #[must_use]
    pub fn reusable_slot_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !slot.generation().is_exhausted())
            .count()
    }

    /// Drops every value in the pool and returns every slot to generation zero.
    ///
    /// This is how exhausted slots are brought back into service.
    ///
    /// # Handle reuse
    ///
    /// This does not invalidate outstanding handles. A handle issued at generation zero (the
    /// first value ever stored in its slot) validates again once a new value is inserted in that
    /// slot after the reset, and will then access the new value. Only reset a pool when you know
    /// no handles to it are still in use.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::SlotPool;
    ///
    /// let mut pool = SlotPool::<u32>::new(1);
    ///
    /// for _ in 0..255 {
    ///     let handle = pool.insert(1).unwrap();
    ///     pool.release(handle).unwrap();
    /// }
    /// assert_eq!(pool.reusable_slot_count(), 0);
    ///
    /// pool.reset();
    ///
    /// assert_eq!(pool.reusable_slot_count(), 1);
    /// assert!(pool.insert(2).is_ok());
    /// ```
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            let value = slot.reset();

            // The count must already be correct if dropping the value panics.
            if value.is_some() {
                self.len = self
                    .len
                    .checked_sub(1)
                    .expect("slot was occupied so count must be non-zero");
            }

            drop(value);
        }

        debug!(
            item_type = type_name::<T>(),
            capacity = self.slots.len(),
            "reset all slots"
        );
    }

    /// Drops the value in the slot at `index`, if any, and returns the slot to generation zero.
    ///
    /// An index beyond the capacity of the pool is ignored.
    ///
    /// # Handle reuse
    ///
    /// The same caveat as for [`reset()`][Self::reset] applies: a handle issued for this slot at
    /// generation zero will validate again once the slot is reused.
    pub fn reset_slot(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            trace!(index, "ignored reset of index beyond pool capacity");
            return;
        };

        let value = slot.reset();

        if value.is_some() {
            self.len = self
                .len
                .checked_sub(1)
                .expect("slot was occupied so count must be non-zero");
        }

        drop(value);

        debug!(item_type = type_name::<T>(), index, "reset slot");
    }

    /// Resolves a handle to its slot, checking bounds and generation but not occupancy.
    fn slot(&self, handle: Handle<T>) -> Result<&Slot<T>> {
        let slot = self
            .slots
            .get(handle.index())
            .ok_or(Error::AccessOutOfBounds)?;

        if slot.generation() != handle.generation() {
            return Err(Error::DanglingHandle);
        }

        Ok(slot)
    }

    fn slot_mut(&mut self, handle: Handle<T>) -> Result<&mut Slot<T>> {
        let slot = self
            .slots
            .get_mut(handle.index())
            .ok_or(Error::AccessOutOfBounds)?;

        if slot.generation() != handle.generation() {
            return Err(Error::DanglingHandle);
        }

        Ok(slot)
    }

    /// Empties the slot at `index` and advances its generation, returning the previous value.
    fn vacate(&mut self, index: usize) -> Option<T> {
        let slot = self
            .slots
            .get_mut(index)
            .expect("callers verify the index is in bounds");

        let was_exhausted = slot.generation().is_exhausted();
        let value = slot.vacate();
        let generation = slot.generation();

        if value.is_some() {
            self.len = self
                .len
                .checked_sub(1)
                .expect("slot was occupied so count must be non-zero");
        }

        trace!(
            index,
            generation = generation.get(),
            had_value = value.is_some(),
            "released slot"
        );

        if generation.is_exhausted() && !was_exhausted {
            warn!(
                item_type = type_name::<T>(),
                index,
                reusable_slots = self.reusable_slot_count(),
                "slot generation exhausted, slot will not be reused until reset"
            );
        }

        value
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(debug_assertions)]
    pub(crate) fn integrity_check(&self) {
        let observed_len = self.slots.iter().filter(|slot| slot.is_occupied()).count();

        assert!(
            self.len == observed_len,
            "self.len {} does not match the observed occupied count {} in pool of {}",
            self.len,
            observed_len,
            type_name::<T>()
        );
    }
}

impl<T> fmt::Debug for SlotPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotPool")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &self.slots.len())
            .field("len", &self.len)
            .field("drop_policy", &self.drop_policy)
            .finish_non_exhaustive()
    }
}

impl<T> Drop for SlotPool<T> {
    fn drop(&mut self) {
        // If we are already panicking, we do not want to panic again because that will
        // simply obscure whatever the original panic was, leading to debug difficulties.
        if self.drop_policy == DropPolicy::MustNotDropItems && !thread::panicking() {
            assert!(
                self.is_empty(),
                "dropped a non-empty SlotPool of {} with a policy that says it must be empty when dropped",
                type_name::<T>()
            );
        }
    }
}
