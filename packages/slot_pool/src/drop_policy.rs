/// Determines what happens to values still held by a [`SlotPool`][crate::SlotPool] when the pool
/// itself is dropped.
///
/// By default, remaining values are dropped together with the pool.
///
/// # Examples
///
/// ```
/// use slot_pool::{DropPolicy, SlotPool};
///
/// // The drop policy is set at pool creation time.
/// let pool = SlotPool::<u32>::builder()
///     .capacity(16)
///     .drop_policy(DropPolicy::MustNotDropItems)
///     .build();
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum DropPolicy {
    /// Values still in the pool are dropped when the pool is dropped. This is the default.
    #[default]
    MayDropItems,

    /// The pool will panic if it still holds values when it is dropped.
    ///
    /// Useful when every value is expected to be explicitly released before teardown, for
    /// example because each release must be paired with some external bookkeeping.
    MustNotDropItems,
}
