//! A fixed-capacity object pool that hands out opaque, generation-checked handles instead of
//! references.
//!
//! [`SlotPool`] allocates all of its storage up front. Values are inserted into the first free
//! slot and the caller receives a [`Handle`] which is later used to read, modify or release the
//! value. No operation after construction allocates memory.
//!
//! # Stale handle detection
//!
//! Each slot has an 8-bit generation counter that advances whenever the slot is released. A
//! handle remembers the generation it was issued for, so a handle to a released value is
//! reported as [`Error::DanglingHandle`] instead of silently reaching whatever value now occupies
//! the slot. Releasing the same handle twice is rejected in the same way.
//!
//! The counter saturates instead of wrapping around. A slot that has been released 255 times is
//! no longer handed out; [`SlotPool::reusable_slot_count()`] shows how many slots are still in
//! circulation and [`SlotPool::reset()`] brings exhausted slots back. Resetting does not
//! invalidate outstanding handles, so it must only be done when no handles are in use.
//!
//! # Example
//!
//! ```rust
//! use slot_pool::{Error, SlotPool};
//!
//! #[derive(Debug, PartialEq)]
//! struct Foo {
//!     id: u32,
//! }
//!
//! let mut pool = SlotPool::<Foo>::new(1);
//!
//! let h0 = pool.insert(Foo { id: 0 }).unwrap();
//! assert_eq!(pool.insert(Foo { id: 1 }), Err(Error::NoAvailableSlots));
//!
//! pool.release(h0).unwrap();
//!
//! // The slot is reused for a new value under a new generation.
//! let h1 = pool.insert(Foo { id: 1 }).unwrap();
//!
//! assert_eq!(pool.get(h0), Err(Error::DanglingHandle));
//! assert_eq!(pool.get(h1), Ok(&Foo { id: 1 }));
//! ```
//!
//! # Logging
//!
//! The pool emits [`tracing`] events: per-operation events at `TRACE` level, rejected inserts
//! and resets at `DEBUG` level and a `WARN` event whenever a slot exhausts its generation
//! counter. Install a subscriber to see them.

mod builder;
mod drop_policy;
mod error;
mod handle;
mod pool;
mod slot;

pub use builder::*;
pub use drop_policy::*;
pub use error::*;
pub use handle::*;
pub use pool::*;
