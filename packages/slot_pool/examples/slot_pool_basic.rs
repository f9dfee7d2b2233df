//! Walks through the handle lifecycle of a `SlotPool` with logging enabled.
//!
//! Run with `RUST_LOG` unset; the example installs a subscriber at `TRACE` level so every pool
//! event is printed.

use slot_pool::{Error, SlotPool};
use tracing::Level;

#[derive(Debug)]
struct Particle {
    x: f32,
    y: f32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_target(false)
        .init();

    let mut pool = SlotPool::<Particle>::new(2);

    let a = pool.insert(Particle { x: 0.0, y: 0.0 }).unwrap();
    let b = pool.insert(Particle { x: 1.0, y: 1.0 }).unwrap();

    match pool.insert(Particle { x: 2.0, y: 2.0 }) {
        Err(Error::NoAvailableSlots) => println!("pool is full, as expected"),
        other => println!("unexpected result: {other:?}"),
    }

    pool.get_mut(a).unwrap().x = 10.0;

    let particle = pool.get(a).unwrap();
    println!("particle a is at ({}, {})", particle.x, particle.y);

    pool.release(b).unwrap();
    let c = pool.insert(Particle { x: 3.0, y: 3.0 }).unwrap();

    // `b` and `c` share a slot, but `b` is from an older generation.
    println!("lookup via stale handle: {:?}", pool.get(b));
    println!("lookup via fresh handle: {:?}", pool.get(c));

    // Churn one slot until its generation counter runs out.
    let mut handle = c;
    while pool.take(handle).is_ok() {
        match pool.insert(Particle { x: 0.0, y: 0.0 }) {
            Ok(next) => handle = next,
            Err(e) => {
                println!("slot retired: {e}");
                break;
            }
        }
    }

    println!("reusable slots: {}", pool.reusable_slot_count());

    pool.reset();
    println!("reusable slots after reset: {}", pool.reusable_slot_count());
}
