/// Per-slot version number, advanced every time the slot goes from occupied to vacant.
///
/// The counter saturates instead of wrapping. Wrapping would let a handle from 256 releases ago
/// validate again, so a slot whose counter reaches [`Generation::EXHAUSTED`] is instead taken out
/// of circulation until it is explicitly reset.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Generation(u8);

impl Generation {
    pub(crate) const ZERO: Self = Self(0);

    pub(crate) const EXHAUSTED: Self = Self(u8::MAX);

    #[must_use]
    pub(crate) const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub(crate) const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub(crate) fn is_exhausted(self) -> bool {
        self == Self::EXHAUSTED
    }

    /// The next generation, clamped at [`Generation::EXHAUSTED`].
    #[must_use]
    pub(crate) fn advanced(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// One storage cell of a `SlotPool`.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    value: Option<T>,
    generation: Generation,
}

impl<T> Slot<T> {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            value: None,
            generation: Generation::ZERO,
        }
    }

    #[must_use]
    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    #[must_use]
    pub(crate) fn is_occupied(&self) -> bool {
        self.value.is_some()
    }

    /// Whether a new value may be placed in this slot.
    #[must_use]
    pub(crate) fn is_available(&self) -> bool {
        !self.is_occupied() && !self.generation.is_exhausted()
    }

    /// Stores a value in the slot, returning the generation the value lives under.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not available.
    pub(crate) fn fill(&mut self, value: T) -> Generation {
        assert!(
            self.is_available(),
            "attempted to fill a slot that is occupied or generation-exhausted"
        );

        self.value = Some(value);
        self.generation
    }

    /// Clears the slot and moves it to the next generation, invalidating any handle issued
    /// for the current one. Returns the value that was stored, if any.
    #[must_use]
    pub(crate) fn vacate(&mut self) -> Option<T> {
        self.generation = self.generation.advanced();
        self.value.take()
    }

    /// Clears the slot and rewinds it to generation zero.
    #[must_use]
    pub(crate) fn reset(&mut self) -> Option<T> {
        self.generation = Generation::ZERO;
        self.value.take()
    }
}
