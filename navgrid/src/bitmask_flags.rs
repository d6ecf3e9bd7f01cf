//! Packed flag sets.
//!
//! The movement controller keeps the modes an actor may enter as one bit per
//! [`MovementMode`](crate::MovementMode), so checking a transition is a single mask test.

use num_traits::{One, PrimInt};

/// An enum that can be stored as one bit of a [`BitmaskFlags`].
///
/// Implementors are `#[repr(u8)]` enums whose discriminant is the bit. `bit_index` must be
/// below the bit width of `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        Self::Storage::one() << usize::from(self.bit_index())
    }
}

/// Set of `FlagBitmask` values packed into `T`.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn from_flags<U: FlagBitmask<Storage = T> + Copy>(flags: &[U]) -> Self {
        let mut set = Self::new(T::zero());
        set.add_many(flags);
        set
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn add_many<U: FlagBitmask<Storage = T> + Copy>(&mut self, flags: &[U]) {
        self.bits = flags.iter().fold(self.bits, |acc, f| acc | f.mask());
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    /// True when at least one of `flags` is set. An empty slice matches nothing.
    pub fn has_any<U: FlagBitmask<Storage = T> + Copy>(&self, flags: &[U]) -> bool {
        flags.iter().any(|&f| self.has(f))
    }
}
