//! Lock-free scalar shared between a contributor and its owner.
//!
//! Contributors are registered with the anxiety engine as `Arc` handles, so
//! whoever drives them (weather, zones, player actions) mutates their state
//! through a shared reference.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// An `f32` behind an atomic.
#[derive(Debug, Default)]
pub struct SharedScalar(AtomicU32);

impl SharedScalar {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A `bool` behind an atomic.
#[derive(Debug, Default)]
pub struct SharedFlag(AtomicBool);

impl SharedFlag {
    pub fn new(value: bool) -> Self {
        Self(AtomicBool::new(value))
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_round_trips_negative_and_fractional_values() {
        let scalar = SharedScalar::new(0.25);
        assert_eq!(scalar.get(), 0.25);
        scalar.set(-3.5);
        assert_eq!(scalar.get(), -3.5);
    }
}
