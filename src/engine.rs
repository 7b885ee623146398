//! Seeded draw engine: owns the PRNG and the `[1, bound]` ticket
//! distribution configured by the last index rebuild.

use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub(crate) struct DrawEngine<R> {
    rng: R,
    bound: u32,
}

impl<R: SeedableRng> DrawEngine<R> {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: R::seed_from_u64(seed),
            bound: 0,
        }
    }

    /// Replace the PRNG state; the ticket bound is untouched.
    pub(crate) fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

impl<R: Rng> DrawEngine<R> {
    /// Set the upper ticket bound. Bound 0 disables drawing.
    pub(crate) fn rebound(&mut self, bound: u32) {
        self.bound = bound;
    }

    /// One uniform ticket in `[1, bound]`, or `None` while the bound is 0.
    pub(crate) fn ticket(&mut self) -> Option<u32> {
        if self.bound == 0 {
            return None;
        }
        Some(self.rng.random_range(1..=self.bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn no_tickets_while_unbounded() {
        let mut engine = DrawEngine::<StdRng>::new(1);
        assert_eq!(engine.ticket(), None);
        engine.rebound(3);
        assert!(engine.ticket().is_some());
        engine.rebound(0);
        assert_eq!(engine.ticket(), None);
    }

    #[test]
    fn tickets_stay_in_bounds() {
        let mut engine = DrawEngine::<StdRng>::new(9);
        engine.rebound(5);
        for _ in 0..200 {
            let ticket = engine.ticket().unwrap();
            assert!((1..=5).contains(&ticket));
        }
    }

    #[test]
    fn reseeding_reproduces_the_stream() {
        let mut engine = DrawEngine::<StdRng>::new(4);
        engine.rebound(1_000);
        let first: Vec<_> = (0..32).map(|_| engine.ticket().unwrap()).collect();
        engine.reseed(4);
        let second: Vec<_> = (0..32).map(|_| engine.ticket().unwrap()).collect();
        assert_eq!(first, second);
    }
}
