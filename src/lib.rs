//! # weightset
//!
//! A weighted random *set*: unique elements, integer weights, and draws
//! whose odds track the weights even as membership changes.
//!
//! [`WeightSet`] holds elements with `u32` weights and draws element `e`
//! with probability `weight(e) / total_weight`. Unlike a fixed-distribution
//! table, the set is built to be mutated: insert, erase and reweight freely,
//! then pay a single O(n) index rebuild for the whole batch.
//!
//! There are two primary ways to use it:
//!
//! 1. **Ad-hoc pairs** with [`WeightSet::from_entries`]
//! 2. **Compile-time enums** with the [`WeightedEnum`] derive macro (from the
//!    companion `weightset_macros` crate), which turns an annotated enum into
//!    a ready-to-draw set.
//!
//! ## Quick start (pairs)
//!
//! ```rust,ignore
//! use weightset::WeightSet;
//!
//! # fn main() -> Result<(), weightset::WeightError> {
//! let mut loot = WeightSet::from_entries(0xC0FFEE, [
//!     ("common", 60),
//!     ("uncommon", 30),
//!     ("rare", 9),
//!     ("legendary", 1),
//! ])?;
//!
//! println!("you got: {}", loot.draw().unwrap());
//!
//! loot.erase(&"legendary");          // membership can change at any time
//! loot.modify(&"rare", 10)?;
//! println!("now: {}", loot.draw().unwrap());
//! # Ok(()) }
//! ```
//!
//! ## Quick start (enum + macro)
//!
//! ```rust,ignore
//! use weightset::{WeightSet, WeightedEnum};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, WeightedEnum)]
//! enum Loot {
//!     #[weight(60)] Common,
//!     #[weight(30)] Uncommon,
//!     #[weight(9)]  Rare,
//!     #[weight(1)]  Legendary,
//! }
//!
//! # fn main() -> Result<(), weightset::WeightError> {
//! let mut table: WeightSet<Loot> = Loot::weight_set(7)?;
//! let item = table.draw_owned();     // Option<Loot>
//! # Ok(()) }
//! ```
//!
//! ## Performance
//! * **Mutate**: O(log n) per insert/erase/modify; never rebuilds by itself.
//! * **Refresh**: O(n) rebuild of the cumulative range index, once per batch.
//! * **Draw**: one random integer + an O(log n) binary search.
//!
//! ## Gotchas
//! * Weight `0` keeps an element in the set, but it can never be drawn.
//! * The total weight lives in a `u32`; pushing it past `u32::MAX` is a
//!   [`WeightError::Overflow`], never a silent wrap.
//! * The set owns its RNG, seeded at construction. It deliberately does not
//!   implement `Clone`; use [`WeightSet::fork`] with a fresh seed instead.
//!
//! ## Testing & validation
//! The crate includes tests that check the range partition, zero-weight
//! unreachability, and that empirical frequencies roughly match the weights.

mod engine;
mod error;
mod index;

pub use error::WeightError;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::engine::DrawEngine;
use crate::index::RangeIndex;

/// Derive macro imported from `weightset_macros`.
/// See the crate-level example for usage.
pub use weightset_macros::WeightedEnum;

/// Trait implemented by the `WeightedEnum` derive macro.
///
/// Each variant and its weight is exposed via [`WeightedEnum::ENTRIES`],
/// which enables building a ready-to-draw [`WeightSet`].
pub trait WeightedEnum: Sized + 'static {
    /// All `(variant, weight)` pairs for the enum.
    const ENTRIES: &'static [(Self, u32)];

    /// Convenience constructor that builds a seeded [`WeightSet`] from the
    /// enum entries.
    ///
    /// # Errors
    /// [`WeightError::Overflow`] if the variant weights sum past `u32::MAX`.
    fn weight_set(seed: u64) -> Result<WeightSet<Self>, WeightError>
    where
        Self: Copy + Ord,
    {
        WeightSet::from_entries(seed, Self::ENTRIES.iter().copied())
    }
}

/// A set of unique elements with `u32` weights, drawn at random with
/// probability `weight / total_weight`.
///
/// The element store is a `BTreeMap`, so elements need a total order and
/// iterate in ascending order. Mutations only touch the store and mark the
/// derived cumulative-range index stale; the index is rebuilt wholesale by
/// [`refresh`](Self::refresh), or lazily by the next draw. Boundaries are
/// never carried across mutations.
///
/// The RNG type is swappable (`StdRng` by default); anything
/// `Rng + SeedableRng` works, e.g. `Pcg32` in the benches.
#[derive(Debug)]
pub struct WeightSet<E, R = StdRng> {
    entries: BTreeMap<E, u32>,
    total: u32,
    index: RangeIndex<E>,
    engine: DrawEngine<R>,
    stale: bool,
}

impl<E, R> WeightSet<E, R>
where
    E: Ord,
    R: Rng + SeedableRng,
{
    /// An empty set whose engine is seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            entries: BTreeMap::new(),
            total: 0,
            index: RangeIndex::new(),
            engine: DrawEngine::new(seed),
            stale: false,
        }
    }

    /// Build from any `(element, weight)` iterator.
    ///
    /// # Errors
    /// * [`WeightError::Duplicate`] if an element appears twice.
    /// * [`WeightError::Overflow`] if the weights sum past `u32::MAX`.
    ///
    /// # Complexity
    /// O(n log n) inserts; the index is built on the first draw or refresh.
    pub fn from_entries<I>(seed: u64, entries: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (E, u32)>,
    {
        let mut set = Self::new(seed);
        for (i, (element, weight)) in entries.into_iter().enumerate() {
            if !set.insert(element, weight)? {
                return Err(WeightError::Duplicate { index: i });
            }
        }
        Ok(set)
    }

    /// Reseed the engine. The index and all weights are untouched.
    pub fn seed(&mut self, seed: u64) {
        self.engine.reseed(seed);
    }

    /// Add an element with the given weight. Weight `0` is accepted: the
    /// element becomes a member that no draw can return.
    ///
    /// Returns `Ok(false)` without changing anything if the element is
    /// already present.
    ///
    /// # Errors
    /// [`WeightError::Overflow`] if the new total weight would exceed
    /// `u32::MAX`; the set is left unchanged.
    pub fn insert(&mut self, element: E, weight: u32) -> Result<bool, WeightError> {
        match self.entries.entry(element) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                let total = self
                    .total
                    .checked_add(weight)
                    .ok_or(WeightError::Overflow { total: self.total, weight })?;
                slot.insert(weight);
                self.total = total;
                self.stale = true;
                Ok(true)
            }
        }
    }

    /// Remove an element, returning its weight, or `None` if absent.
    pub fn erase(&mut self, element: &E) -> Option<u32> {
        let weight = self.entries.remove(element)?;
        self.total -= weight;
        self.stale = true;
        Some(weight)
    }

    /// Replace an existing element's weight, returning the previous one.
    /// `Ok(None)` if the element is absent.
    ///
    /// # Errors
    /// [`WeightError::Overflow`] if the adjusted total weight would exceed
    /// `u32::MAX`; the set is left unchanged.
    pub fn modify(&mut self, element: &E, new_weight: u32) -> Result<Option<u32>, WeightError> {
        let Some(slot) = self.entries.get_mut(element) else {
            return Ok(None);
        };
        let prior = *slot;
        let reduced = self.total - prior;
        let total = reduced
            .checked_add(new_weight)
            .ok_or(WeightError::Overflow { total: reduced, weight: new_weight })?;
        *slot = new_weight;
        self.total = total;
        self.stale = true;
        Ok(Some(prior))
    }

    /// Remove every element and reset the total weight to 0.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total = 0;
        self.stale = true;
    }

    /// Whether the element is a member.
    pub fn contains(&self, element: &E) -> bool {
        self.entries.contains_key(element)
    }

    /// Number of elements, zero-weight members included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights; the denominator of every probability.
    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// The element's weight, or `None` if absent.
    pub fn weight(&self, element: &E) -> Option<u32> {
        self.entries.get(element).copied()
    }

    /// The element's selection probability, `weight / total_weight`.
    ///
    /// `None` if the element is absent, and also when the total weight is 0
    /// (no draw can happen, so no probability is defined).
    pub fn probability(&self, element: &E) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let weight = self.weight(element)?;
        Some(f64::from(weight) / f64::from(self.total))
    }

    /// Entries in ascending element order.
    pub fn iter(&self) -> impl Iterator<Item = (&E, u32)> {
        self.entries.iter().map(|(element, &weight)| (element, weight))
    }

    /// Rebuild the cumulative range index from the current entries and
    /// re-bound the engine to `[1, total_weight]`.
    ///
    /// Draws call this lazily after any mutation, so it is never *required*;
    /// call it yourself to choose when the O(n) rebuild happens (e.g. after
    /// a batch of mutations, before a latency-sensitive stretch of draws).
    /// Refreshing twice in a row rebuilds an identical index and consumes no
    /// randomness.
    pub fn refresh(&mut self)
    where
        E: Clone,
    {
        self.index
            .rebuild(self.entries.iter().map(|(element, &weight)| (element, weight)));
        self.engine.rebound(self.total);
        self.stale = false;
    }

    fn ensure_fresh(&mut self)
    where
        E: Clone,
    {
        if self.stale {
            self.refresh();
        }
    }

    /// Draw one element **by reference**, with probability proportional to
    /// its weight. `None` when the total weight is 0 (empty set, or only
    /// zero-weight members).
    ///
    /// # Complexity
    /// O(log n), plus an O(n) index rebuild if a mutation happened since the
    /// last refresh.
    pub fn draw(&mut self) -> Option<&E>
    where
        E: Clone,
    {
        self.ensure_fresh();
        let ticket = self.engine.ticket()?;
        Some(self.index.resolve(ticket))
    }

    /// Draw one element **by value** (clones the selection).
    ///
    /// Prefer [`draw`](Self::draw) if you don't need ownership.
    pub fn draw_owned(&mut self) -> Option<E>
    where
        E: Clone,
    {
        self.draw().cloned()
    }

    /// `n` independent draws with replacement, each resolved exactly as in
    /// [`draw`](Self::draw). Empty when the total weight is 0. Membership
    /// and weights are untouched.
    pub fn sample(&mut self, n: usize) -> Vec<E>
    where
        E: Clone,
    {
        self.ensure_fresh();
        if self.total == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let Some(ticket) = self.engine.ticket() else {
                break;
            };
            out.push(self.index.resolve(ticket).clone());
        }
        out
    }

    /// Copy the entries and total weight into a new set with a freshly
    /// seeded engine and no index.
    ///
    /// This is the only way to duplicate a set: sharing engine state across
    /// instances would silently correlate their draws, so the copy starts
    /// from its own seed and rebuilds its index on first use.
    pub fn fork(&self, seed: u64) -> Self
    where
        E: Clone,
    {
        Self {
            entries: self.entries.clone(),
            total: self.total,
            index: RangeIndex::new(),
            engine: DrawEngine::new(seed),
            stale: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_duplicates() {
        let mut set = WeightSet::<&'static str>::new(1);
        assert_eq!(set.insert("a", 2), Ok(true));
        assert_eq!(set.insert("a", 9), Ok(false));
        assert_eq!(set.len(), 1);
        assert_eq!(set.total_weight(), 2);
        assert_eq!(set.weight(&"a"), Some(2));
    }

    #[test]
    fn total_weight_tracks_every_mutation() {
        let conserved = |set: &WeightSet<u32>| {
            set.iter().map(|(_, weight)| weight).sum::<u32>() == set.total_weight()
        };

        let mut set = WeightSet::<u32>::new(11);
        assert!(conserved(&set));
        set.insert(1, 5).unwrap();
        set.insert(2, 0).unwrap();
        set.insert(3, 7).unwrap();
        assert!(conserved(&set));
        set.modify(&1, 2).unwrap();
        assert!(conserved(&set));
        set.erase(&3);
        assert!(conserved(&set));
        set.clear();
        assert!(conserved(&set));
        assert_eq!(set.total_weight(), 0);
    }

    #[test]
    fn insert_erase_scenario() {
        let mut set = WeightSet::<char>::new(3);
        assert!(set.insert('a', 1).unwrap());
        assert!(set.insert('b', 2).unwrap());
        assert!(set.insert('c', 3).unwrap());
        assert_eq!(set.total_weight(), 6);

        set.refresh();
        let p = set.probability(&'b').unwrap();
        assert!((p - 1.0 / 3.0).abs() < 1e-9);

        assert_eq!(set.erase(&'a'), Some(1));
        assert_eq!(set.total_weight(), 5);
        assert_eq!(set.weight(&'a'), None);
        assert_eq!(set.erase(&'a'), None);

        set.refresh();
        for _ in 0..100 {
            assert_ne!(set.draw(), Some(&'a'));
        }
    }

    #[test]
    fn zero_weight_is_member_but_never_drawn() {
        let mut set = WeightSet::<&'static str>::new(7);
        set.insert("never", 0).unwrap();
        set.insert("always", 5).unwrap();
        set.refresh();

        assert!(set.contains(&"never"));
        assert_eq!(set.probability(&"never"), Some(0.0));
        for _ in 0..1_000 {
            assert_eq!(set.draw(), Some(&"always"));
        }
    }

    #[test]
    fn frequencies_converge_to_weights() {
        let mut set = WeightSet::<&'static str>::new(42);
        set.insert("a", 1).unwrap();
        set.insert("b", 3).unwrap();
        set.refresh();

        let draws = 100_000usize;
        let mut b_count = 0usize;
        for _ in 0..draws {
            if set.draw_owned() == Some("b") {
                b_count += 1;
            }
        }
        let emp = b_count as f64 / draws as f64;
        assert!((emp - 0.75).abs() < 0.01, "emp={emp}");
    }

    #[test]
    fn empty_set_draws_nothing() {
        let mut set = WeightSet::<u8>::new(5);
        assert!(set.is_empty());
        assert_eq!(set.draw(), None);
        assert!(set.sample(5).is_empty());
        assert_eq!(set.probability(&1), None);

        set.insert(1, 0).unwrap();
        set.refresh();
        assert_eq!(set.draw(), None); // a member exists but total weight is 0
        assert!(set.sample(5).is_empty());
        assert_eq!(set.probability(&1), None);
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let mut set = WeightSet::<&'static str>::new(0);
        assert!(set.insert("big", u32::MAX).unwrap());
        assert_eq!(
            set.insert("one", 1),
            Err(WeightError::Overflow { total: u32::MAX, weight: 1 })
        );
        assert_eq!(set.total_weight(), u32::MAX);
        assert!(!set.contains(&"one"));

        assert!(set.insert("zero", 0).unwrap());
        assert_eq!(
            set.modify(&"zero", 1),
            Err(WeightError::Overflow { total: u32::MAX, weight: 1 })
        );
        assert_eq!(set.weight(&"zero"), Some(0));
        assert_eq!(set.total_weight(), u32::MAX);
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let err = WeightSet::<&'static str>::from_entries(1, [("a", 1), ("b", 2), ("a", 3)])
            .unwrap_err();
        assert_eq!(err, WeightError::Duplicate { index: 2 });
    }

    #[test]
    fn refresh_twice_changes_nothing() {
        let entries = [("x", 2u32), ("y", 5), ("z", 1)];
        let mut once = WeightSet::<&'static str>::from_entries(99, entries).unwrap();
        let mut twice = WeightSet::<&'static str>::from_entries(99, entries).unwrap();
        once.refresh();
        twice.refresh();
        twice.refresh();
        for _ in 0..50 {
            assert_eq!(once.draw_owned(), twice.draw_owned());
        }
    }

    #[test]
    fn modify_replaces_weight_and_reports_prior() {
        let mut set = WeightSet::<&'static str>::new(17);
        set.insert("x", 4).unwrap();
        assert_eq!(set.modify(&"x", 9), Ok(Some(4)));
        assert_eq!(set.weight(&"x"), Some(9));
        assert_eq!(set.total_weight(), 9);
        assert_eq!(set.modify(&"missing", 1), Ok(None));
        assert_eq!(set.total_weight(), 9);
    }

    #[test]
    fn draws_see_mutations_without_explicit_refresh() {
        let mut set = WeightSet::<&'static str>::new(21);
        set.insert("first", 1).unwrap();
        assert_eq!(set.draw(), Some(&"first"));

        set.erase(&"first");
        set.insert("second", 4).unwrap();
        assert_eq!(set.draw(), Some(&"second"));

        set.modify(&"second", 0).unwrap();
        assert_eq!(set.draw(), None);
    }

    #[test]
    fn sample_draws_independently() {
        let mut set = WeightSet::<&'static str>::new(13);
        set.insert("heads", 1).unwrap();
        set.insert("tails", 1).unwrap();

        // 64 fair draws miss a side with probability 2^-63
        let sample = set.sample(64);
        assert_eq!(sample.len(), 64);
        assert!(sample.contains(&"heads"));
        assert!(sample.contains(&"tails"));
    }

    #[test]
    fn reseeding_reproduces_draw_sequence() {
        let mut set = WeightSet::<u8>::from_entries(5, [(1, 1), (2, 2), (3, 3)]).unwrap();
        set.refresh();
        let first: Vec<_> = (0..20).map(|_| set.draw_owned().unwrap()).collect();
        set.seed(5);
        let second: Vec<_> = (0..20).map(|_| set.draw_owned().unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fork_copies_entries_with_fresh_engine() {
        let mut set = WeightSet::<&'static str>::new(31);
        set.insert("a", 2).unwrap();
        set.insert("b", 6).unwrap();
        set.refresh();
        set.draw();

        let mut fork = set.fork(77);
        assert_eq!(fork.len(), 2);
        assert_eq!(fork.total_weight(), 8);
        assert_eq!(fork.weight(&"b"), Some(6));
        assert!(fork.draw().is_some());

        fork.erase(&"a");
        assert!(set.contains(&"a"));
        assert_eq!(set.total_weight(), 8);
    }

    #[test]
    fn clear_empties_everything() {
        let mut set = WeightSet::<u8>::new(2);
        set.insert(1, 1).unwrap();
        set.insert(2, 2).unwrap();
        set.refresh();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.total_weight(), 0);
        assert_eq!(set.draw(), None);
    }
}
