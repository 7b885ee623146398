//! Derived cumulative-range index: maps each positive-weight element to a
//! disjoint sub-range of `[1, total]` and resolves tickets by binary search.

/// Cumulative ranges over the store's entries, rebuilt wholesale on every
/// refresh. Entry `i` owns the ticket range `(uppers[i-1], uppers[i]]`,
/// starting at 1; the bounds are strictly increasing because zero-weight
/// entries are skipped at build time.
#[derive(Debug)]
pub(crate) struct RangeIndex<E> {
    uppers: Vec<u32>,
    elements: Vec<E>,
}

impl<E> RangeIndex<E> {
    pub(crate) fn new() -> Self {
        Self {
            uppers: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Rebuild from entries in the store's canonical (ascending element)
    /// order. An entry with weight 0 gets no range and stays unreachable.
    ///
    /// The store has already guarded the weight sum against overflow.
    pub(crate) fn rebuild<'a, I>(&mut self, entries: I)
    where
        E: Clone + 'a,
        I: IntoIterator<Item = (&'a E, u32)>,
    {
        self.uppers.clear();
        self.elements.clear();
        let mut upper = 0u32;
        for (element, weight) in entries {
            if weight == 0 {
                continue;
            }
            upper += weight;
            self.uppers.push(upper);
            self.elements.push(element.clone());
        }
    }

    /// Resolve a ticket in `[1, total]` to the element whose range contains
    /// it: the first cumulative upper bound at or above the ticket. O(log n).
    ///
    /// # Panics
    /// On a ticket outside `[1, total]`, which a freshly rebuilt index never
    /// receives.
    pub(crate) fn resolve(&self, ticket: u32) -> &E {
        let i = self.uppers.partition_point(|&upper| upper < ticket);
        &self.elements[i]
    }

    /// `(lower, upper)` per indexed entry, for checking the partition.
    #[cfg(test)]
    fn ranges(&self) -> Vec<(u32, u32)> {
        let mut lower = 1u32;
        let mut out = Vec::with_capacity(self.uppers.len());
        for &upper in &self.uppers {
            out.push((lower, upper));
            lower = upper + 1;
        }
        out
    }
}
