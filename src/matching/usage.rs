//! Usage counts of palette images within a single matching run

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Number of sections each image has been assigned to so far
///
/// Reads of images never recorded return zero, so the counter never needs
/// to be seeded with the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCounter<I: Eq + Hash> {
    counts: HashMap<I, usize>,
}

impl<I: Eq + Hash> Default for UsageCounter<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Eq + Hash> UsageCounter<I> {
    /// Create a counter where every image reads as unused
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Times an image has been assigned, zero if never
    pub fn count<Q>(&self, id: &Q) -> usize
    where
        I: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Record one more assignment and return the updated count
    pub fn record(&mut self, id: I) -> usize {
        let count = self.counts.entry(id).or_insert(0);
        *count += 1;
        *count
    }

    /// Number of distinct images used at least once
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all recorded assignments
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Image with the highest count
    ///
    /// Among equal counts the choice is unspecified.
    pub fn most_used(&self) -> Option<(&I, usize)> {
        self.counts
            .iter()
            .max_by_key(|&(_, &count)| count)
            .map(|(id, &count)| (id, count))
    }

    /// Iterate over used images and their counts in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&I, usize)> {
        self.counts.iter().map(|(id, &count)| (id, count))
    }
}
