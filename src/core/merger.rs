//! k-way merge of already-sorted sequences.
//!
//! Sources are consumed as plain iterators, one head element each, so a
//! provider's list never has to be indexed or buffered beyond its head.
//! Equal keys come out in source order (lower source index first), which
//! keeps the output reproducible for identical inputs.

use crate::domain::model::Ranked;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Head<T, K> {
    key: K,
    source: usize,
    item: T,
}

impl<T, K: Ord> PartialEq for Head<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, K: Ord> Eq for Head<T, K> {}

impl<T, K: Ord> PartialOrd for Head<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K: Ord> Ord for Head<T, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.source.cmp(&other.source))
    }
}

/// Lazy merging iterator over `sources`, ordered by `key_fn`.
pub struct KMerge<I, K, F>
where
    I: Iterator,
{
    sources: Vec<I>,
    heap: BinaryHeap<Reverse<Head<I::Item, K>>>,
    key_fn: F,
}

impl<I, K, F> KMerge<I, K, F>
where
    I: Iterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    pub fn new<S>(sources: S, mut key_fn: F) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I>,
    {
        let mut sources: Vec<I> = sources.into_iter().map(IntoIterator::into_iter).collect();
        let mut heap = BinaryHeap::with_capacity(sources.len());

        for (source, iter) in sources.iter_mut().enumerate() {
            if let Some(item) = iter.next() {
                heap.push(Reverse(Head {
                    key: key_fn(&item),
                    source,
                    item,
                }));
            }
        }

        Self {
            sources,
            heap,
            key_fn,
        }
    }
}

impl<I, K, F> Iterator for KMerge<I, K, F>
where
    I: Iterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let Reverse(head) = self.heap.pop()?;

        if let Some(item) = self.sources[head.source].next() {
            self.heap.push(Reverse(Head {
                key: (self.key_fn)(&item),
                source: head.source,
                item,
            }));
        }

        Some(head.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.heap.len();
        self.sources
            .iter()
            .fold((buffered, Some(buffered)), |(low, high), source| {
                let (s_low, s_high) = source.size_hint();
                let high = match (high, s_high) {
                    (Some(h), Some(s)) => h.checked_add(s),
                    _ => None,
                };
                (low.saturating_add(s_low), high)
            })
    }
}

/// Merge sorted `sources` by `key_fn` and collect the result.
pub fn merge_sorted<S, I, K, F>(sources: S, key_fn: F) -> Vec<I::Item>
where
    S: IntoIterator,
    S::Item: IntoIterator<IntoIter = I>,
    I: Iterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    KMerge::new(sources, key_fn).collect()
}

/// Merge sorted `sources` by each item's own rank key.
pub fn merge_ranked<S, I>(sources: S) -> Vec<I::Item>
where
    S: IntoIterator,
    S::Item: IntoIterator<IntoIter = I>,
    I: Iterator,
    I::Item: Ranked,
{
    merge_sorted(sources, |item: &I::Item| item.rank_key())
}
