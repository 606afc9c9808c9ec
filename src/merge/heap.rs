use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{iter::SourceIter, record::VersionOrder};

// A positioned source plus its position in the merge's input list. The rank
// breaks ties between identical records so the order is total.
#[derive(Debug)]
struct HeapEntry<I> {
    rank: usize,
    order: VersionOrder,
    iter: I,
}

impl<I> HeapEntry<I>
where
    I: SourceIter,
{
    fn compare(&self, other: &Self) -> Ordering {
        self.order
            .compare(
                self.iter.key(),
                self.iter.version(),
                other.iter.key(),
                other.iter.version(),
            )
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl<I> PartialEq for HeapEntry<I>
where
    I: SourceIter,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<I> Eq for HeapEntry<I> where I: SourceIter {}

impl<I> PartialOrd for HeapEntry<I>
where
    I: SourceIter,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I> Ord for HeapEntry<I>
where
    I: SourceIter,
{
    // BinaryHeap is a max-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).reverse()
    }
}

/// Min-priority queue of positioned sources, keyed on each source's current
/// record.
///
/// Every source in the queue must be positioned: the ordering reads the
/// source's current key and version, so inserting an unpositioned or
/// exhausted source is a bug in the caller.
#[derive(Debug)]
pub struct MergeHeap<I>
where
    I: SourceIter,
{
    heap: BinaryHeap<HeapEntry<I>>,
    order: VersionOrder,
}

impl<I> MergeHeap<I>
where
    I: SourceIter,
{
    pub fn new(order: VersionOrder) -> Self {
        MergeHeap {
            heap: BinaryHeap::new(),
            order,
        }
    }

    pub fn with_capacity(order: VersionOrder, capacity: usize) -> Self {
        MergeHeap {
            heap: BinaryHeap::with_capacity(capacity),
            order,
        }
    }

    pub fn insert(&mut self, rank: usize, iter: I) {
        self.heap.push(HeapEntry {
            rank,
            order: self.order,
            iter,
        });
    }

    pub fn peek_min(&self) -> Option<&I> {
        self.heap.peek().map(|e| &e.iter)
    }

    /// Removes the source holding the smallest record, along with its rank.
    pub fn pop_min(&mut self) -> Option<(usize, I)> {
        self.heap.pop().map(|e| (e.rank, e.iter))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
