use std::cmp::Ordering;

use anyhow::bail;
use tracing::{debug, error, trace, warn};

use crate::{iter::SourceIter, options::MergeOptions};

use self::heap::MergeHeap;

pub mod heap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    // No record has been captured yet.
    Unpositioned,
    Positioned,
    // An advance found the queue empty.
    Exhausted,
    // A source failed, or verification caught an unsorted source. Nothing
    // more comes out of this iterator.
    Poisoned,
}

/// Merges any number of sorted sources into one sorted stream.
///
/// Records come out ordered by key, then by version in the configured
/// direction, then by the index of the source they came from. Nothing is
/// deduplicated: every record of every source is emitted exactly once.
///
/// There are two ways to step the merge. The inherent [`MergingIter::advance`]
/// returns whether a *further* call will produce a record. The
/// [`SourceIter`] impl returns whether the call itself produced one, which is
/// what an outer merge (or [`crate::RecordIter`]) needs.
#[derive(Debug)]
pub struct MergingIter<I>
where
    I: SourceIter,
{
    heap: MergeHeap<I>,
    options: MergeOptions,
    state: State,
    emitted: usize,

    key: Vec<u8>,
    version: u64,
    value: Vec<u8>,
}

impl<I> MergingIter<I>
where
    I: SourceIter,
{
    pub fn new<J>(sources: J) -> anyhow::Result<Self>
    where
        J: IntoIterator<Item = I>,
    {
        Self::with_options(sources, MergeOptions::default())
    }

    /// Positions every source on its first record and queues the ones that
    /// have one. If any source fails, its error is returned as-is and no
    /// iterator is built.
    pub fn with_options<J>(sources: J, options: MergeOptions) -> anyhow::Result<Self>
    where
        J: IntoIterator<Item = I>,
    {
        let sources = sources.into_iter();
        let mut heap = MergeHeap::with_capacity(options.version_order, sources.size_hint().0);
        let mut total = 0;
        for (rank, mut iter) in sources.enumerate() {
            total += 1;
            match iter.advance() {
                Ok(true) => heap.insert(rank, iter),
                Ok(false) => trace!(rank, "source empty at merge start"),
                Err(err) => {
                    error!(error = ?err, rank, "source failed while starting merge");
                    return Err(err);
                }
            }
        }
        debug!(
            sources = total,
            active = heap.len(),
            order = ?options.version_order,
            "merging iterator ready"
        );

        Ok(MergingIter {
            heap,
            options,
            state: State::Unpositioned,
            emitted: 0,
            key: Vec::new(),
            version: 0,
            value: Vec::new(),
        })
    }

    /// Captures the smallest queued record as the current one and moves its
    /// source forward.
    ///
    /// Returns `Ok(true)` if another call will produce a record. A call that
    /// finds the queue already empty captures nothing and returns
    /// `Ok(false)`. Any error is terminal: later calls fail as well.
    pub fn advance(&mut self) -> anyhow::Result<bool> {
        if self.state == State::Poisoned {
            bail!("merging iterator advanced after a failure");
        }

        if self.heap.is_empty() {
            if self.state != State::Exhausted {
                debug!(emitted = self.emitted, "merging iterator exhausted");
            }
            self.state = State::Exhausted;
            return Ok(false);
        }
        let Some((rank, mut iter)) = self.heap.pop_min() else {
            unreachable!("merge queue emptied between check and pop");
        };

        if self.options.verify_order && self.state == State::Positioned {
            let ord = self.options.version_order.compare(
                iter.key(),
                iter.version(),
                &self.key,
                self.version,
            );
            if ord == Ordering::Less {
                self.state = State::Poisoned;
                warn!(
                    rank,
                    key = ?iter.key(),
                    version = iter.version(),
                    prev_key = ?self.key,
                    prev_version = self.version,
                    "unsorted source"
                );
                bail!(
                    "source {} is out of order: {:?}@{} after {:?}@{}",
                    rank,
                    String::from_utf8_lossy(iter.key()),
                    iter.version(),
                    String::from_utf8_lossy(&self.key),
                    self.version
                );
            }
        }

        self.key.clear();
        self.key.extend_from_slice(iter.key());
        self.version = iter.version();
        self.value.clear();
        self.value.extend_from_slice(iter.value());
        self.state = State::Positioned;
        self.emitted += 1;
        trace!(rank, key = ?self.key, version = self.version, "merged record");

        match iter.advance() {
            Ok(true) => self.heap.insert(rank, iter),
            Ok(false) => trace!(rank, "source exhausted"),
            Err(err) => {
                self.state = State::Poisoned;
                error!(error = ?err, rank, emitted = self.emitted, "source failed mid-merge");
                return Err(err);
            }
        }

        Ok(!self.heap.is_empty())
    }

    /// True once no further record can be produced, either because every
    /// source ran dry or because the merge failed.
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Poisoned || self.heap.is_empty()
    }

    /// Number of sources that still hold a record. Zero after a failure.
    pub fn remaining_sources(&self) -> usize {
        if self.state == State::Poisoned {
            0
        } else {
            self.heap.len()
        }
    }

    /// Number of records produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }
}

impl<I> SourceIter for MergingIter<I>
where
    I: SourceIter,
{
    fn advance(&mut self) -> anyhow::Result<bool> {
        let had_record = !self.heap.is_empty();
        MergingIter::advance(self)?;
        Ok(had_record)
    }

    fn key(&self) -> &[u8] {
        debug_assert_eq!(self.state, State::Positioned);
        &self.key
    }

    fn version(&self) -> u64 {
        debug_assert_eq!(self.state, State::Positioned);
        self.version
    }

    fn value(&self) -> &[u8] {
        debug_assert_eq!(self.state, State::Positioned);
        &self.value
    }
}
