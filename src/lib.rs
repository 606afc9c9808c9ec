//! K-way merging of sorted, versioned record runs.
//!
//! Each input is a [`SourceIter`]: a forward cursor over one immutable sorted
//! segment. [`MergingIter`] combines any number of them into a single stream
//! ordered by key and then version, and is itself a [`SourceIter`], so merges
//! nest. It never drops, deduplicates or reorders records beyond that order;
//! picking the visible version of a key is left to whatever consumes the
//! stream.

mod iter;
pub mod merge;
mod options;
mod record;

pub use iter::{RecordIter, SourceIter, VecIter};
pub use merge::{heap::MergeHeap, MergingIter};
pub use options::MergeOptions;
pub use record::{Record, VersionOrder};
