use crate::record::Record;

#[cfg(test)]
pub(crate) mod faulty_iter;
mod vec_iter;

pub use vec_iter::VecIter;

/// A forward cursor over one sorted run of records.
///
/// A fresh cursor is not positioned on anything: the first call to
/// `advance` moves it onto its first record. The accessors are only
/// meaningful after an `advance` that returned `Ok(true)`.
pub trait SourceIter {
    // Moves to the next record. Returns false, without error, once the run is
    // exhausted.
    fn advance(&mut self) -> anyhow::Result<bool>;

    fn key(&self) -> &[u8];
    fn version(&self) -> u64;
    fn value(&self) -> &[u8];

    fn record(&self) -> Record {
        Record::new(self.key(), self.version(), self.value())
    }
}

// Lending a cursor to a merge leaves it owned by the caller.
impl<I> SourceIter for &mut I
where
    I: SourceIter + ?Sized,
{
    fn advance(&mut self) -> anyhow::Result<bool> {
        (**self).advance()
    }

    fn key(&self) -> &[u8] {
        (**self).key()
    }

    fn version(&self) -> u64 {
        (**self).version()
    }

    fn value(&self) -> &[u8] {
        (**self).value()
    }
}

impl<I> SourceIter for Box<I>
where
    I: SourceIter + ?Sized,
{
    fn advance(&mut self) -> anyhow::Result<bool> {
        (**self).advance()
    }

    fn key(&self) -> &[u8] {
        (**self).key()
    }

    fn version(&self) -> u64 {
        (**self).version()
    }

    fn value(&self) -> &[u8] {
        (**self).value()
    }
}

/// Drains a [`SourceIter`] as a std iterator of owned records.
///
/// The first error is yielded once, after which the iterator is fused.
#[derive(Debug)]
pub struct RecordIter<I>
where
    I: SourceIter,
{
    iter: I,
    done: bool,
}

impl<I> RecordIter<I>
where
    I: SourceIter,
{
    pub fn new(iter: I) -> Self {
        RecordIter { iter, done: false }
    }

    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I> Iterator for RecordIter<I>
where
    I: SourceIter,
{
    type Item = anyhow::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.iter.advance() {
            Ok(true) => Some(Ok(self.iter.record())),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<I> std::iter::FusedIterator for RecordIter<I> where I: SourceIter {}
