use anyhow::bail;

use crate::iter::SourceIter;

/// Wraps a source and fails its `fail_at`-th call to `advance` (counting from
/// zero) with a read error. Every call after that fails too.
#[derive(Debug)]
pub struct FaultyIter<I>
where
    I: SourceIter,
{
    iter: I,
    calls: usize,
    fail_at: usize,
}

impl<I> FaultyIter<I>
where
    I: SourceIter,
{
    pub fn new(iter: I, fail_at: usize) -> Self {
        FaultyIter {
            iter,
            calls: 0,
            fail_at,
        }
    }
}

impl<I> SourceIter for FaultyIter<I>
where
    I: SourceIter,
{
    fn advance(&mut self) -> anyhow::Result<bool> {
        let call = self.calls;
        self.calls += 1;
        if call >= self.fail_at {
            bail!("source read failure (call {})", call);
        }
        self.iter.advance()
    }

    fn key(&self) -> &[u8] {
        self.iter.key()
    }

    fn version(&self) -> u64 {
        self.iter.version()
    }

    fn value(&self) -> &[u8] {
        self.iter.value()
    }
}
