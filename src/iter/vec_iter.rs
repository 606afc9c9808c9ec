use std::rc::Rc;

use crate::{iter::SourceIter, record::Record};

/// A cursor over an in-memory run that is already sorted.
#[derive(Debug, Clone)]
pub struct VecIter {
    // Index of the record the cursor sits on, plus one. Zero means the cursor
    // has not been positioned yet.
    idx: usize,
    contents: Rc<Vec<Record>>,
}

impl VecIter {
    pub fn new(v: Rc<Vec<Record>>) -> Self {
        Self {
            idx: 0,
            contents: v,
        }
    }

    fn current(&self) -> &Record {
        // Reading before positioning is a caller bug, same as for any other
        // source.
        match self.idx.checked_sub(1).and_then(|i| self.contents.get(i)) {
            Some(r) => r,
            None => panic!("VecIter read while not positioned (idx={})", self.idx),
        }
    }
}

impl SourceIter for VecIter {
    fn advance(&mut self) -> anyhow::Result<bool> {
        if self.idx >= self.contents.len() {
            // Park one past the end so accessors keep panicking.
            self.idx = self.contents.len() + 1;
            Ok(false)
        } else {
            self.idx += 1;
            Ok(true)
        }
    }

    fn key(&self) -> &[u8] {
        &self.current().key
    }

    fn version(&self) -> u64 {
        self.current().version
    }

    fn value(&self) -> &[u8] {
        &self.current().value
    }
}
