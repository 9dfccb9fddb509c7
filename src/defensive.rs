//! Defensive-copy holder.
//!
//! `DefensiveBuffer` breaks aliasing with the caller in both directions: the
//! source slice is copied into internally-owned storage at construction, and
//! every accessor that exposes the contents hands out a fresh copy. No
//! reference held outside the buffer can observe or cause mutation of its
//! internal state.

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct DefensiveBuffer<T> {
    items: Box<[T]>,
}

impl<T: Clone> DefensiveBuffer<T> {
    /// Copy `source` into internally-owned storage. Later mutation of the
    /// caller's data has no effect on this buffer.
    pub fn new(source: &[T]) -> Self {
        Self {
            items: source.to_vec().into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A fresh copy of the contents. Each call clones again, so mutating a
    /// returned snapshot never changes the next one.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.to_vec()
    }

    /// Element at `index`, or `Error::OutOfRange` outside `[0, len)`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        self.items.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Copy of the half-open range `[start, end)`.
    ///
    /// `start > end` is an invalid argument; `end > len` is out of range.
    /// Both abort the call with nothing copied.
    pub fn window(&self, start: usize, end: usize) -> Result<Vec<T>, Error> {
        if start > end {
            return Err(Error::InvalidArgument(format!(
                "window start {start} is past end {end}"
            )));
        }
        if end > self.items.len() {
            return Err(Error::OutOfRange {
                index: end,
                len: self.items.len(),
            });
        }
        Ok(self.items[start..end].to_vec())
    }
}

impl<T: Clone> From<&[T]> for DefensiveBuffer<T> {
    fn from(source: &[T]) -> Self {
        Self::new(source)
    }
}
