//! Bit-packed boolean storage.
//!
//! [`PackedGrid`] stores one element per bit, 64 to a `u64` word. That
//! rules out slice access, iterators over `&mut bool`, and `Index`: a bit
//! has no address. Reads go through `get`/`at` or the unpacking
//! [`PackedGrid::iter`], writes through `set`/`set_at`, and
//! materialization into a packed destination always runs on the calling
//! thread, because two elements can share a word.
//!
//! Unused bits of the last word stay zero, so derived equality and hashing
//! over the words are exact.

use crate::shape::Shape;
use crate::traits::{GridLike, GridLikeMut};
use crate::{GridError, Result};

const WORD_BITS: usize = 64;

/// A fixed-shape boolean container packed to one bit per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedGrid {
    shape: Shape,
    words: Vec<u64>,
}

impl PackedGrid {
    /// An all-`false` grid.
    pub fn new(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let words = vec![0; (shape.size() + WORD_BITS - 1) / WORD_BITS];
        PackedGrid { shape, words }
    }

    /// A grid initialized from a flat literal in x-fastest order.
    ///
    /// A literal shorter than the grid leaves the tail `false`. A longer
    /// one is rejected before any storage is allocated.
    pub fn from_slice(shape: impl Into<Shape>, values: &[bool]) -> Result<Self> {
        let shape = shape.into();
        let capacity = shape.size();
        if values.len() > capacity {
            return Err(GridError::OversizedInitializer {
                len: values.len(),
                capacity,
            });
        }
        let mut grid = Self::new(shape);
        for (i, &value) in values.iter().enumerate() {
            grid.set_bit(i, value);
        }
        Ok(grid)
    }

    /// Pack any boolean grid-shaped value into fresh storage.
    pub fn from_grid<S>(source: &S) -> Self
    where
        S: GridLike<Elem = bool>,
    {
        let mut grid = Self::new(source.shape());
        for i in 0..grid.shape.size() {
            grid.set_bit(i, source.at(i));
        }
        grid
    }

    /// Overwrite every element from a same-shaped boolean source.
    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: GridLike<Elem = bool>,
    {
        if source.shape() != self.shape {
            return Err(GridError::ShapeMismatch {
                lhs: self.shape,
                rhs: source.shape(),
            });
        }
        for i in 0..self.shape.size() {
            self.set_bit(i, source.at(i));
        }
        Ok(())
    }

    /// The element at `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.bit(self.shape.linear(x, y, z))
    }

    /// The element at flat index `i`.
    #[inline]
    pub fn at(&self, i: usize) -> bool {
        self.bit(i)
    }

    /// Store `value` at `(x, y, z)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: bool) {
        self.set_bit(self.shape.linear(x, y, z), value);
    }

    /// Store `value` at flat index `i`.
    #[inline]
    pub fn set_at(&mut self, i: usize, value: bool) {
        self.set_bit(i, value);
    }

    /// Set every element to `value`. Always runs on the calling thread.
    pub fn fill(&mut self, value: bool) {
        self.words.fill(if value { u64::MAX } else { 0 });
        if value {
            self.mask_tail();
        }
    }

    /// Iterate the elements in linear order, unpacking each bit.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.shape.size()).map(move |i| self.bit(i))
    }

    #[inline]
    fn bit(&self, i: usize) -> bool {
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 != 0
    }

    #[inline]
    fn set_bit(&mut self, i: usize, value: bool) {
        let mask = 1u64 << (i % WORD_BITS);
        if value {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    // Keeps the bits past `size` zero so word-for-word equality holds.
    fn mask_tail(&mut self) {
        let used = self.shape.size() % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}

impl GridLike for PackedGrid {
    type Elem = bool;

    const OWNS_DATA: bool = true;
    const WRITABLE: bool = true;

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn at(&self, i: usize) -> bool {
        self.bit(i)
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.bit(self.shape.linear(x, y, z))
    }
}

impl GridLikeMut for PackedGrid {
    #[inline]
    fn set_at(&mut self, i: usize, value: bool) {
        self.set_bit(i, value);
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, z: usize, value: bool) {
        self.set_bit(self.shape.linear(x, y, z), value);
    }
}
