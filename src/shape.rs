//! Grid shapes and the linear indexing convention.
//!
//! Every grid-like value carries a [`Shape`]: a (width, length, height)
//! triple fixed at creation. The same flattening rule is used by storage,
//! views, and expression nodes, so any of them can stand in for another.

use std::fmt;

/// The extent of a grid: width, length, and height, each at least 1.
///
/// Derived quantities: `area = width * length` and `size = area * height`.
/// Linear offsets are computed as `z * area + y * width + x`, so `x` is the
/// fastest-varying coordinate and `z` the slowest.
///
/// The fields are public for direct reads. [`new`](Self::new) and the
/// `From` conversions enforce the dimension floor; a struct literal
/// carrying a zero dimension breaks that contract, and the index math
/// (which divides by `width` and `area`) will panic on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub width: usize,
    pub length: usize,
    pub height: usize,
}

impl Shape {
    /// Create a shape. Panics if any dimension is zero.
    pub fn new(width: usize, length: usize, height: usize) -> Self {
        assert!(
            width >= 1 && length >= 1 && height >= 1,
            "grid dimensions must be at least 1, got {}x{}x{}",
            width,
            length,
            height
        );
        Self {
            width,
            length,
            height,
        }
    }

    /// Number of elements in one layer.
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.length
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.area() * self.height
    }

    /// Linear offset of the 3D coordinate (x, y, z).
    #[inline]
    pub fn linear(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.area() + y * self.width + x
    }

    /// Linear offset of the 2D coordinate (x, y), fixing z = 0.
    #[inline]
    pub fn linear_xy(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Decompose a linear offset into its (x, y, z) coordinate.
    ///
    /// Inverse of [`linear`](Self::linear) for offsets in `[0, size)`.
    #[inline]
    pub fn coords(&self, i: usize) -> (usize, usize, usize) {
        (
            i % self.width,
            (i / self.width) % self.length,
            i / self.area(),
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.length, self.height)
    }
}

// Trailing dimensions default to 1, so a 4-element row is `4` and a 2x2
// layer is `(2, 2)`.
impl From<usize> for Shape {
    fn from(width: usize) -> Self {
        Shape::new(width, 1, 1)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((width, length): (usize, usize)) -> Self {
        Shape::new(width, length, 1)
    }
}

impl From<(usize, usize, usize)> for Shape {
    fn from((width, length, height): (usize, usize, usize)) -> Self {
        Shape::new(width, length, height)
    }
}
