//! The shared capability surface of storage, views, and expression nodes.
//!
//! [`GridLike`] is the read contract every grid-like kind implements:
//! a fixed [`Shape`] plus coordinate and flattened element access obeying
//! one indexing rule. [`GridLikeMut`] adds indexed writes for the kinds
//! that can accept them. [`Scalar`] is the element-type bound.

use crate::grid::Grid;
use crate::shape::Shape;
use num_complex::{Complex32, Complex64};

/// Element types storable in a grid.
///
/// Implemented for the primitive numerics, `bool`, and the `num_complex`
/// scalars. The trait is open: implement it for your own `Copy` type to use
/// it as a grid element.
pub trait Scalar:
    Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(impl Scalar for $t {})*
    };
}

impl_scalar!(
    f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool
);

impl Scalar for Complex32 {}
impl Scalar for Complex64 {}

/// Read access to a fixed-shape grid of scalars.
///
/// Implementations guarantee the flattened/coordinate equivalence
/// `g.at(i) == g.get(x, y, z)` with `x = i % width`,
/// `y = (i / width) % length`, `z = i / area`, for every `i` in
/// `[0, size)`. Coordinates outside the declared shape are not checked;
/// see the crate documentation for that boundary.
pub trait GridLike {
    type Elem: Scalar;

    /// Whether this kind owns the buffer behind its elements.
    const OWNS_DATA: bool;

    /// Whether indexed writes are available through [`GridLikeMut`].
    const WRITABLE: bool;

    fn shape(&self) -> Shape;

    /// Element at a flattened linear offset.
    fn at(&self, i: usize) -> Self::Elem;

    /// Element at the 3D coordinate (x, y, z).
    fn get(&self, x: usize, y: usize, z: usize) -> Self::Elem;

    /// Element at the 2D coordinate (x, y), fixing z = 0.
    #[inline]
    fn get_xy(&self, x: usize, y: usize) -> Self::Elem {
        self.get(x, y, 0)
    }

    #[inline]
    fn width(&self) -> usize {
        self.shape().width
    }

    #[inline]
    fn length(&self) -> usize {
        self.shape().length
    }

    #[inline]
    fn height(&self) -> usize {
        self.shape().height
    }

    #[inline]
    fn area(&self) -> usize {
        self.shape().area()
    }

    #[inline]
    fn size(&self) -> usize {
        self.shape().size()
    }

    /// Materialize this value into fresh, independent storage.
    ///
    /// Evaluates every element once. The result shares nothing with `self`,
    /// so evaluating a view decouples it from its source.
    fn eval(&self) -> Grid<Self::Elem>
    where
        Self: Sized + Sync,
    {
        Grid::from_grid(self)
    }
}

/// Indexed writes, for storage and for views over writable sources.
pub trait GridLikeMut: GridLike {
    /// Write the element at the 3D coordinate (x, y, z).
    fn set(&mut self, x: usize, y: usize, z: usize, value: Self::Elem);

    /// Write the element at a flattened linear offset.
    fn set_at(&mut self, i: usize, value: Self::Elem);

    /// Write the element at the 2D coordinate (x, y), fixing z = 0.
    #[inline]
    fn set_xy(&mut self, x: usize, y: usize, value: Self::Elem) {
        self.set(x, y, 0, value);
    }
}

// A borrow of a grid-like value is itself a grid-like value, which is how
// operands are captured by reference instead of moved.
impl<G: GridLike> GridLike for &G {
    type Elem = G::Elem;

    const OWNS_DATA: bool = false;
    const WRITABLE: bool = false;

    #[inline]
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    #[inline]
    fn at(&self, i: usize) -> Self::Elem {
        (**self).at(i)
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> Self::Elem {
        (**self).get(x, y, z)
    }
}
