//! Lazy operation nodes and operand capture.
//!
//! Binary and unary nodes hold their operation plus operand grid-like
//! values; nothing is computed until an element is read. Nesting is
//! unbounded and never allocates: evaluating a node at an offset evaluates
//! each operand at that offset, then applies the operation.
//!
//! Operands are captured by type: instantiating an operand parameter with
//! `&G` borrows, with `G` takes ownership (the route for temporaries).
//! Scalars become a [`Fill`] of the peer operand's shape.

use crate::grid::Grid;
use crate::ops::{BinaryFn, UnaryFn};
use crate::packed::PackedGrid;
use crate::shape::Shape;
use crate::traits::{GridLike, GridLikeMut, Scalar};
use crate::view::{GridView, GridViewMut};
use crate::{GridError, Result};
use num_complex::{Complex32, Complex64};

/// A lazy binary node: `op(lhs, rhs)` elementwise.
///
/// Built by the arithmetic/logical operators and the named composition
/// functions in [`crate::ops`]. Both operands must share one shape; the
/// check happens here, at composition time.
#[derive(Debug, Clone, Copy)]
pub struct BinExpr<F, L, R> {
    op: F,
    lhs: L,
    rhs: R,
    shape: Shape,
}

impl<F, L, R> BinExpr<F, L, R>
where
    L: GridLike,
    R: GridLike,
    F: BinaryFn<L::Elem, R::Elem>,
{
    /// Compose a binary node, rejecting operands of differing shape.
    pub fn new(op: F, lhs: L, rhs: R) -> Result<Self> {
        let (left, right) = (lhs.shape(), rhs.shape());
        if left != right {
            return Err(GridError::ShapeMismatch {
                lhs: left,
                rhs: right,
            });
        }
        Ok(Self {
            op,
            lhs,
            rhs,
            shape: left,
        })
    }
}

impl<F, L, R> GridLike for BinExpr<F, L, R>
where
    L: GridLike,
    R: GridLike,
    F: BinaryFn<L::Elem, R::Elem>,
{
    type Elem = F::Output;

    const OWNS_DATA: bool = false;
    const WRITABLE: bool = false;

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn at(&self, i: usize) -> Self::Elem {
        self.op.call(self.lhs.at(i), self.rhs.at(i))
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> Self::Elem {
        self.op.call(self.lhs.get(x, y, z), self.rhs.get(x, y, z))
    }
}

/// A lazy unary node: `op(source)` elementwise.
#[derive(Debug, Clone, Copy)]
pub struct UnaryExpr<F, S> {
    op: F,
    source: S,
    shape: Shape,
}

impl<F, S> UnaryExpr<F, S>
where
    S: GridLike,
    F: UnaryFn<S::Elem>,
{
    pub fn new(op: F, source: S) -> Self {
        let shape = source.shape();
        Self { op, source, shape }
    }
}

impl<F, S> GridLike for UnaryExpr<F, S>
where
    S: GridLike,
    F: UnaryFn<S::Elem>,
{
    type Elem = F::Output;

    const OWNS_DATA: bool = false;
    const WRITABLE: bool = false;

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn at(&self, i: usize) -> Self::Elem {
        self.op.call(self.source.at(i))
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> Self::Elem {
        self.op.call(self.source.get(x, y, z))
    }
}

/// A conceptual grid whose every element is one value.
///
/// This is how scalar operands join an expression: the scalar is wrapped in
/// a `Fill` of the peer operand's shape. It also serves as the left operand
/// when a scalar should appear on that side of an operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill<T> {
    value: T,
    shape: Shape,
}

impl<T: Scalar> Fill<T> {
    pub fn new(value: T, shape: impl Into<Shape>) -> Self {
        Self {
            value,
            shape: shape.into(),
        }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Scalar> GridLike for Fill<T> {
    type Elem = T;

    const OWNS_DATA: bool = false;
    const WRITABLE: bool = false;

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn at(&self, _i: usize) -> T {
        self.value
    }

    #[inline]
    fn get(&self, _x: usize, _y: usize, _z: usize) -> T {
        self.value
    }
}

/// Wraps any `Fn(T) -> U` as a unary operation for `transform`.
#[derive(Debug, Clone, Copy)]
pub struct MapFn<F>(pub F);

impl<A, O, F> UnaryFn<A> for MapFn<F>
where
    A: Scalar,
    O: Scalar,
    F: Fn(A) -> O,
{
    type Output = O;

    #[inline(always)]
    fn call(&self, value: A) -> O {
        (self.0)(value)
    }
}

/// Conversion of an operator right-hand side into a grid-like operand.
///
/// Grid-like values pass through unchanged; a bare scalar becomes a
/// [`Fill`] of the peer operand's shape. `T` is the element type of the
/// resulting operand.
pub trait IntoOperand<T: Scalar> {
    type Operand: GridLike<Elem = T>;

    /// Convert, given the shape of the peer operand.
    fn into_operand(self, peer: Shape) -> Self::Operand;
}

// Scalars are enumerated concretely, like the element impls themselves:
// a blanket impl over `Scalar` would collide with the grid impls below.
macro_rules! impl_scalar_operand {
    ($($t:ty),* $(,)?) => {$(
        impl IntoOperand<$t> for $t {
            type Operand = Fill<$t>;

            #[inline]
            fn into_operand(self, peer: Shape) -> Fill<$t> {
                Fill::new(self, peer)
            }
        }
    )*};
}

impl_scalar_operand!(
    f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool,
    Complex32, Complex64
);

macro_rules! impl_grid_operand {
    ($([$($gen:tt)*] $ty:ty),* $(,)?) => {$(
        impl<$($gen)*> IntoOperand<<$ty as GridLike>::Elem> for $ty
        where
            $ty: GridLike,
        {
            type Operand = $ty;

            #[inline]
            fn into_operand(self, _peer: Shape) -> Self {
                self
            }
        }
    )*};
}

impl_grid_operand!(
    [T] Grid<T>,
    ['a, T] &'a Grid<T>,
    [] PackedGrid,
    ['a] &'a PackedGrid,
    [T] Fill<T>,
    ['a, T] &'a Fill<T>,
    [S] GridView<S>,
    ['a, S] &'a GridView<S>,
    ['v, S: GridLikeMut] GridViewMut<'v, S>,
    ['a, 'v, S: GridLikeMut] &'a GridViewMut<'v, S>,
    [F, L, R] BinExpr<F, L, R>,
    ['a, F, L, R] &'a BinExpr<F, L, R>,
    [F, S] UnaryExpr<F, S>,
    ['a, F, S] &'a UnaryExpr<F, S>,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::AddOp;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fill_is_uniform() {
        let fill = Fill::new(2.5f64, (3, 2, 2));
        assert_eq!(fill.shape(), Shape::new(3, 2, 2));
        for i in 0..fill.size() {
            assert_eq!(fill.at(i), 2.5);
        }
        assert_eq!(fill.get(2, 1, 1), 2.5);
    }

    #[test]
    fn test_binary_node_checks_shapes() {
        let a = Grid::<f64>::new((2, 2));
        let b = Grid::<f64>::new((3, 2));
        let err = BinExpr::new(AddOp, &a, &b).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                lhs: Shape::new(2, 2, 1),
                rhs: Shape::new(3, 2, 1),
            }
        );
    }

    #[test]
    fn test_binary_node_evaluates_per_element() {
        let a = Grid::from_slice((2, 2), &[1, 2, 3, 4]).unwrap();
        let b = Grid::from_slice((2, 2), &[10, 20, 30, 40]).unwrap();
        let sum = BinExpr::new(AddOp, &a, &b).unwrap();
        assert_eq!(sum.at(0), 11);
        assert_eq!(sum.get(1, 1, 0), 44);
    }

    #[test]
    fn test_nested_nodes_stay_lazy() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let a = Grid::from_slice(4, &[1, 2, 3, 4]).unwrap();
        let counted = UnaryExpr::new(
            MapFn(|v: i32| {
                CALLS.fetch_add(1, Ordering::SeqCst);
                v * 2
            }),
            &a,
        );
        let nested = BinExpr::new(AddOp, &counted, &counted).unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        assert_eq!(nested.at(2), 12);
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_scalar_operand_adopts_peer_shape() {
        let fill = 3i64.into_operand(Shape::new(2, 2, 2));
        assert_eq!(fill.shape(), Shape::new(2, 2, 2));
        assert_eq!(fill.value(), 3);
    }

    #[test]
    fn test_grid_operand_passes_through() {
        let grid = Grid::from_slice(4, &[1u8, 2, 3, 4]).unwrap();
        let operand = (&grid).into_operand(Shape::new(9, 9, 9));
        assert_eq!(operand.shape(), grid.shape());
    }
}
