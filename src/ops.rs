//! The elementwise operation catalog.
//!
//! Every operation is a unit struct implementing [`BinaryFn`] or
//! [`UnaryFn`], usable three ways: through the corresponding operator
//! (`+ - * /` on numeric grids, `& | !` on boolean grids), through a named
//! composition function (`add`, `less`, `min`, ...), or passed explicitly
//! to [`apply`]. Comparisons have no operator form: Rust's comparison
//! operators return plain `bool`, so `equal`/`less`/... are functions.
//!
//! Named functions report a shape mismatch as `Err`; operators panic with
//! the same message.

use crate::expr::{BinExpr, Fill, IntoOperand, MapFn, UnaryExpr};
use crate::grid::Grid;
use crate::packed::PackedGrid;
use crate::traits::{GridLike, Scalar};
use crate::view::{GridView, GridViewMut};
use crate::Result;
use std::ops::{Add, Div, Mul, Sub};

/// A binary elementwise operation over scalars.
pub trait BinaryFn<A: Scalar, B: Scalar> {
    type Output: Scalar;

    fn call(&self, lhs: A, rhs: B) -> Self::Output;
}

/// A unary elementwise operation over scalars.
pub trait UnaryFn<A: Scalar> {
    type Output: Scalar;

    fn call(&self, value: A) -> Self::Output;
}

/// f(a, b) = a + b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOp;

/// f(a, b) = a - b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubOp;

/// f(a, b) = a * b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MulOp;

/// f(a, b) = a / b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivOp;

/// f(a, b) = a == b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EqOp;

/// f(a, b) = a != b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeOp;

/// f(a, b) = a < b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LtOp;

/// f(a, b) = a <= b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeOp;

/// f(a, b) = a > b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GtOp;

/// f(a, b) = a >= b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeOp;

/// f(a, b) = a && b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AndOp;

/// f(a, b) = a || b
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrOp;

/// f(a) = !a
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotOp;

/// f(a, b) = min(a, b); ties pick `a`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinOp;

/// f(a, b) = max(a, b); ties pick `a`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxOp;

macro_rules! impl_arith_fn {
    ($($op:ident, $trait:ident, $method:ident;)*) => {$(
        impl<T: Scalar + $trait<Output = T>> BinaryFn<T, T> for $op {
            type Output = T;

            #[inline(always)]
            fn call(&self, lhs: T, rhs: T) -> T {
                lhs.$method(rhs)
            }
        }
    )*};
}

impl_arith_fn! {
    AddOp, Add, add;
    SubOp, Sub, sub;
    MulOp, Mul, mul;
    DivOp, Div, div;
}

impl<T: Scalar> BinaryFn<T, T> for EqOp {
    type Output = bool;

    #[inline(always)]
    fn call(&self, lhs: T, rhs: T) -> bool {
        lhs == rhs
    }
}

impl<T: Scalar> BinaryFn<T, T> for NeOp {
    type Output = bool;

    #[inline(always)]
    fn call(&self, lhs: T, rhs: T) -> bool {
        lhs != rhs
    }
}

macro_rules! impl_ord_fn {
    ($($op:ident => $cmp:tt;)*) => {$(
        impl<T: Scalar + PartialOrd> BinaryFn<T, T> for $op {
            type Output = bool;

            #[inline(always)]
            fn call(&self, lhs: T, rhs: T) -> bool {
                lhs $cmp rhs
            }
        }
    )*};
}

impl_ord_fn! {
    LtOp => <;
    LeOp => <=;
    GtOp => >;
    GeOp => >=;
}

impl BinaryFn<bool, bool> for AndOp {
    type Output = bool;

    #[inline(always)]
    fn call(&self, lhs: bool, rhs: bool) -> bool {
        lhs && rhs
    }
}

impl BinaryFn<bool, bool> for OrOp {
    type Output = bool;

    #[inline(always)]
    fn call(&self, lhs: bool, rhs: bool) -> bool {
        lhs || rhs
    }
}

impl UnaryFn<bool> for NotOp {
    type Output = bool;

    #[inline(always)]
    fn call(&self, value: bool) -> bool {
        !value
    }
}

impl<T: Scalar + PartialOrd> BinaryFn<T, T> for MinOp {
    type Output = T;

    #[inline(always)]
    fn call(&self, lhs: T, rhs: T) -> T {
        if rhs < lhs {
            rhs
        } else {
            lhs
        }
    }
}

impl<T: Scalar + PartialOrd> BinaryFn<T, T> for MaxOp {
    type Output = T;

    #[inline(always)]
    fn call(&self, lhs: T, rhs: T) -> T {
        if lhs < rhs {
            rhs
        } else {
            lhs
        }
    }
}

// ============================================================================
// Operator overloads
// ============================================================================

// One impl per (operator, left-hand constructor) pair. The right-hand side
// is anything convertible to an operand of the same element type, so grids,
// views, expressions, and bare scalars all compose. Shape mismatches panic
// here; the named functions return `Err` instead.
macro_rules! impl_grid_binop {
    ($op_trait:ident, $method:ident, $op:ident, [] $lhs:ty) => {
        impl_grid_binop!(@with [Rhs] $op_trait, $method, $op, $lhs);
    };
    ($op_trait:ident, $method:ident, $op:ident, [$($gen:tt)+] $lhs:ty) => {
        impl_grid_binop!(@with [$($gen)+, Rhs] $op_trait, $method, $op, $lhs);
    };
    (@with [$($gen:tt)*] $op_trait:ident, $method:ident, $op:ident, $lhs:ty) => {
        impl<$($gen)*> std::ops::$op_trait<Rhs> for $lhs
        where
            $lhs: GridLike,
            Rhs: IntoOperand<<$lhs as GridLike>::Elem>,
            $op: BinaryFn<<$lhs as GridLike>::Elem, <$lhs as GridLike>::Elem>,
        {
            type Output = BinExpr<$op, $lhs, Rhs::Operand>;

            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                let shape = self.shape();
                match BinExpr::new($op, self, rhs.into_operand(shape)) {
                    Ok(expr) => expr,
                    Err(err) => panic!("{err}"),
                }
            }
        }
    };
}

macro_rules! impl_grid_not {
    ([$($gen:tt)*] $lhs:ty) => {
        impl<$($gen)*> std::ops::Not for $lhs
        where
            $lhs: GridLike,
            NotOp: UnaryFn<<$lhs as GridLike>::Elem>,
        {
            type Output = UnaryExpr<NotOp, $lhs>;

            #[inline]
            fn not(self) -> Self::Output {
                UnaryExpr::new(NotOp, self)
            }
        }
    };
}

macro_rules! impl_grid_operators {
    ($([$($gen:tt)*] $lhs:ty),* $(,)?) => {$(
        impl_grid_binop!(Add, add, AddOp, [$($gen)*] $lhs);
        impl_grid_binop!(Sub, sub, SubOp, [$($gen)*] $lhs);
        impl_grid_binop!(Mul, mul, MulOp, [$($gen)*] $lhs);
        impl_grid_binop!(Div, div, DivOp, [$($gen)*] $lhs);
        impl_grid_binop!(BitAnd, bitand, AndOp, [$($gen)*] $lhs);
        impl_grid_binop!(BitOr, bitor, OrOp, [$($gen)*] $lhs);
        impl_grid_not!([$($gen)*] $lhs);
    )*};
}

impl_grid_operators!(
    [T] Grid<T>,
    ['a, T] &'a Grid<T>,
    [T] Fill<T>,
    ['a, T] &'a Fill<T>,
    [S] GridView<S>,
    ['a, S] &'a GridView<S>,
    ['v, S] GridViewMut<'v, S>,
    ['a, 'v, S] &'a GridViewMut<'v, S>,
    [F, L, R] BinExpr<F, L, R>,
    ['a, F, L, R] &'a BinExpr<F, L, R>,
    [F, S] UnaryExpr<F, S>,
    ['a, F, S] &'a UnaryExpr<F, S>,
);

// `PackedGrid`'s element is concretely `bool`, which has no arithmetic.
// A bound naming no generic parameter is checked at the impl itself, so
// the packed arms stamp only the boolean operators.
impl_grid_binop!(BitAnd, bitand, AndOp, [] PackedGrid);
impl_grid_binop!(BitOr, bitor, OrOp, [] PackedGrid);
impl_grid_not!([] PackedGrid);
impl_grid_binop!(BitAnd, bitand, AndOp, ['a] &'a PackedGrid);
impl_grid_binop!(BitOr, bitor, OrOp, ['a] &'a PackedGrid);
impl_grid_not!(['a] &'a PackedGrid);

// ============================================================================
// Named composition functions
// ============================================================================

/// Compose a binary node from an explicit operation.
pub fn apply<F, L, R>(op: F, lhs: L, rhs: R) -> Result<BinExpr<F, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    F: BinaryFn<L::Elem, L::Elem>,
{
    let shape = lhs.shape();
    BinExpr::new(op, lhs, rhs.into_operand(shape))
}

/// Compose a unary node from an explicit operation.
pub fn apply_unary<F, S>(op: F, source: S) -> UnaryExpr<F, S>
where
    S: GridLike,
    F: UnaryFn<S::Elem>,
{
    UnaryExpr::new(op, source)
}

/// Lazy elementwise `lhs + rhs`.
pub fn add<L, R>(lhs: L, rhs: R) -> Result<BinExpr<AddOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    AddOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(AddOp, lhs, rhs)
}

/// Lazy elementwise `lhs - rhs`.
pub fn subtract<L, R>(lhs: L, rhs: R) -> Result<BinExpr<SubOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    SubOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(SubOp, lhs, rhs)
}

/// Lazy elementwise `lhs * rhs`.
pub fn multiply<L, R>(lhs: L, rhs: R) -> Result<BinExpr<MulOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    MulOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(MulOp, lhs, rhs)
}

/// Lazy elementwise `lhs / rhs`.
pub fn divide<L, R>(lhs: L, rhs: R) -> Result<BinExpr<DivOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    DivOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(DivOp, lhs, rhs)
}

/// Lazy elementwise `lhs == rhs`, yielding a boolean grid.
pub fn equal<L, R>(lhs: L, rhs: R) -> Result<BinExpr<EqOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
{
    apply(EqOp, lhs, rhs)
}

/// Lazy elementwise `lhs != rhs`, yielding a boolean grid.
pub fn not_equal<L, R>(lhs: L, rhs: R) -> Result<BinExpr<NeOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
{
    apply(NeOp, lhs, rhs)
}

/// Lazy elementwise `lhs < rhs`, yielding a boolean grid.
pub fn less<L, R>(lhs: L, rhs: R) -> Result<BinExpr<LtOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    LtOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(LtOp, lhs, rhs)
}

/// Lazy elementwise `lhs <= rhs`, yielding a boolean grid.
pub fn less_equal<L, R>(lhs: L, rhs: R) -> Result<BinExpr<LeOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    LeOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(LeOp, lhs, rhs)
}

/// Lazy elementwise `lhs > rhs`, yielding a boolean grid.
pub fn greater<L, R>(lhs: L, rhs: R) -> Result<BinExpr<GtOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    GtOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(GtOp, lhs, rhs)
}

/// Lazy elementwise `lhs >= rhs`, yielding a boolean grid.
pub fn greater_equal<L, R>(lhs: L, rhs: R) -> Result<BinExpr<GeOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    GeOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(GeOp, lhs, rhs)
}

/// Lazy elementwise logical and over boolean grids.
pub fn and<L, R>(lhs: L, rhs: R) -> Result<BinExpr<AndOp, L, R::Operand>>
where
    L: GridLike<Elem = bool>,
    R: IntoOperand<bool>,
{
    apply(AndOp, lhs, rhs)
}

/// Lazy elementwise logical or over boolean grids.
pub fn or<L, R>(lhs: L, rhs: R) -> Result<BinExpr<OrOp, L, R::Operand>>
where
    L: GridLike<Elem = bool>,
    R: IntoOperand<bool>,
{
    apply(OrOp, lhs, rhs)
}

/// Lazy elementwise logical not over a boolean grid.
pub fn not<S>(source: S) -> UnaryExpr<NotOp, S>
where
    S: GridLike<Elem = bool>,
{
    UnaryExpr::new(NotOp, source)
}

/// Lazy elementwise minimum; ties pick the left operand.
pub fn min<L, R>(lhs: L, rhs: R) -> Result<BinExpr<MinOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    MinOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(MinOp, lhs, rhs)
}

/// Lazy elementwise maximum; ties pick the left operand.
pub fn max<L, R>(lhs: L, rhs: R) -> Result<BinExpr<MaxOp, L, R::Operand>>
where
    L: GridLike,
    R: IntoOperand<L::Elem>,
    MaxOp: BinaryFn<L::Elem, L::Elem>,
{
    apply(MaxOp, lhs, rhs)
}

/// Lazy elementwise application of an arbitrary function.
///
/// `f` is any pure `Fn(T) -> U`; both plain functions and closures work.
pub fn transform<S, F, O>(source: S, f: F) -> UnaryExpr<MapFn<F>, S>
where
    S: GridLike,
    F: Fn(S::Elem) -> O,
    O: Scalar,
{
    UnaryExpr::new(MapFn(f), source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex32;

    fn pair() -> (Grid<f64>, Grid<f64>) {
        let a = Grid::from_slice((2, 2), &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Grid::from_slice((2, 2), &[10.0, 20.0, 30.0, 40.0]).unwrap();
        (a, b)
    }

    #[test]
    fn test_arithmetic_operators() {
        let (a, b) = pair();
        let sum = &a + &b;
        let diff = &b - &a;
        let prod = &a * &b;
        let quot = &b / &a;
        for i in 0..a.size() {
            assert_eq!(sum.at(i), a.at(i) + b.at(i));
            assert_eq!(diff.at(i), b.at(i) - a.at(i));
            assert_eq!(prod.at(i), a.at(i) * b.at(i));
            assert_eq!(quot.at(i), b.at(i) / a.at(i));
        }
    }

    #[test]
    fn test_scalar_right_operand() {
        let (a, _) = pair();
        let shifted = &a + 0.5;
        let scaled = &a * 2.0;
        for i in 0..a.size() {
            assert_eq!(shifted.at(i), a.at(i) + 0.5);
            assert_eq!(scaled.at(i), a.at(i) * 2.0);
        }
    }

    #[test]
    fn test_scalar_left_operand_via_fill() {
        let (a, _) = pair();
        let inverted = Fill::new(100.0, a.shape()) - &a;
        for i in 0..a.size() {
            assert_eq!(inverted.at(i), 100.0 - a.at(i));
        }
    }

    #[test]
    fn test_comparisons_yield_bool_grids() {
        let (a, b) = pair();
        let lt = less(&a, &b).unwrap();
        let eq = equal(&a, 2.0).unwrap();
        let ge = greater_equal(&b, 30.0).unwrap();
        for i in 0..a.size() {
            assert_eq!(lt.at(i), a.at(i) < b.at(i));
            assert_eq!(eq.at(i), a.at(i) == 2.0);
            assert_eq!(ge.at(i), b.at(i) >= 30.0);
        }
    }

    #[test]
    fn test_logical_operators_compose_comparisons() {
        let (a, b) = pair();
        let in_band = less(&a, 4.0).unwrap() & greater(&b, 10.0).unwrap();
        let outside = !(less(&a, 4.0).unwrap() | greater(&b, 10.0).unwrap());
        for i in 0..a.size() {
            assert_eq!(in_band.at(i), a.at(i) < 4.0 && b.at(i) > 10.0);
            assert_eq!(outside.at(i), !(a.at(i) < 4.0 || b.at(i) > 10.0));
        }
    }

    #[test]
    fn test_min_max_and_ties() {
        let a = Grid::from_slice(4, &[1.0, 5.0, 3.0, 3.0]).unwrap();
        let b = Grid::from_slice(4, &[2.0, 4.0, 3.0, 1.0]).unwrap();
        let lo = min(&a, &b).unwrap();
        let hi = max(&a, &b).unwrap();
        assert_eq!(lo.at(0), 1.0);
        assert_eq!(lo.at(1), 4.0);
        assert_eq!(lo.at(2), 3.0);
        assert_eq!(hi.at(0), 2.0);
        assert_eq!(hi.at(1), 5.0);
        assert_eq!(hi.at(3), 3.0);
    }

    #[test]
    fn test_transform_with_function_and_closure() {
        fn double(v: f64) -> f64 {
            v * 2.0
        }

        let (a, _) = pair();
        let doubled = transform(&a, double);
        let offset = transform(&a, |v| v + 1.0);
        for i in 0..a.size() {
            assert_eq!(doubled.at(i), a.at(i) * 2.0);
            assert_eq!(offset.at(i), a.at(i) + 1.0);
        }
    }

    #[test]
    fn test_apply_names_the_operation() {
        let (a, b) = pair();
        let explicit = apply(MulOp, &a, &b).unwrap();
        let sugar = &a * &b;
        for i in 0..a.size() {
            assert_eq!(explicit.at(i), sugar.at(i));
        }
    }

    #[test]
    fn test_complex_elements() {
        let a = Grid::from_slice(2, &[Complex32::new(1.0, 2.0), Complex32::new(0.0, -1.0)])
            .unwrap();
        let doubled = &a * Complex32::new(2.0, 0.0);
        assert_eq!(doubled.at(0), Complex32::new(2.0, 4.0));
        assert_eq!(doubled.at(1), Complex32::new(0.0, -2.0));
    }

    #[test]
    fn test_named_function_reports_mismatch() {
        let a = Grid::<i32>::new((2, 2));
        let b = Grid::<i32>::new((2, 3));
        assert!(add(&a, &b).is_err());
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_operator_panics_on_mismatch() {
        let a = Grid::<i32>::new((2, 2));
        let b = Grid::<i32>::new((2, 3));
        let _ = &a + &b;
    }
}
