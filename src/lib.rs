//! Fixed-shape 3D grids with lazy elementwise operation trees.
//!
//! A grid is a `width x length x height` box of scalars addressed by
//! `(x, y, z)` coordinates or by a flat index in x-fastest order. Grids of
//! one and two dimensions are the same type with the trailing dimensions
//! held at one. Arithmetic, comparisons, and logical operators do not
//! compute anything: they build an expression tree that evaluates
//! per element when the tree is materialized into storage, so no
//! intermediate grid is ever allocated.
//!
//! # Core Types
//!
//! - [`Grid`]: owned storage for any [`Scalar`] element
//! - [`PackedGrid`]: boolean storage at one bit per element
//! - [`GridView`] / [`GridViewMut`]: rectangular windows built with
//!   [`layer`] and [`block`], sharing the source's storage
//! - [`BinExpr`] / [`UnaryExpr`] / [`Fill`]: lazy expression nodes
//! - [`Materialize`]: the copy engine that turns any of the above into a
//!   [`Grid`]
//!
//! Everything grid-shaped implements [`GridLike`], so views, expressions,
//! and storage compose freely as long as shapes match exactly.
//!
//! # Building Expressions
//!
//! - Operators `+ - * /` on numeric grids and `& | !` on boolean grids
//!   build lazy nodes and panic on a shape mismatch.
//! - Named functions ([`add`], [`less`], [`min`], ...) build the same
//!   nodes but report the mismatch as an `Err`. Comparisons exist only in
//!   named form.
//! - [`transform`] lifts an arbitrary `Fn(T) -> U` over a grid;
//!   [`apply`] takes any [`BinaryFn`] implementation.
//! - A scalar on the right of an operator behaves as a grid holding that
//!   value everywhere. On the left, wrap it in [`Fill`].
//!
//! # Example
//!
//! ```rust
//! use tilegrid::{Grid, GridLike};
//!
//! let a = Grid::from_slice((2, 2), &[0.0, 1.0, 2.0, 3.0]).unwrap();
//! let b = Grid::<f64>::ones((2, 2));
//!
//! // Nothing is computed here; `sum` is a tree over borrowed operands.
//! let sum = &a + &b;
//! assert_eq!(sum.get(1, 1, 0), 4.0);
//!
//! // `eval` walks the tree once into fresh storage.
//! let total = sum.eval();
//! assert_eq!(total[(1, 1)], 4.0);
//! ```
//!
//! Views window a grid in place, and writable views store through to the
//! source:
//!
//! ```rust
//! use tilegrid::{block_mut, Grid, GridLikeMut};
//!
//! let mut a = Grid::from_slice((2, 2), &[0, 1, 2, 3]).unwrap();
//! let mut window = block_mut(&mut a, (1, 1), (1, 1));
//! window.set(0, 0, 0, 9);
//! assert_eq!(a[(1, 1)], 9);
//! ```
//!
//! # Parallel Materialization
//!
//! Materializing a large source splits the destination into contiguous
//! chunks, one per worker, with each worker evaluating its share of the
//! tree. The default engine uses the global thread pool and copies at most
//! [`MIN_PARALLEL_LEN`] elements sequentially; [`Materialize`] makes both
//! knobs explicit. Packed boolean destinations always fill on the calling
//! thread. Set `TILEGRID_TRACE=1` to log the chosen path.
//!
//! # Bounds
//!
//! Coordinate and index bounds are not checked. Reading an owned grid past
//! its storage panics like any slice access, but a coordinate that is out
//! of range in one dimension while its flat position stays inside the
//! buffer silently aliases another element. Callers keep coordinates in
//! range; the library never verifies them.

mod expr;
mod grid;
mod materialize;
mod ops;
mod packed;
mod shape;
mod traits;
mod view;

// ============================================================================
// Shape and element traits
// ============================================================================
pub use shape::Shape;
pub use traits::{GridLike, GridLikeMut, Scalar};

// ============================================================================
// Storage
// ============================================================================
pub use grid::{reshape, Grid};
pub use packed::PackedGrid;

// ============================================================================
// Views
// ============================================================================
pub use view::{block, block_mut, layer, layer_mut, Extent, GridView, GridViewMut, Origin};

// ============================================================================
// Expression nodes
// ============================================================================
pub use expr::{BinExpr, Fill, IntoOperand, MapFn, UnaryExpr};

// ============================================================================
// Operations
// ============================================================================
pub use ops::{
    add, and, apply, apply_unary, divide, equal, greater, greater_equal, less, less_equal, max,
    min, multiply, not, not_equal, or, subtract, transform,
};
pub use ops::{
    AddOp, AndOp, BinaryFn, DivOp, EqOp, GeOp, GtOp, LeOp, LtOp, MaxOp, MinOp, MulOp, NeOp, NotOp,
    OrOp, SubOp, UnaryFn,
};

// ============================================================================
// Materialization
// ============================================================================
pub use materialize::Materialize;

// ============================================================================
// Constants
// ============================================================================

/// Sequential cutoff for materialization.
///
/// Sources of at most this many elements are copied on the calling thread;
/// [`Materialize::with_min_parallel_len`] overrides it per engine.
pub const MIN_PARALLEL_LEN: usize = 1 << 15;

// ============================================================================
// Error types
// ============================================================================

/// Errors reported when composing or materializing grids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Two grids were combined or assigned across different shapes.
    #[error("shape mismatch: {lhs} vs {rhs}")]
    ShapeMismatch { lhs: Shape, rhs: Shape },

    /// An initializer literal holds more elements than the grid.
    #[error("initializer of {len} elements exceeds grid capacity {capacity}")]
    OversizedInitializer { len: usize, capacity: usize },
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
