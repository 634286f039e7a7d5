//! Rectangular windows into grids.
//!
//! A view reuses its source's storage: reads go through to the source with
//! the view's origin added, and writes through a [`GridViewMut`] land in
//! the source directly. The source can be anything grid-shaped, so views
//! nest and expressions can be windowed without materializing them.
//!
//! Views are usually built with [`layer`]/[`block`] and their `_mut`
//! twins; the raw `new` constructors take an explicit [`Shape`] and
//! origin. Extents must fit inside the source; that is the caller's
//! contract and is not checked here.

use crate::shape::Shape;
use crate::traits::{GridLike, GridLikeMut};

/// A read-only window over a grid-shaped source.
#[derive(Debug, Clone, Copy)]
pub struct GridView<S> {
    source: S,
    shape: Shape,
    ox: usize,
    oy: usize,
    oz: usize,
}

/// A writable window over grid storage.
#[derive(Debug)]
pub struct GridViewMut<'a, S> {
    source: &'a mut S,
    shape: Shape,
    ox: usize,
    oy: usize,
    oz: usize,
}

impl<S: GridLike> GridView<S> {
    /// Raw constructor. `shape` plus the origin must stay inside the
    /// source; this is not checked.
    pub fn new(source: S, shape: Shape, ox: usize, oy: usize, oz: usize) -> Self {
        GridView {
            source,
            shape,
            ox,
            oy,
            oz,
        }
    }

    /// The view's offset into its source.
    pub fn origin(&self) -> (usize, usize, usize) {
        (self.ox, self.oy, self.oz)
    }
}

impl<'a, S: GridLikeMut> GridViewMut<'a, S> {
    /// Raw constructor. `shape` plus the origin must stay inside the
    /// source; this is not checked.
    pub fn new(source: &'a mut S, shape: Shape, ox: usize, oy: usize, oz: usize) -> Self {
        GridViewMut {
            source,
            shape,
            ox,
            oy,
            oz,
        }
    }

    /// The view's offset into its source.
    pub fn origin(&self) -> (usize, usize, usize) {
        (self.ox, self.oy, self.oz)
    }
}

impl<S: GridLike> GridLike for GridView<S> {
    type Elem = S::Elem;

    const OWNS_DATA: bool = false;
    const WRITABLE: bool = false;

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    // Flat indices decompose by the view's own shape, never the source's.
    #[inline]
    fn at(&self, i: usize) -> S::Elem {
        let (x, y, z) = self.shape.coords(i);
        self.get(x, y, z)
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> S::Elem {
        self.source.get(x + self.ox, y + self.oy, z + self.oz)
    }
}

impl<'a, S: GridLikeMut> GridLike for GridViewMut<'a, S> {
    type Elem = S::Elem;

    const OWNS_DATA: bool = false;
    const WRITABLE: bool = true;

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn at(&self, i: usize) -> S::Elem {
        let (x, y, z) = self.shape.coords(i);
        self.get(x, y, z)
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> S::Elem {
        self.source.get(x + self.ox, y + self.oy, z + self.oz)
    }
}

impl<'a, S: GridLikeMut> GridLikeMut for GridViewMut<'a, S> {
    #[inline]
    fn set_at(&mut self, i: usize, value: S::Elem) {
        let (x, y, z) = self.shape.coords(i);
        self.set(x, y, z, value);
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, z: usize, value: S::Elem) {
        self.source
            .set(x + self.ox, y + self.oy, z + self.oz, value);
    }
}

/// A block's dimensions. Omitted trailing dimensions reach the source's far
/// edge.
///
/// Converts from `w`, `(w, l)`, or `(w, l, h)`.
#[derive(Debug, Clone, Copy)]
pub struct Extent {
    width: usize,
    length: Option<usize>,
    height: Option<usize>,
}

impl From<usize> for Extent {
    fn from(width: usize) -> Self {
        Extent {
            width,
            length: None,
            height: None,
        }
    }
}

impl From<(usize, usize)> for Extent {
    fn from((width, length): (usize, usize)) -> Self {
        Extent {
            width,
            length: Some(length),
            height: None,
        }
    }
}

impl From<(usize, usize, usize)> for Extent {
    fn from((width, length, height): (usize, usize, usize)) -> Self {
        Extent {
            width,
            length: Some(length),
            height: Some(height),
        }
    }
}

/// A block's position in its source. Omitted trailing coordinates are zero.
///
/// Converts from `x`, `(x, y)`, or `(x, y, z)`.
#[derive(Debug, Clone, Copy)]
pub struct Origin {
    x: usize,
    y: usize,
    z: usize,
}

impl From<usize> for Origin {
    fn from(x: usize) -> Self {
        Origin { x, y: 0, z: 0 }
    }
}

impl From<(usize, usize)> for Origin {
    fn from((x, y): (usize, usize)) -> Self {
        Origin { x, y, z: 0 }
    }
}

impl From<(usize, usize, usize)> for Origin {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Origin { x, y, z }
    }
}

fn block_shape(extent: Extent, origin: Origin, source: Shape) -> Shape {
    Shape::new(
        extent.width,
        extent.length.unwrap_or(source.length - origin.y),
        extent.height.unwrap_or(source.height - origin.z),
    )
}

/// A read-only window of `extent` at `origin`.
///
/// The window must lie inside the source.
pub fn block<S>(source: S, extent: impl Into<Extent>, origin: impl Into<Origin>) -> GridView<S>
where
    S: GridLike,
{
    let origin = origin.into();
    let shape = block_shape(extent.into(), origin, source.shape());
    GridView::new(source, shape, origin.x, origin.y, origin.z)
}

/// A writable window of `extent` at `origin`.
pub fn block_mut<S>(
    source: &mut S,
    extent: impl Into<Extent>,
    origin: impl Into<Origin>,
) -> GridViewMut<'_, S>
where
    S: GridLikeMut,
{
    let origin = origin.into();
    let shape = block_shape(extent.into(), origin, source.shape());
    GridViewMut::new(source, shape, origin.x, origin.y, origin.z)
}

/// The single-layer window at height `k`, shaped `width x length x 1`.
pub fn layer<S>(source: S, k: usize) -> GridView<S>
where
    S: GridLike,
{
    let s = source.shape();
    GridView::new(source, Shape::new(s.width, s.length, 1), 0, 0, k)
}

/// The writable single-layer window at height `k`.
pub fn layer_mut<S>(source: &mut S, k: usize) -> GridViewMut<'_, S>
where
    S: GridLikeMut,
{
    let s = source.shape();
    GridViewMut::new(source, Shape::new(s.width, s.length, 1), 0, 0, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::packed::PackedGrid;

    fn numbered(shape: impl Into<Shape>) -> Grid<i32> {
        let shape = shape.into();
        let values = (0..shape.size() as i32).collect::<Vec<_>>();
        Grid::from_slice(shape, &values).unwrap()
    }

    #[test]
    fn test_layer_reads_one_slice() {
        let grid = numbered((2, 2, 3));
        let mid = layer(&grid, 1);
        assert_eq!(mid.shape(), Shape::new(2, 2, 1));
        assert_eq!(mid.get(0, 0, 0), grid.get(0, 0, 1));
        assert_eq!(mid.get(1, 1, 0), grid.get(1, 1, 1));
    }

    #[test]
    fn test_block_defaults_reach_far_edge() {
        let grid = numbered((4, 3, 2));
        let tail = block(&grid, 2, 1);
        assert_eq!(tail.shape(), Shape::new(2, 3, 2));
        assert_eq!(tail.origin(), (1, 0, 0));

        let corner = block(&grid, (2, 2), (1, 1));
        assert_eq!(corner.shape(), Shape::new(2, 2, 2));
        assert_eq!(corner.get(0, 0, 1), grid.get(1, 1, 1));
    }

    #[test]
    fn test_at_decomposes_by_view_shape() {
        let grid = numbered((4, 4, 1));
        let inner = block(&grid, (2, 2), (1, 1));
        for i in 0..inner.size() {
            let (x, y, z) = inner.shape().coords(i);
            assert_eq!(inner.at(i), inner.get(x, y, z));
        }
        assert_eq!(inner.at(0), grid.get(1, 1, 0));
        assert_eq!(inner.at(3), grid.get(2, 2, 0));
    }

    #[test]
    fn test_views_nest() {
        let grid = numbered((4, 4, 4));
        let outer = block(&grid, (3, 3, 3), (1, 1, 1));
        let inner = block(outer, (2, 2, 2), (1, 1, 1));
        assert_eq!(inner.get(0, 0, 0), grid.get(2, 2, 2));
        assert_eq!(inner.get(1, 1, 1), grid.get(3, 3, 3));
    }

    #[test]
    fn test_block_mut_writes_into_source() {
        let mut grid = Grid::<i32>::new((3, 3));
        {
            let mut window = block_mut(&mut grid, (1, 1), (1, 1));
            window.set(0, 0, 0, 9);
        }
        assert_eq!(grid.get_xy(1, 1), 9);
        assert_eq!(grid.get_xy(0, 0), 0);
    }

    #[test]
    fn test_layer_mut_writes_one_slice() {
        let mut grid = Grid::<i32>::new((2, 2, 2));
        {
            let mut top = layer_mut(&mut grid, 1);
            top.set_at(0, 5);
            top.set(1, 1, 0, 6);
        }
        assert_eq!(grid.get(0, 0, 1), 5);
        assert_eq!(grid.get(1, 1, 1), 6);
        assert_eq!(grid.get(0, 0, 0), 0);
    }

    #[test]
    fn test_view_reflects_source_writes() {
        let mut grid = Grid::<i32>::new((2, 2));
        grid[(1, 1)] = 3;
        let whole = block(&grid, (2, 2), 0);
        assert_eq!(whole.get(1, 1, 0), 3);
    }

    #[test]
    fn test_view_over_packed_grid() {
        let mut packed = PackedGrid::new((2, 2, 2));
        packed.set(0, 1, 1, true);
        let top = layer(&packed, 1);
        assert!(top.get(0, 1, 0));
        assert!(!top.get(1, 1, 0));
    }
}
