//! Owning grid storage.
//!
//! [`Grid`] is the concrete container behind every expression: a [`Shape`]
//! plus a flat `Vec<T>` in x-fastest order. Construction either
//! default-fills, copies a literal, or materializes another grid-shaped
//! value; after that the shape never changes.

use crate::materialize::Materialize;
use crate::shape::Shape;
use crate::traits::{GridLike, GridLikeMut, Scalar};
use crate::{GridError, Result};
use num_traits::{One, Zero};
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::{Index, IndexMut};

/// A fixed-shape container of scalars with owned, contiguous storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Scalar> Grid<T> {
    /// A grid of `T::default()` values.
    pub fn new(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let data = vec![T::default(); shape.size()];
        Grid { shape, data }
    }

    /// A grid holding `value` everywhere.
    pub fn full(shape: impl Into<Shape>, value: T) -> Self {
        let shape = shape.into();
        let data = vec![value; shape.size()];
        Grid { shape, data }
    }

    /// A grid of zeros.
    pub fn zeros(shape: impl Into<Shape>) -> Self
    where
        T: Zero,
    {
        Self::full(shape, T::zero())
    }

    /// A grid of ones.
    pub fn ones(shape: impl Into<Shape>) -> Self
    where
        T: One,
    {
        Self::full(shape, T::one())
    }

    /// A grid initialized from a flat literal in x-fastest order.
    ///
    /// A literal shorter than the grid leaves the tail at `T::default()`.
    /// A longer one is rejected before any storage is allocated.
    pub fn from_slice(shape: impl Into<Shape>, values: &[T]) -> Result<Self> {
        let shape = shape.into();
        let capacity = shape.size();
        if values.len() > capacity {
            return Err(GridError::OversizedInitializer {
                len: values.len(),
                capacity,
            });
        }
        let mut data = values.to_vec();
        data.resize(capacity, T::default());
        Ok(Grid { shape, data })
    }

    /// Materialize any grid-shaped value into fresh storage.
    pub fn from_grid<S>(source: &S) -> Self
    where
        S: GridLike<Elem = T> + Sync,
    {
        Self::from_grid_with(&Materialize::new(), source)
    }

    /// [`Grid::from_grid`] under an explicit engine.
    pub fn from_grid_with<S>(engine: &Materialize, source: &S) -> Self
    where
        S: GridLike<Elem = T> + Sync,
    {
        let mut grid = Self::new(source.shape());
        engine.copy_unchecked(source, &mut grid);
        grid
    }

    /// Overwrite every element from a same-shaped source.
    pub fn assign<S>(&mut self, source: &S) -> Result<()>
    where
        S: GridLike<Elem = T> + Sync,
    {
        self.assign_with(&Materialize::new(), source)
    }

    /// [`Grid::assign`] under an explicit engine.
    pub fn assign_with<S>(&mut self, engine: &Materialize, source: &S) -> Result<()>
    where
        S: GridLike<Elem = T> + Sync,
    {
        engine.copy_into(source, self)
    }

    /// Set every element to `value`. Always runs on the calling thread.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Fill from a distribution, consuming values from `rng` in x-fastest
    /// order.
    pub fn fill_random<D, R>(&mut self, dist: D, rng: &mut R)
    where
        D: Distribution<T>,
        R: Rng,
    {
        for slot in self.data.iter_mut() {
            *slot = dist.sample(rng);
        }
    }

    /// Fill with uniformly drawn values; a seed makes the fill reproducible.
    pub fn randomize(&mut self, seed: Option<u64>)
    where
        Standard: Distribution<T>,
    {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fill_random(Standard, &mut rng);
    }

    /// The elements as a flat slice in x-fastest order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T: Scalar> GridLike for Grid<T> {
    type Elem = T;

    const OWNS_DATA: bool = true;
    const WRITABLE: bool = true;

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        self.data[i]
    }

    #[inline]
    fn get(&self, x: usize, y: usize, z: usize) -> T {
        self.data[self.shape.linear(x, y, z)]
    }
}

impl<T: Scalar> GridLikeMut for Grid<T> {
    #[inline]
    fn set_at(&mut self, i: usize, value: T) {
        self.data[i] = value;
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, z: usize, value: T) {
        let i = self.shape.linear(x, y, z);
        self.data[i] = value;
    }
}

impl<T: Scalar> Index<usize> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Scalar> IndexMut<usize> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Scalar> Index<(usize, usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y, z): (usize, usize, usize)) -> &T {
        &self.data[self.shape.linear(x, y, z)]
    }
}

impl<T: Scalar> IndexMut<(usize, usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y, z): (usize, usize, usize)) -> &mut T {
        &mut self.data[self.shape.linear(x, y, z)]
    }
}

impl<T: Scalar> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.data[self.shape.linear_xy(x, y)]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        &mut self.data[self.shape.linear_xy(x, y)]
    }
}

impl<'a, T: Scalar> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T: Scalar> IntoIterator for &'a mut Grid<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

/// Copy a grid-shaped value into new storage of a different shape with the
/// same element count, preserving flat order.
pub fn reshape<S, T>(source: &S, shape: impl Into<Shape>) -> Result<Grid<T>>
where
    S: GridLike<Elem = T>,
    T: Scalar,
{
    let shape = shape.into();
    if shape.size() != source.size() {
        return Err(GridError::ShapeMismatch {
            lhs: shape,
            rhs: source.shape(),
        });
    }
    let mut grid = Grid::new(shape);
    for i in 0..grid.size() {
        grid.data[i] = source.at(i);
    }
    Ok(grid)
}
