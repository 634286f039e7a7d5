//! Evaluation of grid-shaped values into storage.
//!
//! [`Materialize`] walks a source once in flat order and writes each
//! element into the destination. Large copies split into contiguous
//! chunks, one per worker; per-element evaluation of an expression tree
//! happens inside whichever worker owns the chunk. Small copies and
//! single-worker engines stay on the calling thread.
//!
//! Set `TILEGRID_TRACE=1` to log which path each copy takes.

use crate::grid::Grid;
use crate::traits::{GridLike, Scalar};
use crate::{GridError, Result, MIN_PARALLEL_LEN};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[inline]
fn trace_enabled() -> bool {
    matches!(std::env::var("TILEGRID_TRACE"), Ok(ref v) if v == "1")
}

#[cfg(feature = "parallel")]
fn default_workers() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn default_workers() -> usize {
    1
}

/// A copy engine with a configurable worker count.
///
/// The default engine uses one worker per thread in the global pool and
/// falls back to a sequential copy below [`MIN_PARALLEL_LEN`] elements.
#[derive(Debug, Clone)]
pub struct Materialize {
    workers: usize,
    min_parallel_len: usize,
}

impl Default for Materialize {
    fn default() -> Self {
        Materialize {
            workers: default_workers(),
            min_parallel_len: MIN_PARALLEL_LEN,
        }
    }
}

impl Materialize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split copies over exactly `workers` workers. One worker runs
    /// everything on the calling thread.
    pub fn with_workers(mut self, workers: usize) -> Self {
        assert!(workers >= 1, "worker count must be at least 1");
        self.workers = workers;
        self
    }

    /// Copies of at most `len` elements run sequentially regardless of the
    /// worker count.
    pub fn with_min_parallel_len(mut self, len: usize) -> Self {
        self.min_parallel_len = len;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn min_parallel_len(&self) -> usize {
        self.min_parallel_len
    }

    /// Copy `src` into `dst` elementwise.
    ///
    /// Fails before any element is written if the shapes differ.
    pub fn copy_into<S, T>(&self, src: &S, dst: &mut Grid<T>) -> Result<()>
    where
        T: Scalar,
        S: GridLike<Elem = T> + Sync,
    {
        if src.shape() != dst.shape() {
            return Err(GridError::ShapeMismatch {
                lhs: dst.shape(),
                rhs: src.shape(),
            });
        }
        self.copy_unchecked(src, dst);
        Ok(())
    }

    pub(crate) fn copy_unchecked<S, T>(&self, src: &S, dst: &mut Grid<T>)
    where
        T: Scalar,
        S: GridLike<Elem = T> + Sync,
    {
        debug_assert_eq!(src.shape(), dst.shape());
        let size = dst.size();
        if self.should_run_sequential(size) {
            if trace_enabled() {
                eprintln!("copy_into: sequential path size={}", size);
            }
            for (i, slot) in dst.as_mut_slice().iter_mut().enumerate() {
                *slot = src.at(i);
            }
            return;
        }
        #[cfg(feature = "parallel")]
        {
            let chunk_len = (size + self.workers - 1) / self.workers;
            if trace_enabled() {
                eprintln!(
                    "copy_into: parallel path size={} workers={} chunk_len={}",
                    size, self.workers, chunk_len
                );
            }
            dst.as_mut_slice()
                .par_chunks_mut(chunk_len)
                .enumerate()
                .for_each(|(k, chunk)| {
                    let start = k * chunk_len;
                    for (j, slot) in chunk.iter_mut().enumerate() {
                        *slot = src.at(start + j);
                    }
                });
        }
    }

    /// Broadcast one value into every element of `dst`.
    ///
    /// Always runs on the calling thread.
    pub fn fill_into<T: Scalar>(&self, value: T, dst: &mut Grid<T>) {
        if trace_enabled() {
            eprintln!("fill_into: sequential path size={}", dst.size());
        }
        dst.as_mut_slice().fill(value);
    }

    #[cfg(feature = "parallel")]
    fn should_run_sequential(&self, len: usize) -> bool {
        self.workers <= 1 || len <= self.min_parallel_len
    }

    #[cfg(not(feature = "parallel"))]
    fn should_run_sequential(&self, _len: usize) -> bool {
        true
    }
}
