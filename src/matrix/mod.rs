//! Matrix storage and element access.
//!
//! Everything here is row-major f32: element `(y, x)` lives at offset
//! `y * cols + x`. [`Mat`] owns its buffer; [`MatRef`] and [`MatMut`] borrow
//! one, which is what lets a stack-allocated array stand in for a matrix (the
//! cache-blocked kernels view their accumulator tiles this way).
//!
//! Scalar accessors bounds-check like any slice index. The vector accessors
//! (`load`/`store`) are the hot path and skip the checks — they are `unsafe`
//! and only `debug_assert!` their contract.

use rand::Rng;

/// An owned `rows × cols` matrix of f32, row-major.
pub struct Mat {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl Mat {
    /// Zero-initialized matrix.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be non-zero");
        Mat {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Matrix filled with uniform random values in `[0, 1)`.
    pub fn random(rows: usize, cols: usize) -> Self {
        let mut m = Mat::zeros(rows, cols);
        let mut rng = rand::thread_rng();
        for v in &mut m.data {
            *v = rng.gen_range(0.0..1.0);
        }
        m
    }

    /// Read-only view of the whole matrix.
    #[inline]
    pub fn view(&self) -> MatRef<'_> {
        MatRef {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
    }

    /// Mutable view of the whole matrix.
    #[inline]
    pub fn view_mut(&mut self) -> MatMut<'_> {
        MatMut {
            rows: self.rows,
            cols: self.cols,
            data: &mut self.data,
        }
    }

    /// Sum of all elements, accumulated in f64.
    ///
    /// Used as a cheap correctness fingerprint when cross-checking kernel
    /// variants against the naive baseline.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Reset to all zeros (kernels accumulate, so C must start zeroed).
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}

/// Read-only borrowed matrix view.
#[derive(Clone, Copy)]
pub struct MatRef<'a> {
    pub rows: usize,
    pub cols: usize,
    pub data: &'a [f32],
}

impl<'a> MatRef<'a> {
    /// View a caller-supplied buffer as a `rows × cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_slice(rows: usize, cols: usize, data: &'a [f32]) -> Self {
        assert_eq!(data.len(), rows * cols, "buffer length must be rows*cols");
        MatRef { rows, cols, data }
    }

    #[inline(always)]
    pub fn get(&self, y: usize, x: usize) -> f32 {
        self.data[y * self.cols + x]
    }

    /// Row `y` as a contiguous slice.
    #[inline(always)]
    pub fn row(&self, y: usize) -> &'a [f32] {
        &self.data[y * self.cols..(y + 1) * self.cols]
    }

    /// Load `W` contiguous elements starting at `(y, x)`.
    ///
    /// # Safety
    ///
    /// Caller must ensure `y < rows` and `x + W <= cols`. No bounds check is
    /// performed in release builds.
    #[inline(always)]
    pub unsafe fn load<const W: usize>(&self, y: usize, x: usize) -> [f32; W] {
        debug_assert!(y < self.rows && x + W <= self.cols);
        let mut v = [0.0f32; W];
        unsafe {
            std::ptr::copy_nonoverlapping(
                self.data.as_ptr().add(y * self.cols + x),
                v.as_mut_ptr(),
                W,
            );
        }
        v
    }
}

/// Mutable borrowed matrix view.
pub struct MatMut<'a> {
    pub rows: usize,
    pub cols: usize,
    pub data: &'a mut [f32],
}

impl<'a> MatMut<'a> {
    /// View a caller-supplied buffer as a mutable `rows × cols` matrix.
    ///
    /// This is how the blocked kernels treat their stack-resident accumulator
    /// tiles as matrices without any heap allocation.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_slice(rows: usize, cols: usize, data: &'a mut [f32]) -> Self {
        assert_eq!(data.len(), rows * cols, "buffer length must be rows*cols");
        MatMut { rows, cols, data }
    }

    #[inline(always)]
    pub fn get(&self, y: usize, x: usize) -> f32 {
        self.data[y * self.cols + x]
    }

    #[inline(always)]
    pub fn set(&mut self, y: usize, x: usize, v: f32) {
        self.data[y * self.cols + x] = v;
    }

    #[inline(always)]
    pub fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.cols..(y + 1) * self.cols]
    }

    #[inline(always)]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        &mut self.data[y * self.cols..(y + 1) * self.cols]
    }

    /// Load `W` contiguous elements starting at `(y, x)`.
    ///
    /// # Safety
    ///
    /// Caller must ensure `y < rows` and `x + W <= cols`.
    #[inline(always)]
    pub unsafe fn load<const W: usize>(&self, y: usize, x: usize) -> [f32; W] {
        debug_assert!(y < self.rows && x + W <= self.cols);
        let mut v = [0.0f32; W];
        unsafe {
            std::ptr::copy_nonoverlapping(
                self.data.as_ptr().add(y * self.cols + x),
                v.as_mut_ptr(),
                W,
            );
        }
        v
    }

    /// Store `W` contiguous elements starting at `(y, x)`.
    ///
    /// # Safety
    ///
    /// Caller must ensure `y < rows` and `x + W <= cols`.
    #[inline(always)]
    pub unsafe fn store<const W: usize>(&mut self, y: usize, x: usize, v: [f32; W]) {
        debug_assert!(y < self.rows && x + W <= self.cols);
        unsafe {
            std::ptr::copy_nonoverlapping(
                v.as_ptr(),
                self.data.as_mut_ptr().add(y * self.cols + x),
                W,
            );
        }
    }
}
