use super::coo_iter::COOIter;
use super::coo_iter_mut::COOIterMut;
use crate::error::{CoreError, CoreResult};
use crate::structs::axis::{Axes, Axis};
use crate::structs::matrix::SparseMatrix;
use crate::structs::vec::SmallVec;
use crate::traits::{IdxType, RawParts, Tensor, ValType};
use ndarray::Array1;
use num::{NumCast, ToPrimitive};
use rayon::prelude::*;
use std::collections::HashMap;

/// A sparse tensor stored in coordinate (COO) format: one index array per
/// mode plus a parallel array of nonzero values.
///
/// `indices[m][k]` is the mode-`m` coordinate of the `k`-th stored nonzero,
/// and `values[k]` is its value. Unlike a matrix-style COO layout (one row
/// per nonzero), each mode's indices live in their own contiguous array so
/// that per-mode sorts, permutations, and CSF construction can touch a
/// single array instead of striding through an interleaved one.
#[derive(Clone, Debug)]
pub struct COOTensor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    inner: COOTensorInner<IT, VT>,
}

#[derive(Clone, Debug)]
pub struct COOTensorInner<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub name: Option<String>,

    /// The logical shape of this tensor, one axis per mode.
    pub shape: Axes<IT>,

    /// One index array per mode, each of length `nnz`.
    pub indices: SmallVec<Array1<IT>>,
    /// The nonzero values, of length `nnz`.
    pub values: Array1<VT>,

    /// The modes (in order, outermost first) this tensor is currently
    /// known to be lexicographically sorted by, or `None` if unsorted.
    pub sort_order: Option<SmallVec<usize>>,
}

impl<IT, VT> COOTensor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    /// Allocates an empty tensor of the given shape with no nonzeros.
    #[inline]
    pub fn alloc(shape: &[Axis<IT>]) -> Self {
        let nmodes = shape.len();
        Self {
            inner: COOTensorInner {
                name: None,
                shape: Axes::from(shape),
                indices: (0..nmodes).map(|_| Array1::from_elem(0, IT::zero())).collect(),
                values: Array1::from_elem(0, VT::zero()),
                sort_order: None,
            },
        }
    }

    /// The number of modes of this tensor.
    #[inline]
    pub fn nmodes(&self) -> usize {
        self.inner.shape.len()
    }

    #[inline]
    pub fn indices(&self) -> &[Array1<IT>] {
        &self.inner.indices
    }

    #[inline]
    pub fn values(&self) -> &Array1<VT> {
        &self.inner.values
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.inner.name = Some(name.into());
    }

    /// Appends one nonzero. Invalidates any known sort order.
    ///
    /// Returns an error if `index` does not have one coordinate per mode, or
    /// any coordinate falls outside its axis.
    pub fn push(&mut self, index: &[IT], value: VT) -> CoreResult<()> {
        if index.len() != self.nmodes() {
            return Err(CoreError::BadInput(format!(
                "expected {} indices, got {}",
                self.nmodes(),
                index.len()
            )));
        }
        for (idx, axis) in index.iter().zip(self.inner.shape.iter()) {
            if !axis.range().contains(idx) {
                return Err(CoreError::BadInput(format!(
                    "index {} out of range for axis {}",
                    idx, axis
                )));
            }
        }
        for (mode_indices, idx) in self.inner.indices.iter_mut().zip(index.iter()) {
            mode_indices
                .push(ndarray::Axis(0), ndarray::arr0(idx.clone()).view())
                .expect("1-d push never fails on a contiguous array");
        }
        self.inner
            .values
            .push(ndarray::Axis(0), ndarray::arr0(value).view())
            .expect("1-d push never fails on a contiguous array");
        self.inner.sort_order = None;
        Ok(())
    }

    #[inline]
    pub fn iter(&self) -> COOIter<'_, IT, VT> {
        COOIter::new(self)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> COOIterMut<'_, IT, VT> {
        COOIterMut::new(self)
    }

    /// Sorts nonzeros lexicographically by the given mode permutation
    /// (outermost mode first) and records the resulting sort order.
    pub fn sort_by_modes(&mut self, mode_order: &[usize]) {
        let nnz = self.inner.values.len();
        let mut perm: Vec<usize> = (0..nnz).collect();
        perm.sort_by(|&a, &b| {
            for &m in mode_order {
                let ka = &self.inner.indices[m][a];
                let kb = &self.inner.indices[m][b];
                match ka.cmp(kb) {
                    std::cmp::Ordering::Equal => continue,
                    other => return other,
                }
            }
            std::cmp::Ordering::Equal
        });
        self.apply_permutation(&perm);
        self.inner.sort_order = Some(mode_order.iter().copied().collect());
    }

    fn apply_permutation(&mut self, perm: &[usize]) {
        for mode_indices in self.inner.indices.iter_mut() {
            *mode_indices = Array1::from_iter(perm.iter().map(|&i| mode_indices[i].clone()));
        }
        self.inner.values = Array1::from_iter(perm.iter().map(|&i| self.inner.values[i].clone()));
    }

    /// Merges nonzeros that share the same coordinate across all modes by
    /// summing their values, shrinking `nnz`. Sorts by every mode (mode 0
    /// major) itself first, the way `tt_remove_dups` calls `tt_sort`
    /// unconditionally rather than trusting the caller to have sorted
    /// already.
    pub fn remove_dups(&mut self) -> CoreResult<()> {
        let nmodes = self.nmodes();
        self.sort_by_modes(&(0..nmodes).collect::<Vec<_>>());
        let nnz = self.inner.values.len();
        if nnz == 0 {
            return Ok(());
        }
        let mut kept_values = self.inner.values[0].clone();
        let mut new_indices: Vec<Vec<IT>> = (0..nmodes).map(|_| Vec::with_capacity(nnz)).collect();
        let mut new_values: Vec<VT> = Vec::with_capacity(nnz);
        let row = |i: usize, indices: &SmallVec<Array1<IT>>| -> Vec<IT> {
            (0..nmodes).map(|m| indices[m][i].clone()).collect()
        };
        let mut current_row = row(0, &self.inner.indices);
        for k in 1..nnz {
            let candidate = row(k, &self.inner.indices);
            if candidate == current_row {
                kept_values = kept_values + self.inner.values[k].clone();
            } else {
                for (m, v) in current_row.iter().enumerate() {
                    new_indices[m].push(v.clone());
                }
                new_values.push(kept_values);
                current_row = candidate;
                kept_values = self.inner.values[k].clone();
            }
        }
        for (m, v) in current_row.iter().enumerate() {
            new_indices[m].push(v.clone());
        }
        new_values.push(kept_values);

        self.inner.indices = new_indices.into_iter().map(Array1::from_vec).collect();
        self.inner.values = Array1::from_vec(new_values);
        Ok(())
    }

    /// Compacts each mode whose stored indices don't densely cover
    /// `0..dims[m]`: relabels that mode's indices to a dense range and
    /// shrinks its axis to the number of distinct values actually used.
    ///
    /// Returns one entry per mode: `Some(indmap)` maps a compacted index
    /// back to the original value it replaced, for modes that were
    /// compacted; `None` for modes that were already dense.
    pub fn remove_empty(&mut self) -> SmallVec<Option<Array1<IT>>>
    where
        IT: std::hash::Hash + Eq + Ord,
    {
        let nmodes = self.nmodes();
        let mut indmaps: SmallVec<Option<Array1<IT>>> = SmallVec::new();
        for m in 0..nmodes {
            let dim = self.inner.shape[m]
                .len()
                .to_usize()
                .ok_or_else(|| CoreError::NumericalFailure("axis length overflow".into()))
                .expect("axis length fits in usize");
            let mut distinct: Vec<IT> = self.inner.indices[m].iter().cloned().collect();
            distinct.sort();
            distinct.dedup();
            if distinct.len() == dim {
                indmaps.push(None);
                continue;
            }
            let lookup: HashMap<IT, usize> = distinct
                .iter()
                .cloned()
                .enumerate()
                .map(|(new_idx, orig)| (orig, new_idx))
                .collect();
            self.inner.indices[m] = Array1::from_iter(
                self.inner.indices[m]
                    .iter()
                    .map(|v| <IT as NumCast>::from(lookup[v]).expect("compacted index fits in IT")),
            );
            self.inner.shape[m] = self.inner.shape[m].clone_with_range(
                IT::zero()
                    ..<IT as NumCast>::from(distinct.len()).expect("distinct count fits in IT"),
            );
            indmaps.push(Some(Array1::from_vec(distinct)));
        }
        indmaps
    }

    /// Squared Frobenius norm: the sum of squares of all stored values,
    /// accumulated in `f64` regardless of `VT` (a parallel reduction, not a
    /// serial fold) to mitigate precision loss when `VT` is single
    /// precision, then cast back to `VT`.
    pub fn frobsq(&self) -> VT
    where
        VT: ToPrimitive,
    {
        let values = self.inner.values.as_slice().expect("contiguous values");
        let sum: f64 = values
            .par_iter()
            .map(|v| {
                let x = v.to_f64().unwrap_or(0.0);
                x * x
            })
            .sum();
        <VT as NumCast>::from(sum).expect("frobsq total fits in VT")
    }

    /// Geometric-mean density used for CSF allocation heuristics: the
    /// product, over every mode, of `nnz^(1/nmodes) / dims[m]`.
    pub fn density(&self) -> f64 {
        let nmodes = self.nmodes();
        if nmodes == 0 {
            return 0.0;
        }
        let nth_root_nnz = (self.num_non_zeros() as f64).powf(1.0 / nmodes as f64);
        self.inner
            .shape
            .iter()
            .map(|axis| nth_root_nnz / axis.len().to_f64().unwrap_or(1.0).max(1.0))
            .product()
    }

    /// Unfolds (matricizes) the tensor along `mode`: returns a dense matrix
    /// with `mode`'s extent as rows and the Kronecker product of the
    /// remaining modes' extents as columns, following the mixed-radix
    /// column-encoding convention `col = sum_k idx[k] * stride[k]` over all
    /// modes but `mode`, iterated from the fastest-varying mode up.
    ///
    /// This mirrors the classic ParTI!/SPLATT unfolding convention: column
    /// index accumulates contributions from every mode except `mode`, with
    /// each mode's stride equal to the product of extents of modes that vary
    /// faster than it (all modes before it, skipping `mode` itself).
    pub fn unfold(&self, mode: usize) -> CoreResult<SparseMatrix<IT, VT>> {
        let nmodes = self.nmodes();
        if mode >= nmodes {
            return Err(CoreError::BadInput(format!(
                "mode {} out of range for a {}-mode tensor",
                mode, nmodes
            )));
        }
        let dims: Vec<usize> = self
            .inner
            .shape
            .iter()
            .map(|axis| {
                axis.len()
                    .to_usize()
                    .ok_or_else(|| CoreError::NumericalFailure("axis length overflow".into()))
            })
            .collect::<CoreResult<_>>()?;
        let ncols: usize = dims
            .iter()
            .enumerate()
            .filter(|(m, _)| *m != mode)
            .try_fold(1usize, |acc, (_, &d)| acc.checked_mul(d).ok_or(CoreError::OutOfMemory))?;

        let nnz = self.inner.values.len();
        let mut rows = Vec::with_capacity(nnz);
        let mut cols = Vec::with_capacity(nnz);
        for k in 0..nnz {
            // Mixed-radix column encoding matching the original implementation:
            // walk modes from the last one backward, skipping `mode`, and grow
            // the stride by that mode's dimension as we incorporate it.
            let mut col = 0usize;
            let mut mult = 1usize;
            for m in 0..nmodes {
                let off = nmodes - 1 - m;
                if off == mode {
                    continue;
                }
                let idx = self.inner.indices[off][k]
                    .to_usize()
                    .ok_or_else(|| CoreError::NumericalFailure("index overflow".into()))?;
                col += idx * mult;
                mult *= dims[off];
            }
            rows.push(self.inner.indices[mode][k].clone());
            cols.push(<IT as NumCast>::from(col).ok_or_else(|| {
                CoreError::NumericalFailure("unfolded column index overflow".into())
            })?);
        }

        Ok(SparseMatrix::new(
            self.inner.shape[mode].clone(),
            Axis::from(<IT as NumCast>::from(ncols).ok_or(CoreError::OutOfMemory)?),
            Array1::from_vec(rows),
            Array1::from_vec(cols),
            self.inner.values.clone(),
        ))
    }

    /// Groups nonzero positions by their coordinate along `mode`, returning
    /// a map from that coordinate to the list of nonzero indices sharing it.
    /// Used by the CSF builder to form fibers.
    pub fn get_slices(&self, mode: usize) -> HashMap<IT, Vec<usize>> {
        let mut out: HashMap<IT, Vec<usize>> = HashMap::new();
        for k in 0..self.inner.values.len() {
            out.entry(self.inner.indices[mode][k].clone())
                .or_default()
                .push(k);
        }
        out
    }

    /// Histogram of nonzero counts along `mode`, indexed by coordinate.
    pub fn get_hist(&self, mode: usize) -> HashMap<IT, usize> {
        self.get_slices(mode)
            .into_iter()
            .map(|(k, v)| (k, v.len()))
            .collect()
    }
}

impl<IT, VT> Tensor<IT, VT> for COOTensor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    #[inline]
    fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    #[inline]
    fn num_non_zeros(&self) -> usize {
        self.inner.values.len()
    }

    #[inline]
    fn shape(&self) -> &[Axis<IT>] {
        &self.inner.shape
    }
}

impl<IT, VT> RawParts for COOTensor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    type Inner = COOTensorInner<IT, VT>;

    #[inline]
    unsafe fn from_raw_parts(raw_parts: Self::Inner) -> Self {
        Self { inner: raw_parts }
    }

    #[inline]
    fn into_raw_parts(self) -> Self::Inner {
        self.inner
    }

    #[inline]
    fn raw_parts(&self) -> &Self::Inner {
        &self.inner
    }

    #[inline]
    unsafe fn raw_parts_mut(&mut self) -> &mut Self::Inner {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::axis::AxisBuilder;

    fn axes(dims: &[usize]) -> Vec<Axis<usize>> {
        dims.iter()
            .map(|&d| AxisBuilder::new().range(0..d).build())
            .collect()
    }

    #[test]
    fn push_and_count() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[3, 3, 3]));
        t.push(&[0, 0, 0], 1.0).unwrap();
        t.push(&[1, 1, 1], 2.0).unwrap();
        assert_eq!(t.num_non_zeros(), 2);
        assert!((t.frobsq() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn push_rejects_out_of_range() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[3, 3, 3]));
        assert!(t.push(&[5, 0, 0], 1.0).is_err());
    }

    #[test]
    fn dedup_merges_equal_coordinates() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[2, 2, 2]));
        t.push(&[0, 0, 0], 1.0).unwrap();
        t.push(&[0, 0, 0], 3.0).unwrap();
        t.push(&[1, 1, 1], 2.0).unwrap();
        t.sort_by_modes(&[0, 1, 2]);
        t.remove_dups().unwrap();
        assert_eq!(t.num_non_zeros(), 2);
        assert!((t.frobsq() - (16.0 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn unfold_mode0_matches_manual_layout() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[2, 2, 2]));
        t.push(&[0, 1, 0], 5.0).unwrap();
        t.push(&[1, 0, 1], 7.0).unwrap();
        let m = t.unfold(0).unwrap();
        assert_eq!(m.rows().to_vec(), vec![0, 1]);
        assert_eq!(m.cols().to_vec(), vec![2, 1]);
        assert_eq!(m.values().to_vec(), vec![5.0, 7.0]);
    }

    #[test]
    fn density_is_geometric_mean_over_dims() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[2, 2, 2]));
        t.push(&[0, 0, 0], 1.0).unwrap();
        assert!((t.density() - (1.0 / 8.0)).abs() < 1e-9);
    }

    #[test]
    fn remove_empty_compacts_sparse_mode() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[10, 10]));
        t.push(&[2, 1], 1.0).unwrap();
        t.push(&[5, 3], 2.0).unwrap();
        t.push(&[7, 9], 3.0).unwrap();
        let indmaps = t.remove_empty();
        assert_eq!(t.shape()[0].len(), 3);
        assert_eq!(t.shape()[1].len(), 10);
        assert_eq!(indmaps[0].as_ref().unwrap().to_vec(), vec![2, 5, 7]);
        assert!(indmaps[1].is_none());
        assert_eq!(t.indices()[0].to_vec(), vec![0, 1, 2]);
    }
}
