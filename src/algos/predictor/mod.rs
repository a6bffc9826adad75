//! The all-modes-elementwise-product formula shared by tensor completion
//! and by scoring a Tucker model against held-out coordinates: given a
//! coordinate and one factor matrix per mode, predict the entry's value as
//! the sum over rank components of the product of that component across
//! every mode's row.
//!
//! Grounded directly in `completion.c`'s `p_predict_val` (general N-mode,
//! with an accumulation buffer) and `p_predict_val3` (the unrolled 3-mode
//! fast path, kept here as a real specialization rather than a premature
//! one since SPLATT itself special-cases it for exactly this reason).

use crate::error::{CoreError, CoreResult};
use crate::structs::workspace::ThreadScratch;
use crate::traits::ValType;
use ndarray::ArrayView2;

/// General N-mode prediction: `sum_f prod_m factors[m][coord[m], f]`.
///
/// `scratch.predict_buf` is reused as the running elementwise product
/// instead of allocating a fresh accumulator per call.
pub fn predict<VT>(
    factors: &[ArrayView2<VT>],
    coord: &[usize],
    scratch: &mut ThreadScratch<VT>,
) -> CoreResult<VT>
where
    VT: ValType,
{
    if factors.len() != coord.len() {
        return Err(CoreError::BadInput(format!(
            "coordinate has {} modes, got {} factor matrices",
            coord.len(),
            factors.len()
        )));
    }
    if factors.len() == 3 {
        return Ok(predict3(
            factors[0].view(),
            factors[1].view(),
            factors[2].view(),
            coord[0],
            coord[1],
            coord[2],
        ));
    }

    let rank = scratch.predict_buf.len();
    let first_row = factors[0].row(coord[0]);
    if first_row.len() != rank {
        return Err(CoreError::BadInput(format!(
            "factor rank {} does not match workspace rank {}",
            first_row.len(),
            rank
        )));
    }
    scratch.predict_buf.clone_from_slice(first_row.as_slice().expect("contiguous row"));

    for (m, factor) in factors.iter().enumerate().skip(1) {
        let row = factor.row(coord[m]);
        for (acc, v) in scratch.predict_buf.iter_mut().zip(row.iter()) {
            *acc = acc.clone() * v.clone();
        }
    }

    Ok(scratch
        .predict_buf
        .iter()
        .cloned()
        .fold(VT::zero(), |a, b| a + b))
}

/// Unrolled 3-mode fast path: `sum_f A[i,f] * B[j,f] * C[k,f]`, no scratch
/// buffer needed.
pub fn predict3<VT>(
    a: ArrayView2<VT>,
    b: ArrayView2<VT>,
    c: ArrayView2<VT>,
    i: usize,
    j: usize,
    k: usize,
) -> VT
where
    VT: ValType,
{
    let (row_a, row_b, row_c) = (a.row(i), b.row(j), c.row(k));
    let mut est = VT::zero();
    for f in 0..row_a.len() {
        est = est + row_a[f].clone() * row_b[f].clone() * row_c[f].clone();
    }
    est
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn predict3_matches_manual_dot_product() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[5.0, 6.0], [7.0, 8.0]];
        let c = array![[9.0, 10.0], [11.0, 12.0]];
        let est = predict3(a.view(), b.view(), c.view(), 0, 1, 0);
        // component f=0: 1*7*9 = 63, f=1: 2*8*10 = 160, total 223
        assert!((est - 223.0_f64).abs() < 1e-9);
    }

    #[test]
    fn predict_dispatches_to_predict3_for_three_modes() {
        let a = array![[1.0, 2.0]];
        let b = array![[3.0, 4.0]];
        let c = array![[5.0, 6.0]];
        let mut scratch = ThreadScratch::<f64>::alloc(2);
        let factors = [a.view(), b.view(), c.view()];
        let est = predict(&factors, &[0, 0, 0], &mut scratch).unwrap();
        assert!((est - (1.0 * 3.0 * 5.0 + 2.0 * 4.0 * 6.0)).abs() < 1e-9);
    }

    #[test]
    fn predict_rejects_mismatched_coordinate_length() {
        let a = array![[1.0, 2.0]];
        let mut scratch = ThreadScratch::<f64>::alloc(2);
        let factors = [a.view()];
        assert!(predict(&factors, &[0, 0], &mut scratch).is_err());
    }
}
