use crate::structs::axis::Axis;
use crate::structs::tensor::COOTensor;
use crate::structs::vec::SmallVec;
use crate::traits::IdxType;
use anyhow::Result;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::uniform::SampleUniform;
use ndarray_rand::rand_distr::{Distribution, Normal, StandardNormal, Uniform};
use num::{Float, ToPrimitive};
use std::collections::HashSet;

/// Creates a random sparse tensor with the given shape and approximate
/// nonzero density, values drawn from a normal distribution.
///
/// Rejection-samples coordinates to avoid duplicates, matching the
/// teacher's `create_random_coo`/`create_random_dense` approach of reaching
/// for `ndarray-rand` rather than hand-rolling a PRNG. `seed` follows the
/// same `Some`/`None` convention as `TuckerConfig::seed`: `None` draws from
/// entropy, `Some(_)` makes coordinates and values reproducible.
///
/// # Allocation
/// Requires `O(nnz)` auxiliary memory to track which coordinates are
/// already taken.
pub fn create_random_coo<IT, VT>(
    shape: &[Axis<IT>],
    density: f64,
    mean: VT,
    std_dev: VT,
    seed: Option<u64>,
) -> Result<COOTensor<IT, VT>>
where
    IT: IdxType + SampleUniform + std::hash::Hash + Eq,
    VT: crate::traits::ValType + Float,
    StandardNormal: Distribution<VT>,
{
    let total_size: f64 = shape
        .iter()
        .map(|axis| axis.len().to_f64().unwrap_or(0.0))
        .product();
    let nnz = (total_size * density).round().max(0.0) as usize;

    let mut tensor = COOTensor::<IT, VT>::alloc(shape);
    let mut seen: HashSet<Vec<IT>> = HashSet::with_capacity(nnz);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let dists: SmallVec<Uniform<IT>> = shape
        .iter()
        .map(|axis| Uniform::new(axis.lower(), axis.upper()))
        .collect();
    let normal = Normal::new(mean, std_dev)?;

    while seen.len() < nnz {
        let coord: Vec<IT> = dists.iter().map(|d| d.sample(&mut rng)).collect();
        if seen.insert(coord.clone()) {
            let value = normal.sample(&mut rng);
            tensor.push(&coord, value)?;
        }
    }

    Ok(tensor)
}
