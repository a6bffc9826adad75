#![cfg(test)]
#![feature(test)]

extern crate test;

use stensor::algos::tensor::create_random_coo;
use stensor::structs::axis::AxisBuilder;
use stensor::structs::csf::{choose_natural_permutation, CsfTree};
use test::Bencher;

#[bench]
fn bench_csf_build_3d(b: &mut Bencher) {
    let shape = vec![
        AxisBuilder::new().range(0..200usize).build(),
        AxisBuilder::new().range(0..200usize).build(),
        AxisBuilder::new().range(0..200usize).build(),
    ];
    let tensor = create_random_coo::<usize, f64>(&shape, 1e-3, 0.0, 1.0, None).unwrap();
    let perm = choose_natural_permutation(&tensor);
    b.iter(|| CsfTree::build(&tensor, &perm, false).unwrap());
}
