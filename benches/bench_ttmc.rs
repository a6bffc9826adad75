#![cfg(test)]
#![feature(test)]

extern crate test;

use ndarray::Array2;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use stensor::algos::tensor::create_random_coo;
use stensor::algos::ttmc::ttmc;
use stensor::structs::axis::AxisBuilder;
use stensor::structs::csf::{choose_natural_permutation, CsfForest, CsfTree};
use stensor::structs::workspace::Workspace;
use stensor::utils::tracer::Tracer;
use test::Bencher;

#[bench]
fn bench_ttmc_3d(b: &mut Bencher) {
    let shape = vec![
        AxisBuilder::new().range(0..200usize).build(),
        AxisBuilder::new().range(0..200usize).build(),
        AxisBuilder::new().range(0..200usize).build(),
    ];
    let tensor = create_random_coo::<usize, f64>(&shape, 1e-3, 0.0, 1.0, None).unwrap();
    let perm = choose_natural_permutation(&tensor);
    let tree = CsfTree::build(&tensor, &perm, false).unwrap();
    let forest = CsfForest::single(tree, 3);
    let rank = 10;
    let factors: Vec<Array2<f64>> = (0..3)
        .map(|_| Array2::random((200, rank), StandardNormal))
        .collect();
    let mut workspace = Workspace::<f64>::alloc(1, rank);
    let tracer = Tracer::new_dummy();

    b.iter(|| {
        let views: Vec<_> = factors.iter().map(|f| f.view()).collect();
        ttmc(&forest, 0, 200, &views, &mut workspace, &tracer).unwrap()
    });
}
