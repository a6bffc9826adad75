#![cfg(test)]
#![feature(test)]

extern crate test;

use stensor::algos::tensor::create_random_coo;
use stensor::structs::axis::AxisBuilder;
use test::Bencher;

#[bench]
fn bench_create_random_coo_3d(b: &mut Bencher) {
    let shape = vec![
        AxisBuilder::new().range(0..200usize).build(),
        AxisBuilder::new().range(0..200usize).build(),
        AxisBuilder::new().range(0..200usize).build(),
    ];
    b.iter(|| create_random_coo::<usize, f64>(&shape, 1e-3, 0.0, 1.0, None).unwrap());
}
