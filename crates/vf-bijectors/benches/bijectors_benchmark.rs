use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{ArcArray, Array, ArrayD, IxDyn};
use std::hint::black_box;
use vf_bijectors::{Bijector, Block, Chain, DiagLinear, Shift, Tanh};

fn diag_of(len: usize) -> ArcArray<f64, IxDyn> {
    Array::from_shape_fn(IxDyn(&[len]), |idx| 0.5 + (idx[0] % 7) as f64).into_shared()
}

fn batch(rows: usize, cols: usize) -> ArrayD<f64> {
    Array::from_shape_fn(IxDyn(&[rows, cols]), |idx| {
        (idx[0] as f64 - 0.5) * 0.01 + idx[1] as f64 * 0.001
    })
}

fn bench_diag_linear_forward(c: &mut Criterion) {
    let bijector = DiagLinear::new(diag_of(256)).expect("1-d diag");
    let x = batch(1000, 256);

    c.bench_function("diag_linear_forward_1000x256", |b| {
        b.iter(|| black_box(bijector.forward(black_box(&x))))
    });
}

fn bench_diag_linear_fused(c: &mut Criterion) {
    let bijector = DiagLinear::new(diag_of(256)).expect("1-d diag");
    let x = batch(1000, 256);

    c.bench_function("diag_linear_forward_and_log_det_1000x256", |b| {
        b.iter(|| black_box(bijector.forward_and_log_det(black_box(&x))))
    });
}

fn bench_diag_linear_log_det(c: &mut Criterion) {
    let bijector = DiagLinear::new(diag_of(256)).expect("1-d diag");
    let x = batch(1000, 256);

    c.bench_function("diag_linear_log_det_1000x256", |b| {
        b.iter(|| black_box(bijector.forward_log_det_jacobian(black_box(&x))))
    });
}

fn bench_tanh_forward_and_log_det(c: &mut Criterion) {
    let bijector = Tanh::<f64>::new();
    let x = batch(1000, 256);

    c.bench_function("tanh_forward_and_log_det_1000x256", |b| {
        b.iter(|| black_box(bijector.forward_and_log_det(black_box(&x))))
    });
}

fn bench_affine_chain(c: &mut Criterion) {
    let shift = Array::from_shape_fn(IxDyn(&[256]), |idx| idx[0] as f64 * 0.1).into_shared();
    let chain = Chain::new(vec![
        Box::new(Block::new(Shift::new(shift), 1).expect("valid ndims"))
            as Box<dyn Bijector<Elem = f64>>,
        Box::new(DiagLinear::new(diag_of(256)).expect("1-d diag")),
    ])
    .expect("valid chain");
    let x = batch(1000, 256);

    c.bench_function("affine_chain_forward_and_log_det_1000x256", |b| {
        b.iter(|| black_box(chain.forward_and_log_det(black_box(&x))))
    });
}

criterion_group!(
    benches,
    bench_diag_linear_forward,
    bench_diag_linear_fused,
    bench_diag_linear_log_det,
    bench_tanh_forward_and_log_det,
    bench_affine_chain
);
criterion_main!(benches);
