// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Criterion benchmarks for the lane algebra, byte-lane diffusion, and table codec.

use criterion::{Criterion, criterion_group, criterion_main};
use ffdecsa_parallel::table::{accumulate_xor, load, store};
use ffdecsa_parallel::{Batch, Group, Parallel32, Parallel64, Parallel128, Parallelism};
use std::hint::black_box;

fn bench_network<P: Parallelism>(c: &mut Criterion) {
    let mut rng = rand::rng();
    let a = Group::<P>::random(&mut rng);
    let b = Group::<P>::random(&mut rng);
    let k = Group::<P>::random(&mut rng);

    c.bench_function(&format!("{}/network", P::NAME), |bench| {
        bench.iter(|| {
            let (a, b, k) = (black_box(a), black_box(b), black_box(k));
            let t = a.xor(k).and(b.not());
            let u = t.or(a.and(b)).xor(k);
            P::barrier();
            black_box(u.xor(t.not()))
        });
    });
}

fn bench_diffusion<P: Parallelism>(c: &mut Criterion) {
    let x = Batch::<P>::splat(0xa5);

    c.bench_function(&format!("{}/diffusion", P::NAME), |bench| {
        bench.iter(|| {
            let x = black_box(x);
            let hi = x.and(Batch::all_80()).shift_right(1);
            let lo = x.and(Batch::all_02()).shift_left(3);
            black_box(hi.or(lo).xor(x.and(Batch::all_29())))
        });
    });
}

fn bench_table<P: Parallelism>(c: &mut Criterion) {
    let mut rng = rand::rng();
    let mut table = vec![0u8; 64 * P::GROUP_BYTES];
    let g = Group::<P>::random(&mut rng);
    let mut out = vec![0u8; P::GROUP_BYTES];

    c.bench_function(&format!("{}/table", P::NAME), |bench| {
        bench.iter(|| {
            for slot in 0..64 {
                store(&mut table, slot, &g).expect("store");
            }
            for slot in 0..64 {
                black_box(load::<P>(&table, slot).expect("load"));
                accumulate_xor::<P>(P::GROUP_BYTES, &mut out, &table, slot).expect("xor");
            }
        });
    });
}

fn parallel32_benches(c: &mut Criterion) {
    bench_network::<Parallel32>(c);
    bench_diffusion::<Parallel32>(c);
    bench_table::<Parallel32>(c);
}

fn parallel64_benches(c: &mut Criterion) {
    bench_network::<Parallel64>(c);
    bench_diffusion::<Parallel64>(c);
    bench_table::<Parallel64>(c);
}

fn parallel128_benches(c: &mut Criterion) {
    bench_network::<Parallel128>(c);
    bench_diffusion::<Parallel128>(c);
    bench_table::<Parallel128>(c);
}

criterion_group!(
    benches,
    parallel32_benches,
    parallel64_benches,
    parallel128_benches
);
criterion_main!(benches);
