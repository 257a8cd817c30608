use barrett256::{
    modular::{Modulus, PowBase, Residue},
    U256, Word,
};
use criterion::{
    criterion_group, criterion_main, measurement::Measurement, BatchSize, BenchmarkGroup, Criterion,
};
use rand_core::{RngCore, SeedableRng};

/// NIST P-256, little-endian words.
const P256: [Word; 4] = [
    0xffffffffffffffff,
    0x00000000ffffffff,
    0x0000000000000000,
    0xffffffff00000001,
];

fn rng() -> rand_chacha::ChaCha8Rng {
    rand_chacha::ChaCha8Rng::seed_from_u64(0x62617272657474)
}

fn random_uint(rng: &mut impl RngCore) -> U256 {
    let mut words = [0 as Word; 4];
    for word in words.iter_mut() {
        *word = rng.next_u64();
    }
    U256::from_words(words)
}

fn random_modulus_words(rng: &mut impl RngCore) -> [Word; 4] {
    let mut words = random_uint(rng).to_words();
    if words[3] == 0 {
        words[3] = 1;
    }
    words
}

fn bench_modulus<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let mut rng = rng();
    group.bench_function("Modulus::new", |b| {
        b.iter_batched(
            || random_modulus_words(&mut rng),
            |words| Modulus::new(words),
            BatchSize::SmallInput,
        )
    });
}

fn bench_residue_ops<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let mut rng = rng();
    let modulus = Modulus::new(P256).unwrap();

    group.bench_function("addition", |b| {
        b.iter_batched(
            || {
                (
                    Residue::from_uint(&modulus, random_uint(&mut rng)),
                    Residue::from_uint(&modulus, random_uint(&mut rng)),
                )
            },
            |(x, y)| x + y,
            BatchSize::SmallInput,
        )
    });

    group.bench_function("multiplication", |b| {
        b.iter_batched(
            || {
                (
                    Residue::from_uint(&modulus, random_uint(&mut rng)),
                    Residue::from_uint(&modulus, random_uint(&mut rng)),
                )
            },
            |(x, y)| x * y,
            BatchSize::SmallInput,
        )
    });

    group.bench_function("squaring", |b| {
        b.iter_batched(
            || Residue::from_uint(&modulus, random_uint(&mut rng)),
            |x| x.square(),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("canonicalization", |b| {
        b.iter_batched(
            || Residue::from_uint(&modulus, random_uint(&mut rng)),
            |mut x| x.retrieve(),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("inversion", |b| {
        b.iter_batched(
            || Residue::from_uint(&modulus, random_uint(&mut rng)),
            |x| x.invert(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_pow<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let mut rng = rng();
    let modulus = Modulus::new(P256).unwrap();

    group.bench_function("pow", |b| {
        b.iter_batched(
            || {
                (
                    Residue::from_uint(&modulus, random_uint(&mut rng)),
                    random_uint(&mut rng),
                )
            },
            |(x, e)| x.pow(&e),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("PowBase::new", |b| {
        b.iter_batched(
            || Residue::from_uint(&modulus, random_uint(&mut rng)),
            |x| PowBase::new(&x),
            BatchSize::SmallInput,
        )
    });

    let base = PowBase::new(&Residue::from_uint(&modulus, random_uint(&mut rng)));

    group.bench_function("PowBase::pow", |b| {
        b.iter_batched(
            || random_uint(&mut rng),
            |e| base.pow(&e),
            BatchSize::SmallInput,
        )
    });
}

fn bench_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("barrett256");
    bench_modulus(&mut group);
    bench_residue_ops(&mut group);
    bench_pow(&mut group);
    group.finish();
}

criterion_group!(benches, bench_group);
criterion_main!(benches);
