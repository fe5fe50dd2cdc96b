// benches/bench_modint.rs
//! Criterion ベンチ ― StaticModInt / 動的 ModInt の乗算・累乗
//! ----------------------------------------
//! 実行: `cargo bench --bench bench_modint`

use atcoder::{ModInt, ModInt998244353};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

// ─── 1. 一度だけ入力列を生成 ─────────────────────────────────────
static VALUES: Lazy<Vec<i64>> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(998_244_353);
    (0..10_000).map(|_| rng.gen_range(1..998_244_353)).collect()
});

// ─── 2. Criterion ベンチ関数 ───────────────────────────────────────
fn bench_static(c: &mut Criterion) {
    c.bench_function("StaticModInt product", |b| {
        b.iter(|| {
            let mut acc = ModInt998244353::raw(1);
            for &v in VALUES.iter() {
                acc *= ModInt998244353::new(v);
            }
            black_box(acc)
        })
    });
}

fn bench_dynamic(c: &mut Criterion) {
    c.bench_function("ModInt product (barrett)", |b| {
        b.iter(|| {
            let mut acc = ModInt::raw(1);
            for &v in VALUES.iter() {
                acc *= ModInt::new(v);
            }
            black_box(acc)
        })
    });

    c.bench_function("ModInt inverse via pow(-1)", |b| {
        b.iter(|| {
            for &v in VALUES.iter().take(1_000) {
                black_box(ModInt::new(v).pow(-1).unwrap());
            }
        })
    });
}

// ─── 3. エントリポイント ───────────────────────────────────────────
criterion_group!(benches, bench_static, bench_dynamic);
criterion_main!(benches);
