// tests/test_lazysegtree.rs
//! LazySegtree (区間アフィン・区間和) の動作検証

use atcoder::{Affine, AffineSum, LazySegtree, ModInt998244353 as Mint, RangeAffineRangeSum};
use rand::{rngs::StdRng, Rng, SeedableRng};

type Tree = LazySegtree<RangeAffineRangeSum>;

fn leaves(v: &[i64]) -> Vec<AffineSum> {
    v.iter().map(|&x| AffineSum::leaf(Mint::new(x))).collect()
}

fn affine(b: i64, c: i64) -> Affine {
    Affine { b: Mint::new(b), c: Mint::new(c) }
}

#[test]
fn range_affine_range_sum() {
    let mut st: Tree = leaves(&[1, 2, 3, 4, 5]).into();
    assert_eq!(st.all_prod().a.val(), 15);
    assert_eq!(st.all_prod().length.val(), 5);

    // [1, 4) を 2x + 1
    st.apply(1, 4, affine(2, 1)).unwrap();
    assert_eq!(st.prod(0, 5).unwrap().a.val(), 1 + 5 + 7 + 9 + 5);
    assert_eq!(st.get(2).unwrap().a.val(), 7);

    // 合成: 先に 2x+1、次に 3x
    st.apply(0, 2, affine(3, 0)).unwrap();
    assert_eq!(st.prod(0, 2).unwrap().a.val(), 3 + 15);

    st.apply_at(4, affine(0, 10)).unwrap();
    assert_eq!(st.get(4).unwrap().a.val(), 10);

    st.set(0, AffineSum::leaf(Mint::new(-1))).unwrap();
    assert_eq!(st.get(0).unwrap().a.val(), 998_244_352);
}

#[test]
fn new_uses_identity_element() {
    let mut st = Tree::new(4);
    st.apply(0, 4, affine(1, 5)).unwrap();
    // 長さ 0 の単位元にはアフィンの定数項が効かない
    assert_eq!(st.all_prod().a.val(), 0);
    assert!(st.prod(4, 3).is_err());
}

#[test]
fn max_right_and_min_left() {
    let mut st: Tree = leaves(&[1, 1, 1, 1, 1, 1]).into();
    st.apply(2, 4, affine(1, 2)).unwrap(); // [1,1,3,3,1,1]
    assert_eq!(st.max_right(0, |s| s.a.val() <= 5).unwrap(), 3);
    assert_eq!(st.min_left(6, |s| s.a.val() <= 5).unwrap(), 3);
    assert_eq!(st.max_right(6, |_| true).unwrap(), 6);
    assert_eq!(st.min_left(0, |_| true).unwrap(), 0);
}

#[test]
fn agrees_with_naive_array() {
    const MOD: i64 = 998_244_353;
    let mut rng = StdRng::seed_from_u64(99);
    for n in [1usize, 5, 8, 21] {
        let mut naive: Vec<i64> = (0..n).map(|_| rng.gen_range(0..100)).collect();
        let mut st: Tree = leaves(&naive).into();
        for _ in 0..150 {
            let l = rng.gen_range(0..=n);
            let r = rng.gen_range(l..=n);
            match rng.gen_range(0..3) {
                0 => {
                    let (b, c) = (rng.gen_range(0..MOD), rng.gen_range(0..MOD));
                    st.apply(l, r, affine(b, c)).unwrap();
                    for x in &mut naive[l..r] {
                        *x = ((b as i128 * *x as i128 + c as i128) % MOD as i128) as i64;
                    }
                }
                1 if n > 0 && l < n => {
                    let v = rng.gen_range(0..MOD);
                    st.set(l, AffineSum::leaf(Mint::new(v))).unwrap();
                    naive[l] = v;
                }
                _ => {
                    let want = naive[l..r].iter().fold(0i64, |acc, &x| (acc + x) % MOD);
                    let got = st.prod(l, r).unwrap();
                    assert_eq!(got.a.val() as i64, want);
                    assert_eq!(got.length.val() as usize, r - l);
                }
            }
        }
    }
}
