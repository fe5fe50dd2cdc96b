// tests/test_fenwicktree.rs
//! FenwickTree の動作検証

use atcoder::{AclError, FenwickTree};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn from_slice_and_sum() {
    let ft = FenwickTree::from_slice(&[1, 2, 3, 4, 5]);
    assert_eq!(ft.len(), 5);
    assert_eq!(ft.sum(0, 5).unwrap(), 15);
    assert_eq!(ft.sum(1, 3).unwrap(), 5);
    assert_eq!(ft.sum(2, 2).unwrap(), 0);
    assert_eq!(ft.to_vec(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn add_get_set() {
    let mut ft = FenwickTree::new(4);
    ft.add(2, 10).unwrap();
    ft.add(2, -3).unwrap();
    assert_eq!(ft.get(2).unwrap(), 7);
    ft.set(2, 100).unwrap();
    ft.set(0, -5).unwrap();
    assert_eq!(ft.get(2).unwrap(), 100);
    assert_eq!(ft.sum(0, 4).unwrap(), 95);
    assert_eq!(ft.to_string(), "FenwickTree([-5, 0, 100, 0])");
}

#[test]
fn range_errors() {
    let ft = FenwickTree::new(3);
    assert_eq!(ft.sum(2, 1), Err(AclError::InvalidRange { l: 2, r: 1 }));
    assert_eq!(
        ft.sum(2, 1).unwrap_err().to_string(),
        "right index (1) must be greater than or equal to left index (2)"
    );
    assert_eq!(ft.sum(0, 4), Err(AclError::RightOutOfRange(4)));
    assert_eq!(ft.sum(0, 4).unwrap_err().to_string(), "right index 4 is out of range");
    assert_eq!(ft.get(3), Err(AclError::IndexOutOfRange(3)));
}

#[test]
fn agrees_with_naive_array() {
    let mut rng = StdRng::seed_from_u64(7);
    let n = 37;
    let mut naive: Vec<i64> = (0..n).map(|_| rng.gen_range(-1000..1000)).collect();
    let mut ft = FenwickTree::from_slice(&naive);
    for _ in 0..200 {
        let p = rng.gen_range(0..n);
        let x = rng.gen_range(-1000..1000);
        if rng.gen_bool(0.5) {
            ft.add(p, x).unwrap();
            naive[p] += x;
        } else {
            ft.set(p, x).unwrap();
            naive[p] = x;
        }
        let l = rng.gen_range(0..=n);
        let r = rng.gen_range(l..=n);
        assert_eq!(ft.sum(l, r).unwrap(), naive[l..r].iter().sum::<i64>());
    }
    assert_eq!(ft.to_vec(), naive);
}
