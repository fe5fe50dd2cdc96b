// src/fenwicktree.rs
//! Fenwick Tree (Binary Indexed Tree)
//!
//! 一点加算と区間和を O(log n) で扱う。要素型は `i64` で、加算は 2^64 を法に折り返す。

use std::fmt;

use crate::error::{check_index, check_range, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct FenwickTree {
    n: usize,
    data: Vec<i64>,
}

impl FenwickTree {
    /// 長さ `n`、全要素 0
    pub fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![0; n],
        }
    }

    /// 初期値つきで O(n) 構築
    pub fn from_slice(a: &[i64]) -> Self {
        let n = a.len();
        let mut data = a.to_vec();
        for i in 1..=n {
            let j = i + (i & i.wrapping_neg());
            if j <= n {
                data[j - 1] = data[j - 1].wrapping_add(data[i - 1]);
            }
        }
        Self { n, data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `a[p] += x`
    pub fn add(&mut self, p: usize, x: i64) -> Result<()> {
        check_index(p, self.n)?;
        let mut p = p + 1;
        while p <= self.n {
            self.data[p - 1] = self.data[p - 1].wrapping_add(x);
            p += p & p.wrapping_neg();
        }
        Ok(())
    }

    /// `a[l] + ... + a[r-1]`
    pub fn sum(&self, l: usize, r: usize) -> Result<i64> {
        check_range(l, r, self.n)?;
        Ok(self.prefix(r).wrapping_sub(self.prefix(l)))
    }

    /// `a[p]`
    pub fn get(&self, p: usize) -> Result<i64> {
        check_index(p, self.n)?;
        Ok(self.prefix(p + 1).wrapping_sub(self.prefix(p)))
    }

    /// `a[p] = x`
    pub fn set(&mut self, p: usize, x: i64) -> Result<()> {
        let cur = self.get(p)?;
        self.add(p, x.wrapping_sub(cur))
    }

    /// 元の配列を復元する
    pub fn to_vec(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.n);
        let mut prev = 0i64;
        for i in 1..=self.n {
            let cur = self.prefix(i);
            out.push(cur.wrapping_sub(prev));
            prev = cur;
        }
        out
    }

    /// `a[0] + ... + a[r-1]`
    fn prefix(&self, mut r: usize) -> i64 {
        let mut s = 0i64;
        while r > 0 {
            s = s.wrapping_add(self.data[r - 1]);
            r -= r & r.wrapping_neg();
        }
        s
    }
}

impl From<Vec<i64>> for FenwickTree {
    fn from(v: Vec<i64>) -> Self {
        Self::from_slice(&v)
    }
}

impl fmt::Display for FenwickTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FenwickTree({:?})", self.to_vec())
    }
}

impl fmt::Debug for FenwickTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
