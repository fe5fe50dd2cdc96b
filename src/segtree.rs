// src/segtree.rs
//! セグメント木 (一点更新・区間積)
//!
//! 演算はモノイド [`Monoid`] で与える。よく使うものとして
//! [`Additive`] / [`Max`] / [`Min`] / [`ModAdd`] を同梱。

use std::marker::PhantomData;
use std::ops::Add;

use crate::error::{check_index, check_range, AclError, Result};
use crate::modint::ModInt998244353;

/// 結合的な二項演算と単位元
pub trait Monoid {
    type S: Clone;
    fn identity() -> Self::S;
    fn binary_operation(a: &Self::S, b: &Self::S) -> Self::S;
}

/// 組込み整数型の最小値・最大値・0
pub trait Integral: Copy + Ord + Add<Output = Self> {
    fn zero() -> Self;
    fn min_value() -> Self;
    fn max_value() -> Self;
}

macro_rules! impl_integral {
    ($($t:ty),*) => {$(
        impl Integral for $t {
            #[inline] fn zero() -> Self { 0 }
            #[inline] fn min_value() -> Self { <$t>::MIN }
            #[inline] fn max_value() -> Self { <$t>::MAX }
        }
    )*};
}
impl_integral!(i32, i64, u32, u64, usize);

/// 和
pub struct Additive<T>(PhantomData<fn() -> T>);
impl<T: Integral> Monoid for Additive<T> {
    type S = T;
    fn identity() -> T {
        T::zero()
    }
    fn binary_operation(a: &T, b: &T) -> T {
        *a + *b
    }
}

/// 最大値 (単位元は型の最小値)
pub struct Max<T>(PhantomData<fn() -> T>);
impl<T: Integral> Monoid for Max<T> {
    type S = T;
    fn identity() -> T {
        T::min_value()
    }
    fn binary_operation(a: &T, b: &T) -> T {
        *a.max(b)
    }
}

/// 最小値 (単位元は型の最大値)
pub struct Min<T>(PhantomData<fn() -> T>);
impl<T: Integral> Monoid for Min<T> {
    type S = T;
    fn identity() -> T {
        T::max_value()
    }
    fn binary_operation(a: &T, b: &T) -> T {
        *a.min(b)
    }
}

/// mod 998244353 の和。Python の `SegTree` はこれを使う
pub struct ModAdd;
impl Monoid for ModAdd {
    type S = ModInt998244353;
    fn identity() -> Self::S {
        ModInt998244353::raw(0)
    }
    fn binary_operation(a: &Self::S, b: &Self::S) -> Self::S {
        *a + *b
    }
}

/// `2^k >= n` を満たす最小の `k`
pub(crate) fn ceil_pow2(n: usize) -> usize {
    n.next_power_of_two().trailing_zeros() as usize
}

pub struct Segtree<M: Monoid> {
    n: usize,
    size: usize,
    log: usize,
    d: Vec<M::S>,
}

impl<M: Monoid> Clone for Segtree<M> {
    fn clone(&self) -> Self {
        Self {
            n: self.n,
            size: self.size,
            log: self.log,
            d: self.d.clone(),
        }
    }
}

impl<M: Monoid> Segtree<M> {
    /// 全要素を単位元で初期化
    pub fn new(n: usize) -> Self {
        vec![M::identity(); n].into()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn set(&mut self, p: usize, x: M::S) -> Result<()> {
        check_index(p, self.n)?;
        let p = p + self.size;
        self.d[p] = x;
        for i in 1..=self.log {
            self.update(p >> i);
        }
        Ok(())
    }

    pub fn get(&self, p: usize) -> Result<M::S> {
        check_index(p, self.n)?;
        Ok(self.d[p + self.size].clone())
    }

    /// `op(a[l], ..., a[r-1])`。`l == r` なら単位元
    pub fn prod(&self, l: usize, r: usize) -> Result<M::S> {
        check_range(l, r, self.n)?;
        let mut sml = M::identity();
        let mut smr = M::identity();
        let (mut l, mut r) = (l + self.size, r + self.size);
        while l < r {
            if l & 1 == 1 {
                sml = M::binary_operation(&sml, &self.d[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                smr = M::binary_operation(&self.d[r], &smr);
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(M::binary_operation(&sml, &smr))
    }

    pub fn all_prod(&self) -> M::S {
        self.d[1].clone()
    }

    /// `f(op(a[l..r]))` が真となる最大の `r`
    ///
    /// `f(identity)` は真でなければならない。
    pub fn max_right<F>(&self, l: usize, f: F) -> Result<usize>
    where
        F: Fn(&M::S) -> bool,
    {
        if l > self.n {
            return Err(AclError::LeftOutOfRange(l));
        }
        if !f(&M::identity()) {
            return Err(AclError::Constraint("f(identity) must be true".into()));
        }
        if l == self.n {
            return Ok(self.n);
        }
        let mut l = l + self.size;
        let mut sm = M::identity();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            if !f(&M::binary_operation(&sm, &self.d[l])) {
                while l < self.size {
                    l *= 2;
                    let res = M::binary_operation(&sm, &self.d[l]);
                    if f(&res) {
                        sm = res;
                        l += 1;
                    }
                }
                return Ok(l - self.size);
            }
            sm = M::binary_operation(&sm, &self.d[l]);
            l += 1;
            if l.is_power_of_two() {
                break;
            }
        }
        Ok(self.n)
    }

    /// `f(op(a[l..r]))` が真となる最小の `l`
    pub fn min_left<F>(&self, r: usize, f: F) -> Result<usize>
    where
        F: Fn(&M::S) -> bool,
    {
        if r > self.n {
            return Err(AclError::RightOutOfRange(r));
        }
        if !f(&M::identity()) {
            return Err(AclError::Constraint("f(identity) must be true".into()));
        }
        if r == 0 {
            return Ok(0);
        }
        let mut r = r + self.size;
        let mut sm = M::identity();
        loop {
            r -= 1;
            while r > 1 && r % 2 == 1 {
                r >>= 1;
            }
            if !f(&M::binary_operation(&self.d[r], &sm)) {
                while r < self.size {
                    r = 2 * r + 1;
                    let res = M::binary_operation(&self.d[r], &sm);
                    if f(&res) {
                        sm = res;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - self.size);
            }
            sm = M::binary_operation(&self.d[r], &sm);
            if r.is_power_of_two() {
                break;
            }
        }
        Ok(0)
    }

    fn update(&mut self, k: usize) {
        self.d[k] = M::binary_operation(&self.d[2 * k], &self.d[2 * k + 1]);
    }
}

impl<M: Monoid> From<Vec<M::S>> for Segtree<M> {
    fn from(v: Vec<M::S>) -> Self {
        let n = v.len();
        let log = ceil_pow2(n);
        let size = 1 << log;
        let mut d = vec![M::identity(); 2 * size];
        d[size..size + n].clone_from_slice(&v);
        let mut st = Segtree { n, size, log, d };
        for i in (1..size).rev() {
            st.update(i);
        }
        st
    }
}
