// src/lazysegtree.rs
//! 遅延評価セグメント木 (区間作用・区間積)
//!
//! 作用素モノイドは [`MapMonoid`] で与える。同梱の [`RangeAffineRangeSum`] は
//! mod 998244353 での「区間アフィン変換・区間和」。

use crate::error::{check_index, check_range, AclError, Result};
use crate::modint::ModInt998244353 as Mint;
use crate::segtree::{ceil_pow2, Monoid};

/// 作用素つきモノイド
///
/// `mapping(composition(f, g), x) == mapping(f, mapping(g, x))` を満たすこと。
pub trait MapMonoid {
    type M: Monoid;
    type F: Clone;

    fn identity_element() -> <Self::M as Monoid>::S {
        Self::M::identity()
    }
    fn binary_operation(
        a: &<Self::M as Monoid>::S,
        b: &<Self::M as Monoid>::S,
    ) -> <Self::M as Monoid>::S {
        Self::M::binary_operation(a, b)
    }
    fn identity_map() -> Self::F;
    fn mapping(f: &Self::F, x: &<Self::M as Monoid>::S) -> <Self::M as Monoid>::S;
    /// `f ∘ g` (先に `g`、次に `f`)
    fn composition(f: &Self::F, g: &Self::F) -> Self::F;
}

/* ── 区間アフィン変換・区間和 ────────────────────────────── */

/// 区間和 `a` と区間長 `length` の組
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffineSum {
    pub a: Mint,
    pub length: Mint,
}

impl AffineSum {
    /// 長さ 1 の葉
    pub fn leaf(a: Mint) -> Self {
        Self {
            a,
            length: Mint::raw(1),
        }
    }
}

/// `x ↦ b·x + c`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affine {
    pub b: Mint,
    pub c: Mint,
}

pub struct AffineSumMonoid;
impl Monoid for AffineSumMonoid {
    type S = AffineSum;
    fn identity() -> AffineSum {
        AffineSum {
            a: Mint::raw(0),
            length: Mint::raw(0),
        }
    }
    fn binary_operation(x: &AffineSum, y: &AffineSum) -> AffineSum {
        AffineSum {
            a: x.a + y.a,
            length: x.length + y.length,
        }
    }
}

pub struct RangeAffineRangeSum;
impl MapMonoid for RangeAffineRangeSum {
    type M = AffineSumMonoid;
    type F = Affine;

    fn identity_map() -> Affine {
        Affine {
            b: Mint::raw(1),
            c: Mint::raw(0),
        }
    }
    fn mapping(f: &Affine, x: &AffineSum) -> AffineSum {
        AffineSum {
            a: f.b * x.a + f.c * x.length,
            length: x.length,
        }
    }
    fn composition(f: &Affine, g: &Affine) -> Affine {
        Affine {
            b: f.b * g.b,
            c: f.b * g.c + f.c,
        }
    }
}

/* ── 本体 ─────────────────────────────────────────────── */

type S<F> = <<F as MapMonoid>::M as Monoid>::S;

pub struct LazySegtree<F: MapMonoid> {
    n: usize,
    size: usize,
    log: usize,
    d: Vec<S<F>>,
    lz: Vec<F::F>,
}

impl<F: MapMonoid> Clone for LazySegtree<F> {
    fn clone(&self) -> Self {
        Self {
            n: self.n,
            size: self.size,
            log: self.log,
            d: self.d.clone(),
            lz: self.lz.clone(),
        }
    }
}

impl<F: MapMonoid> LazySegtree<F> {
    pub fn new(n: usize) -> Self {
        vec![F::identity_element(); n].into()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn set(&mut self, p: usize, x: S<F>) -> Result<()> {
        check_index(p, self.n)?;
        let p = p + self.size;
        for i in (1..=self.log).rev() {
            self.push(p >> i);
        }
        self.d[p] = x;
        for i in 1..=self.log {
            self.update(p >> i);
        }
        Ok(())
    }

    /// 遅延分を押し込むので `&mut self`
    pub fn get(&mut self, p: usize) -> Result<S<F>> {
        check_index(p, self.n)?;
        let p = p + self.size;
        for i in (1..=self.log).rev() {
            self.push(p >> i);
        }
        Ok(self.d[p].clone())
    }

    pub fn prod(&mut self, l: usize, r: usize) -> Result<S<F>> {
        check_range(l, r, self.n)?;
        if l == r {
            return Ok(F::identity_element());
        }
        let (mut l, mut r) = (l + self.size, r + self.size);
        for i in (1..=self.log).rev() {
            if ((l >> i) << i) != l {
                self.push(l >> i);
            }
            if ((r >> i) << i) != r {
                self.push((r - 1) >> i);
            }
        }

        let mut sml = F::identity_element();
        let mut smr = F::identity_element();
        while l < r {
            if l & 1 == 1 {
                sml = F::binary_operation(&sml, &self.d[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                smr = F::binary_operation(&self.d[r], &smr);
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(F::binary_operation(&sml, &smr))
    }

    pub fn all_prod(&self) -> S<F> {
        self.d[1].clone()
    }

    /// `a[p] = f(a[p])`
    pub fn apply_at(&mut self, p: usize, f: F::F) -> Result<()> {
        check_index(p, self.n)?;
        let p = p + self.size;
        for i in (1..=self.log).rev() {
            self.push(p >> i);
        }
        self.d[p] = F::mapping(&f, &self.d[p]);
        for i in 1..=self.log {
            self.update(p >> i);
        }
        Ok(())
    }

    /// `a[i] = f(a[i])` for `l <= i < r`
    pub fn apply(&mut self, l: usize, r: usize, f: F::F) -> Result<()> {
        check_range(l, r, self.n)?;
        if l == r {
            return Ok(());
        }
        let (l, r) = (l + self.size, r + self.size);
        for i in (1..=self.log).rev() {
            if ((l >> i) << i) != l {
                self.push(l >> i);
            }
            if ((r >> i) << i) != r {
                self.push((r - 1) >> i);
            }
        }

        {
            let (mut l, mut r) = (l, r);
            while l < r {
                if l & 1 == 1 {
                    self.all_apply(l, f.clone());
                    l += 1;
                }
                if r & 1 == 1 {
                    r -= 1;
                    self.all_apply(r, f.clone());
                }
                l >>= 1;
                r >>= 1;
            }
        }

        for i in 1..=self.log {
            if ((l >> i) << i) != l {
                self.update(l >> i);
            }
            if ((r >> i) << i) != r {
                self.update((r - 1) >> i);
            }
        }
        Ok(())
    }

    /// `g(op(a[l..r]))` が真となる最大の `r`
    pub fn max_right<G>(&mut self, l: usize, g: G) -> Result<usize>
    where
        G: Fn(&S<F>) -> bool,
    {
        if l > self.n {
            return Err(AclError::LeftOutOfRange(l));
        }
        if !g(&F::identity_element()) {
            return Err(AclError::Constraint("g(identity) must be true".into()));
        }
        if l == self.n {
            return Ok(self.n);
        }
        let mut l = l + self.size;
        for i in (1..=self.log).rev() {
            self.push(l >> i);
        }
        let mut sm = F::identity_element();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            if !g(&F::binary_operation(&sm, &self.d[l])) {
                while l < self.size {
                    self.push(l);
                    l *= 2;
                    let res = F::binary_operation(&sm, &self.d[l]);
                    if g(&res) {
                        sm = res;
                        l += 1;
                    }
                }
                return Ok(l - self.size);
            }
            sm = F::binary_operation(&sm, &self.d[l]);
            l += 1;
            if l.is_power_of_two() {
                break;
            }
        }
        Ok(self.n)
    }

    /// `g(op(a[l..r]))` が真となる最小の `l`
    pub fn min_left<G>(&mut self, r: usize, g: G) -> Result<usize>
    where
        G: Fn(&S<F>) -> bool,
    {
        if r > self.n {
            return Err(AclError::RightOutOfRange(r));
        }
        if !g(&F::identity_element()) {
            return Err(AclError::Constraint("g(identity) must be true".into()));
        }
        if r == 0 {
            return Ok(0);
        }
        let mut r = r + self.size;
        for i in (1..=self.log).rev() {
            self.push((r - 1) >> i);
        }
        let mut sm = F::identity_element();
        loop {
            r -= 1;
            while r > 1 && r % 2 == 1 {
                r >>= 1;
            }
            if !g(&F::binary_operation(&self.d[r], &sm)) {
                while r < self.size {
                    self.push(r);
                    r = 2 * r + 1;
                    let res = F::binary_operation(&self.d[r], &sm);
                    if g(&res) {
                        sm = res;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - self.size);
            }
            sm = F::binary_operation(&self.d[r], &sm);
            if r.is_power_of_two() {
                break;
            }
        }
        Ok(0)
    }

    fn update(&mut self, k: usize) {
        self.d[k] = F::binary_operation(&self.d[2 * k], &self.d[2 * k + 1]);
    }

    fn all_apply(&mut self, k: usize, f: F::F) {
        self.d[k] = F::mapping(&f, &self.d[k]);
        if k < self.size {
            self.lz[k] = F::composition(&f, &self.lz[k]);
        }
    }

    fn push(&mut self, k: usize) {
        let f = std::mem::replace(&mut self.lz[k], F::identity_map());
        self.all_apply(2 * k, f.clone());
        self.all_apply(2 * k + 1, f);
    }
}

impl<F: MapMonoid> From<Vec<S<F>>> for LazySegtree<F> {
    fn from(v: Vec<S<F>>) -> Self {
        let n = v.len();
        let log = ceil_pow2(n);
        let size = 1 << log;
        let mut d = vec![F::identity_element(); 2 * size];
        let lz = vec![F::identity_map(); size];
        d[size..size + n].clone_from_slice(&v);
        let mut st = LazySegtree { n, size, log, d, lz };
        for i in (1..size).rev() {
            st.update(i);
        }
        st
    }
}
