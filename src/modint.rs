// src/modint.rs
//! 剰余環 Z/mZ の整数型
//!
//! - [`StaticModInt<M>`] … 法をコンパイル時定数 (const generic) で持つ
//! - [`ModInt`]          … 法をプロセス全体で共有する動的版
//!   (Python の `ModInt.set_mod` から変更される)
//!
//! どちらも `val()` は常に `[0, m)` に正規化済みの値を返す。
//! 除算演算子は用意せず、逆元が無い場合は `checked_div` / `inv` が
//! [`AclError::NoInverse`] を返す。

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{AclError, Result};
use crate::internal_math::{inv_gcd, safe_mod, Barrett};

/// `ModInt` の初期法
pub const DEFAULT_MOD: u32 = 998_244_353;

/// `set_mod` / `math::pow_mod` が受け付ける法の上限 (`2 * 10^9 + 1000`)
pub const MAX_MODULUS: u32 = 2_000_001_000;

/// 法 998244353 の静的 ModInt
pub type ModInt998244353 = StaticModInt<998_244_353>;
/// 法 1000000007 の静的 ModInt
pub type ModInt1000000007 = StaticModInt<1_000_000_007>;

// ===========================================================================
// StaticModInt
// ===========================================================================

/// 法 `M` (`1 <= M <= 2^31`) の剰余類
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StaticModInt<const M: u32> {
    v: u32,
}

impl<const M: u32> StaticModInt<M> {
    /// 法
    #[inline]
    pub const fn modulus() -> u32 {
        M
    }

    /// 負数も受け付けて `[0, M)` に正規化
    #[inline]
    pub fn new(v: i64) -> Self {
        Self::raw(safe_mod(v, M as i64) as u32)
    }

    /// 正規化せずに作る (`v < M` を呼び出し側が保証)
    #[inline]
    pub const fn raw(v: u32) -> Self {
        Self { v }
    }

    #[inline]
    pub const fn val(self) -> u32 {
        self.v
    }

    /// `self^n`
    pub fn pow(self, mut n: u64) -> Self {
        let mut x = self;
        let mut r = Self::raw((1 % M as u64) as u32);
        while n > 0 {
            if n & 1 == 1 {
                r *= x;
            }
            x *= x;
            n >>= 1;
        }
        r
    }

    /// 乗法逆元
    pub fn inv(self) -> Result<Self> {
        let (g, x) = inv_gcd(self.v as i64, M as i64);
        if g != 1 {
            return Err(AclError::NoInverse {
                x: self.v as i64,
                m: M as i64,
            });
        }
        Ok(Self::raw(x as u32))
    }

    /// `self * rhs^{-1}`
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        Ok(self * rhs.inv()?)
    }
}

impl<const M: u32> Add for StaticModInt<M> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let s = self.v as u64 + rhs.v as u64;
        Self::raw((if s >= M as u64 { s - M as u64 } else { s }) as u32)
    }
}

impl<const M: u32> Sub for StaticModInt<M> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let d = self.v as u64 + M as u64 - rhs.v as u64;
        Self::raw((if d >= M as u64 { d - M as u64 } else { d }) as u32)
    }
}

impl<const M: u32> Mul for StaticModInt<M> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::raw((self.v as u64 * rhs.v as u64 % M as u64) as u32)
    }
}

impl<const M: u32> Neg for StaticModInt<M> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::default() - self
    }
}

impl<const M: u32> From<u32> for StaticModInt<M> {
    fn from(v: u32) -> Self {
        Self::raw(v % M)
    }
}

impl<const M: u32> From<u64> for StaticModInt<M> {
    fn from(v: u64) -> Self {
        Self::raw((v % M as u64) as u32)
    }
}

impl<const M: u32> From<usize> for StaticModInt<M> {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl<const M: u32> From<i64> for StaticModInt<M> {
    fn from(v: i64) -> Self {
        Self::new(v)
    }
}

impl<const M: u32> fmt::Display for StaticModInt<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.v)
    }
}

impl<const M: u32> fmt::Debug for StaticModInt<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.v, M)
    }
}

impl<const M: u32> std::iter::Sum for StaticModInt<M> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

// ===========================================================================
// 動的 ModInt
// ===========================================================================

/* ── プロセス全体で共有する法 ───────────────────────────── */
static MODULUS: Lazy<RwLock<Barrett>> = Lazy::new(|| RwLock::new(Barrett::new(DEFAULT_MOD)));

#[inline]
fn barrett() -> Barrett {
    *MODULUS.read().unwrap_or_else(PoisonError::into_inner)
}

/// 実行時に法を変更できる ModInt
///
/// 法はグローバルに 1 つで、`set_mod` 後に作った値から新しい法が使われる。
/// 古い法で作った値は演算時に現在の法で簡約し直す。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModInt {
    v: u32,
}

impl ModInt {
    /// 法を変更する (`1 <= m <= MAX_MODULUS`)
    pub fn set_mod(m: u32) -> Result<()> {
        if m == 0 || m > MAX_MODULUS {
            return Err(AclError::InvalidModulus(m as i64));
        }
        *MODULUS.write().unwrap_or_else(PoisonError::into_inner) = Barrett::new(m);
        debug!(modulus = m, "ModInt modulus updated");
        Ok(())
    }

    /// 現在の法
    #[inline]
    pub fn modulus() -> u32 {
        barrett().umod()
    }

    pub fn new(v: i64) -> Self {
        Self::raw(safe_mod(v, Self::modulus() as i64) as u32)
    }

    /// 正規化しない (`v < modulus()` を呼び出し側が保証)
    #[inline]
    pub const fn raw(v: u32) -> Self {
        Self { v }
    }

    /// `[0, modulus())` の代表元
    #[inline]
    pub fn val(self) -> u32 {
        self.reduced(Self::modulus())
    }

    #[inline]
    fn reduced(self, m: u32) -> u32 {
        if self.v >= m {
            self.v % m
        } else {
            self.v
        }
    }

    /// `self^n`。`n < 0` のときは逆元の `|n|` 乗
    pub fn pow(self, n: i64) -> Result<Self> {
        let bt = barrett();
        let base = if n < 0 { self.inv()? } else { self };
        let mut x = base.reduced(bt.umod());
        let mut k = n.unsigned_abs();
        let mut r = 1 % bt.umod();
        while k > 0 {
            if k & 1 == 1 {
                r = bt.mul(r, x);
            }
            x = bt.mul(x, x);
            k >>= 1;
        }
        Ok(Self::raw(r))
    }

    /// 乗法逆元
    pub fn inv(self) -> Result<Self> {
        let m = Self::modulus();
        let v = self.reduced(m);
        let (g, x) = inv_gcd(v as i64, m as i64);
        if g != 1 {
            return Err(AclError::NoInverse {
                x: v as i64,
                m: m as i64,
            });
        }
        Ok(Self::raw(x as u32))
    }

    /// `self * rhs^{-1}`
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        Ok(self * rhs.inv()?)
    }
}

impl Add for ModInt {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let m = Self::modulus();
        let s = self.reduced(m) as u64 + rhs.reduced(m) as u64;
        Self::raw((s % m as u64) as u32)
    }
}

impl Sub for ModInt {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let m = Self::modulus();
        let d = self.reduced(m) as u64 + m as u64 - rhs.reduced(m) as u64;
        Self::raw((d % m as u64) as u32)
    }
}

impl Mul for ModInt {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let bt = barrett();
        let m = bt.umod();
        Self::raw(bt.mul(self.reduced(m), rhs.reduced(m)))
    }
}

impl Neg for ModInt {
    type Output = Self;
    fn neg(self) -> Self {
        Self::raw(0) - self
    }
}

impl From<i64> for ModInt {
    fn from(v: i64) -> Self {
        Self::new(v)
    }
}

impl From<u32> for ModInt {
    fn from(v: u32) -> Self {
        Self::raw(v % Self::modulus())
    }
}

impl fmt::Display for ModInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.val())
    }
}

impl fmt::Debug for ModInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.val(), Self::modulus())
    }
}

/* ── 複合代入は二項演算に委譲 ───────────────────────────── */
macro_rules! impl_assign_ops {
    ($({$($gen:tt)*} $t:ty;)*) => {$(
        impl<$($gen)*> AddAssign for $t {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }
        impl<$($gen)*> SubAssign for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }
        impl<$($gen)*> MulAssign for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }
    )*};
}

impl_assign_ops! {
    {const M: u32} StaticModInt<M>;
    {} ModInt;
}

#[cfg(test)]
mod tests {
    use super::*;

    type Mint7 = StaticModInt<7>;

    #[test]
    fn static_arith() {
        let a = Mint7::new(-1);
        assert_eq!(a.val(), 6);
        assert_eq!((a + Mint7::new(3)).val(), 2);
        assert_eq!((Mint7::new(2) - Mint7::new(5)).val(), 4);
        assert_eq!((Mint7::new(3) * Mint7::new(5)).val(), 1);
        assert_eq!((-Mint7::new(0)).val(), 0);
        assert_eq!(Mint7::new(3).pow(6).val(), 1);
    }

    #[test]
    fn static_inverse() {
        for x in 1..7 {
            let a = Mint7::new(x);
            assert_eq!((a * a.inv().unwrap()).val(), 1);
        }
        assert!(Mint7::new(0).inv().is_err());
        let m4 = StaticModInt::<4>::new(2);
        assert_eq!(
            m4.inv(),
            Err(AclError::NoInverse { x: 2, m: 4 })
        );
    }

    #[test]
    fn modulus_one() {
        let a = StaticModInt::<1>::new(12345);
        assert_eq!(a.val(), 0);
        assert_eq!(a.pow(0).val(), 0);
    }
}
