// src/bitset.rs
//! 固定長ビット集合
//!
//! 64-bit ワードの LSB 側から詰めて保持する。文字列表現は最上位ビットが先頭で、
//! 末尾の文字が bit 0。長さ `n` を超えるパディングビットは常に 0 に保つ。

use std::fmt;
use std::ops::{Not, Shl, ShlAssign, Shr, ShrAssign};
use std::str::FromStr;

use crate::error::{check_index, AclError, Result};

const W: usize = 64;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    n: usize,
    words: Vec<u64>,
}

impl BitSet {
    /// 長さ `n`、全ビット 0
    pub fn new(n: usize) -> Self {
        Self {
            n,
            words: vec![0; n.div_ceil(W)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize) -> Result<bool> {
        check_index(i, self.n)?;
        Ok(self.words[i / W] >> (i % W) & 1 == 1)
    }

    pub fn set(&mut self, i: usize, value: bool) -> Result<()> {
        check_index(i, self.n)?;
        let mask = 1u64 << (i % W);
        if value {
            self.words[i / W] |= mask;
        } else {
            self.words[i / W] &= !mask;
        }
        Ok(())
    }

    /// bit `i` を反転
    pub fn flip(&mut self, i: usize) -> Result<()> {
        check_index(i, self.n)?;
        self.words[i / W] ^= 1u64 << (i % W);
        Ok(())
    }

    /// 全ビット反転
    pub fn flip_all(&mut self) {
        for w in &mut self.words {
            *w = !*w;
        }
        self.trim();
    }

    /// 全ビットを `value` で埋める
    pub fn fill(&mut self, value: bool) {
        let w = if value { u64::MAX } else { 0 };
        self.words.iter_mut().for_each(|x| *x = w);
        self.trim();
    }

    /// 立っているビット数
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// 全ビットが 1 (長さ 0 なら true)
    pub fn all(&self) -> bool {
        self.count() == self.n
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    pub fn none(&self) -> bool {
        !self.any()
    }

    /* ── 長さの揃った集合同士の論理演算 ─────────────────────── */

    pub fn and_assign(&mut self, rhs: &BitSet) -> Result<()> {
        self.zip_assign(rhs, |a, b| a & b)
    }

    pub fn or_assign(&mut self, rhs: &BitSet) -> Result<()> {
        self.zip_assign(rhs, |a, b| a | b)
    }

    pub fn xor_assign(&mut self, rhs: &BitSet) -> Result<()> {
        self.zip_assign(rhs, |a, b| a ^ b)
    }

    pub fn and(&self, rhs: &BitSet) -> Result<BitSet> {
        let mut out = self.clone();
        out.and_assign(rhs)?;
        Ok(out)
    }

    pub fn or(&self, rhs: &BitSet) -> Result<BitSet> {
        let mut out = self.clone();
        out.or_assign(rhs)?;
        Ok(out)
    }

    pub fn xor(&self, rhs: &BitSet) -> Result<BitSet> {
        let mut out = self.clone();
        out.xor_assign(rhs)?;
        Ok(out)
    }

    fn zip_assign(&mut self, rhs: &BitSet, op: impl Fn(u64, u64) -> u64) -> Result<()> {
        if self.n != rhs.n {
            return Err(AclError::LengthMismatch(self.n, rhs.n));
        }
        for (a, &b) in self.words.iter_mut().zip(&rhs.words) {
            *a = op(*a, b);
        }
        Ok(())
    }

    /* ── シフト (長さは変えない) ─────────────────────────────── */

    fn shift_up(&mut self, k: usize) {
        if k >= self.n {
            self.fill(false);
            return;
        }
        let (q, r) = (k / W, k % W);
        let m = self.words.len();
        for i in (0..m).rev() {
            let mut w = if i >= q { self.words[i - q] << r } else { 0 };
            if r != 0 && i > q {
                w |= self.words[i - q - 1] >> (W - r);
            }
            self.words[i] = w;
        }
        self.trim();
    }

    fn shift_down(&mut self, k: usize) {
        if k >= self.n {
            self.fill(false);
            return;
        }
        let (q, r) = (k / W, k % W);
        let m = self.words.len();
        for i in 0..m {
            let src = i + q;
            let mut w = if src < m { self.words[src] >> r } else { 0 };
            if r != 0 && src + 1 < m {
                w |= self.words[src + 1] << (W - r);
            }
            self.words[i] = w;
        }
    }

    /// 最終ワードのパディングを 0 に戻す
    fn trim(&mut self) {
        let rem = self.n % W;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }
}

impl FromStr for BitSet {
    type Err = AclError;

    /// `"0101"` → 長さ 4、bit 0 と bit 2 が 1
    fn from_str(s: &str) -> Result<Self> {
        let n = s.chars().count();
        let mut bs = BitSet::new(n);
        for (pos, c) in s.chars().enumerate() {
            match c {
                '1' => {
                    let i = n - 1 - pos;
                    bs.words[i / W] |= 1u64 << (i % W);
                }
                '0' => {}
                _ => return Err(AclError::InvalidBit(c, pos)),
            }
        }
        Ok(bs)
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = (0..self.n)
            .rev()
            .map(|i| if self.words[i / W] >> (i % W) & 1 == 1 { '1' } else { '0' })
            .collect();
        f.write_str(&s)
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet({self})")
    }
}

impl Not for BitSet {
    type Output = BitSet;
    fn not(mut self) -> BitSet {
        self.flip_all();
        self
    }
}

impl Not for &BitSet {
    type Output = BitSet;
    fn not(self) -> BitSet {
        !self.clone()
    }
}

impl ShlAssign<usize> for BitSet {
    fn shl_assign(&mut self, k: usize) {
        self.shift_up(k);
    }
}

impl ShrAssign<usize> for BitSet {
    fn shr_assign(&mut self, k: usize) {
        self.shift_down(k);
    }
}

impl Shl<usize> for BitSet {
    type Output = BitSet;
    fn shl(mut self, k: usize) -> BitSet {
        self <<= k;
        self
    }
}

impl Shr<usize> for BitSet {
    type Output = BitSet;
    fn shr(mut self, k: usize) -> BitSet {
        self >>= k;
        self
    }
}

impl Shl<usize> for &BitSet {
    type Output = BitSet;
    fn shl(self, k: usize) -> BitSet {
        self.clone() << k
    }
}

impl Shr<usize> for &BitSet {
    type Output = BitSet;
    fn shr(self, k: usize) -> BitSet {
        self.clone() >> k
    }
}
