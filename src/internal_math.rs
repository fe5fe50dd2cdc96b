// src/internal_math.rs
//! 整数論の内部ヘルパ
//! - safe_mod / pow_mod / is_prime (Miller-Rabin, 底 2・7・61)
//! - inv_gcd (拡張ユークリッド)
//! - Barrett reduction (32-bit 法の高速乗算)
//! - floor_sum_unsigned

/// `x mod m` を `[0, m)` に正規化する
#[inline]
pub fn safe_mod(mut x: i64, m: i64) -> i64 {
    x %= m;
    if x < 0 {
        x += m;
    }
    x
}

/// 32-bit 法の Barrett reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barrett {
    m: u32,
    im: u64,
}

impl Barrett {
    /// `1 <= m` を仮定
    pub const fn new(m: u32) -> Self {
        Barrett {
            m,
            im: (u64::MAX / m as u64).wrapping_add(1),
        }
    }

    /// 法
    #[inline]
    pub const fn umod(&self) -> u32 {
        self.m
    }

    /// `a * b mod m` (`a, b < m`)
    ///
    /// `x` は真の商か 1 大きい値なので、`z < y` のときだけ `m` を足し戻す。
    /// 比較を 64 bit で行うので `m` が 2^31 以上でも正しい。
    #[inline]
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        let z = a as u64 * b as u64;
        let x = ((z as u128 * self.im as u128) >> 64) as u64;
        let y = x.wrapping_mul(self.m as u64);
        let fix = if z < y { self.m as u64 } else { 0 };
        z.wrapping_sub(y).wrapping_add(fix) as u32
    }
}

/// `x^n mod m` (`0 <= n`, `1 <= m`)
pub fn pow_mod(x: i64, mut n: u64, m: u32) -> u32 {
    if m == 1 {
        return 0;
    }
    let bt = Barrett::new(m);
    let mut r = 1u32;
    let mut y = safe_mod(x, m as i64) as u32;
    while n != 0 {
        if n & 1 != 0 {
            r = bt.mul(r, y);
        }
        y = bt.mul(y, y);
        n >>= 1;
    }
    r
}

/// 決定的 Miller-Rabin (n < 2^32 で正しい)
pub fn is_prime(n: u32) -> bool {
    match n {
        _ if n <= 1 => return false,
        2 | 7 | 61 => return true,
        _ if n % 2 == 0 => return false,
        _ => {}
    }
    let mut d = n - 1;
    while d % 2 == 0 {
        d /= 2;
    }
    for &a in &[2i64, 7, 61] {
        let mut t = d;
        let mut y = pow_mod(a, t as u64, n);
        while t != n - 1 && y != 1 && y != n - 1 {
            y = (y as u64 * y as u64 % n as u64) as u32;
            t <<= 1;
        }
        if y != n - 1 && t % 2 == 0 {
            return false;
        }
    }
    true
}

/// `(g, x)` を返す: `g = gcd(a, b)`, `a*x ≡ g (mod b)`, `0 <= x < b/g`
///
/// `1 <= b` を仮定
pub fn inv_gcd(a: i64, b: i64) -> (i64, i64) {
    let a = safe_mod(a, b);
    if a == 0 {
        return (b, 0);
    }

    // [0] s - m0 * a = 0 (mod b)
    // [1] t - m1 * a = 0 (mod b)
    // [2] s * |m1| + t * |m0| <= b
    let mut s = b;
    let mut t = a;
    let mut m0 = 0i64;
    let mut m1 = 1i64;

    while t != 0 {
        let u = s / t;
        s -= t * u;
        m0 -= m1 * u;
        std::mem::swap(&mut s, &mut t);
        std::mem::swap(&mut m0, &mut m1);
    }
    // s == g, |m0| <= b/g
    if m0 < 0 {
        m0 += b / s;
    }
    (s, m0)
}

/// `Σ_{i=0}^{n-1} floor((a*i + b) / m)` を mod 2^64 で返す
///
/// `n < 2^32`, `1 <= m < 2^32`
pub fn floor_sum_unsigned(mut n: u64, mut m: u64, mut a: u64, mut b: u64) -> u64 {
    let mut ans = 0u64;
    loop {
        if a >= m {
            let tri = n.wrapping_mul(n.wrapping_sub(1)) / 2;
            ans = ans.wrapping_add(tri.wrapping_mul(a / m));
            a %= m;
        }
        if b >= m {
            ans = ans.wrapping_add(n.wrapping_mul(b / m));
            b %= m;
        }

        let y_max = a * n + b;
        if y_max < m {
            break;
        }
        // y_max < m * (n + 1)
        // floor(y_max / m) <= n
        n = y_max / m;
        b = y_max % m;
        std::mem::swap(&mut m, &mut a);
    }
    ans
}
