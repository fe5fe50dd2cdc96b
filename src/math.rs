// src/math.rs
//! 整数論の公開 API
//! - pow_mod / inv_mod
//! - crt (中国剰余定理)
//! - floor_sum
//! - is_prime

use crate::error::{AclError, Result};
use crate::internal_math;
use crate::modint::MAX_MODULUS;

/// `x^n mod m`
///
/// `0 <= n`, `1 <= m <= MAX_MODULUS`
pub fn pow_mod(x: i64, n: i64, m: u32) -> Result<u32> {
    if n < 0 {
        return Err(AclError::Constraint(format!("n must be >= 0 (got {n})")));
    }
    if m == 0 || m > MAX_MODULUS {
        return Err(AclError::InvalidModulus(m as i64));
    }
    Ok(internal_math::pow_mod(x, n as u64, m))
}

/// `x * y ≡ 1 (mod m)` を満たす `0 <= y < m`
pub fn inv_mod(x: i64, m: i64) -> Result<i64> {
    if m < 1 {
        return Err(AclError::InvalidModulus(m));
    }
    let (g, y) = internal_math::inv_gcd(x, m);
    if g != 1 {
        return Err(AclError::NoInverse {
            x: internal_math::safe_mod(x, m),
            m,
        });
    }
    Ok(y)
}

/// 連立合同式 `x ≡ r[i] (mod m[i])` を解く
///
/// 解があれば `(y, z)` (`0 <= y < z = lcm(m)`)、無ければ `(0, 0)`。
/// 入力が空なら `(0, 1)`。
pub fn crt(r: &[i64], m: &[i64]) -> Result<(i64, i64)> {
    if r.len() != m.len() {
        return Err(AclError::LengthMismatch(r.len(), m.len()));
    }
    if let Some(&bad) = m.iter().find(|&&mi| mi < 1) {
        return Err(AclError::InvalidModulus(bad));
    }

    // contracts: 0 <= r0 < m0
    let (mut r0, mut m0) = (0i64, 1i64);
    for (&ri, &mi) in r.iter().zip(m) {
        let mut r1 = internal_math::safe_mod(ri, mi);
        let mut m1 = mi;
        if m0 < m1 {
            std::mem::swap(&mut r0, &mut r1);
            std::mem::swap(&mut m0, &mut m1);
        }
        if m0 % m1 == 0 {
            if r0 % m1 != r1 {
                return Ok((0, 0));
            }
            continue;
        }

        // m0 > m1, lcm(m0, m1) >= 2 * max(m0, m1)
        let (g, im) = internal_math::inv_gcd(m0, m1);
        let u1 = m1 / g;
        if (r1 - r0) % g != 0 {
            return Ok((0, 0));
        }
        // |r1 - r0| < m0 + m1 <= lcm
        let x = (r1 - r0) / g % u1 * im % u1;
        r0 += x * m0;
        m0 *= u1;
        if r0 < 0 {
            r0 += m0;
        }
    }
    Ok((r0, m0))
}

/// `Σ_{i=0}^{n-1} floor((a*i + b) / m)`
///
/// `0 <= n < 2^32`, `1 <= m < 2^32`。`a`, `b` は負でもよい。
pub fn floor_sum(n: i64, m: i64, a: i64, b: i64) -> Result<i64> {
    const LIMIT: i64 = 1 << 32;
    if !(0..LIMIT).contains(&n) {
        return Err(AclError::Constraint(format!("0 <= n < 2^32 (got n = {n})")));
    }
    if !(1..LIMIT).contains(&m) {
        return Err(AclError::Constraint(format!("1 <= m < 2^32 (got m = {m})")));
    }
    let (un, um) = (n as u64, m as u64);
    let tri = un.wrapping_mul(un.wrapping_sub(1)) / 2;

    let mut ans = 0u64;
    let (mut a, mut b) = (a, b);
    if a < 0 {
        let a2 = internal_math::safe_mod(a, m);
        let q = (a2 as u64).wrapping_sub(a as u64) / um;
        ans = ans.wrapping_sub(tri.wrapping_mul(q));
        a = a2;
    }
    if b < 0 {
        let b2 = internal_math::safe_mod(b, m);
        let q = (b2 as u64).wrapping_sub(b as u64) / um;
        ans = ans.wrapping_sub(un.wrapping_mul(q));
        b = b2;
    }
    Ok(ans.wrapping_add(internal_math::floor_sum_unsigned(un, um, a as u64, b as u64)) as i64)
}

/// `0 <= n < 2^31` の素数判定
pub fn is_prime(n: i64) -> Result<bool> {
    if !(0..1i64 << 31).contains(&n) {
        return Err(AclError::Constraint(format!("0 <= n < 2^31 (got n = {n})")));
    }
    Ok(internal_math::is_prime(n as u32))
}
