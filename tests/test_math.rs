// tests/test_math.rs
//! 整数論 API (inv_mod / crt / floor_sum / is_prime / pow_mod) の動作検証

use atcoder::{crt, floor_sum, inv_mod, is_prime, pow_mod, AclError};

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

#[test]
fn inv_mod_matches_definition() {
    for m in 1i64..=30 {
        for x in -40i64..=40 {
            match inv_mod(x, m) {
                Ok(y) => {
                    assert!((0..m).contains(&y));
                    assert_eq!((x.rem_euclid(m) * y) % m, 1 % m);
                }
                Err(e) => {
                    assert_ne!(gcd(x, m), 1, "x={x} m={m}");
                    assert!(matches!(e, AclError::NoInverse { .. }));
                }
            }
        }
    }
}

#[test]
fn inv_mod_rejects_bad_modulus() {
    assert_eq!(inv_mod(3, 0), Err(AclError::InvalidModulus(0)));
    assert_eq!(inv_mod(3, -7), Err(AclError::InvalidModulus(-7)));
}

#[test]
fn crt_examples() {
    assert_eq!(crt(&[3, 4], &[5, 7]).unwrap(), (18, 35));
    assert_eq!(crt(&[], &[]).unwrap(), (0, 1));
    // 矛盾する合同式
    assert_eq!(crt(&[1, 2], &[4, 6]).unwrap(), (0, 0));
    // 法が互いに素でなくても解ける
    assert_eq!(crt(&[1, 3], &[4, 6]).unwrap(), (9, 12));
    assert_eq!(crt(&[-1], &[5]).unwrap(), (4, 5));
}

#[test]
fn crt_brute_force() {
    for a in 1i64..=10 {
        for b in 1i64..=10 {
            for c in -5i64..=5 {
                for d in -5i64..=5 {
                    let (y, z) = crt(&[c, d], &[a, b]).unwrap();
                    let lcm = a / gcd(a, b) * b;
                    let sol = (0..lcm).find(|x| (x - c).rem_euclid(a) == 0 && (x - d).rem_euclid(b) == 0);
                    match sol {
                        Some(x) => assert_eq!((y, z), (x, lcm)),
                        None => assert_eq!((y, z), (0, 0)),
                    }
                }
            }
        }
    }
}

#[test]
fn crt_input_errors() {
    assert_eq!(crt(&[1, 2], &[3]), Err(AclError::LengthMismatch(2, 1)));
    assert_eq!(crt(&[1], &[0]), Err(AclError::InvalidModulus(0)));
}

#[test]
fn floor_sum_naive() {
    assert_eq!(floor_sum(4, 10, 6, 3).unwrap(), 3);
    for n in 0i64..15 {
        for m in 1i64..15 {
            for a in -15i64..15 {
                for b in -15i64..15 {
                    let want: i64 = (0..n).map(|i| (a * i + b).div_euclid(m)).sum();
                    assert_eq!(floor_sum(n, m, a, b).unwrap(), want, "n={n} m={m} a={a} b={b}");
                }
            }
        }
    }
}

#[test]
fn floor_sum_constraints() {
    assert!(matches!(floor_sum(-1, 1, 0, 0), Err(AclError::Constraint(_))));
    assert!(matches!(floor_sum(1, 0, 0, 0), Err(AclError::Constraint(_))));
    assert!(matches!(floor_sum(1 << 32, 1, 0, 0), Err(AclError::Constraint(_))));
}

#[test]
fn is_prime_values() {
    let primes: Vec<i64> = (0..50).filter(|&n| is_prime(n).unwrap()).collect();
    assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
    assert!(is_prime(998_244_353).unwrap());
    assert!(is_prime((1 << 31) - 1).unwrap());
    assert!(!is_prime(561).unwrap());
    assert!(is_prime(-1).is_err());
    assert!(is_prime(1 << 31).is_err());
}

#[test]
fn pow_mod_values() {
    assert_eq!(pow_mod(3, 4, 5).unwrap(), 1);
    assert_eq!(pow_mod(-2, 3, 7).unwrap(), 6);
    assert_eq!(pow_mod(10, 0, 1).unwrap(), 0);
    assert!(pow_mod(2, -1, 7).is_err());
    assert_eq!(pow_mod(2, 1, 0), Err(AclError::InvalidModulus(0)));
}

#[test]
fn pow_mod_modulus_limit() {
    assert_eq!(pow_mod(7, 123_456_789, 2_000_001_000).unwrap(), 1_732_569_607);
    assert_eq!(pow_mod(5, 1_000_000_000_000_000_000, 2_000_001_000).unwrap(), 1_260_000_625);
    assert_eq!(
        pow_mod(2, 1, 4_294_967_291),
        Err(AclError::InvalidModulus(4_294_967_291))
    );
    assert_eq!(
        pow_mod(2, 1, 2_000_001_001),
        Err(AclError::InvalidModulus(2_000_001_001))
    );
}
