// tests/test_bitset.rs
//! BitSet の動作検証

use atcoder::{AclError, BitSet};

fn bs(s: &str) -> BitSet {
    s.parse().unwrap()
}

#[test]
fn parse_and_display() {
    let b = bs("0101");
    assert_eq!(b.len(), 4);
    assert!(b.get(0).unwrap());
    assert!(!b.get(1).unwrap());
    assert!(b.get(2).unwrap());
    assert_eq!(b.to_string(), "0101");
    assert_eq!(BitSet::new(3).to_string(), "000");
    assert_eq!(bs("").len(), 0);
}

#[test]
fn parse_rejects_other_chars() {
    assert_eq!("01a1".parse::<BitSet>(), Err(AclError::InvalidBit('a', 2)));
}

#[test]
fn shifts_keep_length() {
    assert_eq!((bs("0011") << 1).to_string(), "0110");
    assert_eq!((bs("0011") << 3).to_string(), "1000");
    assert_eq!((bs("1100") >> 2).to_string(), "0011");
    assert_eq!((bs("1111") << 4).to_string(), "0000");
    assert_eq!((bs("1111") >> 9).to_string(), "0000");

    let mut b = bs("1001");
    b <<= 1;
    assert_eq!(b.to_string(), "0010");
    b >>= 1;
    assert_eq!(b.to_string(), "0001");
}

#[test]
fn invert_and_count() {
    let b = bs("0110");
    let inv = !&b;
    assert_eq!(inv.to_string(), "1001");
    assert_eq!(inv.len(), 4);
    assert_eq!(inv.count(), 2);

    let mut wide = BitSet::new(100);
    wide.flip_all();
    assert_eq!(wide.count(), 100);
    assert!(wide.all());
    wide.flip(99).unwrap();
    assert!(!wide.all());
    assert!(wide.any());
}

#[test]
fn all_any_none_fill() {
    let mut b = BitSet::new(5);
    assert!(b.none());
    assert!(!b.any());
    b.fill(true);
    assert!(b.all());
    assert_eq!(b.to_string(), "11111");
    b.set(2, false).unwrap();
    assert_eq!(b.to_string(), "11011");
    b.fill(false);
    assert!(b.none());
    assert!(BitSet::new(0).all());
}

#[test]
fn logic_ops() {
    let a = bs("1100");
    let b = bs("1010");
    assert_eq!(a.and(&b).unwrap().to_string(), "1000");
    assert_eq!(a.or(&b).unwrap().to_string(), "1110");
    assert_eq!(a.xor(&b).unwrap().to_string(), "0110");

    let mut c = a.clone();
    c.xor_assign(&b).unwrap();
    c.or_assign(&bs("0001")).unwrap();
    c.and_assign(&bs("0111")).unwrap();
    assert_eq!(c.to_string(), "0111");

    assert_eq!(a.and(&bs("101")), Err(AclError::LengthMismatch(4, 3)));
}

#[test]
fn equality_uses_length() {
    assert_eq!(bs("0011"), bs("0011"));
    assert_ne!(bs("011"), bs("0011"));
}

#[test]
fn index_errors() {
    let mut b = BitSet::new(3);
    assert_eq!(b.get(3), Err(AclError::IndexOutOfRange(3)));
    assert_eq!(b.set(3, true), Err(AclError::IndexOutOfRange(3)));
    assert_eq!(b.flip(10), Err(AclError::IndexOutOfRange(10)));
}
