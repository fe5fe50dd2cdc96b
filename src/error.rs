// src/error.rs

//! ライブラリ全体で共通のエラー型を定義します。
//!
//! - 添字の範囲外
//! - 区間指定の不正 (l > r など)
//! - 逆元が存在しない
//! - 法 (modulus) や引数の制約違反
//! - BitSet 同士の長さ不一致 / 文字列パース失敗

use thiserror::Error;

/// アルゴリズム操作で起こりうるエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AclError {
    /// 添字 `i` が `[0, n)` の外
    #[error("index {0} is out of range")]
    IndexOutOfRange(usize),

    /// 区間の左端が範囲外
    #[error("left index {0} is out of range")]
    LeftOutOfRange(usize),

    /// 区間の右端が範囲外
    #[error("right index {0} is out of range")]
    RightOutOfRange(usize),

    /// `l > r`
    #[error("right index ({r}) must be greater than or equal to left index ({l})")]
    InvalidRange { l: usize, r: usize },

    /// `gcd(x, m) != 1`
    #[error("There is no inverse element of {x} in mod {m}")]
    NoInverse { x: i64, m: i64 },

    /// 法が 0 以下など
    #[error("invalid modulus: {0}")]
    InvalidModulus(i64),

    /// 引数が制約を満たさない
    #[error("[constraints] {0}")]
    Constraint(String),

    /// 配列長の不一致
    #[error("length mismatch: {0} != {1}")]
    LengthMismatch(usize, usize),

    /// BitSet 文字列のパース失敗
    #[error("invalid bit character {0:?} at position {1}")]
    InvalidBit(char, usize),

    /// 非同期タスクの join 失敗など
    #[error("Internal error: {0}")]
    Internal(String),
}

/// crate 内で使う Result エイリアス
pub type Result<T> = std::result::Result<T, AclError>;

/// `i < n` を確認するヘルパ
#[inline]
pub(crate) fn check_index(i: usize, n: usize) -> Result<()> {
    if i < n {
        Ok(())
    } else {
        Err(AclError::IndexOutOfRange(i))
    }
}

/// `l <= r <= n` を確認するヘルパ
#[inline]
pub(crate) fn check_range(l: usize, r: usize, n: usize) -> Result<()> {
    if l > n {
        return Err(AclError::LeftOutOfRange(l));
    }
    if r > n {
        return Err(AclError::RightOutOfRange(r));
    }
    if l > r {
        return Err(AclError::InvalidRange { l, r });
    }
    Ok(())
}

/// ロギング初期化のエラー
#[derive(Debug, Error)]
pub enum TraceError {
    /// フィルタ文字列が不正
    #[error("invalid log filter `{0}`: {1}")]
    Filter(String, String),

    /// グローバル subscriber の登録に失敗
    #[error("tracing init error: {0}")]
    Init(String),
}
