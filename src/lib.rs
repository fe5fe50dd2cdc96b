// src/lib.rs

//! `atcoder` crate のルートモジュール
//! - dsu: Union-Find
//! - fenwicktree: Fenwick Tree
//! - modint: 静的 / 動的 ModInt
//! - math: inv_mod / crt / floor_sum / is_prime / pow_mod
//! - bitset: 固定長ビット集合
//! - segtree / lazysegtree: セグメント木
//! - scc: 強連結成分分解（同期／非同期対応）
//! - descriptor: 拡張モジュールのビルド記述子と設定
//! - trace: ロギング初期化
//! - error: 共通エラー型
//! - bindings: PyO3 バインディング
//!
//!  ⚠  PyO3 拡張を含めてビルドする feature は
//!     * python        … maturin develop / pytest 用
//!     * python-ext    … wheel-build 用
//!     * python-embed  … cargo test 用
//!     の 3 種を許容する。

pub mod bitset;
pub mod descriptor;
pub mod dsu;
pub mod error;
pub mod fenwicktree;
pub mod internal_csr;
pub mod internal_math;
pub mod lazysegtree;
pub mod math;
pub mod modint;
pub mod scc;
pub mod segtree;
pub mod trace;

pub use bitset::BitSet;
pub use descriptor::{Config, DescriptorError, ExtensionDescriptor, RuntimeConfig};
pub use dsu::Dsu;
pub use error::{AclError, TraceError};
pub use fenwicktree::FenwickTree;
pub use lazysegtree::{Affine, AffineSum, LazySegtree, MapMonoid, RangeAffineRangeSum};
pub use math::{crt, floor_sum, inv_mod, is_prime, pow_mod};
pub use modint::{ModInt, ModInt1000000007, ModInt998244353, StaticModInt};
pub use scc::{scc_async, SccGraph};
pub use segtree::{Additive, Max, Min, ModAdd, Monoid, Segtree};
pub use trace::init_tracing;

/* ────────────────────────────────────────────────────────────────
   PyO3 バインディングは python / python-ext のどちらかが立っていれば
   コンパイルする（python-embed は python を継承するので OK）
   ──────────────────────────────────────────────────────────── */
#[cfg(any(feature = "python", feature = "python-ext"))]
pub mod bindings;

#[cfg(any(feature = "python", feature = "python-ext"))]
use pyo3::{prelude::*, types::PyModule, Bound};

/// `atcoder` として Python から import されるモジュール
#[cfg(any(feature = "python", feature = "python-ext"))]
#[pymodule]
fn atcoder(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    bindings::init(py, m)
}
