// -----------------------------------------------------------------------------
// src/bindings.rs
// atcoder ― Rust ↔ Python バインディング（PyO3 0.25 / async-runtimes 0.25）
// -----------------------------------------------------------------------------

#![cfg(any(feature = "python", feature = "python-ext"))]

use indoc::indoc;
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyInt, PyModule, PyString, PyType};
use pyo3::wrap_pyfunction;
use pyo3::Bound;
use pyo3_async_runtimes::tokio::future_into_py;

use crate::bitset::BitSet;
use crate::descriptor::ExtensionDescriptor;
use crate::dsu::Dsu;
use crate::error::{AclError, TraceError};
use crate::fenwicktree::FenwickTree;
use crate::lazysegtree::{Affine, AffineSum, LazySegtree, RangeAffineRangeSum};
use crate::math;
use crate::modint::{ModInt, ModInt998244353};
use crate::scc::{scc_async, SccGraph};
use crate::segtree::{ModAdd, Segtree};
use crate::trace;

/// Rust → Python 例外変換
impl From<AclError> for PyErr {
    fn from(e: AclError) -> Self {
        match e {
            AclError::IndexOutOfRange(_)
            | AclError::LeftOutOfRange(_)
            | AclError::RightOutOfRange(_)
            | AclError::InvalidRange { .. } => PyIndexError::new_err(e.to_string()),
            AclError::Internal(_) => PyRuntimeError::new_err(e.to_string()),
            _ => PyValueError::new_err(e.to_string()),
        }
    }
}

impl From<TraceError> for PyErr {
    fn from(e: TraceError) -> Self {
        PyRuntimeError::new_err(e.to_string())
    }
}

/// **Tokio ランタイムを 1 回だけ初期化** (PyO3 0.25)
fn ensure_tokio_runtime() {
    use std::sync::OnceLock;
    static RT: OnceLock<()> = OnceLock::new();
    RT.get_or_init(|| {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_all();
        pyo3_async_runtimes::tokio::init(builder);
    });
}

/* ── int / ModInt → 剰余 ───────────────────────────────────── */

// Python の `%` は法が正なら非負を返すので、巨大な int もそのまま縮約できる
fn int_mod(ob: &Bound<'_, PyAny>, m: u32) -> PyResult<u32> {
    ob.rem(m)?.extract::<u32>()
}

fn to_mint998(ob: &Bound<'_, PyAny>) -> PyResult<ModInt998244353> {
    if let Ok(x) = ob.downcast::<PyModInt>() {
        return Ok(ModInt998244353::from(x.borrow().inner.val()));
    }
    if ob.is_instance_of::<PyInt>() {
        return Ok(ModInt998244353::raw(int_mod(ob, ModInt998244353::modulus())?));
    }
    Err(PyTypeError::new_err("required: 'int' or 'ModInt'"))
}

// ===========================================================================
// ModInt
// ===========================================================================

/// 二項演算の相手 (`int` または `ModInt`)。変換できなければ NotImplemented
struct Operand(ModInt);

impl<'py> FromPyObject<'py> for Operand {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if let Ok(x) = ob.downcast::<PyModInt>() {
            return Ok(Operand(x.borrow().inner));
        }
        if ob.is_instance_of::<PyInt>() {
            return Ok(Operand(ModInt::raw(int_mod(ob, ModInt::modulus())?)));
        }
        Err(PyTypeError::new_err("required: 'int' or 'ModInt'"))
    }
}

#[pyclass(name = "ModInt")]
#[derive(Clone, Copy)]
pub struct PyModInt {
    inner: ModInt,
}

impl From<ModInt> for PyModInt {
    fn from(inner: ModInt) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyModInt {
    /// `ModInt(x=0)`
    #[new]
    #[pyo3(signature = (x = None))]
    fn new(x: Option<Operand>) -> Self {
        x.map_or(ModInt::raw(0), |o| o.0).into()
    }

    /// 法を変更 (全 ModInt で共有)
    #[classmethod]
    fn set_mod(_cls: &Bound<'_, PyType>, m: u32) -> PyResult<()> {
        ModInt::set_mod(m).map_err(Into::into)
    }

    #[classmethod]
    fn get_mod(_cls: &Bound<'_, PyType>) -> u32 {
        ModInt::modulus()
    }

    #[getter]
    fn val(&self) -> u32 {
        self.inner.val()
    }

    /// 乗法逆元
    #[getter]
    fn inv(&self) -> PyResult<Self> {
        Ok(self.inner.inv()?.into())
    }

    fn pow(&self, n: i64) -> PyResult<Self> {
        Ok(self.inner.pow(n)?.into())
    }

    fn __add__(&self, other: Operand) -> Self {
        (self.inner + other.0).into()
    }
    fn __radd__(&self, other: Operand) -> Self {
        (other.0 + self.inner).into()
    }
    fn __sub__(&self, other: Operand) -> Self {
        (self.inner - other.0).into()
    }
    fn __rsub__(&self, other: Operand) -> Self {
        (other.0 - self.inner).into()
    }
    fn __mul__(&self, other: Operand) -> Self {
        (self.inner * other.0).into()
    }
    fn __rmul__(&self, other: Operand) -> Self {
        (other.0 * self.inner).into()
    }
    /// `a // b` は `a * b^{-1}`
    fn __floordiv__(&self, other: Operand) -> PyResult<Self> {
        Ok(self.inner.checked_div(other.0)?.into())
    }
    fn __rfloordiv__(&self, other: Operand) -> PyResult<Self> {
        Ok(other.0.checked_div(self.inner)?.into())
    }
    fn __pow__(&self, exp: i64, _modulo: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        Ok(self.inner.pow(exp)?.into())
    }

    fn __iadd__(&mut self, other: Operand) {
        self.inner += other.0;
    }
    fn __isub__(&mut self, other: Operand) {
        self.inner -= other.0;
    }
    fn __imul__(&mut self, other: Operand) {
        self.inner *= other.0;
    }

    fn __neg__(&self) -> Self {
        (-self.inner).into()
    }
    fn __pos__(&self) -> Self {
        *self
    }
    fn __bool__(&self) -> bool {
        self.inner.val() != 0
    }
    fn __int__(&self) -> u32 {
        self.inner.val()
    }
    fn __index__(&self) -> u32 {
        self.inner.val()
    }
    fn __eq__(&self, other: Operand) -> bool {
        self.inner.val() == other.0.val()
    }
    fn __ne__(&self, other: Operand) -> bool {
        self.inner.val() != other.0.val()
    }
    fn __hash__(&self) -> u64 {
        self.inner.val() as u64
    }
    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

// ===========================================================================
// DSU
// ===========================================================================
#[pyclass(name = "DSU")]
pub struct PyDsu {
    inner: Dsu,
}

#[pymethods]
impl PyDsu {
    #[new]
    fn new(n: usize) -> Self {
        Self { inner: Dsu::new(n) }
    }

    /// つながったときだけ True
    fn merge(&mut self, a: usize, b: usize) -> PyResult<bool> {
        Ok(self.inner.merge(a, b)?)
    }

    fn same(&mut self, a: usize, b: usize) -> PyResult<bool> {
        Ok(self.inner.same(a, b)?)
    }

    fn leader(&mut self, a: usize) -> PyResult<usize> {
        Ok(self.inner.leader(a)?)
    }

    fn size(&mut self, a: usize) -> PyResult<usize> {
        Ok(self.inner.size(a)?)
    }

    fn groups(&mut self) -> Vec<Vec<usize>> {
        self.inner.groups()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

// ===========================================================================
// FenwickTree
// ===========================================================================
#[pyclass(name = "FenwickTree")]
pub struct PyFenwickTree {
    inner: FenwickTree,
}

#[pymethods]
impl PyFenwickTree {
    /// `FenwickTree(n)` または `FenwickTree([a0, a1, ...])`
    #[new]
    fn new(n_or_data: &Bound<'_, PyAny>) -> PyResult<Self> {
        let inner = if n_or_data.is_instance_of::<PyInt>() {
            FenwickTree::new(n_or_data.extract::<usize>()?)
        } else {
            FenwickTree::from_slice(&n_or_data.extract::<Vec<i64>>()?)
        };
        Ok(Self { inner })
    }

    fn add(&mut self, p: usize, x: i64) -> PyResult<()> {
        Ok(self.inner.add(p, x)?)
    }

    /// `a[l] + ... + a[r-1]`
    fn sum(&self, l: usize, r: usize) -> PyResult<i64> {
        Ok(self.inner.sum(l, r)?)
    }

    fn get(&self, p: usize) -> PyResult<i64> {
        Ok(self.inner.get(p)?)
    }

    fn set(&mut self, p: usize, x: i64) -> PyResult<()> {
        Ok(self.inner.set(p, x)?)
    }

    fn tolist(&self) -> Vec<i64> {
        self.inner.to_vec()
    }

    fn __getitem__(&self, p: usize) -> PyResult<i64> {
        self.get(p)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

// ===========================================================================
// BitSet
// ===========================================================================
#[pyclass(name = "BitSet")]
#[derive(Clone)]
pub struct PyBitSet {
    inner: BitSet,
}

impl From<BitSet> for PyBitSet {
    fn from(inner: BitSet) -> Self {
        Self { inner }
    }
}

fn bit_value(v: u8) -> PyResult<bool> {
    match v {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(PyValueError::new_err(format!("bit value must be 0 or 1 (got {v})"))),
    }
}

#[pymethods]
impl PyBitSet {
    /// `BitSet(n)` または `BitSet("0101")`
    #[new]
    fn new(arg: &Bound<'_, PyAny>) -> PyResult<Self> {
        if arg.is_instance_of::<PyInt>() {
            return Ok(BitSet::new(arg.extract::<usize>()?).into());
        }
        if let Ok(s) = arg.downcast::<PyString>() {
            return Ok(s.to_str()?.parse::<BitSet>()?.into());
        }
        Err(PyTypeError::new_err("BitSet() requires 'int' or 'str'"))
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __getitem__(&self, i: usize) -> PyResult<u8> {
        Ok(self.inner.get(i)? as u8)
    }

    fn __setitem__(&mut self, i: usize, v: u8) -> PyResult<()> {
        Ok(self.inner.set(i, bit_value(v)?)?)
    }

    /// `flip()` で全反転、`flip(i)` で 1 ビット反転
    #[pyo3(signature = (i = None))]
    fn flip(&mut self, i: Option<usize>) -> PyResult<()> {
        match i {
            Some(i) => Ok(self.inner.flip(i)?),
            None => {
                self.inner.flip_all();
                Ok(())
            }
        }
    }

    fn count(&self) -> usize {
        self.inner.count()
    }
    fn all(&self) -> bool {
        self.inner.all()
    }
    fn any(&self) -> bool {
        self.inner.any()
    }
    fn none(&self) -> bool {
        self.inner.none()
    }

    fn fill(&mut self, v: u8) -> PyResult<()> {
        self.inner.fill(bit_value(v)?);
        Ok(())
    }

    fn tostring(&self) -> String {
        self.inner.to_string()
    }

    /// 2 進文字列を Python の int に
    fn toint<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let s = if self.inner.is_empty() {
            "0".to_string()
        } else {
            self.inner.to_string()
        };
        py.import("builtins")?.getattr("int")?.call1((s, 2))
    }

    fn __invert__(&self) -> Self {
        (!&self.inner).into()
    }
    fn __lshift__(&self, k: usize) -> Self {
        (&self.inner << k).into()
    }
    fn __rshift__(&self, k: usize) -> Self {
        (&self.inner >> k).into()
    }
    fn __ilshift__(&mut self, k: usize) {
        self.inner <<= k;
    }
    fn __irshift__(&mut self, k: usize) {
        self.inner >>= k;
    }

    fn __and__(&self, other: PyRef<'_, Self>) -> PyResult<Self> {
        Ok(self.inner.and(&other.inner)?.into())
    }
    fn __or__(&self, other: PyRef<'_, Self>) -> PyResult<Self> {
        Ok(self.inner.or(&other.inner)?.into())
    }
    fn __xor__(&self, other: PyRef<'_, Self>) -> PyResult<Self> {
        Ok(self.inner.xor(&other.inner)?.into())
    }

    // `a &= a` でも二重借用にならないよう右辺を先に複製する
    fn __iand__(slf: &Bound<'_, Self>, other: &Bound<'_, Self>) -> PyResult<()> {
        let rhs = other.borrow().inner.clone();
        Ok(slf.borrow_mut().inner.and_assign(&rhs)?)
    }
    fn __ior__(slf: &Bound<'_, Self>, other: &Bound<'_, Self>) -> PyResult<()> {
        let rhs = other.borrow().inner.clone();
        Ok(slf.borrow_mut().inner.or_assign(&rhs)?)
    }
    fn __ixor__(slf: &Bound<'_, Self>, other: &Bound<'_, Self>) -> PyResult<()> {
        let rhs = other.borrow().inner.clone();
        Ok(slf.borrow_mut().inner.xor_assign(&rhs)?)
    }

    fn __eq__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner == other.inner
    }
    fn __ne__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner != other.inner
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
    fn __repr__(&self) -> String {
        format!("BitSet('{}')", self.inner)
    }
}

// ===========================================================================
// SegTree (mod 998244353 の和)
// ===========================================================================
#[pyclass(name = "SegTree")]
pub struct PySegTree {
    inner: Segtree<ModAdd>,
}

#[pymethods]
impl PySegTree {
    /// `SegTree(n)` または `SegTree([int | ModInt, ...])`
    #[new]
    fn new(n_or_data: &Bound<'_, PyAny>) -> PyResult<Self> {
        let inner = if n_or_data.is_instance_of::<PyInt>() {
            Segtree::new(n_or_data.extract::<usize>()?)
        } else {
            let mut v = Vec::new();
            for item in n_or_data.try_iter()? {
                v.push(to_mint998(&item?)?);
            }
            Segtree::from(v)
        };
        Ok(Self { inner })
    }

    fn set(&mut self, p: usize, x: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set(p, to_mint998(x)?)?)
    }

    fn get(&self, p: usize) -> PyResult<u32> {
        Ok(self.inner.get(p)?.val())
    }

    fn prod(&self, l: usize, r: usize) -> PyResult<u32> {
        Ok(self.inner.prod(l, r)?.val())
    }

    fn all_prod(&self) -> u32 {
        self.inner.all_prod().val()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

// ===========================================================================
// LazySegTree (区間アフィン・区間和)
// ===========================================================================
#[pyclass(name = "RangeSum")]
#[derive(Clone)]
pub struct PyRangeSum {
    inner: AffineSum,
}

#[pymethods]
impl PyRangeSum {
    /// `RangeSum(a, length=1)`
    #[new]
    #[pyo3(signature = (a, length = None))]
    fn new(a: &Bound<'_, PyAny>, length: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let length = match length {
            Some(l) => to_mint998(l)?,
            None => ModInt998244353::raw(1),
        };
        Ok(Self {
            inner: AffineSum { a: to_mint998(a)?, length },
        })
    }

    #[getter]
    fn a(&self) -> u32 {
        self.inner.a.val()
    }

    #[getter]
    fn length(&self) -> u32 {
        self.inner.length.val()
    }

    fn __eq__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner == other.inner
    }

    fn __repr__(&self) -> String {
        format!("RangeSum(a={}, length={})", self.inner.a, self.inner.length)
    }
}

#[pyclass(name = "Affine")]
#[derive(Clone)]
pub struct PyAffine {
    inner: Affine,
}

#[pymethods]
impl PyAffine {
    /// `x ↦ b*x + c`
    #[new]
    fn new(b: &Bound<'_, PyAny>, c: &Bound<'_, PyAny>) -> PyResult<Self> {
        Ok(Self {
            inner: Affine { b: to_mint998(b)?, c: to_mint998(c)? },
        })
    }

    #[getter]
    fn b(&self) -> u32 {
        self.inner.b.val()
    }

    #[getter]
    fn c(&self) -> u32 {
        self.inner.c.val()
    }

    fn __repr__(&self) -> String {
        format!("Affine(b={}, c={})", self.inner.b, self.inner.c)
    }
}

fn to_range_sum(ob: &Bound<'_, PyAny>) -> PyResult<AffineSum> {
    if let Ok(x) = ob.downcast::<PyRangeSum>() {
        return Ok(x.borrow().inner);
    }
    Ok(AffineSum::leaf(to_mint998(ob)?))
}

#[pyclass(name = "LazySegTree")]
pub struct PyLazySegTree {
    inner: LazySegtree<RangeAffineRangeSum>,
}

#[pymethods]
impl PyLazySegTree {
    /// `LazySegTree(n)` は全要素 `RangeSum(0, 1)`、
    /// `LazySegTree([int | RangeSum, ...])` は int を長さ 1 の葉として扱う
    #[new]
    fn new(n_or_data: &Bound<'_, PyAny>) -> PyResult<Self> {
        let v = if n_or_data.is_instance_of::<PyInt>() {
            let n = n_or_data.extract::<usize>()?;
            vec![AffineSum::leaf(ModInt998244353::raw(0)); n]
        } else {
            let mut v = Vec::new();
            for item in n_or_data.try_iter()? {
                v.push(to_range_sum(&item?)?);
            }
            v
        };
        Ok(Self { inner: LazySegtree::from(v) })
    }

    fn set(&mut self, p: usize, x: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set(p, to_range_sum(x)?)?)
    }

    fn get(&mut self, p: usize) -> PyResult<PyRangeSum> {
        Ok(PyRangeSum { inner: self.inner.get(p)? })
    }

    fn prod(&mut self, l: usize, r: usize) -> PyResult<PyRangeSum> {
        Ok(PyRangeSum { inner: self.inner.prod(l, r)? })
    }

    fn all_prod(&self) -> PyRangeSum {
        PyRangeSum { inner: self.inner.all_prod() }
    }

    fn apply_at(&mut self, p: usize, f: PyRef<'_, PyAffine>) -> PyResult<()> {
        Ok(self.inner.apply_at(p, f.inner)?)
    }

    /// `[l, r)` に `f` を作用
    fn apply(&mut self, l: usize, r: usize, f: PyRef<'_, PyAffine>) -> PyResult<()> {
        Ok(self.inner.apply(l, r, f.inner)?)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

// ===========================================================================
// SCCGraph
// ===========================================================================
#[pyclass(name = "SCCGraph")]
pub struct PySccGraph {
    inner: SccGraph,
}

#[pymethods]
impl PySccGraph {
    #[new]
    fn new(n: usize) -> Self {
        Self { inner: SccGraph::new(n) }
    }

    fn add_edge(&mut self, from: usize, to: usize) -> PyResult<()> {
        Ok(self.inner.add_edge(from, to)?)
    }

    /// トポロジカル順の強連結成分
    fn scc(&self) -> Vec<Vec<usize>> {
        self.inner.scc()
    }

    /// 非同期版 (awaitable)
    fn scc_async<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        ensure_tokio_runtime();
        let graph = self.inner.clone();
        future_into_py(py, async move { scc_async(graph).await.map_err(PyErr::from) })
    }

    fn num_vertices(&self) -> usize {
        self.inner.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.inner.num_edges()
    }

    fn __len__(&self) -> usize {
        self.inner.num_vertices()
    }
}

// ===========================================================================
// 関数
// ===========================================================================
#[pyfunction(name = "inv_mod", text_signature = "(x, m, /)")]
fn inv_mod_py(x: i64, m: i64) -> PyResult<i64> {
    Ok(math::inv_mod(x, m)?)
}

#[pyfunction(name = "crt", text_signature = "(r, m, /)")]
fn crt_py(r: Vec<i64>, m: Vec<i64>) -> PyResult<(i64, i64)> {
    Ok(math::crt(&r, &m)?)
}

#[pyfunction(name = "floor_sum", text_signature = "(n, m, a, b, /)")]
fn floor_sum_py(n: i64, m: i64, a: i64, b: i64) -> PyResult<i64> {
    Ok(math::floor_sum(n, m, a, b)?)
}

#[pyfunction(name = "is_prime", text_signature = "(n, /)")]
fn is_prime_py(n: i64) -> PyResult<bool> {
    Ok(math::is_prime(n)?)
}

#[pyfunction(name = "pow_mod", text_signature = "(x, n, m, /)")]
fn pow_mod_py(x: i64, n: i64, m: u32) -> PyResult<u32> {
    Ok(math::pow_mod(x, n, m)?)
}

/// Rust 側のログを stderr に出す
#[pyfunction(name = "init_tracing", signature = (level = "info"), text_signature = "(level='info')")]
fn init_tracing_py(level: &str) -> PyResult<()> {
    Ok(trace::init_tracing(level)?)
}

// ===========================================================================
// lib.rs から呼ばれる初期化関数
// ===========================================================================
pub fn init(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDsu>()?;
    m.add_class::<PyFenwickTree>()?;
    m.add_class::<PyModInt>()?;
    m.add_class::<PyBitSet>()?;
    m.add_class::<PySegTree>()?;
    m.add_class::<PyLazySegTree>()?;
    m.add_class::<PyRangeSum>()?;
    m.add_class::<PyAffine>()?;
    m.add_class::<PySccGraph>()?;

    m.add_function(wrap_pyfunction!(inv_mod_py, m)?)?;
    m.add_function(wrap_pyfunction!(crt_py, m)?)?;
    m.add_function(wrap_pyfunction!(floor_sum_py, m)?)?;
    m.add_function(wrap_pyfunction!(is_prime_py, m)?)?;
    m.add_function(wrap_pyfunction!(pow_mod_py, m)?)?;
    m.add_function(wrap_pyfunction!(init_tracing_py, m)?)?;

    // 定数・ドキュメント
    let desc = ExtensionDescriptor::default();
    m.add("__version__", desc.version)?;
    m.add("__build_flags__", desc.extra_compile_args)?;
    m.add("__build_profile__", env!("ATCODER_BUILD_PROFILE"))?;
    m.add(
        "__doc__",
        indoc! {r#"
        atcoder
        =======
        AtCoder Library のデータ構造と整数論アルゴリズム（Rust + PyO3 バインディング）

        >>> import atcoder
        >>> d = atcoder.DSU(3)
        >>> d.merge(0, 2)
        True
        >>> atcoder.crt([3, 4], [5, 7])
        (18, 35)
        "#},
    )?;

    Ok(())
}
