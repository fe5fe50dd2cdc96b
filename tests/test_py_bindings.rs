// tests/test_py_bindings.rs
//! atcoder  Python バインディング smoke-test
//! cargo test --features python-embed で実行
//!
//! 共有ライブラリを探す代わりに、埋め込みインタプリタ上で
//! `bindings::init` を直接呼んでモジュールを組み立てる。

#![cfg(feature = "python-embed")]

use std::ffi::CStr;

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyModule};

/* ── モジュールを作って Python スニペットを実行 ─────────────── */
fn run_snippet(code: &CStr) {
    pyo3::prepare_freethreaded_python();
    Python::with_gil(|py| -> PyResult<()> {
        let m = PyModule::new(py, "atcoder")?;
        atcoder::bindings::init(py, &m)?;
        let globals = PyDict::new(py);
        globals.set_item("atcoder", &m)?;
        py.run(code, Some(&globals), None)
    })
    .unwrap();
}

#[test]
fn module_attributes() {
    run_snippet(c"
assert atcoder.__version__ == '0.1'
assert atcoder.__build_flags__ == ['-Copt-level=2', '-Ctarget-cpu=native', '-Ccodegen-units=1', '-Lnative=./src']
assert 'DSU' in atcoder.__doc__
");
}

#[test]
fn dsu_and_fenwick() {
    run_snippet(c"
d = atcoder.DSU(5)
assert d.merge(0, 1) is True
assert d.merge(1, 0) is False
d.merge(1, 2)
assert d.groups() == [[0, 1, 2], [3], [4]]
assert d.size(2) == 3 and len(d) == 5
try:
    d.leader(9)
    raise AssertionError('expected IndexError')
except IndexError as e:
    assert 'index 9 is out of range' in str(e)

ft = atcoder.FenwickTree([1, 2, 3, 4, 5])
assert ft.sum(1, 3) == 5
ft.set(0, 10)
assert ft.tolist() == [10, 2, 3, 4, 5]
assert repr(ft) == 'FenwickTree([10, 2, 3, 4, 5])'
try:
    ft.sum(3, 2)
    raise AssertionError('expected IndexError')
except IndexError:
    pass
");
}

#[test]
fn modint_protocol() {
    run_snippet(c"
M = atcoder.ModInt
M.set_mod(13)
try:
    a = M(5)
    b = M(-2)
    assert int(b) == 11 and repr(b) == '11'
    assert a + b == 3 and 3 == a + b
    assert 1 + a == 6 and a - 7 == 11 and 20 - a == 2
    assert a * 3 == 2
    assert a // 5 == 1 and (a // b) * b == a
    assert a ** -1 == a.inv and (a ** -1) * a == 1
    assert -a == 8 and +a == 5 and bool(M(13)) is False
    assert M(10 ** 30) == 10 ** 30 % 13
    assert M.get_mod() == 13
    c = M(4)
    c += 10
    assert c == 1
    try:
        M(0).inv
        raise AssertionError('expected ValueError')
    except ValueError as e:
        assert str(e) == 'There is no inverse element of 0 in mod 13'
    try:
        a < b
        raise AssertionError('expected TypeError')
    except TypeError:
        pass
finally:
    M.set_mod(998244353)
");
}

#[test]
fn bitset_protocol() {
    run_snippet(c"
B = atcoder.BitSet
b = B('0011')
assert (b << 1).tostring() == '0110'
assert len(~b) == 4 and (~b).tostring() == '1100'
assert b[0] == 1 and b[2] == 0
b[3] = 1
assert str(b) == '1011' and b.count() == 3
assert b.toint() == 11
b.flip()
assert b.tostring() == '0100'
b.flip(0)
assert b.tostring() == '0101'
assert (B('1100') & B('1010')) == B('1000')
assert (B('1100') | B('1010')) == B('1110')
assert (B('1100') ^ B('1010')) == B('0110')
x = B('1100')
x &= x
assert x == B('1100')
x >>= 2
assert x.tostring() == '0011'
assert B(3).none() and not B(3).any()
try:
    b[0] = 2
    raise AssertionError('expected ValueError')
except ValueError:
    pass
try:
    B('1') & B('10')
    raise AssertionError('expected ValueError')
except ValueError:
    pass
");
}

#[test]
fn segtrees() {
    run_snippet(c"
st = atcoder.SegTree([1, 2, 3, atcoder.ModInt(4)])
assert st.prod(1, 3) == 5 and st.all_prod() == 10
st.set(0, -1)
assert st.get(0) == 998244352 and len(st) == 4

lst = atcoder.LazySegTree([1, 2, 3, 4, 5])
lst.apply(1, 4, atcoder.Affine(2, 1))
assert lst.prod(0, 5).a == 27 and lst.prod(0, 5).length == 5
lst.apply_at(0, atcoder.Affine(0, 7))
assert lst.get(0) == atcoder.RangeSum(7)
assert lst.all_prod().a == 33
z = atcoder.LazySegTree(3)
z.apply(0, 3, atcoder.Affine(1, 2))
assert z.all_prod().a == 6
assert repr(atcoder.RangeSum(3, 2)) == 'RangeSum(a=3, length=2)'
");
}

#[test]
fn scc_and_math() {
    run_snippet(c"
g = atcoder.SCCGraph(3)
g.add_edge(0, 1)
g.add_edge(1, 0)
g.add_edge(1, 2)
assert g.scc() == [[0, 1], [2]] and len(g) == 3
assert g.num_vertices() == 3 and g.num_edges() == 3

import asyncio
async def main():
    return await g.scc_async()
assert asyncio.run(main()) == [[0, 1], [2]]

assert atcoder.crt([3, 4], [5, 7]) == (18, 35)
assert atcoder.floor_sum(4, 10, 6, 3) == 3
assert atcoder.inv_mod(3, 7) == 5
assert atcoder.is_prime(998244353)
assert atcoder.pow_mod(2, 10, 1000) == 24
assert atcoder.__build_profile__ in ('debug', 'release')
try:
    atcoder.crt([1, 2], [3])
    raise AssertionError('expected ValueError')
except ValueError:
    pass
");
}
