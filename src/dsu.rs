// src/dsu.rs
//! Disjoint Set Union (Union-Find)
//!
//! union by size + 経路圧縮。`leader` は経路圧縮で内部配列を書き換えるので
//! `&mut self` を取る。

use std::fmt;

use crate::error::{check_index, Result};

/// 連結成分を管理するデータ構造
///
/// `parent_or_size[i] < 0` なら `i` は代表元で、`-parent_or_size[i]` が成分サイズ。
#[derive(Clone, PartialEq, Eq)]
pub struct Dsu {
    n: usize,
    parent_or_size: Vec<i32>,
}

impl Dsu {
    /// 頂点数 `n`、辺なしで作る
    pub fn new(n: usize) -> Self {
        Self {
            n,
            parent_or_size: vec![-1; n],
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

    /// 辺 `(a, b)` を追加する。
    /// 別々の成分がつながったときだけ `true`。
    pub fn merge(&mut self, a: usize, b: usize) -> Result<bool> {
        check_index(a, self.n)?;
        check_index(b, self.n)?;
        let (mut x, mut y) = (self.find(a), self.find(b));
        if x == y {
            return Ok(false);
        }
        if -self.parent_or_size[x] < -self.parent_or_size[y] {
            std::mem::swap(&mut x, &mut y);
        }
        self.parent_or_size[x] += self.parent_or_size[y];
        self.parent_or_size[y] = x as i32;
        Ok(true)
    }

    pub fn same(&mut self, a: usize, b: usize) -> Result<bool> {
        check_index(a, self.n)?;
        check_index(b, self.n)?;
        Ok(self.find(a) == self.find(b))
    }

    /// `a` の属する成分の代表元
    pub fn leader(&mut self, a: usize) -> Result<usize> {
        check_index(a, self.n)?;
        Ok(self.find(a))
    }

    /// `a` の属する成分のサイズ
    pub fn size(&mut self, a: usize) -> Result<usize> {
        check_index(a, self.n)?;
        let x = self.find(a);
        Ok((-self.parent_or_size[x]) as usize)
    }

    /// 連結成分の一覧。代表元の番号順、各成分内は頂点番号の昇順。
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut leader_buf = vec![0usize; self.n];
        let mut group_size = vec![0usize; self.n];
        for i in 0..self.n {
            leader_buf[i] = self.find(i);
            group_size[leader_buf[i]] += 1;
        }
        let mut result: Vec<Vec<usize>> = group_size
            .into_iter()
            .map(Vec::with_capacity)
            .collect();
        for (i, &l) in leader_buf.iter().enumerate() {
            result[l].push(i);
        }
        result.retain(|g| !g.is_empty());
        result
    }

    /// 範囲チェック済みの find (反復版の経路圧縮)
    fn find(&mut self, a: usize) -> usize {
        let mut root = a;
        while self.parent_or_size[root] >= 0 {
            root = self.parent_or_size[root] as usize;
        }
        let mut x = a;
        while self.parent_or_size[x] >= 0 {
            let next = self.parent_or_size[x] as usize;
            self.parent_or_size[x] = root as i32;
            x = next;
        }
        root
    }
}

impl fmt::Display for Dsu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DSU({:?})", self.parent_or_size)
    }
}

impl fmt::Debug for Dsu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
