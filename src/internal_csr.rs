// src/internal_csr.rs
//! 辺リストを CSR (compressed sparse row) 形式の隣接リストへ詰め直す

/// 頂点 `v` の行き先は `elist[start[v]..start[v + 1]]`
pub struct Csr<E> {
    start: Vec<usize>,
    elist: Vec<E>,
}

impl<E: Copy + Default> Csr<E> {
    /// `edges` は `(from, 辺データ)` の列。`from < n` を仮定
    pub fn new(n: usize, edges: &[(usize, E)]) -> Self {
        let mut start = vec![0usize; n + 1];
        let mut elist = vec![E::default(); edges.len()];
        for &(from, _) in edges {
            start[from + 1] += 1;
        }
        for i in 1..=n {
            start[i] += start[i - 1];
        }
        let mut counter = start.clone();
        for &(from, e) in edges {
            elist[counter[from]] = e;
            counter[from] += 1;
        }
        Self { start, elist }
    }

    /// 頂点 `v` の隣接辺
    #[inline]
    pub fn adj(&self, v: usize) -> &[E] {
        &self.elist[self.start[v]..self.start[v + 1]]
    }
}
