// src/scc.rs
//! 強連結成分分解 (Tarjan)
//!
//! 再帰を使わず明示スタックで DFS するので、頂点数が大きくてもスタックを溢れさせない。
//! `scc()` の結果は縮約グラフのトポロジカル順。

use tracing::debug;

use crate::error::{check_index, AclError, Result};
use crate::internal_csr::Csr;

#[derive(Debug, Clone, Default)]
pub struct SccGraph {
    n: usize,
    edges: Vec<(usize, usize)>,
}

impl SccGraph {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// 有向辺 `from → to` を追加
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<()> {
        check_index(from, self.n)?;
        check_index(to, self.n)?;
        self.edges.push((from, to));
        Ok(())
    }

    /// `(成分数, 各頂点の成分番号)`。成分番号はトポロジカル順
    pub fn scc_ids(&self) -> (usize, Vec<usize>) {
        const UNVISITED: usize = usize::MAX;

        let n = self.n;
        let g = Csr::new(n, &self.edges);
        let mut now_ord = 0usize;
        let mut group_num = 0usize;
        let mut visited: Vec<usize> = Vec::with_capacity(n);
        let mut low = vec![0usize; n];
        let mut ord = vec![UNVISITED; n];
        let mut ids = vec![0usize; n];
        // (頂点, 次に見る隣接辺の添字)
        let mut call_stack: Vec<(usize, usize)> = Vec::new();

        for s in 0..n {
            if ord[s] != UNVISITED {
                continue;
            }
            ord[s] = now_ord;
            low[s] = now_ord;
            now_ord += 1;
            visited.push(s);
            call_stack.push((s, 0));

            while let Some(top) = call_stack.last_mut() {
                let v = top.0;
                if let Some(&to) = g.adj(v).get(top.1) {
                    top.1 += 1;
                    if ord[to] == UNVISITED {
                        ord[to] = now_ord;
                        low[to] = now_ord;
                        now_ord += 1;
                        visited.push(to);
                        call_stack.push((to, 0));
                    } else {
                        low[v] = low[v].min(ord[to]);
                    }
                    continue;
                }

                call_stack.pop();
                if low[v] == ord[v] {
                    while let Some(u) = visited.pop() {
                        // 確定済みの頂点は以後 low を下げない
                        ord[u] = n;
                        ids[u] = group_num;
                        if u == v {
                            break;
                        }
                    }
                    group_num += 1;
                }
                if let Some(&(p, _)) = call_stack.last() {
                    low[p] = low[p].min(low[v]);
                }
            }
        }

        for x in ids.iter_mut() {
            *x = group_num - 1 - *x;
        }
        (group_num, ids)
    }

    /// 強連結成分の一覧 (トポロジカル順、成分内は頂点番号の昇順)
    pub fn scc(&self) -> Vec<Vec<usize>> {
        let (group_num, ids) = self.scc_ids();
        let mut counts = vec![0usize; group_num];
        for &x in &ids {
            counts[x] += 1;
        }
        let mut groups: Vec<Vec<usize>> = counts.into_iter().map(Vec::with_capacity).collect();
        for (v, &id) in ids.iter().enumerate() {
            groups[id].push(v);
        }
        debug!(
            vertices = self.n,
            edges = self.num_edges(),
            components = group_num,
            "scc decomposed"
        );
        groups
    }
}

/// `scc()` を Tokio の blocking スレッドで実行する
pub async fn scc_async(graph: SccGraph) -> Result<Vec<Vec<usize>>> {
    tokio::task::spawn_blocking(move || graph.scc())
        .await
        .map_err(|e| AclError::Internal(format!("join error: {e}")))
}
