// tests/test_scc.rs
//! SccGraph の動作検証
//! - 同期 scc / scc_ids
//! - 非同期 scc_async
//! - トポロジカル順の性質

use atcoder::{scc_async, AclError, SccGraph};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn sample_graph() -> SccGraph {
    // 0 → 1 → 2 → 0 の閉路、2 → 3、3 ⇄ 4、5 は孤立
    let mut g = SccGraph::new(6);
    for &(a, b) in &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3)] {
        g.add_edge(a, b).unwrap();
    }
    g
}

/// 全辺が「同じ成分」か「前の成分 → 後の成分」であること
fn assert_topological(n: usize, edges: &[(usize, usize)], groups: &[Vec<usize>]) {
    let mut id = vec![usize::MAX; n];
    for (k, g) in groups.iter().enumerate() {
        for &v in g {
            assert_eq!(id[v], usize::MAX, "vertex {v} appears twice");
            id[v] = k;
        }
    }
    assert!(id.iter().all(|&k| k != usize::MAX));
    for &(a, b) in edges {
        assert!(id[a] <= id[b], "edge {a}->{b} goes backwards");
    }
}

#[test]
fn scc_sync() {
    let g = sample_graph();
    assert_eq!(g.num_vertices(), 6);
    assert_eq!(g.num_edges(), 6);
    let groups = g.scc();
    assert_eq!(groups.len(), 3);
    assert!(groups.contains(&vec![0, 1, 2]));
    assert!(groups.contains(&vec![3, 4]));
    assert!(groups.contains(&vec![5]));
    let pos = |v: usize| groups.iter().position(|g| g.contains(&v)).unwrap();
    assert!(pos(0) < pos(3));

    let (num, ids) = g.scc_ids();
    assert_eq!(num, 3);
    assert_eq!(ids[0], ids[2]);
    assert_eq!(ids[3], ids[4]);
    assert_ne!(ids[0], ids[3]);
}

#[test]
fn add_edge_range_checked() {
    let mut g = SccGraph::new(2);
    assert_eq!(g.add_edge(0, 2), Err(AclError::IndexOutOfRange(2)));
    assert_eq!(g.num_vertices(), 2);
    assert!(SccGraph::new(0).scc().is_empty());
}

#[test]
fn long_path_does_not_overflow_stack() {
    let n = 200_000;
    let mut g = SccGraph::new(n);
    for v in 0..n - 1 {
        g.add_edge(v, v + 1).unwrap();
    }
    g.add_edge(n - 1, 0).unwrap();
    let groups = g.scc();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), n);
}

#[test]
fn random_graphs_are_topologically_ordered() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..30 {
        let n = rng.gen_range(1..40);
        let m = rng.gen_range(0..80);
        let mut g = SccGraph::new(n);
        let mut edges = Vec::new();
        for _ in 0..m {
            let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
            g.add_edge(a, b).unwrap();
            edges.push((a, b));
        }
        let groups = g.scc();
        assert_topological(n, &edges, &groups);
        for grp in &groups {
            assert!(grp.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[tokio::test]
async fn scc_async_matches_sync() {
    let g = sample_graph();
    let want = g.scc();
    let got = scc_async(g).await.unwrap();
    assert_eq!(got, want);
}

#[tokio::test]
async fn scc_async_many_in_parallel() {
    let handles: Vec<_> = (0..8)
        .map(|_| tokio::spawn(scc_async(sample_graph())))
        .collect();
    for h in handles {
        assert_eq!(h.await.unwrap().unwrap().len(), 3);
    }
}
