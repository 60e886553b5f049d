//! Helper algorithms over [`Graph`](super::Graph).

use super::Graph;
use std::collections::VecDeque;

/// Connected components, each listed in BFS order, components ordered by their first node.
pub fn components(g: &Graph) -> Vec<Vec<String>> {
    let mut seen = vec![false; g.node_count()];
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in 0..g.node_count() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<String> = Vec::new();
        let mut q: VecDeque<usize> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(g.node_id(v).to_string());
            for &n in g.neighbor_indices(v) {
                if !seen[n] {
                    seen[n] = true;
                    q.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}

/// Unweighted hop counts from `source` to every node, indexed like [`Graph::nodes`].
///
/// Unreachable nodes (and every node when `source` is unknown) are `None`.
pub fn shortest_path_lengths(g: &Graph, source: &str) -> Vec<Option<usize>> {
    let mut dist: Vec<Option<usize>> = vec![None; g.node_count()];
    let Some(src) = g.node_index(source) else {
        return dist;
    };
    bfs_from(g, src, &mut dist);
    dist
}

/// All-pairs hop counts, row `i` holding the distances from node index `i`.
pub fn all_pairs_shortest_path_lengths(g: &Graph) -> Vec<Vec<Option<usize>>> {
    (0..g.node_count())
        .map(|src| {
            let mut dist = vec![None; g.node_count()];
            bfs_from(g, src, &mut dist);
            dist
        })
        .collect()
}

fn bfs_from(g: &Graph, src: usize, dist: &mut [Option<usize>]) {
    dist[src] = Some(0);
    let mut q: VecDeque<usize> = VecDeque::new();
    q.push_back(src);
    while let Some(v) = q.pop_front() {
        let Some(d) = dist[v] else {
            debug_assert!(false, "bfs dequeued an unvisited node");
            continue;
        };
        for &n in g.neighbor_indices(v) {
            if dist[n].is_none() {
                dist[n] = Some(d + 1);
                q.push_back(n);
            }
        }
    }
}
