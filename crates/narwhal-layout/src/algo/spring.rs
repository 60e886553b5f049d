//! Fruchterman-Reingold force-directed placement.
//!
//! Dense O(n²) per iteration: every pair repels with `k² / d`, every edge attracts with
//! `d² / k`. Displacements are capped by a temperature that cools linearly to zero.

use narwhal_graphlib::Graph;

use super::random::unit_square;
use super::{SpringOptions, rescale_layout};
use crate::rng::XorShift64Star;

const MIN_DISTANCE: f64 = 0.01;
const MIN_LENGTH: f64 = 0.01;
const SHORT_LENGTH_SUBSTITUTE: f64 = 0.1;

pub fn layout(graph: &Graph, opts: &SpringOptions) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![(0.0, 0.0); n];
    }

    let mut rng = XorShift64Star::new(opts.random_seed);
    let mut pos = unit_square(&mut rng, n);

    let k = match opts.k {
        Some(k) if k.is_finite() && k > 0.0 => k,
        _ => (1.0 / n as f64).sqrt(),
    };

    let adjacency = adjacency_matrix(graph);

    let span_x = span(pos.iter().map(|p| p.0));
    let span_y = span(pos.iter().map(|p| p.1));
    let mut t = span_x.max(span_y) * 0.1;
    let dt = t / (opts.iterations as f64 + 1.0);

    let mut displacement = vec![(0.0, 0.0); n];
    let mut iterations = 0usize;
    for _ in 0..opts.iterations {
        iterations += 1;
        for (i, disp) in displacement.iter_mut().enumerate() {
            let mut dx_sum = 0.0;
            let mut dy_sum = 0.0;
            for j in 0..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force =
                    k * k / (distance * distance) - adjacency[i * n + j] * distance / k;
                dx_sum += dx * force;
                dy_sum += dy * force;
            }
            *disp = (dx_sum, dy_sum);
        }

        let mut moved_sq = 0.0;
        for (p, &(dx, dy)) in pos.iter_mut().zip(&displacement) {
            let mut length = (dx * dx + dy * dy).sqrt();
            if length < MIN_LENGTH {
                length = SHORT_LENGTH_SUBSTITUTE;
            }
            let step_x = dx * t / length;
            let step_y = dy * t / length;
            p.0 += step_x;
            p.1 += step_y;
            moved_sq += step_x * step_x + step_y * step_y;
        }

        t -= dt;
        if moved_sq.sqrt() / (n as f64) < opts.threshold {
            break;
        }
    }

    tracing::debug!(nodes = n, k, iterations, "spring layout finished");

    rescale_layout(&mut pos, 1.0);
    pos
}

fn adjacency_matrix(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    let mut a = vec![0.0; n * n];
    for (v, w) in graph.edge_indices() {
        a[v * n + w] = 1.0;
        a[w * n + v] = 1.0;
    }
    a
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() && max.is_finite() {
        max - min
    } else {
        0.0
    }
}
