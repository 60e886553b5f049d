//! Kamada-Kawai stress minimisation.
//!
//! Energy: `0.5 * Σ (|p_i - p_j| / d_ij - 1)²` over ordered pairs, where `d_ij` is the hop
//! distance, plus a weak parabolic term pulling the centroid towards the origin. Starts from the
//! circular layout and descends with a backtracking line search, so the result depends only on
//! graph structure.

use narwhal_graphlib::{Graph, alg};

use super::{KamadaKawaiOptions, circular, rescale_layout};

/// Stand-in distance for pairs in different components.
const UNREACHABLE_DISTANCE: f64 = 1e6;
const MEAN_WEIGHT: f64 = 1e-3;
const DIAGONAL_EPS: f64 = 1e-3;

const INITIAL_STEP: f64 = 1.0;
const MIN_STEP: f64 = 1e-12;
const ARMIJO_C: f64 = 1e-4;

pub fn layout(graph: &Graph, opts: &KamadaKawaiOptions) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![(0.0, 0.0); n];
    }

    let inv_dist = inverse_distances(graph);
    let mut pos = circular::layout(graph);

    let (mut cost, mut grad) = cost_and_gradient(&pos, &inv_dist);
    let mut step = INITIAL_STEP;
    let mut iterations = 0usize;

    while iterations < opts.max_iterations {
        let grad_sq: f64 = grad.iter().map(|g| g.0 * g.0 + g.1 * g.1).sum();
        if grad_sq.sqrt() < opts.tolerance {
            break;
        }
        iterations += 1;

        // Backtracking line search along -grad.
        let mut accepted = None;
        while step >= MIN_STEP {
            let candidate: Vec<(f64, f64)> = pos
                .iter()
                .zip(&grad)
                .map(|(p, g)| (p.0 - step * g.0, p.1 - step * g.1))
                .collect();
            let (c, g) = cost_and_gradient(&candidate, &inv_dist);
            if c <= cost - ARMIJO_C * step * grad_sq {
                accepted = Some((candidate, c, g));
                break;
            }
            step *= 0.5;
        }

        let Some((candidate, c, g)) = accepted else {
            break;
        };
        let improvement = cost - c;
        pos = candidate;
        cost = c;
        grad = g;
        // Let the step grow back after successful iterations.
        step = (step * 2.0).min(INITIAL_STEP);

        if improvement <= f64::EPSILON * cost.abs().max(1.0) {
            break;
        }
    }

    tracing::debug!(nodes = n, iterations, cost, "kamada_kawai layout finished");

    rescale_layout(&mut pos, 1.0);
    pos
}

/// Row-major `n × n` matrix of `1 / (d_ij + eps·δ_ij)`.
fn inverse_distances(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    let hops = alg::all_pairs_shortest_path_lengths(graph);
    let mut inv = vec![0.0; n * n];
    for (i, row) in hops.iter().enumerate() {
        for (j, d) in row.iter().enumerate() {
            let mut d = d.map(|d| d as f64).unwrap_or(UNREACHABLE_DISTANCE);
            if i == j {
                d += DIAGONAL_EPS;
            }
            inv[i * n + j] = 1.0 / d;
        }
    }
    inv
}

fn cost_and_gradient(pos: &[(f64, f64)], inv_dist: &[f64]) -> (f64, Vec<(f64, f64)>) {
    let n = pos.len();
    let mut cost = 0.0;
    let mut grad = vec![(0.0, 0.0); n];

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let dx = pos[i].0 - pos[j].0;
            let dy = pos[i].1 - pos[j].1;
            let sep = (dx * dx + dy * dy).sqrt();
            let inv = inv_dist[i * n + j];
            let offset = sep * inv - 1.0;
            cost += 0.5 * offset * offset;

            if sep > 0.0 {
                let coef = inv * offset / sep;
                // Pair (i, j) pushes i along +delta and j along -delta.
                grad[i].0 += coef * dx;
                grad[i].1 += coef * dy;
                grad[j].0 -= coef * dx;
                grad[j].1 -= coef * dy;
            }
        }
    }

    let sum_x: f64 = pos.iter().map(|p| p.0).sum();
    let sum_y: f64 = pos.iter().map(|p| p.1).sum();
    cost += 0.5 * MEAN_WEIGHT * (sum_x * sum_x + sum_y * sum_y);
    for g in &mut grad {
        g.0 += MEAN_WEIGHT * sum_x;
        g.1 += MEAN_WEIGHT * sum_y;
    }

    (cost, grad)
}
