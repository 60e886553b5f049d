//! Spectral placement: coordinates are the Laplacian eigenvectors belonging to the second and
//! third smallest eigenvalues (the first is the constant vector).

use nalgebra::{DMatrix, SymmetricEigen};
use narwhal_graphlib::Graph;

use super::rescale_layout;
use crate::error::{Error, Result};

const EIGEN_EPS: f64 = 1e-12;
const MAX_EIGEN_ITERATIONS: usize = 10_000;

pub fn layout(graph: &Graph) -> Result<Vec<(f64, f64)>> {
    let n = graph.node_count();
    if n <= 2 {
        // Too few nodes for a 2-D embedding; every node sits at the center.
        return Ok(vec![(0.0, 0.0); n]);
    }

    let laplacian = laplacian(graph);
    let eigen = SymmetricEigen::try_new(laplacian, EIGEN_EPS, MAX_EIGEN_ITERATIONS).ok_or(
        Error::NoConvergence {
            algorithm: "spectral",
        },
    )?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[a]
            .partial_cmp(&eigen.eigenvalues[b])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    let (cx, cy) = (order[1], order[2]);

    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|i| (eigen.eigenvectors[(i, cx)], eigen.eigenvectors[(i, cy)]))
        .collect();
    if pos.iter().any(|p| !(p.0.is_finite() && p.1.is_finite())) {
        return Err(Error::NoConvergence {
            algorithm: "spectral",
        });
    }

    rescale_layout(&mut pos, 1.0);
    Ok(pos)
}

/// `L = D - A`; a self loop adds to both `A` and `D` and so cancels on the diagonal.
fn laplacian(graph: &Graph) -> DMatrix<f64> {
    let n = graph.node_count();
    let mut a = DMatrix::<f64>::zeros(n, n);
    for (v, w) in graph.edge_indices() {
        a[(v, w)] = 1.0;
        a[(w, v)] = 1.0;
    }
    let mut l = -a.clone();
    for i in 0..n {
        let degree: f64 = a.row(i).sum();
        l[(i, i)] += degree;
    }
    l
}
