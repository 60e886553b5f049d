use narwhal_graphlib::Graph;

use super::RandomOptions;
use crate::rng::XorShift64Star;

pub fn layout(graph: &Graph, opts: &RandomOptions) -> Vec<(f64, f64)> {
    let mut rng = XorShift64Star::new(opts.random_seed);
    unit_square(&mut rng, graph.node_count())
}

/// `n` points drawn uniformly from `[0, 1)²`, x before y for each point.
pub(crate) fn unit_square(rng: &mut XorShift64Star, n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|_| {
            let x = rng.next_f64_unit();
            let y = rng.next_f64_unit();
            (x, y)
        })
        .collect()
}
