use narwhal_graphlib::Graph;

use super::{SpiralOptions, rescale_layout};

pub fn layout(graph: &Graph, opts: &SpiralOptions) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![(0.0, 0.0); n];
    }

    let mut pos: Vec<(f64, f64)> = Vec::with_capacity(n);
    if opts.equidistant {
        let chord = 1.0;
        let step = 0.5;
        let mut theta = opts.resolution;
        theta += chord / (step * theta);
        for _ in 0..n {
            let r = step * theta;
            theta += chord / r;
            pos.push((theta.cos() * r, theta.sin() * r));
        }
    } else {
        for i in 0..n {
            let dist = i as f64;
            let angle = opts.resolution * dist;
            pos.push((dist * angle.cos(), dist * angle.sin()));
        }
    }

    rescale_layout(&mut pos, 1.0);
    pos
}
