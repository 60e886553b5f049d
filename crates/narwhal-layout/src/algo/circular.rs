use std::f64::consts::{PI, TAU};

use indexmap::IndexMap;
use narwhal_graphlib::Graph;

use super::{ShellOptions, rescale_layout};
use crate::result::{LayoutResult, Point};

pub fn layout(graph: &Graph) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![(0.0, 0.0); n];
    }

    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let theta = (i as f64) / (n as f64) * TAU;
            (theta.cos(), theta.sin())
        })
        .collect();
    rescale_layout(&mut pos, 1.0);
    pos
}

/// Concentric-circle placement.
///
/// Unlike the other algorithms this one can leave nodes unplaced (those missing from every
/// configured shell), so it builds the id-keyed result directly.
pub fn shell_layout(graph: &Graph, opts: &ShellOptions) -> LayoutResult {
    let mut positions: IndexMap<String, Point> = IndexMap::new();
    match graph.node_count() {
        0 => return LayoutResult { positions },
        1 => {
            for id in graph.nodes() {
                positions.insert(id.to_string(), Point::ORIGIN);
            }
            return LayoutResult { positions };
        }
        _ => {}
    }

    let shells: Vec<Vec<&str>> = match &opts.shells {
        Some(shells) => shells
            .iter()
            .map(|shell| {
                shell
                    .iter()
                    .map(String::as_str)
                    .filter(|id| graph.has_node(id))
                    .collect()
            })
            .collect(),
        None => vec![graph.nodes().collect()],
    };
    if shells.is_empty() {
        return LayoutResult { positions };
    }

    let radius_bump = 1.0 / (shells.len() as f64);
    let mut radius = if shells[0].len() == 1 { 0.0 } else { radius_bump };
    let rotate = opts.rotate.unwrap_or(PI / (shells.len() as f64));
    let mut first_theta = rotate;

    for shell in &shells {
        let count = shell.len().max(1) as f64;
        for (i, id) in shell.iter().enumerate() {
            if positions.contains_key(*id) {
                continue;
            }
            let theta = (i as f64) / count * TAU + first_theta;
            positions.insert(
                (*id).to_string(),
                Point::new(radius * theta.cos(), radius * theta.sin()),
            );
        }
        radius += radius_bump;
        first_theta += rotate;
    }

    LayoutResult { positions }
}
