use std::fs;

use narwhal::{
    CacheKey, DiskCache, EdgeRow, Engine, EngineConfig, Error, GraphRequest, MemoryCache, NoCache,
    Param, RadarRequest, WeightPolicy,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn memory_engine() -> Engine {
    Engine::with_cache(EngineConfig::default(), MemoryCache::new())
}

fn uncached_engine() -> Engine {
    Engine::with_cache(EngineConfig::default(), NoCache)
}

fn sample_request(dimension: &str) -> GraphRequest {
    GraphRequest::new(
        ["a", "b", "c", "c", "b", "q"],
        ["b", "c", "a", "d", "a", "r"],
        ["original", "original", "original", "original", "mirrored", "other"],
        dimension,
    )
}

fn two_node_request(dimension: &str) -> GraphRequest {
    GraphRequest::new(["A", "B"], ["B", "A"], ["original", "mirrored"], dimension)
        .with_layout("circular")
}

#[test]
fn output_aligns_with_input_rows() {
    let engine = uncached_engine();
    for name in narwhal_layout::Algorithm::NAMES {
        for dimension in ["x", "y", "weight"] {
            let req = sample_request(dimension).with_layout(name);
            let out = engine.graph_coordinates(&req).expect("coordinates");
            assert_eq!(out.len(), req.len(), "{name}/{dimension}");
            assert!(out.iter().all(Option::is_some), "{name}/{dimension}");
        }
    }
}

#[test]
fn rows_outside_the_graph_read_zero() {
    let engine = uncached_engine();
    for dimension in ["x", "y", "weight"] {
        let out = engine
            .graph_coordinates(&sample_request(dimension))
            .expect("coordinates");
        assert_eq!(out[5], Some(0.0), "{dimension}");
    }
}

#[test]
fn identical_requests_are_bit_identical() {
    let first = uncached_engine()
        .graph_coordinates(&sample_request("x"))
        .expect("coordinates");
    let second = uncached_engine()
        .graph_coordinates(&sample_request("x"))
        .expect("coordinates");
    assert_eq!(first, second);

    let req = RadarRequest::new(
        ["a", "b", "a", "c"],
        ["1", "1", "1", "1"],
        ["t", "t", "t", "t"],
        ["original", "original", "mirrored", "original"],
        "y",
    );
    assert_eq!(
        uncached_engine().radar_coordinates(&req).expect("radar"),
        uncached_engine().radar_coordinates(&req).expect("radar")
    );
}

#[test]
fn circular_two_node_scenario() {
    let engine = uncached_engine();

    let x = engine
        .graph_coordinates(&two_node_request("x"))
        .expect("coordinates");
    // Row 0 reads A; row 1 is B -> A mirrored, so it also reads A.
    assert!(approx(x[0].unwrap_or(f64::NAN), 1.0), "{x:?}");
    assert!(approx(x[1].unwrap_or(f64::NAN), 1.0), "{x:?}");

    let y = engine
        .graph_coordinates(&two_node_request("y"))
        .expect("coordinates");
    assert!(y.iter().all(|v| approx(v.unwrap_or(f64::NAN), 0.0)), "{y:?}");

    let weight = engine
        .graph_coordinates(&two_node_request("weight"))
        .expect("coordinates");
    assert_eq!(weight, vec![Some(1.0), Some(1.0)]);
}

#[test]
fn mirrored_row_matches_swapped_original() {
    let engine = uncached_engine();
    let base = ["a", "b", "c"];
    let to = ["b", "c", "a"];
    for dimension in ["x", "y", "weight"] {
        let mut from_nodes = base.to_vec();
        let mut to_nodes = to.to_vec();
        let mut roles = vec!["original"; 3];
        from_nodes.extend(["a", "b"]);
        to_nodes.extend(["b", "a"]);
        roles.extend(["mirrored", "original"]);

        let out = engine
            .graph_coordinates(&GraphRequest::new(from_nodes, to_nodes, roles, dimension))
            .expect("coordinates");
        assert_eq!(out[3], out[4], "{dimension}");
    }
}

#[test]
fn mirrored_only_policy_zeroes_original_weights() {
    let config = EngineConfig {
        weight_policy: WeightPolicy::MirroredOnly,
        ..Default::default()
    };
    let engine = Engine::with_cache(config, NoCache);
    let out = engine
        .graph_coordinates(&two_node_request("weight"))
        .expect("coordinates");
    assert_eq!(out, vec![Some(0.0), Some(1.0)]);
}

#[test]
fn degenerate_input_yields_all_none() {
    let engine = memory_engine();

    let none: Vec<String> = Vec::new();
    let empty = GraphRequest::new(none.clone(), none.clone(), none, "x");
    assert_eq!(engine.graph_coordinates(&empty).expect("empty"), vec![]);

    let mut null_first = GraphRequest::new(["a", "b"], ["b", "c"], ["original", "original"], "x");
    null_first.from_nodes[0] = None;
    assert_eq!(
        engine.graph_coordinates(&null_first).expect("null endpoint"),
        vec![None, None]
    );

    let only_mirrored = GraphRequest::new(["a", "b"], ["b", "a"], ["mirrored", "mirrored"], "y");
    assert_eq!(
        engine.graph_coordinates(&only_mirrored).expect("no originals"),
        vec![None, None]
    );

    assert_eq!(engine.computations(), 0);
}

#[test]
fn later_null_endpoints_read_zero() {
    let engine = uncached_engine();
    let mut req = GraphRequest::new(["a", "b", "c"], ["b", "c", "a"], ["original"; 3], "x")
        .with_layout("circular");
    req.to_nodes[2] = None;
    let out = engine.graph_coordinates(&req).expect("coordinates");
    assert_eq!(out.len(), 3);
    assert_eq!(out[2], Some(0.0));
    assert!(out[0].is_some_and(|v| v != 0.0));
}

#[test]
fn shape_mismatch_is_reported_first() {
    let engine = uncached_engine();
    let mut req = sample_request("not-a-dimension");
    req.roles.pop();
    assert!(matches!(
        engine.graph_coordinates(&req),
        Err(Error::ShapeMismatch { .. })
    ));

    let radar = RadarRequest {
        data: vec!["a".into()],
        amplitude: vec![],
        thread: vec!["t".into()],
        node_type: vec!["original".into()],
        dimension: "x".into(),
    };
    assert!(matches!(
        engine.radar_coordinates(&radar),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn unknown_dimension_and_layout_are_fatal() {
    let engine = uncached_engine();
    assert!(matches!(
        engine.graph_coordinates(&sample_request("z")),
        Err(Error::UnknownDimension { .. })
    ));
    assert!(matches!(
        engine.graph_coordinates(&sample_request("x").with_layout("force_atlas")),
        Err(Error::Layout(narwhal_layout::Error::UnknownAlgorithm { .. }))
    ));

    let radar = RadarRequest::new(["a"], ["1"], ["t"], ["original"], "weight");
    assert!(matches!(
        engine.radar_coordinates(&radar),
        Err(Error::InvalidDimension { .. })
    ));
}

#[test]
fn singleton_parameters_are_unwrapped() {
    let engine = uncached_engine();
    let mut wrapped = two_node_request("x");
    wrapped.dimension = Param::List(vec!["X".to_string()]);
    wrapped.layout = Some(Param::List(vec!["circular".to_string()]));
    wrapped.k = Some(Param::List(vec![0.5]));

    assert_eq!(
        engine.graph_coordinates(&wrapped).expect("wrapped"),
        engine.graph_coordinates(&two_node_request("x")).expect("scalar")
    );

    wrapped.layout = Some(Param::List(vec![]));
    assert!(matches!(
        engine.graph_coordinates(&wrapped),
        Err(Error::EmptyParameter { name: "layout" })
    ));
}

#[test]
fn every_dimension_is_served_from_one_layout() {
    let engine = memory_engine();
    for dimension in ["x", "y", "weight", "X"] {
        engine
            .graph_coordinates(&sample_request(dimension))
            .expect("coordinates");
    }
    assert_eq!(engine.computations(), 1);

    engine
        .graph_coordinates(&sample_request("x").with_layout("circular"))
        .expect("coordinates");
    engine
        .graph_coordinates(&sample_request("x").with_k(0.25))
        .expect("coordinates");
    assert_eq!(engine.computations(), 3);
}

#[test]
fn k_only_separates_spring_entries() {
    let engine = memory_engine();
    let circular = engine
        .graph_coordinates(&two_node_request("x").with_k(0.5))
        .expect("coordinates");
    let circular_other_k = engine
        .graph_coordinates(&two_node_request("x").with_k(0.25))
        .expect("coordinates");
    assert_eq!(circular, circular_other_k);
    assert_eq!(engine.computations(), 1);

    for k in [0.5, 0.25] {
        engine
            .graph_coordinates(&two_node_request("x").with_layout("spring").with_k(k))
            .expect("coordinates");
    }
    assert_eq!(engine.computations(), 3);
}

#[test]
fn different_keys_never_share_entries() {
    let engine = memory_engine();
    let circular = engine
        .graph_coordinates(&two_node_request("x"))
        .expect("coordinates");
    let random = engine
        .graph_coordinates(&two_node_request("x").with_layout("random"))
        .expect("coordinates");
    assert_eq!(engine.computations(), 2);
    assert_ne!(circular, random);
}

#[test]
fn disk_cache_survives_a_new_engine() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = EngineConfig {
        cache_dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    let first = Engine::new(config.clone());
    let computed = first
        .graph_coordinates(&sample_request("y"))
        .expect("coordinates");
    assert_eq!(first.computations(), 1);

    let second = Engine::new(config);
    let cached = second
        .graph_coordinates(&sample_request("y"))
        .expect("coordinates");
    assert_eq!(second.computations(), 0);
    assert_eq!(computed, cached);
}

fn ring_with_chords(n: usize, dimension: &str) -> GraphRequest {
    let mut from_nodes = Vec::new();
    let mut to_nodes = Vec::new();
    let mut roles = Vec::new();
    for i in 0..n {
        for step in [1, 2] {
            from_nodes.push(format!("n{i}"));
            to_nodes.push(format!("n{}", (i + step) % n));
            roles.push("original");
        }
    }
    from_nodes.push("n1".to_string());
    to_nodes.push("n0".to_string());
    roles.push("mirrored");
    GraphRequest::new(from_nodes, to_nodes, roles, dimension)
}

fn bits(values: &[Option<f64>]) -> Vec<Option<u64>> {
    values.iter().map(|v| v.map(f64::to_bits)).collect()
}

#[test]
fn disk_cached_answers_are_bit_identical_to_fresh_ones() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = EngineConfig {
        cache_dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    for layout in ["spring", "kamada_kawai", "spectral", "spiral", "circular"] {
        for n in [3, 5, 8, 13, 21] {
            for dimension in ["x", "y", "weight"] {
                let req = ring_with_chords(n, dimension).with_layout(layout);
                let fresh = Engine::with_cache(config.clone(), NoCache)
                    .graph_coordinates(&req)
                    .expect("fresh");

                let writer = Engine::new(config.clone());
                writer.graph_coordinates(&req).expect("written");

                let reader = Engine::new(config.clone());
                let cached = reader.graph_coordinates(&req).expect("cached");
                assert_eq!(reader.computations(), 0, "{layout}/{n}/{dimension}");
                assert_eq!(bits(&fresh), bits(&cached), "{layout}/{n}/{dimension}");
            }
        }
    }
}

#[test]
fn corrupt_disk_entry_is_recomputed_and_replaced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DiskCache::new(dir.path());
    let rows = vec![
        EdgeRow::new("A", "B", "original"),
        EdgeRow::new("B", "A", "mirrored"),
    ];
    let key = CacheKey::for_layout(&rows, "circular", None, 42, WeightPolicy::Degree);
    fs::write(cache.entry_path(&key), b"{ not json").expect("write corrupt entry");

    let engine = Engine::with_cache(EngineConfig::default(), cache.clone());
    let out = engine
        .graph_coordinates(&two_node_request("x"))
        .expect("coordinates");
    assert_eq!(engine.computations(), 1);
    assert!(approx(out[0].unwrap_or(f64::NAN), 1.0));

    let again = Engine::with_cache(EngineConfig::default(), cache);
    again
        .graph_coordinates(&two_node_request("x"))
        .expect("coordinates");
    assert_eq!(again.computations(), 0);
}

#[test]
fn disabled_cache_always_recomputes() {
    let engine = uncached_engine();
    engine.graph_coordinates(&sample_request("x")).expect("x");
    engine.graph_coordinates(&sample_request("x")).expect("x");
    assert_eq!(engine.computations(), 2);
}

#[test]
fn dump_input_writes_edge_triples() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = EngineConfig {
        cache_dir: dir.path().to_path_buf(),
        cache_enabled: false,
        dump_input: true,
        ..Default::default()
    };
    Engine::new(config)
        .graph_coordinates(&two_node_request("x"))
        .expect("coordinates");

    let text = fs::read_to_string(dir.path().join("input.json")).expect("input.json");
    let triples: Vec<(Option<String>, Option<String>, String)> =
        serde_json::from_str(&text).expect("valid json");
    assert_eq!(
        triples,
        vec![
            (Some("A".into()), Some("B".into()), "original".into()),
            (Some("B".into()), Some("A".into()), "mirrored".into()),
        ]
    );
}

#[test]
fn radar_size_counts_labels() {
    let req = RadarRequest::new(
        ["a", "a", "b"],
        ["1", "1", "1"],
        ["t", "t", "t"],
        ["original", "original", "original"],
        "size",
    );
    assert_eq!(
        uncached_engine().radar_coordinates(&req).expect("radar"),
        vec![2.0, 2.0, 1.0]
    );
}

#[test]
fn radar_mirrored_rows_are_reflected() {
    let engine = uncached_engine();
    let req = |dimension: &str| {
        RadarRequest::new(
            ["a", "a", "b", "b", "b"],
            ["1"; 5],
            ["t"; 5],
            ["original", "mirrored", "original", "mirrored", "original"],
            dimension,
        )
    };
    for dimension in ["x", "y"] {
        let out = engine.radar_coordinates(&req(dimension)).expect("radar");
        assert_eq!(out[1], -out[0], "{dimension}");
        assert_eq!(out[3], -out[2], "{dimension}");
        assert_eq!(out[4], out[2], "{dimension}");
    }
}

#[test]
fn radar_results_are_cached_per_dimension() {
    let engine = memory_engine();
    let req = RadarRequest::new(
        ["a", "b", "a"],
        ["1", "1", "1"],
        ["t", "t", "t"],
        ["original", "original", "mirrored"],
        "x",
    );
    let first = engine.radar_coordinates(&req).expect("radar");
    let second = engine.radar_coordinates(&req).expect("radar");
    assert_eq!(first, second);
    assert_eq!(engine.computations(), 1);

    engine
        .radar_coordinates(&req.clone().with_dimension("y"))
        .expect("radar");
    assert_eq!(engine.computations(), 2);
}

#[test]
fn radar_and_graph_entries_do_not_collide() {
    let engine = memory_engine();
    engine.graph_coordinates(&two_node_request("x")).expect("graph");
    let radar = RadarRequest::new(
        ["A", "B"],
        ["1", "1"],
        ["t", "t"],
        ["original", "mirrored"],
        "x",
    );
    engine.radar_coordinates(&radar).expect("radar");
    assert_eq!(engine.computations(), 2);
}
