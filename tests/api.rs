use linext::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

#[test]
fn fixtures_load_and_count() {
    let cases = [
        ("diamond.txt", 2.0),
        ("chain5.txt", 1.0),
        ("antichain5.txt", 120.0),
        ("incremental6.txt", 20.0),
        ("fan5.txt", 4.0),
        ("split5.txt", 20.0),
    ];
    let mut counter = ExtensionCounter::new();
    for (name, expected) in cases {
        let m = ArcMatrix::load_from_file(fixture(name)).unwrap();
        assert_eq!(counter.count_model(&m), Ok(expected), "{name}");
    }
}

#[test]
fn saved_matrix_reloads() {
    let path = std::env::temp_dir().join(format!("linext_api_{}.txt", std::process::id()));
    let m = ArcMatrix::from_arcs(4, &[(0, 1), (2, 3)]).unwrap();
    m.save_to_file(&path).unwrap();
    let back = ArcMatrix::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(back, m);
    assert_eq!(ExtensionCounter::new().count_model(&back), Ok(6.0));
}

#[test]
fn batch_counting_matches_individual_counts() {
    let graphs: Vec<FixedWidthGraph> = (1..=10)
        .map(|n| {
            let arcs: Vec<(usize, usize)> = (1..n).step_by(2).map(|i| (i - 1, i)).collect();
            FixedWidthGraph::from_arcs(n, &arcs).unwrap()
        })
        .collect();
    let results = count_many(&graphs, &CounterConfig::default());
    let mut brute = BruteForceCounter::new();
    for (g, got) in graphs.iter().zip(results) {
        assert_eq!(got.unwrap(), brute.count_extensions(g).unwrap() as f64);
    }
}

#[test]
fn priors_for_a_three_node_chain() {
    let g = FixedWidthGraph::from_arcs(3, &[(0, 1), (1, 2)]).unwrap();
    let extensions = ExtensionCounter::new().count_perms(&g).unwrap();
    assert_eq!(tom_prior(extensions, 3), 1.0 / 48.0);
    assert_eq!(DagCountEstimator::new().dag_prior(3), 1.0 / 25.0);
    assert_eq!(total_toms(3), 48.0);
}

#[test]
fn errors_are_displayable() {
    let err = FixedWidthGraph::new(65).unwrap_err();
    assert_eq!(err, Error::Capacity { nodes: 65, limit: 64 });
    assert!(err.to_string().contains("65"));

    let err = parse_arc_matrix("01\n10\n").unwrap_err();
    assert!(matches!(err, Error::Cyclic { .. }));
}

#[test]
fn bundled_validation_passes() {
    validate_known_graphs().unwrap();
}
