//! Validates strategy selection, fallback paths, and the service boundary

use std::time::Duration;
use tileseer::io::cli::{parse_cell, parse_object_spec};
use tileseer::io::report::render_matrix;
use tileseer::service::{EstimateRequest, handle_request};
use tileseer::spatial::grid::{Cell, GridSpec};
use tileseer::spatial::placements::ObjectSpec;
use tileseer::{EstimatorConfig, Strategy, estimate};

fn sampling_config() -> EstimatorConfig {
    // Forcing the exactness budget to zero routes every request to the
    // sampler; the tiny tolerance disables early convergence stops
    EstimatorConfig {
        exactness_budget: 0,
        sample_budget: 40_000,
        convergence_check_interval: 10_000,
        convergence_tolerance: 1e-6,
        time_budget: Duration::from_secs(30),
        ..EstimatorConfig::default()
    }
}

#[test]
fn test_zero_exactness_budget_falls_back_to_sampling() {
    let grid = GridSpec::new(9, 5).unwrap();
    let objects = [ObjectSpec::new(1, 1, 1)];
    let outcome = estimate(&grid, &[], &objects, &sampling_config()).unwrap();

    assert_eq!(outcome.strategy, Strategy::MonteCarlo);
    assert!(outcome.population > 0);
}

#[test]
fn test_configuration_cap_abandons_exact_search() {
    // The raw bound fits the exactness budget, but the discovered-count cap
    // aborts enumeration mid-search and the sampler takes over
    let grid = GridSpec::new(9, 5).unwrap();
    let objects = [ObjectSpec::new(1, 1, 2)];
    let config = EstimatorConfig {
        max_exact_configurations: 10,
        sample_budget: 2_000,
        ..EstimatorConfig::default()
    };
    let outcome = estimate(&grid, &[], &objects, &config).unwrap();

    assert_eq!(outcome.strategy, Strategy::MonteCarlo);
    for &value in &outcome.probabilities {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn test_sampling_is_reproducible_for_a_fixed_seed() {
    let grid = GridSpec::new(9, 5).unwrap();
    let objects = [ObjectSpec::new(2, 2, 2)];
    let config = EstimatorConfig {
        sample_budget: 3_000,
        ..sampling_config()
    };

    let first = estimate(&grid, &[], &objects, &config).unwrap();
    let second = estimate(&grid, &[], &objects, &config).unwrap();

    assert_eq!(first.strategy, Strategy::MonteCarlo);
    assert_eq!(first.probabilities, second.probabilities);
}

#[test]
fn test_sampling_converges_to_exact_single_instance() {
    // A single instance makes the sequential construction a uniform draw
    // over the catalog, so sampling must approach the exact matrix
    let grid = GridSpec::new(9, 5).unwrap();
    let objects = [ObjectSpec::new(2, 3, 1)];

    let exact = estimate(&grid, &[], &objects, &EstimatorConfig::default()).unwrap();
    let sampled = estimate(&grid, &[], &objects, &sampling_config()).unwrap();

    assert_eq!(exact.strategy, Strategy::ExactBacktracking);
    assert_eq!(sampled.strategy, Strategy::MonteCarlo);
    for (&estimate_value, &exact_value) in sampled.probabilities.iter().zip(exact.probabilities.iter())
    {
        assert!((estimate_value - exact_value).abs() < 0.03);
    }
}

#[test]
fn test_sampling_converges_to_exact_two_unit_objects() {
    // Two 1x1 instances: drawing without replacement is uniform over
    // ordered configurations, so the sampler stays unbiased here too
    let grid = GridSpec::new(9, 5).unwrap();
    let objects = [ObjectSpec::new(1, 1, 2)];

    let exact = estimate(&grid, &[], &objects, &EstimatorConfig::default()).unwrap();
    let sampled = estimate(&grid, &[], &objects, &sampling_config()).unwrap();

    assert_eq!(exact.population, 45 * 44);
    for (&estimate_value, &exact_value) in sampled.probabilities.iter().zip(exact.probabilities.iter())
    {
        assert!((estimate_value - exact_value).abs() < 0.01);
    }
}

#[test]
fn test_arc_consistency_proves_infeasibility() {
    // 3x4 + 2x2 on a 4x4 grid passes the area check (12 + 4 = 16) but every
    // pairing overlaps, which the pre-filter proves without searching
    let grid = GridSpec::new(4, 4).unwrap();
    let objects = [ObjectSpec::new(3, 4, 1), ObjectSpec::new(2, 2, 1)];
    let outcome = estimate(&grid, &[], &objects, &EstimatorConfig::default()).unwrap();

    assert_eq!(outcome.strategy, Strategy::Infeasible);
    assert!(outcome.constraint_filtered);
    assert!(outcome.probabilities.iter().all(|&value| value == 0.0));

    // Exhaustive search agrees when the pre-filter is disabled
    let unfiltered = EstimatorConfig {
        use_constraint_filter: false,
        ..EstimatorConfig::default()
    };
    let searched = estimate(&grid, &[], &objects, &unfiltered).unwrap();
    assert_eq!(searched.population, 0);
    assert!(searched.probabilities.iter().all(|&value| value == 0.0));
}

#[test]
fn test_arc_consistency_pruning_preserves_the_estimate() {
    // Pruned domains must not change exact results, only shrink the search
    let grid = GridSpec::new(4, 3).unwrap();
    let objects = [ObjectSpec::new(3, 3, 1), ObjectSpec::new(1, 1, 1)];

    let filtered = estimate(&grid, &[], &objects, &EstimatorConfig::default()).unwrap();
    let unfiltered = estimate(
        &grid,
        &[],
        &objects,
        &EstimatorConfig {
            use_constraint_filter: false,
            ..EstimatorConfig::default()
        },
    )
    .unwrap();

    assert!(filtered.constraint_filtered);
    assert!(!unfiltered.constraint_filtered);
    assert_eq!(filtered.probabilities, unfiltered.probabilities);
    assert_eq!(filtered.population, unfiltered.population);
}

#[test]
fn test_exact_cover_counts_full_tilings() {
    // Dominoes on a 2x2 grid admit exactly two tilings (both horizontal or
    // both vertical), and every cell appears in both
    let grid = GridSpec::new(2, 2).unwrap();
    let objects = [ObjectSpec::new(2, 1, 2)];
    let config = EstimatorConfig {
        use_exact_cover: true,
        ..EstimatorConfig::default()
    };
    let outcome = estimate(&grid, &[], &objects, &config).unwrap();

    assert_eq!(outcome.strategy, Strategy::ExactCover);
    assert_eq!(outcome.population, 2);
    for &value in &outcome.probabilities {
        assert!((value - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_exact_cover_without_tilings_is_zero() {
    // Four dominoes cover eight cells; a 3x3 free area can never be
    // partitioned exactly, so the tiling mode reports nothing
    let grid = GridSpec::new(3, 3).unwrap();
    let objects = [ObjectSpec::new(1, 2, 4)];
    let config = EstimatorConfig {
        use_exact_cover: true,
        ..EstimatorConfig::default()
    };
    let outcome = estimate(&grid, &[], &objects, &config).unwrap();

    assert_eq!(outcome.strategy, Strategy::ExactCover);
    assert_eq!(outcome.population, 0);
    assert!(outcome.probabilities.iter().all(|&value| value == 0.0));
}

#[test]
fn test_decomposition_is_band_exact_and_marked() {
    // Two 1x1 objects on 4x4 decompose into two 4x2 bands; each band sees
    // both objects, giving the per-band exact value 2/8 everywhere — an
    // overestimate of the true 2/16, which is why the mode is approximate
    let grid = GridSpec::new(4, 4).unwrap();
    let objects = [ObjectSpec::new(1, 1, 2)];
    let config = EstimatorConfig {
        use_decomposition: true,
        decomposition_threshold: 1,
        ..EstimatorConfig::default()
    };
    let outcome = estimate(&grid, &[], &objects, &config).unwrap();

    assert_eq!(outcome.strategy, Strategy::Decomposed);
    for &value in &outcome.probabilities {
        assert!((value - 0.25).abs() < 1e-12);
    }
}

#[test]
fn test_decomposition_is_disabled_by_default() {
    // The correctness-sensitive default configuration must never route
    // through the approximate band split
    let config = EstimatorConfig::default();
    assert!(!config.use_decomposition);
}

#[test]
fn test_service_round_trips_correlation_id() {
    let request = EstimateRequest {
        correlation_id: 7_031,
        object_specs: vec![ObjectSpec::new(1, 1, 1)],
        blocked_cells: vec![Cell::new(0, 0)],
    };
    let response = handle_request(&request, &EstimatorConfig::default());

    assert_eq!(response.correlation_id, 7_031);
    assert!(response.error.is_none());
    assert_eq!(response.strategy, Some(Strategy::ExactBacktracking));
    assert_eq!(response.probabilities.dim(), (5, 9));
    assert_eq!(response.probabilities[[0, 0]], 0.0);
}

#[test]
fn test_service_reports_malformed_input_as_error() {
    let request = EstimateRequest {
        correlation_id: 11,
        object_specs: vec![ObjectSpec::new(0, 3, 1)],
        blocked_cells: vec![],
    };
    let response = handle_request(&request, &EstimatorConfig::default());

    assert_eq!(response.correlation_id, 11);
    assert!(response.error.is_some());
    assert!(response.strategy.is_none());
    assert_eq!(response.probabilities.len(), 0);
}

#[test]
fn test_argument_parsing() {
    let spec = parse_object_spec("2x3x4").unwrap();
    assert_eq!(spec, ObjectSpec::new(2, 3, 4));

    let cell = parse_cell("4,2").unwrap();
    assert_eq!(cell, Cell::new(4, 2));

    assert!(parse_object_spec("2x3").is_err());
    assert!(parse_object_spec("axbxc").is_err());
    assert!(parse_cell("4").is_err());
}

#[test]
fn test_report_renders_percentages() {
    let grid = GridSpec::new(3, 2).unwrap();
    let objects = [ObjectSpec::new(1, 2, 1)];
    let outcome = estimate(&grid, &[], &objects, &EstimatorConfig::default()).unwrap();

    let rendered = render_matrix(&outcome.probabilities);
    assert!(rendered.contains("x0"));
    assert!(rendered.contains("y1"));
    assert!(rendered.contains('%'));
}
