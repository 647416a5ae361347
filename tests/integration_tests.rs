//! Integration tests for anova_sim.

use anova_sim::prelude::*;
use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_sum_of_squares_additivity() {
    for seed in [1, 7, 42, 123, 2024] {
        let dataset = generate(5, 8, 1.5, 3.0, 1.2, Some(seed)).unwrap();
        let result = analyze(&dataset).unwrap();

        assert_relative_eq!(
            result.total.sum_of_squares,
            result.treatment.sum_of_squares + result.error.sum_of_squares,
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_degrees_of_freedom_additivity() {
    let dataset = generate(6, 5, 1.0, 0.0, 1.0, Some(5)).unwrap();
    let result = analyze(&dataset).unwrap();

    assert_eq!(result.treatment.df, 5);
    assert_eq!(result.error.df, 24);
    assert_eq!(result.treatment.df + result.error.df, result.total.df);
    assert_eq!(result.total.df, dataset.len() - 1);
}

#[test]
fn test_non_negativity() {
    for seed in 0..20 {
        let dataset = generate(4, 3, 2.0, 5.0, 1.0, Some(seed)).unwrap();
        let result = analyze(&dataset).unwrap();

        assert!(result.total.sum_of_squares >= 0.0);
        assert!(result.treatment.sum_of_squares >= 0.0);
        assert!(result.error.sum_of_squares >= 0.0);
        assert!(result.treatment.mean_square >= 0.0);
        assert!(result.error.mean_square >= 0.0);
        assert!(result.f_statistic >= 0.0);
        assert!((0.0..=1.0).contains(&result.p_value));
    }
}

#[test]
fn test_null_case_identical_means_without_noise() {
    let config = GeneratorConfig {
        sigma: 0.0,
        level_step: 0.0,
        ..GeneratorConfig::new(5, 8, 1.5, 3.0, 0.0, Some(123))
    };
    let dataset = generate_from_config(&config).unwrap();
    let result = analyze(&dataset).unwrap();

    assert_eq!(result.f_statistic, 0.0);
    assert_eq!(result.p_value, 1.0);
    assert_eq!(result.conclusion(0.05), Conclusion::FailToRejectNull);
}

#[test]
fn test_demo_parameters_detect_the_trend() {
    let dataset = generate(5, 8, 1.5, 3.0, 1.2, Some(123)).unwrap();
    let result = analyze(&dataset).unwrap();

    assert!(result.p_value < 0.05);
    assert_eq!(result.conclusion(0.05), Conclusion::RejectNull);
}

#[test]
fn test_strong_effect_is_detected() {
    let dataset = generate(5, 8, 1.5, 3.0, 0.3, Some(123)).unwrap();
    let result = analyze(&dataset).unwrap();

    assert!(result.p_value < 1e-6);
    assert!(result.is_significant(0.05));
}

#[test]
fn test_group_means_recover_hidden_trend() {
    let config = GeneratorConfig::new(4, 2000, 2.0, 5.0, 1.0, Some(11));
    let dataset = generate_from_config(&config).unwrap();
    let result = analyze(&dataset).unwrap();

    for (summary, hidden) in result.groups.iter().zip(config.hidden_means()) {
        assert_eq!(summary.count, 2000);
        assert_relative_eq!(summary.mean, hidden, epsilon = 0.15);
    }
}

#[test]
fn test_seeded_datasets_are_identical() {
    let first = generate(5, 8, 1.5, 3.0, 1.2, Some(123)).unwrap();
    let second = generate(5, 8, 1.5, 3.0, 1.2, Some(123)).unwrap();

    assert_eq!(first, second);
    assert_eq!(analyze(&first).unwrap(), analyze(&second).unwrap());
}

#[test]
fn test_unseeded_datasets_differ() {
    let first = generate(5, 8, 1.5, 3.0, 1.2, None).unwrap();
    let second = generate(5, 8, 1.5, 3.0, 1.2, None).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_caller_owned_rng_advances_between_calls() {
    let config = GeneratorConfig::new(3, 4, 1.0, 0.0, 1.0, None);
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let first = generate_with_rng(&config, &mut rng).unwrap();
    let second = generate_with_rng(&config, &mut rng).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_single_group_is_rejected() {
    let dataset = generate(1, 10, 1.0, 0.0, 1.0, Some(3)).unwrap();

    assert!(matches!(
        analyze(&dataset),
        Err(AnovaError::InsufficientData { groups: 1, .. })
    ));
}

#[test]
fn test_equal_group_sizes_grand_mean() {
    let n = 8;
    let dataset = generate(5, n, 1.5, 3.0, 1.2, Some(99)).unwrap();
    let result = analyze(&dataset).unwrap();

    let grand_mean = dataset.values().sum() / dataset.len() as f64;
    let mean_of_means =
        result.groups.iter().map(|g| g.mean).sum::<f64>() / result.groups.len() as f64;
    assert_relative_eq!(grand_mean, mean_of_means, epsilon = 1e-12);

    let expected = n as f64
        * result
            .groups
            .iter()
            .map(|g| (g.mean - grand_mean).powi(2))
            .sum::<f64>();
    assert_relative_eq!(result.treatment.sum_of_squares, expected, max_relative = 1e-12);
}

#[test]
fn test_residual_strategy_matches_direct_on_generated_data() {
    let dataset = generate(5, 8, 1.5, 3.0, 1.2, Some(123)).unwrap();
    let direct = analyze(&dataset).unwrap();
    let residual = analyze_with(
        &dataset,
        &AnovaConfig {
            error_ss: ErrorSumOfSquares::Residual,
        },
    )
    .unwrap();

    assert_relative_eq!(
        direct.error.sum_of_squares,
        residual.error.sum_of_squares,
        max_relative = 1e-9
    );
    assert_relative_eq!(direct.p_value, residual.p_value, max_relative = 1e-6);
}

#[test]
fn test_experiment_config_from_partial_json() {
    let json = r#"{ "generator": { "a": 3, "sigma": 0.5 }, "alpha": 0.01 }"#;
    let config: ExperimentConfig = serde_json::from_str(json).unwrap();

    // Missing generator fields come from GeneratorConfig::default(), not the demo run
    assert_eq!(config.generator.a, 3);
    assert_eq!(config.generator.sigma, 0.5);
    assert_eq!(config.generator.n, GeneratorConfig::default().n);
    assert_eq!(config.generator.level_step, LEVEL_STEP);
    assert_eq!(config.anova.error_ss, ErrorSumOfSquares::Direct);
    assert_eq!(config.alpha, 0.01);

    let experiment = run(&config).unwrap();
    assert_eq!(experiment.result.groups.len(), 3);
}

#[test]
fn test_experiment_config_without_generator_uses_demo_run() {
    let config: ExperimentConfig = serde_json::from_str(r#"{ "alpha": 0.1 }"#).unwrap();

    assert_eq!(config.generator, ExperimentConfig::default().generator);
    assert_eq!(config.alpha, 0.1);
}

#[test]
fn test_non_finite_observation_is_an_error() {
    let dataset =
        Dataset::from_groups(&[vec![1.0, f64::NAN, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();

    assert!(matches!(analyze(&dataset), Err(AnovaError::Computation(_))));
}
