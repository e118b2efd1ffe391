use approx::assert_abs_diff_eq;
use forecast_math::metrics::{mean_absolute_error, RegressionMetrics};
use forecast_math::regression::fit;
use forecast_math::split::{chronological_split, split_index, DEFAULT_SPLIT_RATIO};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Synthetic lag-feature rows: [price_lag1, data_lag1, data_change_lag1]
fn noisy_lag_data(seed: u64, n: usize) -> (Vec<[f64; 3]>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 1800.0;
    let mut level = 50.0;
    let mut rows = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);

    for _ in 0..n {
        let change = rng.gen_range(-2.0..2.0);
        let row = [price, level, change];
        let next = 0.95 * price + 1.5 * level - 4.0 * change + 60.0 + rng.gen_range(-5.0..5.0);

        rows.push(row);
        targets.push(next);

        price = next;
        level += change;
    }

    (rows, targets)
}

#[test]
fn test_fit_on_training_block_matches_independent_residuals() {
    let (rows, targets) = noisy_lag_data(17, 120);

    let split_idx = split_index(rows.len(), DEFAULT_SPLIT_RATIO).unwrap();
    assert_eq!(split_idx, 96);

    let (train_x, test_x) = chronological_split(&rows, DEFAULT_SPLIT_RATIO).unwrap();
    let (train_y, test_y) = chronological_split(&targets, DEFAULT_SPLIT_RATIO).unwrap();
    assert_eq!(train_x.len(), train_y.len());
    assert_eq!(test_x.len(), test_y.len());
    assert_eq!(train_x.len() + test_x.len(), rows.len());

    let model = fit(train_x, train_y).unwrap();
    assert_eq!(model.n_features(), 3);

    let predicted = model.predict(train_x).unwrap();
    let mae = mean_absolute_error(train_y, &predicted).unwrap();

    let residual_mae = train_x
        .iter()
        .zip(train_y)
        .map(|(row, y)| {
            let fitted = row[0] * model.coefficients()[0]
                + row[1] * model.coefficients()[1]
                + row[2] * model.coefficients()[2]
                + model.intercept();
            (y - fitted).abs()
        })
        .sum::<f64>()
        / train_x.len() as f64;

    assert_abs_diff_eq!(mae, residual_mae, epsilon = 1e-9);

    // OLS residuals sum to zero when an intercept is fitted
    let residual_sum: f64 = train_y.iter().zip(&predicted).map(|(y, p)| y - p).sum();
    assert_abs_diff_eq!(residual_sum, 0.0, epsilon = 1e-6);
}

#[test]
fn test_fit_recovers_generating_coefficients() {
    let (rows, targets) = noisy_lag_data(5, 400);
    let model = fit(&rows, &targets).unwrap();

    assert_abs_diff_eq!(model.coefficients()[2], -4.0, epsilon = 0.5);

    let metrics = RegressionMetrics::compute(&targets, &model.predict(&rows).unwrap()).unwrap();
    assert!(metrics.r2.unwrap() > 0.9);
    assert!(metrics.rmse >= metrics.mae);
}
