//! Per-bucket streamflow metrics.
//!
//! Every function takes the present discharge values of one bucket in date
//! order, with missing-markers already removed. An empty bucket yields NaN
//! for every statistic and 0 for the exceedance count.

use std::cmp::Ordering;

/// Length of the rolling window used for the seven-day low flow.
pub const LOW_FLOW_WINDOW: usize = 7;

/// Arithmetic mean. NaN if empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Largest value. NaN if empty.
pub fn peak(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Median; averages the middle two values for even length. NaN if empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Sample standard deviation with N-1 denominator. NaN if fewer than 2 values.
pub fn sample_sd(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / (n as f64 - 1.0)).sqrt()
}

/// Coefficient of variation in percent: sample SD over mean, times 100.
/// NaN when the mean is zero.
pub fn coeff_var(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return f64::NAN;
    }
    sample_sd(values) / m * 100.0
}

/// Fisher-Pearson coefficient of skewness, g1 = m3 / m2^1.5, using
/// population central moments. NaN if empty or constant.
pub fn skew(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let m = mean(values);
    let m2 = values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n;
    let m3 = values.iter().map(|&x| (x - m).powi(3)).sum::<f64>() / n;
    if m2 == 0.0 {
        return f64::NAN;
    }
    m3 / m2.powf(1.5)
}

/// Tqmean: fraction of values strictly above the bucket mean.
pub fn tqmean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let above = values.iter().filter(|&&v| v > m).count();
    above as f64 / values.len() as f64
}

/// Richards-Baker flashiness index: path length of consecutive changes over
/// total discharge. NaN when total discharge is zero.
pub fn rb_index(values: &[f64]) -> f64 {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return f64::NAN;
    }
    let path_length: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    path_length / total
}

/// Seven-day low flow (7Q): the minimum of the 7-value rolling means.
/// NaN if there are fewer than 7 values.
pub fn seven_day_low_flow(values: &[f64]) -> f64 {
    values
        .windows(LOW_FLOW_WINDOW)
        .map(|w| w.iter().sum::<f64>() / LOW_FLOW_WINDOW as f64)
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

/// Number of values strictly greater than three times the bucket median.
pub fn exceed_three_times_median(values: &[f64]) -> usize {
    if values.is_empty() {
        return 0;
    }
    let threshold = 3.0 * median(values);
    values.iter().filter(|&&v| v > threshold).count()
}

/// Mean of the non-NaN values. NaN if there are none.
pub fn nan_mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOWS: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_basic_statistics() {
        assert!(approx(mean(&FLOWS), 30.0));
        assert!(approx(peak(&FLOWS), 50.0));
        assert!(approx(median(&FLOWS), 30.0));
        assert!(approx(median(&[4.0, 1.0, 3.0, 2.0]), 2.5));
        assert!(approx(sample_sd(&FLOWS), 250f64.sqrt()));
        assert!(approx(coeff_var(&FLOWS), 250f64.sqrt() / 30.0 * 100.0));
    }

    #[test]
    fn test_tqmean_and_exceedance() {
        assert!(approx(tqmean(&FLOWS), 0.4));
        assert_eq!(exceed_three_times_median(&FLOWS), 0);
        assert!(approx(tqmean(&[10.0, 30.0]), 0.5));

        let storm = [1.0, 1.0, 1.0, 2.0, 9.0, 12.0];
        assert_eq!(exceed_three_times_median(&storm), 2);
    }

    #[test]
    fn test_tqmean_range() {
        let series = [
            vec![5.0, 5.0, 5.0],
            vec![0.0, 0.0, 100.0],
            vec![3.2, 8.1, 0.4, 22.0, 7.7, 1.0],
        ];
        for values in series.iter() {
            let t = tqmean(values);
            assert!((0.0..=1.0).contains(&t));
            assert!(exceed_three_times_median(values) <= values.len());
        }
    }

    #[test]
    fn test_rb_index() {
        assert!(approx(rb_index(&FLOWS), 40.0 / 150.0));
        let scaled: Vec<f64> = FLOWS.iter().map(|v| v * 3.7).collect();
        assert!(approx(rb_index(&scaled), rb_index(&FLOWS)));
        assert!(approx(rb_index(&[42.0]), 0.0));
        assert!(rb_index(&[0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_skew() {
        assert!((skew(&[1.0, 2.0, 3.0, 10.0]) - 1.018_233).abs() < 1e-5);
        assert!(approx(skew(&FLOWS), 0.0));
        assert!(skew(&[4.0, 4.0, 4.0]).is_nan());
    }

    #[test]
    fn test_seven_day_low_flow() {
        let recession = [5.0, 5.0, 5.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 5.0];
        assert!(approx(seven_day_low_flow(&recession), 1.0));
        let ramp: Vec<f64> = (1..=10u32).map(f64::from).collect();
        assert!(approx(seven_day_low_flow(&ramp), 4.0));
        assert!(seven_day_low_flow(&FLOWS).is_nan());
    }

    #[test]
    fn test_coeff_var_zero_mean() {
        assert!(coeff_var(&[0.0, 0.0, 0.0]).is_nan());
        assert!(coeff_var(&[7.0]).is_nan());
    }

    #[test]
    fn test_empty_bucket_convention() {
        let empty: [f64; 0] = [];
        assert!(mean(&empty).is_nan());
        assert!(peak(&empty).is_nan());
        assert!(median(&empty).is_nan());
        assert!(coeff_var(&empty).is_nan());
        assert!(skew(&empty).is_nan());
        assert!(tqmean(&empty).is_nan());
        assert!(rb_index(&empty).is_nan());
        assert!(seven_day_low_flow(&empty).is_nan());
        assert_eq!(exceed_three_times_median(&empty), 0);
    }

    #[test]
    fn test_nan_mean() {
        assert!(approx(nan_mean([1.0, f64::NAN, 3.0]), 2.0));
        assert!(nan_mean([f64::NAN]).is_nan());
        assert!(nan_mean(Vec::<f64>::new()).is_nan());
    }
}
