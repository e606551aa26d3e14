//! Deterministic numeric and statistical helpers.
//!
//! Every function here is total: degenerate input (empty samples, a single
//! observation, zero variance, zero denominators) yields a defined sentinel
//! (`None` or `0.0`) instead of `NaN` or a panic.

#![forbid(unsafe_code)]

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Return a 4-decimal ratio and guard division by zero.
#[must_use]
pub fn safe_ratio(numer: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        round_f64(numer as f64 / denom as f64, 4)
    }
}

/// Arithmetic mean, `None` for an empty sample.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased (n - 1) sample variance, `None` below two observations.
#[must_use]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(ss / (values.len() as f64 - 1.0))
}

/// Median of a sample, `None` when empty.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation, `None` below two observations.
#[must_use]
pub fn std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Standard error of the mean; zero when it cannot be estimated.
#[must_use]
pub fn standard_error(values: &[f64]) -> f64 {
    match std_dev(values) {
        Some(sd) => sd / (values.len() as f64).sqrt(),
        None => 0.0,
    }
}

/// Number of standard errors `mean` lies from `target`.
#[must_use]
pub fn z_score(mean: f64, target: f64, sem: f64) -> Option<f64> {
    if sem <= 0.0 || !sem.is_finite() || !mean.is_finite() {
        return None;
    }
    Some((mean - target) / sem)
}

/// Complementary error function (Chebyshev fit, fractional error < 1.2e-7).
#[must_use]
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * poly.exp();
    if x >= 0.0 { ans } else { 2.0 - ans }
}

/// Survival function `P(Z > x)` of the standard normal distribution.
#[must_use]
pub fn normal_sf(x: f64) -> f64 {
    0.5 * erfc(x / std::f64::consts::SQRT_2)
}

/// Two-tailed p-value of a z-score, clamped to `[0, 1]`.
#[must_use]
pub fn two_tailed_p(z: f64) -> f64 {
    (2.0 * normal_sf(z.abs())).clamp(0.0, 1.0)
}

/// z-score of a subsample mean drawn without replacement from a population.
///
/// Applies the finite population correction
/// `var * (1 - (n - 1) / (N - 1))`. Returns `None` when the population has
/// fewer than two members or the corrected variance is not positive (e.g. the
/// subsample is the whole population).
#[must_use]
pub fn subsample_z(
    sample_mean: f64,
    sample_n: usize,
    population_mean: f64,
    population_variance: f64,
    population_n: usize,
) -> Option<f64> {
    if population_n < 2 || sample_n == 0 {
        return None;
    }
    let correction = 1.0 - (sample_n as f64 - 1.0) / (population_n as f64 - 1.0);
    let denom = population_variance * correction;
    if denom <= 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sample_mean - population_mean).abs() * (sample_n as f64).sqrt() / denom.sqrt())
}

/// Round an error to one significant figure and the value to the same place.
///
/// A non-positive or non-finite error leaves the value at one decimal place
/// and reports an error of zero.
#[must_use]
pub fn round_sig(value: f64, err: f64) -> (f64, f64) {
    if err <= 0.0 || !err.is_finite() {
        return (round_f64(value, 1), 0.0);
    }
    let place = -(err.log10().floor() as i32);
    let factor = 10f64.powi(place);
    let round_at = |v: f64| (v * factor).round() / factor;
    (round_at(value), round_at(err))
}

/// Approximate two-tailed p-value of a correlation via the Fisher transform.
///
/// `None` below four observations.
#[must_use]
pub fn correlation_p(r: f64, n: usize) -> Option<f64> {
    if n < 4 || !r.is_finite() {
        return None;
    }
    if r.abs() >= 1.0 {
        return Some(0.0);
    }
    let z = r.atanh() * (n as f64 - 3.0).sqrt();
    Some(two_tailed_p(z))
}

/// Pearson correlation coefficient; `None` if either series is constant.
#[must_use]
pub fn pearson_r(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx) * (x - mx);
        syy += (y - my) * (y - my);
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some(sxy / (sxx * syy).sqrt())
}
