//! Shapiro–Wilk normality test.
//!
//! Coefficients and the p-value follow Royston's approximation (Applied
//! Statistics algorithm AS R94), valid for sample sizes 3 to 5000. Samples
//! outside that range are refused with a precondition failure.

use crate::error::TestError;
use statrs::distribution::{ContinuousCDF, Normal};

const TEST_NAME: &str = "shapiro-wilk";

/// Smallest sample the approximation accepts.
pub const MIN_SAMPLE_SIZE: usize = 3;

/// Largest sample the approximation accepts.
pub const MAX_SAMPLE_SIZE: usize = 5000;

// Polynomial coefficients, lowest order first
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of a Shapiro–Wilk test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapiroOutcome {
    /// The W statistic in (0, 1].
    pub statistic: f64,
    /// Upper-tail p-value.
    pub p_value: f64,
}

/// Shapiro–Wilk test of `sample` against normality.
///
/// # Errors
///
/// Returns [`TestError::Precondition`] if the sample has fewer than
/// [`MIN_SAMPLE_SIZE`] or more than [`MAX_SAMPLE_SIZE`] values, contains
/// non-finite values, or has zero range.
///
/// # Examples
///
/// ```rust
/// use variate_gof::shapiro_wilk;
///
/// let sample = [-1.2, -0.4, 0.1, 0.3, 0.9, 1.5, -0.7, 0.05];
/// let outcome = shapiro_wilk(&sample).unwrap();
/// assert!(outcome.statistic > 0.0 && outcome.statistic <= 1.0);
/// assert!(outcome.p_value > 0.05);
///
/// assert!(shapiro_wilk(&[1.0, 2.0]).is_err());
/// ```
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroOutcome, TestError> {
    let n = sample.len();
    if n < MIN_SAMPLE_SIZE {
        return Err(TestError::precondition(
            TEST_NAME,
            format!("sample size {} below minimum {}", n, MIN_SAMPLE_SIZE),
        ));
    }
    if n > MAX_SAMPLE_SIZE {
        return Err(TestError::precondition(
            TEST_NAME,
            format!("sample size {} above maximum {}", n, MAX_SAMPLE_SIZE),
        ));
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(TestError::precondition(
            TEST_NAME,
            "sample contains non-finite values",
        ));
    }

    let mut x = sample.to_vec();
    x.sort_by(f64::total_cmp);
    if x[n - 1] - x[0] <= 0.0 {
        return Err(TestError::precondition(TEST_NAME, "sample has zero range"));
    }

    let normal =
        Normal::new(0.0, 1.0).map_err(|e| TestError::numerical(TEST_NAME, e.to_string()))?;
    let a = coefficients(n, &normal);

    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = a.iter().zip(&x).map(|(ai, xi)| ai * xi).sum();
    let statistic = (numerator * numerator / ss).min(1.0);

    Ok(ShapiroOutcome {
        statistic,
        p_value: p_value(statistic, n, &normal),
    })
}

/// Royston's approximation to the expected normal order statistic weights.
fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    if n == 3 {
        let c = std::f64::consts::FRAC_1_SQRT_2;
        return vec![-c, 0.0, c];
    }

    let an = n as f64;
    let m: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let mm: f64 = m.iter().map(|v| v * v).sum();
    let u = 1.0 / an.sqrt();

    let last = m[n - 1];
    let second_last = m[n - 2];
    let a_n = last / mm.sqrt() + poly(&C1, u);

    let mut a = vec![0.0; n];
    if n > 5 {
        let a_n1 = second_last / mm.sqrt() + poly(&C2, u);
        let phi = (mm - 2.0 * last * last - 2.0 * second_last * second_last)
            / (1.0 - 2.0 * a_n * a_n - 2.0 * a_n1 * a_n1);
        let scale = phi.sqrt();
        for i in 2..n - 2 {
            a[i] = m[i] / scale;
        }
        a[n - 2] = a_n1;
        a[1] = -a_n1;
    } else {
        let phi = (mm - 2.0 * last * last) / (1.0 - 2.0 * a_n * a_n);
        let scale = phi.sqrt();
        for i in 1..n - 1 {
            a[i] = m[i] / scale;
        }
    }
    a[n - 1] = a_n;
    a[0] = -a_n;
    a
}

/// Upper-tail probability of `w` for a sample of size `n`.
fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        // Exact distribution: 6/pi * (asin(sqrt(w)) - asin(sqrt(3/4)))
        let p = 6.0 / std::f64::consts::PI
            * (w.sqrt().asin() - std::f64::consts::FRAC_PI_3);
        return p.clamp(0.0, 1.0);
    }

    let an = n as f64;
    let w1 = (1.0 - w).ln();
    let (y, mean, std_dev) = if n <= 11 {
        let gamma = poly(&G, an);
        if w1 >= gamma {
            return 1e-99;
        }
        (
            -(gamma - w1).ln(),
            poly(&C3, an),
            poly(&C4, an).exp(),
        )
    } else {
        let ln_n = an.ln();
        (w1, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    1.0 - normal.cdf((y - mean) / std_dev)
}

/// Evaluates `c[0] + c[1] x + c[2] x^2 + ...` by Horner's rule.
fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
