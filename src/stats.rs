//! Statistical utility functions shared across modules
//!
//! Order statistics for the outlier filter and the kernel density estimate
//! used to draw violin bodies.

use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// How quartiles are read off the sorted sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantileMethod {
    /// Order statistic at floor(p * (n - 1))
    #[default]
    Lower,
    /// Linear interpolation between order statistics at p * (n - 1)
    /// (NumPy/SciPy default)
    Linear,
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}

/// Median of the values (mean of the two middle values for even counts).
/// Returns NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let v = sorted(values);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    }
}

/// Quantile of an already sorted slice, `prob` in [0, 1]
pub fn quantile_sorted(sorted_values: &[f64], prob: f64, method: QuantileMethod) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    let pos = prob.clamp(0.0, 1.0) * (n - 1) as f64;
    let low = pos.floor() as usize;
    match method {
        QuantileMethod::Lower => sorted_values[low],
        QuantileMethod::Linear => {
            let high = (low + 1).min(n - 1);
            let frac = pos - low as f64;
            sorted_values[low] + frac * (sorted_values[high] - sorted_values[low])
        }
    }
}

/// Quantile of unsorted values
pub fn quantile(values: &[f64], prob: f64, method: QuantileMethod) -> f64 {
    quantile_sorted(&sorted(values), prob, method)
}

/// Spread between the 25th and 75th percentiles
pub fn interquartile_range(values: &[f64], method: QuantileMethod) -> f64 {
    let v = sorted(values);
    quantile_sorted(&v, 0.75, method) - quantile_sorted(&v, 0.25, method)
}

/// Scott's rule kernel bandwidth: n^(-1/5) times the sample standard deviation.
///
/// Returns `None` when fewer than two values are given or the values do not
/// vary, in which case no density can be estimated.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sd = values.iter().std_dev();
    let factor = (values.len() as f64).powf(-0.2);
    let bw = factor * sd;
    if bw.is_finite() && bw > 0.0 {
        Some(bw)
    } else {
        None
    }
}

/// Gaussian kernel density of `values` evaluated at each point of `grid`
pub fn gaussian_kde(values: &[f64], bandwidth: f64, grid: &[f64]) -> Vec<f64> {
    let kernel = match Normal::new(0.0, 1.0) {
        Ok(k) => k,
        Err(_) => return vec![0.0; grid.len()],
    };
    let n = values.len() as f64;
    grid.iter()
        .map(|&x| {
            let sum: f64 = values.iter().map(|&v| kernel.pdf((x - v) / bandwidth)).sum();
            sum / (n * bandwidth)
        })
        .collect()
}

/// `n` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            points[n - 1] = end;
            points
        }
    }
}
