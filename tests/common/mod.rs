//! Synthetic catalogs for end-to-end tests.

use rand::Rng;
use rand_distr::{Distribution, Exp};

/// Round `m` to a decimal bin width such as 0.1 (the result is the nearest
/// `f64` to the decimal bin value, so equal bins compare equal).
pub fn bin(m: f64, delta_m: f64) -> f64 {
    let scale = (1.0 / delta_m).round();
    (m * scale).round() / scale
}

/// `n` Gutenberg–Richter magnitudes, complete from `mc` up, binned at `delta_m`.
///
/// Continuous magnitudes start at the lower edge of the `mc` bin so every
/// binned value is `>= mc`.
pub fn gr_magnitudes<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    mc: f64,
    b_value: f64,
    delta_m: f64,
) -> Vec<f64> {
    let exp = Exp::new(b_value * std::f64::consts::LN_10).unwrap();
    let origin = mc - delta_m / 2.0;
    (0..n)
        .map(|_| bin(origin + exp.sample(rng), delta_m).max(mc))
        .collect()
}

/// A catalog complete above 2.0 (1000 GR events, b = 1) plus a flat,
/// strongly under-reported tail of 20 events per bin from 1.0 to 1.9.
pub fn contaminated_catalog<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    let mut mags = gr_magnitudes(rng, 1000, 2.0, 1.0, 0.1);
    for k in 10..20 {
        mags.extend(std::iter::repeat_n(k as f64 / 10.0, 20));
    }
    mags
}
