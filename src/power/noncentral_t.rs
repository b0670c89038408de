use std::f64::consts::{FRAC_1_SQRT_2, LN_2, PI};

use statrs::function::{beta::beta_reg, erf::erfc, gamma::ln_gamma};

/// Truncation error bound for the series
pub const NCT_ERRMAX: f64 = 1e-12;
/// Maximum number of series terms
pub const NCT_ITRMAX: usize = 10_000;
/// Above this many degrees of freedom the normal approximation is used
const NCT_LARGE_DF: f64 = 4e5;
/// Smallest binary exponent of a normal f64
const MIN_EXP: f64 = -1021.;

fn std_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z * FRAC_1_SQRT_2)
}

/// P(T <= t) for T non-central t with `df` degrees of freedom and
/// noncentrality `ncp`.
///
/// Series expansion of Lenth (1989), Algorithm AS 243, summing Poisson
/// weighted incomplete beta terms until the truncation bound drops below
/// `NCT_ERRMAX`. For very large `df`, or noncentrality so large that the
/// leading Poisson weight underflows, Abramowitz & Stegun 26.7.10 is used.
/// Returns NaN for NaN arguments or non-positive `df`.
pub fn noncentral_t_cdf(t: f64, df: f64, ncp: f64) -> f64 {
    if t.is_nan() || ncp.is_nan() || df.is_nan() || df <= 0. {
        return f64::NAN;
    }
    if t == f64::INFINITY {
        return 1.;
    }
    if t == f64::NEG_INFINITY {
        return 0.;
    }

    // Work with t >= 0, using F(t; d) = 1 - F(-t; -d)
    let (tt, del, negdel) = if t < 0. {
        (-t, -ncp, true)
    } else {
        (t, ncp, false)
    };

    if df > NCT_LARGE_DF || del * del > 2. * LN_2 * -MIN_EXP {
        let s = 1. / (4. * df);
        let z = (tt * (1. - s) - del) / (1. + tt * tt * 2. * s).sqrt();
        let cdf = std_normal_cdf(z);
        return if negdel { 1. - cdf } else { cdf };
    }

    let mut tnc = 0.;
    let x = tt * tt / (tt * tt + df);
    if x > 0. {
        let lambda = del * del;
        let mut p = 0.5 * (-0.5 * lambda).exp();
        let mut q = (2. / PI).sqrt() * p * del;
        let mut s = 0.5 - p;
        let mut a = 0.5;
        let b = 0.5 * df;
        let rxb = (1. - x).powf(b);
        let albeta = 0.5 * PI.ln() + ln_gamma(b) - ln_gamma(0.5 + b);
        let mut xodd = beta_reg(a, b, x);
        let mut godd = 2. * rxb * (a * x.ln() - albeta).exp();
        let mut xeven = 1. - rxb;
        let mut geven = b * x * rxb;
        tnc = p * xodd + q * xeven;

        let mut en = 1.;
        loop {
            a += 1.;
            xodd -= godd;
            xeven -= geven;
            godd *= x * (a + b - 1.) / a;
            geven *= x * (a + b - 0.5) / (a + 0.5);
            p *= lambda / (2. * en);
            q *= lambda / (2. * en + 1.);
            s -= p;
            en += 1.;
            tnc += p * xodd + q * xeven;
            let errbd = 2. * s * (xodd - godd);
            if errbd <= NCT_ERRMAX || en > NCT_ITRMAX as f64 {
                break;
            }
        }
    }

    tnc += std_normal_cdf(-del);
    if negdel {
        tnc = 1. - tnc;
    }
    tnc.clamp(0., 1.)
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, StudentsT};

    #[test]
    fn central_matches_students_t() {
        for df in [2., 5., 30., 318.] {
            let t_dist = StudentsT::new(0.0, 1.0, df).expect("failed to construct t distribution");
            for t in [-3., -1.2, 0.4, 1.96, 2.5] {
                let expected = t_dist.cdf(t);
                let got = noncentral_t_cdf(t, df, 0.);
                assert!(
                    (expected - got).abs() < 1e-8,
                    "df {df}, t {t}: expected {expected}, got {got}"
                );
            }
        }
    }

    #[test]
    fn zero_t_is_normal_tail() {
        // P(T <= 0) = P(Z <= -ncp) for any df
        let cdf = noncentral_t_cdf(0., 12., 1.);
        assert!((cdf - 0.158655254).abs() < 1e-8);
    }

    #[test]
    fn reference_values() {
        // Checked against direct quadrature over the chi distribution
        assert!((noncentral_t_cdf(2.0, 10., 1.0) - 0.8076115625).abs() < 1e-8);
        assert!((noncentral_t_cdf(1.96, 318., 2.236) - 0.3910016499).abs() < 1e-8);
        assert!((noncentral_t_cdf(-1.3, 20., 0.7) - 0.0259271322).abs() < 1e-8);
        assert!((noncentral_t_cdf(1.5, 5., -1.0) - 0.9868299275).abs() < 1e-8);
    }

    #[test]
    fn reflection() {
        let lhs = noncentral_t_cdf(-1.3, 20., 0.7);
        let rhs = 1. - noncentral_t_cdf(1.3, 20., -0.7);
        assert!((lhs - rhs).abs() < 1e-12);
    }

    #[test]
    fn increasing_in_t_decreasing_in_ncp() {
        let ts = [-2., -1., 0., 1., 2., 3.];
        let cdfs: Vec<f64> = ts.iter().map(|&t| noncentral_t_cdf(t, 40., 1.5)).collect();
        assert!(cdfs.windows(2).all(|w| w[0] < w[1]));

        let ncps = [0., 0.5, 1., 2., 4.];
        let cdfs: Vec<f64> = ncps
            .iter()
            .map(|&ncp| noncentral_t_cdf(1.96, 40., ncp))
            .collect();
        assert!(cdfs.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn large_df_approaches_shifted_normal() {
        let cdf = noncentral_t_cdf(2.5, 1e7, 1.5);
        assert!((cdf - std_normal_cdf(1.0)).abs() < 1e-4);
    }

    #[test]
    fn series_and_approximation_agree_near_switch() {
        let series = noncentral_t_cdf(2.0, 3e5, 2.2);
        let approx = noncentral_t_cdf(2.0, 5e5, 2.2);
        assert!((series - approx).abs() < 1e-4);
    }

    #[test]
    fn invalid_arguments() {
        assert!(noncentral_t_cdf(1., 0., 1.).is_nan());
        assert!(noncentral_t_cdf(f64::NAN, 10., 1.).is_nan());
        assert!(noncentral_t_cdf(1., 10., f64::NAN).is_nan());
        assert_eq!(noncentral_t_cdf(f64::INFINITY, 10., 1.), 1.);
        assert_eq!(noncentral_t_cdf(f64::NEG_INFINITY, 10., 1.), 0.);
    }
}
