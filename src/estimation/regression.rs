use itertools::izip;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

use crate::data::summary::split_arms;
use crate::data::types::{Observation, Outcome};
use crate::error::TrialpowerErr;
use crate::estimation::error::EstimationErr;
use crate::estimation::types::RegressionFit;

/// Ordinary least squares fit of `y` on an intercept and a single regressor
/// `x`, with the classical standard error of the slope
pub fn ols_simple(x: &[f64], y: &[f64]) -> Result<RegressionFit, TrialpowerErr> {
    if x.len() != y.len() {
        return Err(EstimationErr::LengthMismatch {
            x_length: x.len(),
            y_length: y.len(),
        }
        .into());
    }
    let n = x.len();
    if n < 3 {
        return Err(EstimationErr::TooFewForRegression(n).into());
    }

    let x_bar = x.mean();
    let y_bar = y.mean();
    let (sxx, sxy) = izip!(x, y).fold((0., 0.), |(sxx, sxy), (xi, yi)| {
        (sxx + (xi - x_bar).powi(2), sxy + (xi - x_bar) * (yi - y_bar))
    });
    if sxx == 0. {
        return Err(EstimationErr::ConstantRegressor.into());
    }

    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;
    let rss: f64 = izip!(x, y)
        .map(|(xi, yi)| (yi - intercept - slope * xi).powi(2))
        .sum();
    if rss == 0. {
        return Err(EstimationErr::DegenerateResidualVariance.into());
    }

    let residual_df = n - 2;
    let sigma_sq = rss / residual_df as f64;
    let slope_std_error = (sigma_sq / sxx).sqrt();
    let t_stat = slope / slope_std_error;

    let t_dist = StudentsT::new(0.0, 1.0, residual_df as f64)
        .map_err(|e| TrialpowerErr::Distribution(e.to_string()))?;
    let p_value = 2. * (1. - t_dist.cdf(t_stat.abs()));

    Ok(RegressionFit {
        intercept,
        slope,
        slope_std_error,
        t_stat,
        p_value,
        residual_df,
        n,
    })
}

/// Regresses `outcome` on an indicator for the treatment price level, over
/// observations at the treatment and control levels. The slope is the
/// difference in means and the intercept the control mean.
pub fn regress_on_treatment(
    observations: &[Observation],
    treatment_level: u32,
    control_level: u32,
    outcome: Outcome,
) -> Result<RegressionFit, TrialpowerErr> {
    let (treatment, control) = split_arms(observations, treatment_level, control_level, outcome)?;
    let x: Vec<f64> = std::iter::repeat_n(1., treatment.len())
        .chain(std::iter::repeat_n(0., control.len()))
        .collect();
    let y: Vec<f64> = treatment.into_iter().chain(control).collect();
    ols_simple(&x, &y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_line_plus_noise() {
        let x = [0., 1., 2., 3., 4.];
        let y = [1.1, 2.9, 5.2, 6.8, 9.0];
        let fit = ols_simple(&x, &y).expect("failed to fit regression");
        // Hand computed: sxy = 19.7, sxx = 10
        assert!((fit.slope - 1.97).abs() < 1e-12);
        assert!((fit.intercept - 1.06).abs() < 1e-12);
        assert_eq!(fit.residual_df, 3);
        assert!(fit.p_value < 0.001);
    }

    #[test]
    fn treatment_slope_is_difference_in_means() {
        let observations = vec![
            Observation::new(99, true),
            Observation::new(99, false),
            Observation::new(99, true),
            Observation::new(39, true),
            Observation::new(39, false),
            Observation::new(39, false),
            Observation::new(39, true),
            // Ignored: neither treatment nor control
            Observation::new(149, true),
        ];
        let fit = regress_on_treatment(&observations, 99, 39, Outcome::Revenue)
            .expect("failed to fit regression");
        assert_eq!(fit.n, 7);
        assert!((fit.intercept - 19.5).abs() < 1e-10);
        assert!((fit.slope - (66. - 19.5)).abs() < 1e-10);

        // Pooled SE: RSS / (n - 2) * (1 / n_t + 1 / n_c)
        let rss = 2. * 33_f64.powi(2) + 66_f64.powi(2) + 4. * 19.5_f64.powi(2);
        let se = (rss / 5. * (1. / 3. + 1. / 4.)).sqrt();
        assert!((fit.slope_std_error - se).abs() < 1e-10);
    }

    #[test]
    fn regression_errors() {
        assert!(matches!(
            ols_simple(&[1., 2.], &[1., 2., 3.]),
            Err(TrialpowerErr::Estimation(EstimationErr::LengthMismatch { .. }))
        ));
        assert!(matches!(
            ols_simple(&[1., 2.], &[1., 2.]),
            Err(TrialpowerErr::Estimation(EstimationErr::TooFewForRegression(2)))
        ));
        assert!(matches!(
            ols_simple(&[1., 1., 1.], &[1., 2., 3.]),
            Err(TrialpowerErr::Estimation(EstimationErr::ConstantRegressor))
        ));
        assert!(matches!(
            ols_simple(&[1., 2., 3.], &[2., 4., 6.]),
            Err(TrialpowerErr::Estimation(
                EstimationErr::DegenerateResidualVariance
            ))
        ));
    }
}
