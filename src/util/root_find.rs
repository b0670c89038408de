use tracing::debug;

use crate::error::TrialpowerErr;
use crate::util::error::RootFindErr;

/// Maximum number of times the search window is widened
pub const MAX_BRACKET_STEPS: usize = 60;
/// Maximum number of bisection steps once the target is bracketed
pub const MAX_BISECTIONS: usize = 200;

/// Given a monotonically increasing function f(x) and lower bound, finds the
/// smallest x' in [lower_bound, upper_limit] such that f(x') >= target.
///
/// The returned x' always satisfies f(x') >= target, and f(x') - target <= tol
/// unless the window collapses to machine precision first. If f(lower_bound)
/// already reaches the target, lower_bound is returned.
pub fn root_find_monotonic<F>(
    f: F,
    lower_bound: f64,
    upper_limit: f64,
    target: f64,
    tol: f64,
) -> Result<f64, TrialpowerErr>
where
    F: Fn(f64) -> f64,
{
    if !lower_bound.is_finite() || !upper_limit.is_finite() || upper_limit <= lower_bound {
        return Err(RootFindErr::BadBracket {
            lower: lower_bound,
            upper: upper_limit,
        }
        .into());
    }
    let f_lower = eval(&f, lower_bound)?;
    if f_lower >= target {
        return Ok(lower_bound);
    }

    //----------------------------------------
    // Set window for search
    //----------------------------------------
    let mut lower_bound = lower_bound;
    let mut upper_bound = lower_bound;
    let mut f_upper = f_lower;
    let mut steps = 0;
    while f_upper < target {
        if upper_bound >= upper_limit || steps == MAX_BRACKET_STEPS {
            return Err(RootFindErr::NoBracket {
                target,
                upper: upper_bound,
                f_upper,
            }
            .into());
        }
        // Last point below the target is a valid lower end
        lower_bound = upper_bound;
        upper_bound *= 2.;
        upper_bound += 1.; // In case lower_bound is zero
        upper_bound = upper_bound.min(upper_limit);
        f_upper = eval(&f, upper_bound)?;
        steps += 1;
    }
    debug!(lower_bound, upper_bound, steps, "bracketed target {target}");

    //----------------------------------------
    // Perform search
    //----------------------------------------
    for i in 0..MAX_BISECTIONS {
        let width = upper_bound - lower_bound;
        if f_upper - target <= tol || width <= f64::EPSILON * upper_bound.abs().max(1.) {
            debug!(iterations = i, x = upper_bound, f_x = f_upper, "root find converged");
            return Ok(upper_bound);
        }
        let x = (lower_bound + upper_bound) / 2.;
        let y = eval(&f, x)?;
        if y < target {
            lower_bound = x;
        } else {
            upper_bound = x;
            f_upper = y;
        }
    }
    Err(RootFindErr::FailedToConverge(MAX_BISECTIONS).into())
}

fn eval<F>(f: &F, x: f64) -> Result<f64, TrialpowerErr>
where
    F: Fn(f64) -> f64,
{
    let y = f(x);
    if y.is_nan() {
        return Err(RootFindErr::NanEvaluation(x).into());
    }
    Ok(y)
}
