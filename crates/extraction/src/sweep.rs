//! Yield as a function of grind size and temperature.
//!
//! A sweep runs one simulation per parameter value and records the final
//! extraction yield. Runs are independent and execute one after another.

use tracing::debug;
use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    length::micrometer,
};

use crate::{BrewParameters, Error, run_simulation};

/// Final yields over a range of grind sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct GrindSweep {
    pub grind_sizes: Vec<Length>,
    /// Extraction yield in percent, aligned with `grind_sizes`.
    pub yields: Vec<f64>,
}

impl GrindSweep {
    /// Returns `d(yield)/d(grind)` in percent per micrometre at each point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooFewPoints`] if the sweep has fewer than two points.
    pub fn sensitivity(&self) -> Result<Vec<f64>, Error> {
        let micrometers: Vec<f64> = self
            .grind_sizes
            .iter()
            .map(|size| size.get::<micrometer>())
            .collect();
        gradient(&micrometers, &self.yields)
    }

    /// Returns the grind size with the highest yield.
    #[must_use]
    pub fn best(&self) -> Option<(Length, f64)> {
        self.grind_sizes
            .iter()
            .copied()
            .zip(self.yields.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Runs one simulation per grind size with everything else taken from `base`.
///
/// # Errors
///
/// Fails on the first run that fails.
pub fn grind_sweep(base: &BrewParameters, grind_sizes: &[Length]) -> Result<GrindSweep, Error> {
    let yields = grind_sizes
        .iter()
        .map(|&grind_size| final_yield(&BrewParameters { grind_size, ..*base }))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(points = yields.len(), "grind sweep complete");

    Ok(GrindSweep {
        grind_sizes: grind_sizes.to_vec(),
        yields,
    })
}

/// Final yields over a grid of temperatures and grind sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldSurface {
    pub grind_sizes: Vec<Length>,
    pub temperatures: Vec<ThermodynamicTemperature>,
    /// One row per temperature, one column per grind size, in percent.
    pub yields: Vec<Vec<f64>>,
}

impl YieldSurface {
    #[must_use]
    pub fn get(&self, temperature: usize, grind_size: usize) -> Option<f64> {
        self.yields.get(temperature)?.get(grind_size).copied()
    }
}

/// Runs one simulation per `(temperature, grind size)` pair.
///
/// # Errors
///
/// Fails on the first run that fails.
pub fn yield_surface(
    base: &BrewParameters,
    grind_sizes: &[Length],
    temperatures: &[ThermodynamicTemperature],
) -> Result<YieldSurface, Error> {
    let yields = temperatures
        .iter()
        .map(|&temperature| {
            let params = base.with_temperature(temperature);
            grind_sweep(&params, grind_sizes).map(|sweep| sweep.yields)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(YieldSurface {
        grind_sizes: grind_sizes.to_vec(),
        temperatures: temperatures.to_vec(),
        yields,
    })
}

fn final_yield(params: &BrewParameters) -> Result<f64, Error> {
    run_simulation(params)?
        .extraction_yield()
        .ok_or(Error::TooFewPoints {
            required: 1,
            actual: 0,
        })
}

/// Numerical derivative of `y` with respect to `x`.
///
/// Interior points use second-order central differences that account for
/// uneven spacing. The two end points use one-sided first differences.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if `x` and `y` differ in length, or
/// [`Error::TooFewPoints`] if there are fewer than two points.
pub fn gradient(x: &[f64], y: &[f64]) -> Result<Vec<f64>, Error> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(Error::TooFewPoints {
            required: 2,
            actual: n,
        });
    }

    let mut slopes = Vec::with_capacity(n);
    slopes.push((y[1] - y[0]) / (x[1] - x[0]));

    for i in 1..n - 1 {
        let h1 = x[i] - x[i - 1];
        let h2 = x[i + 1] - x[i];
        let a = -h2 / (h1 * (h1 + h2));
        let b = (h2 - h1) / (h1 * h2);
        let c = h1 / (h2 * (h1 + h2));
        slopes.push(a * y[i - 1] + b * y[i] + c * y[i + 1]);
    }

    slopes.push((y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]));
    Ok(slopes)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    fn micrometers(values: &[f64]) -> Vec<Length> {
        values.iter().map(|&v| Length::new::<micrometer>(v)).collect()
    }

    #[test]
    fn gradient_is_exact_for_lines() {
        let x = [0.0, 1.0, 3.0, 3.5, 7.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v - 1.0).collect();

        for slope in gradient(&x, &y).expect("valid input") {
            assert_relative_eq!(slope, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn gradient_interior_is_second_order() {
        let x = [0.0, 1.0, 3.0, 6.0];
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        let slopes = gradient(&x, &y).expect("valid input");

        assert_relative_eq!(slopes[0], 1.0);
        assert_relative_eq!(slopes[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(slopes[2], 6.0, epsilon = 1e-12);
        assert_relative_eq!(slopes[3], 9.0);
    }

    #[test]
    fn gradient_rejects_bad_input() {
        assert!(matches!(
            gradient(&[1.0], &[2.0]),
            Err(Error::TooFewPoints { required: 2, actual: 1 })
        ));
        assert!(matches!(
            gradient(&[1.0, 2.0], &[2.0]),
            Err(Error::LengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn coarser_grind_yields_more() {
        let base = BrewParameters::new(Length::new::<micrometer>(250.0));
        let sweep = grind_sweep(&base, &micrometers(&[150.0, 300.0, 450.0])).expect("sweep");

        assert!(sweep.yields.windows(2).all(|pair| pair[1] > pair[0]));
        assert!(sweep.sensitivity().expect("three points").iter().all(|&s| s > 0.0));

        let (best, _) = sweep.best().expect("non-empty");
        assert_relative_eq!(best.get::<micrometer>(), 450.0, max_relative = 1e-12);
    }

    #[test]
    fn surface_has_one_row_per_temperature() {
        let base = BrewParameters::new(Length::new::<micrometer>(250.0));
        let temperatures: Vec<_> = [85.0, 95.0]
            .iter()
            .map(|&c| ThermodynamicTemperature::new::<degree_celsius>(c))
            .collect();
        let surface =
            yield_surface(&base, &micrometers(&[200.0, 400.0]), &temperatures).expect("surface");

        assert_eq!(surface.yields.len(), 2);
        assert!(surface.yields.iter().all(|row| row.len() == 2));
        for grind in 0..2 {
            let cool = surface.get(0, grind).expect("in range");
            let hot = surface.get(1, grind).expect("in range");
            assert!(hot > cool);
        }
        assert_eq!(surface.get(2, 0), None);
    }

    #[test]
    fn empty_sweep_has_no_sensitivity() {
        let base = BrewParameters::new(Length::new::<micrometer>(250.0));
        let sweep = grind_sweep(&base, &[]).expect("nothing to run");

        assert!(sweep.best().is_none());
        assert!(matches!(
            sweep.sensitivity(),
            Err(Error::TooFewPoints { .. })
        ));
    }
}
