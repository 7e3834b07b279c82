//! Running one extraction over the output time grid.

use crema_solvers::transient::dopri5::{self, Config};
use serde::Serialize;
use tracing::{debug, warn};
use uom::si::{
    f64::Time, length::micrometer, pressure::pascal, thermodynamic_temperature::kelvin,
    time::second,
};

use crate::{
    BrewParameters, Error,
    system::{ExtractionInput, ExtractionModel, ExtractionProblem, ExtractionState},
};

/// First output time of every run [s].
///
/// The grid starts just after zero so the saturation guard never divides by
/// a zero elapsed time.
pub const GRID_START: f64 = 0.01;

/// Number of output points in every run.
pub const GRID_POINTS: usize = 100;

/// Returns `points` evenly spaced values from `start` to `stop` inclusive.
///
/// The last value is exactly `stop`. A single point yields `[start]`.
#[must_use]
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| start + i as f64 * step).collect();
            values[points - 1] = stop;
            values
        }
    }
}

/// Returns the output grid for a run lasting `contact_time`.
#[must_use]
pub fn time_grid(contact_time: Time) -> Vec<f64> {
    linspace(GRID_START, contact_time.get::<second>(), GRID_POINTS)
}

/// Concentration and remaining soluble mass sampled over one run.
///
/// The three vectors are aligned and share the run's time grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub time: Vec<f64>,
    pub concentration: Vec<f64>,
    pub remaining: Vec<f64>,
}

impl SimulationResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterates over `(t, C, S)` triples in time order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.time
            .iter()
            .zip(&self.concentration)
            .zip(&self.remaining)
            .map(|((&t, &c), &s)| (t, c, s))
    }

    /// Returns the concentration at the end of the run.
    #[must_use]
    pub fn final_concentration(&self) -> Option<f64> {
        self.concentration.last().copied()
    }

    /// Returns the final concentration as a percentage of the global
    /// solubility ceiling.
    #[must_use]
    pub fn extraction_yield(&self) -> Option<f64> {
        let ceiling = crate::physical_constants().max_solubility;
        self.final_concentration()
            .map(|concentration| concentration / ceiling * 100.0)
    }
}

/// Simulates one extraction with default solver settings.
///
/// # Errors
///
/// See [`run_simulation_with`].
pub fn run_simulation(params: &BrewParameters) -> Result<SimulationResult, Error> {
    run_simulation_with(params, &Config::default())
}

/// Simulates one extraction, integrating `(C, S)` from `(0, max_solubility)`
/// over the 100-point grid from 0.01 s to the contact time.
///
/// The run either completes on the whole grid or fails; partial results are
/// never returned.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if the parameters fail validation.
/// - [`Error::NumericalInstability`] if the rate becomes non-finite or the
///   integrator cannot complete an interval.
/// - [`Error::Cancelled`] if the config's time budget runs out.
pub fn run_simulation_with(
    params: &BrewParameters,
    config: &Config,
) -> Result<SimulationResult, Error> {
    params.validate()?;

    let times = time_grid(params.contact_time);
    debug!(
        grind_size_um = params.grind_size.get::<micrometer>(),
        temperature_k = params.temperature.get::<kelvin>(),
        pressure_pa = params.pressure.get::<pascal>(),
        contact_time_s = params.contact_time.get::<second>(),
        max_solubility = params.max_solubility,
        "running extraction"
    );

    let initial = ExtractionInput {
        time: GRID_START,
        state: ExtractionState::initial(params),
        params: *params,
    };

    let solution =
        dopri5::solve_unobserved(&ExtractionModel, &ExtractionProblem, initial, &times, config)
            .map_err(|err| {
                let err = Error::from(err);
                warn!(%err, "extraction failed");
                err
            })?;

    let mut result = SimulationResult {
        time: solution.times,
        concentration: Vec::with_capacity(GRID_POINTS),
        remaining: Vec::with_capacity(GRID_POINTS),
    };
    for snapshot in &solution.history {
        result.concentration.push(snapshot.input.state.concentration);
        result.remaining.push(snapshot.input.state.remaining);
    }

    debug!(
        evaluations = solution.evaluations,
        final_concentration = result.final_concentration(),
        "extraction complete"
    );

    Ok(result)
}
