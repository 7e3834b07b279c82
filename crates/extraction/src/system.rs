//! The coupled concentration/solubility system.
//!
//! The state is `(C, S)`: dissolved concentration and the soluble mass still
//! in the grounds. Every unit that leaves the grounds enters the solution,
//! so `dC/dt = −dS/dt` and `C + S` is conserved.

use std::convert::Infallible;

use crema_core::{Model, OdeProblem};
use serde::Serialize;

use crate::{BrewParameters, Error, rate::extraction_rate};

/// The state of an extraction at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtractionState {
    /// Dissolved concentration `C`.
    pub concentration: f64,
    /// Soluble mass remaining in the grounds `S`.
    pub remaining: f64,
}

impl ExtractionState {
    /// The state at the start of a run: nothing dissolved, everything remaining.
    #[must_use]
    pub fn initial(params: &BrewParameters) -> Self {
        Self {
            concentration: 0.0,
            remaining: params.max_solubility,
        }
    }
}

/// Input to [`ExtractionModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionInput {
    pub time: f64,
    pub state: ExtractionState,
    pub params: BrewParameters,
}

/// Output of [`ExtractionModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionOutput {
    /// The rate law's value before the saturation guard.
    pub unguarded_rate: f64,
    /// The rate after the saturation guard.
    pub rate: f64,
    /// Whether the guard limited the rate.
    pub saturation_limited: bool,
}

impl ExtractionOutput {
    /// Returns `(dC/dt, dS/dt)`.
    #[must_use]
    pub fn derivatives(&self) -> (f64, f64) {
        (self.rate, -self.rate)
    }
}

/// Evaluates the right-hand side of the extraction system.
///
/// The raw rate comes from the rate law. If extracting at that rate for the
/// elapsed time `t` would remove more than the remaining soluble mass `S`,
/// and `S > 0`, the rate is clamped to `S / t`. The guard never applies at
/// `t = 0` or once `S` is exhausted.
#[must_use]
pub fn derivatives(state: &ExtractionState, time: f64, params: &BrewParameters) -> ExtractionOutput {
    let unguarded_rate = extraction_rate(state.concentration, params);
    let saturation_limited = unguarded_rate * time > state.remaining && state.remaining > 0.0;

    ExtractionOutput {
        unguarded_rate,
        rate: if saturation_limited {
            state.remaining / time
        } else {
            unguarded_rate
        },
        saturation_limited,
    }
}

/// The extraction system as a [`Model`].
///
/// Rejects non-finite rates so the integrator never advances on bad values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionModel;

impl Model for ExtractionModel {
    type Input = ExtractionInput;
    type Output = ExtractionOutput;
    type Error = Error;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let output = derivatives(&input.state, input.time, &input.params);

        if output.rate.is_finite() {
            Ok(output)
        } else {
            Err(Error::NumericalInstability {
                reason: format!(
                    "extraction rate is {} at t = {} s",
                    output.rate, input.time
                ),
            })
        }
    }
}

/// Integrates `(C, S)` over time with the brew parameters held fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionProblem;

impl OdeProblem<2> for ExtractionProblem {
    type Input = ExtractionInput;
    type Output = ExtractionOutput;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<[f64; 2], Self::Error> {
        Ok([input.state.concentration, input.state.remaining])
    }

    fn derivative(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 2], Self::Error> {
        let (concentration, remaining) = output.derivatives();
        Ok([concentration, remaining])
    }

    fn build_input(
        &self,
        base: &Self::Input,
        time: f64,
        state: &[f64; 2],
    ) -> Result<Self::Input, Self::Error> {
        Ok(ExtractionInput {
            time,
            state: ExtractionState {
                concentration: state[0],
                remaining: state[1],
            },
            params: base.params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Pressure},
        length::{meter, micrometer},
        pressure::pascal,
    };

    fn default_shot() -> BrewParameters {
        BrewParameters::new(Length::new::<micrometer>(250.0))
    }

    #[test]
    fn derivatives_conserve_mass() {
        let params = default_shot();
        let state = ExtractionState {
            concentration: 0.1,
            remaining: 0.2,
        };

        let (dc, ds) = derivatives(&state, 5.0, &params).derivatives();
        assert_eq!(dc + ds, 0.0);
        assert!(dc > 0.0);
    }

    #[test]
    fn guard_clamps_to_remaining_mass() {
        let params = default_shot().with_pressure(Pressure::new::<pascal>(2e16));
        let state = ExtractionState {
            concentration: 0.0,
            remaining: 1e-3,
        };

        let output = derivatives(&state, 2.0, &params);
        assert!(output.saturation_limited);
        assert_relative_eq!(output.rate, 5e-4);
        assert_eq!(output.unguarded_rate, extraction_rate(0.0, &params));
    }

    #[test]
    fn guard_is_inactive_at_time_zero() {
        let params = default_shot().with_pressure(Pressure::new::<pascal>(2e16));
        let state = ExtractionState::initial(&params);

        let output = derivatives(&state, 0.0, &params);
        assert!(!output.saturation_limited);
        assert_eq!(output.rate, extraction_rate(0.0, &params));
    }

    #[test]
    fn guard_is_inactive_when_exhausted() {
        let params = default_shot().with_pressure(Pressure::new::<pascal>(2e16));
        let state = ExtractionState {
            concentration: 0.1,
            remaining: 0.0,
        };

        let output = derivatives(&state, 3.0, &params);
        assert!(!output.saturation_limited);
        assert!(output.rate > 0.0);
    }

    #[test]
    fn slow_rates_pass_through() {
        let params = default_shot();
        let state = ExtractionState::initial(&params);

        let output = derivatives(&state, 25.0, &params);
        assert!(!output.saturation_limited);
        assert_eq!(output.rate, extraction_rate(0.0, &params));
    }

    #[test]
    fn model_rejects_non_finite_rates() {
        let params = BrewParameters::new(Length::new::<meter>(1e-320));
        let input = ExtractionInput {
            time: 0.01,
            state: ExtractionState::initial(&params),
            params,
        };

        assert!(matches!(
            ExtractionModel.call(&input),
            Err(Error::NumericalInstability { .. })
        ));
    }

    #[test]
    fn problem_round_trips_state() {
        let params = default_shot();
        let base = ExtractionInput {
            time: 0.01,
            state: ExtractionState::initial(&params),
            params,
        };

        let next = ExtractionProblem
            .build_input(&base, 4.0, &[0.05, 0.25])
            .expect("infallible");

        assert_eq!(next.time, 4.0);
        assert_eq!(next.params, params);
        assert_eq!(ExtractionProblem.state(&next).expect("infallible"), [0.05, 0.25]);
    }
}
