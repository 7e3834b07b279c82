//! Per-compound runs and their combined total.

use tracing::debug;

use crate::{
    BrewParameters, CompoundProfile, Error, SimulationResult, compound, compound_profiles,
    run_simulation, time_grid,
};

/// One compound's run within a [`Composition`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCurve {
    pub profile: CompoundProfile,
    pub result: SimulationResult,
}

/// Per-compound concentration curves on a shared grid, with their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub time: Vec<f64>,
    /// Curves in the order the profiles were given.
    pub curves: Vec<CompoundCurve>,
    /// Element-wise sum of every curve's concentration.
    pub total: Vec<f64>,
}

impl Composition {
    /// Returns the curve for the named compound, if it was simulated.
    #[must_use]
    pub fn curve(&self, name: &str) -> Option<&CompoundCurve> {
        self.curves.iter().find(|curve| curve.profile.name == name)
    }
}

/// Simulates a single named compound on top of `base`.
///
/// # Errors
///
/// Returns [`Error::UnknownCompound`] if the name is not in the profile
/// table, or any error from [`run_simulation`].
pub fn simulate_compound(name: &str, base: &BrewParameters) -> Result<SimulationResult, Error> {
    let profile = compound(name)?;
    run_simulation(&profile.apply(*base))
}

/// Simulates each profile on top of `base` and sums the concentrations.
///
/// An empty profile list gives a composition with no curves and an all-zero
/// total on the base grid.
///
/// # Errors
///
/// Fails on the first compound whose run fails, or with
/// [`Error::GridMismatch`] if a run does not share the base grid.
pub fn compose(base: &BrewParameters, profiles: &[CompoundProfile]) -> Result<Composition, Error> {
    base.validate()?;

    let time = time_grid(base.contact_time);
    let mut total = vec![0.0; time.len()];
    let mut curves = Vec::with_capacity(profiles.len());

    for profile in profiles {
        let result = run_simulation(&profile.apply(*base))?;
        if result.time != time {
            return Err(Error::GridMismatch {
                compound: profile.name.to_owned(),
            });
        }

        for (sum, concentration) in total.iter_mut().zip(&result.concentration) {
            *sum += concentration;
        }
        curves.push(CompoundCurve {
            profile: *profile,
            result,
        });
    }

    debug!(compounds = curves.len(), "composition complete");

    Ok(Composition {
        time,
        curves,
        total,
    })
}

/// Composes every profile in the compound table.
///
/// # Errors
///
/// See [`compose`].
pub fn compose_all(base: &BrewParameters) -> Result<Composition, Error> {
    compose(base, compound_profiles())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::micrometer};

    fn base() -> BrewParameters {
        BrewParameters::new(Length::new::<micrometer>(250.0))
    }

    #[test]
    fn empty_composition_is_all_zero() {
        let composition = compose(&base(), &[]).expect("nothing to fail");

        assert!(composition.curves.is_empty());
        assert_eq!(composition.time.len(), 100);
        assert!(composition.total.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn total_is_the_sum_of_curves() {
        let composition = compose_all(&base()).expect("composition should succeed");
        assert_eq!(composition.curves.len(), 3);

        for (i, &total) in composition.total.iter().enumerate() {
            let sum: f64 = composition
                .curves
                .iter()
                .map(|curve| curve.result.concentration[i])
                .sum();
            assert_relative_eq!(total, sum, max_relative = 1e-12);
        }
    }

    #[test]
    fn curves_follow_profile_order() {
        let profiles = compound_profiles();
        let reversed: Vec<_> = profiles.iter().rev().copied().collect();
        let composition = compose(&base(), &reversed).expect("composition should succeed");

        let names: Vec<_> = composition.curves.iter().map(|c| c.profile.name).collect();
        assert_eq!(names, ["Bitterstoffer", "Sukkerarter", "Syrer"]);
        assert!(composition.curve("Syrer").is_some());
        assert!(composition.curve("Koffein").is_none());
    }

    #[test]
    fn single_compound_matches_its_curve() {
        let alone = simulate_compound("Syrer", &base()).expect("known compound");
        let composition = compose_all(&base()).expect("composition should succeed");
        let curve = composition.curve("Syrer").expect("acids are in the table");

        assert_eq!(curve.result, alone);
    }

    #[test]
    fn unknown_compound_is_rejected() {
        assert!(matches!(
            simulate_compound("Koffein", &base()),
            Err(Error::UnknownCompound(_))
        ));
    }
}
