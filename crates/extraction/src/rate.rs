//! The extraction rate law.
//!
//! The rate combines an Arrhenius rate constant, the specific surface area of
//! the grounds, the remaining solubility headroom, and Darcy flow through a
//! Kozeny–Carman packed bed:
//!
//! ```text
//! k       = 5e-3 · exp(−Ea / (R·T))
//! perm    = d² / 150
//! flow    = π · r² · perm · P / (μ(T) · L)
//! surface = 3 · dose / (ρ · d/2)
//! rate    = k · surface · (C_max − C) · flow
//! ```
//!
//! Grind size acts through two opposing terms: a finer grind exposes more
//! surface but chokes the flow. With the exponents above the two combine to a
//! rate that is linear in `d`.

use std::f64::consts::PI;

use uom::si::{
    length::meter, mass::kilogram, mass_density::kilogram_per_cubic_meter,
    molar_energy::joule_per_mole, molar_heat_capacity::joule_per_kelvin_mole, pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::{BrewParameters, constants::physical_constants, viscosity::viscosity_si};

/// Pre-exponential factor of the rate constant [1/s].
const PRE_EXPONENTIAL_FACTOR: f64 = 5e-3;

/// Kozeny–Carman denominator relating grind size to bed permeability.
const KOZENY_CARMAN_FACTOR: f64 = 150.0;

/// Radius of the filter basket [m].
const FILTER_RADIUS: f64 = 0.03;

/// Depth of the coffee bed [m].
const BED_DEPTH: f64 = 0.03;

/// The intermediate terms of one rate evaluation, all in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTerms {
    pub rate_constant: f64,
    pub permeability: f64,
    pub viscosity: f64,
    pub flow: f64,
    pub surface: f64,
    /// Solubility ceiling minus the current concentration.
    pub headroom: f64,
    pub rate: f64,
}

/// Evaluates the rate law and returns every intermediate term.
///
/// The result is deterministic for identical inputs. A concentration above
/// the ceiling gives a negative rate; the saturation guard in
/// [`derivatives`](crate::derivatives) is the only clamp applied downstream.
#[must_use]
pub fn rate_terms(concentration: f64, params: &BrewParameters) -> RateTerms {
    let constants = physical_constants();
    let gas_constant = constants.gas_constant.get::<joule_per_kelvin_mole>();
    let particle_density = constants.particle_density.get::<kilogram_per_cubic_meter>();

    let grind_size = params.grind_size.get::<meter>();
    let temperature = params.temperature.get::<kelvin>();
    let pressure = params.pressure.get::<pascal>();
    let dose = params.dose.get::<kilogram>();
    let activation_energy = params.activation_energy.get::<joule_per_mole>();

    let rate_constant =
        PRE_EXPONENTIAL_FACTOR * (-activation_energy / (gas_constant * temperature)).exp();
    let permeability = grind_size.powi(2) / KOZENY_CARMAN_FACTOR;
    let viscosity = viscosity_si(temperature);
    let flow = (PI * FILTER_RADIUS.powi(2) * permeability * pressure) / (viscosity * BED_DEPTH);
    let surface = 3.0 * dose / (particle_density * (grind_size / 2.0));
    let headroom = params.max_solubility - concentration;
    let rate = rate_constant * surface * headroom * flow;

    RateTerms {
        rate_constant,
        permeability,
        viscosity,
        flow,
        surface,
        headroom,
        rate,
    }
}

/// Returns the extraction rate in mass fraction per second.
#[must_use]
pub fn extraction_rate(concentration: f64, params: &BrewParameters) -> f64 {
    rate_terms(concentration, params).rate
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, MolarEnergy, Pressure, ThermodynamicTemperature},
        length::micrometer,
    };

    fn shot(grind_um: f64) -> BrewParameters {
        BrewParameters::new(Length::new::<meter>(grind_um * 1e-6))
            .with_temperature(ThermodynamicTemperature::new::<kelvin>(366.15))
    }

    #[test]
    fn matches_reference_value() {
        let params = BrewParameters::new(Length::new::<meter>(250e-6))
            .with_temperature(ThermodynamicTemperature::new::<kelvin>(366.15));

        assert_relative_eq!(
            extraction_rate(0.0, &params),
            1.572_221_504_482_430_4e-11,
            max_relative = 1e-12
        );
    }

    #[test]
    fn no_pressure_means_no_flow() {
        let params = shot(250.0).with_pressure(Pressure::new::<pascal>(0.0));
        let terms = rate_terms(0.0, &params);

        assert_eq!(terms.flow, 0.0);
        assert_eq!(terms.rate, 0.0);
    }

    #[test]
    fn saturated_solution_stops_extracting() {
        let params = shot(250.0);
        assert_eq!(extraction_rate(params.max_solubility, &params), 0.0);
        assert!(extraction_rate(params.max_solubility + 0.01, &params) < 0.0);
    }

    #[test]
    fn grind_size_acts_through_opposing_terms() {
        let fine = rate_terms(0.0, &shot(200.0));
        let coarse = rate_terms(0.0, &shot(400.0));

        assert_relative_eq!(coarse.surface, fine.surface / 2.0, max_relative = 1e-12);
        assert_relative_eq!(coarse.permeability, fine.permeability * 4.0, max_relative = 1e-12);
        assert_relative_eq!(coarse.flow, fine.flow * 4.0, max_relative = 1e-12);
        assert_relative_eq!(coarse.rate, fine.rate * 2.0, max_relative = 1e-12);
    }

    #[test]
    fn hotter_water_extracts_faster() {
        let cool = shot(250.0).with_temperature(ThermodynamicTemperature::new::<kelvin>(353.15));
        let hot = shot(250.0).with_temperature(ThermodynamicTemperature::new::<kelvin>(373.15));

        let cool = rate_terms(0.0, &cool);
        let hot = rate_terms(0.0, &hot);

        assert!(hot.rate_constant > cool.rate_constant);
        assert!(hot.viscosity < cool.viscosity);
        assert!(hot.rate > cool.rate);
    }

    #[test]
    fn higher_activation_energy_is_slower() {
        let params = shot(250.0);
        let bitter = params.with_activation_energy(MolarEnergy::new::<joule_per_mole>(52_000.0));

        assert!(extraction_rate(0.0, &bitter) < extraction_rate(0.0, &params));
    }

    #[test]
    fn rate_is_deterministic() {
        let params = BrewParameters::new(Length::new::<micrometer>(310.0));
        assert_eq!(
            extraction_rate(0.05, &params).to_bits(),
            extraction_rate(0.05, &params).to_bits()
        );
    }
}
