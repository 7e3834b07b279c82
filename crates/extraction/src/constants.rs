//! Physical constants shared read-only by every extraction run.

use std::sync::LazyLock;

use uom::si::{
    f64::{MassDensity, MolarHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    molar_heat_capacity::joule_per_kelvin_mole,
    thermodynamic_temperature::degree_celsius,
};

/// Process-wide physical constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Universal gas constant.
    pub gas_constant: MolarHeatCapacity,

    /// Brewing temperature used when none is given (93 °C).
    pub optimal_temperature: ThermodynamicTemperature,

    /// Global solubility ceiling as a mass fraction in `(0, 1]`.
    ///
    /// Extraction yields are reported relative to this ceiling.
    pub max_solubility: f64,

    /// Density of the coffee particles.
    pub particle_density: MassDensity,
}

static PHYSICAL_CONSTANTS: LazyLock<PhysicalConstants> = LazyLock::new(|| PhysicalConstants {
    gas_constant: MolarHeatCapacity::new::<joule_per_kelvin_mole>(8.314),
    optimal_temperature: ThermodynamicTemperature::new::<degree_celsius>(93.0),
    max_solubility: 0.3,
    particle_density: MassDensity::new::<kilogram_per_cubic_meter>(500.0),
});

/// Returns the physical constants, built once on first use.
#[must_use]
pub fn physical_constants() -> &'static PhysicalConstants {
    &PHYSICAL_CONSTANTS
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use crema_core::constraint::{Constraint, PositiveFraction, StrictlyPositive};
    use uom::si::thermodynamic_temperature::kelvin;

    #[test]
    fn constants_satisfy_invariants() {
        let constants = physical_constants();

        assert!(StrictlyPositive::check(&constants.gas_constant.get::<joule_per_kelvin_mole>()).is_ok());
        assert!(StrictlyPositive::check(&constants.optimal_temperature.get::<kelvin>()).is_ok());
        assert!(PositiveFraction::check(&constants.max_solubility).is_ok());
        assert!(
            StrictlyPositive::check(&constants.particle_density.get::<kilogram_per_cubic_meter>())
                .is_ok()
        );
    }

    #[test]
    fn optimal_temperature_is_93_celsius() {
        let constants = physical_constants();
        assert_relative_eq!(constants.optimal_temperature.get::<kelvin>(), 366.15, epsilon = 1e-9);
    }

    #[test]
    fn constants_are_shared() {
        assert!(std::ptr::eq(physical_constants(), physical_constants()));
    }
}
