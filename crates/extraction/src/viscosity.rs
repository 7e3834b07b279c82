//! Temperature dependence of the brewing water's viscosity.

use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

/// Viscosity of water at the reference temperature [Pa·s].
const REFERENCE_VISCOSITY: f64 = 0.001;

/// Reference temperature, water's boiling point [K].
const REFERENCE_TEMPERATURE: f64 = 373.15;

/// Arrhenius-like slope of the viscosity curve [K].
const VISCOSITY_SLOPE: f64 = 2000.0;

/// Returns the dynamic viscosity of water at `temperature`.
///
/// ```text
/// μ(T) = 0.001 · exp(2000 · (1/T − 1/373.15))
/// ```
///
/// The curve is anchored so that `μ(373.15 K)` is exactly `0.001 Pa·s`.
/// Temperatures must be strictly positive; callers validate this upstream.
#[must_use]
pub fn viscosity(temperature: ThermodynamicTemperature) -> DynamicViscosity {
    DynamicViscosity::new::<pascal_second>(viscosity_si(temperature.get::<kelvin>()))
}

/// Viscosity in Pa·s for a temperature in kelvin.
pub(crate) fn viscosity_si(temperature_k: f64) -> f64 {
    REFERENCE_VISCOSITY
        * (VISCOSITY_SLOPE * (1.0 / temperature_k - 1.0 / REFERENCE_TEMPERATURE)).exp()
}
