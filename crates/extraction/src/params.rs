//! Brewing parameters for a single extraction run.

use crema_core::constraint::{Constraint, ConstraintError, Finite, NonNegative, StrictlyPositive};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Mass, MolarEnergy, Pressure, ThermodynamicTemperature, Time},
    length::meter,
    mass::kilogram,
    molar_energy::joule_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::{Error, constants::physical_constants, simulation::GRID_START};

/// The inputs to one extraction run.
///
/// Only the grind size is required. Every other field has a default that
/// describes a typical double shot: 93 °C water, 9 bar, 18 g of coffee, and
/// a 25 second contact time. Missing fields take the same defaults when the
/// parameters are deserialized.
///
/// Values are checked by [`BrewParameters::validate`], which every runner
/// calls before integrating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewParameters {
    /// Mean particle diameter.
    pub grind_size: Length,

    /// Brewing water temperature.
    #[serde(default = "default_temperature")]
    pub temperature: ThermodynamicTemperature,

    /// Pressure across the puck.
    #[serde(default = "default_pressure")]
    pub pressure: Pressure,

    /// Dry coffee mass.
    #[serde(default = "default_dose")]
    pub dose: Mass,

    /// Total time water is in contact with the grounds.
    #[serde(default = "default_contact_time")]
    pub contact_time: Time,

    /// Solubility ceiling as a mass fraction.
    #[serde(default = "default_max_solubility")]
    pub max_solubility: f64,

    /// Activation energy of the dissolution.
    #[serde(default = "default_activation_energy")]
    pub activation_energy: MolarEnergy,
}

fn default_temperature() -> ThermodynamicTemperature {
    physical_constants().optimal_temperature
}

fn default_pressure() -> Pressure {
    Pressure::new::<pascal>(9.0e5)
}

fn default_dose() -> Mass {
    Mass::new::<kilogram>(0.018)
}

fn default_contact_time() -> Time {
    Time::new::<second>(25.0)
}

fn default_max_solubility() -> f64 {
    physical_constants().max_solubility
}

fn default_activation_energy() -> MolarEnergy {
    MolarEnergy::new::<joule_per_mole>(45_000.0)
}

impl BrewParameters {
    /// Creates parameters for `grind_size` with every other field defaulted.
    #[must_use]
    pub fn new(grind_size: Length) -> Self {
        Self {
            grind_size,
            temperature: default_temperature(),
            pressure: default_pressure(),
            dose: default_dose(),
            contact_time: default_contact_time(),
            max_solubility: default_max_solubility(),
            activation_energy: default_activation_energy(),
        }
    }

    #[must_use]
    pub fn with_temperature(self, temperature: ThermodynamicTemperature) -> Self {
        Self {
            temperature,
            ..self
        }
    }

    #[must_use]
    pub fn with_pressure(self, pressure: Pressure) -> Self {
        Self { pressure, ..self }
    }

    #[must_use]
    pub fn with_dose(self, dose: Mass) -> Self {
        Self { dose, ..self }
    }

    #[must_use]
    pub fn with_contact_time(self, contact_time: Time) -> Self {
        Self {
            contact_time,
            ..self
        }
    }

    #[must_use]
    pub fn with_max_solubility(self, max_solubility: f64) -> Self {
        Self {
            max_solubility,
            ..self
        }
    }

    #[must_use]
    pub fn with_activation_energy(self, activation_energy: MolarEnergy) -> Self {
        Self {
            activation_energy,
            ..self
        }
    }

    /// Checks every field against its invariant.
    ///
    /// All values must be finite. Pressure may be zero, which yields a run
    /// with no extraction at all. Everything else must be strictly positive,
    /// and the contact time must extend past the 0.01 s start of the output
    /// grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        positive("grind_size", self.grind_size.get::<meter>())?;
        positive("temperature", self.temperature.get::<kelvin>())?;
        non_negative("pressure", self.pressure.get::<pascal>())?;
        positive("dose", self.dose.get::<kilogram>())?;

        let contact_time = self.contact_time.get::<second>();
        positive("contact_time", contact_time)?;
        if contact_time <= GRID_START {
            return Err(Error::InvalidParameter {
                parameter: "contact_time",
                source: ConstraintError::BelowMinimum,
            });
        }

        positive("max_solubility", self.max_solubility)?;
        positive(
            "activation_energy",
            self.activation_energy.get::<joule_per_mole>(),
        )
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), Error> {
    Finite::check(&value)
        .and_then(|()| StrictlyPositive::check(&value))
        .map_err(|source| Error::InvalidParameter { parameter, source })
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), Error> {
    Finite::check(&value)
        .and_then(|()| NonNegative::check(&value))
        .map_err(|source| Error::InvalidParameter { parameter, source })
}
