//! Named compound families and their extraction profiles.
//!
//! A profile overrides the solubility ceiling and activation energy of a base
//! set of [`BrewParameters`]. The table is built once and shared read-only;
//! its order is the order in which compositions report their curves.

use std::sync::LazyLock;

use uom::si::{f64::MolarEnergy, molar_energy::joule_per_mole};

use crate::{BrewParameters, Error};

/// Presentation hint carried with each profile.
///
/// The engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayTag {
    Red,
    Green,
    Blue,
}

impl DisplayTag {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

/// The extraction characteristics of one compound family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundProfile {
    pub name: &'static str,
    pub max_solubility: f64,
    pub activation_energy: MolarEnergy,
    pub display_tag: DisplayTag,
}

impl CompoundProfile {
    /// Returns `params` with this profile's ceiling and activation energy.
    #[must_use]
    pub fn apply(&self, params: BrewParameters) -> BrewParameters {
        params
            .with_max_solubility(self.max_solubility)
            .with_activation_energy(self.activation_energy)
    }
}

static COMPOUND_PROFILES: LazyLock<[CompoundProfile; 3]> = LazyLock::new(|| {
    [
        CompoundProfile {
            name: "Syrer",
            max_solubility: 0.08,
            activation_energy: MolarEnergy::new::<joule_per_mole>(38_000.0),
            display_tag: DisplayTag::Red,
        },
        CompoundProfile {
            name: "Sukkerarter",
            max_solubility: 0.12,
            activation_energy: MolarEnergy::new::<joule_per_mole>(45_000.0),
            display_tag: DisplayTag::Green,
        },
        CompoundProfile {
            name: "Bitterstoffer",
            max_solubility: 0.10,
            activation_energy: MolarEnergy::new::<joule_per_mole>(52_000.0),
            display_tag: DisplayTag::Blue,
        },
    ]
});

/// Returns every known compound profile in table order.
///
/// The families are acids (`Syrer`), sugars (`Sukkerarter`), and bitter
/// compounds (`Bitterstoffer`).
#[must_use]
pub fn compound_profiles() -> &'static [CompoundProfile] {
    COMPOUND_PROFILES.as_slice()
}

/// Looks up a profile by its exact name.
///
/// # Errors
///
/// Returns [`Error::UnknownCompound`] if no profile has that name.
pub fn compound(name: &str) -> Result<&'static CompoundProfile, Error> {
    compound_profiles()
        .iter()
        .find(|profile| profile.name == name)
        .ok_or_else(|| Error::UnknownCompound(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crema_core::constraint::{Constraint, PositiveFraction};
    use uom::si::{f64::Length, length::micrometer};

    #[test]
    fn table_order_is_stable() {
        let names: Vec<_> = compound_profiles().iter().map(|p| p.name).collect();
        assert_eq!(names, ["Syrer", "Sukkerarter", "Bitterstoffer"]);
    }

    #[test]
    fn ceilings_are_fractions() {
        for profile in compound_profiles() {
            assert!(PositiveFraction::check(&profile.max_solubility).is_ok());
            assert!(profile.activation_energy.get::<joule_per_mole>() > 0.0);
        }
    }

    #[test]
    fn lookup_by_name() {
        let sugars = compound("Sukkerarter").expect("known compound");
        assert_eq!(sugars.max_solubility, 0.12);
        assert_eq!(sugars.display_tag.as_str(), "green");
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(
            compound("Koffein"),
            Err(Error::UnknownCompound(name)) if name == "Koffein"
        ));
        assert!(compound("syrer").is_err());
    }

    #[test]
    fn apply_overrides_only_compound_fields() {
        let base = BrewParameters::new(Length::new::<micrometer>(300.0));
        let bitter = compound("Bitterstoffer").expect("known compound");
        let params = bitter.apply(base);

        assert_eq!(params.max_solubility, 0.10);
        assert_eq!(params.activation_energy, bitter.activation_energy);
        assert_eq!(params.grind_size, base.grind_size);
        assert_eq!(params.temperature, base.temperature);
        assert_eq!(params.contact_time, base.contact_time);
    }
}
